//! jsexpr_scanner: The character-level machinery under the parsers.
//!
//! [`Cursor`] wraps the expression text and tracks the current position
//! together with the "preceded by space" / "preceded by line terminator"
//! flags that several grammar rules consult (postfix operators, implicit
//! statement separators). [`OperatorRegistry`] holds every operator string
//! a grammar registered and answers longest-match queries at the cursor.

pub mod char_class;
pub mod cursor;
pub mod ops;

pub use char_class::{CharClass, Matcher};
pub use cursor::{Cursor, CursorState, HexDigits, Sep};
pub use ops::OperatorRegistry;
