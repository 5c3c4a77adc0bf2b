//! jsexpr_core: Shared primitives for the jsexpr expression front end.
//!
//! Currently this is the source-position vocabulary (`TextRange`,
//! `TextSpan`, `LineMap`) used by the scanner, the parser and the
//! diagnostics layer.

pub mod text;

pub use text::{LineAndColumn, LineMap, TextPos, TextRange, TextSpan};
