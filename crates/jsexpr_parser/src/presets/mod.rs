//! Grammar presets.
//!
//! Concrete grammar tables built from the generic rules: a jsep-compatible
//! minimal dialect, an ES5 expression dialect, ES6 (arrow functions,
//! destructuring) and ES-next (exponentiation, optional chaining, nullish
//! coalescing, spread). Extension works by splicing rules and branches
//! into a base table, so a dialect is a delta over its predecessor.

pub mod basic;
pub mod consts;
pub mod es5;
pub mod es6;
pub mod esnext;

pub use basic::{basic_parser, basic_parser_with, basic_rules};
pub use es5::{es5_parser, es5_rules};
pub use es6::{es6_parser, es6_rules};
pub use esnext::{esnext_parser, esnext_rules};

use jsexpr_scanner::CharClass;

use crate::parser::ParserOptions;

/// Options shared by every preset constructor.
#[derive(Debug, Clone)]
pub struct PresetOptions {
    /// Parse statement lists (`Program`); otherwise a single expression.
    pub statement: bool,
    /// Custom identifier-start class.
    pub ident_start: Option<CharClass>,
    /// Custom identifier-part class.
    pub ident_part: Option<CharClass>,
    /// Stamp source ranges on nodes.
    pub range: bool,
}

impl Default for PresetOptions {
    fn default() -> Self {
        Self {
            statement: true,
            ident_start: None,
            ident_part: None,
            range: false,
        }
    }
}

/// Options threaded through grammar construction.
#[derive(Debug, Clone, Default)]
pub struct GrammarOpts {
    pub ident_start: Option<CharClass>,
    pub ident_part: Option<CharClass>,
    /// Tolerate trailing commas in call argument lists (ES2017+).
    pub call_trailing_comma: bool,
}

impl GrammarOpts {
    pub fn from_preset(options: &PresetOptions) -> Self {
        Self {
            ident_start: options.ident_start.clone(),
            ident_part: options.ident_part.clone(),
            call_trailing_comma: false,
        }
    }
}

pub(crate) fn parser_options(options: &PresetOptions) -> ParserOptions {
    ParserOptions {
        ident_start: options.ident_start.clone(),
        ident_part: options.ident_part.clone(),
        range: options.range,
    }
}
