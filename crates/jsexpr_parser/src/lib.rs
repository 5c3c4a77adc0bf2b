//! jsexpr_parser: A table-driven, precedence-climbing expression parser.
//!
//! A grammar is an ordered table of named precedence levels, each holding
//! parsing rules (or an alias to another level). Parsing runs in two
//! phases: a bottom-up *pre* phase descends the table until some rule
//! starts an expression, then a top-down *post* phase lets every level on
//! the way back extend the bubbled node (binary chains, ternaries, postfix
//! operators, call/member chains).
//!
//! The bundled presets produce ESTree-compatible trees for a jsep-like
//! minimal dialect (`basic`), an ES5 expression dialect, ES6 (arrows,
//! destructuring) and an ES-next dialect (exponentiation, optional
//! chaining, nullish coalescing, spread).

pub mod context;
pub mod parser;
pub mod presets;
pub mod rules;

pub use context::{Jump, ParserContext, RuleSet, RuleSlot};
pub use jsexpr_diagnostics::{ParseError, ParseResult};
pub use parser::{Parser, ParserConfig, ParserOptions};
pub use presets::{basic_parser, es5_parser, es6_parser, esnext_parser, PresetOptions};
pub use rules::{MultiConf, Operand, Rule, Sparse};
