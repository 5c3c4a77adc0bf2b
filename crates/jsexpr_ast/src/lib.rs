//! jsexpr_ast: The AST produced by the jsexpr parsers.
//!
//! Node `type` strings and field names are wire-compatible with the ESTree
//! convention, so serialized trees can be compared structurally against
//! reference parsers. The tree is a closed sum type: every consumer
//! (evaluators, printers) matches exhaustively on [`NodeKind`].

pub mod node;
mod ser;

pub use node::{LiteralValue, Node, NodeKind, RegexLiteral};
