//! Grammar rules.
//!
//! A [`Rule`] is the unit of grammar. It exposes the operators it wants in
//! the registry (`register`), a `pre` hook that may start a sub-expression
//! before anything is known, and a `post` hook that may extend an
//! already-parsed left operand. Rules are configured with typed structs;
//! node construction goes through plain build functions supplied by the
//! grammar presets.

pub mod binary;
pub mod identifier;
pub mod multiple;
pub mod number;
pub mod regex;
pub mod string;
pub mod ternary;
pub mod try_branch;
pub mod unary;

pub use binary::{BinaryConf, BinaryOperatorRule};
pub use identifier::{IdentifierConf, IdentifierRule};
pub use multiple::{MultiOperatorRule, MultipleConf};
pub use number::{NumberConf, NumberRule};
pub use regex::{RegexConf, RegexRule};
pub use string::{StringConf, StringRule};
pub use ternary::{TernaryConf, TernaryOperatorRule};
pub use try_branch::TryBranchRule;
pub use unary::{UnaryConf, UnaryOperatorRule};

use jsexpr_ast::{Node, NodeKind};
use jsexpr_diagnostics::ParseResult;

use crate::context::ParserContext;

/// A parsing rule: one slot in a precedence chain.
pub trait Rule {
    /// Operators this rule wants registered, as
    /// `(token, requires_trailing_space)` pairs.
    fn register(&self) -> Vec<(String, bool)> {
        Vec::new()
    }

    /// Try to start a sub-expression at the cursor. `Ok(None)` declines
    /// without consuming input.
    fn pre(&self, _ctx: &mut ParserContext<'_>) -> ParseResult<Option<Node>> {
        Ok(None)
    }

    /// Try to extend an already-parsed left operand.
    fn post(&self, _ctx: &mut ParserContext<'_>, bubbled: Node) -> ParseResult<Node> {
        Ok(bubbled)
    }
}

/// Policy for empty slots between explicit separators.
#[derive(Debug, Clone)]
pub enum Sparse {
    /// Empty slots are a syntax error.
    No,
    /// Empty slots become `None` holes (`[1, , 3]`).
    Hole,
    /// Empty slots are replaced by a filler node (statement lists use
    /// `EmptyStatement`).
    Filler(fn() -> NodeKind),
}

/// Configuration of the shared multi-element list primitive.
#[derive(Debug, Clone)]
pub struct MultiConf {
    /// Separator characters. `' '` matches a pending space, `'\n'` a
    /// pending line terminator or EOF, `'\0'` juxtaposition. Empty means
    /// wrapper mode: exactly one expression, no list.
    pub separators: &'static str,
    /// Maximum number of separators (`None` = unlimited).
    pub max_sep: Option<usize>,
    /// Empty-slot policy between explicit separators.
    pub sparse: Sparse,
    /// Tolerate a trailing separator.
    pub trailing: bool,
    /// Restrict which node kinds are acceptable as elements.
    pub types: Option<fn(&Node) -> bool>,
}

impl Default for MultiConf {
    fn default() -> Self {
        Self {
            separators: "",
            max_sep: None,
            sparse: Sparse::No,
            trailing: false,
            types: None,
        }
    }
}

/// The operand(s) handed to a build function: a single node for plain
/// operators, the element list for closed/separated forms.
#[derive(Debug)]
pub enum Operand {
    Single(Node),
    List(Vec<Option<Node>>),
}

impl Operand {
    /// Flatten a list operand, dropping holes (argument lists never have
    /// holes; their grammars disallow sparse slots).
    pub fn into_list(self) -> Vec<Node> {
        match self {
            Operand::Single(node) => vec![node],
            Operand::List(nodes) => nodes.into_iter().flatten().collect(),
        }
    }

    /// The single operand of an open operator.
    pub fn into_single(self) -> Option<Node> {
        match self {
            Operand::Single(node) => Some(node),
            Operand::List(nodes) => nodes.into_iter().next().flatten(),
        }
    }
}

/// Node construction for binary rules: `(operator, left, right)`.
pub type BinaryBuild = fn(&str, Node, Operand) -> Result<Node, String>;

/// Node construction for unary rules: `(operator, argument)`.
pub type UnaryBuild = fn(&str, Operand) -> Result<Node, String>;

/// Node construction for multi rules: the parsed element list.
pub type MultiBuild = fn(Vec<Option<Node>>) -> Result<Node, String>;

/// Node construction for ternary rules: `(first, middle, last)`.
pub type TernaryBuild = fn(Node, Node, Node) -> Node;
