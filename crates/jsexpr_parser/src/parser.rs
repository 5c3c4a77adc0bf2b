//! The parser entry point.
//!
//! A [`Parser`] is built once from a grammar table: it folds every rule's
//! registered operators into the [`OperatorRegistry`] and then serves any
//! number of sequential `parse` calls, each with its own context.

use jsexpr_ast::Node;
use jsexpr_diagnostics::{messages, ParseError, ParseResult};
use jsexpr_scanner::{CharClass, OperatorRegistry};

use crate::context::{Jump, ParserContext, RuleSet};

/// Parser-level configuration shared by every rule of a grammar.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Default identifier-start class (rules may override per use).
    pub ident_start: CharClass,
    /// Default identifier-part class.
    pub ident_part: CharClass,
    /// Whether to stamp `[start, end)` ranges on produced nodes.
    pub range: bool,
}

/// Constructor-time options of a [`Parser`].
#[derive(Debug, Clone, Default)]
pub struct ParserOptions {
    pub ident_start: Option<CharClass>,
    pub ident_part: Option<CharClass>,
    pub range: bool,
}

/// An immutable, reusable parser for one grammar table.
pub struct Parser {
    rules: RuleSet,
    start_branch: String,
    config: ParserConfig,
    registry: OperatorRegistry,
}

impl Parser {
    /// Build a parser from a grammar table and a start branch.
    ///
    /// Registration happens here, exactly once: operators are folded into
    /// the registry (first registration wins) and alias targets are
    /// checked so resolution terminates.
    pub fn new(rules: RuleSet, start_branch: &str, options: ParserOptions) -> Self {
        if let Err(msg) = rules.check_aliases() {
            panic!("invalid grammar table: {msg}");
        }
        let registry = OperatorRegistry::build(rules.registered_operators());
        Self {
            rules,
            start_branch: start_branch.to_string(),
            config: ParserConfig {
                ident_start: options.ident_start.unwrap_or_else(CharClass::ident_start),
                ident_part: options.ident_part.unwrap_or_else(CharClass::ident_part),
                range: options.range,
            },
            registry,
        }
    }

    /// The operator registry derived from the grammar.
    pub fn registry(&self) -> &OperatorRegistry {
        &self.registry
    }

    /// Parse a complete expression.
    ///
    /// The whole input must be consumed: trailing non-whitespace after
    /// the parsed expression is a syntax error.
    pub fn parse(&self, expr: &str) -> ParseResult<Node> {
        let mut ctx = ParserContext::new(expr, &self.rules, &self.config, &self.registry);
        let node = ctx.parse_next(Jump::Label(&self.start_branch))?;
        ctx.cursor.skip_spaces();
        if !ctx.cursor.eof() {
            return Err(ParseError::new(
                messages::UNEXPECTED_CHAR,
                ctx.cursor.pos() as u32,
            ));
        }
        Ok(node)
    }
}
