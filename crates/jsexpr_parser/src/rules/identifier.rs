//! Rule parsing identifiers, keyword literals and `this`.

use jsexpr_ast::{LiteralValue, Node, NodeKind};
use jsexpr_diagnostics::{messages, ParseResult};
use jsexpr_scanner::CharClass;

use crate::context::ParserContext;
use crate::rules::Rule;

/// Configuration of an identifier rule.
#[derive(Debug, Clone, Default)]
pub struct IdentifierConf {
    /// Keyword literals (`true`, `false`, `null`) and their values.
    pub literals: Vec<(&'static str, LiteralValue)>,
    /// Match `this` as a `ThisExpression`.
    pub this_expression: bool,
    /// Words not valid as identifiers.
    pub reserved: &'static [&'static str],
    /// Override of the grammar-level identifier-start class.
    pub ident_start: Option<CharClass>,
    /// Override of the grammar-level identifier-part class.
    pub ident_part: Option<CharClass>,
}

/// Rule parsing one identifier-shaped token.
pub struct IdentifierRule {
    conf: IdentifierConf,
}

impl IdentifierRule {
    pub fn new(conf: IdentifierConf) -> Self {
        Self { conf }
    }
}

impl Rule for IdentifierRule {
    fn pre(&self, ctx: &mut ParserContext<'_>) -> ParseResult<Option<Node>> {
        let start_class = match &self.conf.ident_start {
            Some(class) => class.overriding(&ctx.config().ident_start),
            None => ctx.config().ident_start.clone(),
        };
        if !ctx.cursor.is_ident_start(&start_class) {
            return Ok(None);
        }
        let part_class = match &self.conf.ident_part {
            Some(class) => class.overriding(&ctx.config().ident_part),
            None => ctx.config().ident_part.clone(),
        };

        let mut name = String::new();
        name.push(ctx.cursor.take().unwrap());
        while !ctx.cursor.eof() && ctx.cursor.is_ident_part(&part_class) {
            name.push(ctx.cursor.take().unwrap());
        }

        if self.conf.this_expression && name == "this" {
            return Ok(Some(Node::new(NodeKind::ThisExpression)));
        }
        if let Some((_, value)) = self.conf.literals.iter().find(|(lit, _)| *lit == name)
        {
            return Ok(Some(Node::new(NodeKind::Literal {
                value: value.clone(),
                raw: name,
                regex: None,
            })));
        }
        if self.conf.reserved.contains(&name.as_str()) {
            return Err(ctx.err(messages::INVALID_RESERVED_IDENTIFIER));
        }
        Ok(Some(Node::new(NodeKind::Identifier { name })))
    }
}
