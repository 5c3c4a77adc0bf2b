//! Rule parsing multiple expressions into one wrapping node.
//!
//! With separators this produces statement lists and comma sequences;
//! without separators it acts as a wrapper around a single inner
//! expression (`ExpressionStatement`). When the list does not actually
//! match (a single expression and no separator seen), the inner node
//! bubbles up unwrapped.

use jsexpr_ast::Node;
use jsexpr_core::text::TextRange;
use jsexpr_diagnostics::{messages, ParseResult};

use crate::context::{Jump, ParserContext};
use crate::rules::{MultiBuild, MultiConf, Rule};

/// Configuration of a multi-expression rule.
#[derive(Debug, Clone)]
pub struct MultipleConf {
    pub multi: MultiConf,
    /// Branch used to parse each element; `None` continues with the next
    /// level.
    pub sub_rules: Option<&'static str>,
    /// Allow a fully empty list (empty program).
    pub empty: bool,
    pub build: MultiBuild,
}

/// Rule wrapping `expr (sep expr)*` in a container node.
pub struct MultiOperatorRule {
    conf: MultipleConf,
}

impl MultiOperatorRule {
    pub fn new(conf: MultipleConf) -> Self {
        Self { conf }
    }
}

impl Rule for MultiOperatorRule {
    fn pre(&self, ctx: &mut ParserContext<'_>) -> ParseResult<Option<Node>> {
        // runs in the pre phase so an empty first slot can be detected
        let start = ctx.cursor.pos();
        let jump = match self.conf.sub_rules {
            Some(label) => Jump::Label(label),
            None => Jump::Next,
        };

        let (nodes, matched) = ctx.parse_multi(&self.conf.multi, jump)?;

        if !matched {
            return Ok(nodes.into_iter().next().flatten());
        }
        if nodes.is_empty() && (!self.conf.empty || self.conf.multi.separators.is_empty())
        {
            return Err(ctx.err(messages::EXPRESSION_EXPECTED));
        }

        let mut node = (self.conf.build)(nodes).map_err(|msg| ctx.err(msg))?;

        if ctx.config().range && node.range.is_none() {
            let end = if ctx.cursor.eof() && !ctx.cursor.saw_newline() {
                ctx.cursor.consumed_end()
            } else {
                ctx.cursor.pos()
            };
            node.range = Some(TextRange::new(start as u32, end as u32));
        }
        Ok(Some(node))
    }
}
