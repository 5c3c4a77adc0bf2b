//! Rule parsing regular expression literals (`/pattern/flags`).
//!
//! The pattern is scanned structurally (escapes and character classes
//! tracked so `/` inside `[...]` does not terminate), not compiled; the
//! resulting `Literal` carries the `{pattern, flags}` record.

use jsexpr_ast::{LiteralValue, Node, NodeKind, RegexLiteral};
use jsexpr_diagnostics::{messages, ParseResult};

use crate::context::ParserContext;
use crate::rules::Rule;

/// Configuration of a regex rule.
#[derive(Debug, Clone)]
pub struct RegexConf {
    /// Valid flag characters.
    pub flags: &'static str,
}

impl Default for RegexConf {
    fn default() -> Self {
        Self { flags: "gimuy" }
    }
}

/// Rule parsing one regular expression literal.
pub struct RegexRule {
    conf: RegexConf,
}

impl RegexRule {
    pub fn new(conf: RegexConf) -> Self {
        Self { conf }
    }
}

impl Rule for RegexRule {
    fn pre(&self, ctx: &mut ParserContext<'_>) -> ParseResult<Option<Node>> {
        let start = ctx.cursor.pos();

        if !ctx.cursor.try_consume('/') {
            return Ok(None);
        }

        let mut pattern = String::new();
        let mut bracket = false;
        let mut closed = false;

        while !ctx.cursor.eof() {
            let ch = ctx.cursor.take().unwrap();
            if matches!(ch, '\n' | '\r') {
                return Err(ctx.err(messages::UNTERMINATED_REGEX));
            }
            if ch == '\\' {
                if ctx.cursor.is_newline_at(0) {
                    return Err(ctx.err(messages::UNTERMINATED_REGEX));
                }
                pattern.push(ch);
                match ctx.cursor.take() {
                    Some(escaped) => pattern.push(escaped),
                    None => return Err(ctx.err(messages::UNTERMINATED_REGEX)),
                }
            } else if bracket {
                pattern.push(ch);
                if ch == ']' {
                    bracket = false;
                }
            } else if ch == '/' {
                closed = true;
                break;
            } else {
                pattern.push(ch);
                if ch == '[' {
                    bracket = true;
                }
            }
        }

        if !closed {
            return Err(ctx.err(messages::UNTERMINATED_REGEX));
        }

        let mut flags = String::new();
        while let Some(ch) = ctx.cursor.peek() {
            if !self.conf.flags.contains(ch) {
                break;
            }
            flags.push(ctx.cursor.take().unwrap());
        }

        let raw = ctx.cursor.slice(start, ctx.cursor.pos());
        Ok(Some(Node::new(NodeKind::Literal {
            value: LiteralValue::Regex,
            raw,
            regex: Some(RegexLiteral { pattern, flags }),
        })))
    }
}
