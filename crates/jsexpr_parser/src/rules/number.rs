//! Rule parsing numeric literals in an arbitrary radix.

use jsexpr_ast::{LiteralValue, Node, NodeKind};
use jsexpr_diagnostics::{messages, ParseResult};

use crate::context::ParserContext;
use crate::rules::Rule;

/// Configuration of a number rule.
#[derive(Debug, Clone)]
pub struct NumberConf {
    /// Numeric base, 2..=36.
    pub radix: u32,
    /// Case-insensitive prefix marking the number (`0x`, `0o`, `0b`).
    /// Without a prefix any number starting with a digit matches.
    pub prefix: Option<&'static str>,
    /// Allow a decimal fraction. Base 10 only.
    pub decimal: bool,
    /// Allow exponent notation. Base 10 only.
    pub exp: bool,
}

impl Default for NumberConf {
    fn default() -> Self {
        Self {
            radix: 10,
            prefix: None,
            decimal: true,
            exp: true,
        }
    }
}

/// Rule parsing one numeric literal.
pub struct NumberRule {
    conf: NumberConf,
}

impl NumberRule {
    pub fn new(mut conf: NumberConf) -> Self {
        assert!(
            (2..=36).contains(&conf.radix),
            "number radix out of range: {}",
            conf.radix
        );
        if conf.radix != 10 {
            conf.decimal = false;
            conf.exp = false;
        }
        Self { conf }
    }

    /// Plain base-10 rule with fraction and exponent.
    pub fn decimal() -> Self {
        Self::new(NumberConf::default())
    }

    /// Prefixed rule for another radix (`0x` -> 16).
    pub fn prefixed(prefix: &'static str, radix: u32) -> Self {
        Self::new(NumberConf {
            radix,
            prefix: Some(prefix),
            decimal: false,
            exp: false,
        })
    }

    fn is_digit(&self, ch: Option<char>) -> bool {
        ch.and_then(|c| c.to_digit(self.conf.radix)).is_some()
    }
}

impl Rule for NumberRule {
    fn pre(&self, ctx: &mut ParserContext<'_>) -> ParseResult<Option<Node>> {
        let conf = &self.conf;
        let mut num = String::new();
        let mut prefix = String::new();

        if let Some(expected) = conf.prefix {
            for (i, pch) in expected.chars().enumerate() {
                match ctx.cursor.peek_at(i as isize) {
                    Some(ch) if ch.eq_ignore_ascii_case(&pch) => prefix.push(ch),
                    _ => return Ok(None),
                }
            }
            ctx.cursor.advance(expected.len() as isize);
        }

        while self.is_digit(ctx.cursor.peek()) {
            num.push(ctx.cursor.take().unwrap());
        }

        if conf.decimal && ctx.cursor.peek() == Some('.') {
            // can also start with the decimal marker
            num.push(ctx.cursor.take().unwrap());
            while self.is_digit(ctx.cursor.peek()) {
                num.push(ctx.cursor.take().unwrap());
            }
        }

        if (num.is_empty() || num == ".") && prefix.is_empty() {
            ctx.cursor.advance(-(num.chars().count() as isize));
            return Ok(None);
        }

        if conf.exp && matches!(ctx.cursor.peek(), Some('e') | Some('E')) {
            num.push(ctx.cursor.take().unwrap());
            if matches!(ctx.cursor.peek(), Some('+') | Some('-')) {
                num.push(ctx.cursor.take().unwrap());
            }
            while self.is_digit(ctx.cursor.peek()) {
                num.push(ctx.cursor.take().unwrap());
            }
            if !self.is_digit(ctx.cursor.peek_at(-1)) {
                return Err(ctx.err(messages::EXPONENT_EXPECTED));
            }
        }

        if num.is_empty() {
            return Err(ctx.err(messages::INVALID_NUMBER));
        }
        // a number may not run into an identifier: `123abc`
        if ctx.cursor.is_ident_start(&ctx.config().ident_start) {
            return Err(ctx.err(messages::UNEXPECTED_CHAR));
        }

        let value = if conf.decimal || conf.exp {
            num.parse::<f64>()
                .map_err(|_| ctx.err(messages::INVALID_NUMBER))?
        } else {
            // fold digits in floating point, as the host's parseInt does
            num.chars().fold(0.0f64, |acc, ch| {
                acc * conf.radix as f64 + ch.to_digit(conf.radix).unwrap() as f64
            })
        };

        let raw = format!("{prefix}{num}");
        Ok(Some(Node::new(NodeKind::Literal {
            value: LiteralValue::Number(value),
            raw,
            regex: None,
        })))
    }
}
