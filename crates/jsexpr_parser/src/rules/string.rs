//! Rule parsing string literals and template literals.
//!
//! One rule serves three shapes, chosen by configuration:
//! quoted string literals (`'a'`, `"a"`), template literals (`` `a${b}` ``,
//! when `template_rules` names the branch for the interpolated
//! expressions), and template *continuations* (`unquoted` +
//! `template_rules`): the resume mode used after a tagged template's
//! opening backtick was consumed as an operator token.

use jsexpr_ast::{LiteralValue, Node, NodeKind};
use jsexpr_diagnostics::{messages, ParseResult};
use jsexpr_scanner::HexDigits;

use crate::context::{Jump, ParserContext};
use crate::rules::Rule;

/// Configuration of a string rule.
#[derive(Debug, Clone)]
pub struct StringConf {
    /// Allow line continuations (escaped CR/LF) and reject raw line
    /// terminators in non-template strings. Always on inside templates.
    pub lt: bool,
    /// Decode `\xXX` and `\uXXXX` escapes.
    pub hex: bool,
    /// Decode `\u{...}` code point escapes.
    pub cp: bool,
    /// Keep the pure source slice as `raw`; otherwise `raw` is the cooked
    /// string re-quoted.
    pub raw: bool,
    /// No opening quote is expected. Together with `template_rules` this
    /// resumes inside a template whose backtick was already consumed.
    pub unquoted: bool,
    /// Branch parsing `${...}` expressions; `None` disables templates.
    pub template_rules: Option<&'static str>,
}

impl Default for StringConf {
    fn default() -> Self {
        Self {
            lt: true,
            hex: true,
            cp: false,
            raw: true,
            unquoted: false,
            template_rules: None,
        }
    }
}

/// Rule parsing one string or template literal.
pub struct StringRule {
    conf: StringConf,
}

impl StringRule {
    pub fn new(conf: StringConf) -> Self {
        Self { conf }
    }
}

impl StringRule {
    fn template_element(
        ctx: &ParserContext<'_>,
        cooked: &str,
        start: usize,
        end: usize,
        tail: bool,
    ) -> Node {
        Node::new(NodeKind::TemplateElement {
            cooked: cooked.to_string(),
            raw: ctx.cursor.slice(start, end),
            tail,
        })
    }
}

impl Rule for StringRule {
    fn pre(&self, ctx: &mut ParserContext<'_>) -> ParseResult<Option<Node>> {
        let conf = &self.conf;
        let outer_start = ctx.cursor.pos();
        let mut start = outer_start;
        let mut cooked = String::new();
        let mut quote: Option<char> = None;
        let mut is_template = false;
        let mut lt_allowed = conf.lt;
        let mut closed = false;
        let mut quasis: Vec<Node> = Vec::new();
        let mut expressions: Vec<Node> = Vec::new();

        if !conf.unquoted {
            match ctx.cursor.peek() {
                Some('`') if conf.template_rules.is_some() => {
                    is_template = true;
                    lt_allowed = true;
                    quote = ctx.cursor.take();
                    start = ctx.cursor.pos();
                }
                Some(ch @ ('"' | '\'')) => {
                    ctx.cursor.take();
                    quote = Some(ch);
                }
                _ => return Ok(None),
            }
        } else if conf.template_rules.is_some() {
            // continuation: the opening backtick was consumed upstream
            is_template = true;
            lt_allowed = true;
            quote = Some('`');
        }

        while !ctx.cursor.eof() {
            let ch = ctx.cursor.take().unwrap();

            if quote == Some(ch) {
                closed = true;
                if is_template {
                    let end = ctx.cursor.pos() - 1;
                    quasis.push(Self::template_element(ctx, &cooked, start, end, true));
                }
                break;
            } else if is_template && ch == '$' && ctx.cursor.try_consume('{') {
                let end = ctx.cursor.pos() - 2;
                quasis.push(Self::template_element(ctx, &cooked, start, end, false));
                cooked.clear();

                let template_rules = conf.template_rules.unwrap();
                expressions.push(ctx.parse_next(Jump::Label(template_rules))?);
                ctx.cursor.skip_spaces();
                if !ctx.cursor.try_consume('}') {
                    return Err(ctx.err(messages::CLOSING_CHAR_EXPECTED));
                }
                start = ctx.cursor.pos();
            } else if ch == '\\' {
                if lt_allowed && ctx.cursor.is_newline_at(0) {
                    // line continuation
                    let cont = ctx.cursor.take();
                    if cont == Some('\r') {
                        ctx.cursor.try_consume('\n');
                    }
                } else {
                    let Some(esc) = ctx.cursor.take() else {
                        break;
                    };
                    match esc {
                        'n' => cooked.push('\n'),
                        'r' => cooked.push('\r'),
                        't' => cooked.push('\t'),
                        'b' => cooked.push('\u{8}'),
                        'f' => cooked.push('\u{c}'),
                        'v' => cooked.push('\u{b}'),
                        'u' | 'x' => {
                            if conf.hex {
                                let decoded = if esc == 'u'
                                    && conf.cp
                                    && ctx.cursor.try_consume('{')
                                {
                                    let cp = ctx.cursor.take_hex(HexDigits::Unbounded);
                                    if cp.is_none() || !ctx.cursor.try_consume('}') {
                                        None
                                    } else {
                                        cp
                                    }
                                } else {
                                    let count = if esc == 'u' { 4 } else { 2 };
                                    ctx.cursor.take_hex(HexDigits::Exactly(count))
                                };
                                match decoded {
                                    Some(ch) => cooked.push(ch),
                                    None => {
                                        return Err(
                                            ctx.err(messages::INVALID_HEX_ESCAPE)
                                        )
                                    }
                                }
                            } else {
                                cooked.push(esc);
                            }
                        }
                        other => cooked.push(other),
                    }
                }
            } else if lt_allowed && matches!(ch, '\n' | '\r') {
                if !is_template {
                    return Err(ctx.err(messages::INVALID_LINE_TERMINATOR));
                }
                if ch == '\r' {
                    ctx.cursor.try_consume('\n');
                }
                cooked.push('\n');
            } else {
                cooked.push(ch);
            }
        }

        if !closed && !conf.unquoted {
            return Err(ctx.err(messages::UNCLOSED_QUOTE));
        }

        if is_template {
            if !closed {
                return Err(ctx.err(messages::UNCLOSED_QUOTE));
            }
            return Ok(Some(Node::new(NodeKind::TemplateLiteral {
                quasis,
                expressions,
            })));
        }

        let raw = if conf.raw {
            ctx.cursor.slice(outer_start, ctx.cursor.pos())
        } else {
            let q = quote.unwrap_or('"');
            format!("{q}{cooked}{q}")
        };
        Ok(Some(Node::new(NodeKind::Literal {
            value: LiteralValue::Str(cooked),
            raw,
            regex: None,
        })))
    }
}
