//! Rule for expressions with one operand.
//!
//! Open prefix operators (`typeof a`, `-x`, `++i`), open postfix
//! operators (`i++`, with no line terminator allowed before the
//! operator), and closed groupings whose operator is an opening bracket:
//! parenthesized expressions, array/object literals, parameter lists.

use jsexpr_ast::Node;
use jsexpr_diagnostics::{messages, ParseResult};
use rustc_hash::FxHashMap;

use crate::context::{Jump, ParserContext};
use crate::rules::{MultiConf, Operand, Rule, UnaryBuild};

/// Configuration of a single unary operator.
#[derive(Debug, Clone)]
pub struct UnaryConf {
    /// Node construction from `(operator, argument)`. Groupings pass the
    /// inner node through unchanged.
    pub build: UnaryBuild,
    /// Prefix operator. Closed operators are always prefix.
    pub is_pre: bool,
    /// The operator token requires trailing whitespace (`typeof a`).
    pub space: bool,
    /// Closing character of a closed form.
    pub close: Option<char>,
    /// Allow an empty inner expression. Only meaningful for closed forms.
    pub empty: bool,
    /// Branch used to parse the operand(s); `None` re-enters the current
    /// level (prefix chains like `- - x`).
    pub sub_rules: Option<&'static str>,
    /// List policy of a closed form; `types` also restricts the operand
    /// of open postfix operators.
    pub multi: MultiConf,
}

impl UnaryConf {
    pub fn new(build: UnaryBuild) -> Self {
        Self {
            build,
            is_pre: false,
            space: false,
            close: None,
            empty: false,
            sub_rules: None,
            multi: MultiConf::default(),
        }
    }
}

/// Rule holding all unary operators of one precedence level.
pub struct UnaryOperatorRule {
    config: FxHashMap<String, UnaryConf>,
}

impl UnaryOperatorRule {
    pub fn new(ops: Vec<(&str, UnaryConf)>) -> Self {
        let mut config = FxHashMap::default();
        for (op, mut conf) in ops {
            if conf.close.is_some() {
                conf.is_pre = true;
            } else {
                conf.multi.separators = "";
                conf.empty = false;
            }
            config.insert(op.to_string(), conf);
        }
        Self { config }
    }
}

impl Rule for UnaryOperatorRule {
    fn register(&self) -> Vec<(String, bool)> {
        self.config
            .iter()
            .map(|(op, conf)| (op.clone(), conf.space))
            .collect()
    }

    fn pre(&self, ctx: &mut ParserContext<'_>) -> ParseResult<Option<Node>> {
        let Some(op) =
            ctx.take_operator(|o| self.config.get(o).is_some_and(|c| c.is_pre))
        else {
            return Ok(None);
        };
        let conf = &self.config[&op];

        let jump = match conf.sub_rules {
            Some(label) => Jump::Label(label),
            None => Jump::Same,
        };
        let (nodes, _) = ctx.parse_multi(&conf.multi, jump)?;

        if nodes.is_empty() && !conf.empty {
            return Err(ctx.err(messages::EXPRESSION_EXPECTED));
        }
        if let Some(close) = conf.close {
            if !ctx.cursor.try_consume(close) {
                return Err(ctx.err(messages::CLOSING_CHAR_EXPECTED));
            }
        }

        let argument = if !conf.multi.separators.is_empty()
            || nodes.is_empty()
            || nodes[0].is_none()
        {
            Operand::List(nodes)
        } else {
            Operand::Single(nodes.into_iter().next().flatten().unwrap())
        };

        let node = (conf.build)(&op, argument).map_err(|msg| ctx.err(msg))?;
        Ok(Some(node))
    }

    fn post(&self, ctx: &mut ParserContext<'_>, bubbled: Node) -> ParseResult<Node> {
        // simple postfix operator; no line terminator allowed between
        // operand and operator
        if ctx.cursor.saw_newline() {
            return Ok(bubbled);
        }
        let Some(op) =
            ctx.take_operator(|o| self.config.get(o).is_some_and(|c| !c.is_pre))
        else {
            return Ok(bubbled);
        };
        let conf = &self.config[&op];

        if let Some(accepts) = conf.multi.types {
            if !accepts(&bubbled) {
                return Err(ctx.err(format!(
                    "Invalid argument type: {}",
                    bubbled.type_name()
                )));
            }
        }

        let node =
            (conf.build)(&op, Operand::Single(bubbled)).map_err(|msg| ctx.err(msg))?;
        Ok(node)
    }
}
