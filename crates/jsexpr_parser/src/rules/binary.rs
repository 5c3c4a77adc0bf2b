//! Rule for expressions with two operands or sides.
//!
//! Covers plain binary/logical/assignment operators, and closed forms
//! where the right side is bracketed after the operator: computed member
//! access (`obj[mem]`), call argument lists (`f(a, b)`), tagged templates.
//! Closed forms may allow empty and multiple right operands and may parse
//! them with a different branch of the grammar.

use jsexpr_ast::Node;
use jsexpr_diagnostics::{messages, ParseResult};
use rustc_hash::FxHashMap;

use crate::context::{Jump, ParserContext};
use crate::rules::{BinaryBuild, MultiConf, Operand, Rule};

/// Configuration of a single binary operator.
#[derive(Debug, Clone)]
pub struct BinaryConf {
    /// Node construction from `(operator, left, right)`.
    pub build: BinaryBuild,
    /// The operator token requires trailing whitespace (`a instanceof b`).
    pub space: bool,
    /// Branch used to parse the right operand(s); `None` continues with
    /// the next level (or the same level when `rasoc` is set).
    pub sub_rules: Option<&'static str>,
    /// Right-associative: stop extending after one application.
    pub rasoc: bool,
    /// Restriction on the left operand's node kind.
    pub ltypes: Option<fn(&Node) -> bool>,
    /// Closing character of a closed form (`]`, `)`).
    pub close: Option<char>,
    /// Allow an empty right side. Only meaningful for closed forms.
    pub empty: bool,
    /// List policy of the right side. Only closed forms may use
    /// separators.
    pub multi: MultiConf,
}

impl BinaryConf {
    pub fn new(build: BinaryBuild) -> Self {
        Self {
            build,
            space: false,
            sub_rules: None,
            rasoc: false,
            ltypes: None,
            close: None,
            empty: false,
            multi: MultiConf::default(),
        }
    }
}

/// Rule holding all binary operators of one precedence level.
pub struct BinaryOperatorRule {
    config: FxHashMap<String, BinaryConf>,
    /// When set, the operator is mandatory: `post` fails instead of
    /// passing the bubbled node through. Used by branches entered
    /// speculatively (arrow `=>`, destructuring `=`, parenthesized
    /// `**`/optional-chain re-entry).
    must: bool,
}

impl BinaryOperatorRule {
    pub fn new(ops: Vec<(&str, BinaryConf)>) -> Self {
        Self::build_rule(ops, false)
    }

    /// A rule whose operator must be present after the left operand.
    pub fn must(ops: Vec<(&str, BinaryConf)>) -> Self {
        Self::build_rule(ops, true)
    }

    fn build_rule(ops: Vec<(&str, BinaryConf)>, must: bool) -> Self {
        let mut config = FxHashMap::default();
        for (op, mut conf) in ops {
            if conf.close.is_none() {
                conf.empty = false;
                conf.multi.separators = "";
            }
            config.insert(op.to_string(), conf);
        }
        Self { config, must }
    }
}

impl Rule for BinaryOperatorRule {
    fn register(&self) -> Vec<(String, bool)> {
        self.config
            .iter()
            .map(|(op, conf)| (op.clone(), conf.space))
            .collect()
    }

    fn post(&self, ctx: &mut ParserContext<'_>, bubbled: Node) -> ParseResult<Node> {
        let mut bubbled = bubbled;
        let mut op = ctx.take_operator(|o| self.config.contains_key(o));
        if op.is_none() && self.must {
            return Err(ctx.err("Operator expected"));
        }

        while let Some(current) = op {
            let conf = &self.config[&current];

            if let Some(accepts) = conf.ltypes {
                if !accepts(&bubbled) {
                    return Err(ctx.err(messages::INVALID_LEFT_SIDE));
                }
            }

            let jump = match (conf.sub_rules, conf.rasoc) {
                (Some(label), _) => Jump::Label(label),
                (None, true) => Jump::Same,
                (None, false) => Jump::Next,
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

            let right = if !conf.multi.separators.is_empty() {
                Operand::List(nodes)
            } else {
                match nodes.into_iter().next().flatten() {
                    Some(node) => Operand::Single(node),
                    None => Operand::List(Vec::new()),
                }
            };

            bubbled =
                (conf.build)(&current, bubbled, right).map_err(|msg| ctx.err(msg))?;

            op = if conf.rasoc {
                None
            } else {
                ctx.take_operator(|o| self.config.contains_key(o))
            };
        }

        Ok(bubbled)
    }
}
