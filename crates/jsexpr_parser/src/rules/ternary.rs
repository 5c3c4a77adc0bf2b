//! Rule for expressions with three operands (`test ? consequent :
//! alternate`).
//!
//! The two operator characters are matched directly (they are not part of
//! the operator registry), so `?` never collides with `?.`: the
//! optional-chain operator is consumed at a deeper precedence level
//! before the ternary's post hook runs.

use jsexpr_ast::Node;
use jsexpr_diagnostics::ParseResult;

use crate::context::{Jump, ParserContext};
use crate::rules::{Rule, TernaryBuild};

/// Configuration of a ternary rule.
#[derive(Debug, Clone)]
pub struct TernaryConf {
    /// Operator between the first and middle operand.
    pub first_op: char,
    /// Operator between the middle and last operand.
    pub second_op: char,
    /// Branch used to parse the middle and last operands; `None`
    /// re-enters the current level.
    pub sub_rules: Option<&'static str>,
    pub build: TernaryBuild,
}

impl TernaryConf {
    pub fn conditional(sub_rules: Option<&'static str>, build: TernaryBuild) -> Self {
        Self {
            first_op: '?',
            second_op: ':',
            sub_rules,
            build,
        }
    }
}

/// Rule parsing a ternary operator.
pub struct TernaryOperatorRule {
    conf: TernaryConf,
}

impl TernaryOperatorRule {
    pub fn new(conf: TernaryConf) -> Self {
        Self { conf }
    }
}

impl Rule for TernaryOperatorRule {
    fn post(&self, ctx: &mut ParserContext<'_>, bubbled: Node) -> ParseResult<Node> {
        ctx.cursor.skip_spaces();
        if !ctx.cursor.try_consume(self.conf.first_op) {
            return Ok(bubbled);
        }

        let jump = match self.conf.sub_rules {
            Some(label) => Jump::Label(label),
            None => Jump::Same,
        };

        let consequent = ctx.parse_next(jump)?;
        ctx.cursor.skip_spaces();
        if !ctx.cursor.try_consume(self.conf.second_op) {
            return Err(ctx.err(format!(
                "Operator {} expected",
                self.conf.second_op
            )));
        }
        let alternate = ctx.parse_next(jump)?;

        Ok((self.conf.build)(bubbled, consequent, alternate))
    }
}
