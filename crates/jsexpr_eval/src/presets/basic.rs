//! Evaluator for the minimal (jsep-style) dialect.
//!
//! Operators, member/index access, calls, short-circuiting conditional
//! and logical forms, and compound/sequence results. No assignment, no
//! object literals, no `new`, no templates; those node kinds report an
//! unsupported-expression error.

use jsexpr_ast::{Node, NodeKind};
use jsexpr_diagnostics::EvalResult;

use crate::eval::{unsupported, Evaluator};
use crate::exec;
use crate::scope::ScopeContext;
use crate::value::Value;

/// Basic-level dispatch over the *active* evaluator. Decorating
/// evaluators call this with themselves to keep intercepting every
/// recursive step.
pub fn basic_dispatch(
    ev: &dyn Evaluator,
    node: &Node,
    ctx: &ScopeContext,
) -> EvalResult<Value> {
    match &node.kind {
        NodeKind::Literal { value, .. } => Ok(exec::literal(value)),
        NodeKind::Identifier { name } => Ok(exec::identifier(ctx, name)),
        NodeKind::ThisExpression => Ok(exec::this_expression(ctx)),
        NodeKind::ArrayExpression { elements } => {
            exec::array_expression(ev, ctx, elements)
        }
        NodeKind::MemberExpression {
            object,
            property,
            computed,
            optional,
            short_circuited,
        } => exec::member(
            ev,
            ctx,
            object,
            property,
            *computed,
            optional.unwrap_or(false),
            short_circuited.unwrap_or(false),
        ),
        NodeKind::CallExpression {
            callee,
            arguments,
            optional,
            ..
        } => exec::call(ev, ctx, callee, arguments, optional.unwrap_or(false)),
        NodeKind::ConditionalExpression {
            test,
            consequent,
            alternate,
        } => exec::conditional(ev, ctx, test, consequent, alternate),
        NodeKind::LogicalExpression {
            operator,
            left,
            right,
        } => exec::logical(ev, ctx, operator, left, right),
        NodeKind::BinaryExpression {
            operator,
            left,
            right,
        } => exec::binary(ev, ctx, operator, left, right),
        NodeKind::UnaryExpression { operator, argument } => {
            exec::unary(ev, ctx, operator, argument)
        }
        NodeKind::SequenceExpression { expressions } => {
            exec::sequence(ev, ctx, expressions)
        }
        NodeKind::ExpressionStatement { expression, .. } => ev.eval(expression, ctx),
        NodeKind::Program { body } | NodeKind::Compound { body } => {
            exec::sequence(ev, ctx, body)
        }
        _ => Err(unsupported(node)),
    }
}

/// Evaluator covering the basic dialect.
#[derive(Debug, Default)]
pub struct BasicEval;

impl BasicEval {
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for BasicEval {
    fn eval_kind(&self, node: &Node, ctx: &ScopeContext) -> EvalResult<Value> {
        basic_dispatch(self, node, ctx)
    }
}
