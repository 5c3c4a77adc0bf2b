//! Evaluator for the ES5 dialect.
//!
//! Everything the basic evaluator covers, plus assignment (including
//! destructuring distribution), update operators, `delete`, `new`,
//! object literals (computed keys, spread, duplicate-key detection) and
//! template literals.

use jsexpr_ast::{Node, NodeKind};
use jsexpr_diagnostics::EvalResult;

use crate::eval::{unsupported, Evaluator};
use crate::exec;
use crate::scope::ScopeContext;
use crate::value::Value;

/// ES5-level dispatch over the *active* evaluator, so a layering preset
/// (or a decorator) keeps receiving every recursive step.
pub fn es5_dispatch(
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
        NodeKind::ObjectExpression { properties } => {
            exec::object_expression(ev, ctx, properties)
        }
        NodeKind::TemplateLiteral {
            quasis,
            expressions,
        } => exec::template_literal(ev, ctx, quasis, expressions),
        NodeKind::TaggedTemplateExpression {
            tag,
            quasi,
            optional,
            ..
        } => exec::tagged_template(ev, ctx, tag, quasi, optional.unwrap_or(false)),
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
        NodeKind::NewExpression { callee, arguments } => {
            exec::new_expression(ev, ctx, callee, arguments)
        }
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
            if operator == "delete" {
                exec::delete_expression(ev, ctx, argument)
            } else {
                exec::unary(ev, ctx, operator, argument)
            }
        }
        NodeKind::UpdateExpression {
            operator,
            argument,
            prefix,
        } => exec::update(ev, ctx, operator, argument, *prefix),
        NodeKind::AssignmentExpression {
            operator,
            left,
            right,
        } => exec::assignment(ev, ctx, operator, left, right),
        NodeKind::SequenceExpression { expressions } => {
            exec::sequence(ev, ctx, expressions)
        }
        NodeKind::ExpressionStatement { expression, .. } => ev.eval(expression, ctx),
        NodeKind::Program { body } | NodeKind::Compound { body } => {
            exec::sequence(ev, ctx, body)
        }
        NodeKind::EmptyStatement => Ok(Value::Undefined),
        _ => Err(unsupported(node)),
    }
}

/// Evaluator covering the ES5 dialect.
#[derive(Debug, Default)]
pub struct ES5Eval;

impl ES5Eval {
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for ES5Eval {
    fn eval_kind(&self, node: &Node, ctx: &ScopeContext) -> EvalResult<Value> {
        es5_dispatch(self, node, ctx)
    }
}
