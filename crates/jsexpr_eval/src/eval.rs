//! The evaluator trait, lvalue resolution and the call protocol.

use jsexpr_ast::{Node, NodeKind};
use jsexpr_diagnostics::{messages, EvalError, EvalResult};

use crate::pattern;
use crate::scope::ScopeContext;
use crate::value::{
    get_property, set_property, to_js_string, Callable, Value,
};

/// A tree-walking evaluator.
///
/// `eval` is the only entry point: every recursive child evaluation goes
/// back through it (on `&dyn Evaluator`), so wrapping an evaluator
/// intercepts every step. Implementations provide `eval_kind`, the
/// per-node-kind dispatch.
pub trait Evaluator {
    /// Evaluate a node, annotating errors with the node's source range.
    fn eval(&self, node: &Node, ctx: &ScopeContext) -> EvalResult<Value> {
        self.eval_kind(node, ctx)
            .map_err(|e| e.with_range(node.range))
    }

    /// Dispatch on the node kind.
    fn eval_kind(&self, node: &Node, ctx: &ScopeContext) -> EvalResult<Value>;
}

/// The "this kind is not handled by this evaluator" error.
pub fn unsupported(node: &Node) -> EvalError {
    EvalError::new(format!(
        "{}: {}",
        messages::UNSUPPORTED_EXPRESSION,
        node.type_name()
    ))
}

/// A resolved assignment target: a scope binding or an object slot.
pub enum LValue {
    Var(String),
    Prop(Value, String),
}

impl LValue {
    pub fn get(&self, ctx: &ScopeContext) -> EvalResult<Value> {
        match self {
            LValue::Var(name) => Ok(ctx.get(name).unwrap_or(Value::Undefined)),
            LValue::Prop(target, key) => get_property(target, key),
        }
    }

    pub fn set(&self, ctx: &ScopeContext, value: Value) -> EvalResult<()> {
        match self {
            LValue::Var(name) => {
                ctx.set(name, value);
                Ok(())
            }
            LValue::Prop(target, key) => set_property(target, key, value),
        }
    }
}

/// The property name of a non-computed member access.
pub fn member_key(property: &Node) -> EvalResult<String> {
    match &property.kind {
        NodeKind::Identifier { name } => Ok(name.clone()),
        _ => Err(EvalError::new(messages::INVALID_ASSIGNMENT_TARGET)),
    }
}

/// Resolve an assignment/update/delete target. Only identifiers and
/// member expressions are valid.
pub fn resolve_lvalue(
    ev: &dyn Evaluator,
    ctx: &ScopeContext,
    node: &Node,
) -> EvalResult<LValue> {
    match &node.kind {
        NodeKind::Identifier { name } => Ok(LValue::Var(name.clone())),
        NodeKind::MemberExpression {
            object,
            property,
            computed,
            ..
        } => {
            let target = ev.eval(object, ctx)?;
            let key = if *computed {
                to_js_string(&ev.eval(property, ctx)?)
            } else {
                member_key(property)?
            };
            Ok(LValue::Prop(target, key))
        }
        _ => Err(EvalError::new(messages::INVALID_ASSIGNMENT_TARGET)),
    }
}

/// Invoke a callable value.
pub fn call_value(
    ev: &dyn Evaluator,
    func: &Value,
    this: Option<&Value>,
    args: Vec<Value>,
) -> EvalResult<Value> {
    let Value::Function(callable) = func else {
        return Err(EvalError::new(format!(
            "{} {}",
            to_js_string(func),
            messages::NOT_A_FUNCTION
        )));
    };
    match &**callable {
        Callable::Native(native) => (native.call)(this, &args),
        Callable::Arrow {
            params,
            body,
            scope,
        } => {
            // parameters bind into a child of the defining scope, never
            // into the caller's context
            let child = scope.child();
            pattern::bind_parameters(ev, params, args, &child)?;
            ev.eval(body, &child)
        }
    }
}

/// Construct an instance with `new`.
pub fn construct_value(func: &Value, args: Vec<Value>) -> EvalResult<Value> {
    let Value::Function(callable) = func else {
        return Err(EvalError::new(format!(
            "{} {}",
            to_js_string(func),
            messages::NOT_A_FUNCTION
        )));
    };
    match &**callable {
        Callable::Native(native) => match &native.construct {
            Some(construct) => construct(&args),
            None => Err(EvalError::new(format!(
                "{} {}",
                native.name,
                messages::NOT_A_CONSTRUCTOR
            ))),
        },
        Callable::Arrow { .. } => Err(EvalError::new(format!(
            "arrow function {}",
            messages::NOT_A_CONSTRUCTOR
        ))),
    }
}
