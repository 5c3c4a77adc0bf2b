//! Destructuring assignment.
//!
//! Distributes an already-evaluated right-hand-side value into an
//! assignment target: identifier, member expression, or nested
//! array/object pattern with defaults and rest. Default expressions
//! evaluate only when the incoming value is `undefined`; object rest
//! collects the own keys not yet destructured; array rest the remaining
//! elements by index.

use std::collections::HashSet;

use jsexpr_ast::{Node, NodeKind};
use jsexpr_diagnostics::{messages, EvalError, EvalResult};

use crate::eval::{resolve_lvalue, Evaluator};
use crate::exec::literal_key;
use crate::ops;
use crate::scope::ScopeContext;
use crate::value::{get_property, to_js_string, ObjectMap, Value};

/// Assign `value` into `target` under the assignment operator `op`.
/// Returns the expression result (the right-hand-side value for
/// patterns, the stored value for leaf targets).
pub fn assign_pattern(
    ev: &dyn Evaluator,
    target: &Node,
    op: &str,
    value: Value,
    ctx: &ScopeContext,
) -> EvalResult<Value> {
    match &target.kind {
        NodeKind::ArrayPattern { elements } => {
            if ops::compound_of(op).is_some() {
                return Err(EvalError::new(messages::INVALID_ASSIGNMENT_TARGET));
            }
            let Value::Array(items) = &value else {
                return Err(EvalError::new(
                    "Cannot destructure a non-array value with an array pattern",
                ));
            };
            for (i, element) in elements.iter().enumerate() {
                let Some(element) = element else { continue };
                if let NodeKind::RestElement { argument } = &element.kind {
                    let rest: Vec<Value> =
                        items.borrow().get(i..).unwrap_or(&[]).to_vec();
                    assign_pattern(ev, argument, op, Value::array(rest), ctx)?;
                } else {
                    let item = items.borrow().get(i).cloned().unwrap_or(Value::Undefined);
                    assign_pattern(ev, element, op, item, ctx)?;
                }
            }
            Ok(value)
        }

        NodeKind::ObjectPattern { properties } => {
            if ops::compound_of(op).is_some() {
                return Err(EvalError::new(messages::INVALID_ASSIGNMENT_TARGET));
            }
            if value.is_nullish() {
                return Err(EvalError::new(format!(
                    "Cannot destructure {}",
                    to_js_string(&value)
                )));
            }
            let mut visited: HashSet<String> = HashSet::new();
            for property in properties {
                match &property.kind {
                    NodeKind::RestElement { argument } => {
                        let rest: ObjectMap = match &value {
                            Value::Object(map) => map
                                .borrow()
                                .iter()
                                .filter(|(key, _)| !visited.contains(*key))
                                .map(|(key, val)| (key.clone(), val.clone()))
                                .collect(),
                            _ => ObjectMap::new(),
                        };
                        assign_pattern(ev, argument, op, Value::object(rest), ctx)?;
                    }
                    NodeKind::Property {
                        key,
                        value: prop_target,
                        computed,
                        ..
                    } => {
                        let key_str = if *computed {
                            to_js_string(&ev.eval(key, ctx)?)
                        } else {
                            literal_key(key)?
                        };
                        visited.insert(key_str.clone());
                        let item = get_property(&value, &key_str)?;
                        assign_pattern(ev, prop_target, op, item, ctx)?;
                    }
                    _ => {
                        return Err(EvalError::new(
                            "Invalid destructuring property",
                        ))
                    }
                }
            }
            Ok(value)
        }

        NodeKind::AssignmentPattern { left, right } => {
            // the default only evaluates when the source slot is undefined
            let value = if matches!(value, Value::Undefined) {
                ev.eval(right, ctx)?
            } else {
                value
            };
            assign_pattern(ev, left, op, value, ctx)
        }

        _ => {
            let lvalue = resolve_lvalue(ev, ctx, target)?;
            let result = match ops::compound_of(op) {
                None => value,
                Some(base) => {
                    let old = lvalue.get(ctx)?;
                    ops::binary_op(base, &old, &value)?
                }
            };
            lvalue.set(ctx, result.clone())?;
            Ok(result)
        }
    }
}

/// Bind call arguments to arrow-function parameters inside the child
/// scope, with the same default/rest/pattern logic as assignment.
pub fn bind_parameters(
    ev: &dyn Evaluator,
    params: &[Node],
    args: Vec<Value>,
    ctx: &ScopeContext,
) -> EvalResult<()> {
    for (i, param) in params.iter().enumerate() {
        if let NodeKind::RestElement { argument } = &param.kind {
            let rest: Vec<Value> = args.get(i..).unwrap_or(&[]).to_vec();
            assign_pattern(ev, argument, "=", Value::array(rest), ctx)?;
            break;
        }
        let value = args.get(i).cloned().unwrap_or(Value::Undefined);
        assign_pattern(ev, param, "=", value, ctx)?;
    }
    Ok(())
}
