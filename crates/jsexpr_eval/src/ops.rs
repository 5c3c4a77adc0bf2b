//! Operator callbacks.
//!
//! The operand values are already evaluated when these run; logical
//! operators and the conditional never reach this module because they
//! must short-circuit before their right side is evaluated.

use jsexpr_diagnostics::{EvalError, EvalResult};

use crate::value::{
    has_property, js_add, js_compare, loose_eq, strict_eq, to_int32, to_js_string,
    to_number, to_uint32, Callable, Value,
};

/// Apply a (non-logical) binary operator.
pub fn binary_op(op: &str, a: &Value, b: &Value) -> EvalResult<Value> {
    let result = match op {
        "|" => Value::Number((to_int32(a) | to_int32(b)) as f64),
        "^" => Value::Number((to_int32(a) ^ to_int32(b)) as f64),
        "&" => Value::Number((to_int32(a) & to_int32(b)) as f64),
        "==" => Value::Bool(loose_eq(a, b)),
        "!=" => Value::Bool(!loose_eq(a, b)),
        "===" => Value::Bool(strict_eq(a, b)),
        "!==" => Value::Bool(!strict_eq(a, b)),
        "<" => Value::Bool(matches!(js_compare(a, b), Some(std::cmp::Ordering::Less))),
        ">" => Value::Bool(matches!(
            js_compare(a, b),
            Some(std::cmp::Ordering::Greater)
        )),
        "<=" => Value::Bool(matches!(
            js_compare(a, b),
            Some(std::cmp::Ordering::Less | std::cmp::Ordering::Equal)
        )),
        ">=" => Value::Bool(matches!(
            js_compare(a, b),
            Some(std::cmp::Ordering::Greater | std::cmp::Ordering::Equal)
        )),
        "instanceof" => Value::Bool(instance_of(a, b)?),
        "in" => Value::Bool(has_property(b, &to_js_string(a))?),
        "<<" => Value::Number((to_int32(a).wrapping_shl(to_uint32(b) & 31)) as f64),
        ">>" => Value::Number((to_int32(a).wrapping_shr(to_uint32(b) & 31)) as f64),
        ">>>" => Value::Number((to_uint32(a).wrapping_shr(to_uint32(b) & 31)) as f64),
        "+" => js_add(a, b),
        "-" => Value::Number(to_number(a) - to_number(b)),
        "*" => Value::Number(to_number(a) * to_number(b)),
        "/" => Value::Number(to_number(a) / to_number(b)),
        "%" => Value::Number(to_number(a) % to_number(b)),
        "**" => Value::Number(to_number(a).powf(to_number(b))),
        _ => {
            return Err(EvalError::new(format!(
                "Unsupported binary operator: {op}"
            )))
        }
    };
    Ok(result)
}

fn instance_of(a: &Value, b: &Value) -> EvalResult<bool> {
    let Value::Function(callable) = b else {
        return Err(EvalError::new(
            "Right-hand side of 'instanceof' is not callable",
        ));
    };
    match &**callable {
        Callable::Native(f) => match &f.is_instance {
            Some(check) => Ok(check(a)),
            None => Err(EvalError::new(format!(
                "Function {} does not support 'instanceof'",
                f.name
            ))),
        },
        Callable::Arrow { .. } => Err(EvalError::new(
            "Right-hand side of 'instanceof' is not a constructor",
        )),
    }
}

/// Apply a prefix unary operator (`delete` is handled by the evaluator,
/// it needs the unevaluated operand).
pub fn unary_op(op: &str, a: &Value) -> EvalResult<Value> {
    let result = match op {
        "-" => Value::Number(-to_number(a)),
        "+" => Value::Number(to_number(a)),
        "!" => Value::Bool(!a.is_truthy()),
        "~" => Value::Number(!to_int32(a) as f64),
        "typeof" => Value::Str(a.type_of().to_string()),
        "void" => Value::Undefined,
        _ => {
            return Err(EvalError::new(format!(
                "Unsupported unary operator: {op}"
            )))
        }
    };
    Ok(result)
}

/// The binary operator underlying a compound assignment (`+=` -> `+`).
pub fn compound_of(assign_op: &str) -> Option<&str> {
    assign_op.strip_suffix('=').filter(|base| {
        !base.is_empty() && !matches!(*base, "=" | "!" | "<" | ">" | "==" | "!=")
    })
}

/// Apply an assignment operator to the old value.
pub fn assign_op(op: &str, old: Option<&Value>, rhs: &Value) -> EvalResult<Value> {
    match compound_of(op) {
        None => Ok(rhs.clone()),
        Some(base) => {
            let old = old.cloned().unwrap_or(Value::Undefined);
            binary_op(base, &old, rhs)
        }
    }
}

/// `++`/`--` on the numeric old value.
pub fn update_op(op: &str, old: &Value) -> EvalResult<(f64, f64)> {
    let old = to_number(old);
    let new = match op {
        "++" => old + 1.0,
        "--" => old - 1.0,
        _ => {
            return Err(EvalError::new(format!(
                "Unsupported update operator: {op}"
            )))
        }
    };
    Ok((old, new))
}
