//! Per-node-kind evaluation, shared by the evaluator presets.
//!
//! Every function takes the active evaluator as `&dyn Evaluator` and
//! routes child evaluation back through it. Operands evaluate left to
//! right; the short-circuiting forms (logical, conditional, optional
//! chains) never touch the untaken side.

use std::collections::HashSet;

use jsexpr_ast::{LiteralValue, Node, NodeKind};
use jsexpr_diagnostics::{messages, EvalError, EvalResult};

use crate::eval::{
    call_value, construct_value, member_key, resolve_lvalue, Evaluator,
};
use crate::ops;
use crate::pattern;
use crate::scope::ScopeContext;
use crate::value::{
    get_property, number_to_string, to_js_string, Callable, ObjectMap, Value,
};

pub fn literal(value: &LiteralValue) -> Value {
    match value {
        LiteralValue::Null => Value::Null,
        LiteralValue::Bool(b) => Value::Bool(*b),
        LiteralValue::Number(n) => Value::Number(*n),
        LiteralValue::Str(s) => Value::Str(s.clone()),
        // regex literals evaluate to an opaque object
        LiteralValue::Regex => Value::object(ObjectMap::new()),
    }
}

pub fn identifier(ctx: &ScopeContext, name: &str) -> Value {
    ctx.get(name).unwrap_or(Value::Undefined)
}

pub fn this_expression(ctx: &ScopeContext) -> Value {
    ctx.this_value()
}

fn spread_into(out: &mut Vec<Value>, value: &Value) -> EvalResult<()> {
    match value {
        Value::Array(items) => {
            out.extend(items.borrow().iter().cloned());
            Ok(())
        }
        Value::Str(s) => {
            out.extend(s.chars().map(|ch| Value::Str(ch.to_string())));
            Ok(())
        }
        _ => Err(EvalError::new(format!(
            "{}: {}",
            messages::SPREAD_NON_ITERABLE,
            to_js_string(value)
        ))),
    }
}

pub fn array_expression(
    ev: &dyn Evaluator,
    ctx: &ScopeContext,
    elements: &[Option<Node>],
) -> EvalResult<Value> {
    let mut out = Vec::with_capacity(elements.len());
    for element in elements {
        match element {
            None => out.push(Value::Undefined),
            Some(node) => match &node.kind {
                NodeKind::SpreadElement { argument } => {
                    let value = ev.eval(argument, ctx)?;
                    spread_into(&mut out, &value)?;
                }
                _ => out.push(ev.eval(node, ctx)?),
            },
        }
    }
    Ok(Value::array(out))
}

/// The property name of a non-computed key (identifier, string or
/// number literal).
pub fn literal_key(key: &Node) -> EvalResult<String> {
    match &key.kind {
        NodeKind::Identifier { name } => Ok(name.clone()),
        NodeKind::Literal { value, .. } => Ok(match value {
            LiteralValue::Str(s) => s.clone(),
            LiteralValue::Number(n) => number_to_string(*n),
            LiteralValue::Bool(b) => b.to_string(),
            LiteralValue::Null => "null".to_string(),
            LiteralValue::Regex => return Err(EvalError::new("Invalid property key")),
        }),
        _ => Err(EvalError::new("Invalid property key")),
    }
}

pub fn object_expression(
    ev: &dyn Evaluator,
    ctx: &ScopeContext,
    properties: &[Node],
) -> EvalResult<Value> {
    let mut map = ObjectMap::new();
    let mut seen: HashSet<String> = HashSet::new();

    for prop in properties {
        match &prop.kind {
            NodeKind::SpreadElement { argument } => {
                let value = ev.eval(argument, ctx)?;
                match &value {
                    Value::Object(source) => {
                        for (key, val) in source.borrow().iter() {
                            map.insert(key.clone(), val.clone());
                        }
                    }
                    Value::Array(items) => {
                        for (i, val) in items.borrow().iter().enumerate() {
                            map.insert(i.to_string(), val.clone());
                        }
                    }
                    Value::Str(s) => {
                        for (i, ch) in s.chars().enumerate() {
                            map.insert(i.to_string(), Value::Str(ch.to_string()));
                        }
                    }
                    // primitives contribute no own enumerable properties
                    _ => {}
                }
            }
            NodeKind::Property {
                key,
                value,
                computed,
                ..
            } => {
                let key_str = if *computed {
                    to_js_string(&ev.eval(key, ctx)?)
                } else {
                    let key_str = literal_key(key)?;
                    if !seen.insert(key_str.clone()) {
                        return Err(EvalError::new(format!(
                            "{}: '{key_str}'",
                            messages::DUPLICATE_PROPERTY
                        )));
                    }
                    key_str
                };
                let val = ev.eval(value, ctx)?;
                map.insert(key_str, val);
            }
            _ => return Err(EvalError::new("Invalid property")),
        }
    }
    Ok(Value::object(map))
}

fn quasi_cooked(node: &Node) -> &str {
    match &node.kind {
        NodeKind::TemplateElement { cooked, .. } => cooked,
        _ => "",
    }
}

pub fn template_literal(
    ev: &dyn Evaluator,
    ctx: &ScopeContext,
    quasis: &[Node],
    expressions: &[Node],
) -> EvalResult<Value> {
    let mut out = String::new();
    out.push_str(quasis.first().map(quasi_cooked).unwrap_or(""));
    for (i, expr) in expressions.iter().enumerate() {
        out.push_str(&to_js_string(&ev.eval(expr, ctx)?));
        out.push_str(quasis.get(i + 1).map(quasi_cooked).unwrap_or(""));
    }
    Ok(Value::Str(out))
}

pub fn sequence(
    ev: &dyn Evaluator,
    ctx: &ScopeContext,
    nodes: &[Node],
) -> EvalResult<Value> {
    let mut last = Value::Undefined;
    for node in nodes {
        last = ev.eval(node, ctx)?;
    }
    Ok(last)
}

pub fn conditional(
    ev: &dyn Evaluator,
    ctx: &ScopeContext,
    test: &Node,
    consequent: &Node,
    alternate: &Node,
) -> EvalResult<Value> {
    // only one branch may be evaluated
    if ev.eval(test, ctx)?.is_truthy() {
        ev.eval(consequent, ctx)
    } else {
        ev.eval(alternate, ctx)
    }
}

pub fn logical(
    ev: &dyn Evaluator,
    ctx: &ScopeContext,
    op: &str,
    left: &Node,
    right: &Node,
) -> EvalResult<Value> {
    let lhs = ev.eval(left, ctx)?;
    let take_right = match op {
        "&&" => lhs.is_truthy(),
        "||" => !lhs.is_truthy(),
        "??" => lhs.is_nullish(),
        _ => {
            return Err(EvalError::new(format!(
                "Unsupported logical operator: {op}"
            )))
        }
    };
    if take_right {
        ev.eval(right, ctx)
    } else {
        Ok(lhs)
    }
}

pub fn binary(
    ev: &dyn Evaluator,
    ctx: &ScopeContext,
    op: &str,
    left: &Node,
    right: &Node,
) -> EvalResult<Value> {
    let a = ev.eval(left, ctx)?;
    let b = ev.eval(right, ctx)?;
    ops::binary_op(op, &a, &b)
}

pub fn unary(
    ev: &dyn Evaluator,
    ctx: &ScopeContext,
    op: &str,
    argument: &Node,
) -> EvalResult<Value> {
    let value = ev.eval(argument, ctx)?;
    ops::unary_op(op, &value)
}

/// `delete` needs the unevaluated operand: it acts on the target slot.
pub fn delete_expression(
    ev: &dyn Evaluator,
    ctx: &ScopeContext,
    argument: &Node,
) -> EvalResult<Value> {
    match resolve_lvalue(ev, ctx, argument)? {
        crate::eval::LValue::Var(name) => Ok(Value::Bool(ctx.delete(&name))),
        crate::eval::LValue::Prop(target, key) => {
            crate::value::delete_property(&target, &key)
        }
    }
}

pub fn update(
    ev: &dyn Evaluator,
    ctx: &ScopeContext,
    op: &str,
    argument: &Node,
    prefix: bool,
) -> EvalResult<Value> {
    let lvalue = resolve_lvalue(ev, ctx, argument)?;
    let (old, new) = ops::update_op(op, &lvalue.get(ctx)?)?;
    lvalue.set(ctx, Value::Number(new))?;
    Ok(Value::Number(if prefix { new } else { old }))
}

/// The right side evaluates exactly once, then distributes into the
/// target pattern.
pub fn assignment(
    ev: &dyn Evaluator,
    ctx: &ScopeContext,
    op: &str,
    left: &Node,
    right: &Node,
) -> EvalResult<Value> {
    let value = ev.eval(right, ctx)?;
    pattern::assign_pattern(ev, left, op, value, ctx)
}

pub fn member(
    ev: &dyn Evaluator,
    ctx: &ScopeContext,
    object: &Node,
    property: &Node,
    computed: bool,
    optional: bool,
    short_circuited: bool,
) -> EvalResult<Value> {
    let obj = ev.eval(object, ctx)?;
    if obj.is_nullish() && (optional || short_circuited) {
        // the rest of the chain is skipped without evaluating the
        // property expression
        return Ok(Value::Undefined);
    }
    let key = if computed {
        to_js_string(&ev.eval(property, ctx)?)
    } else {
        member_key(property)?
    };
    get_property(&obj, &key)
}

enum ResolvedCallee {
    ShortCircuit,
    Target { func: Value, this: Option<Value> },
}

fn resolve_callee(
    ev: &dyn Evaluator,
    ctx: &ScopeContext,
    callee: &Node,
    optional: bool,
) -> EvalResult<ResolvedCallee> {
    if let NodeKind::MemberExpression {
        object,
        property,
        computed,
        optional: m_optional,
        short_circuited: m_sc,
    } = &callee.kind
    {
        let obj = ev.eval(object, ctx)?;
        if obj.is_nullish() && (m_optional.unwrap_or(false) || m_sc.unwrap_or(false)) {
            return Ok(ResolvedCallee::ShortCircuit);
        }
        let key = if *computed {
            to_js_string(&ev.eval(property, ctx)?)
        } else {
            member_key(property)?
        };
        let func = get_property(&obj, &key)?;
        if func.is_nullish() && optional {
            return Ok(ResolvedCallee::ShortCircuit);
        }
        return Ok(ResolvedCallee::Target {
            func,
            this: Some(obj),
        });
    }

    let func = ev.eval(callee, ctx)?;
    if func.is_nullish() && optional {
        return Ok(ResolvedCallee::ShortCircuit);
    }
    Ok(ResolvedCallee::Target { func, this: None })
}

fn eval_list(
    ev: &dyn Evaluator,
    ctx: &ScopeContext,
    nodes: &[Node],
) -> EvalResult<Vec<Value>> {
    nodes.iter().map(|node| ev.eval(node, ctx)).collect()
}

pub fn call(
    ev: &dyn Evaluator,
    ctx: &ScopeContext,
    callee: &Node,
    arguments: &[Node],
    optional: bool,
) -> EvalResult<Value> {
    match resolve_callee(ev, ctx, callee, optional)? {
        // argument expressions are not evaluated either
        ResolvedCallee::ShortCircuit => Ok(Value::Undefined),
        ResolvedCallee::Target { func, this } => {
            let args = eval_list(ev, ctx, arguments)?;
            call_value(ev, &func, this.as_ref(), args)
        }
    }
}

/// Tagged template: the tag is invoked with the cooked strings array
/// followed by the interpolated values.
pub fn tagged_template(
    ev: &dyn Evaluator,
    ctx: &ScopeContext,
    tag: &Node,
    quasi: &Node,
    optional: bool,
) -> EvalResult<Value> {
    let NodeKind::TemplateLiteral {
        quasis,
        expressions,
    } = &quasi.kind
    else {
        return Err(EvalError::new("Invalid tagged template"));
    };

    match resolve_callee(ev, ctx, tag, optional)? {
        ResolvedCallee::ShortCircuit => Ok(Value::Undefined),
        ResolvedCallee::Target { func, this } => {
            let strings = Value::array(
                quasis
                    .iter()
                    .map(|q| Value::Str(quasi_cooked(q).to_string()))
                    .collect(),
            );
            let mut args = vec![strings];
            args.extend(eval_list(ev, ctx, expressions)?);
            call_value(ev, &func, this.as_ref(), args)
        }
    }
}

pub fn new_expression(
    ev: &dyn Evaluator,
    ctx: &ScopeContext,
    callee: &Node,
    arguments: &[Node],
) -> EvalResult<Value> {
    let func = ev.eval(callee, ctx)?;
    let args = eval_list(ev, ctx, arguments)?;
    construct_value(&func, args)
}

pub fn arrow(ctx: &ScopeContext, params: &[Node], body: &Node) -> Value {
    Value::Function(std::rc::Rc::new(Callable::Arrow {
        params: params.to_vec(),
        body: body.clone(),
        scope: ctx.clone(),
    }))
}
