//! Destructuring assignment and arrow-function evaluation: lazy
//! defaults, rest collection, nested patterns, and scope isolation of
//! arrow parameters.

use jsexpr_eval::value::{get_property, to_js_string, ObjectMap};
use jsexpr_eval::{ES6Eval, Evaluator, ScopeContext, Value};
use jsexpr_parser::{esnext_parser, PresetOptions};

fn eval_with(src: &str, ctx: &ScopeContext) -> Value {
    let parser = esnext_parser(PresetOptions::default());
    let ast = parser
        .parse(src)
        .unwrap_or_else(|e| panic!("parse failed for `{src}`: {e}"));
    ES6Eval::new()
        .eval(&ast, ctx)
        .unwrap_or_else(|e| panic!("eval failed for `{src}`: {e}"))
}

fn eval_err(src: &str, ctx: &ScopeContext) -> jsexpr_eval::EvalError {
    let parser = esnext_parser(PresetOptions::default());
    let ast = parser
        .parse(src)
        .unwrap_or_else(|e| panic!("parse failed for `{src}`: {e}"));
    ES6Eval::new()
        .eval(&ast, ctx)
        .expect_err("expected evaluation error")
}

fn as_num(value: &Value) -> f64 {
    match value {
        Value::Number(n) => *n,
        other => panic!("expected number, got {other:?}"),
    }
}

fn ctx_num(ctx: &ScopeContext, name: &str) -> f64 {
    as_num(&ctx.get(name).unwrap_or(Value::Undefined))
}

fn obj(pairs: &[(&str, Value)]) -> Value {
    Value::object(
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect::<ObjectMap>(),
    )
}

// ============================================================================
// Object destructuring
// ============================================================================

#[test]
fn test_object_destructuring_same_names() {
    let o = obj(&[("a", Value::Number(10.0)), ("b", Value::Number(20.0))]);
    let ctx = ScopeContext::from_pairs([("o", o.clone())]);
    let result = eval_with("{a, b} = o", &ctx);
    assert!(jsexpr_eval::value::strict_eq(&result, &o));
    assert_eq!(ctx_num(&ctx, "a"), 10.0);
    assert_eq!(ctx_num(&ctx, "b"), 20.0);
}

#[test]
fn test_object_destructuring_renamed() {
    let o = obj(&[("a", Value::Number(10.0)), ("b", Value::Number(20.0))]);
    let ctx = ScopeContext::from_pairs([("o", o)]);
    eval_with("{a: x, b: y} = o", &ctx);
    assert_eq!(ctx_num(&ctx, "x"), 10.0);
    assert_eq!(ctx_num(&ctx, "y"), 20.0);
    assert!(ctx.get("a").is_none());
}

#[test]
fn test_object_rest_collects_unvisited_keys() {
    let o = obj(&[
        ("a", Value::Number(10.0)),
        ("b", Value::Number(20.0)),
        ("s", Value::str("xyz")),
    ]);
    let ctx = ScopeContext::from_pairs([("o", o)]);
    eval_with("{a: x, ...r} = o", &ctx);
    assert_eq!(ctx_num(&ctx, "x"), 10.0);

    let rest = ctx.get("r").unwrap();
    assert!(matches!(get_property(&rest, "a").unwrap(), Value::Undefined));
    assert_eq!(as_num(&get_property(&rest, "b").unwrap()), 20.0);
    assert_eq!(to_js_string(&get_property(&rest, "s").unwrap()), "xyz");
}

#[test]
fn test_default_evaluates_when_missing() {
    // {a, z=b++} = {a:10} leaves b incremented exactly once and
    // z === old b
    let o = obj(&[("a", Value::Number(10.0))]);
    let ctx = ScopeContext::from_pairs([("o", o), ("b", Value::Number(5.0))]);
    eval_with("{a, z = b++} = o", &ctx);
    assert_eq!(ctx_num(&ctx, "a"), 10.0);
    assert_eq!(ctx_num(&ctx, "z"), 5.0);
    assert_eq!(ctx_num(&ctx, "b"), 6.0);
}

#[test]
fn test_default_not_evaluated_when_present() {
    let o = obj(&[("a", Value::Number(10.0)), ("s", Value::str("x"))]);
    let ctx = ScopeContext::from_pairs([("o", o), ("b", Value::Number(5.0))]);
    eval_with("{a, s = b++} = o", &ctx);
    assert_eq!(to_js_string(&ctx.get("s").unwrap()), "x");
    assert_eq!(ctx_num(&ctx, "b"), 5.0);
}

#[test]
fn test_renamed_default() {
    let o = obj(&[("a", Value::Number(10.0))]);
    let ctx = ScopeContext::from_pairs([("o", o), ("b", Value::Number(5.0))]);
    eval_with("{a, z: k = b++} = o", &ctx);
    assert!(ctx.get("z").is_none());
    assert_eq!(ctx_num(&ctx, "k"), 5.0);
    assert_eq!(ctx_num(&ctx, "b"), 6.0);
}

#[test]
fn test_nested_object_pattern() {
    let inner = obj(&[("b", Value::Number(42.0))]);
    let o = obj(&[("a", inner)]);
    let ctx = ScopeContext::from_pairs([("o", o)]);
    eval_with("{a: {b}} = o", &ctx);
    assert_eq!(ctx_num(&ctx, "b"), 42.0);
}

#[test]
fn test_member_expression_target() {
    let dst = obj(&[]);
    let src = obj(&[("a", Value::Number(7.0))]);
    let ctx = ScopeContext::from_pairs([("dst", dst.clone()), ("src", src)]);
    eval_with("{a: dst.x} = src", &ctx);
    assert_eq!(as_num(&get_property(&dst, "x").unwrap()), 7.0);
}

#[test]
fn test_destructure_nullish_fails() {
    let err = eval_err("{a} = missing", &ScopeContext::new());
    assert!(err.message.contains("Cannot destructure"));
}

// ============================================================================
// Array destructuring
// ============================================================================

#[test]
fn test_array_destructuring_with_holes_and_rest() {
    let list = Value::array(vec![
        Value::Number(1.0),
        Value::Number(2.0),
        Value::Number(3.0),
        Value::Number(4.0),
        Value::Number(5.0),
    ]);
    let ctx = ScopeContext::from_pairs([("list", list)]);
    eval_with("[x, , y, ...r] = list", &ctx);
    assert_eq!(ctx_num(&ctx, "x"), 1.0);
    assert_eq!(ctx_num(&ctx, "y"), 3.0);
    assert_eq!(to_js_string(&ctx.get("r").unwrap()), "4,5");
}

#[test]
fn test_array_destructuring_defaults() {
    let list = Value::array(vec![Value::Number(1.0)]);
    let ctx = ScopeContext::from_pairs([("list", list)]);
    eval_with("[a, b = 9] = list", &ctx);
    assert_eq!(ctx_num(&ctx, "a"), 1.0);
    assert_eq!(ctx_num(&ctx, "b"), 9.0);
}

#[test]
fn test_nested_array_pattern() {
    let list = Value::array(vec![
        Value::array(vec![Value::Number(1.0), Value::Number(2.0)]),
        Value::Number(3.0),
    ]);
    let ctx = ScopeContext::from_pairs([("list", list)]);
    eval_with("[[a, b], c] = list", &ctx);
    assert_eq!(ctx_num(&ctx, "a"), 1.0);
    assert_eq!(ctx_num(&ctx, "b"), 2.0);
    assert_eq!(ctx_num(&ctx, "c"), 3.0);
}

#[test]
fn test_array_pattern_requires_array() {
    let ctx = ScopeContext::from_pairs([("n", Value::Number(5.0))]);
    let err = eval_err("[a] = n", &ctx);
    assert!(err.message.contains("array"));
}

// ============================================================================
// Arrow functions
// ============================================================================

#[test]
fn test_simple_arrow_call() {
    let ctx = ScopeContext::new();
    assert_eq!(as_num(&eval_with("f = x => x * 2; f(21)", &ctx)), 42.0);
}

#[test]
fn test_arrow_closure_captures_scope() {
    let ctx = ScopeContext::new();
    assert_eq!(
        as_num(&eval_with("add = a => b => a + b; add(2)(3)", &ctx)),
        5.0
    );
}

#[test]
fn test_parameters_shadow_and_do_not_leak() {
    let ctx = ScopeContext::from_pairs([("x", Value::Number(1.0))]);
    assert_eq!(as_num(&eval_with("f = x => x + 1; f(10)", &ctx)), 11.0);
    assert_eq!(ctx_num(&ctx, "x"), 1.0);
}

#[test]
fn test_body_assignments_do_not_leak() {
    let ctx = ScopeContext::from_pairs([("x", Value::Number(1.0))]);
    assert_eq!(as_num(&eval_with("f = y => (x = y + 1); f(5)", &ctx)), 6.0);
    assert_eq!(ctx_num(&ctx, "x"), 1.0);
    assert!(ctx.get("y").is_none());
}

#[test]
fn test_parameter_defaults_see_earlier_parameters() {
    let ctx = ScopeContext::new();
    assert_eq!(
        as_num(&eval_with("f = (a, b = a + 1) => a + b; f(1)", &ctx)),
        3.0
    );
    assert_eq!(
        as_num(&eval_with("f = (a, b = a + 1) => a + b; f(1, 10)", &ctx)),
        11.0
    );
}

#[test]
fn test_rest_parameters() {
    let ctx = ScopeContext::new();
    assert_eq!(
        as_num(&eval_with("f = (...xs) => xs.length; f(1, 2, 3)", &ctx)),
        3.0
    );
    assert_eq!(as_num(&eval_with("f = (...xs) => xs.length; f()", &ctx)), 0.0);
}

#[test]
fn test_destructured_parameters() {
    let ctx = ScopeContext::new();
    assert_eq!(
        as_num(&eval_with("f = ({a, b = 2}) => a + b; f({a: 1})", &ctx)),
        3.0
    );
    assert_eq!(
        as_num(&eval_with("g = ([x, y]) => x * y; g([6, 7])", &ctx)),
        42.0
    );
}

#[test]
fn test_arrow_this_is_callers_root_context() {
    let ctx = ScopeContext::from_pairs([("v", Value::Number(9.0))]);
    assert_eq!(as_num(&eval_with("f = () => this.v; f()", &ctx)), 9.0);
}

#[test]
fn test_missing_arguments_are_undefined() {
    let ctx = ScopeContext::new();
    assert!(matches!(
        eval_with("f = a => a; f()", &ctx),
        Value::Undefined
    ));
}
