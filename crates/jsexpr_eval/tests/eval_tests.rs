//! Evaluator tests: operator semantics, evaluation order, short-circuit
//! behavior and host-function integration.

use jsexpr_eval::value::{get_property, strict_eq, to_js_string, ObjectMap};
use jsexpr_eval::{BasicEval, ES6Eval, Evaluator, NativeFunction, ScopeContext, Value};
use jsexpr_parser::{es5_parser, esnext_parser, PresetOptions};

fn eval_with(src: &str, ctx: &ScopeContext) -> Value {
    let parser = esnext_parser(PresetOptions::default());
    let ast = parser
        .parse(src)
        .unwrap_or_else(|e| panic!("parse failed for `{src}`: {e}"));
    ES6Eval::new()
        .eval(&ast, ctx)
        .unwrap_or_else(|e| panic!("eval failed for `{src}`: {e}"))
}

fn eval(src: &str) -> Value {
    eval_with(src, &ScopeContext::new())
}

fn eval_err(src: &str, ctx: &ScopeContext) -> jsexpr_eval::EvalError {
    let parser = esnext_parser(PresetOptions {
        range: true,
        ..PresetOptions::default()
    });
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

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_arithmetic() {
    assert_eq!(as_num(&eval("1 + 2 * 3")), 7.0);
    assert_eq!(as_num(&eval("(1 + 2) * 3")), 9.0);
    assert_eq!(as_num(&eval("7 % 4")), 3.0);
    assert_eq!(as_num(&eval("2 ** 3 ** 2")), 512.0);
}

#[test]
fn test_string_concatenation() {
    assert_eq!(to_js_string(&eval("1 + '2'")), "12");
    assert_eq!(to_js_string(&eval("'' + null")), "null");
    assert_eq!(to_js_string(&eval("'n:' + 1.5")), "n:1.5");
}

#[test]
fn test_equality() {
    assert!(matches!(eval("1 == '1'"), Value::Bool(true)));
    assert!(matches!(eval("1 === '1'"), Value::Bool(false)));
    assert!(matches!(eval("null == undefined"), Value::Bool(true)));
    assert!(matches!(eval("null === undefined"), Value::Bool(false)));
    assert!(matches!(eval("[5] == '5'"), Value::Bool(true)));
}

#[test]
fn test_relational() {
    assert!(matches!(eval("'b' > 'a'"), Value::Bool(true)));
    // numeric, not lexicographic, when one side is a number
    assert!(matches!(eval("2 < '10'"), Value::Bool(true)));
    assert!(matches!(eval("1 < 'x'"), Value::Bool(false)));
}

#[test]
fn test_bitwise_and_shifts() {
    assert_eq!(as_num(&eval("5 & 3")), 1.0);
    assert_eq!(as_num(&eval("5 | 3")), 7.0);
    assert_eq!(as_num(&eval("1 << 33")), 2.0);
    assert_eq!(as_num(&eval("-1 >>> 0")), 4294967295.0);
    assert_eq!(as_num(&eval("~0")), -1.0);
}

#[test]
fn test_unary() {
    assert_eq!(as_num(&eval("-'3'")), -3.0);
    assert!(matches!(eval("!0"), Value::Bool(true)));
    assert!(matches!(eval("void 5"), Value::Undefined));
    assert_eq!(to_js_string(&eval("typeof 'x'")), "string");
    assert_eq!(to_js_string(&eval("typeof missing")), "undefined");
    assert_eq!(to_js_string(&eval("typeof null")), "object");
}

#[test]
fn test_in_operator() {
    let ctx = ScopeContext::from_pairs([
        (
            "o",
            Value::object(
                [("a".to_string(), Value::Number(1.0))]
                    .into_iter()
                    .collect::<ObjectMap>(),
            ),
        ),
        ("xs", Value::array(vec![Value::Number(9.0)])),
    ]);
    assert!(matches!(eval_with("'a' in o", &ctx), Value::Bool(true)));
    assert!(matches!(eval_with("'b' in o", &ctx), Value::Bool(false)));
    assert!(matches!(eval_with("0 in xs", &ctx), Value::Bool(true)));

    let err = eval_err("'a' in 5", &ScopeContext::new());
    assert!(err.message.contains("in"));
}

#[test]
fn test_instanceof_host_hook() {
    let list = NativeFunction::new("List", |_, _| Ok(Value::Undefined))
        .with_is_instance(|value| matches!(value, Value::Array(_)));
    let ctx = ScopeContext::from_pairs([
        ("List", Value::native(list)),
        ("xs", Value::array(vec![])),
    ]);
    assert!(matches!(
        eval_with("xs instanceof List", &ctx),
        Value::Bool(true)
    ));
    assert!(matches!(
        eval_with("5 instanceof List", &ctx),
        Value::Bool(false)
    ));
}

// ============================================================================
// Short-circuiting
// ============================================================================

#[test]
fn test_logical_short_circuit_skips_side_effects() {
    let ctx = ScopeContext::from_pairs([("a", Value::Number(1.0))]);
    assert!(matches!(
        eval_with("false && (a = 99)", &ctx),
        Value::Bool(false)
    ));
    assert_eq!(ctx_num(&ctx, "a"), 1.0);

    eval_with("true || (a = 99)", &ctx);
    assert_eq!(ctx_num(&ctx, "a"), 1.0);

    eval_with("0 ?? (a = 99)", &ctx);
    assert_eq!(ctx_num(&ctx, "a"), 1.0);
}

#[test]
fn test_nullish_takes_right_only_for_nullish() {
    assert_eq!(as_num(&eval("4 ?? 5")), 4.0);
    assert_eq!(as_num(&eval("null ?? 5")), 5.0);
    assert_eq!(as_num(&eval("0 ?? 5")), 0.0);

    let ctx = ScopeContext::new();
    assert_eq!(as_num(&eval_with("null ?? (b = 7)", &ctx)), 7.0);
    assert_eq!(ctx_num(&ctx, "b"), 7.0);
}

#[test]
fn test_conditional_evaluates_single_branch() {
    let ctx = ScopeContext::from_pairs([("a", Value::Number(1.0))]);
    assert_eq!(as_num(&eval_with("true ? 10 : a++", &ctx)), 10.0);
    assert_eq!(ctx_num(&ctx, "a"), 1.0);

    assert_eq!(as_num(&eval_with("false ? a++ : 20", &ctx)), 20.0);
    assert_eq!(ctx_num(&ctx, "a"), 1.0);
}

// ============================================================================
// Assignment and update side effects
// ============================================================================

#[test]
fn test_assignment_writes_context() {
    let ctx = ScopeContext::new();
    assert_eq!(as_num(&eval_with("x = 41; x + 1", &ctx)), 42.0);
    assert_eq!(ctx_num(&ctx, "x"), 41.0);
}

#[test]
fn test_update_expressions() {
    let ctx = ScopeContext::from_pairs([("a", Value::Number(1.0))]);
    assert_eq!(as_num(&eval_with("a++", &ctx)), 1.0);
    assert_eq!(ctx_num(&ctx, "a"), 2.0);
    assert_eq!(as_num(&eval_with("++a", &ctx)), 3.0);
    assert_eq!(ctx_num(&ctx, "a"), 3.0);
    assert_eq!(as_num(&eval_with("--a", &ctx)), 2.0);
}

#[test]
fn test_compound_assignment() {
    let ctx = ScopeContext::from_pairs([("a", Value::Number(2.0))]);
    assert_eq!(as_num(&eval_with("a **= 3", &ctx)), 8.0);
    assert_eq!(as_num(&eval_with("a -= 3", &ctx)), 5.0);
    assert_eq!(to_js_string(&eval_with("s = 'x'; s += 1", &ctx)), "x1");
}

#[test]
fn test_member_update_and_assignment() {
    let o = Value::object(
        [("n".to_string(), Value::Number(1.0))]
            .into_iter()
            .collect::<ObjectMap>(),
    );
    let ctx = ScopeContext::from_pairs([("o", o.clone())]);
    assert_eq!(as_num(&eval_with("o.n++", &ctx)), 1.0);
    assert_eq!(as_num(&eval_with("o.n", &ctx)), 2.0);

    eval_with("o.m = 5; o['k'] = 6", &ctx);
    assert_eq!(as_num(&get_property(&o, "m").unwrap()), 5.0);
    assert_eq!(as_num(&get_property(&o, "k").unwrap()), 6.0);
}

#[test]
fn test_array_index_assignment_extends() {
    let xs = Value::array(vec![Value::Number(1.0)]);
    let ctx = ScopeContext::from_pairs([("xs", xs.clone())]);
    eval_with("xs[2] = 9", &ctx);
    assert_eq!(to_js_string(&xs), "1,,9");
    assert_eq!(as_num(&eval_with("xs.length", &ctx)), 3.0);
}

#[test]
fn test_delete() {
    let o = Value::object(
        [("a".to_string(), Value::Number(1.0))]
            .into_iter()
            .collect::<ObjectMap>(),
    );
    let ctx = ScopeContext::from_pairs([("o", o.clone()), ("v", Value::Number(2.0))]);
    assert!(matches!(eval_with("delete o.a", &ctx), Value::Bool(true)));
    assert!(matches!(get_property(&o, "a").unwrap(), Value::Undefined));

    assert!(matches!(eval_with("delete v", &ctx), Value::Bool(true)));
    assert!(ctx.get("v").is_none());
}

#[test]
fn test_sequence_and_empty_statements() {
    assert_eq!(as_num(&eval("1, 2, 3")), 3.0);
    assert_eq!(as_num(&eval("1;;2")), 2.0);
    assert!(matches!(eval(""), Value::Undefined));
}

// ============================================================================
// Arrays, objects, templates
// ============================================================================

#[test]
fn test_array_spread() {
    let ctx = ScopeContext::from_pairs([(
        "a",
        Value::array(vec![
            Value::Number(10.0),
            Value::Number(20.0),
            Value::Number(30.0),
        ]),
    )]);
    let result = eval_with("[1, ...a, 3]", &ctx);
    assert_eq!(to_js_string(&result), "1,10,20,30,3");
}

#[test]
fn test_sparse_array_value() {
    let result = eval("[1,,2]");
    let Value::Array(items) = &result else {
        panic!("expected array")
    };
    assert_eq!(items.borrow().len(), 3);
    assert!(matches!(items.borrow()[1], Value::Undefined));
}

#[test]
fn test_spread_non_iterable_fails() {
    let err = eval_err("[...5]", &ScopeContext::new());
    assert!(err.message.contains("Spread"));
}

#[test]
fn test_object_literal() {
    let ctx = ScopeContext::from_pairs([("k", Value::str("kk")), ("b", Value::Number(9.0))]);
    let result = eval_with("o = {a: 1, [k]: 2, b}; o.kk + o.b + o.a", &ctx);
    assert_eq!(as_num(&result), 12.0);
}

#[test]
fn test_object_spread() {
    let result = eval("m = {a: 1, b: 2}; s = {...m, c: 3}; s.a + s.c");
    assert_eq!(as_num(&result), 4.0);
}

#[test]
fn test_duplicate_plain_key_fails() {
    let err = eval_err("({a: 1, a: 2})", &ScopeContext::new());
    assert!(err.message.contains("Duplicate"));
}

#[test]
fn test_template_literal() {
    let ctx = ScopeContext::from_pairs([("name", Value::str("world"))]);
    assert_eq!(
        to_js_string(&eval_with("`hello ${name}${'!'}`", &ctx)),
        "hello world!"
    );
    assert_eq!(to_js_string(&eval("`a${1 + 1}b`")), "a2b");
}

#[test]
fn test_tagged_template() {
    let tag = NativeFunction::new("tag", |_, args| Ok(Value::array(args.to_vec())));
    let ctx = ScopeContext::from_pairs([("tag", Value::native(tag))]);
    let result = eval_with("tag`a${1}${2}b`", &ctx);

    let Value::Array(args) = &result else {
        panic!("expected array")
    };
    let args = args.borrow();
    assert_eq!(to_js_string(&args[0]), "a,,b");
    assert_eq!(as_num(&args[1]), 1.0);
    assert_eq!(as_num(&args[2]), 2.0);
}

#[test]
fn test_string_members() {
    assert_eq!(as_num(&eval("'abc'.length")), 3.0);
    assert_eq!(to_js_string(&eval("'abc'[1]")), "b");
}

// ============================================================================
// Calls, methods, new
// ============================================================================

#[test]
fn test_native_call_receives_this() {
    let get_v = NativeFunction::new("getV", |this, _| {
        get_property(this.expect("method call must bind this"), "v")
    });
    let mut map = ObjectMap::new();
    map.insert("v".to_string(), Value::Number(10.0));
    map.insert("getV".to_string(), Value::native(get_v));
    let ctx = ScopeContext::from_pairs([("o", Value::object(map))]);
    assert_eq!(as_num(&eval_with("o.getV()", &ctx)), 10.0);
}

#[test]
fn test_call_non_callable_fails() {
    let ctx = ScopeContext::from_pairs([("a", Value::Number(5.0))]);
    let err = eval_err("a()", &ctx);
    assert!(err.message.contains("not a function"));
    assert!(err.range.is_some());
}

#[test]
fn test_new_with_native_constructor() {
    let point = NativeFunction::new("Point", |_, _| Ok(Value::Undefined)).with_construct(
        |args| {
            let mut map = ObjectMap::new();
            map.insert(
                "x".to_string(),
                args.first().cloned().unwrap_or(Value::Undefined),
            );
            map.insert(
                "y".to_string(),
                args.get(1).cloned().unwrap_or(Value::Undefined),
            );
            Ok(Value::object(map))
        },
    );
    let ctx = ScopeContext::from_pairs([("Point", Value::native(point))]);
    assert_eq!(as_num(&eval_with("new Point(1, 2).y", &ctx)), 2.0);
    assert_eq!(as_num(&eval_with("(new Point(7)).x", &ctx)), 7.0);
}

#[test]
fn test_new_on_non_constructor_fails() {
    let ctx = ScopeContext::new();
    let err = eval_err("f = x => x; new f()", &ctx);
    assert!(err.message.contains("not a constructor"));
}

// ============================================================================
// Optional chaining
// ============================================================================

#[test]
fn test_optional_chain_short_circuits() {
    let ctx = ScopeContext::new();
    assert!(matches!(
        eval_with("obj?.aaa?.bbb", &ctx),
        Value::Undefined
    ));
    assert!(matches!(eval_with("obj?.aaa.bbb", &ctx), Value::Undefined));
    assert!(matches!(eval_with("obj?.aaa[0]", &ctx), Value::Undefined));
    assert!(matches!(eval_with("obj?.()", &ctx), Value::Undefined));
}

#[test]
fn test_optional_chain_does_not_evaluate_skipped_parts() {
    let ctx = ScopeContext::from_pairs([("n", Value::Number(0.0))]);
    assert!(matches!(
        eval_with("obj?.aaa[n = 99]", &ctx),
        Value::Undefined
    ));
    assert_eq!(ctx_num(&ctx, "n"), 0.0);

    // method-call arguments are skipped too
    assert!(matches!(
        eval_with("obj?.f(n = 99)", &ctx),
        Value::Undefined
    ));
    assert_eq!(ctx_num(&ctx, "n"), 0.0);
}

#[test]
fn test_parenthesized_chain_rethrows() {
    let err = eval_err("(obj?.aaa).bbb", &ScopeContext::new());
    assert!(err.message.contains("null or undefined"));
}

#[test]
fn test_plain_access_on_nullish_fails() {
    let err = eval_err("obj.aaa", &ScopeContext::new());
    assert!(err.message.contains("reading 'aaa'"));
}

#[test]
fn test_optional_call_on_present_method() {
    let get_v = NativeFunction::new("f", |_, _| Ok(Value::Number(7.0)));
    let mut map = ObjectMap::new();
    map.insert("f".to_string(), Value::native(get_v));
    let ctx = ScopeContext::from_pairs([("o", Value::object(map))]);
    assert_eq!(as_num(&eval_with("o?.f()", &ctx)), 7.0);
    assert!(matches!(eval_with("o.g?.()", &ctx), Value::Undefined));
}

// ============================================================================
// Evaluator layering
// ============================================================================

#[test]
fn test_basic_eval_rejects_assignment() {
    let parser = es5_parser(PresetOptions::default());
    let ast = parser.parse("x = 1").unwrap();
    let err = BasicEval::new()
        .eval(&ast, &ScopeContext::new())
        .expect_err("assignment is outside the basic evaluator");
    assert!(err.message.contains("Unsupported expression type"));
}

#[test]
fn test_strict_identity_for_references() {
    let shared = Value::array(vec![Value::Number(1.0)]);
    let ctx = ScopeContext::from_pairs([("a", shared.clone()), ("b", shared)]);
    assert!(matches!(eval_with("a === b", &ctx), Value::Bool(true)));
    assert!(matches!(
        eval_with("a === [1]", &ctx),
        Value::Bool(false)
    ));
    assert!(strict_eq(
        &eval_with("a", &ctx),
        &ctx.get("a").unwrap()
    ));
}
