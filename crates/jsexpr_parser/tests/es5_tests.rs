//! ES5 grammar tests.
//!
//! Structural expectations are asserted against the serialized ESTree
//! JSON, which is what downstream consumers compare against reference
//! parsers.

use jsexpr_parser::{es5_parser, PresetOptions};
use serde_json::json;

/// Parse in statement mode and serialize.
fn parse(src: &str) -> serde_json::Value {
    let parser = es5_parser(PresetOptions::default());
    let ast = parser.parse(src).unwrap_or_else(|e| panic!("parse failed for `{src}`: {e}"));
    serde_json::to_value(&ast).unwrap()
}

/// Parse a single expression (no statement wrapper) and serialize.
fn parse_expr(src: &str) -> serde_json::Value {
    let parser = es5_parser(PresetOptions {
        statement: false,
        ..PresetOptions::default()
    });
    let ast = parser.parse(src).unwrap_or_else(|e| panic!("parse failed for `{src}`: {e}"));
    serde_json::to_value(&ast).unwrap()
}

fn assert_fails(src: &str) {
    let parser = es5_parser(PresetOptions::default());
    assert!(parser.parse(src).is_err(), "expected failure for `{src}`");
}

fn ident(name: &str) -> serde_json::Value {
    json!({"type": "Identifier", "name": name})
}

fn num(value: i64, raw: &str) -> serde_json::Value {
    json!({"type": "Literal", "value": value, "raw": raw})
}

// ============================================================================
// Program structure
// ============================================================================

#[test]
fn test_program_wraps_statements() {
    let ast = parse("a; b");
    assert_eq!(ast["type"], "Program");
    assert_eq!(ast["sourceType"], "script");
    assert_eq!(ast["body"].as_array().unwrap().len(), 2);
    assert_eq!(ast["body"][0]["type"], "ExpressionStatement");
    assert_eq!(ast["body"][1]["expression"], ident("b"));
}

#[test]
fn test_empty_program() {
    let ast = parse("");
    assert_eq!(ast["body"], json!([]));
}

#[test]
fn test_newline_separates_statements() {
    let ast = parse("a\n++b");
    let body = ast["body"].as_array().unwrap();
    assert_eq!(body.len(), 2);
    assert_eq!(body[1]["expression"]["type"], "UpdateExpression");
    assert_eq!(body[1]["expression"]["prefix"], true);
}

#[test]
fn test_empty_statement_slots() {
    let ast = parse("a;;b");
    let body = ast["body"].as_array().unwrap();
    assert_eq!(body.len(), 3);
    assert_eq!(body[1]["type"], "EmptyStatement");
}

#[test]
fn test_directive_prologue() {
    let ast = parse("'use strict'; 'x'; foo");
    let body = ast["body"].as_array().unwrap();
    assert_eq!(body[0]["directive"], "use strict");
    assert_eq!(body[1]["directive"], "x");
    assert!(body[2].get("directive").is_none());
}

#[test]
fn test_no_directive_after_prologue() {
    let ast = parse("foo; 'bar'");
    let body = ast["body"].as_array().unwrap();
    assert!(body[1].get("directive").is_none());
}

// ============================================================================
// Operator precedence and associativity
// ============================================================================

#[test]
fn test_multiplicative_binds_tighter() {
    assert_eq!(
        parse_expr("a + b * c"),
        json!({
            "type": "BinaryExpression",
            "operator": "+",
            "left": ident("a"),
            "right": {
                "type": "BinaryExpression",
                "operator": "*",
                "left": ident("b"),
                "right": ident("c"),
            },
        })
    );
}

#[test]
fn test_additive_left_associative() {
    let ast = parse_expr("a - b - c");
    assert_eq!(ast["operator"], "-");
    assert_eq!(ast["left"]["operator"], "-");
    assert_eq!(ast["right"], ident("c"));
}

#[test]
fn test_logical_precedence() {
    let ast = parse_expr("a && b || c");
    assert_eq!(ast["type"], "LogicalExpression");
    assert_eq!(ast["operator"], "||");
    assert_eq!(ast["left"]["operator"], "&&");
}

#[test]
fn test_conditional() {
    let ast = parse_expr("a ? b : c");
    assert_eq!(
        ast,
        json!({
            "type": "ConditionalExpression",
            "test": ident("a"),
            "consequent": ident("b"),
            "alternate": ident("c"),
        })
    );
}

#[test]
fn test_nested_conditional_right_associative() {
    let ast = parse_expr("a ? b : c ? d : e");
    assert_eq!(ast["alternate"]["type"], "ConditionalExpression");
}

#[test]
fn test_assignment_right_associative() {
    let ast = parse_expr("a = b = c");
    assert_eq!(ast["type"], "AssignmentExpression");
    assert_eq!(ast["left"], ident("a"));
    assert_eq!(ast["right"]["type"], "AssignmentExpression");
    assert_eq!(ast["right"]["left"], ident("b"));
}

#[test]
fn test_compound_assignment() {
    let ast = parse_expr("a >>>= 2");
    assert_eq!(ast["operator"], ">>>=");
}

#[test]
fn test_assignment_in_conditional_branches() {
    let ast = parse_expr("a ? b = c : d = e");
    assert_eq!(ast["consequent"]["type"], "AssignmentExpression");
    assert_eq!(ast["alternate"]["type"], "AssignmentExpression");
}

#[test]
fn test_sequence_expression() {
    let ast = parse_expr("a, b, c");
    assert_eq!(ast["type"], "SequenceExpression");
    assert_eq!(ast["expressions"].as_array().unwrap().len(), 3);
}

#[test]
fn test_word_operators() {
    let ast = parse_expr("a instanceof b");
    assert_eq!(ast["type"], "BinaryExpression");
    assert_eq!(ast["operator"], "instanceof");

    let ast = parse_expr("'x' in b");
    assert_eq!(ast["operator"], "in");
}

#[test]
fn test_unary_chain() {
    let ast = parse_expr("- - x");
    assert_eq!(ast["type"], "UnaryExpression");
    assert_eq!(ast["argument"]["type"], "UnaryExpression");
    assert_eq!(ast["argument"]["argument"], ident("x"));
    assert_eq!(ast["prefix"], true);
}

#[test]
fn test_typeof_object_literal() {
    let ast = parse_expr("typeof {prop: value}");
    assert_eq!(ast["operator"], "typeof");
    assert_eq!(ast["argument"]["type"], "ObjectExpression");
}

#[test]
fn test_update_expressions() {
    let postfix = parse_expr("x++");
    assert_eq!(postfix["type"], "UpdateExpression");
    assert_eq!(postfix["prefix"], false);

    let prefix = parse_expr("--x");
    assert_eq!(prefix["operator"], "--");
    assert_eq!(prefix["prefix"], true);
}

// ============================================================================
// Member, call, new
// ============================================================================

#[test]
fn test_member_chain() {
    assert_eq!(
        parse_expr("a.b.c"),
        json!({
            "type": "MemberExpression",
            "object": {
                "type": "MemberExpression",
                "object": ident("a"),
                "property": ident("b"),
                "computed": false,
            },
            "property": ident("c"),
            "computed": false,
        })
    );
}

#[test]
fn test_computed_member() {
    let ast = parse_expr("a[0]");
    assert_eq!(ast["computed"], true);
    assert_eq!(ast["property"], num(0, "0"));
}

#[test]
fn test_string_member() {
    let ast = parse_expr("'abc'.length");
    assert_eq!(ast["object"]["value"], "abc");
    assert_eq!(ast["property"], ident("length"));
}

#[test]
fn test_call_and_member_mix() {
    let ast = parse_expr("a.b(c).d");
    assert_eq!(ast["type"], "MemberExpression");
    assert_eq!(ast["object"]["type"], "CallExpression");
    assert_eq!(ast["object"]["callee"]["property"], ident("b"));
}

#[test]
fn test_empty_call() {
    let ast = parse_expr("f()");
    assert_eq!(ast["arguments"], json!([]));
}

#[test]
fn test_new_without_arguments() {
    let ast = parse_expr("new Date");
    assert_eq!(
        ast,
        json!({"type": "NewExpression", "callee": ident("Date"), "arguments": []})
    );
}

#[test]
fn test_new_with_arguments() {
    let ast = parse_expr("new a.b(c)");
    assert_eq!(ast["type"], "NewExpression");
    assert_eq!(ast["callee"]["type"], "MemberExpression");
    assert_eq!(ast["arguments"], json!([ident("c")]));
}

#[test]
fn test_new_binds_tighter_than_additive() {
    let ast = parse_expr("new a + b");
    assert_eq!(ast["type"], "BinaryExpression");
    assert_eq!(ast["left"]["type"], "NewExpression");
}

#[test]
fn test_grouping() {
    let ast = parse_expr("(a + b) * c");
    assert_eq!(ast["operator"], "*");
    assert_eq!(ast["left"]["operator"], "+");
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_keyword_literals() {
    assert_eq!(
        parse_expr("true"),
        json!({"type": "Literal", "value": true, "raw": "true"})
    );
    assert_eq!(
        parse_expr("null"),
        json!({"type": "Literal", "value": null, "raw": "null"})
    );
    assert_eq!(parse_expr("this"), json!({"type": "ThisExpression"}));
}

#[test]
fn test_number_radixes() {
    assert_eq!(parse_expr("0x1F"), num(31, "0x1F"));
    assert_eq!(parse_expr("0o17"), num(15, "0o17"));
    assert_eq!(parse_expr("0b101"), num(5, "0b101"));
    assert_eq!(
        parse_expr(".5"),
        json!({"type": "Literal", "value": 0.5, "raw": ".5"})
    );
    assert_eq!(
        parse_expr("1.5e2"),
        json!({"type": "Literal", "value": 150, "raw": "1.5e2"})
    );
}

#[test]
fn test_string_escapes() {
    let ast = parse_expr(r"'a\nb'");
    assert_eq!(ast["value"], "a\nb");
    assert_eq!(ast["raw"], r"'a\nb'");

    assert_eq!(parse_expr(r"'\u0041'")["value"], "A");
    assert_eq!(parse_expr(r"'\x41'")["value"], "A");
    assert_eq!(parse_expr(r"'\u{1F600}'")["value"], "😀");
    assert_eq!(parse_expr(r"'don\'t'")["value"], "don't");
}

#[test]
fn test_regex_literal() {
    let ast = parse_expr("/ab+c/gi");
    assert_eq!(ast["type"], "Literal");
    assert_eq!(ast["raw"], "/ab+c/gi");
    assert_eq!(ast["regex"], json!({"pattern": "ab+c", "flags": "gi"}));
}

#[test]
fn test_regex_with_class_slash() {
    let ast = parse_expr("/test[/]/");
    assert_eq!(ast["regex"]["pattern"], "test[/]");
}

#[test]
fn test_division_not_regex_after_operand() {
    let ast = parse_expr("234/test/ig");
    assert_eq!(ast["type"], "BinaryExpression");
    assert_eq!(ast["operator"], "/");
    assert_eq!(ast["left"]["operator"], "/");
}

// ============================================================================
// Arrays and objects
// ============================================================================

#[test]
fn test_sparse_array() {
    assert_eq!(
        parse_expr("[,,]")["elements"],
        json!([null, null])
    );
    assert_eq!(
        parse_expr("[1, 2,, 3, ]")["elements"],
        json!([num(1, "1"), num(2, "2"), null, num(3, "3")])
    );
}

#[test]
fn test_array_spread() {
    let ast = parse_expr("[a, ...b]");
    assert_eq!(ast["elements"][1]["type"], "SpreadElement");
    assert_eq!(ast["elements"][1]["argument"], ident("b"));
}

#[test]
fn test_object_literal() {
    let ast = parse_expr("{a: 1, 'b': 2, 3: c, d}");
    let props = ast["properties"].as_array().unwrap();
    assert_eq!(props.len(), 4);
    assert_eq!(props[0]["key"], ident("a"));
    assert_eq!(props[0]["shorthand"], false);
    assert_eq!(props[1]["key"]["value"], "b");
    assert_eq!(props[2]["key"]["value"], 3);
    assert_eq!(props[3]["shorthand"], true);
    assert_eq!(props[3]["value"], ident("d"));
}

#[test]
fn test_computed_key() {
    let ast = parse_expr("{[k]: 1}");
    let prop = &ast["properties"][0];
    assert_eq!(prop["computed"], true);
    assert_eq!(prop["key"], ident("k"));
}

#[test]
fn test_object_value_expressions() {
    let ast = parse_expr("{a: b ? c : d}");
    assert_eq!(
        ast["properties"][0]["value"]["type"],
        "ConditionalExpression"
    );
}

// ============================================================================
// Templates
// ============================================================================

#[test]
fn test_template_literal() {
    let ast = parse_expr("`a${b}c`");
    assert_eq!(ast["type"], "TemplateLiteral");
    let quasis = ast["quasis"].as_array().unwrap();
    assert_eq!(quasis[0]["value"], json!({"cooked": "a", "raw": "a"}));
    assert_eq!(quasis[0]["tail"], false);
    assert_eq!(quasis[1]["value"]["cooked"], "c");
    assert_eq!(quasis[1]["tail"], true);
    assert_eq!(ast["expressions"], json!([ident("b")]));
}

#[test]
fn test_template_expression_only() {
    let ast = parse_expr("`${f(d)}`");
    assert_eq!(ast["quasis"][0]["value"]["cooked"], "");
    assert_eq!(ast["expressions"][0]["type"], "CallExpression");
}

#[test]
fn test_template_sequence_expression() {
    let ast = parse_expr("`${3,4,5}x`");
    assert_eq!(ast["expressions"][0]["type"], "SequenceExpression");
}

#[test]
fn test_tagged_template() {
    let ast = parse_expr("tag`str ${e} end`");
    assert_eq!(ast["type"], "TaggedTemplateExpression");
    assert_eq!(ast["tag"], ident("tag"));
    assert_eq!(ast["quasi"]["type"], "TemplateLiteral");
    assert_eq!(ast["quasi"]["expressions"], json!([ident("e")]));
}

#[test]
fn test_tagged_template_member_tag() {
    let ast = parse_expr("tag.member`str`");
    assert_eq!(ast["tag"]["type"], "MemberExpression");
}

#[test]
fn test_escaped_interpolation_stays_text() {
    let ast = parse_expr(r"`text\${e}`");
    assert_eq!(ast["expressions"], json!([]));
    assert_eq!(ast["quasis"][0]["value"]["cooked"], "text${e}");
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_failures() {
    assert_fails("func(,,param)");
    assert_fails("() + 42");
    assert_fails("3 = 4");
    assert_fails("+i = 42");
    assert_fails("(1 + 1) = 10");
    assert_fails("1++");
    assert_fails("++1");
    assert_fails("a b");
    assert_fails("'unterminated");
    assert_fails("`unterminated ${a");
    assert_fails("/unterminated");
    assert_fails("12e");
    assert_fails("12e+");
    assert_fails("123abc");
    assert_fails("a.5");
    assert_fails("typeof {prop: value,");
    assert_fails("p = { 'q'/ }");
    assert_fails("new");
    assert_fails("a,");
    assert_fails("a ? b");
    assert_fails("f(a,)");
}

#[test]
fn test_custom_identifier_classes() {
    use jsexpr_scanner::CharClass;
    use regex::Regex;

    let parser = es5_parser(PresetOptions {
        statement: false,
        ident_start: Some(CharClass::pattern(Regex::new("[A-Za-z_]").unwrap())),
        ident_part: Some(CharClass::pattern(Regex::new(r"[0-9A-Za-z_\-]").unwrap())),
        ..PresetOptions::default()
    });
    // `-` is an identifier char under the custom classes
    let ast = parser.parse("foo-bar").unwrap();
    let json = serde_json::to_value(&ast).unwrap();
    assert_eq!(json, ident("foo-bar"));
}

#[test]
fn test_no_match_flag_reaches_caller() {
    let parser = es5_parser(PresetOptions::default());
    // a malformed continuation is a hard error, not a no-match
    let err = parser.parse("a +").unwrap_err();
    assert!(!err.no_match);
}
