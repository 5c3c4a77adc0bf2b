//! Minimal jsep-compatible grammar.
//!
//! Statements separated by `,`/`;`/whitespace (or plain juxtaposition)
//! collect into a `Compound` node, with single expressions unwrapped. No
//! assignment, no `new`, no regex literals, no word operators.

use jsexpr_ast::LiteralValue;

use crate::context::{RuleSet, RuleSlot};
use crate::parser::Parser;
use crate::rules::{
    BinaryOperatorRule, IdentifierConf, IdentifierRule, MultiConf, MultiOperatorRule,
    MultipleConf, NumberRule, Sparse, StringConf, StringRule, TernaryConf,
    TernaryOperatorRule, UnaryOperatorRule,
};

use super::consts::*;
use super::{parser_options, PresetOptions};

/// Build the jsep-compatible rule table.
pub fn basic_rules() -> RuleSet {
    let mut rules = RuleSet::new();

    let compound_conf = MultipleConf {
        multi: MultiConf {
            separators: ",; \n\0",
            sparse: Sparse::Hole,
            trailing: true,
            ..MultiConf::default()
        },
        sub_rules: None,
        empty: true,
        build: build_compound,
    };

    rules.insert(
        STATEMENT,
        vec![
            RuleSlot::rule(MultiOperatorRule::new(compound_conf)),
            RuleSlot::alias(EXPRESSION),
        ],
    );
    rules.insert(EXPRESSION, vec![RuleSlot::alias(NOCOMMA)]);

    let binary_levels: &[&[&'static str]] = &[
        &["|"],
        &["^"],
        &["&"],
        &["==", "!=", "===", "!=="],
        &["<", ">", "<=", ">="],
        &["<<", ">>", ">>>"],
        &["+", "-"],
        &["*", "/", "%"],
    ];

    let mut nocomma = vec![
        RuleSlot::rule(TernaryOperatorRule::new(TernaryConf::conditional(
            None,
            build_conditional,
        ))),
        RuleSlot::rule(BinaryOperatorRule::new(vec![
            ("||", plain(build_logical)),
            ("&&", plain(build_logical)),
        ])),
    ];
    for ops in binary_levels {
        nocomma.push(RuleSlot::rule(BinaryOperatorRule::new(
            ops.iter().map(|op| (*op, plain(build_binary))).collect(),
        )));
    }
    nocomma.push(RuleSlot::rule(UnaryOperatorRule::new(vec![
        ("+", unary_pre_conf(build_unary)),
        ("-", unary_pre_conf(build_unary)),
        ("!", unary_pre_conf(build_unary)),
        ("~", unary_pre_conf(build_unary)),
    ])));
    nocomma.push(RuleSlot::rule(BinaryOperatorRule::new(vec![
        (".", member_dot_conf(build_member_dot)),
        ("[", member_computed_conf(build_member_computed)),
        ("(", call_conf(build_call, false)),
    ])));
    nocomma.push(RuleSlot::rule(UnaryOperatorRule::new(vec![(
        "(",
        group_conf(),
    )])));
    nocomma.push(RuleSlot::alias(TOKEN));
    rules.insert(NOCOMMA, nocomma);

    rules.insert(
        TOKEN,
        vec![
            RuleSlot::rule(StringRule::new(StringConf {
                lt: false,
                hex: false,
                raw: false,
                ..StringConf::default()
            })),
            RuleSlot::rule(NumberRule::decimal()),
            RuleSlot::rule(IdentifierRule::new(IdentifierConf {
                literals: vec![
                    ("true", LiteralValue::Bool(true)),
                    ("false", LiteralValue::Bool(false)),
                    ("null", LiteralValue::Null),
                ],
                this_expression: true,
                ..IdentifierConf::default()
            })),
            RuleSlot::rule(UnaryOperatorRule::new(vec![("[", array_conf(NOCOMMA))])),
        ],
    );

    rules.insert(
        PROPERTY,
        vec![RuleSlot::rule(IdentifierRule::new(
            IdentifierConf::default(),
        ))],
    );

    rules
}

/// Build a jsep-compatible parser (always statement mode; single
/// expressions come back unwrapped).
pub fn basic_parser() -> Parser {
    basic_parser_with(PresetOptions::default())
}

/// jsep-compatible parser with explicit options (range tracking).
pub fn basic_parser_with(options: PresetOptions) -> Parser {
    Parser::new(basic_rules(), STATEMENT, parser_options(&options))
}
