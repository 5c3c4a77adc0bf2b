//! ES5 expression grammar.
//!
//! Statement mode produces a `Program` with `;`/newline separated
//! `ExpressionStatement`s (directive prologue tagged, empty slots filled
//! with `EmptyStatement`); expression mode starts at the comma-sequence
//! level. The operator cascade follows the standard ES5 precedence table.

use jsexpr_ast::{LiteralValue, NodeKind};

use crate::context::{RuleSet, RuleSlot};
use crate::parser::Parser;
use crate::rules::{
    BinaryConf, BinaryOperatorRule, IdentifierConf, IdentifierRule, MultiConf,
    MultiOperatorRule, MultipleConf, NumberRule, RegexConf, RegexRule, Sparse, StringConf,
    StringRule, TernaryConf, TernaryOperatorRule, UnaryConf, UnaryOperatorRule,
};

use super::consts::*;
use super::{parser_options, GrammarOpts, PresetOptions};

/// Identifier configuration of the main token level: keyword literals
/// plus `this`.
pub fn es5_identifier_conf(opts: &GrammarOpts) -> IdentifierConf {
    IdentifierConf {
        literals: vec![
            ("true", LiteralValue::Bool(true)),
            ("false", LiteralValue::Bool(false)),
            ("null", LiteralValue::Null),
        ],
        this_expression: true,
        ident_start: opts.ident_start.clone(),
        ident_part: opts.ident_part.clone(),
        ..IdentifierConf::default()
    }
}

/// Bare identifier rule for property-name positions (reserved words and
/// keyword literals are plain names there).
pub fn property_identifier(opts: &GrammarOpts) -> IdentifierRule {
    IdentifierRule::new(IdentifierConf {
        ident_start: opts.ident_start.clone(),
        ident_part: opts.ident_part.clone(),
        ..IdentifierConf::default()
    })
}

/// The four numeric token rules: prefixed radixes first so `0x1F` is not
/// cut short by the plain decimal rule.
pub fn number_rules() -> Vec<RuleSlot> {
    vec![
        RuleSlot::rule(NumberRule::prefixed("0x", 16)),
        RuleSlot::rule(NumberRule::prefixed("0o", 8)),
        RuleSlot::rule(NumberRule::prefixed("0b", 2)),
        RuleSlot::rule(NumberRule::decimal()),
    ]
}

/// `.` / `[` member rule used by the `new`-callee and pattern branches.
pub fn member_rule() -> BinaryOperatorRule {
    BinaryOperatorRule::new(vec![
        (".", member_dot_conf(build_member_dot)),
        ("[", member_computed_conf(build_member_computed)),
    ])
}

/// `new` prefix rule: the callee (and arguments, if called) are parsed in
/// the dedicated `new` branch, so `new a + b` binds as `(new a) + b`.
fn new_rule() -> UnaryOperatorRule {
    UnaryOperatorRule::new(vec![(
        "new",
        UnaryConf {
            is_pre: true,
            space: true,
            sub_rules: Some(NEW),
            ..UnaryConf::new(build_new)
        },
    )])
}

fn grouping_rule() -> UnaryOperatorRule {
    UnaryOperatorRule::new(vec![("(", group_conf())])
}

fn assignment_rule() -> BinaryOperatorRule {
    let ops = [
        "=", "+=", "-=", "*=", "/=", "%=", ">>=", "<<=", ">>>=", "|=", "&=", "^=",
    ];
    BinaryOperatorRule::new(ops.iter().map(|op| (*op, assign_conf())).collect())
}

fn binary_level(ops: &[&'static str], conf: fn() -> BinaryConf) -> RuleSlot {
    RuleSlot::rule(BinaryOperatorRule::new(
        ops.iter().map(|op| (*op, conf())).collect(),
    ))
}

/// Build the ES5 rule table.
pub fn es5_rules(opts: &GrammarOpts) -> RuleSet {
    let mut rules = RuleSet::new();

    let program_conf = MultipleConf {
        multi: MultiConf {
            separators: ";\n",
            sparse: Sparse::Filler(|| NodeKind::EmptyStatement),
            trailing: true,
            ..MultiConf::default()
        },
        sub_rules: None,
        empty: true,
        build: build_program,
    };
    let statement_conf = MultipleConf {
        multi: MultiConf::default(),
        sub_rules: None,
        empty: false,
        build: build_expression_statement,
    };
    let comma_conf = MultipleConf {
        multi: MultiConf {
            separators: ",",
            ..MultiConf::default()
        },
        sub_rules: None,
        empty: false,
        build: build_sequence,
    };

    rules.insert(
        STATEMENT,
        vec![
            RuleSlot::rule(MultiOperatorRule::new(program_conf)),
            RuleSlot::rule(MultiOperatorRule::new(statement_conf)),
            RuleSlot::alias(EXPRESSION),
        ],
    );

    rules.insert(
        EXPRESSION,
        vec![
            RuleSlot::rule(MultiOperatorRule::new(comma_conf)),
            RuleSlot::alias(NOCOMMA),
        ],
    );

    rules.insert(
        NOCOMMA,
        vec![
            RuleSlot::rule(assignment_rule()),
            RuleSlot::rule(TernaryOperatorRule::new(TernaryConf::conditional(
                Some(NOCOMMA),
                build_conditional,
            ))),
            RuleSlot::alias(LOGICAL),
        ],
    );

    rules.insert(
        LOGICAL,
        vec![
            binary_level(&["||"], || plain(build_logical)),
            binary_level(&["&&"], || plain(build_logical)),
            RuleSlot::alias(BINARY),
        ],
    );

    rules.insert(
        BINARY,
        vec![
            binary_level(&["|"], || plain(build_binary)),
            binary_level(&["^"], || plain(build_binary)),
            binary_level(&["&"], || plain(build_binary)),
            binary_level(&["==", "!=", "===", "!=="], || plain(build_binary)),
            RuleSlot::rule(BinaryOperatorRule::new(vec![
                ("<", plain(build_binary)),
                (">", plain(build_binary)),
                ("<=", plain(build_binary)),
                (">=", plain(build_binary)),
                ("instanceof", plain_sp(build_binary)),
                ("in", plain_sp(build_binary)),
            ])),
            binary_level(&["<<", ">>", ">>>"], || plain(build_binary)),
            binary_level(&["+", "-"], || plain(build_binary)),
            binary_level(&["*", "/", "%"], || plain(build_binary)),
            RuleSlot::alias(UNARY),
        ],
    );

    rules.insert(
        UNARY,
        vec![
            RuleSlot::rule(UnaryOperatorRule::new(vec![
                ("+", unary_pre_conf(build_unary)),
                ("-", unary_pre_conf(build_unary)),
                ("!", unary_pre_conf(build_unary)),
                ("~", unary_pre_conf(build_unary)),
                ("typeof", unary_pre_sp_conf(build_unary)),
                ("void", unary_pre_sp_conf(build_unary)),
                ("delete", unary_pre_sp_conf(build_unary)),
            ])),
            RuleSlot::alias(UPDATE),
        ],
    );

    let update_types: fn(&jsexpr_ast::Node) -> bool = is_assign_target;
    let update_pre = |op| {
        (
            op,
            UnaryConf {
                is_pre: true,
                multi: MultiConf {
                    types: Some(update_types),
                    ..MultiConf::default()
                },
                ..UnaryConf::new(build_update_prefix)
            },
        )
    };
    rules.insert(
        UPDATE,
        vec![
            RuleSlot::rule(UnaryOperatorRule::new(vec![
                update_pre("++"),
                update_pre("--"),
            ])),
            RuleSlot::rule(UnaryOperatorRule::new(vec![
                (
                    "++",
                    UnaryConf {
                        multi: MultiConf {
                            types: Some(update_types),
                            ..MultiConf::default()
                        },
                        ..UnaryConf::new(build_update_postfix)
                    },
                ),
                (
                    "--",
                    UnaryConf {
                        multi: MultiConf {
                            types: Some(update_types),
                            ..MultiConf::default()
                        },
                        ..UnaryConf::new(build_update_postfix)
                    },
                ),
            ])),
            RuleSlot::alias(MEMBER),
        ],
    );

    rules.insert(
        MEMBER,
        vec![
            RuleSlot::rule(BinaryOperatorRule::new(vec![
                (".", member_dot_conf(build_member_dot)),
                ("[", member_computed_conf(build_member_computed)),
                ("(", call_conf(build_call, opts.call_trailing_comma)),
                ("`", tagged_conf(build_tagged)),
            ])),
            RuleSlot::rule(new_rule()),
            RuleSlot::rule(grouping_rule()),
            RuleSlot::alias(TOKEN),
        ],
    );

    rules.insert(
        TOKEN,
        {
            let mut slots = number_rules();
            slots.push(RuleSlot::rule(StringRule::new(StringConf {
                cp: true,
                template_rules: Some(EXPRESSION),
                ..StringConf::default()
            })));
            slots.push(RuleSlot::rule(IdentifierRule::new(es5_identifier_conf(
                opts,
            ))));
            slots.push(RuleSlot::rule(UnaryOperatorRule::new(vec![(
                "[",
                array_conf(ARRAY),
            )])));
            slots.push(RuleSlot::rule(RegexRule::new(RegexConf::default())));
            slots.push(RuleSlot::rule(UnaryOperatorRule::new(vec![(
                "{",
                object_conf(),
            )])));
            slots
        },
    );

    // auxiliary branches

    // member property names (reserved words allowed)
    rules.insert(PROPERTY, vec![RuleSlot::rule(property_identifier(opts))]);

    // new-expression callee
    rules.insert(
        NEW,
        vec![
            RuleSlot::rule(new_rule()),
            RuleSlot::rule(BinaryOperatorRule::new(vec![(
                "(",
                call_conf(build_call, opts.call_trailing_comma),
            )])),
            RuleSlot::rule(member_rule()),
            RuleSlot::rule(grouping_rule()),
            RuleSlot::alias(TOKEN),
        ],
    );

    // object literal members
    rules.insert(
        OBJECT,
        {
            let mut slots = vec![
                RuleSlot::rule(BinaryOperatorRule::new(vec![(
                    ":",
                    BinaryConf {
                        sub_rules: Some(NOCOMMA),
                        ..BinaryConf::new(build_property)
                    },
                )])),
                RuleSlot::rule(UnaryOperatorRule::new(vec![(
                    "[",
                    UnaryConf {
                        close: Some(']'),
                        sub_rules: Some(NOCOMMA),
                        ..UnaryConf::new(build_computed_key)
                    },
                )])),
            ];
            slots.extend(number_rules());
            slots.push(RuleSlot::rule(property_identifier(opts)));
            slots.push(RuleSlot::rule(StringRule::new(StringConf::default())));
            slots
        },
    );

    // array literal elements (spread allowed)
    rules.insert(
        ARRAY,
        vec![
            RuleSlot::rule(UnaryOperatorRule::new(vec![(
                "...",
                UnaryConf {
                    is_pre: true,
                    sub_rules: Some(NOCOMMA),
                    ..UnaryConf::new(build_spread)
                },
            )])),
            RuleSlot::alias(NOCOMMA),
        ],
    );

    // template continuation after a consumed backtick
    rules.insert(
        TEMPLATE,
        vec![RuleSlot::rule(StringRule::new(StringConf {
            cp: true,
            unquoted: true,
            template_rules: Some(EXPRESSION),
            ..StringConf::default()
        }))],
    );

    rules
}

/// Build an ES5 parser.
pub fn es5_parser(options: PresetOptions) -> Parser {
    let opts = GrammarOpts::from_preset(&options);
    let start = if options.statement { STATEMENT } else { EXPRESSION };
    Parser::new(es5_rules(&opts), start, parser_options(&options))
}
