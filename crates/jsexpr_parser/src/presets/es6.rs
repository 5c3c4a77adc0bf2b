//! ES6 grammar: ES5 plus arrow functions and destructuring assignment.
//!
//! Both features need speculation: a parenthesized arrow parameter list
//! looks like a grouping until `=>` is seen, and a destructuring target
//! looks like an array/object literal until `=` is seen. Each gets a
//! speculative branch whose final operator is mandatory, spliced into the
//! no-comma level.

use crate::context::{RuleSet, RuleSlot};
use crate::parser::Parser;
use crate::rules::{
    BinaryConf, BinaryOperatorRule, MultiConf, Sparse, StringConf, StringRule,
    TryBranchRule, UnaryConf, UnaryOperatorRule,
};

use super::consts::*;
use super::es5::{es5_rules, member_rule, number_rules};
use super::{parser_options, GrammarOpts, PresetOptions};

/// `...rest` element (identifier target).
fn rest_rule() -> UnaryOperatorRule {
    UnaryOperatorRule::new(vec![(
        "...",
        UnaryConf {
            is_pre: true,
            sub_rules: Some(PROPERTY),
            ..UnaryConf::new(build_rest)
        },
    )])
}

/// `target = default` inside a pattern.
fn default_rule() -> BinaryOperatorRule {
    BinaryOperatorRule::new(vec![(
        "=",
        BinaryConf {
            sub_rules: Some(NOCOMMA),
            rasoc: true,
            ..BinaryConf::new(build_assign_pattern)
        },
    )])
}

fn array_pattern_conf(sub_rules: &'static str) -> UnaryConf {
    UnaryConf {
        close: Some(']'),
        empty: true,
        sub_rules: Some(sub_rules),
        multi: MultiConf {
            separators: ",",
            sparse: Sparse::Hole,
            trailing: true,
            ..MultiConf::default()
        },
        ..UnaryConf::new(build_array_pattern)
    }
}

fn object_pattern_conf(sub_rules: &'static str) -> UnaryConf {
    UnaryConf {
        close: Some('}'),
        empty: true,
        sub_rules: Some(sub_rules),
        multi: MultiConf {
            separators: ",",
            trailing: true,
            types: Some(is_object_pattern_member),
            ..MultiConf::default()
        },
        ..UnaryConf::new(build_object_pattern)
    }
}

/// `[...]` / `{...}` patterns for assignment targets.
fn destructuring_rule() -> UnaryOperatorRule {
    UnaryOperatorRule::new(vec![
        ("[", array_pattern_conf(ARRAY_PATTERN)),
        ("{", object_pattern_conf(OBJECT_PATTERN)),
    ])
}

/// `[...]` / `{...}` patterns for binding positions (arrow parameters):
/// member expressions are not valid targets there.
fn destructuring_bind_rule() -> UnaryOperatorRule {
    UnaryOperatorRule::new(vec![
        ("[", array_pattern_conf(ARRAY_BIND)),
        ("{", object_pattern_conf(OBJECT_BIND)),
    ])
}

/// Key-typed object-pattern property (`key : target`), with the target
/// branch differing between assignment and binding patterns.
fn property_with_target(target: &'static str) -> Vec<RuleSlot> {
    let mut slots = vec![
        RuleSlot::rule(BinaryOperatorRule::must(vec![(
            ":",
            BinaryConf {
                sub_rules: Some(target),
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
    slots.push(RuleSlot::rule(StringRule::new(StringConf::default())));
    slots.push(RuleSlot::alias(PROPERTY));
    slots
}

/// Build the ES6 rule table.
pub fn es6_rules(opts: &GrammarOpts) -> RuleSet {
    let mut rules = es5_rules(opts);

    rules.insert(
        BIND_ELEM,
        vec![
            RuleSlot::rule(rest_rule()),
            RuleSlot::rule(default_rule()),
            RuleSlot::rule(destructuring_bind_rule()),
            RuleSlot::alias(PROPERTY),
        ],
    );

    rules.insert(
        DESTRUCTURING,
        vec![
            RuleSlot::rule(BinaryOperatorRule::must(vec![(
                "=",
                BinaryConf {
                    sub_rules: Some(NOCOMMA),
                    rasoc: true,
                    ..BinaryConf::new(build_assign)
                },
            )])),
            RuleSlot::rule(destructuring_rule()),
        ],
    );

    rules.insert(
        OBJECT_PATTERN,
        vec![
            RuleSlot::rule(rest_rule()),
            RuleSlot::rule(TryBranchRule::new(PROPERTY_WITH_TARGET)),
            RuleSlot::rule(default_rule()),
            RuleSlot::alias(PROPERTY),
        ],
    );
    rules.insert(
        OBJECT_BIND,
        vec![
            RuleSlot::rule(rest_rule()),
            RuleSlot::rule(TryBranchRule::new(PROPERTY_WITH_TARGET_BIND)),
            RuleSlot::rule(default_rule()),
            RuleSlot::alias(PROPERTY),
        ],
    );

    rules.insert(PROPERTY_WITH_TARGET, property_with_target(PROPERTY_TARGET));
    rules.insert(
        PROPERTY_TARGET,
        vec![
            RuleSlot::rule(default_rule()),
            RuleSlot::rule(destructuring_rule()),
            RuleSlot::rule(member_rule()),
            RuleSlot::alias(PROPERTY),
        ],
    );

    rules.insert(
        PROPERTY_WITH_TARGET_BIND,
        property_with_target(PROPERTY_TARGET_BIND),
    );
    rules.insert(
        PROPERTY_TARGET_BIND,
        vec![
            RuleSlot::rule(default_rule()),
            RuleSlot::rule(destructuring_bind_rule()),
            RuleSlot::alias(PROPERTY),
        ],
    );

    rules.insert(
        ARRAY_PATTERN,
        vec![
            RuleSlot::rule(rest_rule()),
            RuleSlot::rule(default_rule()),
            RuleSlot::rule(member_rule()),
            RuleSlot::rule(destructuring_rule()),
            RuleSlot::alias(PROPERTY),
        ],
    );
    rules.insert(
        ARRAY_BIND,
        vec![
            RuleSlot::rule(rest_rule()),
            RuleSlot::rule(default_rule()),
            RuleSlot::rule(destructuring_bind_rule()),
            RuleSlot::alias(PROPERTY),
        ],
    );

    rules.insert(
        ARROW,
        vec![
            RuleSlot::rule(BinaryOperatorRule::must(vec![(
                "=>",
                BinaryConf {
                    sub_rules: Some(NOCOMMA),
                    rasoc: true,
                    ..BinaryConf::new(build_arrow)
                },
            )])),
            RuleSlot::rule(UnaryOperatorRule::new(vec![(
                "(",
                UnaryConf {
                    close: Some(')'),
                    empty: true,
                    sub_rules: Some(BIND_ELEM),
                    multi: MultiConf {
                        separators: ",",
                        trailing: true,
                        ..MultiConf::default()
                    },
                    ..UnaryConf::new(build_params)
                },
            )])),
            RuleSlot::alias(PROPERTY),
        ],
    );

    // arrow function expressions
    rules.insert_slot(NOCOMMA, 1, RuleSlot::rule(TryBranchRule::new(ARROW)));
    // destructuring assignment
    rules.insert_slot(
        NOCOMMA,
        0,
        RuleSlot::rule(TryBranchRule::with_test(DESTRUCTURING, "[{")),
    );

    rules
}

/// Build an ES6 parser.
pub fn es6_parser(options: PresetOptions) -> Parser {
    let opts = GrammarOpts::from_preset(&options);
    let start = if options.statement { STATEMENT } else { EXPRESSION };
    Parser::new(es6_rules(&opts), start, parser_options(&options))
}
