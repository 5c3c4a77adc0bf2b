//! ES-next grammar: ES6 plus exponentiation, nullish coalescing,
//! optional chaining, object spread and trailing call commas.
//!
//! `**` lives in its own branch so the right operand re-enters it
//! (right associativity) and so a parenthesized left operand can be
//! accepted while a bare unary one is rejected. Optional chaining
//! replaces the member-level rule with variants that compute the
//! `optional`/`shortCircuited` flags from the left link; a parenthesized
//! base re-enters through a dedicated branch that resets the chain.

use crate::context::{RuleSet, RuleSlot};
use crate::parser::Parser;
use crate::rules::{
    BinaryConf, BinaryOperatorRule, TryBranchRule, UnaryConf, UnaryOperatorRule,
};

use super::consts::*;
use super::es6::es6_rules;
use super::{parser_options, GrammarOpts, PresetOptions};

fn grouping_rule() -> UnaryOperatorRule {
    UnaryOperatorRule::new(vec![("(", group_conf())])
}

fn exponent_conf(build: crate::rules::BinaryBuild) -> BinaryConf {
    BinaryConf {
        sub_rules: Some(EXPONENT),
        ..BinaryConf::new(build)
    }
}

/// The member-level rule with syntax-computed chain flags.
fn opt_chain_rule(opts: &GrammarOpts) -> BinaryOperatorRule {
    BinaryOperatorRule::new(vec![
        ("?.", member_dot_conf(build_member_dot_opt)),
        ("?.[", member_computed_conf(build_member_computed_opt)),
        ("?.(", call_conf(build_call_opt, opts.call_trailing_comma)),
        (".", member_dot_conf(build_member_dot_chain)),
        ("[", member_computed_conf(build_member_computed_chain)),
        ("(", call_conf(build_call_chain, opts.call_trailing_comma)),
        ("`", tagged_conf(build_tagged_chain)),
    ])
}

/// Mandatory chain continuation after a parenthesized base; the flags
/// reset because the parentheses close any previous optional chain.
fn paren_opt_chain_rule(opts: &GrammarOpts) -> BinaryOperatorRule {
    BinaryOperatorRule::must(vec![
        ("?.", member_dot_conf(build_member_dot_opt_paren)),
        ("?.[", member_computed_conf(build_member_computed_opt_paren)),
        (
            "?.(",
            call_conf(build_call_opt_paren, opts.call_trailing_comma),
        ),
        (".", member_dot_conf(build_member_dot_paren)),
        ("[", member_computed_conf(build_member_computed_paren)),
        ("(", call_conf(build_call_paren, opts.call_trailing_comma)),
        ("`", tagged_conf(build_tagged_chain)),
    ])
}

/// Build the ES-next rule table.
pub fn esnext_rules(opts: &GrammarOpts) -> RuleSet {
    // ES2017 allows trailing commas in call argument lists
    let opts = GrammarOpts {
        call_trailing_comma: true,
        ..opts.clone()
    };
    let mut rules = es6_rules(&opts);

    rules.insert(
        EXPONENT,
        vec![
            RuleSlot::rule(TryBranchRule::with_test(PAREN_EXPONENT, "(")),
            RuleSlot::rule(BinaryOperatorRule::new(vec![(
                "**",
                exponent_conf(build_exponent),
            )])),
            RuleSlot::alias(UNARY),
        ],
    );
    rules.insert(
        PAREN_EXPONENT,
        vec![
            RuleSlot::rule(BinaryOperatorRule::must(vec![(
                "**",
                exponent_conf(build_binary),
            )])),
            RuleSlot::rule(grouping_rule()),
        ],
    );

    rules.insert(
        NULLISH,
        vec![
            RuleSlot::rule(BinaryOperatorRule::must(vec![("??", plain(build_logical))])),
            RuleSlot::alias(BINARY),
        ],
    );

    rules.insert(
        PAREN_OPT_CHAIN,
        vec![
            RuleSlot::rule(paren_opt_chain_rule(&opts)),
            RuleSlot::rule(grouping_rule()),
        ],
    );

    // '**=' joins the assignment operators
    let assign_ops = [
        "=", "+=", "-=", "*=", "/=", "%=", ">>=", "<<=", ">>>=", "|=", "&=", "^=", "**=",
    ];
    rules.replace_slot(
        NOCOMMA,
        1,
        RuleSlot::rule(BinaryOperatorRule::new(
            assign_ops.iter().map(|op| (*op, assign_conf())).collect(),
        )),
    );

    // exponentiation slots in above unary
    rules.replace_last(BINARY, RuleSlot::alias(EXPONENT));

    // object spread
    rules.insert_slot(
        OBJECT,
        0,
        RuleSlot::rule(UnaryOperatorRule::new(vec![(
            "...",
            UnaryConf {
                is_pre: true,
                sub_rules: Some(NOCOMMA),
                ..UnaryConf::new(build_spread)
            },
        )])),
    );

    // nullish coalescing
    rules.insert_slot(LOGICAL, 0, RuleSlot::rule(TryBranchRule::new(NULLISH)));

    // optional chaining replaces the member-level rule
    rules.replace_slot(MEMBER, 0, RuleSlot::rule(opt_chain_rule(&opts)));
    rules.insert_slot(
        MEMBER,
        1,
        RuleSlot::rule(TryBranchRule::with_test(PAREN_OPT_CHAIN, "(")),
    );

    rules
}

/// Build an ES-next parser.
pub fn esnext_parser(options: PresetOptions) -> Parser {
    let opts = GrammarOpts::from_preset(&options);
    let start = if options.statement { STATEMENT } else { EXPRESSION };
    Parser::new(esnext_rules(&opts), start, parser_options(&options))
}
