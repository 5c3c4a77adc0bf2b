//! Branch labels, node predicates and node build functions shared by the
//! grammar presets.

use jsexpr_ast::{Node, NodeKind};
use jsexpr_diagnostics::messages;

use crate::rules::{BinaryConf, MultiConf, Operand, Sparse, UnaryConf};

// ============================================================================
// Branch labels
// ============================================================================

pub const STATEMENT: &str = "statement";
pub const EXPRESSION: &str = "expression";
pub const NOCOMMA: &str = "nocomma";
pub const LOGICAL: &str = "logical";
pub const BINARY: &str = "binary";
pub const UNARY: &str = "unary";
pub const UPDATE: &str = "update";
pub const MEMBER: &str = "member";
pub const NEW: &str = "new";
pub const TOKEN: &str = "token";
pub const PROPERTY: &str = "property";
pub const OBJECT: &str = "object";
pub const ARRAY: &str = "array";
pub const TEMPLATE: &str = "template";

// es6 additions
pub const BIND_ELEM: &str = "bind_elem";
pub const DESTRUCTURING: &str = "destructuring";
pub const OBJECT_PATTERN: &str = "object_pattern";
pub const ARRAY_PATTERN: &str = "array_pattern";
pub const OBJECT_BIND: &str = "object_bind";
pub const ARRAY_BIND: &str = "array_bind";
pub const PROPERTY_WITH_TARGET: &str = "property_with_target";
pub const PROPERTY_TARGET: &str = "property_target";
pub const PROPERTY_WITH_TARGET_BIND: &str = "property_with_target_bind";
pub const PROPERTY_TARGET_BIND: &str = "property_target_bind";
pub const ARROW: &str = "arrow";

// esnext additions
pub const EXPONENT: &str = "exponent";
pub const PAREN_EXPONENT: &str = "paren_exponent";
pub const NULLISH: &str = "nullish";
pub const PAREN_OPT_CHAIN: &str = "paren_opt_chain";

// ============================================================================
// Node predicates (element/operand restrictions)
// ============================================================================

pub fn is_assign_target(node: &Node) -> bool {
    matches!(
        node.kind,
        NodeKind::Identifier { .. } | NodeKind::MemberExpression { .. }
    )
}

pub fn is_object_member(node: &Node) -> bool {
    matches!(
        node.kind,
        NodeKind::Identifier { .. }
            | NodeKind::Property { .. }
            | NodeKind::SpreadElement { .. }
    )
}

pub fn is_object_pattern_member(node: &Node) -> bool {
    matches!(
        node.kind,
        NodeKind::Identifier { .. }
            | NodeKind::Property { .. }
            | NodeKind::RestElement { .. }
            | NodeKind::AssignmentPattern { .. }
    )
}

// ============================================================================
// Shared helpers
// ============================================================================

fn single(right: Operand) -> Result<Box<Node>, String> {
    right
        .into_single()
        .map(Box::new)
        .ok_or_else(|| messages::EXPRESSION_EXPECTED.to_string())
}

fn chain_flags(node: &Node) -> bool {
    node.is_optional_link() || node.is_short_circuited_link()
}

fn rest_must_be_last<'a, I>(elements: I) -> Result<(), String>
where
    I: ExactSizeIterator<Item = Option<&'a Node>>,
{
    let len = elements.len();
    for (i, element) in elements.enumerate() {
        if let Some(node) = element {
            if matches!(node.kind, NodeKind::RestElement { .. }) && i != len - 1 {
                return Err(messages::REST_MUST_BE_LAST.to_string());
            }
        }
    }
    Ok(())
}

/// Wrap a bare identifier as a shorthand `Property`, keeping its range.
fn shorthand_property(node: Node) -> Node {
    let range = node.range;
    Node {
        kind: NodeKind::Property {
            key: Box::new(node.clone()),
            value: Box::new(node),
            shorthand: true,
            computed: false,
        },
        range,
    }
}

// ============================================================================
// Binary builds
// ============================================================================

pub fn build_binary(op: &str, left: Node, right: Operand) -> Result<Node, String> {
    Ok(Node::new(NodeKind::BinaryExpression {
        operator: op.to_string(),
        left: Box::new(left),
        right: single(right)?,
    }))
}

pub fn build_logical(op: &str, left: Node, right: Operand) -> Result<Node, String> {
    Ok(Node::new(NodeKind::LogicalExpression {
        operator: op.to_string(),
        left: Box::new(left),
        right: single(right)?,
    }))
}

pub fn build_assign(op: &str, left: Node, right: Operand) -> Result<Node, String> {
    Ok(Node::new(NodeKind::AssignmentExpression {
        operator: op.to_string(),
        left: Box::new(left),
        right: single(right)?,
    }))
}

pub fn build_assign_pattern(_op: &str, left: Node, right: Operand) -> Result<Node, String> {
    Ok(Node::new(NodeKind::AssignmentPattern {
        left: Box::new(left),
        right: single(right)?,
    }))
}

/// `**` with the static restriction on a bare unary left operand.
pub fn build_exponent(op: &str, left: Node, right: Operand) -> Result<Node, String> {
    if matches!(left.kind, NodeKind::UnaryExpression { .. }) {
        return Err(messages::UNARY_BEFORE_EXPONENTIATION.to_string());
    }
    build_binary(op, left, right)
}

pub fn build_member_dot(_op: &str, left: Node, right: Operand) -> Result<Node, String> {
    Ok(Node::new(NodeKind::MemberExpression {
        object: Box::new(left),
        property: single(right)?,
        computed: false,
        optional: None,
        short_circuited: None,
    }))
}

pub fn build_member_computed(_op: &str, left: Node, right: Operand) -> Result<Node, String> {
    Ok(Node::new(NodeKind::MemberExpression {
        object: Box::new(left),
        property: single(right)?,
        computed: true,
        optional: None,
        short_circuited: None,
    }))
}

pub fn build_call(_op: &str, left: Node, right: Operand) -> Result<Node, String> {
    Ok(Node::new(NodeKind::CallExpression {
        callee: Box::new(left),
        arguments: right.into_list(),
        optional: None,
        short_circuited: None,
    }))
}

pub fn build_tagged(_op: &str, left: Node, right: Operand) -> Result<Node, String> {
    Ok(Node::new(NodeKind::TaggedTemplateExpression {
        tag: Box::new(left),
        quasi: single(right)?,
        optional: None,
        short_circuited: None,
    }))
}

/// Object property from `key : value`; a `ComputedKey` marker on the key
/// makes the property computed.
pub fn build_property(_op: &str, left: Node, right: Operand) -> Result<Node, String> {
    let (key, computed) = match left.kind {
        NodeKind::ComputedKey { argument } => (*argument, true),
        _ => (left, false),
    };
    Ok(Node::new(NodeKind::Property {
        key: Box::new(key),
        value: single(right)?,
        shorthand: false,
        computed,
    }))
}

pub fn build_arrow(_op: &str, left: Node, right: Operand) -> Result<Node, String> {
    let params = match left.kind {
        NodeKind::ParamList { params } => params,
        _ => vec![left],
    };
    Ok(Node::new(NodeKind::ArrowFunctionExpression {
        params,
        body: single(right)?,
    }))
}

// ---- optional-chain builds (esnext): flags are computed purely from the
// syntax of the left link ----

fn chain_member(
    left: Node,
    right: Operand,
    computed: bool,
    optional: bool,
    short_circuited: bool,
) -> Result<Node, String> {
    Ok(Node::new(NodeKind::MemberExpression {
        object: Box::new(left),
        property: single(right)?,
        computed,
        optional: Some(optional),
        short_circuited: Some(short_circuited),
    }))
}

pub fn build_member_dot_chain(_op: &str, left: Node, right: Operand) -> Result<Node, String> {
    let sc = chain_flags(&left);
    chain_member(left, right, false, false, sc)
}

pub fn build_member_dot_opt(_op: &str, left: Node, right: Operand) -> Result<Node, String> {
    let sc = chain_flags(&left);
    chain_member(left, right, false, true, sc)
}

pub fn build_member_computed_chain(
    _op: &str,
    left: Node,
    right: Operand,
) -> Result<Node, String> {
    let sc = chain_flags(&left);
    chain_member(left, right, true, false, sc)
}

pub fn build_member_computed_opt(
    _op: &str,
    left: Node,
    right: Operand,
) -> Result<Node, String> {
    let sc = chain_flags(&left);
    chain_member(left, right, true, true, sc)
}

fn chain_call(
    left: Node,
    right: Operand,
    optional: bool,
    short_circuited: bool,
) -> Result<Node, String> {
    Ok(Node::new(NodeKind::CallExpression {
        callee: Box::new(left),
        arguments: right.into_list(),
        optional: Some(optional),
        short_circuited: Some(short_circuited),
    }))
}

pub fn build_call_chain(_op: &str, left: Node, right: Operand) -> Result<Node, String> {
    let sc = chain_flags(&left);
    chain_call(left, right, false, sc)
}

pub fn build_call_opt(_op: &str, left: Node, right: Operand) -> Result<Node, String> {
    let sc = chain_flags(&left);
    chain_call(left, right, true, sc)
}

pub fn build_tagged_chain(_op: &str, left: Node, right: Operand) -> Result<Node, String> {
    if chain_flags(&left) {
        return Err(messages::TAGGED_TEMPLATE_ON_CHAIN.to_string());
    }
    Ok(Node::new(NodeKind::TaggedTemplateExpression {
        tag: Box::new(left),
        quasi: single(right)?,
        optional: Some(false),
        short_circuited: Some(false),
    }))
}

// ---- parenthesized re-entry builds: a parenthesized base resets the
// short-circuit chain ----

pub fn build_member_dot_paren(_op: &str, left: Node, right: Operand) -> Result<Node, String> {
    chain_member(left, right, false, false, false)
}

pub fn build_member_dot_opt_paren(
    _op: &str,
    left: Node,
    right: Operand,
) -> Result<Node, String> {
    chain_member(left, right, false, true, false)
}

pub fn build_member_computed_paren(
    _op: &str,
    left: Node,
    right: Operand,
) -> Result<Node, String> {
    chain_member(left, right, true, false, false)
}

pub fn build_member_computed_opt_paren(
    _op: &str,
    left: Node,
    right: Operand,
) -> Result<Node, String> {
    chain_member(left, right, true, true, false)
}

pub fn build_call_paren(_op: &str, left: Node, right: Operand) -> Result<Node, String> {
    chain_call(left, right, false, false)
}

pub fn build_call_opt_paren(_op: &str, left: Node, right: Operand) -> Result<Node, String> {
    chain_call(left, right, true, false)
}

// ============================================================================
// Unary builds
// ============================================================================

pub fn build_unary(op: &str, argument: Operand) -> Result<Node, String> {
    let node = argument
        .into_single()
        .ok_or_else(|| messages::EXPRESSION_EXPECTED.to_string())?;
    Ok(Node::new(NodeKind::UnaryExpression {
        operator: op.to_string(),
        argument: Box::new(node),
    }))
}

fn update(op: &str, argument: Operand, prefix: bool) -> Result<Node, String> {
    let node = argument
        .into_single()
        .ok_or_else(|| messages::EXPRESSION_EXPECTED.to_string())?;
    Ok(Node::new(NodeKind::UpdateExpression {
        operator: op.to_string(),
        argument: Box::new(node),
        prefix,
    }))
}

pub fn build_update_prefix(op: &str, argument: Operand) -> Result<Node, String> {
    update(op, argument, true)
}

pub fn build_update_postfix(op: &str, argument: Operand) -> Result<Node, String> {
    update(op, argument, false)
}

pub fn build_spread(_op: &str, argument: Operand) -> Result<Node, String> {
    let node = argument
        .into_single()
        .ok_or_else(|| messages::EXPRESSION_EXPECTED.to_string())?;
    Ok(Node::new(NodeKind::SpreadElement {
        argument: Box::new(node),
    }))
}

pub fn build_rest(_op: &str, argument: Operand) -> Result<Node, String> {
    let node = argument
        .into_single()
        .ok_or_else(|| messages::EXPRESSION_EXPECTED.to_string())?;
    Ok(Node::new(NodeKind::RestElement {
        argument: Box::new(node),
    }))
}

/// Parenthesized grouping: the inner node passes through unchanged.
pub fn build_group(_op: &str, argument: Operand) -> Result<Node, String> {
    argument
        .into_single()
        .ok_or_else(|| messages::EXPRESSION_EXPECTED.to_string())
}

pub fn build_array(_op: &str, argument: Operand) -> Result<Node, String> {
    let elements = match argument {
        Operand::List(elements) => elements,
        Operand::Single(node) => vec![Some(node)],
    };
    Ok(Node::new(NodeKind::ArrayExpression { elements }))
}

/// Object literal; bare identifiers become shorthand properties.
pub fn build_object(_op: &str, argument: Operand) -> Result<Node, String> {
    let properties = match argument {
        Operand::List(elements) => elements,
        Operand::Single(node) => vec![Some(node)],
    };
    let properties = properties
        .into_iter()
        .flatten()
        .map(|node| match node.kind {
            NodeKind::Identifier { .. } => shorthand_property(node),
            _ => node,
        })
        .collect();
    Ok(Node::new(NodeKind::ObjectExpression { properties }))
}

/// `new` operand: an inner call contributes callee and arguments.
pub fn build_new(_op: &str, argument: Operand) -> Result<Node, String> {
    let node = argument
        .into_single()
        .ok_or_else(|| messages::EXPRESSION_EXPECTED.to_string())?;
    let kind = match node.kind {
        NodeKind::CallExpression {
            callee, arguments, ..
        } => NodeKind::NewExpression {
            callee,
            arguments,
        },
        other => NodeKind::NewExpression {
            callee: Box::new(Node {
                kind: other,
                range: node.range,
            }),
            arguments: Vec::new(),
        },
    };
    Ok(Node::new(kind))
}

/// Arrow parameter list (before `=>` is known).
pub fn build_params(_op: &str, argument: Operand) -> Result<Node, String> {
    let params: Vec<Node> = match argument {
        Operand::List(elements) => elements.into_iter().flatten().collect(),
        Operand::Single(node) => vec![node],
    };
    rest_must_be_last(params.iter().map(Some))?;
    Ok(Node::new(NodeKind::ParamList { params }))
}

pub fn build_array_pattern(_op: &str, argument: Operand) -> Result<Node, String> {
    let elements = match argument {
        Operand::List(elements) => elements,
        Operand::Single(node) => vec![Some(node)],
    };
    rest_must_be_last(elements.iter().map(Option::as_ref))?;
    Ok(Node::new(NodeKind::ArrayPattern { elements }))
}

/// Object pattern; bare identifiers and defaulted identifiers become
/// shorthand properties.
pub fn build_object_pattern(_op: &str, argument: Operand) -> Result<Node, String> {
    let raw = match argument {
        Operand::List(elements) => elements,
        Operand::Single(node) => vec![Some(node)],
    };
    let mut properties = Vec::with_capacity(raw.len());
    for node in raw.into_iter().flatten() {
        let wrapped = match &node.kind {
            NodeKind::Identifier { .. } => shorthand_property(node),
            NodeKind::AssignmentPattern { left, .. } => {
                if !matches!(left.kind, NodeKind::Identifier { .. }) {
                    return Err("Invalid property".to_string());
                }
                let key = (**left).clone();
                let range = node.range;
                Node {
                    kind: NodeKind::Property {
                        key: Box::new(key),
                        value: Box::new(node),
                        shorthand: true,
                        computed: false,
                    },
                    range,
                }
            }
            NodeKind::Property { .. } | NodeKind::RestElement { .. } => node,
            _ => return Err("Invalid property".to_string()),
        };
        properties.push(wrapped);
    }
    rest_must_be_last(properties.iter().map(Some))?;
    Ok(Node::new(NodeKind::ObjectPattern { properties }))
}

pub fn build_computed_key(_op: &str, argument: Operand) -> Result<Node, String> {
    let node = argument
        .into_single()
        .ok_or_else(|| messages::EXPRESSION_EXPECTED.to_string())?;
    Ok(Node::new(NodeKind::ComputedKey {
        argument: Box::new(node),
    }))
}

// ============================================================================
// Ternary / multi builds
// ============================================================================

pub fn build_conditional(test: Node, consequent: Node, alternate: Node) -> Node {
    Node::new(NodeKind::ConditionalExpression {
        test: Box::new(test),
        consequent: Box::new(consequent),
        alternate: Box::new(alternate),
    })
}

pub fn build_sequence(nodes: Vec<Option<Node>>) -> Result<Node, String> {
    Ok(Node::new(NodeKind::SequenceExpression {
        expressions: nodes.into_iter().flatten().collect(),
    }))
}

pub fn build_expression_statement(nodes: Vec<Option<Node>>) -> Result<Node, String> {
    let expression = nodes
        .into_iter()
        .flatten()
        .next()
        .ok_or_else(|| messages::EXPRESSION_EXPECTED.to_string())?;
    Ok(Node::new(NodeKind::ExpressionStatement {
        expression: Box::new(expression),
        directive: None,
    }))
}

/// Program body; the directive prologue (leading string-literal
/// statements) is tagged with the raw directive text.
pub fn build_program(nodes: Vec<Option<Node>>) -> Result<Node, String> {
    let mut body: Vec<Node> = nodes.into_iter().flatten().collect();
    for stmt in body.iter_mut() {
        let NodeKind::ExpressionStatement {
            expression,
            directive,
        } = &mut stmt.kind
        else {
            break;
        };
        if !expression.is_string_literal() {
            break;
        }
        if let NodeKind::Literal { raw, .. } = &expression.kind {
            *directive = Some(raw[1..raw.len() - 1].to_string());
        }
    }
    Ok(Node::new(NodeKind::Program { body }))
}

/// jsep-style compound: holes dropped, single expressions unwrapped.
pub fn build_compound(nodes: Vec<Option<Node>>) -> Result<Node, String> {
    let mut body: Vec<Node> = nodes.into_iter().flatten().collect();
    if body.len() == 1 {
        return Ok(body.pop().unwrap());
    }
    Ok(Node::new(NodeKind::Compound { body }))
}

// ============================================================================
// Shared conf constructors
// ============================================================================

/// Plain operator conf with no list behavior.
pub fn plain(build: crate::rules::BinaryBuild) -> BinaryConf {
    BinaryConf::new(build)
}

/// Word operator conf requiring trailing whitespace.
pub fn plain_sp(build: crate::rules::BinaryBuild) -> BinaryConf {
    BinaryConf {
        space: true,
        ..BinaryConf::new(build)
    }
}

/// Assignment conf: right-associative via full re-entry of the
/// no-comma branch, left side restricted by kind.
pub fn assign_conf() -> BinaryConf {
    BinaryConf {
        sub_rules: Some(NOCOMMA),
        rasoc: true,
        ltypes: Some(is_assign_target),
        ..BinaryConf::new(build_assign)
    }
}

/// `.` member conf (property names parsed by the reserved-word-free
/// property branch).
pub fn member_dot_conf(build: crate::rules::BinaryBuild) -> BinaryConf {
    BinaryConf {
        sub_rules: Some(PROPERTY),
        ..BinaryConf::new(build)
    }
}

/// `[expr]` computed member conf.
pub fn member_computed_conf(build: crate::rules::BinaryBuild) -> BinaryConf {
    BinaryConf {
        close: Some(']'),
        sub_rules: Some(EXPRESSION),
        ..BinaryConf::new(build)
    }
}

/// `(args)` call conf.
pub fn call_conf(build: crate::rules::BinaryBuild, trailing_comma: bool) -> BinaryConf {
    BinaryConf {
        close: Some(')'),
        empty: true,
        sub_rules: Some(NOCOMMA),
        multi: MultiConf {
            separators: ",",
            trailing: trailing_comma,
            ..MultiConf::default()
        },
        ..BinaryConf::new(build)
    }
}

/// `` `template` `` tagged-template conf.
pub fn tagged_conf(build: crate::rules::BinaryBuild) -> BinaryConf {
    BinaryConf {
        sub_rules: Some(TEMPLATE),
        ..BinaryConf::new(build)
    }
}

/// `(expr)` grouping conf.
pub fn group_conf() -> UnaryConf {
    UnaryConf {
        close: Some(')'),
        sub_rules: Some(EXPRESSION),
        ..UnaryConf::new(build_group)
    }
}

/// `[...]` array literal conf.
pub fn array_conf(sub_rules: &'static str) -> UnaryConf {
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
        ..UnaryConf::new(build_array)
    }
}

/// `{...}` object literal conf.
pub fn object_conf() -> UnaryConf {
    UnaryConf {
        close: Some('}'),
        empty: true,
        sub_rules: Some(OBJECT),
        multi: MultiConf {
            separators: ",",
            trailing: true,
            types: Some(is_object_member),
            ..MultiConf::default()
        },
        ..UnaryConf::new(build_object)
    }
}

/// Prefix unary operator conf.
pub fn unary_pre_conf(build: crate::rules::UnaryBuild) -> UnaryConf {
    UnaryConf {
        is_pre: true,
        ..UnaryConf::new(build)
    }
}

/// Prefix word operator conf (`typeof x`).
pub fn unary_pre_sp_conf(build: crate::rules::UnaryBuild) -> UnaryConf {
    UnaryConf {
        is_pre: true,
        space: true,
        ..UnaryConf::new(build)
    }
}
