//! ESTree JSON serialization.
//!
//! Hand-written so the output matches the reference wire format exactly:
//! the `type` tag comes first, constant ESTree fields (`kind`, `method`,
//! `id`, `generator`, ...) are materialized, sparse slots serialize as
//! `null`, and dialect-optional fields (`optional`, `shortCircuited`,
//! `directive`, `regex`, `range`) are omitted when absent.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::node::{LiteralValue, Node, NodeKind};

impl Serialize for LiteralValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LiteralValue::Null => serializer.serialize_unit(),
            LiteralValue::Bool(b) => serializer.serialize_bool(*b),
            LiteralValue::Number(n) => {
                // Integral doubles print without a decimal point, as in the
                // reference JSON output.
                if n.fract() == 0.0 && n.is_finite() && n.abs() < 9.007_199_254_740_992e15 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            LiteralValue::Str(s) => serializer.serialize_str(s),
            // The reference serializes host regex objects as `{}`.
            LiteralValue::Regex => {
                let map = serializer.serialize_map(Some(0))?;
                map.end()
            }
        }
    }
}

struct TemplateValue<'a> {
    cooked: &'a str,
    raw: &'a str,
}

impl Serialize for TemplateValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("cooked", self.cooked)?;
        map.serialize_entry("raw", self.raw)?;
        map.end()
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", self.type_name())?;

        match &self.kind {
            NodeKind::Program { body } => {
                map.serialize_entry("body", body)?;
                map.serialize_entry("sourceType", "script")?;
            }
            NodeKind::ExpressionStatement {
                expression,
                directive,
            } => {
                map.serialize_entry("expression", expression)?;
                if let Some(directive) = directive {
                    map.serialize_entry("directive", directive)?;
                }
            }
            NodeKind::EmptyStatement | NodeKind::ThisExpression => {}
            NodeKind::Compound { body } => {
                map.serialize_entry("body", body)?;
            }
            NodeKind::Identifier { name } => {
                map.serialize_entry("name", name)?;
            }
            NodeKind::Literal { value, raw, regex } => {
                map.serialize_entry("value", value)?;
                map.serialize_entry("raw", raw)?;
                if let Some(regex) = regex {
                    map.serialize_entry(
                        "regex",
                        &serde_fields::Regex {
                            pattern: &regex.pattern,
                            flags: &regex.flags,
                        },
                    )?;
                }
            }
            NodeKind::ArrayExpression { elements } => {
                map.serialize_entry("elements", elements)?;
            }
            NodeKind::ObjectExpression { properties } => {
                map.serialize_entry("properties", properties)?;
            }
            NodeKind::Property {
                key,
                value,
                shorthand,
                computed,
            } => {
                map.serialize_entry("key", key)?;
                map.serialize_entry("value", value)?;
                map.serialize_entry("kind", "init")?;
                map.serialize_entry("method", &false)?;
                map.serialize_entry("shorthand", shorthand)?;
                map.serialize_entry("computed", computed)?;
            }
            NodeKind::SpreadElement { argument } | NodeKind::RestElement { argument } => {
                map.serialize_entry("argument", argument)?;
            }
            NodeKind::TemplateLiteral {
                quasis,
                expressions,
            } => {
                map.serialize_entry("quasis", quasis)?;
                map.serialize_entry("expressions", expressions)?;
            }
            NodeKind::TemplateElement { cooked, raw, tail } => {
                map.serialize_entry("value", &TemplateValue { cooked, raw })?;
                map.serialize_entry("tail", tail)?;
            }
            NodeKind::SequenceExpression { expressions } => {
                map.serialize_entry("expressions", expressions)?;
            }
            NodeKind::UnaryExpression { operator, argument } => {
                map.serialize_entry("operator", operator)?;
                map.serialize_entry("argument", argument)?;
                map.serialize_entry("prefix", &true)?;
            }
            NodeKind::UpdateExpression {
                operator,
                argument,
                prefix,
            } => {
                map.serialize_entry("operator", operator)?;
                map.serialize_entry("argument", argument)?;
                map.serialize_entry("prefix", prefix)?;
            }
            NodeKind::BinaryExpression {
                operator,
                left,
                right,
            }
            | NodeKind::LogicalExpression {
                operator,
                left,
                right,
            }
            | NodeKind::AssignmentExpression {
                operator,
                left,
                right,
            } => {
                map.serialize_entry("operator", operator)?;
                map.serialize_entry("left", left)?;
                map.serialize_entry("right", right)?;
            }
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => {
                map.serialize_entry("test", test)?;
                map.serialize_entry("consequent", consequent)?;
                map.serialize_entry("alternate", alternate)?;
            }
            NodeKind::MemberExpression {
                object,
                property,
                computed,
                optional,
                short_circuited,
            } => {
                map.serialize_entry("object", object)?;
                map.serialize_entry("property", property)?;
                map.serialize_entry("computed", computed)?;
                if let Some(optional) = optional {
                    map.serialize_entry("optional", optional)?;
                }
                if let Some(sc) = short_circuited {
                    map.serialize_entry("shortCircuited", sc)?;
                }
            }
            NodeKind::CallExpression {
                callee,
                arguments,
                optional,
                short_circuited,
            } => {
                map.serialize_entry("callee", callee)?;
                map.serialize_entry("arguments", arguments)?;
                if let Some(optional) = optional {
                    map.serialize_entry("optional", optional)?;
                }
                if let Some(sc) = short_circuited {
                    map.serialize_entry("shortCircuited", sc)?;
                }
            }
            NodeKind::NewExpression { callee, arguments } => {
                map.serialize_entry("callee", callee)?;
                map.serialize_entry("arguments", arguments)?;
            }
            NodeKind::TaggedTemplateExpression {
                tag,
                quasi,
                optional,
                short_circuited,
            } => {
                map.serialize_entry("tag", tag)?;
                map.serialize_entry("quasi", quasi)?;
                if let Some(optional) = optional {
                    map.serialize_entry("optional", optional)?;
                }
                if let Some(sc) = short_circuited {
                    map.serialize_entry("shortCircuited", sc)?;
                }
            }
            NodeKind::ArrowFunctionExpression { params, body } => {
                map.serialize_entry("params", params)?;
                map.serialize_entry("body", body)?;
                map.serialize_entry("id", &())?;
                map.serialize_entry("generator", &false)?;
                map.serialize_entry("expression", &true)?;
                map.serialize_entry("async", &false)?;
            }
            NodeKind::ArrayPattern { elements } => {
                map.serialize_entry("elements", elements)?;
            }
            NodeKind::ObjectPattern { properties } => {
                map.serialize_entry("properties", properties)?;
            }
            NodeKind::AssignmentPattern { left, right } => {
                map.serialize_entry("left", left)?;
                map.serialize_entry("right", right)?;
            }
            NodeKind::ParamList { params } => {
                map.serialize_entry("params", params)?;
            }
            NodeKind::ComputedKey { argument } => {
                map.serialize_entry("argument", argument)?;
            }
        }

        if let Some(range) = self.range {
            map.serialize_entry("range", &[range.pos, range.end])?;
        }
        map.end()
    }
}

mod serde_fields {
    use serde::ser::{Serialize, SerializeMap, Serializer};

    pub struct Regex<'a> {
        pub pattern: &'a str,
        pub flags: &'a str,
    }

    impl Serialize for Regex<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(2))?;
            map.serialize_entry("pattern", self.pattern)?;
            map.serialize_entry("flags", self.flags)?;
            map.end()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::RegexLiteral;
    use jsexpr_core::text::TextRange;

    fn ident(name: &str) -> Node {
        Node::new(NodeKind::Identifier {
            name: name.to_string(),
        })
    }

    #[test]
    fn test_serialize_binary() {
        let node = Node::new(NodeKind::BinaryExpression {
            operator: "+".to_string(),
            left: Box::new(ident("a")),
            right: Box::new(ident("b")),
        });
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "BinaryExpression",
                "operator": "+",
                "left": {"type": "Identifier", "name": "a"},
                "right": {"type": "Identifier", "name": "b"},
            })
        );
    }

    #[test]
    fn test_serialize_sparse_elements_and_range() {
        let node = Node::with_range(
            NodeKind::ArrayExpression {
                elements: vec![None, Some(ident("a"))],
            },
            TextRange::new(0, 5),
        );
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["elements"][0], serde_json::Value::Null);
        assert_eq!(json["range"], serde_json::json!([0, 5]));
    }

    #[test]
    fn test_serialize_integral_number_without_point() {
        let node = Node::new(NodeKind::Literal {
            value: LiteralValue::Number(42.0),
            raw: "42".to_string(),
            regex: None,
        });
        assert_eq!(serde_json::to_string(&node).unwrap().contains("42.0"), false);
    }

    #[test]
    fn test_serialize_regex_literal() {
        let node = Node::new(NodeKind::Literal {
            value: LiteralValue::Regex,
            raw: "/ab/i".to_string(),
            regex: Some(RegexLiteral {
                pattern: "ab".to_string(),
                flags: "i".to_string(),
            }),
        });
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["value"], serde_json::json!({}));
        assert_eq!(json["regex"]["pattern"], "ab");
    }
}
