//! Element tree ↔ JSON value projection.
//!
//! Opaque document sections (root parts, collections, applications,
//! includes, domain element fields) are carried through the backup as JSON.
//! The projection is compact: a text-only child becomes a plain string, a
//! repeated child name becomes an array, and attributes or mixed content
//! fall back to the reserved `_attributes` / `_text` keys.

use crate::tree::XmlNode;
use serde_json::{Map, Value};

/// Reserved key for attribute bags in the JSON projection.
pub const ATTRIBUTES_KEY: &str = "_attributes";
/// Reserved key for text content in the JSON projection.
pub const TEXT_KEY: &str = "_text";

/// Project an element into a JSON value.
///
/// A node with neither attributes nor children collapses to its text as a
/// plain string (empty when absent). Anything richer becomes an object.
#[must_use]
pub fn node_to_value(node: &XmlNode) -> Value {
    if node.attributes.is_empty() && node.children.is_empty() {
        return Value::String(node.text().unwrap_or_default().to_string());
    }

    let mut map = Map::new();

    if !node.attributes.is_empty() {
        let attrs: Map<String, Value> = node
            .attributes
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        map.insert(ATTRIBUTES_KEY.to_string(), Value::Object(attrs));
    }

    if let Some(text) = node.text() {
        map.insert(TEXT_KEY.to_string(), Value::String(text.to_string()));
    }

    for child in &node.children {
        let value = node_to_value(child);
        match map.get_mut(&child.name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                map.insert(child.name.clone(), value);
            }
        }
    }

    Value::Object(map)
}

/// Rebuild an element from its JSON projection.
///
/// Inverse of [`node_to_value`] for values that projection produces.
/// Scalars other than strings are rendered as their JSON text so that a
/// hand-edited backup still restores.
#[must_use]
pub fn node_from_value(name: &str, value: &Value) -> XmlNode {
    let mut node = XmlNode::new(name);

    match value {
        Value::String(text) => {
            if !text.is_empty() {
                node.text = Some(text.clone());
            }
        }
        Value::Object(map) => {
            for (key, entry) in map {
                match key.as_str() {
                    ATTRIBUTES_KEY => {
                        if let Value::Object(attrs) = entry {
                            for (attr_key, attr_value) in attrs {
                                node.attributes
                                    .push((attr_key.clone(), scalar_text(attr_value)));
                            }
                        }
                    }
                    TEXT_KEY => {
                        node.text = Some(scalar_text(entry));
                    }
                    _ => match entry {
                        Value::Array(items) => {
                            for item in items {
                                node.children.push(node_from_value(key, item));
                            }
                        }
                        _ => node.children.push(node_from_value(key, entry)),
                    },
                }
            }
        }
        Value::Null => {}
        other => {
            node.text = Some(scalar_text(other));
        }
    }

    node
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree;
    use serde_json::json;

    #[test]
    fn text_only_child_collapses_to_string() {
        let root = tree::parse("<element><name>Red</name><hex>F00</hex></element>").unwrap();
        let value = node_to_value(&root);
        assert_eq!(value, json!({"name": "Red", "hex": "F00"}));
    }

    #[test]
    fn repeated_children_become_array() {
        let root = tree::parse("<includes><module>a</module><module>b</module></includes>").unwrap();
        let value = node_to_value(&root);
        assert_eq!(value, json!({"module": ["a", "b"]}));
    }

    #[test]
    fn attributes_and_text_use_reserved_keys() {
        let root = tree::parse(r#"<part rev="3">engine</part>"#).unwrap();
        let value = node_to_value(&root);
        assert_eq!(value, json!({"_attributes": {"rev": "3"}, "_text": "engine"}));
    }

    #[test]
    fn projection_roundtrip() {
        let xml = r#"
            <root-parts>
               <part rev="3">engine</part>
               <part rev="4">chassis</part>
               <meta>
                  <owner>plant</owner>
               </meta>
            </root-parts>"#;
        let root = tree::parse(xml).unwrap();
        let value = node_to_value(&root);
        let rebuilt = node_from_value("root-parts", &value);
        assert_eq!(rebuilt, root);
    }

    #[test]
    fn empty_element_roundtrips_as_empty_string() {
        let root = tree::parse("<root-parts><slot/></root-parts>").unwrap();
        let value = node_to_value(&root);
        assert_eq!(value, json!({"slot": ""}));

        let rebuilt = node_from_value("root-parts", &value);
        assert_eq!(rebuilt, root);
    }

    #[test]
    fn scalar_values_render_as_text() {
        let node = node_from_value("count", &json!(42));
        assert_eq!(node.text(), Some("42"));
    }
}
