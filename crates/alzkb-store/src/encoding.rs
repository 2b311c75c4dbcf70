//! Attribute encoding
//!
//! Scalars map directly to JSON scalars. Composite values (lists, maps) are
//! written as JSON *text* so every attribute in the document stays a flat
//! scalar. The free-text node fields `name` and `description` are the
//! exception: lists there are joined with `"; "` into plain prose.

use alzkb_domain::{Properties, PropertyValue};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// Node attributes flattened to prose instead of encoded
pub const FLATTENED_TEXT_FIELDS: [&str; 2] = ["name", "description"];

/// Separator used when flattening multi-valued text fields
pub const FLATTEN_SEPARATOR: &str = "; ";

/// Structured JSON form of a value (no text encoding)
fn to_json(value: &PropertyValue) -> Value {
    match value {
        PropertyValue::Null => Value::Null,
        PropertyValue::Bool(b) => Value::Bool(*b),
        PropertyValue::Integer(i) => Value::Number((*i).into()),
        PropertyValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        PropertyValue::Text(s) => Value::String(s.clone()),
        PropertyValue::List(items) => Value::Array(items.iter().map(to_json).collect()),
        PropertyValue::Map(entries) => Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), to_json(v)))
                .collect::<Map<String, Value>>(),
        ),
    }
}

/// Inverse of [`to_json`]
fn from_json(value: &Value) -> PropertyValue {
    match value {
        Value::Null => PropertyValue::Null,
        Value::Bool(b) => PropertyValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => PropertyValue::Integer(i),
            None => PropertyValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => PropertyValue::Text(s.clone()),
        Value::Array(items) => PropertyValue::List(items.iter().map(from_json).collect()),
        Value::Object(entries) => PropertyValue::Map(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), from_json(v)))
                .collect::<BTreeMap<_, _>>(),
        ),
    }
}

/// Prose rendering of a single list item
fn plain_text(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Text(s) => s.clone(),
        PropertyValue::Null => String::new(),
        PropertyValue::Bool(b) => b.to_string(),
        PropertyValue::Integer(i) => i.to_string(),
        PropertyValue::Float(f) => f.to_string(),
        composite => to_json(composite).to_string(),
    }
}

/// Encode one attribute for storage
pub fn encode_value(value: &PropertyValue) -> Value {
    if value.is_composite() {
        Value::String(to_json(value).to_string())
    } else {
        to_json(value)
    }
}

/// Decode one stored attribute
///
/// Strings that look like encoded composites (leading `[` or `{`) are
/// parsed back; anything that fails to parse stays plain text.
pub fn decode_value(value: &Value) -> PropertyValue {
    if let Value::String(s) = value {
        let trimmed = s.trim_start();
        if trimmed.starts_with('[') || trimmed.starts_with('{') {
            if let Ok(parsed) = serde_json::from_str::<Value>(s) {
                return from_json(&parsed);
            }
        }
    }
    from_json(value)
}

/// Encode edge or graph attributes
pub fn encode_properties(properties: &Properties) -> BTreeMap<String, Value> {
    properties
        .iter()
        .map(|(k, v)| (k.clone(), encode_value(v)))
        .collect()
}

/// Encode node attributes, flattening the free-text fields
pub fn encode_node_properties(properties: &Properties) -> BTreeMap<String, Value> {
    properties
        .iter()
        .map(|(k, v)| {
            let encoded = match v {
                PropertyValue::List(items) if FLATTENED_TEXT_FIELDS.contains(&k.as_str()) => {
                    Value::String(
                        items
                            .iter()
                            .map(plain_text)
                            .collect::<Vec<_>>()
                            .join(FLATTEN_SEPARATOR),
                    )
                }
                other => encode_value(other),
            };
            (k.clone(), encoded)
        })
        .collect()
}

/// Decode stored attributes
pub fn decode_properties(stored: &BTreeMap<String, Value>) -> Properties {
    stored
        .iter()
        .map(|(k, v)| (k.clone(), decode_value(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(encode_value(&PropertyValue::Float(1e-300)), Value::from(1e-300));
        assert_eq!(encode_value(&PropertyValue::Integer(42)), Value::from(42));
        assert_eq!(encode_value(&PropertyValue::from("rs429358-C")), Value::from("rs429358-C"));
    }

    #[test]
    fn test_composites_become_json_text() {
        let list = PropertyValue::from(vec!["a", "b"]);
        assert_eq!(encode_value(&list), Value::from(r#"["a","b"]"#));

        let mut map = BTreeMap::new();
        map.insert("gq".to_string(), PropertyValue::Integer(99));
        assert_eq!(encode_value(&PropertyValue::Map(map)), Value::from(r#"{"gq":99}"#));
    }

    #[test]
    fn test_decode_restores_composites() {
        let list = PropertyValue::List(vec![PropertyValue::Float(0.5), PropertyValue::from("x")]);
        assert_eq!(decode_value(&encode_value(&list)), list);
    }

    #[test]
    fn test_decode_failure_stays_text() {
        let broken = Value::from("[not json");
        assert_eq!(decode_value(&broken), PropertyValue::from("[not json"));
    }

    #[test]
    fn test_node_text_fields_are_flattened() {
        let mut props = Properties::new();
        props.insert("name".into(), PropertyValue::from(vec!["APOE", "Apolipoprotein E"]));
        props.insert("synonyms".into(), PropertyValue::from(vec!["AD2"]));

        let encoded = encode_node_properties(&props);
        assert_eq!(encoded["name"], Value::from("APOE; Apolipoprotein E"));
        assert_eq!(encoded["synonyms"], Value::from(r#"["AD2"]"#));
    }

    #[test]
    fn test_edge_text_fields_are_not_flattened() {
        let mut props = Properties::new();
        props.insert("name".into(), PropertyValue::from(vec!["a", "b"]));
        assert_eq!(encode_properties(&props)["name"], Value::from(r#"["a","b"]"#));
    }
}
