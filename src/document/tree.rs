//! Raw text to generic document tree

use crate::{SwaggerError, SwaggerResult};
use serde_json::{Map, Number, Value};

/// Parse raw document text into a generic tree.
///
/// JSON is tried first; YAML is the fallback.
pub fn parse_tree(raw: &str) -> SwaggerResult<Value> {
    match serde_json::from_str::<Value>(raw) {
        Ok(tree) => Ok(tree),
        Err(json_error) => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(raw).map_err(|yaml_error| {
                SwaggerError::Parse(format!(
                    "document is neither JSON ({json_error}) nor YAML ({yaml_error})"
                ))
            })?;
            yaml_to_json(yaml)
        }
    }
}

/// Convert a YAML tree into the JSON tree shape, stringifying scalar keys
/// such as unquoted response codes.
fn yaml_to_json(value: serde_yaml::Value) -> SwaggerResult<Value> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<SwaggerResult<Vec<_>>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut object = Map::new();
            for (key, value) in mapping {
                let key = match key {
                    Yaml::String(s) => s,
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(b) => b.to_string(),
                    other => {
                        return Err(SwaggerError::Parse(format!(
                            "unsupported YAML mapping key: {other:?}"
                        )))
                    }
                };
                object.insert(key, yaml_to_json(value)?);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_input() {
        let tree = parse_tree(r#"{"swagger": "2.0", "host": "example.com"}"#).unwrap();
        assert_eq!(tree, json!({"swagger": "2.0", "host": "example.com"}));
    }

    #[test]
    fn test_yaml_input_with_numeric_keys() {
        let tree = parse_tree(
            r#"
swagger: "2.0"
responses:
  200:
    description: OK
"#,
        )
        .unwrap();
        assert_eq!(tree["swagger"], json!("2.0"));
        assert_eq!(tree["responses"]["200"]["description"], json!("OK"));
    }

    #[test]
    fn test_key_order_is_preserved() {
        let tree = parse_tree(r#"{"b": 1, "a": 2, "c": 3}"#).unwrap();
        let keys: Vec<_> = tree.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        let err = parse_tree("{ this is: [not valid").unwrap_err();
        assert!(matches!(err, SwaggerError::Parse(_)));
    }
}
