//! Definition table: `definitions` (model name -> schema) flattened into schemas

use crate::{SwaggerError, SwaggerResult};
use serde_json::Value;
use swagger_schema::fields::{self, child};
use swagger_schema::{SchemaObject, SchemaParser};
use tracing::{debug, warn};

/// Builds the flat definition list from a `definitions` node
pub struct DefinitionTableBuilder<'a> {
    parser: &'a SchemaParser,
}

impl<'a> DefinitionTableBuilder<'a> {
    pub fn new(parser: &'a SchemaParser) -> Self {
        Self { parser }
    }

    /// Decode every definition in document order, stamping each with its
    /// registry key and, when `xml.name` is present, its display name.
    pub fn build(&self, definitions: &Value) -> SwaggerResult<Vec<SchemaObject>> {
        let entries = fields::as_mapping(definitions, "definitions")?;

        let table = entries
            .iter()
            .map(|(key, node)| -> SwaggerResult<SchemaObject> {
                let mut schema = self.parser.decode_schema(node, &child("definitions", key))?;
                schema.display_name = display_name(key, schema.xml.as_ref());
                schema.registry_key = key.clone();
                Ok(schema)
            })
            .collect::<SwaggerResult<Vec<_>>>()?;

        debug!("Built {} definitions", table.len());
        Ok(table)
    }
}

/// Pull `name` out of an `xml` block; a block without one is logged and ignored
fn display_name(key: &str, xml: Option<&Value>) -> Option<String> {
    let xml = xml?;
    match xml.get("name").and_then(Value::as_str) {
        Some(name) => Some(name.to_string()),
        None => {
            let err = SwaggerError::XmlMetadata {
                definition: key.to_string(),
            };
            warn!("{}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build(definitions: Value) -> SwaggerResult<Vec<SchemaObject>> {
        let parser = SchemaParser::new();
        DefinitionTableBuilder::new(&parser).build(&definitions)
    }

    #[test]
    fn test_registry_key_and_display_name() {
        let table = build(json!({
            "Category": {
                "type": "object",
                "properties": {"id": {"type": "integer"}},
                "xml": {"name": "CategoryXml"}
            },
            "Tag": {"type": "object"}
        }))
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table[0].registry_key, "Category");
        assert_eq!(table[0].display_name.as_deref(), Some("CategoryXml"));
        assert_eq!(table[1].registry_key, "Tag");
        assert_eq!(table[1].display_name, None);
    }

    #[test]
    fn test_xml_without_name_is_not_fatal() {
        let table = build(json!({
            "Order": {"type": "object", "xml": {"wrapped": true}},
            "Odd": {"type": "object", "xml": "not a mapping"}
        }))
        .unwrap();

        assert_eq!(table[0].display_name, None);
        assert_eq!(table[1].display_name, None);
        assert_eq!(table[0].registry_key, "Order");
    }

    #[test]
    fn test_registry_key_wins_over_items_name() {
        let table = build(json!({
            "Pets": {"type": "array", "items": {"name": "pet", "$ref": "#/definitions/Pet"}}
        }))
        .unwrap();

        assert_eq!(table[0].registry_key, "Pets");
        assert_eq!(table[0].item_name.as_deref(), Some("pet"));
    }

    #[test]
    fn test_definitions_must_be_mapping() {
        assert!(build(json!(["Pet"])).is_err());
        assert!(build(json!({"Pet": "object"})).is_err());
    }
}
