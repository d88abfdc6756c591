//! Schema and property decoders

use crate::error::DecodeResult;
use crate::fields::{self, child};
use crate::types::{Property, SchemaObject, TYPE_SEPARATOR};
use serde_json::Value;
use tracing::debug;

/// Decodes generic JSON nodes into [`SchemaObject`] and [`Property`] values
pub struct SchemaParser;

impl Default for SchemaParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaParser {
    pub fn new() -> Self {
        Self
    }

    /// Decode a schema node.
    ///
    /// `$ref` does not stop sibling keys from being read. When the node has
    /// `items`, the element `$ref`/`type` replace the schema's own.
    pub fn decode_schema(&self, node: &Value, location: &str) -> DecodeResult<SchemaObject> {
        fields::as_mapping(node, location)?;

        let mut schema = SchemaObject {
            schema_type: fields::string(node, "type", location)?.unwrap_or_default(),
            format: fields::string(node, "format", location)?,
            reference: fields::string(node, "$ref", location)?,
            xml: fields::opaque(node, "xml"),
            required: fields::string_list(node, "required", location)?,
            ..Default::default()
        };

        if let Some(properties) = node.get("properties") {
            let properties_location = child(location, "properties");
            let entries = fields::as_mapping(properties, &properties_location)?;
            schema.properties = entries
                .iter()
                .map(|(name, value)| {
                    self.decode_property(name, value, &child(&properties_location, name))
                })
                .collect::<DecodeResult<Vec<_>>>()?;
        }

        if let Some(items) = node.get("items") {
            let items_location = child(location, "items");
            fields::as_mapping(items, &items_location)?;

            if let Some(name) = fields::string(items, "name", &items_location)? {
                schema.item_name = Some(name);
            }
            if let Some(reference) = fields::string(items, "$ref", &items_location)? {
                schema.reference = Some(reference);
            }
            if let Some(element_type) = fields::string(items, "type", &items_location)? {
                schema.schema_type = element_type;
            }
        }

        debug!(
            "Decoded schema at {}: {} properties",
            location,
            schema.properties.len()
        );
        Ok(schema)
    }

    /// Decode one entry of a `properties` map.
    ///
    /// The map key always wins over any `name` inside the node. For arrays,
    /// `items.$ref` replaces `ref` and `items.type` is appended to `type`.
    pub fn decode_property(
        &self,
        name: &str,
        node: &Value,
        location: &str,
    ) -> DecodeResult<Property> {
        fields::as_mapping(node, location)?;

        let mut property = Property {
            name: name.to_string(),
            property_type: fields::string(node, "type", location)?.unwrap_or_default(),
            reference: fields::string(node, "$ref", location)?,
            format: fields::string(node, "format", location)?,
            description: fields::string(node, "description", location)?,
            enum_values: fields::scalar_list(node, "enum", location)?,
            // Nested object schemas carry a `required` list here; only the flag form counts
            required: node.get("required").and_then(Value::as_bool).unwrap_or(false),
            default_value: fields::opaque(node, "default"),
            example: fields::opaque(node, "example"),
            minimum: fields::number(node, "minimum", location)?,
            maximum: fields::number(node, "maximum", location)?,
            min_length: fields::unsigned(node, "minLength", location)?,
            max_length: fields::unsigned(node, "maxLength", location)?,
            pattern: fields::string(node, "pattern", location)?,
            read_only: fields::boolean(node, "readOnly", location)?,
            write_only: fields::boolean(node, "writeOnly", location)?,
            deprecated: fields::boolean(node, "deprecated", location)?,
            properties: Vec::new(),
        };

        if let Some(items) = node.get("items") {
            let items_location = child(location, "items");
            fields::as_mapping(items, &items_location)?;

            property.reference = fields::string(items, "$ref", &items_location)?;
            if let Some(element_type) = fields::string(items, "type", &items_location)? {
                property.property_type.push(TYPE_SEPARATOR);
                property.property_type.push_str(&element_type);
            }
        }

        Ok(property)
    }
}
