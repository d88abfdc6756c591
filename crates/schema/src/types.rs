//! Schema model types

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;

/// Separator between container and element type in [`Property::property_type`]
pub const TYPE_SEPARATOR: char = '/';

/// A named definition or an anonymous inline schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaObject {
    /// Key under `definitions`; empty for inline schemas
    pub registry_key: String,

    /// Cosmetic name taken from `xml.name`
    pub display_name: Option<String>,

    /// The `items.name` hint of an array schema
    pub item_name: Option<String>,

    /// Schema type (object, array, string, ...). For array schemas this is the element type
    pub schema_type: String,

    /// `$ref` target, or the element `$ref` of an array schema
    pub reference: Option<String>,

    /// Format (e.g., "int64", "date-time")
    pub format: Option<String>,

    /// Raw `xml` block
    pub xml: Option<Value>,

    /// Object properties in document order
    pub properties: Vec<Property>,

    /// Names of required properties
    pub required: Vec<String>,
}

impl SchemaObject {
    /// Whether this schema is a bare pointer to another definition
    pub fn is_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// Get a property by name
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Check if a property is listed in the schema-level `required` set
    pub fn is_property_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }
}

/// One field of a schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Property {
    /// Key in the owning `properties` map
    pub name: String,

    /// Declared type. Arrays use `container/element`, e.g. `array/string`
    pub property_type: String,

    /// `$ref` target; `items.$ref` for arrays
    pub reference: Option<String>,

    pub format: Option<String>,
    pub description: Option<String>,
    pub enum_values: Vec<String>,

    /// Field-local `required` flag
    pub required: bool,

    pub default_value: Option<Value>,
    pub example: Option<Value>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
    pub pattern: Option<String>,
    pub read_only: bool,
    pub write_only: bool,
    pub deprecated: bool,

    /// Inlined fields of the referenced definition, filled in by resolution
    pub properties: Vec<Property>,
}

impl Property {
    /// Create an empty property with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Container part of the composite type (`array` in `array/string`)
    pub fn container_type(&self) -> &str {
        match self.property_type.split_once(TYPE_SEPARATOR) {
            Some((container, _)) => container,
            None => &self.property_type,
        }
    }

    /// Element part of the composite type (`string` in `array/string`)
    pub fn element_type(&self) -> Option<&str> {
        self.property_type
            .split_once(TYPE_SEPARATOR)
            .map(|(_, element)| element)
    }

    /// Whether the property describes an array
    pub fn is_array(&self) -> bool {
        self.element_type().is_some() || self.container_type() == "array"
    }

    /// Last segment of the `$ref`, i.e. the targeted registry key
    pub fn reference_target(&self) -> Option<String> {
        self.reference.as_deref().map(reference_target)
    }
}

/// Extract the registry key a `$ref` string points at.
///
/// Takes the segment after the last `/` and undoes JSON pointer escaping.
pub fn reference_target(reference: &str) -> String {
    let segment = reference.rsplit('/').next().unwrap_or(reference);
    segment.replace("~1", "/").replace("~0", "~")
}

/// Serializes a property list as a `name -> property` mapping
pub struct PropertyMap<'a>(pub &'a [Property]);

impl Serialize for PropertyMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for property in self.0 {
            map.serialize_entry(&property.name, property)?;
        }
        map.end()
    }
}

impl Serialize for SchemaObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;

        // A reference stands alone
        if let Some(reference) = &self.reference {
            map.serialize_entry("$ref", reference)?;
            return map.end();
        }

        if !self.schema_type.is_empty() {
            map.serialize_entry("type", &self.schema_type)?;
        }
        if let Some(format) = &self.format {
            map.serialize_entry("format", format)?;
        }
        if !self.properties.is_empty() {
            map.serialize_entry("properties", &PropertyMap(&self.properties))?;
        }
        if !self.required.is_empty() {
            map.serialize_entry("required", &self.required)?;
        }
        if let Some(xml) = &self.xml {
            map.serialize_entry("xml", xml)?;
        }
        map.end()
    }
}

#[derive(Serialize)]
struct ItemsOut<'a> {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    element_type: Option<&'a str>,
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    reference: Option<&'a str>,
}

impl Serialize for Property {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        let container = self.container_type();
        let is_array = self.is_array();

        if !container.is_empty() {
            map.serialize_entry("type", container)?;
        }
        if is_array {
            let items = ItemsOut {
                element_type: self.element_type(),
                reference: self.reference.as_deref(),
            };
            if items.element_type.is_some() || items.reference.is_some() {
                map.serialize_entry("items", &items)?;
            }
        } else if let Some(reference) = &self.reference {
            map.serialize_entry("$ref", reference)?;
        }

        if let Some(format) = &self.format {
            map.serialize_entry("format", format)?;
        }
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        if !self.enum_values.is_empty() {
            map.serialize_entry("enum", &self.enum_values)?;
        }
        if self.required {
            map.serialize_entry("required", &true)?;
        }
        if let Some(default) = &self.default_value {
            map.serialize_entry("default", default)?;
        }
        if let Some(example) = &self.example {
            map.serialize_entry("example", example)?;
        }
        if let Some(minimum) = self.minimum {
            map.serialize_entry("minimum", &minimum)?;
        }
        if let Some(maximum) = self.maximum {
            map.serialize_entry("maximum", &maximum)?;
        }
        if let Some(min_length) = self.min_length {
            map.serialize_entry("minLength", &min_length)?;
        }
        if let Some(max_length) = self.max_length {
            map.serialize_entry("maxLength", &max_length)?;
        }
        if let Some(pattern) = &self.pattern {
            map.serialize_entry("pattern", pattern)?;
        }
        if self.read_only {
            map.serialize_entry("readOnly", &true)?;
        }
        if self.write_only {
            map.serialize_entry("writeOnly", &true)?;
        }
        if self.deprecated {
            map.serialize_entry("deprecated", &true)?;
        }
        if !self.properties.is_empty() {
            map.serialize_entry("properties", &PropertyMap(&self.properties))?;
        }
        map.end()
    }
}
