//! Path table: `paths` (url -> verb -> operation) flattened into operations

use crate::SwaggerResult;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};
use swagger_schema::fields::{self, child};
use swagger_schema::{DecodeError, DecodeResult, SchemaObject, SchemaParser};
use tracing::debug;

/// HTTP verbs that may appear under a path item
pub const HTTP_METHODS: [&str; 7] = ["get", "put", "post", "delete", "options", "head", "patch"];

/// Keys of a non-body parameter that describe its value shape
const PARAMETER_SCHEMA_KEYS: [&str; 3] = ["type", "format", "items"];

/// One HTTP operation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// URL key the operation was found under
    #[serde(skip)]
    pub url: String,

    /// Lowercase HTTP verb
    #[serde(skip)]
    pub method: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,

    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
}

impl Operation {
    /// Get a parameter by name and location
    pub fn parameter(&self, name: &str, location: ParameterLocation) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.name == name && p.location == Some(location))
    }
}

/// Where a parameter is carried in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Query,
    Path,
    Body,
    Header,
    FormData,
}

impl ParameterLocation {
    fn parse(value: &str, location: &str) -> DecodeResult<Self> {
        match value {
            "query" => Ok(Self::Query),
            "path" => Ok(Self::Path),
            "body" => Ok(Self::Body),
            "header" => Ok(Self::Header),
            "formData" => Ok(Self::FormData),
            other => Err(DecodeError::UnsupportedValue {
                location: location.to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// One operation input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub location: Option<ParameterLocation>,
    pub description: Option<String>,
    pub required: bool,

    /// Pointer to a shared parameter declared elsewhere in the document
    pub reference: Option<String>,

    /// Declared `type` of a non-body parameter, e.g. `array` for `?tags=a&tags=b`
    pub value_type: Option<String>,

    /// Body schema, or the value shape of a non-body parameter
    pub schema: Option<SchemaObject>,
}

#[derive(Serialize)]
struct ParameterItemsOut<'a> {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    element_type: Option<&'a str>,
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    reference: Option<&'a str>,
}

impl Serialize for Parameter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        if let Some(location) = &self.location {
            map.serialize_entry("in", location)?;
        }
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        if self.required {
            map.serialize_entry("required", &true)?;
        }
        if let Some(reference) = &self.reference {
            map.serialize_entry("$ref", reference)?;
        }

        match (&self.value_type, &self.schema) {
            // Non-body parameters carry their shape inline
            (Some(value_type), schema) => {
                map.serialize_entry("type", value_type)?;
                if let Some(schema) = schema {
                    if let Some(format) = &schema.format {
                        map.serialize_entry("format", format)?;
                    }
                    if value_type == "array" {
                        let element = schema.schema_type.as_str();
                        let items = ParameterItemsOut {
                            element_type: (!element.is_empty() && element != "array")
                                .then_some(element),
                            reference: schema.reference.as_deref(),
                        };
                        if items.element_type.is_some() || items.reference.is_some() {
                            map.serialize_entry("items", &items)?;
                        }
                    }
                }
            }
            (None, Some(schema)) => map.serialize_entry("schema", schema)?,
            (None, None) => {}
        }
        map.end()
    }
}

/// Builds the flat operation list from a `paths` node
pub struct PathTableBuilder<'a> {
    parser: &'a SchemaParser,
}

impl<'a> PathTableBuilder<'a> {
    pub fn new(parser: &'a SchemaParser) -> Self {
        Self { parser }
    }

    /// Flatten `paths` into operations in document order.
    ///
    /// The url and verb keys always win over same-named fields inside the
    /// operation node. Path-level `parameters` are merged into every operation.
    pub fn build(&self, paths: &Value) -> SwaggerResult<Vec<Operation>> {
        let entries = fields::as_mapping(paths, "paths")?;
        let mut operations = Vec::new();

        for (url, item) in entries {
            let item_location = child("paths", url);
            let verbs = fields::as_mapping(item, &item_location)?;
            let shared = self.decode_parameters(item, &item_location)?;

            for (verb, node) in verbs {
                let method = verb.to_ascii_lowercase();
                if !HTTP_METHODS.contains(&method.as_str()) {
                    if verb != "parameters" && !verb.starts_with("x-") {
                        debug!("Skipping unknown key {} under path {}", verb, url);
                    }
                    continue;
                }

                let mut operation = self.decode_operation(node, &child(&item_location, verb))?;
                operation.url = url.clone();
                operation.method = method;
                merge_parameters(&mut operation.parameters, &shared);
                operations.push(operation);
            }
        }

        debug!("Built {} operations from {} paths", operations.len(), entries.len());
        Ok(operations)
    }

    fn decode_operation(&self, node: &Value, location: &str) -> DecodeResult<Operation> {
        fields::as_mapping(node, location)?;

        Ok(Operation {
            url: String::new(),
            method: String::new(),
            operation_id: fields::string(node, "operationId", location)?,
            summary: fields::string(node, "summary", location)?,
            description: fields::string(node, "description", location)?,
            tags: fields::string_list(node, "tags", location)?,
            consumes: fields::string_list(node, "consumes", location)?,
            produces: fields::string_list(node, "produces", location)?,
            parameters: self.decode_parameters(node, location)?,
            deprecated: fields::boolean(node, "deprecated", location)?,
        })
    }

    /// Decode the `parameters` array of a path item or operation node
    fn decode_parameters(&self, node: &Value, location: &str) -> DecodeResult<Vec<Parameter>> {
        let location = child(location, "parameters");
        match node.get("parameters") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(index, item)| self.decode_parameter(item, &child(&location, &index.to_string())))
                .collect(),
            Some(other) => Err(DecodeError::unexpected(&location, "array", other)),
        }
    }

    fn decode_parameter(&self, node: &Value, location: &str) -> DecodeResult<Parameter> {
        let entries = fields::as_mapping(node, location)?;

        let parameter_location = fields::string(node, "in", location)?
            .map(|value| ParameterLocation::parse(&value, &child(location, "in")))
            .transpose()?;

        let value_type = match node.get("schema") {
            Some(_) => None,
            None => fields::string(node, "type", location)?,
        };

        let schema = match node.get("schema") {
            Some(schema) => Some(self.parser.decode_schema(schema, &child(location, "schema"))?),
            None if value_type.is_some() => {
                // Non-body parameters describe their value inline
                let shape: Map<String, Value> = PARAMETER_SCHEMA_KEYS
                    .iter()
                    .filter_map(|key| entries.get(*key).map(|v| (key.to_string(), v.clone())))
                    .collect();
                Some(self.parser.decode_schema(&Value::Object(shape), location)?)
            }
            None => None,
        };

        Ok(Parameter {
            name: fields::string(node, "name", location)?.unwrap_or_default(),
            location: parameter_location,
            description: fields::string(node, "description", location)?,
            required: fields::boolean(node, "required", location)?,
            reference: fields::string(node, "$ref", location)?,
            value_type,
            schema,
        })
    }
}

/// Append shared parameters the operation does not override by (name, in)
fn merge_parameters(parameters: &mut Vec<Parameter>, shared: &[Parameter]) {
    for candidate in shared {
        let overridden = parameters
            .iter()
            .any(|p| p.name == candidate.name && p.location == candidate.location);
        if !overridden {
            parameters.push(candidate.clone());
        }
    }
}
