//! Swagger document model and assembly
//!
//! Decoding is two-phase: raw text becomes a generic `serde_json::Value` tree
//! ([`tree`]), then the path and definition table builders turn that tree into
//! typed [`Operation`] and [`SchemaObject`] lists.

pub mod definitions;
pub mod paths;
pub mod tree;

pub use definitions::DefinitionTableBuilder;
pub use paths::{Operation, Parameter, ParameterLocation, PathTableBuilder, HTTP_METHODS};

use crate::resolver::{ResolutionStats, Resolver, ResolverConfig};
use crate::{SwaggerError, SwaggerResult};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;
use swagger_schema::fields;
use swagger_schema::{SchemaObject, SchemaParser};
use tracing::info;

/// A decoded Swagger document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Value of the `swagger` key, e.g. "2.0"
    pub version: String,

    /// The `info` block, passed through unexamined
    pub info: Option<Value>,

    pub host: Option<String>,
    pub base_path: Option<String>,

    /// Operations in document order
    pub operations: Vec<Operation>,

    /// Definitions in document order, unique by registry key
    pub definitions: Vec<SchemaObject>,
}

impl Document {
    /// Assemble a document from a generic tree
    pub fn from_tree(tree: &Value) -> SwaggerResult<Self> {
        let root = tree.as_object().ok_or_else(|| {
            SwaggerError::Parse(format!(
                "document root must be a mapping, found {}",
                swagger_schema::error::kind_of(tree)
            ))
        })?;

        if root.contains_key("openapi") && !root.contains_key("swagger") {
            return Err(SwaggerError::Parse(
                "OpenAPI v3 documents are not supported".to_string(),
            ));
        }

        let parser = SchemaParser::new();

        let operations = match tree.get("paths") {
            Some(paths) => PathTableBuilder::new(&parser).build(paths)?,
            None => Vec::new(),
        };
        let definitions = match tree.get("definitions") {
            Some(definitions) => DefinitionTableBuilder::new(&parser).build(definitions)?,
            None => Vec::new(),
        };

        Ok(Self {
            version: swagger_version(tree)?,
            info: fields::opaque(tree, "info"),
            host: fields::string(tree, "host", "")?,
            base_path: fields::string(tree, "basePath", "")?,
            operations,
            definitions,
        })
    }

    /// Get a definition by registry key
    pub fn definition(&self, registry_key: &str) -> Option<&SchemaObject> {
        self.definitions
            .iter()
            .find(|d| d.registry_key == registry_key)
    }

    /// Get an operation by url and (case-insensitive) verb
    pub fn operation(&self, url: &str, method: &str) -> Option<&Operation> {
        self.operations
            .iter()
            .find(|op| op.url == url && op.method.eq_ignore_ascii_case(method))
    }

    /// Inline every definition property's `$ref` target in place.
    ///
    /// On error the document may be partially resolved.
    pub fn resolve_references(&mut self, resolver: &Resolver) -> SwaggerResult<ResolutionStats> {
        resolver.resolve_document(self)
    }
}

/// The `swagger` version; unquoted YAML `2.0` arrives as a number
fn swagger_version(tree: &Value) -> SwaggerResult<String> {
    match tree.get("swagger") {
        Some(Value::Number(number)) => Ok(number.to_string()),
        _ => Ok(fields::string(tree, "swagger", "")?.unwrap_or_default()),
    }
}

/// Parse raw Swagger text into a [`Document`]
pub fn parse_document(raw: &str) -> SwaggerResult<Document> {
    let tree = tree::parse_tree(raw)?;
    let document = Document::from_tree(&tree)?;
    info!(
        "Parsed Swagger {} document: {} operations, {} definitions",
        document.version,
        document.operations.len(),
        document.definitions.len()
    );
    Ok(document)
}

/// Resolve every reference with the default policy (unresolved references fail)
pub fn resolve_all_references(mut document: Document) -> SwaggerResult<Document> {
    Resolver::new(ResolverConfig::default()).resolve_document(&mut document)?;
    Ok(document)
}

/// Group operations by url, keeping first-seen order of both urls and verbs
fn group_by_url(operations: &[Operation]) -> Vec<(&str, Vec<&Operation>)> {
    let mut groups: Vec<(&str, Vec<&Operation>)> = Vec::new();
    for operation in operations {
        match groups.iter_mut().find(|(url, _)| *url == operation.url) {
            Some((_, group)) => group.push(operation),
            None => groups.push((operation.url.as_str(), vec![operation])),
        }
    }
    groups
}

struct PathsOut<'a>(&'a [Operation]);

impl Serialize for PathsOut<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let groups = group_by_url(self.0);
        let mut map = serializer.serialize_map(Some(groups.len()))?;
        for (url, operations) in &groups {
            map.serialize_entry(url, &VerbsOut(operations))?;
        }
        map.end()
    }
}

struct VerbsOut<'a>(&'a [&'a Operation]);

impl Serialize for VerbsOut<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for operation in self.0 {
            map.serialize_entry(&operation.method, operation)?;
        }
        map.end()
    }
}

struct DefinitionsOut<'a>(&'a [SchemaObject]);

impl Serialize for DefinitionsOut<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for definition in self.0 {
            map.serialize_entry(&definition.registry_key, definition)?;
        }
        map.end()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("swagger", &self.version)?;
        if let Some(info) = &self.info {
            map.serialize_entry("info", info)?;
        }
        if let Some(host) = &self.host {
            map.serialize_entry("host", host)?;
        }
        if let Some(base_path) = &self.base_path {
            map.serialize_entry("basePath", base_path)?;
        }
        map.serialize_entry("paths", &PathsOut(&self.operations))?;
        if !self.definitions.is_empty() {
            map.serialize_entry("definitions", &DefinitionsOut(&self.definitions))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_metadata_fields() {
        let document = parse_document(
            r#"{"swagger": "2.0", "info": {"title": "Petstore"}, "host": "petstore.swagger.io", "basePath": "/v2"}"#,
        )
        .unwrap();

        assert_eq!(document.version, "2.0");
        assert_eq!(document.info, Some(json!({"title": "Petstore"})));
        assert_eq!(document.host.as_deref(), Some("petstore.swagger.io"));
        assert_eq!(document.base_path.as_deref(), Some("/v2"));
        assert!(document.operations.is_empty());
        assert!(document.definitions.is_empty());
    }

    #[test]
    fn test_unquoted_yaml_version() {
        let document = parse_document("swagger: 2.0\nhost: example.com\n").unwrap();
        assert_eq!(document.version, "2.0");

        let err = parse_document(r#"{"swagger": true}"#).unwrap_err();
        assert!(matches!(err, SwaggerError::Decode(_)));
    }

    #[test]
    fn test_openapi_v3_is_rejected() {
        let err = parse_document(r#"{"openapi": "3.0.0", "paths": {}}"#).unwrap_err();
        assert!(matches!(err, SwaggerError::Parse(_)));
    }

    #[test]
    fn test_root_must_be_mapping() {
        let err = parse_document("[1, 2, 3]").unwrap_err();
        assert!(err.to_string().contains("mapping"));
    }

    #[test]
    fn test_paths_not_mapping_is_parse_error() {
        let err = parse_document(r#"{"swagger": "2.0", "paths": []}"#).unwrap_err();
        assert!(matches!(err, SwaggerError::Decode(_)));
    }

    #[test]
    fn test_serialize_groups_paths_by_url() {
        let document = parse_document(
            r#"{"swagger": "2.0", "paths": {
                "/pet": {"put": {"operationId": "updatePet"}, "post": {"operationId": "addPet"}},
                "/store": {"get": {"operationId": "getInventory"}}
            }}"#,
        )
        .unwrap();

        let value = serde_json::to_value(&document).unwrap();
        assert_eq!(
            value["paths"],
            json!({
                "/pet": {"put": {"operationId": "updatePet"}, "post": {"operationId": "addPet"}},
                "/store": {"get": {"operationId": "getInventory"}}
            })
        );
    }

    #[test]
    fn test_lookup_helpers() {
        let document = parse_document(
            r#"{"swagger": "2.0",
                "paths": {"/pet": {"get": {"operationId": "findPet"}}},
                "definitions": {"Pet": {"type": "object"}}}"#,
        )
        .unwrap();

        assert!(document.operation("/pet", "GET").is_some());
        assert!(document.operation("/pet", "post").is_none());
        assert_eq!(document.definition("Pet").unwrap().schema_type, "object");
        assert!(document.definition("Dog").is_none());
    }
}
