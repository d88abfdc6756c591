//! Typed decoding of Swagger (OpenAPI v2) schema nodes
//!
//! Turns `serde_json::Value` trees into [`SchemaObject`] and [`Property`] values,
//! applying the `$ref` and `items` precedence rules of the Swagger format.

pub mod error;
pub mod fields;
pub mod parser;
pub mod types;

pub use error::{DecodeError, DecodeResult};
pub use parser::SchemaParser;
pub use types::{reference_target, Property, PropertyMap, SchemaObject, TYPE_SEPARATOR};
