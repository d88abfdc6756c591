//! Swagger Resolve Library
//!
//! Decodes Swagger (OpenAPI v2) documents into a flat, strongly-typed model
//! and inlines every schema `$ref` so downstream tools never have to walk the
//! raw JSON again.

pub mod cli;
pub mod config;
pub mod document;
pub mod fetch;
pub mod resolver;

pub use config::{Config, OutputConfig, SourceConfig};
pub use document::{
    parse_document, resolve_all_references, Document, Operation, Parameter, ParameterLocation,
};
pub use resolver::{ResolutionStats, Resolver, ResolverConfig};
pub use swagger_schema::{DecodeError, Property, SchemaObject};

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

/// Main application context: load, decode, resolve and render one document
pub struct SwaggerResolve {
    config: Config,
    resolver: Resolver,
}

impl SwaggerResolve {
    /// Create a new SwaggerResolve instance with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let resolver = Resolver::new(config.resolution.clone());
        Ok(Self { config, resolver })
    }

    /// Get the active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load the configured source and parse it without resolving references
    pub async fn load(&self) -> Result<Document> {
        let raw = fetch::load_source(&self.config.source).await?;
        Ok(parse_document(&raw)?)
    }

    /// Load the configured source, parse it and inline all references
    pub async fn load_resolved(&self) -> Result<(Document, ResolutionStats)> {
        let mut document = self.load().await?;
        let stats = document.resolve_references(&self.resolver)?;
        Ok((document, stats))
    }

    /// Render a document as JSON according to the output configuration
    pub fn render(&self, document: &Document) -> Result<String> {
        let rendered = if self.config.output.pretty {
            serde_json::to_string_pretty(document)?
        } else {
            serde_json::to_string(document)?
        };
        Ok(rendered)
    }

    /// Write the rendered document to the configured output path.
    ///
    /// Returns `None` when no output path is configured and nothing was written.
    pub async fn write_output(&self, document: &Document) -> Result<Option<PathBuf>> {
        let Some(path) = &self.config.output.path else {
            return Ok(None);
        };

        let rendered = self.render(document)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, rendered).await?;

        info!("Wrote resolved document to {:?}", path);
        Ok(Some(path.clone()))
    }
}

/// Application error types
#[derive(thiserror::Error, Debug)]
pub enum SwaggerError {
    /// The text is not a JSON/YAML mapping shaped like a Swagger document
    #[error("Parse error: {0}")]
    Parse(String),

    /// A node inside the document has the wrong shape
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Unresolved reference {reference} on property {property}")]
    UnresolvedReference { reference: String, property: String },

    #[error("Cyclic reference: {}", .chain.join(" -> "))]
    CyclicReference { chain: Vec<String> },

    /// Logged when a definition's `xml` block has no `name`; never returned
    #[error("Definition {definition} has an xml block without a name")]
    XmlMetadata { definition: String },

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SwaggerError {
    /// Whether the error comes from decoding rather than resolution or I/O
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::Decode(_))
    }
}

/// Result type for the library
pub type SwaggerResult<T> = Result<T, SwaggerError>;
