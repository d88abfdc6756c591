//! Configuration management for SwaggerResolve

pub mod config;
pub mod output;
pub mod source;


// Re-export main types for convenience
pub use config::Config;
pub use output::OutputConfig;
pub use source::SourceConfig;
