//! Document retrieval from local files or remote URLs

use crate::config::SourceConfig;
use crate::{SwaggerError, SwaggerResult};
use std::path::Path;
use tracing::info;

/// Load the raw text of the configured source
pub async fn load_source(source: &SourceConfig) -> SwaggerResult<String> {
    match source {
        SourceConfig::File { path } => read_file(path).await,
        SourceConfig::Url { url } => fetch_url(url).await,
    }
}

/// Read a document from disk
pub async fn read_file(path: &Path) -> SwaggerResult<String> {
    info!("Reading Swagger document from {:?}", path);
    Ok(tokio::fs::read_to_string(path).await?)
}

/// Fetch a document over HTTP(S); non-success statuses are errors
#[cfg(feature = "http")]
pub async fn fetch_url(url: &str) -> SwaggerResult<String> {
    info!("Fetching Swagger document from {}", url);

    let response = reqwest::get(url)
        .await
        .map_err(|e| SwaggerError::Fetch(format!("request to {url} failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SwaggerError::Fetch(format!("{url} returned {status}")));
    }

    response
        .text()
        .await
        .map_err(|e| SwaggerError::Fetch(format!("failed to read body from {url}: {e}")))
}

#[cfg(not(feature = "http"))]
pub async fn fetch_url(url: &str) -> SwaggerResult<String> {
    Err(SwaggerError::Fetch(format!(
        "cannot fetch {url}: built without the `http` feature"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_read_file_source() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"swagger": "2.0"}"#).unwrap();

        let source = SourceConfig::File {
            path: file.path().to_path_buf(),
        };
        let raw = load_source(&source).await.unwrap();
        assert_eq!(raw, r#"{"swagger": "2.0"}"#);
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = SourceConfig::File {
            path: "/definitely/not/here/swagger.json".into(),
        };
        let err = load_source(&source).await.unwrap_err();
        assert!(matches!(err, SwaggerError::Io(_)));
    }

    #[cfg(not(feature = "http"))]
    #[tokio::test]
    async fn test_url_without_http_feature() {
        let err = fetch_url("https://petstore.swagger.io/v2/swagger.json")
            .await
            .unwrap_err();
        assert!(matches!(err, SwaggerError::Fetch(_)));
    }
}
