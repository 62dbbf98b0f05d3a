//! Error taxonomy for the journalist pipeline.
//!
//! Errors fall into two classes with very different handling policies:
//!
//! - **Per-item errors** ([`Error::InvalidUrl`], [`Error::MalformedArticle`],
//!   [`Error::PersistenceWrite`], [`Error::Network`], [`Error::Extraction`])
//!   are caught at the component boundary, logged, and degrade to "this one
//!   item is missing". They never abort a batch.
//! - **Batch-level errors** ([`Error::Validation`], I/O failures during
//!   workspace setup) propagate out of the public entry points.
//!
//! Every isolated drop is observable via `tracing` output even though it
//! does not raise.

use std::path::PathBuf;
use thiserror::Error;

/// All failure modes produced by this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// A URL has no parseable host. Raised by domain extraction; callers at
    /// the grouping boundary skip the offending URL's bucket.
    #[error("URL has no parseable host: {url}")]
    InvalidUrl { url: String },

    /// An article cannot be attributed to any source domain. The article is
    /// dropped and logged; the pipeline continues.
    #[error("article cannot be attributed to a source domain: {url}")]
    MalformedArticle { url: String },

    /// A single record or article failed to serialize or write. Caught
    /// per-item inside the persistence adapter.
    #[error("failed to persist {path}: {source}")]
    PersistenceWrite {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A fetch returned a non-success status after retries were exhausted.
    #[error("network failure fetching {url} (status {status:?})")]
    Network { url: String, status: Option<u16> },

    /// A fetched page yielded no usable article content.
    #[error("content extraction failed for {url}: {reason}")]
    Extraction { url: String, reason: String },

    /// The input as a whole is unprocessable. This is the only error class
    /// that escapes `process_articles`.
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_url_display() {
        let e = Error::InvalidUrl {
            url: "not a url".to_string(),
        };
        assert!(e.to_string().contains("not a url"));
        assert!(e.to_string().contains("no parseable host"));
    }

    #[test]
    fn test_network_error_carries_status() {
        let e = Error::Network {
            url: "https://example.com".to_string(),
            status: Some(404),
        };
        assert!(e.to_string().contains("https://example.com"));
        assert!(e.to_string().contains("404"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let e: Error = io.into();
        assert!(matches!(e, Error::Io(_)));
    }

    #[test]
    fn test_extraction_error_carries_url() {
        let e = Error::Extraction {
            url: "https://news.test/article".to_string(),
            reason: "no textual content".to_string(),
        };
        assert!(e.to_string().contains("https://news.test/article"));
        assert!(e.to_string().contains("no textual content"));
    }
}
