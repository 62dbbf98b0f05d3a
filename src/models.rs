//! Data models for scraped articles and per-source session records.
//!
//! This module defines the structures that flow through the pipeline:
//! - [`Article`]: one extracted piece of content, with provenance and
//!   extraction metadata
//! - [`ScrapeResult`]: the raw batch handed over by the scraper collaborator
//! - [`SessionMetadata`]: coarse per-batch accounting (timing, counts)
//! - [`SourceBucket`]: intermediate grouping of articles by domain
//! - [`SourceSession`]: the persisted/returned per-source unit
//!
//! Loosely-shaped payloads from earlier iterations are modelled as explicit
//! tagged records with fixed fields and a defined optional-field policy, so
//! malformed data fails at the boundary instead of deep in the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version tag stamped into every session record.
pub const PIPELINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// How an article's body was located, plus derived content metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionInfo {
    /// Which selector family produced the body: `"article-tag"`,
    /// `"main-tag"`, or `"paragraphs"`.
    pub method: String,
    /// Page language from `<html lang>`, when declared.
    pub language: Option<String>,
    /// Whitespace-delimited word count of the body.
    pub word_count: usize,
}

/// One extracted piece of content.
///
/// The identifier is derived from the URL and is stable across runs, so
/// re-persisting the same article overwrites its previous entry. An article
/// always carries enough information (its `url`) to recover its source
/// domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Stable identifier derived from the URL.
    pub id: String,
    /// The URL the article was extracted from.
    pub url: String,
    /// Article title or headline.
    pub title: String,
    /// Extracted body text.
    pub body: String,
    /// Byline, when the page declares one.
    pub author: Option<String>,
    /// Publication timestamp, when the page declares a parseable one.
    pub published_at: Option<DateTime<Utc>>,
    /// When this article was scraped.
    pub scraped_at: DateTime<Utc>,
    /// Keywords from the request that matched this article.
    pub keywords_matched: Vec<String>,
    /// Extraction provenance.
    pub extraction: ExtractionInfo,
}

/// Coarse accounting for one scraping batch.
///
/// Produced by the scraper collaborator and merged into every per-source
/// record by the session record builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Time-derived session identifier, unique within a process.
    pub session_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_seconds: f64,
    /// Total links discovered across all index pages.
    pub links_discovered: usize,
    /// Articles successfully scraped and extracted.
    pub articles_scraped: usize,
    /// Batch-level ratio of scraped articles to discovered links.
    pub success_rate: f64,
    /// Crate version that produced this batch.
    pub pipeline_version: String,
}

/// The raw payload handed to the core pipeline by the scraper: a flat list
/// of articles plus batch metadata. The core treats it as read-only input.
#[derive(Debug, Clone)]
pub struct ScrapeResult {
    pub articles: Vec<Article>,
    pub metadata: SessionMetadata,
}

/// Intermediate grouping of articles belonging to one source domain.
///
/// Every URL originally requested yields a bucket even when it produced zero
/// articles, so callers can distinguish "no articles found" from "source not
/// attempted".
#[derive(Debug, Clone, Serialize)]
pub struct SourceBucket {
    /// The original requested URL, or the first article's URL for buckets
    /// created on demand for cross-domain articles.
    pub source_url: String,
    /// The unsanitized domain this bucket groups by.
    pub source_domain: String,
    /// Articles attributed to this domain, in input order.
    pub articles: Vec<Article>,
}

/// Per-source metadata sub-record embedded in every [`SourceSession`].
///
/// Merges shared session fields with fields derived for this source alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSessionMetadata {
    pub session_id: String,
    /// Marks the record as scoped to a single source.
    pub source_specific: bool,
    pub links_discovered: usize,
    pub duration_seconds: f64,
    /// This source's article count over discovered links when known,
    /// otherwise the batch-level ratio.
    pub success_rate: f64,
    pub pipeline_version: String,
    /// Number of articles in this record.
    pub articles_count: usize,
}

/// The per-source unit returned to the caller and, in persistent mode,
/// serialized to the session workspace.
///
/// Created fresh on every `process_articles` invocation and never mutated
/// after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSession {
    pub source_domain: String,
    pub source_url: String,
    /// When this record was built.
    pub saved_at: DateTime<Utc>,
    pub articles_count: usize,
    pub articles: Vec<Article>,
    pub session_metadata: SourceSessionMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_serialization_round_trip() {
        let article = crate::test_support::sample_article("https://example.com/story");
        let json = serde_json::to_string(&article).unwrap();
        let back: Article = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, article.id);
        assert_eq!(back.url, "https://example.com/story");
        assert_eq!(back.extraction, article.extraction);
    }

    #[test]
    fn test_source_session_serialization() {
        let record = SourceSession {
            source_domain: "example.com".to_string(),
            source_url: "https://example.com".to_string(),
            saved_at: Utc::now(),
            articles_count: 0,
            articles: vec![],
            session_metadata: SourceSessionMetadata {
                session_id: "20250617_120000_000001".to_string(),
                source_specific: true,
                links_discovered: 0,
                duration_seconds: 0.5,
                success_rate: 0.0,
                pipeline_version: PIPELINE_VERSION.to_string(),
                articles_count: 0,
            },
        };

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("example.com"));
        assert!(json.contains("source_specific"));
        assert!(json.contains("saved_at"));
    }

    #[test]
    fn test_optional_fields_deserialize_from_null() {
        let json = r#"{
            "id": "abc123",
            "url": "https://example.com/a",
            "title": "T",
            "body": "B",
            "author": null,
            "published_at": null,
            "scraped_at": "2025-06-17T12:00:00Z",
            "keywords_matched": [],
            "extraction": {"method": "article-tag", "language": null, "word_count": 1}
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert!(article.author.is_none());
        assert!(article.published_at.is_none());
        assert!(article.extraction.language.is_none());
    }
}
