//! The `Journalist` processing instance: session state, the end-to-end
//! `read` entry point, and the `process_articles` orchestrator.
//!
//! One instance owns one session: a time-derived identifier, a scrape
//! depth, a persistence mode, and (when persisting) a session workspace.
//! Instances are not reused across unrelated batches; each `read` call is a
//! self-contained batch job over a fixed URL list.

use std::path::Path;
use tracing::{info, instrument, warn};

use crate::config::JournalistConfig;
use crate::error::Result;
use crate::models::{Article, SessionMetadata, SourceSession};
use crate::persistence::SessionStore;
use crate::pipeline::{build_session_records, filter_by_recency, group_by_source};
use crate::scraper::WebScraper;
use crate::utils;

/// A single invocation-scoped news processing instance.
///
/// # Persistence Modes
///
/// - **Persistent** (`persist = true`): session records and individual
///   articles are written under a session-identified workspace.
/// - **Buffered** (`persist = false`): filtered articles accumulate in an
///   in-process collection; no filesystem interaction at all.
///
/// The return shape of [`Journalist::read`] and
/// [`Journalist::process_articles`] is identical in both modes.
#[derive(Debug)]
pub struct Journalist {
    config: JournalistConfig,
    session_id: String,
    scrape_depth: usize,
    persist: bool,
    store: Option<SessionStore>,
    memory_articles: Vec<Article>,
    scraper: WebScraper,
}

impl Journalist {
    /// Create a processing instance.
    ///
    /// In persistent mode this creates the session workspace immediately and
    /// verifies it is writable, so misconfiguration fails fast instead of
    /// after a full scrape.
    pub fn new(config: JournalistConfig, persist: bool, scrape_depth: usize) -> Result<Self> {
        let session_id = utils::session_id();
        let store = if persist {
            Some(SessionStore::create(
                &config.base_workspace_path,
                &session_id,
            )?)
        } else {
            None
        };
        let scraper = WebScraper::new(&config)?;
        info!(
            %session_id,
            persist,
            scrape_depth,
            "Journalist instance created"
        );
        Ok(Self {
            config,
            session_id,
            scrape_depth,
            persist,
            store,
            memory_articles: Vec::new(),
            scraper,
        })
    }

    /// This instance's session identifier.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Whether this instance persists to the filesystem.
    pub fn is_persistent(&self) -> bool {
        self.persist
    }

    /// The session workspace, present only in persistent mode.
    pub fn session_path(&self) -> Option<&Path> {
        self.store.as_ref().map(|s| s.session_path())
    }

    /// Articles buffered so far (buffered mode accumulates across calls).
    pub fn memory_articles(&self) -> &[Article] {
        &self.memory_articles
    }

    /// Scrape the given URLs and process the results into per-source
    /// session records.
    ///
    /// This is the end-to-end entry point: it runs the concurrent fetch
    /// stage to completion, then hands the fully materialized article list
    /// to the synchronous core pipeline. A scraper failure for one URL
    /// yields an empty bucket for that source, never a batch failure.
    ///
    /// An empty `urls` list short-circuits to an empty record list.
    #[instrument(level = "info", skip_all, fields(session_id = %self.session_id, urls = urls.len()))]
    pub async fn read(
        &mut self,
        urls: &[String],
        keywords: &[String],
    ) -> Result<Vec<SourceSession>> {
        if urls.is_empty() {
            info!("No URLs requested; nothing to read");
            return Ok(Vec::new());
        }

        let result = self
            .scraper
            .execute_for_session(&self.session_id, urls, keywords, self.scrape_depth)
            .await;

        Ok(self.process_articles(result.articles, urls, &result.metadata))
    }

    /// Run the core pipeline over an already materialized scrape batch:
    /// filter, group, build records, persist or buffer, and return the
    /// record list unconditionally.
    ///
    /// The returned list has identical shape whether or not persistence is
    /// enabled; persistence failures are logged per item and never remove a
    /// record from the return value.
    #[instrument(level = "info", skip_all, fields(session_id = %self.session_id, scraped = scraped.len()))]
    pub fn process_articles(
        &mut self,
        scraped: Vec<Article>,
        original_urls: &[String],
        metadata: &SessionMetadata,
    ) -> Vec<SourceSession> {
        let filtered = filter_by_recency(scraped, self.config.max_age_days);
        let buckets = group_by_source(filtered.clone(), original_urls);
        let records = build_session_records(buckets, metadata);

        match &self.store {
            Some(store) => {
                for outcome in store.persist(&records, &filtered) {
                    if let Err(e) = &outcome.result {
                        warn!(
                            target = ?outcome.target,
                            error = %e,
                            "Persistence write failed; record still returned"
                        );
                    }
                }
            }
            None => {
                self.memory_articles.extend(filtered);
            }
        }

        info!(
            records = records.len(),
            total_articles = records.iter().map(|r| r.articles_count).sum::<usize>(),
            "Batch processed"
        );
        records
    }
}
