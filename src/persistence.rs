//! Persistence adapter: session workspace writes or an in-process buffer.
//!
//! # Persisted Layout
//!
//! Persistent mode writes one keyed entry per source domain and one per
//! article, both scoped under a session-identified namespace:
//!
//! ```text
//! {base_workspace}/
//! └── 20250617_120000_123456/
//!     ├── session_data_a_test.json
//!     ├── session_data_b_test.json
//!     └── news_from_scraping/
//!         ├── article_0f3a....json
//!         └── article_9c21....json
//! ```
//!
//! Writes are independent per record and per article: each failure is
//! captured as a typed [`WriteOutcome`], logged by the orchestrator, and the
//! corresponding record is still returned to the caller. Data may therefore
//! be present in the return value but absent from storage; that is the
//! deliberate at-least-returned, best-effort-persisted contract.
//!
//! Re-invoking with identical input overwrites persisted entries (identical
//! derived filenames) or appends a second time to the buffer; nothing here
//! deduplicates across calls.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::error::{Error, Result};
use crate::models::{Article, SourceSession};
use crate::utils::sanitize_for_filename;

/// What a single persistence write targeted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteTarget {
    /// A per-source session record, keyed by unsanitized domain.
    Record { domain: String },
    /// An individual article, keyed by its identifier.
    Article { id: String },
}

/// Typed result of one independent write.
///
/// Accumulated into a list so the orchestrator can distinguish "this source
/// failed to write" from "this source had zero articles" without relying on
/// log output alone.
#[derive(Debug)]
pub struct WriteOutcome {
    pub target: WriteTarget,
    pub result: Result<PathBuf>,
}

/// Filesystem store rooted at one session's workspace.
///
/// Concurrent instances must use distinct session identifiers; the store
/// assumes (does not enforce) that the caller guarantees this.
#[derive(Debug)]
pub struct SessionStore {
    session_path: PathBuf,
    articles_path: PathBuf,
}

impl SessionStore {
    /// Create the session workspace under `base` and verify it is writable.
    ///
    /// # Errors
    ///
    /// Fails if the directories cannot be created or the workspace fails a
    /// probe write. This is a batch-level error: without a workspace,
    /// persistent mode cannot proceed.
    #[instrument(level = "info", skip_all, fields(session_id = %session_id))]
    pub fn create(base: &Path, session_id: &str) -> Result<Self> {
        let session_path = base.join(session_id);
        let articles_path = session_path.join("news_from_scraping");
        fs::create_dir_all(&articles_path)?;

        let probe_path = session_path.join("..__probe_write__");
        fs::File::create(&probe_path)?;
        let _ = fs::remove_file(&probe_path);
        info!(path = %session_path.display(), "Session workspace is writable");

        Ok(Self {
            session_path,
            articles_path,
        })
    }

    /// Root of this session's workspace.
    pub fn session_path(&self) -> &Path {
        &self.session_path
    }

    /// Directory holding per-article entries.
    pub fn articles_path(&self) -> &Path {
        &self.articles_path
    }

    /// Write one session record to
    /// `session_data_{sanitized_domain}.json`.
    pub fn write_record(&self, record: &SourceSession) -> WriteOutcome {
        let filename = format!(
            "session_data_{}.json",
            sanitize_for_filename(&record.source_domain)
        );
        let path = self.session_path.join(filename);
        WriteOutcome {
            target: WriteTarget::Record {
                domain: record.source_domain.clone(),
            },
            result: write_json(&path, record),
        }
    }

    /// Write one article to `news_from_scraping/article_{id}.json`.
    pub fn write_article(&self, article: &Article) -> WriteOutcome {
        let path = self.articles_path.join(format!("article_{}.json", article.id));
        WriteOutcome {
            target: WriteTarget::Article {
                id: article.id.clone(),
            },
            result: write_json(&path, article),
        }
    }

    /// Persist every record and every article, each write independent.
    ///
    /// A failure writing one source's record never prevents writing the
    /// others'; all outcomes are returned for the caller to inspect and log.
    #[instrument(level = "info", skip_all, fields(records = records.len(), articles = articles.len()))]
    pub fn persist(&self, records: &[SourceSession], articles: &[Article]) -> Vec<WriteOutcome> {
        let mut outcomes = Vec::with_capacity(records.len() + articles.len());
        for record in records {
            outcomes.push(self.write_record(record));
        }
        for article in articles {
            outcomes.push(self.write_article(article));
        }
        let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
        info!(
            written = outcomes.len() - failed,
            failed,
            "Persisted session data"
        );
        outcomes
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(value).map_err(|e| Error::PersistenceWrite {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;
    fs::write(path, json).map_err(|e| Error::PersistenceWrite {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;
    debug!(path = %path.display(), "Wrote JSON entry");
    Ok(path.to_path_buf())
}
