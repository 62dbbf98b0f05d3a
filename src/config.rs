//! Runtime configuration for a [`Journalist`](crate::Journalist) instance.
//!
//! Configuration is an explicit value threaded through constructors rather
//! than ambient global state: the orchestrator, the persistence adapter, and
//! the scraper all receive the same [`JournalistConfig`].

use std::path::PathBuf;
use std::time::Duration;

/// Default workspace directory for persisted sessions, relative to the
/// working directory.
pub const DEFAULT_BASE_WORKSPACE_PATH: &str = ".journalist_workspace";

/// Tunable settings shared by every component of a processing instance.
#[derive(Debug, Clone)]
pub struct JournalistConfig {
    /// Root directory under which per-session workspaces are created
    /// (persistent mode only).
    pub base_workspace_path: PathBuf,
    /// Drop articles whose recency signal is older than this many days.
    /// `None` disables temporal filtering.
    pub max_age_days: Option<i64>,
    /// Per-request timeout for article and index fetches.
    pub request_timeout: Duration,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Number of fetches kept in flight concurrently.
    pub max_parallel_fetches: usize,
    /// Cap on links collected from a single index page.
    pub max_links_per_page: usize,
}

impl Default for JournalistConfig {
    fn default() -> Self {
        Self {
            base_workspace_path: PathBuf::from(DEFAULT_BASE_WORKSPACE_PATH),
            max_age_days: None,
            request_timeout: Duration::from_secs(15),
            user_agent: format!("journalist/{}", env!("CARGO_PKG_VERSION")),
            max_parallel_fetches: 12,
            max_links_per_page: 25,
        }
    }
}
