//! # Journalist
//!
//! A news extraction pipeline that crawls seed pages, follows discovered
//! links to a bounded depth, filters results by keyword and recency, and
//! persists per-source session records either to an in-process buffer or to
//! per-domain JSON files.
//!
//! ## Usage
//!
//! ```no_run
//! use journalist::{Journalist, JournalistConfig};
//!
//! # async fn run() -> journalist::Result<()> {
//! let mut journalist = Journalist::new(JournalistConfig::default(), true, 1)?;
//! let records = journalist
//!     .read(
//!         &["https://www.fanatik.com.tr/futbol".to_string()],
//!         &["mourinho".to_string()],
//!     )
//!     .await?;
//! for record in &records {
//!     println!("{}: {} articles", record.source_domain, record.articles_count);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! Each `read` call is one self-contained batch:
//! 1. **Discovery**: crawl seed pages for links matching the keywords
//! 2. **Fetching**: download candidate articles concurrently
//! 3. **Processing**: the synchronous core pipeline filters by recency,
//!    groups articles by source domain, and builds one session record per
//!    source
//! 4. **Persistence**: records and articles are written to the session
//!    workspace, or buffered in memory, without changing the return shape

pub mod cli;
pub mod config;
pub mod error;
pub mod journalist;
pub mod models;
pub mod persistence;
pub mod pipeline;
pub mod scraper;
pub mod utils;

pub use config::JournalistConfig;
pub use error::{Error, Result};
pub use journalist::Journalist;
pub use models::{Article, ScrapeResult, SessionMetadata, SourceSession};
