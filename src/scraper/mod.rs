//! The scraping collaborator: fetch, crawl, and extract.
//!
//! Scraping follows a consistent two-phase pattern:
//!
//! 1. **Discovery**: fetch each seed page, collect links, keep those that
//!    match the requested keywords, and follow same-domain links to a
//!    bounded depth
//! 2. **Fetching**: download each kept link concurrently and extract article
//!    content from it
//!
//! All I/O-bound work runs as concurrent per-URL tasks; the result is a
//! fully materialized [`ScrapeResult`] handed to the synchronous core
//! pipeline. Failed fetches and extractions are logged and skipped without
//! failing the batch, so a dead seed URL simply contributes zero articles.

pub mod crawl;
pub mod extract;
pub mod fetch;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::config::JournalistConfig;
use crate::error::Result;
use crate::models::{Article, ScrapeResult, SessionMetadata, PIPELINE_VERSION};
use crate::utils::truncate_for_log;
use crawl::DiscoveredLink;
use fetch::Fetcher;

/// Candidate article link carried from discovery into the fetch phase.
#[derive(Debug, Clone)]
struct Candidate {
    url: String,
    link_keywords: Vec<String>,
}

/// Concurrent fetch-and-extract engine for one processing instance.
#[derive(Debug, Clone)]
pub struct WebScraper {
    fetcher: Fetcher,
    max_parallel: usize,
    max_links_per_page: usize,
}

impl WebScraper {
    pub fn new(config: &JournalistConfig) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new(config)?,
            max_parallel: config.max_parallel_fetches,
            max_links_per_page: config.max_links_per_page,
        })
    }

    /// Run one scraping batch: discover links from `urls`, filter them by
    /// `keywords`, follow to `scrape_depth`, and extract articles.
    ///
    /// With an empty keyword list every discovered link is followed.
    /// Per-URL failures are isolated and logged; the returned metadata
    /// accounts for everything that was attempted.
    #[instrument(level = "info", skip_all, fields(session_id = %session_id, urls = urls.len(), depth = scrape_depth))]
    pub async fn execute_for_session(
        &self,
        session_id: &str,
        urls: &[String],
        keywords: &[String],
        scrape_depth: usize,
    ) -> ScrapeResult {
        let start_time = Utc::now();

        let candidates = self.discover(urls, keywords, scrape_depth).await;
        let links_discovered = candidates.len();
        info!(links_discovered, "Link discovery completed");

        let articles = self.fetch_candidates(candidates, keywords).await;
        let articles_scraped = articles.len();
        info!(articles_scraped, "Article fetching completed");

        let end_time = Utc::now();
        let duration_seconds =
            (end_time - start_time).num_milliseconds() as f64 / 1000.0;
        let success_rate = if links_discovered > 0 {
            articles_scraped as f64 / links_discovered as f64
        } else {
            0.0
        };

        ScrapeResult {
            articles,
            metadata: SessionMetadata {
                session_id: session_id.to_string(),
                start_time,
                end_time,
                duration_seconds,
                links_discovered,
                articles_scraped,
                success_rate,
                pipeline_version: PIPELINE_VERSION.to_string(),
            },
        }
    }

    /// Breadth-first link discovery over `scrape_depth` levels of index
    /// pages, constrained to the seed's domain beyond the first level.
    async fn discover(
        &self,
        urls: &[String],
        keywords: &[String],
        scrape_depth: usize,
    ) -> Vec<Candidate> {
        let mut seen: HashSet<String> = urls.iter().cloned().collect();
        let mut candidates: Vec<Candidate> = Vec::new();
        let mut index_pages: Vec<String> = urls.to_vec();

        for level in 0..scrape_depth.max(1) {
            if index_pages.is_empty() {
                break;
            }
            debug!(level, pages = index_pages.len(), "Crawling index level");

            let pages: Vec<(Url, Vec<DiscoveredLink>)> = stream::iter(std::mem::take(&mut index_pages))
                .map(|page| async move {
                    let base = match Url::parse(&page) {
                        Ok(base) => base,
                        Err(e) => {
                            warn!(url = %page, error = %e, "Skipping unparseable index URL");
                            return None;
                        }
                    };
                    match self.fetcher.fetch_text(&page).await {
                        Ok(html) => {
                            let links =
                                crawl::discover_links(&html, &base, self.max_links_per_page);
                            Some((base, links))
                        }
                        Err(e) => {
                            warn!(url = %page, error = %e, "Index fetch failed; source contributes no links");
                            None
                        }
                    }
                })
                .buffer_unordered(self.max_parallel)
                .filter_map(std::future::ready)
                .collect()
                .await;

            let mut next_level = Vec::new();
            for (base, links) in pages {
                for link in links {
                    if !seen.insert(link.url.clone()) {
                        continue;
                    }
                    let matched = crawl::matching_keywords(&link, keywords);
                    if !keywords.is_empty() && matched.is_empty() {
                        continue;
                    }
                    if level + 1 < scrape_depth.max(1) {
                        if let Ok(link_url) = Url::parse(&link.url) {
                            if crawl::same_domain(&base, &link_url) {
                                next_level.push(link.url.clone());
                            }
                        }
                    }
                    candidates.push(Candidate {
                        url: link.url,
                        link_keywords: matched,
                    });
                }
            }
            index_pages = next_level;
        }

        candidates
    }

    /// Fetch and extract every candidate concurrently, dropping failures.
    async fn fetch_candidates(
        &self,
        candidates: Vec<Candidate>,
        keywords: &[String],
    ) -> Vec<Article> {
        stream::iter(candidates)
            .map(|candidate| async move {
                let html = match self.fetcher.fetch_text(&candidate.url).await {
                    Ok(html) => html,
                    Err(e) => {
                        warn!(url = %candidate.url, error = %e, "Article fetch failed; skipping");
                        return None;
                    }
                };
                match extract::extract_article(
                    &html,
                    &candidate.url,
                    keywords,
                    &candidate.link_keywords,
                ) {
                    Ok(article) => {
                        debug!(
                            url = %candidate.url,
                            title = %truncate_for_log(&article.title, 80),
                            "Extracted article"
                        );
                        Some(article)
                    }
                    Err(e) => {
                        warn!(url = %candidate.url, error = %e, "Extraction failed; skipping");
                        None
                    }
                }
            })
            .buffer_unordered(self.max_parallel)
            .filter_map(std::future::ready)
            .collect()
            .await
    }
}
