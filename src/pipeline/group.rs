//! Partitioning of a filtered article list into per-source buckets.
//!
//! Bucket keys are sanitized domains, so the same key later names the
//! record's file in persistent mode. Iteration order is the order of the
//! originally requested URLs, followed by any on-demand buckets in
//! first-seen article order.

use itertools::Itertools;
use tracing::warn;

use crate::error::Error;
use crate::models::{Article, SourceBucket};
use crate::utils::{extract_domain, sanitize_for_filename};

/// Partition `articles` into per-domain buckets.
///
/// Every URL in `original_urls` seeds an empty bucket keyed by its sanitized
/// domain, even if no articles matched it; duplicate URLs collapse to one
/// bucket. Articles are attributed by the domain of their own URL. An
/// article whose domain matches no requested source gets a bucket created on
/// demand, with `source_url` set to that article's URL (best-effort
/// provenance, since no original URL applies).
///
/// Per-item failures are isolated: a requested URL with no parseable host is
/// logged and skipped (never merged into another bucket), and an article
/// whose URL cannot be parsed is dropped with a logged
/// [`Error::MalformedArticle`].
pub fn group_by_source(
    articles: Vec<Article>,
    original_urls: &[String],
) -> Vec<(String, SourceBucket)> {
    let mut buckets: Vec<(String, SourceBucket)> = Vec::new();

    for url in original_urls.iter().unique() {
        match extract_domain(url) {
            Ok(domain) => {
                let key = sanitize_for_filename(&domain);
                if buckets.iter().any(|(k, _)| *k == key) {
                    continue;
                }
                buckets.push((
                    key,
                    SourceBucket {
                        source_url: url.clone(),
                        source_domain: domain,
                        articles: Vec::new(),
                    },
                ));
            }
            Err(e) => {
                warn!(%url, error = %e, "Skipping requested URL with no parseable host");
            }
        }
    }

    for article in articles {
        let domain = match extract_domain(&article.url) {
            Ok(domain) => domain,
            Err(_) => {
                let e = Error::MalformedArticle {
                    url: article.url.clone(),
                };
                warn!(error = %e, "Dropping unattributable article");
                continue;
            }
        };
        let key = sanitize_for_filename(&domain);
        match buckets.iter_mut().find(|(k, _)| *k == key) {
            Some((_, bucket)) => bucket.articles.push(article),
            None => {
                let bucket = SourceBucket {
                    source_url: article.url.clone(),
                    source_domain: domain,
                    articles: vec![article],
                };
                buckets.push((key, bucket));
            }
        }
    }

    buckets
}
