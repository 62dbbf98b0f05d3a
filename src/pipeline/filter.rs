//! Temporal filtering of scraped articles.
//!
//! This stage is purely temporal: quality and length filtering belong to the
//! extraction collaborator. An article with no recency signal at all cannot
//! be judged stale and is always kept.

use chrono::{Duration, Utc};
use tracing::debug;

use crate::models::Article;
use crate::utils::extract_dates_from_url;

/// Drop articles older than `max_age_days`, preserving the order of
/// survivors.
///
/// The recency signal is the article's `published_at` timestamp when
/// present. When absent, a calendar date embedded in the article URL is used
/// as a fallback signal; URLs carrying several dates are judged by the most
/// recent one. Articles with no signal are kept.
///
/// `None` disables filtering entirely.
pub fn filter_by_recency(articles: Vec<Article>, max_age_days: Option<i64>) -> Vec<Article> {
    let Some(days) = max_age_days else {
        return articles;
    };
    let cutoff = Utc::now() - Duration::days(days);
    let cutoff_date = cutoff.date_naive();

    articles
        .into_iter()
        .filter(|article| {
            if let Some(published) = article.published_at {
                if published < cutoff {
                    debug!(
                        url = %article.url,
                        %published,
                        %cutoff,
                        "Dropping article: published before cutoff"
                    );
                    return false;
                }
                return true;
            }

            let url_dates = extract_dates_from_url(&article.url);
            if let Some(newest) = url_dates.iter().max() {
                if *newest < cutoff_date {
                    debug!(
                        url = %article.url,
                        date = %newest,
                        "Dropping article: URL-embedded date before cutoff"
                    );
                    return false;
                }
            }
            true
        })
        .collect()
}
