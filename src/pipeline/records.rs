//! Conversion of source buckets into self-contained session records.

use chrono::Utc;
use tracing::debug;

use crate::models::{SessionMetadata, SourceBucket, SourceSession, SourceSessionMetadata};

/// Build one [`SourceSession`] per bucket, in bucket order.
///
/// Shared session fields are merged with per-source derived fields: the
/// source's article count and its success rate, computed against discovered
/// links when that count is known and falling back to the batch-level ratio
/// otherwise.
///
/// Never fails for well-formed input; empty buckets still produce a record
/// with a zero count and an empty article list, which is what lets callers
/// detect "attempted but found nothing".
pub fn build_session_records(
    buckets: Vec<(String, SourceBucket)>,
    metadata: &SessionMetadata,
) -> Vec<SourceSession> {
    buckets
        .into_iter()
        .map(|(key, bucket)| {
            let articles_count = bucket.articles.len();
            let success_rate = if metadata.links_discovered > 0 {
                articles_count as f64 / metadata.links_discovered as f64
            } else {
                metadata.success_rate
            };
            debug!(
                bucket = %key,
                articles_count,
                success_rate,
                "Building session record"
            );
            SourceSession {
                source_domain: bucket.source_domain,
                source_url: bucket.source_url,
                saved_at: Utc::now(),
                articles_count,
                articles: bucket.articles,
                session_metadata: SourceSessionMetadata {
                    session_id: metadata.session_id.clone(),
                    source_specific: true,
                    links_discovered: metadata.links_discovered,
                    duration_seconds: metadata.duration_seconds,
                    success_rate,
                    pipeline_version: metadata.pipeline_version.clone(),
                    articles_count,
                },
            }
        })
        .collect()
}
