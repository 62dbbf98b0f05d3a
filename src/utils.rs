//! Utility functions for domains, filenames, session identifiers, and
//! URL-embedded date extraction.
//!
//! Everything in this module is pure and deterministic: the same input
//! always yields the same output, and nothing here touches the filesystem
//! or the network.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::debug;

use crate::error::{Error, Result};

/// Extract the host component of a URL.
///
/// The scheme and path are stripped; a leading `www.` is preserved as-is.
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] if the URL cannot be parsed or has no host.
///
/// # Examples
///
/// ```
/// # use journalist::utils::extract_domain;
/// assert_eq!(
///     extract_domain("https://www.fanatik.com.tr/futbol").unwrap(),
///     "www.fanatik.com.tr"
/// );
/// assert!(extract_domain("not a url").is_err());
/// ```
pub fn extract_domain(url: &str) -> Result<String> {
    let parsed = url::Url::parse(url).map_err(|_| Error::InvalidUrl {
        url: url.to_string(),
    })?;
    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(host.to_string()),
        _ => Err(Error::InvalidUrl {
            url: url.to_string(),
        }),
    }
}

/// Map a domain or URL into a filesystem-safe token.
///
/// Every character outside `[A-Za-z0-9]` becomes `_`. Repeated separators
/// are preserved as-is so the mapping stays deterministic; two distinct
/// domains produced by [`extract_domain`] do not collide in practice.
pub fn sanitize_for_filename(token: &str) -> String {
    token
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Derive a stable article identifier from its URL.
///
/// Uses FNV-1a over the URL bytes so identifiers are deterministic across
/// runs; re-persisting the same URL overwrites its previous entry.
pub fn article_id(url: &str) -> String {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    let mut hash = FNV_OFFSET;
    for byte in url.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    format!("{hash:016x}")
}

// Last microsecond timestamp handed out, used to keep ids strictly
// increasing when two sessions start within the same microsecond.
static LAST_STAMP: AtomicI64 = AtomicI64::new(0);

/// Generate a time-derived session identifier in
/// `YYYYMMDD_HHMMSS_microseconds` format.
///
/// Identifiers are strictly increasing within a process, so concurrent
/// construction of multiple instances never collides.
pub fn session_id() -> String {
    let micros = Utc::now().timestamp_micros();
    loop {
        let prev = LAST_STAMP.load(Ordering::SeqCst);
        let candidate = micros.max(prev + 1);
        if LAST_STAMP
            .compare_exchange(prev, candidate, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            let stamp = DateTime::<Utc>::from_timestamp_micros(candidate)
                .unwrap_or_else(Utc::now);
            return stamp.format("%Y%m%d_%H%M%S_%6f").to_string();
        }
    }
}

static URL_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{4})[/_-](\d{1,2})[/_-](\d{1,2})").unwrap()
});

/// Find calendar dates embedded in a URL path.
///
/// Recognizes `YYYY/MM/DD`-shaped tokens with `/`, `_`, or `-` separators,
/// e.g. `/news/2023/11/08/article` or `archive_2022_12_25_christmas`.
/// Implausible years and invalid calendar dates are discarded.
pub fn extract_dates_from_url(url: &str) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    for caps in URL_DATE_RE.captures_iter(url) {
        let year: i32 = match caps[1].parse() {
            Ok(y) => y,
            Err(_) => continue,
        };
        if !(1990..=2100).contains(&year) {
            continue;
        }
        let month: u32 = match caps[2].parse() {
            Ok(m) => m,
            Err(_) => continue,
        };
        let day: u32 = match caps[3].parse() {
            Ok(d) => d,
            Err(_) => continue,
        };
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            debug!(%url, %date, "Found date embedded in URL");
            dates.push(date);
        }
    }
    dates
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at `max` bytes with an ellipsis and byte count
/// indicator appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut cut = max;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_domain_preserves_www() {
        assert_eq!(
            extract_domain("https://www.fanatik.com.tr/futbol").unwrap(),
            "www.fanatik.com.tr"
        );
    }

    #[test]
    fn test_extract_domain_strips_scheme_and_path() {
        assert_eq!(
            extract_domain("https://text.npr.org/article?id=1#top").unwrap(),
            "text.npr.org"
        );
        assert_eq!(extract_domain("http://a.test").unwrap(), "a.test");
    }

    #[test]
    fn test_extract_domain_rejects_hostless_urls() {
        assert!(extract_domain("not a url").is_err());
        assert!(extract_domain("example.com/no-scheme").is_err());
        assert!(extract_domain("").is_err());
    }

    #[test]
    fn test_extract_domain_is_deterministic() {
        let url = "https://news.site.com/category/article?id=123";
        assert_eq!(
            extract_domain(url).unwrap(),
            extract_domain(url).unwrap()
        );
    }

    #[test]
    fn test_sanitize_for_filename() {
        assert_eq!(
            sanitize_for_filename("www.fanatik.com.tr"),
            "www_fanatik_com_tr"
        );
        assert_eq!(sanitize_for_filename("a.test"), "a_test");
        assert_eq!(sanitize_for_filename("already_safe123"), "already_safe123");
        assert_eq!(sanitize_for_filename(""), "");
    }

    #[test]
    fn test_sanitize_preserves_repeated_separators() {
        assert_eq!(sanitize_for_filename("a..b"), "a__b");
        assert_eq!(sanitize_for_filename("a:/b"), "a__b");
    }

    #[test]
    fn test_sanitize_is_total_and_deterministic() {
        let token = "héllo wörld/?.com";
        assert_eq!(sanitize_for_filename(token), sanitize_for_filename(token));
        assert!(sanitize_for_filename(token)
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }

    #[test]
    fn test_article_id_is_stable() {
        let url = "https://example.com/story";
        assert_eq!(article_id(url), article_id(url));
        assert_eq!(article_id(url).len(), 16);
    }

    #[test]
    fn test_article_id_differs_per_url() {
        assert_ne!(
            article_id("https://example.com/a"),
            article_id("https://example.com/b")
        );
    }

    #[test]
    fn test_session_id_format() {
        let id = session_id();
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].len(), 8);
        assert!(parts[0].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[1].len(), 6);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_session_id_uniqueness() {
        let ids: Vec<String> = (0..50).map(|_| session_id()).collect();
        let unique: std::collections::HashSet<&String> = ids.iter().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_extract_dates_from_url() {
        let cases = [
            ("https://example.com/news/2023/11/08/article", true),
            ("https://example.com/archive_2022_12_25_christmas", true),
            ("https://site.com/2024/03/20/article", true),
            ("https://example.com/no-date-article", false),
            ("https://example.com/current-news", false),
        ];
        for (url, should_find) in cases {
            let dates = extract_dates_from_url(url);
            assert_eq!(!dates.is_empty(), should_find, "url: {url}");
        }
    }

    #[test]
    fn test_extract_dates_rejects_invalid_calendar_dates() {
        assert!(extract_dates_from_url("https://x.test/2023/13/40/a").is_empty());
        assert!(extract_dates_from_url("https://x.test/1234/01/01/a").is_empty());
    }

    #[test]
    fn test_truncate_for_log() {
        assert_eq!(truncate_for_log("short", 100), "short");
        let long = "a".repeat(500);
        let result = truncate_for_log(&long, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("(+400 bytes)"));
    }
}
