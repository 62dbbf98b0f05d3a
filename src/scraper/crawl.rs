//! Link discovery and keyword matching on index pages.
//!
//! Discovered links are resolved against the page's base URL, deduplicated
//! in first-seen order, and capped per page so one link farm cannot swamp a
//! batch.

use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());

/// One discovered link: absolute URL plus its anchor text.
#[derive(Debug, Clone)]
pub struct DiscoveredLink {
    pub url: String,
    pub anchor: String,
}

/// Collect links from an index page.
///
/// Relative hrefs are resolved against `base`; fragment-only, `mailto:`,
/// and `javascript:` hrefs are skipped, as is a link back to the page
/// itself. At most `cap` links are returned, in document order.
pub fn discover_links(html: &str, base: &Url, cap: usize) -> Vec<DiscoveredLink> {
    let document = Html::parse_document(html);
    let links: Vec<DiscoveredLink> = document
        .select(&LINK_SELECTOR)
        .filter_map(|element| {
            let href = element.value().attr("href")?;
            if href.starts_with('#')
                || href.starts_with("mailto:")
                || href.starts_with("javascript:")
            {
                return None;
            }
            let mut resolved = base.join(href).ok()?;
            resolved.set_fragment(None);
            if resolved == *base {
                return None;
            }
            let anchor = element.text().collect::<Vec<_>>().join(" ");
            Some(DiscoveredLink {
                url: resolved.to_string(),
                anchor: anchor.trim().to_string(),
            })
        })
        .unique_by(|link| link.url.clone())
        .take(cap)
        .collect();

    debug!(base = %base, count = links.len(), "Discovered links");
    links
}

/// Keywords (case-insensitive) found in a link's URL or anchor text.
///
/// An empty keyword list matches nothing; callers treat that case as
/// "follow every link".
pub fn matching_keywords(link: &DiscoveredLink, keywords: &[String]) -> Vec<String> {
    let haystack = format!("{} {}", link.url, link.anchor).to_lowercase();
    keywords
        .iter()
        .filter(|kw| !kw.is_empty() && haystack.contains(&kw.to_lowercase()))
        .cloned()
        .collect()
}

/// Whether two URLs share a host, used to keep deeper crawling within the
/// seed's domain.
pub fn same_domain(a: &Url, b: &Url) -> bool {
    match (a.host_str(), b.host_str()) {
        (Some(ha), Some(hb)) => ha == hb,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX_HTML: &str = r##"
        <html><body>
            <a href="/futbol/mourinho-donecek">Mourinho donecek</a>
            <a href="https://other.test/story">Cross domain story</a>
            <a href="#section">Skip fragment</a>
            <a href="mailto:tips@example.com">Skip mailto</a>
            <a href="javascript:void(0)">Skip js</a>
            <a href="/futbol/mourinho-donecek">Duplicate link</a>
            <a href="/basketbol/derbi">Derbi haberi</a>
        </body></html>
    "##;

    #[test]
    fn test_discover_links_resolves_and_dedupes() {
        let base = Url::parse("https://www.fanatik.com.tr/futbol").unwrap();
        let links = discover_links(INDEX_HTML, &base, 25);

        let urls: Vec<&str> = links.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.fanatik.com.tr/futbol/mourinho-donecek",
                "https://other.test/story",
                "https://www.fanatik.com.tr/basketbol/derbi",
            ]
        );
    }

    #[test]
    fn test_discover_links_respects_cap() {
        let base = Url::parse("https://www.fanatik.com.tr/futbol").unwrap();
        let links = discover_links(INDEX_HTML, &base, 1);
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn test_matching_keywords_case_insensitive() {
        let link = DiscoveredLink {
            url: "https://www.fanatik.com.tr/futbol/mourinho-donecek".to_string(),
            anchor: "Mourinho donecek".to_string(),
        };
        let matched = matching_keywords(&link, &["MOURINHO".to_string(), "derbi".to_string()]);
        assert_eq!(matched, vec!["MOURINHO"]);
    }

    #[test]
    fn test_matching_keywords_checks_anchor_text() {
        let link = DiscoveredLink {
            url: "https://a.test/story-1234".to_string(),
            anchor: "Galatasaray wins the cup".to_string(),
        };
        let matched = matching_keywords(&link, &["galatasaray".to_string()]);
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn test_empty_keywords_match_nothing() {
        let link = DiscoveredLink {
            url: "https://a.test/story".to_string(),
            anchor: "Anything".to_string(),
        };
        assert!(matching_keywords(&link, &[]).is_empty());
    }

    #[test]
    fn test_same_domain() {
        let a = Url::parse("https://a.test/index").unwrap();
        let b = Url::parse("https://a.test/story/1").unwrap();
        let c = Url::parse("https://b.test/story/1").unwrap();
        assert!(same_domain(&a, &b));
        assert!(!same_domain(&a, &c));
    }
}
