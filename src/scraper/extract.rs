//! HTML content extraction for article pages.
//!
//! Extraction is best-effort and selector-driven, tried in order of
//! decreasing structure:
//!
//! | Field | Sources, in priority order |
//! |-------|----------------------------|
//! | title | `og:title` meta, `<title>`, first `<h1>` |
//! | body | `<article>`, `<main>`, all `<p>` elements |
//! | author | `meta[name=author]` |
//! | published | `article:published_time` meta, `<time datetime>` |
//! | language | `<html lang>` |
//!
//! The selector family that produced the body is recorded in the article's
//! extraction metadata so downstream consumers can judge confidence.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Article, ExtractionInfo};
use crate::utils::article_id;

static OG_TITLE: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="og:title"]"#).unwrap());
static TITLE: Lazy<Selector> = Lazy::new(|| Selector::parse("title").unwrap());
static H1: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").unwrap());
static ARTICLE: Lazy<Selector> = Lazy::new(|| Selector::parse("article").unwrap());
static MAIN: Lazy<Selector> = Lazy::new(|| Selector::parse("main").unwrap());
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());
static AUTHOR: Lazy<Selector> = Lazy::new(|| Selector::parse(r#"meta[name="author"]"#).unwrap());
static PUBLISHED: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[property="article:published_time"]"#).unwrap());
static TIME: Lazy<Selector> = Lazy::new(|| Selector::parse("time[datetime]").unwrap());

/// Extract an [`Article`] from a fetched page.
///
/// `link_keywords` are keyword matches already established at link-discovery
/// time; they are merged with keywords found in the extracted title and
/// body.
///
/// # Errors
///
/// Returns [`Error::Extraction`] when the page yields no body text at all.
pub fn extract_article(
    html: &str,
    url: &str,
    keywords: &[String],
    link_keywords: &[String],
) -> Result<Article> {
    let document = Html::parse_document(html);

    let (body, method) = extract_body(&document);
    if body.is_empty() {
        return Err(Error::Extraction {
            url: url.to_string(),
            reason: "no textual content".to_string(),
        });
    }

    let title = extract_title(&document);
    let author = document
        .select(&AUTHOR)
        .next()
        .and_then(|e| e.value().attr("content"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let published_at = extract_published(&document, url);
    let language = document
        .root_element()
        .value()
        .attr("lang")
        .map(|s| s.to_string());

    let haystack = format!("{title} {body}").to_lowercase();
    let mut keywords_matched: Vec<String> = keywords
        .iter()
        .filter(|kw| !kw.is_empty() && haystack.contains(&kw.to_lowercase()))
        .cloned()
        .collect();
    for kw in link_keywords {
        if !keywords_matched.contains(kw) {
            keywords_matched.push(kw.clone());
        }
    }

    let word_count = body.split_whitespace().count();
    debug!(%url, method, word_count, "Extracted article");

    Ok(Article {
        id: article_id(url),
        url: url.to_string(),
        title,
        body,
        author,
        published_at,
        scraped_at: Utc::now(),
        keywords_matched,
        extraction: ExtractionInfo {
            method: method.to_string(),
            language,
            word_count,
        },
    })
}

fn extract_title(document: &Html) -> String {
    if let Some(title) = document
        .select(&OG_TITLE)
        .next()
        .and_then(|e| e.value().attr("content"))
    {
        let title = title.trim();
        if !title.is_empty() {
            return title.to_string();
        }
    }
    for selector in [&*TITLE, &*H1] {
        if let Some(element) = document.select(selector).next() {
            let text = element.text().collect::<Vec<_>>().join(" ");
            let text = text.trim();
            if !text.is_empty() {
                return text.to_string();
            }
        }
    }
    String::new()
}

fn extract_body(document: &Html) -> (String, &'static str) {
    for (selector, method) in [(&*ARTICLE, "article-tag"), (&*MAIN, "main-tag")] {
        if let Some(element) = document.select(selector).next() {
            let text = normalize_text(element.text());
            if !text.is_empty() {
                return (text, method);
            }
        }
    }
    let paragraphs: Vec<String> = document
        .select(&PARAGRAPH)
        .map(|p| normalize_text(p.text()))
        .filter(|t| !t.is_empty())
        .collect();
    (paragraphs.join("\n"), "paragraphs")
}

fn normalize_text<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn extract_published(document: &Html, url: &str) -> Option<DateTime<Utc>> {
    let raw = document
        .select(&PUBLISHED)
        .next()
        .and_then(|e| e.value().attr("content"))
        .or_else(|| {
            document
                .select(&TIME)
                .next()
                .and_then(|e| e.value().attr("datetime"))
        })?;

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    debug!(%url, raw, "Unparseable publication timestamp; treating as undated");
    None
}
