//! Author resolution.
//!
//! Readability bylines are often missing, so the author is resolved through an
//! ordered chain of probes; the first non-empty answer wins:
//!
//! 1. readability byline
//! 2. JSON-LD `author.name`
//! 3. `<meta name="author">` / `<meta property="article:author">`
//! 4. first element whose class/id mentions `author` or `byline`
//! 5. keyword-prefixed text (`By ...`, `Written by ...`) in `p`, `div`, `h6`

use serde_json::Value;
use tracing::debug;

use crate::page::Page;

/// Keyword prefixes checked, in this order, against each candidate element.
const AUTHOR_KEYWORDS: [&str; 4] = ["creator and contributing author", "author", "by", "written by"];

/// Elements whose text is scanned for keyword prefixes.
const KEYWORD_SCAN_TAGS: [&str; 3] = ["p", "div", "h6"];

/// Byline containers longer than this are assumed to be layout wrappers.
const MAX_BYLINE_CHARS: usize = 100;

/// Longest name accepted from a keyword-prefixed line.
const MAX_KEYWORD_NAME_CHARS: usize = 60;

/// Outcome of a single metadata probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The probe produced a value.
    Found(T),
    /// The source the probe reads is absent or carries no value.
    NotFound,
    /// The source exists but could not be interpreted.
    Malformed(String),
}

/// Resolve the best-guess author of `page`. Returns an empty string if
/// nothing qualifies.
pub fn resolve_author(page: &Page, byline: Option<&str>) -> String {
    if let Some(name) = byline.map(str::trim).filter(|b| !b.is_empty()) {
        return name.to_string();
    }

    match json_ld_author(page) {
        Lookup::Found(name) => return name,
        Lookup::Malformed(reason) => debug!(%reason, "ignoring malformed JSON-LD block"),
        Lookup::NotFound => {}
    }

    meta_author(page)
        .or_else(|| byline_element_author(page))
        .or_else(|| keyword_author(page))
        .unwrap_or_default()
}

/// Read `author.name` from the first JSON-LD block. When `author` is an
/// array, its first entry is used.
pub fn json_ld_author(page: &Page) -> Lookup<String> {
    let Some(script) = page.find_first(|el| {
        el.is("script")
            && el
                .attr("type")
                .is_some_and(|t| t.trim().eq_ignore_ascii_case("application/ld+json"))
    }) else {
        return Lookup::NotFound;
    };

    let data: Value = match serde_json::from_str(&script.text()) {
        Ok(v) => v,
        Err(e) => return Lookup::Malformed(format!("invalid JSON: {e}")),
    };

    let author = match data.get("author") {
        Some(Value::Array(entries)) => entries.first(),
        other => other,
    };

    match author.and_then(|a| a.get("name")) {
        None | Some(Value::Null) => Lookup::NotFound,
        Some(Value::String(name)) => {
            let name = name.trim();
            if name.is_empty() {
                Lookup::NotFound
            } else {
                Lookup::Found(name.to_string())
            }
        }
        Some(other) => Lookup::Malformed(format!("author name is not a string: {other}")),
    }
}

fn meta_author(page: &Page) -> Option<String> {
    page.find_first(|el| {
        el.is("meta")
            && (el.attr("name") == Some("author") || el.attr("property") == Some("article:author"))
    })
    .and_then(|meta| meta.attr("content"))
    .map(str::trim)
    .filter(|c| !c.is_empty())
    .map(String::from)
}

/// Only the first matching element is considered; if its text is empty or
/// too long the probe misses rather than trying the next candidate.
fn byline_element_author(page: &Page) -> Option<String> {
    let el = page.find_first(|el| {
        mentions_author(el.attr("class")) || mentions_author(el.attr("id"))
    })?;
    let text = el.trimmed_text();
    (!text.is_empty() && text.chars().count() < MAX_BYLINE_CHARS).then(|| text.to_string())
}

fn mentions_author(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.contains("author") || v.contains("byline"))
}

fn keyword_author(page: &Page) -> Option<String> {
    page.elements()
        .filter(|el| KEYWORD_SCAN_TAGS.contains(&el.tag()))
        .find_map(|el| name_after_keyword(&el.trimmed_text()))
}

/// Strip a known keyword prefix from `text` and return the remaining name
/// when it is 1–60 characters long.
fn name_after_keyword(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    AUTHOR_KEYWORDS.iter().find_map(|kw| {
        if !lower.starts_with(kw) {
            return None;
        }
        // Keywords are ASCII, so the prefix has the same byte length in both
        // strings unless lowercasing shifted earlier characters.
        let rest = text.get(kw.len()..).unwrap_or(&lower[kw.len()..]).trim();
        let len = rest.chars().count();
        (1..=MAX_KEYWORD_NAME_CHARS).contains(&len).then(|| rest.to_string())
    })
}
