//! Title resolution.
//!
//! Many sites repeat their logo/name as an `<h1>` inside `<header>`, and
//! readability sometimes picks that up. The article headline is usually an
//! `<h1>` inside `<main>`/`<article>`, or else the first `<h1>` after the
//! header.

use crate::page::{ElementView, Page};

/// Pick the article title, preferring a semantically placed `<h1>` over the
/// readability guess.
pub fn resolve_title(page: &Page, extractor_title: &str) -> String {
    headline_in_content(page)
        .or_else(|| headline_after_header(page))
        .map(|h1| h1.trimmed_text().into_owned())
        .unwrap_or_else(|| extractor_title.to_string())
}

/// First `<h1>` that sits inside `<main>` or `<article>`.
fn headline_in_content(page: &Page) -> Option<ElementView<'_>> {
    page.find_first(|el| {
        el.is("h1") && page.has_ancestor(el.id(), |a| a.is("main") || a.is("article"))
    })
}

/// First `<h1>` inside `<body>` that comes after the first `<header>` and is
/// not part of it. Without a header, the first `<h1>` in the body.
fn headline_after_header(page: &Page) -> Option<ElementView<'_>> {
    let body = page.first_tag("body")?;
    let header = page.first_tag("header").map(|h| h.id());
    let mut passed_header = header.is_none();

    page.elements()
        .filter(|el| page.contains(body.id(), el.id()))
        .find(|el| {
            if Some(el.id()) == header {
                passed_header = true;
                return false;
            }
            passed_header && el.is("h1") && !header.is_some_and(|h| page.contains(h, el.id()))
        })
}
