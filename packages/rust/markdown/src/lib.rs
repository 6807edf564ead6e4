//! Sanitized-HTML to Markdown conversion.
//!
//! Converts the article HTML returned by readability to Markdown using `htmd`
//! with a fixed configuration (ATX headings, fenced code blocks), then applies
//! a series of cleanup passes to normalize whitespace, code fences, and links.

mod cleanup;

use std::sync::LazyLock;

use htmd::options::{CodeBlockStyle, HeadingStyle, Options};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};
use url::Url;

use distill_shared::{DistillError, Result};

/// Tags dropped entirely during conversion.
const SKIP_TAGS: [&str; 6] = ["script", "style", "nav", "iframe", "noscript", "svg"];

// ---------------------------------------------------------------------------
// Converter
// ---------------------------------------------------------------------------

/// Convert sanitized content HTML to clean Markdown.
///
/// Relative links are resolved against `base_url` when given.
/// The result carries no leading or trailing whitespace.
#[instrument(skip(html), fields(url = base_url.map(Url::as_str).unwrap_or("")))]
pub fn to_markdown(html: &str, base_url: Option<&Url>) -> Result<String> {
    let (html, tables) = extract_tables(html);

    let converter = htmd::HtmlToMarkdown::builder()
        .skip_tags(SKIP_TAGS.to_vec())
        .options(Options {
            heading_style: HeadingStyle::Atx,
            code_block_style: CodeBlockStyle::Fenced,
            ..Default::default()
        })
        .build();

    let raw_markdown = converter
        .convert(&html)
        .map_err(|e| DistillError::Conversion(format!("htmd conversion failed: {e}")))?;

    debug!(raw_len = raw_markdown.len(), "htmd conversion complete");

    let raw_markdown = restore_tables(raw_markdown, &tables);
    let cleaned = cleanup::run_pipeline(&raw_markdown, base_url);

    debug!(final_len = cleaned.len(), "markdown cleanup complete");

    Ok(cleaned)
}

// ---------------------------------------------------------------------------
// Table pre-processing
// ---------------------------------------------------------------------------

static TABLE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("valid selector"));
static ROW_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("valid selector"));
static CELL_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th, td").expect("valid selector"));

/// Placeholder prefix substituted for tables during conversion.
const TABLE_TOKEN: &str = "DISTILLTABLE";

/// Swap each `<table>` for a placeholder paragraph and pre-render it as a
/// Markdown pipe table.
///
/// `htmd` 0.1 has no table support and collapses whitespace inside text, so
/// tables are rendered separately and spliced back in by [`restore_tables`].
/// The fragment is re-serialized by `scraper` first so each table's outer
/// HTML is an exact substring.
fn extract_tables(html: &str) -> (String, Vec<String>) {
    let doc = Html::parse_fragment(html);

    if doc.select(&TABLE_SEL).next().is_none() {
        return (html.to_string(), Vec::new());
    }

    let mut result = doc.root_element().inner_html();
    let mut tables = Vec::new();
    for table in doc.select(&TABLE_SEL) {
        let outer = table.html();
        if !result.contains(&outer) {
            // Nested inside a table that was already replaced.
            continue;
        }
        let placeholder = format!("<p>{TABLE_TOKEN}{}</p>", tables.len());
        result = result.replacen(&outer, &placeholder, 1);
        tables.push(table_to_markdown(&table));
    }
    (result, tables)
}

/// Replace table placeholders in converted Markdown with the rendered tables.
fn restore_tables(mut markdown: String, tables: &[String]) -> String {
    // Highest index first so `TOKEN1` never matches inside `TOKEN10`.
    for (i, table) in tables.iter().enumerate().rev() {
        markdown = markdown.replace(&format!("{TABLE_TOKEN}{i}"), table);
    }
    markdown
}

/// Convert a single HTML table to a Markdown pipe table.
///
/// The first row is used as the header row.
fn table_to_markdown(table: &ElementRef<'_>) -> String {
    let mut rows: Vec<Vec<String>> = table
        .select(&ROW_SEL)
        .map(|tr| {
            tr.select(&CELL_SEL)
                .map(|cell| cell.text().collect::<String>().trim().replace('|', "\\|"))
                .collect::<Vec<_>>()
        })
        .filter(|cells| !cells.is_empty())
        .collect();

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        return String::new();
    }
    for row in &mut rows {
        row.resize(width, String::new());
    }

    let render_row = |cells: &[String]| format!("| {} |\n", cells.join(" | "));

    let mut md = render_row(&rows[0]);
    md.push_str(&render_row(&vec!["---".to_string(); width]));
    for row in &rows[1..] {
        md.push_str(&render_row(row));
    }
    md.pop();
    md
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(html: &str) -> String {
        let base = Url::parse("https://blog.example.com/posts/hello").unwrap();
        to_markdown(html, Some(&base)).unwrap()
    }

    #[test]
    fn headings_use_atx_style() {
        let md = convert("<h1>Main</h1><p>Intro.</p><h2>Section</h2><p>Body.</p>");
        assert!(md.starts_with("# Main"));
        assert!(md.contains("## Section"));
        assert!(!md.contains("===="));
    }

    #[test]
    fn code_blocks_are_fenced() {
        let md = convert(
            r#"<p>Example:</p><pre><code class="language-rust">fn main() {
    println!("hello");
}</code></pre>"#,
        );
        assert!(md.contains("```rust"), "got: {md}");
        assert!(md.contains("println!"));
        assert!(!md.contains("    fn main"));
    }

    #[test]
    fn output_is_trimmed() {
        let md = convert("<div><p>  Only paragraph.  </p></div>\n\n");
        assert_eq!(md, "Only paragraph.");
    }

    #[test]
    fn relative_links_resolved() {
        let md = convert(r#"<p>See <a href="/posts/other">the other post</a>.</p>"#);
        assert!(md.contains("[the other post](https://blog.example.com/posts/other)"));
    }

    #[test]
    fn scripts_and_styles_dropped() {
        let md = convert("<p>Visible</p><script>var hidden = 1;</script><style>p{}</style>");
        assert!(md.contains("Visible"));
        assert!(!md.contains("hidden"));
    }

    #[test]
    fn tables_become_pipe_tables() {
        let md = convert(
            r#"<p>Data:</p>
            <table>
                <thead><tr><th>Name</th><th>Value</th></tr></thead>
                <tbody><tr><td>foo</td><td>bar</td></tr></tbody>
            </table>"#,
        );
        assert!(md.contains("| Name | Value |"), "got: {md}");
        assert!(md.contains("| --- | --- |"));
        assert!(md.contains("| foo | bar |"));
    }

    #[test]
    fn empty_input_yields_empty_markdown() {
        assert_eq!(convert(""), "");
    }

    #[test]
    fn escaped_html_in_inline_code_is_kept() {
        let md = convert(
            r#"<p>Wrap it in a <code>&lt;div&gt;</code> or <code>&lt;span class="x"&gt;</code> element.</p>"#,
        );
        assert!(md.contains("`<div>`"), "got: {md}");
        assert!(md.contains(r#"`<span class="x">`"#), "got: {md}");
    }
}
