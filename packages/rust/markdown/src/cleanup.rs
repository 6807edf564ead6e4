//! Post-conversion cleanup pipeline for Markdown output.
//!
//! Each cleanup pass is a function `&str -> String` applied in sequence.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use url::Url;

/// Run the full cleanup pipeline on raw Markdown text.
pub(crate) fn run_pipeline(md: &str, base_url: Option<&Url>) -> String {
    let mut result = collapse_blank_lines(md);
    result = fix_code_fence_languages(&result);
    result = resolve_links(&result, base_url);
    result = trim_line_ends(&result);
    result.trim().to_string()
}

/// Collapse runs of blank lines into a single blank line.
fn collapse_blank_lines(md: &str) -> String {
    static MULTI_BLANK_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\n[ \t]*\n(?:[ \t]*\n)+").expect("valid regex"));

    MULTI_BLANK_RE.replace_all(md, "\n\n").into_owned()
}

/// Strip class-style prefixes from code fence info strings
/// (`language-js`, `lang-python`, `highlight-rust`).
fn fix_code_fence_languages(md: &str) -> String {
    static LANG_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"(?m)^```(?:language-|lang-|highlight-)(\w+)").expect("valid regex")
    });

    LANG_PREFIX_RE.replace_all(md, "```$1").into_owned()
}

/// Apply `pass` to every line outside fenced code blocks. Fence lines and
/// fenced content are kept verbatim.
fn map_outside_fences(md: &str, pass: impl Fn(&str) -> String) -> String {
    let mut in_fence = false;
    md.lines()
        .map(|line| {
            if line.trim_start().starts_with("```") {
                in_fence = !in_fence;
                return line.to_string();
            }
            if in_fence { line.to_string() } else { pass(line) }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Resolve relative link targets against the page URL. Images, anchors,
/// absolute targets and anything inside fenced code are left as they are.
fn resolve_links(md: &str, base_url: Option<&Url>) -> String {
    static LINK_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(!?)\[([^\]]*)\]\(([^)\s]+)\)").expect("valid regex"));

    let Some(base) = base_url else {
        return md.to_string();
    };

    map_outside_fences(md, |line| {
        LINK_RE
            .replace_all(line, |caps: &Captures<'_>| {
                let href = &caps[3];
                let keep = !caps[1].is_empty()
                    || href.starts_with('#')
                    || href.contains("://")
                    || href.starts_with("mailto:");
                if keep {
                    return caps[0].to_string();
                }
                match base.join(href) {
                    Ok(resolved) => format!("[{}]({resolved})", &caps[2]),
                    Err(_) => caps[0].to_string(),
                }
            })
            .into_owned()
    })
}

/// Drop trailing whitespace from every line.
fn trim_line_ends(md: &str) -> String {
    md.lines().map(str::trim_end).collect::<Vec<_>>().join("\n")
}
