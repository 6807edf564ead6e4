//! Chapter segmentation of extracted PDF text.

use std::sync::LazyLock;

use regex::Regex;

use distill_shared::BookOptions;

/// `Chapter <n>` followed by separators, capturing the rest of the heading line.
static CHAPTER_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i:chapter)\s+\d+[:.\s]+([^\n]+)").expect("valid regex")
});

/// A chapter heading and the text up to the next heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterSpan<'a> {
    pub heading: &'a str,
    pub body: &'a str,
}

/// A titled section ready to become a book item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub title: String,
    pub content: String,
}

/// Find every chapter heading in `text`. Anything before the first heading
/// is not part of any span.
pub fn scan_chapters(text: &str) -> Vec<ChapterSpan<'_>> {
    let headings: Vec<_> = CHAPTER_HEADING.captures_iter(text).collect();

    headings
        .iter()
        .enumerate()
        .filter_map(|(i, caps)| {
            let whole = caps.get(0)?;
            let heading = caps.get(1)?.as_str();
            let body_end = headings
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(text.len(), |m| m.start());
            Some(ChapterSpan {
                heading,
                body: &text[whole.end()..body_end],
            })
        })
        .collect()
}

/// Split book text into chapters.
///
/// With headings present, the first `chapter_limit` spans become
/// `"Chapter <n>: <heading>"` sections numbered by position. Without any,
/// the whole text is one section titled with the file's base name.
pub fn segment(text: &str, file_name: &str, options: BookOptions) -> Vec<Chapter> {
    let spans = scan_chapters(text);

    if spans.is_empty() {
        return vec![Chapter {
            title: file_base_name(file_name).to_string(),
            content: text.trim().to_string(),
        }];
    }

    spans
        .into_iter()
        .take(options.chapter_limit)
        .enumerate()
        .map(|(i, span)| Chapter {
            title: format!("Chapter {}: {}", i + 1, span.heading.trim()),
            content: span.body.trim().to_string(),
        })
        .collect()
}

/// Last component of a `/` or `\` separated path.
pub fn file_base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(chapter_limit: usize) -> BookOptions {
        BookOptions { chapter_limit }
    }

    #[test]
    fn three_headings_three_chapters() {
        let text = "Preface text\n\
                    Chapter 1: Beginnings\nOnce upon a time.\n\n\
                    Chapter 2: Middle\nThings happened.\n\
                    Chapter 3: End\nThe end.\n";
        let chapters = segment(text, "/books/story.pdf", options(8));

        assert_eq!(chapters.len(), 3);
        assert_eq!(chapters[0].title, "Chapter 1: Beginnings");
        assert_eq!(chapters[0].content, "Once upon a time.");
        assert_eq!(chapters[1].title, "Chapter 2: Middle");
        assert_eq!(chapters[1].content, "Things happened.");
        assert_eq!(chapters[2].title, "Chapter 3: End");
        assert_eq!(chapters[2].content, "The end.");
    }

    #[test]
    fn chapter_limit_caps_output() {
        let text: String = (1..=10)
            .map(|n| format!("Chapter {n}: Part {n}\nBody {n}\n"))
            .collect();
        let chapters = segment(&text, "book.pdf", options(8));

        assert_eq!(chapters.len(), 8);
        assert_eq!(chapters[7].title, "Chapter 8: Part 8");
        assert_eq!(chapters[7].content, "Body 8");
    }

    #[test]
    fn no_headings_uses_file_base_name() {
        let chapters = segment("  Just some prose.\n", "C:\\docs\\notes.pdf", options(8));
        assert_eq!(
            chapters,
            vec![Chapter {
                title: "notes.pdf".into(),
                content: "Just some prose.".into(),
            }]
        );
    }

    #[test]
    fn keyword_case_and_separators() {
        let text = "CHAPTER 4. Loud\nbody a\nchapter 9\nQuiet\nbody b";
        let spans = scan_chapters(text);

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].heading, "Loud");
        assert_eq!(spans[0].body, "\nbody a\n");
        assert_eq!(spans[1].heading, "Quiet");
        assert_eq!(spans[1].body, "\nbody b");
    }

    #[test]
    fn titles_use_ordinal_not_printed_number() {
        let text = "Chapter 7: Seven\nx\nChapter 12: Twelve\ny";
        let chapters = segment(text, "b.pdf", options(8));
        assert_eq!(chapters[0].title, "Chapter 1: Seven");
        assert_eq!(chapters[1].title, "Chapter 2: Twelve");
    }

    #[test]
    fn base_name_handles_both_separators() {
        assert_eq!(file_base_name("/a/b/c.pdf"), "c.pdf");
        assert_eq!(file_base_name("a\\b\\c.pdf"), "c.pdf");
        assert_eq!(file_base_name("mixed/dir\\file.pdf"), "file.pdf");
        assert_eq!(file_base_name("plain.pdf"), "plain.pdf");
    }
}
