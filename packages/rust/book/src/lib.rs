//! PDF books as knowledge items.
//!
//! - [`decode`]: PDF bytes to text plus metadata
//! - [`segment`]: chapter splitting by heading pattern
//! - [`process_pdf`]: read, decode, segment, and append to a batch

pub mod decode;
pub mod segment;

use std::path::Path;

use tracing::{info, instrument, warn};

use distill_shared::{
    BookOptions, DistillError, KnowledgeBatch, KnowledgeItem, ProgressReporter, Result,
};

pub use decode::{DecodedPdf, decode_pdf};
pub use segment::{Chapter, ChapterSpan, file_base_name, scan_chapters, segment};

/// Turn the PDF at `path` into book items.
///
/// A missing file is a silent no-op (a warning is logged). Read and decode
/// failures are logged and recorded on the batch; they never abort the run.
#[instrument(skip_all, fields(path = %path.display()))]
pub async fn process_pdf(
    path: &Path,
    options: BookOptions,
    batch: &mut KnowledgeBatch,
    progress: &dyn ProgressReporter,
) {
    let source = path.to_string_lossy().into_owned();

    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        warn!("pdf file does not exist, nothing to do");
        return;
    }

    progress.phase("Decoding PDF");
    let decoded = match read_and_decode(path).await {
        Ok(decoded) => decoded,
        Err(e) => {
            warn!(error = %e, "error processing pdf");
            batch.record_failure(source, e.to_string());
            return;
        }
    };

    let chapters = segment(&decoded.text, &source, options);
    info!(
        pages = decoded.page_count,
        chapters = chapters.len(),
        author = %decoded.creator,
        "pdf segmented"
    );

    for chapter in chapters {
        let item = KnowledgeItem::book(chapter.title, chapter.content, &source, &decoded.creator);
        progress.item_added(&item);
        batch.push(item);
    }
}

async fn read_and_decode(path: &Path) -> Result<DecodedPdf> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| DistillError::io(path, e))?;

    tokio::task::spawn_blocking(move || decode_pdf(&bytes))
        .await
        .map_err(|e| DistillError::Pdf(format!("decoder task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use distill_shared::{ContentType, SilentProgress};
    use lopdf::content::{Content, Operation};
    use lopdf::{Document, Object, Stream, dictionary};
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("distill-{name}-{}.pdf", uuid::Uuid::now_v7()))
    }

    /// Single-page PDF with one text line per entry in `lines`.
    fn build_pdf(lines: &[&str], creator: Option<&str>) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("TL", vec![14.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
        ];
        for line in lines {
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        if let Some(creator) = creator {
            let info_id = doc.add_object(dictionary! {
                "Creator" => Object::string_literal(creator),
            });
            doc.trailer.set("Info", info_id);
        }

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[tokio::test]
    async fn chapters_become_book_items() {
        let path = temp_path("chapters");
        let pdf = build_pdf(
            &["Chapter 1: Alpha", "alpha body", "Chapter 2: Beta", "beta body"],
            Some("Writer X"),
        );
        std::fs::write(&path, pdf).unwrap();
        let mut batch = KnowledgeBatch::new();

        process_pdf(&path, BookOptions::default(), &mut batch, &SilentProgress).await;
        std::fs::remove_file(&path).ok();

        assert!(batch.failures().is_empty(), "{:?}", batch.failures());
        let items = batch.items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "Chapter 1: Alpha");
        assert_eq!(items[0].content, "alpha body");
        assert_eq!(items[1].title, "Chapter 2: Beta");
        assert_eq!(items[1].content, "beta body");
        for item in items {
            assert_eq!(item.author, "Writer X");
            assert_eq!(item.content_type, ContentType::Book);
            assert_eq!(item.source_url, format!("local_pdf:{}", path.to_string_lossy()));
            assert_eq!(item.user_id, "");
        }
    }

    #[tokio::test]
    async fn headingless_pdf_without_creator_is_one_item() {
        let path = temp_path("plain");
        std::fs::write(&path, build_pdf(&["Just some notes."], None)).unwrap();
        let mut batch = KnowledgeBatch::new();

        process_pdf(&path, BookOptions::default(), &mut batch, &SilentProgress).await;
        std::fs::remove_file(&path).ok();

        assert_eq!(batch.len(), 1);
        let item = &batch.items()[0];
        let file_name = path.file_name().unwrap().to_string_lossy();
        assert_eq!(item.title, file_name);
        assert_eq!(item.content, "Just some notes.");
        assert_eq!(item.author, "");
    }

    #[tokio::test]
    async fn missing_file_is_silent_noop() {
        let path = temp_path("missing");
        let mut batch = KnowledgeBatch::new();

        process_pdf(&path, BookOptions::default(), &mut batch, &SilentProgress).await;

        assert!(batch.is_empty());
        assert!(batch.failures().is_empty());
    }

    #[tokio::test]
    async fn undecodable_file_is_recorded() {
        let path = temp_path("corrupt");
        std::fs::write(&path, b"plain text, not a pdf").unwrap();
        let mut batch = KnowledgeBatch::new();

        process_pdf(&path, BookOptions::default(), &mut batch, &SilentProgress).await;
        std::fs::remove_file(&path).ok();

        assert!(batch.is_empty());
        assert_eq!(batch.failures().len(), 1);
        assert_eq!(batch.failures()[0].source, path.to_string_lossy());
    }
}
