//! Core domain types: knowledge items, the run-scoped batch, and the report.

use serde::{Deserialize, Serialize};

/// Prefix used to build the synthetic `source_url` of PDF items.
pub const LOCAL_PDF_PREFIX: &str = "local_pdf:";

// ---------------------------------------------------------------------------
// ContentType
// ---------------------------------------------------------------------------

/// Kind of source a knowledge item came from. Fixed per source kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// A web article, content is Markdown.
    Blog,
    /// A PDF chapter or whole PDF, content is plain text.
    Book,
}

// ---------------------------------------------------------------------------
// KnowledgeItem
// ---------------------------------------------------------------------------

/// A single normalized unit of extracted knowledge.
///
/// Every field is always present; an empty string means "unknown".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeItem {
    /// Resolved title.
    pub title: String,
    /// Markdown (web) or plain text (PDF).
    pub content: String,
    /// Source kind.
    pub content_type: ContentType,
    /// Original URL, or `local_pdf:<path>` for PDFs.
    pub source_url: String,
    /// Resolved author, possibly empty.
    pub author: String,
    /// Owner tag. Always empty here; attribution is left to the caller.
    pub user_id: String,
}

impl KnowledgeItem {
    /// Build a web article item.
    pub fn blog(
        title: impl Into<String>,
        content: impl Into<String>,
        source_url: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            content_type: ContentType::Blog,
            source_url: source_url.into(),
            author: author.into(),
            user_id: String::new(),
        }
    }

    /// Build a PDF item. `path` is turned into a `local_pdf:` source reference.
    pub fn book(
        title: impl Into<String>,
        content: impl Into<String>,
        path: &str,
        author: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            content_type: ContentType::Book,
            source_url: format!("{LOCAL_PDF_PREFIX}{path}"),
            author: author.into(),
            user_id: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// KnowledgeBatch
// ---------------------------------------------------------------------------

/// A source that could not be processed during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// URL or file path that failed.
    pub source: String,
    /// Human-readable reason.
    pub reason: String,
}

/// Run-scoped, append-only accumulator of knowledge items.
///
/// Owned by the top-level run and passed by `&mut` into each extraction step.
/// Items cannot be mutated or removed once pushed.
#[derive(Debug, Default)]
pub struct KnowledgeBatch {
    items: Vec<KnowledgeItem>,
    failures: Vec<Failure>,
}

impl KnowledgeBatch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item.
    pub fn push(&mut self, item: KnowledgeItem) {
        self.items.push(item);
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[KnowledgeItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Record a source that was skipped because of an error.
    pub fn record_failure(&mut self, source: impl Into<String>, reason: impl Into<String>) {
        self.failures.push(Failure {
            source: source.into(),
            reason: reason.into(),
        });
    }

    /// Failures recorded so far.
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    /// Consume the batch, returning its items.
    pub fn into_items(self) -> Vec<KnowledgeItem> {
        self.items
    }
}

// ---------------------------------------------------------------------------
// KnowledgeReport
// ---------------------------------------------------------------------------

/// The JSON document printed at the end of a successful run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeReport {
    /// Fixed team identifier from config.
    pub team_id: String,
    /// Items in the order they were produced.
    pub items: Vec<KnowledgeItem>,
}
