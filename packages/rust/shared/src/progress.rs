//! Progress reporting hooks for long-running source processing.

use crate::types::KnowledgeItem;

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called before a harvested link is fetched.
    fn link_visited(&self, url: &str, current: usize, total: usize);
    /// Called after an item has been appended to the batch.
    fn item_added(&self, item: &KnowledgeItem);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn link_visited(&self, _url: &str, _current: usize, _total: usize) {}
    fn item_added(&self, _item: &KnowledgeItem) {}
}
