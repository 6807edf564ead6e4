//! Run orchestration for distill.
//!
//! Ties source selection, page extraction, crawling, and PDF segmentation
//! into a single `process_source` call, and renders the final report.

pub mod pipeline;
pub mod report;
pub mod source;

pub use pipeline::{Pipeline, process_source};
pub use report::render_report;
pub use source::Source;
