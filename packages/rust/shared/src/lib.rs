//! Shared types, error model, and configuration for distill.
//!
//! This crate is the foundation depended on by all other distill crates.
//! It provides:
//! - [`DistillError`] — the unified error type
//! - Domain types ([`KnowledgeItem`], [`KnowledgeBatch`], [`KnowledgeReport`])
//! - Configuration ([`AppConfig`], [`FetchConfig`], [`BookOptions`], config loading)
//! - [`ProgressReporter`] hooks

pub mod config;
pub mod error;
pub mod progress;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BROWSER_USER_AGENT, BookOptions, BookSettings, FetchConfig, FetchSettings,
    OutputConfig, config_dir, config_file_path, init_config, load_config, load_config_from,
    render_config,
};
pub use error::{DistillError, Result};
pub use progress::{ProgressReporter, SilentProgress};
pub use types::{ContentType, Failure, KnowledgeBatch, KnowledgeItem, KnowledgeReport, LOCAL_PDF_PREFIX};
