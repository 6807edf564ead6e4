//! Article extraction: page model, title and author resolution, and the
//! readability boundary.
//!
//! This crate provides:
//! - [`Page`] — element tree with document-order queries
//! - [`resolve_title`] / [`resolve_author`] — heuristics over a [`Page`]
//! - [`ReadabilityEngine`] — boilerplate removal ([`SmoothieEngine`] by default)
//! - [`extract_article`] — turns one page into a blog knowledge item, or declines

pub mod article;
pub mod author;
pub mod page;
pub mod readability;
pub mod title;

pub use article::extract_article;
pub use author::{Lookup, json_ld_author, resolve_author};
pub use page::{ElementView, NodeId, Page, PageBuilder};
pub use readability::{ReadabilityEngine, ReadableArticle, SmoothieEngine};
pub use title::resolve_title;
