//! Source selection.

use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

use distill_shared::{DistillError, Result};

/// What a run ingests: a web page or a local PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(Url),
    Pdf(PathBuf),
}

impl Source {
    /// Build a source from the two mutually exclusive inputs.
    ///
    /// Exactly one of `url`/`pdf` must be given, and a URL must parse.
    pub fn from_args(url: Option<&str>, pdf: Option<&Path>) -> Result<Self> {
        match (url, pdf) {
            (Some(raw), None) => Url::parse(raw)
                .map(Source::Url)
                .map_err(|e| DistillError::config(format!("invalid URL {raw:?}: {e}"))),
            (None, Some(path)) => Ok(Source::Pdf(path.to_path_buf())),
            (Some(_), Some(_)) => Err(DistillError::config(
                "provide either a URL or a PDF path, not both",
            )),
            (None, None) => Err(DistillError::config("provide a URL or a PDF path")),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Url(url) => write!(f, "{url}"),
            Source::Pdf(path) => write!(f, "{}", path.display()),
        }
    }
}
