//! Application configuration for distill.
//!
//! User config lives at `~/.distill/distill.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DistillError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "distill.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".distill";

/// Browser User-Agent sent with every page request. Some blogs refuse
/// requests that do not look like a browser.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

// ---------------------------------------------------------------------------
// Config structs (matching distill.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Report settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// HTTP fetch settings.
    #[serde(default)]
    pub fetch: FetchSettings,

    /// PDF chapter segmentation settings.
    #[serde(default)]
    pub book: BookSettings,
}

/// `[output]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Team identifier stamped on every report.
    #[serde(default = "default_team_id")]
    pub team_id: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            team_id: default_team_id(),
        }
    }
}

fn default_team_id() -> String {
    "aline123".into()
}

/// `[fetch]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchSettings {
    /// User-Agent header value.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum redirects followed per request.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            max_redirects: default_max_redirects(),
        }
    }
}

fn default_user_agent() -> String {
    BROWSER_USER_AGENT.into()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_max_redirects() -> usize {
    5
}

/// `[book]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookSettings {
    /// Maximum number of chapters emitted per PDF.
    #[serde(default = "default_chapter_limit")]
    pub chapter_limit: usize,
}

impl Default for BookSettings {
    fn default() -> Self {
        Self {
            chapter_limit: default_chapter_limit(),
        }
    }
}

fn default_chapter_limit() -> usize {
    8
}

// ---------------------------------------------------------------------------
// Runtime config (merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime HTTP configuration used to build the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            user_agent: config.fetch.user_agent.clone(),
            timeout_secs: config.fetch.timeout_secs,
            max_redirects: config.fetch.max_redirects,
        }
    }
}

/// Runtime options for PDF segmentation.
#[derive(Debug, Clone, Copy)]
pub struct BookOptions {
    pub chapter_limit: usize,
}

impl Default for BookOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for BookOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            chapter_limit: config.book.chapter_limit,
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.distill/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| DistillError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.distill/distill.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DistillError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| DistillError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| DistillError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let content = render_config(&AppConfig::default())?;

    std::fs::write(&path, content).map_err(|e| DistillError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Serialize a config back to TOML.
pub fn render_config(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(config).map_err(|e| DistillError::config(e.to_string()))
}
