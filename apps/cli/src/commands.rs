//! CLI definition, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{ArgGroup, Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use distill_core::{Pipeline, Source, process_source, render_report};
use distill_shared::{
    AppConfig, KnowledgeItem, ProgressReporter, init_config, load_config, load_config_from,
    render_config,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// distill: turn a blog or a PDF book into AI-ready knowledge items.
#[derive(Parser)]
#[command(
    name = "distill",
    version,
    about = "Scrape a blog URL or split a PDF book into normalized knowledge items (JSON on stdout).",
    long_about = None,
    subcommand_negates_reqs = true,
)]
#[command(group(ArgGroup::new("source").required(true).args(["url", "pdf"])))]
pub(crate) struct Cli {
    /// Article or index page to scrape.
    #[arg(short, long, value_name = "URL")]
    pub url: Option<String>,

    /// Local PDF book to split into chapters.
    #[arg(short, long, value_name = "PATH")]
    pub pdf: Option<PathBuf>,

    /// Config file to use instead of ~/.distill/distill.toml.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Team identifier for the report (overrides the config file).
    #[arg(long, env = "DISTILL_TEAM_ID")]
    pub team_id: Option<String>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Write a config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Output goes to stderr; stdout is
/// reserved for the report.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "distill=info",
        1 => "distill=debug",
        _ => "distill=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Some(Command::Config { action }) => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(cli.config.as_deref()),
        },
        None => cmd_distill(&cli).await,
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    let config = match path {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };
    Ok(config)
}

async fn cmd_distill(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli.config.as_deref())?;
    let team_id = cli
        .team_id
        .clone()
        .unwrap_or_else(|| config.output.team_id.clone());

    let source = Source::from_args(cli.url.as_deref(), cli.pdf.as_deref())?;
    let pipeline = Pipeline::new(&config)?;

    info!(%source, "starting");
    let reporter = CliProgress::new();
    let batch = process_source(&source, &pipeline, &reporter).await;
    reporter.finish();

    match render_report(&team_id, &batch)? {
        Some(json) => {
            println!("{json}");
            Ok(())
        }
        None => {
            error!(
                failures = batch.failures().len(),
                "no content could be extracted"
            );
            eprintln!("No content could be extracted from {source}.");
            for failure in batch.failures() {
                eprintln!("  {}: {}", failure.source, failure.reason);
            }

            if batch.failures().is_empty() {
                Ok(())
            } else {
                Err(eyre!("{source}: every fetch or decode attempt failed"))
            }
        }
    }
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show(path: Option<&Path>) -> Result<()> {
    let config = resolve_config(path)?;
    println!("{}", render_config(&config)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Spinner on stderr showing the current phase and crawl position.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .expect("valid template")
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn link_visited(&self, url: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Scraping [{current}/{total}] {url}"));
    }

    fn item_added(&self, item: &KnowledgeItem) {
        self.spinner.set_message(format!("Added: {}", item.title));
    }
}
