//! distill CLI: turn a blog URL or a PDF book into knowledge items.
//!
//! Prints a JSON report of normalized items (title, Markdown or plain-text
//! content, author, source) to stdout. Logs and progress go to stderr.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
