//! SuggestPanel CLI — one-shot suggestion runs for the active page.
//!
//! Extracts a bounded context snippet from a page, posts it to the
//! suggestion backend, and prints the returned suggestions.

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
