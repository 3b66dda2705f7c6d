//! SuggestPanel TUI — the interactive suggestion panel.
//!
//! Shows reply suggestions for one page (the "active tab"), with loading and
//! error states, built with `ratatui` + `crossterm`. Runs the pipeline once
//! on startup and again on every `r` press.

mod app;
mod surface;
mod widgets;

use color_eyre::eyre::{Result, eyre};
use url::Url;

use suggestpanel_shared::load_config;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let arg = std::env::args()
        .nth(1)
        .ok_or_else(|| eyre!("usage: suggestpanel-tui <page-url>"))?;
    let page_url = Url::parse(&arg).map_err(|e| eyre!("invalid URL '{arg}': {e}"))?;

    let config = load_config()?;
    app::run(page_url, &config).await
}
