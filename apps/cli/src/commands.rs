//! CLI command definitions, routing, and tracing setup.

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use url::Url;

use suggestpanel_client::SuggestionClient;
use suggestpanel_core::{Panel, Pipeline, RequestOptions};
use suggestpanel_extractor::HttpTabHost;
use suggestpanel_shared::{
    RunState, Suggestion, config_file_path, init_config, load_config,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// SuggestPanel — reply suggestions for the page you are looking at.
#[derive(Parser)]
#[command(
    name = "suggestpanel",
    version,
    about = "Extract a page snippet and fetch reply suggestions from the backend.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run the suggestion pipeline once against a page and print the result.
    Run {
        /// Page URL to treat as the active tab.
        url: String,

        /// Backend base URL (overrides the config file).
        #[arg(short, long)]
        backend: Option<String>,

        /// Maximum number of suggestions to request (overrides the config file).
        #[arg(short, long)]
        max: Option<u32>,
    },

    /// Launch the interactive panel.
    Tui {
        /// Page URL to treat as the active tab.
        url: String,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "suggestpanel=info",
        1 => "suggestpanel=debug",
        _ => "suggestpanel=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Run { url, backend, max } => cmd_run(&url, backend.as_deref(), max).await,
        Command::Tui { url } => cmd_tui(&url).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show().await,
        },
    }
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

async fn cmd_run(url: &str, backend: Option<&str>, max: Option<u32>) -> Result<()> {
    let config = load_config()?;

    let page_url = Url::parse(url).map_err(|e| eyre!("invalid URL '{url}': {e}"))?;

    // CLI flags override config file values, which override defaults.
    let base_url = backend
        .map(str::to_string)
        .unwrap_or_else(|| config.backend.resolve_base_url().to_string());

    let mut options = RequestOptions::from(&config);
    if let Some(max) = max {
        options.max_suggestions = max;
    }

    info!(page = %page_url, backend = %base_url, "running suggestion pipeline");

    let host = HttpTabHost::new(page_url)?;
    let client = SuggestionClient::new(base_url)?;
    let mut pipeline = Pipeline::new(host, client, options);

    let mut panel = SpinnerPanel::new();
    let state = pipeline.run(&mut panel).await;

    if state == RunState::Failed {
        return Err(eyre!(panel.error.unwrap_or_else(|| "run failed".into())));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// CLI panel (spinner + stdout rows)
// ---------------------------------------------------------------------------

/// Render sink for one-shot runs: spinner while loading, plain rows after.
struct SpinnerPanel {
    spinner: ProgressBar,
    error: Option<String>,
}

impl SpinnerPanel {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self {
            spinner,
            error: None,
        }
    }
}

impl Panel for SpinnerPanel {
    fn show_loading(&mut self) {
        self.error = None;
        self.spinner.set_message("Fetching suggestions…");
    }

    fn show_suggestions(&mut self, suggestions: &[Suggestion]) {
        self.spinner.finish_and_clear();

        if suggestions.is_empty() {
            println!("  No suggestions returned.");
            return;
        }

        println!();
        for suggestion in suggestions {
            println!("  {}", suggestion.display_row());
        }
        println!();
    }

    fn show_error(&mut self, message: &str) {
        self.spinner.finish_and_clear();
        self.error = Some(message.to_string());
    }
}

// ---------------------------------------------------------------------------
// tui / config
// ---------------------------------------------------------------------------

async fn cmd_tui(url: &str) -> Result<()> {
    info!(url, "launching panel");

    let status = std::process::Command::new("suggestpanel-tui")
        .arg(url)
        .status()
        .map_err(|e| {
            eyre!("could not launch suggestpanel-tui: {e}. Is the binary on your PATH?")
        })?;

    if !status.success() {
        return Err(eyre!("suggestpanel-tui exited with {status}"));
    }
    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config written to {}", path.display());
    Ok(())
}

async fn cmd_config_show() -> Result<()> {
    let path = config_file_path()?;
    let config = load_config()?;
    let rendered = toml::to_string_pretty(&config)?;

    println!("# {}", path.display());
    println!("{rendered}");
    println!("# effective backend: {}", config.backend.resolve_base_url());
    Ok(())
}
