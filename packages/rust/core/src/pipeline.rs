//! End-to-end suggestion pipeline: active tab → context → payload → backend
//! → rendered surface.
//!
//! Each run is a strictly sequential chain of awaits; stage N's output is
//! fully available before stage N+1 begins. Every stage failure is caught
//! exactly once here and converted into the `Failed` state — no stage-specific
//! recovery, no partial rendering.

use tracing::{info, warn};

use suggestpanel_client::SuggestionClient;
use suggestpanel_extractor::TabHost;
use suggestpanel_shared::{Result, RunId, RunState, Suggestion};

use crate::payload::{Clock, RequestOptions, SystemClock, build_request};

// ---------------------------------------------------------------------------
// Panel (render sink)
// ---------------------------------------------------------------------------

/// Rendered-surface sink. The pipeline is the only writer: it clears and
/// replaces the surface on every state transition.
pub trait Panel: Send {
    /// Clear the surface and show the loading indicator.
    fn show_loading(&mut self);
    /// Clear the surface and show one row per suggestion, in backend order.
    fn show_suggestions(&mut self, suggestions: &[Suggestion]);
    /// Clear the surface and show a single error message.
    fn show_error(&mut self, message: &str);
}

/// No-op panel for headless/test usage.
pub struct SilentPanel;

impl Panel for SilentPanel {
    fn show_loading(&mut self) {}
    fn show_suggestions(&mut self, _suggestions: &[Suggestion]) {}
    fn show_error(&mut self, _message: &str) {}
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Orchestrates one suggestion run at a time and owns the run state machine:
/// `Idle → Loading → Rendered | Failed`.
///
/// `run` takes `&mut self`, so a pipeline value admits no overlapping runs;
/// a new trigger while one is in flight must be ignored by the caller (see
/// the TUI's in-flight guard).
pub struct Pipeline<H: TabHost> {
    host: H,
    client: SuggestionClient,
    options: RequestOptions,
    clock: Box<dyn Clock>,
    state: RunState,
}

impl<H: TabHost> Pipeline<H> {
    /// Create a pipeline over the given host and backend client.
    pub fn new(host: H, client: SuggestionClient, options: RequestOptions) -> Self {
        Self {
            host,
            client,
            options,
            clock: Box::new(SystemClock),
            state: RunState::Idle,
        }
    }

    /// Replace the time source (tests).
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Current run state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Execute one full run, driving the surface through
    /// loading → populated/error. Returns the final state.
    pub async fn run(&mut self, panel: &mut dyn Panel) -> RunState {
        let run_id = RunId::new();

        self.state = RunState::Loading;
        panel.show_loading();
        info!(%run_id, "pipeline run started");

        match self.execute().await {
            Ok(suggestions) => {
                info!(%run_id, count = suggestions.len(), "pipeline run rendered");
                panel.show_suggestions(&suggestions);
                self.state = RunState::Rendered;
            }
            Err(e) => {
                warn!(%run_id, error = %e, "pipeline run failed");
                panel.show_error(&e.to_string());
                self.state = RunState::Failed;
            }
        }

        self.state
    }

    /// The sequential stage chain. Any stage error propagates to `run`.
    async fn execute(&self) -> Result<Vec<Suggestion>> {
        let tab = self.host.active_tab().await?;
        let ctx = self.host.extract(&tab).await?;
        let payload = build_request(&ctx, &self.options, self.clock.as_ref());
        self.client.suggest(&payload).await
    }
}
