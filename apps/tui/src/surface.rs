//! Surface updates flowing from the pipeline task to the UI thread.

use tokio::sync::mpsc;

use suggestpanel_core::Panel;
use suggestpanel_shared::Suggestion;

/// One rendered-surface transition, emitted by the pipeline.
#[derive(Debug)]
pub(crate) enum SurfaceUpdate {
    Loading,
    Suggestions(Vec<Suggestion>),
    Error(String),
}

/// [`Panel`] implementation that forwards surface transitions over a channel
/// to the event loop, which owns the actual drawing.
pub(crate) struct ChannelPanel {
    tx: mpsc::UnboundedSender<SurfaceUpdate>,
}

impl ChannelPanel {
    pub(crate) fn new(tx: mpsc::UnboundedSender<SurfaceUpdate>) -> Self {
        Self { tx }
    }
}

impl Panel for ChannelPanel {
    fn show_loading(&mut self) {
        // Send failures mean the UI is gone; nothing left to render to.
        let _ = self.tx.send(SurfaceUpdate::Loading);
    }

    fn show_suggestions(&mut self, suggestions: &[Suggestion]) {
        let _ = self.tx.send(SurfaceUpdate::Suggestions(suggestions.to_vec()));
    }

    fn show_error(&mut self, message: &str) {
        let _ = self.tx.send(SurfaceUpdate::Error(message.to_string()));
    }
}
