//! Error types for SuggestPanel.
//!
//! Library crates use [`SuggestPanelError`] via `thiserror`.
//! App crates (cli/tui) wrap this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all SuggestPanel operations.
#[derive(Debug, thiserror::Error)]
pub enum SuggestPanelError {
    /// The active tab could not be located, or the page snapshot/extraction
    /// was denied by the host.
    #[error("context unavailable: {message}")]
    ContextUnavailable { message: String },

    /// Network-level failure reaching the suggestion backend.
    #[error("transport error: {0}")]
    Transport(String),

    /// Backend response body was not decodable as a suggestion sequence.
    #[error("response parse error: {0}")]
    ResponseParse(String),

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SuggestPanelError>;

impl SuggestPanelError {
    /// Create a context-unavailable error from any displayable message.
    pub fn context_unavailable(msg: impl Into<String>) -> Self {
        Self::ContextUnavailable {
            message: msg.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = SuggestPanelError::context_unavailable("no active tab");
        assert_eq!(err.to_string(), "context unavailable: no active tab");

        let err = SuggestPanelError::Transport("connection refused".into());
        assert_eq!(err.to_string(), "transport error: connection refused");

        let err = SuggestPanelError::ResponseParse("expected array".into());
        assert!(err.to_string().contains("response parse"));
    }
}
