//! Core domain types for the suggestion pipeline.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of comment excerpts taken from a page.
pub const MAX_COMMENTS: usize = 3;

/// Maximum length of a single comment excerpt, in characters.
pub const MAX_COMMENT_CHARS: usize = 300;

/// Username used when the page yields no usable identity.
pub const UNKNOWN_USER: &str = "unknown";

// ---------------------------------------------------------------------------
// RunId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper identifying a single pipeline run (time-sortable).
///
/// Used only for tracing correlation; runs carry no state between each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Generate a new time-sortable run identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// PageContext
// ---------------------------------------------------------------------------

/// Bounded snapshot of author identity and comment excerpts taken from the
/// active page. Produced fresh on every pipeline run; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageContext {
    /// Raw author identity as found on the page (may carry a `u/` prefix).
    pub user: String,
    /// Up to [`MAX_COMMENTS`] comment excerpts in document order, each
    /// truncated to [`MAX_COMMENT_CHARS`] characters.
    pub comments: Vec<String>,
}

// ---------------------------------------------------------------------------
// Wire payload (matches the backend's /suggest contract)
// ---------------------------------------------------------------------------

/// A single comment inside the request payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserComment {
    pub permalink: String,
    pub body: String,
    pub created_utc: i64,
}

/// User profile embedded in the request payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Username without a leading `u/` prefix; `"unknown"` if none found.
    pub username: String,
    /// Epoch seconds at payload construction time.
    pub last_active_utc: i64,
    pub online_within_minutes: u32,
    pub comments: Vec<UserComment>,
}

/// Request body for `POST {base}/suggest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub user: UserProfile,
    /// Reserved; always empty.
    pub history: Vec<serde_json::Value>,
    pub max_suggestions: u32,
}

// ---------------------------------------------------------------------------
// Suggestion
// ---------------------------------------------------------------------------

/// A backend-produced text recommendation with a numeric relevance score.
///
/// Order is whatever the backend returned; the client never reorders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    pub score: f64,
}

impl Suggestion {
    /// Render the suggestion as a single display row, e.g. `hi (score 0.9)`.
    pub fn display_row(&self) -> String {
        format!("{} (score {})", self.text, self.score)
    }
}

// ---------------------------------------------------------------------------
// RunState
// ---------------------------------------------------------------------------

/// State of a single pipeline run. Scoped to one invocation; no state is
/// carried between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// No run has been triggered yet.
    #[default]
    Idle,
    /// A run is in flight; the surface shows the loading indicator.
    Loading,
    /// The last run completed and its suggestions are on the surface.
    Rendered,
    /// The last run failed; the surface shows a single error message.
    Failed,
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::Rendered => write!(f, "rendered"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_id_is_unique_per_run() {
        let a = RunId::new();
        let b = RunId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn request_payload_serializes_with_wire_field_names() {
        let request = SuggestionRequest {
            user: UserProfile {
                username: "alice".into(),
                last_active_utc: 1_700_000_000,
                online_within_minutes: 5,
                comments: vec![UserComment {
                    permalink: String::new(),
                    body: "hello".into(),
                    created_utc: 1_700_000_000,
                }],
            },
            history: vec![],
            max_suggestions: 2,
        };

        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["user"]["username"], "alice");
        assert_eq!(json["user"]["comments"][0]["body"], "hello");
        assert_eq!(json["history"], serde_json::json!([]));
        assert_eq!(json["max_suggestions"], 2);
    }

    #[test]
    fn suggestion_deserializes_from_backend_shape() {
        let parsed: Vec<Suggestion> =
            serde_json::from_str(r#"[{"text":"hi","score":0.9}]"#).expect("deserialize");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].text, "hi");
        assert!((parsed[0].score - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn display_row_formats_text_and_score() {
        let s = Suggestion {
            text: "hi".into(),
            score: 0.9,
        };
        assert_eq!(s.display_row(), "hi (score 0.9)");
    }
}
