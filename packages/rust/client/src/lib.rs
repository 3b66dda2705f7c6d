//! HTTP client for the suggestion backend.
//!
//! One request per pipeline run: `POST {base}/suggest` with the JSON payload,
//! response decoded strictly as a suggestion sequence. No retries, no
//! backoff, no cancellation, and no explicit timeout — the request blocks
//! until the transport gives up or succeeds.

use tracing::instrument;

use suggestpanel_shared::{Result, SuggestPanelError, Suggestion, SuggestionRequest};

/// User-Agent string for backend requests.
const USER_AGENT: &str = concat!("SuggestPanel/", env!("CARGO_PKG_VERSION"));

/// Path of the suggestion endpoint under the backend base URL.
const SUGGEST_PATH: &str = "/suggest";

/// Client for the suggestion backend.
#[derive(Debug, Clone)]
pub struct SuggestionClient {
    client: reqwest::Client,
    base_url: String,
}

impl SuggestionClient {
    /// Create a client targeting the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SuggestPanelError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// The full `/suggest` endpoint URL this client targets.
    pub fn endpoint(&self) -> String {
        format!("{}{SUGGEST_PATH}", self.base_url.trim_end_matches('/'))
    }

    /// Send the payload and decode the response as a suggestion sequence.
    ///
    /// HTTP error statuses are not inspected: whatever body comes back is
    /// parsed, and a body that is not a suggestion array surfaces as
    /// [`SuggestPanelError::ResponseParse`].
    #[instrument(skip_all, fields(endpoint = %self.endpoint()))]
    pub async fn suggest(&self, payload: &SuggestionRequest) -> Result<Vec<Suggestion>> {
        let response = self
            .client
            .post(self.endpoint())
            .json(payload)
            .send()
            .await
            .map_err(|e| SuggestPanelError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SuggestPanelError::Transport(e.to_string()))?;

        let suggestions: Vec<Suggestion> = serde_json::from_str(&body).map_err(|e| {
            SuggestPanelError::ResponseParse(format!(
                "HTTP {status}: {e} (body: {})",
                snippet(&body)
            ))
        })?;

        tracing::debug!(count = suggestions.len(), "suggestions received");
        Ok(suggestions)
    }
}

/// First part of a body for error messages, so parse failures stay readable.
fn snippet(body: &str) -> &str {
    let end = body
        .char_indices()
        .nth(120)
        .map_or(body.len(), |(idx, _)| idx);
    &body[..end]
}
