//! Suggestion request construction.
//!
//! [`build_request`] is a total function from page context to wire payload;
//! the only impurity (wall-clock time) is isolated behind the [`Clock`]
//! capability so the shaping logic stays deterministic and testable.

use suggestpanel_shared::{
    AppConfig, PageContext, SuggestionRequest, UNKNOWN_USER, UserComment, UserProfile,
};

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Time source for payload timestamps.
pub trait Clock: Send + Sync {
    /// Current wall-clock time as epoch seconds.
    fn now_epoch_secs(&self) -> i64;
}

/// Real wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_secs(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

// ---------------------------------------------------------------------------
// RequestOptions
// ---------------------------------------------------------------------------

/// Fixed per-run request tuning, merged from config + CLI flags.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Maximum number of suggestions requested from the backend.
    pub max_suggestions: u32,
    /// Online-window hint embedded in the payload.
    pub online_within_minutes: u32,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            max_suggestions: 2,
            online_within_minutes: 5,
        }
    }
}

impl From<&AppConfig> for RequestOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            max_suggestions: config.suggest.max_suggestions,
            online_within_minutes: config.suggest.online_within_minutes,
        }
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build the backend request payload from an extracted page context.
///
/// Comment bodies pass through unmodified (the extractor already bounded
/// them); `history` is reserved and always empty.
pub fn build_request(
    ctx: &PageContext,
    options: &RequestOptions,
    clock: &dyn Clock,
) -> SuggestionRequest {
    let now = clock.now_epoch_secs();

    let comments = ctx
        .comments
        .iter()
        .map(|body| UserComment {
            permalink: String::new(),
            body: body.clone(),
            created_utc: now,
        })
        .collect();

    SuggestionRequest {
        user: UserProfile {
            username: normalize_username(&ctx.user),
            last_active_utc: now,
            online_within_minutes: options.online_within_minutes,
            comments,
        },
        history: vec![],
        max_suggestions: options.max_suggestions,
    }
}

/// Strip one leading `u/` prefix; an empty identity becomes `"unknown"`.
fn normalize_username(raw: &str) -> String {
    let stripped = raw.strip_prefix("u/").unwrap_or(raw);
    if stripped.is_empty() {
        UNKNOWN_USER.to_string()
    } else {
        stripped.to_string()
    }
}
