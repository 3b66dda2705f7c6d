//! Shared types, error model, and configuration for SuggestPanel.
//!
//! This crate is the foundation depended on by all other SuggestPanel crates.
//! It provides:
//! - [`SuggestPanelError`] — the unified error type
//! - Domain types ([`PageContext`], [`SuggestionRequest`], [`Suggestion`], [`RunId`])
//! - Configuration ([`AppConfig`], [`BackendConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BackendConfig, DEFAULT_BACKEND, SuggestConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{Result, SuggestPanelError};
pub use types::{
    MAX_COMMENT_CHARS, MAX_COMMENTS, PageContext, RunId, RunState, Suggestion, SuggestionRequest,
    UNKNOWN_USER, UserComment, UserProfile,
};
