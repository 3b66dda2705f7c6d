//! Pipeline orchestration for SuggestPanel.
//!
//! - [`payload`] — request construction with an injectable clock
//! - [`pipeline`] — the run controller and its render sink

pub mod payload;
pub mod pipeline;

pub use payload::{Clock, RequestOptions, SystemClock, build_request};
pub use pipeline::{Panel, Pipeline, SilentPanel};
