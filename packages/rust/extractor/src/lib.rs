//! Page context extraction for SuggestPanel.
//!
//! Two halves: the pure DOM extraction rules ([`page::extract_page_context`])
//! and the host capability boundary ([`TabHost`]) through which the pipeline
//! requests execution-by-proxy against the active tab.

pub mod host;
pub mod page;

pub use host::{HttpTabHost, TabHandle, TabHost};
pub use page::extract_page_context;
