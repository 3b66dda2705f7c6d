//! Host tab capability boundary.
//!
//! Extraction cannot touch the page DOM from its own execution context; it
//! asks the host to run the extraction rules against the active tab and hand
//! back a plain [`PageContext`]. The pipeline depends only on the [`TabHost`]
//! trait, keeping host invocation mechanics out of the core.

use std::future::Future;

use scraper::Html;
use url::Url;

use suggestpanel_shared::{PageContext, Result, SuggestPanelError};

use crate::page::extract_page_context;

/// User-Agent string for snapshot requests.
const USER_AGENT: &str = concat!("SuggestPanel/", env!("CARGO_PKG_VERSION"));

/// Handle to the host's active tab.
#[derive(Debug, Clone)]
pub struct TabHandle {
    /// Location of the tab's document.
    pub url: Url,
}

/// Async capability interface to the host's tab and extraction machinery.
///
/// Any failure to locate the tab or to run extraction in it surfaces as
/// [`SuggestPanelError::ContextUnavailable`]; hosts do not retry.
pub trait TabHost: Send + Sync {
    /// Resolve the currently active tab.
    fn active_tab(&self) -> impl Future<Output = Result<TabHandle>> + Send;

    /// Run the extraction rules inside the tab's page scope and return the
    /// resulting context.
    fn extract(&self, tab: &TabHandle) -> impl Future<Output = Result<PageContext>> + Send;
}

// ---------------------------------------------------------------------------
// HttpTabHost
// ---------------------------------------------------------------------------

/// Host adapter that treats a fixed page URL as the active tab and takes its
/// document snapshot over HTTP, then applies the extraction rules to it.
#[derive(Debug, Clone)]
pub struct HttpTabHost {
    client: reqwest::Client,
    tab_url: Url,
}

impl HttpTabHost {
    /// Create a host for the given tab URL.
    pub fn new(tab_url: Url) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| {
                SuggestPanelError::context_unavailable(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client, tab_url })
    }
}

impl TabHost for HttpTabHost {
    async fn active_tab(&self) -> Result<TabHandle> {
        Ok(TabHandle {
            url: self.tab_url.clone(),
        })
    }

    async fn extract(&self, tab: &TabHandle) -> Result<PageContext> {
        tracing::debug!(url = %tab.url, "taking page snapshot");

        let response = self
            .client
            .get(tab.url.as_str())
            .send()
            .await
            .map_err(|e| SuggestPanelError::context_unavailable(format!("{}: {e}", tab.url)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SuggestPanelError::context_unavailable(format!(
                "{}: HTTP {status}",
                tab.url
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SuggestPanelError::context_unavailable(format!("{}: {e}", tab.url)))?;

        let doc = Html::parse_document(&body);
        let ctx = extract_page_context(&doc);

        tracing::debug!(user = %ctx.user, comments = ctx.comments.len(), "page context extracted");
        Ok(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
        <a data-click-id="user">u/bob</a>
        <div data-test-id="comment"><p>nice post</p></div>
    </body></html>"#;

    #[tokio::test]
    async fn snapshot_host_extracts_context() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .and(wiremock::matchers::path("/thread"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(PAGE))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/thread", server.uri())).unwrap();
        let host = HttpTabHost::new(url).unwrap();

        let tab = host.active_tab().await.unwrap();
        let ctx = host.extract(&tab).await.unwrap();

        assert_eq!(ctx.user, "u/bob");
        assert_eq!(ctx.comments, vec!["nice post"]);
    }

    #[tokio::test]
    async fn snapshot_failure_is_context_unavailable() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("GET"))
            .respond_with(wiremock::ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/thread", server.uri())).unwrap();
        let host = HttpTabHost::new(url).unwrap();

        let tab = host.active_tab().await.unwrap();
        let err = host.extract(&tab).await.unwrap_err();

        assert!(matches!(
            err,
            SuggestPanelError::ContextUnavailable { .. }
        ));
        assert!(err.to_string().contains("403"));
    }

    #[tokio::test]
    async fn unreachable_tab_is_context_unavailable() {
        // Port 1 is never listening locally.
        let url = Url::parse("http://127.0.0.1:1/thread").unwrap();
        let host = HttpTabHost::new(url).unwrap();

        let tab = host.active_tab().await.unwrap();
        let err = host.extract(&tab).await.unwrap_err();

        assert!(matches!(
            err,
            SuggestPanelError::ContextUnavailable { .. }
        ));
    }
}
