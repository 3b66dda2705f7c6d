//! DOM extraction rules for the page snapshot.
//!
//! These rules are what would run inside the page's own document scope on a
//! browser host: find the author identity and the first few comment bodies,
//! bounded and in document order. Pure over a parsed snapshot — no network
//! access, no mutation.

use scraper::{Html, Selector};

use suggestpanel_shared::{MAX_COMMENT_CHARS, MAX_COMMENTS, PageContext, UNKNOWN_USER};

/// Marker for the author identity link.
const USER_SELECTOR: &str = r#"a[data-click-id="user"]"#;

/// Marker for comment body paragraphs.
const COMMENT_SELECTOR: &str = r#"div[data-test-id="comment"] p"#;

/// Extract a bounded [`PageContext`] from a parsed page snapshot.
///
/// Author identity is the text of the first element matching the user-link
/// marker, defaulting to `"unknown"` when absent or empty. Comments are the
/// first [`MAX_COMMENTS`] elements matching the comment-body marker, each
/// truncated to [`MAX_COMMENT_CHARS`] characters, document order preserved.
pub fn extract_page_context(doc: &Html) -> PageContext {
    let user_sel = Selector::parse(USER_SELECTOR).expect("valid user selector");
    let comment_sel = Selector::parse(COMMENT_SELECTOR).expect("valid comment selector");

    let user = doc
        .select(&user_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNKNOWN_USER.to_string());

    let comments: Vec<String> = doc
        .select(&comment_sel)
        .take(MAX_COMMENTS)
        .map(|el| truncate_chars(&el.text().collect::<String>(), MAX_COMMENT_CHARS))
        .collect();

    PageContext { user, comments }
}

/// Truncate to at most `max` Unicode scalar values.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn extracts_user_and_comments_in_document_order() {
        let doc = parse(
            r#"<html><body>
                <a data-click-id="user">u/alice</a>
                <div data-test-id="comment"><p>first</p></div>
                <div data-test-id="comment"><p>second</p></div>
            </body></html>"#,
        );

        let ctx = extract_page_context(&doc);
        assert_eq!(ctx.user, "u/alice");
        assert_eq!(ctx.comments, vec!["first", "second"]);
    }

    #[test]
    fn missing_user_link_defaults_to_unknown() {
        let doc = parse(
            r#"<html><body>
                <div data-test-id="comment"><p>only a comment</p></div>
            </body></html>"#,
        );

        let ctx = extract_page_context(&doc);
        assert_eq!(ctx.user, "unknown");
        assert_eq!(ctx.comments.len(), 1);
    }

    #[test]
    fn empty_user_link_defaults_to_unknown() {
        let doc = parse(r#"<html><body><a data-click-id="user">  </a></body></html>"#);
        let ctx = extract_page_context(&doc);
        assert_eq!(ctx.user, "unknown");
    }

    #[test]
    fn comments_are_capped_at_three() {
        let doc = parse(
            r#"<html><body>
                <div data-test-id="comment"><p>one</p></div>
                <div data-test-id="comment"><p>two</p></div>
                <div data-test-id="comment"><p>three</p></div>
                <div data-test-id="comment"><p>four</p></div>
            </body></html>"#,
        );

        let ctx = extract_page_context(&doc);
        assert_eq!(ctx.comments, vec!["one", "two", "three"]);
    }

    #[test]
    fn long_comments_are_truncated_to_300_chars() {
        let long = "x".repeat(450);
        let html = format!(
            r#"<html><body><div data-test-id="comment"><p>{long}</p></div></body></html>"#
        );

        let ctx = extract_page_context(&parse(&html));
        assert_eq!(ctx.comments[0].chars().count(), 300);
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let long = "é".repeat(350);
        let html = format!(
            r#"<html><body><div data-test-id="comment"><p>{long}</p></div></body></html>"#
        );

        let ctx = extract_page_context(&parse(&html));
        assert_eq!(ctx.comments[0].chars().count(), 300);
        assert_eq!(ctx.comments[0], "é".repeat(300));
    }

    #[test]
    fn unmarked_elements_are_ignored() {
        let doc = parse(
            r#"<html><body>
                <a href="/somewhere">not the user</a>
                <div class="comment"><p>not a marked comment</p></div>
            </body></html>"#,
        );

        let ctx = extract_page_context(&doc);
        assert_eq!(ctx.user, "unknown");
        assert!(ctx.comments.is_empty());
    }
}
