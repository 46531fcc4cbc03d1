//! Video link extraction from fetched page HTML.

use regex::Regex;
use scraper::{Html, Selector};
use tracing::{debug, warn};
use url::Url;

/// Anchor hrefs ending in one of these extensions are treated as video links.
const VIDEO_LINK_PATTERN: &str = r"(?i)\.(mp4|webm|mkv)$";

/// Extracts video links from page HTML.
///
/// Collects every anchor whose `href` ends in a recognized video extension
/// (case-insensitive), resolving relative, root-relative, and
/// protocol-relative hrefs against `base_url`. Unresolvable hrefs are logged
/// and dropped.
///
/// `max_videos` caps the number of links returned; `0` means unlimited.
///
/// # Panics
///
/// Never panics in practice: the selector and regex are static and
/// known-valid.
#[must_use]
#[allow(clippy::expect_used)]
pub fn extract_video_links(html: &str, base_url: &Url, max_videos: usize) -> Vec<String> {
    let selector = Selector::parse("a[href]").expect("static selector is valid");
    let pattern = Regex::new(VIDEO_LINK_PATTERN).expect("static regex is valid");

    let document = Html::parse_document(html);
    let mut links = Vec::new();

    for element in document.select(&selector) {
        if max_videos > 0 && links.len() >= max_videos {
            break;
        }

        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if !pattern.is_match(href) {
            continue;
        }

        match base_url.join(href) {
            Ok(resolved) => links.push(resolved.to_string()),
            Err(e) => warn!(href, error = %e, "ignoring unresolvable video link"),
        }
    }

    debug!(count = links.len(), "extracted video links");
    links
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://example.com/videos/").unwrap()
    }

    #[test]
    fn test_extract_collects_video_extensions_only() {
        let html = r#"
            <html><body>
                <a href="http://example.com/a.mp4">a</a>
                <a href="http://example.com/b.webm">b</a>
                <a href="http://example.com/c.mkv">c</a>
                <a href="http://example.com/d.jpg">d</a>
                <a href="http://example.com/page.html">e</a>
                <a>no href</a>
            </body></html>
        "#;

        let links = extract_video_links(html, &base(), 0);
        assert_eq!(
            links,
            vec![
                "http://example.com/a.mp4",
                "http://example.com/b.webm",
                "http://example.com/c.mkv",
            ]
        );
    }

    #[test]
    fn test_extract_extension_match_is_case_insensitive() {
        let html = r#"<a href="http://example.com/CLIP.MP4">x</a>"#;
        let links = extract_video_links(html, &base(), 0);
        assert_eq!(links, vec!["http://example.com/CLIP.MP4"]);
    }

    #[test]
    fn test_extract_resolves_relative_links() {
        let html = r#"
            <a href="clip.mp4">relative</a>
            <a href="/root/other.mp4">root-relative</a>
        "#;
        let links = extract_video_links(html, &base(), 0);
        assert_eq!(
            links,
            vec![
                "http://example.com/videos/clip.mp4",
                "http://example.com/root/other.mp4",
            ]
        );
    }

    #[test]
    fn test_extract_resolves_protocol_relative_links() {
        let html = r#"<a href="//cdn.example.com/clip.mp4">cdn</a>"#;
        let links = extract_video_links(html, &base(), 0);
        assert_eq!(links, vec!["http://cdn.example.com/clip.mp4"]);
    }

    #[test]
    fn test_extract_caps_at_max_videos() {
        let html = r#"
            <a href="a.mp4">1</a>
            <a href="b.mp4">2</a>
            <a href="c.mp4">3</a>
        "#;
        let links = extract_video_links(html, &base(), 2);
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_extract_zero_max_videos_means_unlimited() {
        let html: String = (0..25)
            .map(|i| format!("<a href=\"clip{i}.mp4\">v</a>"))
            .collect();
        let links = extract_video_links(&html, &base(), 0);
        assert_eq!(links.len(), 25);
    }

    #[test]
    fn test_extract_query_suffixed_href_not_matched() {
        // The extension must terminate the href, matching the original
        // extraction rule; query-suffixed file links are not collected.
        let html = r#"<a href="clip.mp4?token=abc">x</a>"#;
        let links = extract_video_links(html, &base(), 0);
        assert!(links.is_empty());
    }

    #[test]
    fn test_extract_empty_document() {
        assert!(extract_video_links("", &base(), 0).is_empty());
    }
}
