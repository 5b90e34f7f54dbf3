use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Result, TranscriptError};

/// URL shapes recognized for video id extraction, in priority order.
/// Matching is substring-based; the id capture stops at the first `&`,
/// newline, `?` or `#`.
static URL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"youtube\.com/watch\?v=([^&\n?#]+)",
        r"youtu\.be/([^&\n?#]+)",
        r"youtube\.com/embed/([^&\n?#]+)",
        r"youtube\.com/v/([^&\n?#]+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
    .collect()
});

/// Extract the video id from a YouTube URL, trying each recognized shape in
/// order.
pub fn extract_video_id(url: &str) -> Result<String> {
    for pattern in URL_PATTERNS.iter() {
        if let Some(id) = pattern.captures(url).and_then(|caps| caps.get(1)) {
            return Ok(id.as_str().to_string());
        }
    }

    Err(TranscriptError::InvalidUrl {
        url: url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_from_watch_url() {
        let id = extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
        assert_eq!(id, "dQw4w9WgXcQ");
    }

    #[test]
    fn extracts_from_short_url() {
        let id = extract_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(id, "dQw4w9WgXcQ");
    }

    #[test]
    fn extracts_from_embed_url() {
        let id = extract_video_id("https://www.youtube.com/embed/abc123XYZ_-").unwrap();
        assert_eq!(id, "abc123XYZ_-");
    }

    #[test]
    fn extracts_from_v_url() {
        let id = extract_video_id("https://youtube.com/v/abc123XYZ").unwrap();
        assert_eq!(id, "abc123XYZ");
    }

    #[test]
    fn id_stops_at_query_separators() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=abc123&t=42s").unwrap(),
            "abc123"
        );
        assert_eq!(
            extract_video_id("https://youtu.be/abc123?si=share").unwrap(),
            "abc123"
        );
        assert_eq!(
            extract_video_id("https://youtu.be/abc123#t=10").unwrap(),
            "abc123"
        );
        assert_eq!(
            extract_video_id("https://youtu.be/abc123\nrest-of-page").unwrap(),
            "abc123"
        );
    }

    #[test]
    fn works_without_scheme_or_www() {
        assert_eq!(
            extract_video_id("youtube.com/watch?v=abc123").unwrap(),
            "abc123"
        );
        assert_eq!(
            extract_video_id("m.youtube.com/watch?v=abc123").unwrap(),
            "abc123"
        );
    }

    #[test]
    fn rejects_unrecognized_urls() {
        let err = extract_video_id("https://example.com/watch?v=abc123").unwrap_err();
        match err {
            TranscriptError::InvalidUrl { url } => {
                assert_eq!(url, "https://example.com/watch?v=abc123");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_url_message_lists_accepted_formats() {
        let err = extract_video_id("https://vimeo.com/12345").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("watch?v=VIDEO_ID"));
        assert!(message.contains("youtu.be/VIDEO_ID"));
        assert!(message.contains("embed/VIDEO_ID"));
        assert!(message.contains("v/VIDEO_ID"));
    }
}
