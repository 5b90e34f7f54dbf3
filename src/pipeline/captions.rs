use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::output::{OutputFormat, TranscriptOutput};
use crate::pipeline::player::CaptionTrack;
use crate::Result;

/// Caption cue markup: `<p t="start" d="duration">text</p>`. The inner
/// capture is non-greedy and may span lines or nested markup. The payload is
/// not well-formed XML, so a real XML parser is the wrong tool for it.
static CUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?s)<p t="(\d+)" d="(\d+)">(.*?)</p>"#).expect("valid regex"));

/// One timed caption cue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptSegment {
    /// Offset from the start of the video, in milliseconds
    pub start: u64,
    /// Cue duration in milliseconds
    pub duration: u64,
    /// Decoded, trimmed cue text
    pub text: String,
}

/// Decoded transcript for one video, keeping the raw markup around so it can
/// be rendered unmodified.
#[derive(Debug, Clone)]
pub struct Transcript {
    /// Id of the video the transcript belongs to
    pub video_id: String,
    /// Language code of the selected caption track
    pub language: String,
    /// Cues in source order (implicitly time-ascending)
    pub segments: Vec<TranscriptSegment>,
    /// Raw caption markup exactly as returned by YouTube
    pub raw: String,
}

impl Transcript {
    /// All cue texts joined with single spaces.
    pub fn plain_text(&self) -> String {
        self.segments
            .iter()
            .map(|segment| segment.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Convert into the requested output representation.
    pub fn render(&self, format: OutputFormat) -> TranscriptOutput {
        match format {
            OutputFormat::Json => TranscriptOutput::Segments(self.segments.clone()),
            OutputFormat::Text => TranscriptOutput::Text(self.plain_text()),
            OutputFormat::Xml => TranscriptOutput::Xml(self.raw.clone()),
        }
    }
}

/// Fetch the payload of a selected caption track and decode it.
pub async fn fetch_captions(
    client: &reqwest::Client,
    track: &CaptionTrack,
    video_id: &str,
) -> Result<Transcript> {
    tracing::debug!(url = %track.base_url, "fetching caption payload");
    let response = client.get(&track.base_url).send().await?;

    let status = response.status();
    if status.as_u16() != 200 {
        return Err(super::http_failure(status));
    }

    let raw = response.text().await?;
    let segments = parse_segments(&raw);
    tracing::info!(segments = segments.len(), "decoded transcript");

    Ok(Transcript {
        video_id: video_id.to_string(),
        language: track.language_code.clone(),
        segments,
        raw,
    })
}

/// Scan caption markup for cues, preserving source order. Only the `&#39;`
/// entity is decoded, matching what YouTube actually emits in these payloads.
pub fn parse_segments(markup: &str) -> Vec<TranscriptSegment> {
    CUE_RE
        .captures_iter(markup)
        .filter_map(|caps| {
            let start = caps.get(1)?.as_str().parse().ok()?;
            let duration = caps.get(2)?.as_str().parse().ok()?;
            let text = caps.get(3)?.as_str().replace("&#39;", "'");
            Some(TranscriptSegment {
                start,
                duration,
                text: text.trim().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKUP: &str =
        r#"<p t="0" d="1500">Hello &#39;world&#39;</p><p t="1500" d="2000">Bye</p>"#;

    fn sample_transcript() -> Transcript {
        Transcript {
            video_id: "abc123".to_string(),
            language: "en".to_string(),
            segments: parse_segments(MARKUP),
            raw: MARKUP.to_string(),
        }
    }

    #[test]
    fn parses_cues_in_order() {
        let segments = parse_segments(MARKUP);
        assert_eq!(
            segments,
            vec![
                TranscriptSegment {
                    start: 0,
                    duration: 1500,
                    text: "Hello 'world'".to_string(),
                },
                TranscriptSegment {
                    start: 1500,
                    duration: 2000,
                    text: "Bye".to_string(),
                },
            ]
        );
    }

    #[test]
    fn cue_text_may_span_lines_and_contain_markup() {
        let markup = "<p t=\"100\" d=\"200\">first\nline <s>styled</s></p>";
        let segments = parse_segments(markup);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "first\nline <s>styled</s>");
    }

    #[test]
    fn inner_capture_is_non_greedy() {
        let markup = r#"<p t="0" d="10">a</p> junk <p t="10" d="10">b</p>"#;
        let segments = parse_segments(markup);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "a");
        assert_eq!(segments[1].text, "b");
    }

    #[test]
    fn whitespace_is_trimmed() {
        let segments = parse_segments("<p t=\"0\" d=\"10\">  padded  </p>");
        assert_eq!(segments[0].text, "padded");
    }

    #[test]
    fn unparseable_markup_yields_no_segments() {
        assert!(parse_segments("<transcript><text>old format</text></transcript>").is_empty());
    }

    #[test]
    fn plain_text_joins_with_single_spaces() {
        assert_eq!(sample_transcript().plain_text(), "Hello 'world' Bye");
    }

    #[test]
    fn render_dispatches_on_format() {
        let transcript = sample_transcript();

        match transcript.render(OutputFormat::Json) {
            TranscriptOutput::Segments(segments) => assert_eq!(segments.len(), 2),
            other => panic!("unexpected output: {other:?}"),
        }
        match transcript.render(OutputFormat::Text) {
            TranscriptOutput::Text(text) => assert_eq!(text, "Hello 'world' Bye"),
            other => panic!("unexpected output: {other:?}"),
        }
        match transcript.render(OutputFormat::Xml) {
            TranscriptOutput::Xml(raw) => assert_eq!(raw, MARKUP),
            other => panic!("unexpected output: {other:?}"),
        }
    }

    #[test]
    fn xml_render_is_raw_even_when_unparseable() {
        let transcript = Transcript {
            video_id: "abc123".to_string(),
            language: "en".to_string(),
            segments: Vec::new(),
            raw: "not xml at all".to_string(),
        };
        match transcript.render(OutputFormat::Xml) {
            TranscriptOutput::Xml(raw) => assert_eq!(raw, "not xml at all"),
            other => panic!("unexpected output: {other:?}"),
        }
    }
}
