use reqwest::StatusCode;
use serde::Deserialize;

use crate::{Result, TranscriptError};

/// Internal player API endpoint. Unofficial; requires a client identity and
/// an API key scraped from the watch page.
pub const PLAYER_ENDPOINT: &str = "https://www.youtube.com/youtubei/v1/player";

/// The Android client identity exposes caption tracks without the signature
/// dance the web client requires.
const CLIENT_NAME: &str = "ANDROID";
const CLIENT_VERSION: &str = "20.10.38";

/// One caption language offered for a video.
#[derive(Debug, Clone, Deserialize)]
pub struct CaptionTrack {
    /// Fetchable URL of the caption payload
    #[serde(rename = "baseUrl")]
    pub base_url: String,
    /// Language code, e.g. "en"
    #[serde(rename = "languageCode")]
    pub language_code: String,
}

/// Player API response with every nesting level optional. YouTube omits whole
/// subtrees depending on video state, so each level is guarded before access
/// instead of assuming shape.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    playability_status: Option<PlayabilityStatus>,
    captions: Option<Captions>,
}

#[derive(Debug, Default, Deserialize)]
struct PlayabilityStatus {
    reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Captions {
    player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    caption_tracks: Option<Vec<CaptionTrack>>,
}

/// Call the internal player API with a synthetic Android client identity and
/// select the caption track for `language`.
pub async fn negotiate_track(
    client: &reqwest::Client,
    endpoint: &str,
    video_id: &str,
    api_key: &str,
    language: &str,
) -> Result<CaptionTrack> {
    let body = serde_json::json!({
        "context": {
            "client": {
                "clientName": CLIENT_NAME,
                "clientVersion": CLIENT_VERSION,
            }
        },
        "videoId": video_id,
    });

    tracing::debug!(%video_id, "requesting caption track metadata");
    let response = client
        .post(endpoint)
        .query(&[("key", api_key)])
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;
    evaluate_response(status, &text, language)
}

/// Apply the response checks in their required order: anti-bot signal first,
/// then HTTP status, then track list presence, then language selection.
fn evaluate_response(status: StatusCode, body: &str, language: &str) -> Result<CaptionTrack> {
    // Blocked and error responses are not always JSON; a lenient parse keeps
    // the checks below reachable.
    let player: PlayerResponse = serde_json::from_str(body).unwrap_or_default();

    let reason = player
        .playability_status
        .as_ref()
        .and_then(|status| status.reason.as_deref())
        .unwrap_or("");
    if reason.contains("bot") {
        return Err(TranscriptError::RequestBlocked);
    }

    if status.as_u16() != 200 {
        return Err(super::http_failure(status));
    }

    let tracks = player
        .captions
        .and_then(|captions| captions.player_captions_tracklist_renderer)
        .and_then(|renderer| renderer.caption_tracks)
        .unwrap_or_default();
    if tracks.is_empty() {
        return Err(TranscriptError::NoCaptions);
    }

    select_track(tracks, language)
}

/// Exact, case-sensitive language match; the first matching track wins.
fn select_track(tracks: Vec<CaptionTrack>, language: &str) -> Result<CaptionTrack> {
    tracks
        .into_iter()
        .find(|track| track.language_code == language)
        .ok_or_else(|| TranscriptError::LanguageNotAvailable {
            requested: language.to_string(),
        })
}
