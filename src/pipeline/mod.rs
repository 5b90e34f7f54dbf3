use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::StatusCode;

use crate::output::OutputFormat;
use crate::{Result, TranscriptError};

pub mod captions;
pub mod player;
pub mod resolver;
pub mod scrape;

use captions::Transcript;

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Linux; Android 14) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Mobile Safari/537.36";

/// Per-invocation options: caption language, output representation and the
/// transport configuration forwarded to every HTTP call in the pipeline.
///
/// The transport fields are never inspected beyond client construction;
/// headers ride along on every request, proxy and timeout are applied to the
/// client the pipeline builds for the invocation.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Caption language code, matched exactly against the track list
    pub language: String,
    /// Representation produced by [`crate::fetch_transcript`]
    pub output_format: OutputFormat,
    /// Extra headers sent with every request
    pub headers: HeaderMap,
    /// Proxy URL all requests are routed through
    pub proxy: Option<String>,
    /// Request timeout; requests wait indefinitely when unset
    pub timeout: Option<Duration>,
    /// User-Agent override
    pub user_agent: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            output_format: OutputFormat::Json,
            headers: HeaderMap::new(),
            proxy: None,
            timeout: None,
            user_agent: None,
        }
    }
}

/// The transcript resolution pipeline over one configured HTTP client.
///
/// Holds no mutable state; a pipeline can serve any number of `fetch` calls,
/// concurrently or in sequence.
#[derive(Debug, Clone)]
pub struct TranscriptPipeline {
    client: reqwest::Client,
    language: String,
    player_endpoint: String,
}

impl TranscriptPipeline {
    /// Build a pipeline from request options. Fails if the transport
    /// configuration (proxy URL, headers) is rejected by the HTTP client.
    pub fn new(options: &RequestOptions) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .default_headers(options.headers.clone())
            .user_agent(options.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT));

        if let Some(proxy) = options.proxy.as_deref() {
            builder = builder.proxy(reqwest::Proxy::all(proxy)?);
        }
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            language: options.language.clone(),
            player_endpoint: player::PLAYER_ENDPOINT.to_string(),
        })
    }

    /// Point track negotiation at an alternate player endpoint. Intended for
    /// integration tests and self-hosted frontends; the default is the real
    /// YouTube endpoint.
    pub fn with_player_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.player_endpoint = endpoint.into();
        self
    }

    /// Run the full resolution pipeline for a single video URL.
    pub async fn fetch(&self, url: &str) -> Result<Transcript> {
        let video_id = resolver::extract_video_id(url)?;
        tracing::debug!(%video_id, "resolved video id");

        let page = scrape::fetch_watch_page(&self.client, url).await?;
        let api_key = scrape::extract_api_key(&page)?;
        tracing::debug!("extracted InnerTube API key");

        let track = player::negotiate_track(
            &self.client,
            &self.player_endpoint,
            &video_id,
            &api_key,
            &self.language,
        )
        .await?;
        tracing::debug!(language = %track.language_code, "selected caption track");

        captions::fetch_captions(&self.client, &track, &video_id).await
    }
}

/// Map a non-200 HTTP status to the fetch failure carried back to the caller.
pub(crate) fn http_failure(status: StatusCode) -> TranscriptError {
    TranscriptError::FetchFailed {
        status: status.as_u16(),
        status_text: status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let options = RequestOptions::default();
        assert_eq!(options.language, "en");
        assert_eq!(options.output_format, OutputFormat::Json);
        assert!(options.headers.is_empty());
        assert!(options.proxy.is_none());
        assert!(options.timeout.is_none());
    }

    #[test]
    fn http_failure_carries_status_and_text() {
        let err = http_failure(StatusCode::FORBIDDEN);
        match err {
            TranscriptError::FetchFailed {
                status,
                status_text,
            } => {
                assert_eq!(status, 403);
                assert_eq!(status_text, "Forbidden");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn http_failure_without_reason_phrase_falls_back() {
        // 599 is valid but has no canonical reason phrase.
        let status = StatusCode::from_u16(599).unwrap();
        let err = http_failure(status);
        match err {
            TranscriptError::FetchFailed {
                status,
                status_text,
            } => {
                assert_eq!(status, 599);
                assert_eq!(status_text, "Unknown error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn pipeline_rejects_bad_proxy_url() {
        let options = RequestOptions {
            proxy: Some("not a proxy".to_string()),
            ..RequestOptions::default()
        };
        assert!(TranscriptPipeline::new(&options).is_err());
    }
}
