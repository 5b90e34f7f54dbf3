use once_cell::sync::Lazy;
use regex::Regex;

use crate::{Result, TranscriptError};

/// Marker YouTube embeds in the initial ytcfg payload of the watch page.
static API_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""INNERTUBE_API_KEY":"(.*?)""#).expect("valid regex"));

/// Fetch the raw HTML of the video's watch page.
///
/// This stage does not interpret the response beyond reading it as text;
/// transport failures surface as-is.
pub async fn fetch_watch_page(client: &reqwest::Client, url: &str) -> Result<String> {
    tracing::debug!(%url, "fetching watch page");
    let body = client.get(url).send().await?.text().await?;
    Ok(body)
}

/// Pull the InnerTube API key out of the watch page body.
pub fn extract_api_key(html: &str) -> Result<String> {
    API_KEY_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|key| key.as_str().to_string())
        .ok_or(TranscriptError::MissingApiKey)
}
