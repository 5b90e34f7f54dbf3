//! yt-transcript - fetch YouTube video transcripts straight from the page
//!
//! This library extracts a spoken-word transcript for a video given only its
//! public URL. It scrapes the watch page for the embedded InnerTube API key,
//! negotiates a caption track through the internal player API while
//! impersonating a mobile client, then fetches and decodes the caption markup.

pub mod cli;
pub mod config;
pub mod output;
pub mod pipeline;
pub mod utils;

pub use cli::Cli;
pub use config::Config;
pub use output::{OutputFormat, TranscriptOutput};
pub use pipeline::captions::{Transcript, TranscriptSegment};
pub use pipeline::player::CaptionTrack;
pub use pipeline::{RequestOptions, TranscriptPipeline};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, TranscriptError>;

/// Failures the pipeline can surface. All of them are terminal: the first
/// failing stage aborts the invocation and no partial result is returned.
#[derive(thiserror::Error, Debug)]
pub enum TranscriptError {
    /// The URL matched none of the accepted YouTube URL shapes
    #[error(
        "invalid YouTube URL: {url}\n\
         Accepted formats:\n\
         - https://www.youtube.com/watch?v=VIDEO_ID\n\
         - https://youtu.be/VIDEO_ID\n\
         - https://www.youtube.com/embed/VIDEO_ID\n\
         - https://www.youtube.com/v/VIDEO_ID"
    )]
    InvalidUrl { url: String },

    /// The watch page no longer embeds the InnerTube API key, or the page
    /// layout changed
    #[error("could not extract the InnerTube API key from the watch page")]
    MissingApiKey,

    /// Anti-bot detection tripped; back off or route through a proxy
    #[error("request blocked by YouTube; try again later or use a proxy")]
    RequestBlocked,

    /// Non-200 response on the metadata or caption fetch
    #[error("failed to fetch transcript: HTTP {status} - {status_text}")]
    FetchFailed { status: u16, status_text: String },

    /// The video has no caption tracks at all
    #[error("no captions available for this video")]
    NoCaptions,

    /// The requested language code is not among the available tracks
    #[error("transcript not available for language code: {requested}")]
    LanguageNotAvailable { requested: String },

    /// Unsupported output format requested
    #[error("invalid output format: {requested}")]
    InvalidOutputFormat { requested: String },

    /// Transport-layer failure, propagated as-is from the HTTP client
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Fetch a video transcript and render it in the representation requested in
/// `options`.
///
/// Single entry point over the whole pipeline: URL resolution, watch-page
/// scrape, API key extraction, caption-track negotiation and caption
/// decoding. Each call is independent; no state is shared between
/// invocations, so concurrent calls for different videos are safe.
pub async fn fetch_transcript(url: &str, options: &RequestOptions) -> Result<TranscriptOutput> {
    let pipeline = TranscriptPipeline::new(options)?;
    let transcript = pipeline.fetch(url).await?;
    Ok(transcript.render(options.output_format))
}
