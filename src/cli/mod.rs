use clap::Parser;
use std::path::PathBuf;

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "yt-transcript",
    about = "Fetch YouTube video transcripts straight from the page, no API key required",
    version,
    long_about = "Fetches the transcript of a YouTube video by scraping its watch page and \
                  negotiating a caption track through YouTube's internal player API. Works \
                  with any public video that has captions; no official API key or quota."
)]
pub struct Cli {
    /// YouTube video URL (watch, youtu.be, embed and /v/ links are accepted)
    #[arg(value_name = "URL")]
    pub url: String,

    /// Caption language code to fetch, matched exactly (e.g. "en", "fr")
    #[arg(short, long, value_name = "LANG")]
    pub language: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Output file path (prints to console if not specified)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Proxy URL to route every request through
    #[arg(long, value_name = "URL")]
    pub proxy: Option<String>,

    /// Request timeout in seconds (requests wait indefinitely if not set)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Extra header sent with every request, as "Name: value" (repeatable)
    #[arg(short = 'H', long = "header", value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Override the User-Agent header
    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long)]
    pub quiet: bool,
}
