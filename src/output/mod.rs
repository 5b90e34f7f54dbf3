use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use crate::pipeline::captions::TranscriptSegment;
use crate::TranscriptError;

/// Output representation for a fetched transcript.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Structured segments with timing, serialized as JSON
    #[default]
    Json,
    /// Cue texts joined into plain text
    Text,
    /// Raw caption markup exactly as YouTube returned it
    Xml,
}

impl FromStr for OutputFormat {
    type Err = TranscriptError;

    /// Conversion used by untyped callers (config values, raw strings).
    /// Anything outside the supported set fails with `InvalidOutputFormat`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            "xml" => Ok(OutputFormat::Xml),
            other => Err(TranscriptError::InvalidOutputFormat {
                requested: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Xml => write!(f, "xml"),
        }
    }
}

/// A rendered transcript in one of the supported representations.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum TranscriptOutput {
    /// Ordered timed segments (`json` format)
    Segments(Vec<TranscriptSegment>),
    /// Joined plain text (`text` format)
    Text(String),
    /// Raw unparsed caption body (`xml` format)
    Xml(String),
}

impl TranscriptOutput {
    /// Segments view, present when rendered as `json`.
    pub fn as_segments(&self) -> Option<&[TranscriptSegment]> {
        match self {
            TranscriptOutput::Segments(segments) => Some(segments),
            _ => None,
        }
    }
}

/// Render the output as the string written to console or file.
pub fn to_display_string(output: &TranscriptOutput) -> Result<String> {
    Ok(match output {
        TranscriptOutput::Segments(segments) => serde_json::to_string_pretty(segments)?,
        TranscriptOutput::Text(text) => text.clone(),
        TranscriptOutput::Xml(raw) => raw.clone(),
    })
}

/// Save a rendered transcript to a file.
pub fn save_to_file(output: &TranscriptOutput, path: &Path) -> Result<()> {
    fs_err::write(path, to_display_string(output)?)?;
    Ok(())
}

/// Print a rendered transcript to stdout.
pub fn print_to_console(output: &TranscriptOutput) -> Result<()> {
    println!("{}", to_display_string(output)?);
    Ok(())
}
