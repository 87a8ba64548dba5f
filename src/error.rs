//! Error types for GC log parsing and rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while turning a GC log into a chart.
#[derive(Debug, Error)]
pub enum GcLogError {
    /// A byte or duration quantity had a non-integer numeric prefix.
    #[error("Malformed quantity: '{input}'")]
    MalformedQuantity { input: String },

    /// A matched line's timestamp did not conform to the configured pattern.
    #[error("Line {line}: timestamp '{text}' does not match format '{format}': {source}")]
    TimestampParse {
        line: usize,
        text: String,
        format: String,
        #[source]
        source: chrono::ParseError,
    },

    /// No recognized GC events remain to be plotted.
    #[error("Could not find any valid entry in GC log")]
    EmptyDataset,

    /// Reading the log file failed.
    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GcLogError {
    pub(crate) fn malformed(input: &str) -> Self {
        GcLogError::MalformedQuantity {
            input: input.to_string(),
        }
    }

    /// Process exit status for this error. An empty dataset exits with 2.
    pub fn exit_code(&self) -> u8 {
        match self {
            GcLogError::EmptyDataset => 2,
            _ => 1,
        }
    }
}
