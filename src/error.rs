//! Error types for streamseg operations.
//!
//! Splitting and classification are total and never fail. Errors only
//! arise at the edges: reading input, looking up a strategy by name, and
//! running CLI commands. This module provides that hierarchy using
//! `thiserror`.

use thiserror::Error;

/// Result type alias for streamseg operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Segmentation setup errors.
    #[error("segmentation error: {0}")]
    Segment(#[from] SegmentError),

    /// I/O errors (file and stdin reads).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),
}

/// Errors configuring a segmentation run.
#[derive(Error, Debug)]
pub enum SegmentError {
    /// Unknown segmentation strategy.
    #[error("unknown segmentation strategy: {name}")]
    UnknownStrategy {
        /// Name of the unknown strategy.
        name: String,
    },

    /// Replay step must be at least one character.
    #[error("replay step must be greater than zero")]
    ZeroReplayStep,
}

/// I/O-specific errors for reading input.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Input was not valid UTF-8.
    #[error("invalid UTF-8 in {path} at byte offset {offset}")]
    InvalidUtf8 {
        /// Path to the input (`-` for stdin).
        path: String,
        /// Byte offset where invalid UTF-8 was found.
        offset: usize,
    },

    /// Memory mapping error.
    #[error("memory mapping failed: {path}: {reason}")]
    MmapFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Missing required argument.
    #[error("missing required argument: {0}")]
    MissingArgument(String),

    /// Output format error.
    #[error("output format error: {0}")]
    OutputFormat(String),
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        Self::OutputFormat(err.to_string())
    }
}
