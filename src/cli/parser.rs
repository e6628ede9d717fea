//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::error::{CommandError, Result};
use crate::segmenting::DEFAULT_STRATEGY;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default number of grapheme clusters appended per replay step.
pub const DEFAULT_REPLAY_STEP: usize = 8;

/// Default simulated time per replay step, in milliseconds.
pub const DEFAULT_TICK_MS: u64 = 100;

/// streamseg: segment streamed LLM output for display.
///
/// Splits generated text into its reasoning trace and answer, and
/// classifies each line as a heading, code, math or prose.
#[derive(Parser, Debug)]
#[command(name = "streamseg")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose (debug) logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json, ndjson).
    #[arg(long, default_value = "text", global = true, env = "STREAMSEG_FORMAT")]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a buffer into its reasoning trace and answer.
    Split {
        /// Input file (stdin if omitted or `-`).
        file: Option<PathBuf>,
    },

    /// Classify a buffer into typed display segments.
    Classify {
        /// Input file (stdin if omitted or `-`).
        file: Option<PathBuf>,

        /// Which part to classify (answer, trace, both).
        #[arg(short, long, default_value = "both")]
        part: String,

        /// Segmentation strategy (markdown, plain).
        #[arg(short, long, default_value = DEFAULT_STRATEGY, env = "STREAMSEG_STRATEGY")]
        strategy: String,

        /// Classify the whole buffer without splitting out the reasoning trace.
        #[arg(long)]
        raw: bool,
    },

    /// Replay a buffer as a simulated token stream.
    Replay {
        /// Input file (stdin if omitted or `-`).
        file: Option<PathBuf>,

        /// Grapheme clusters appended per step.
        #[arg(long, default_value_t = DEFAULT_REPLAY_STEP)]
        step: usize,

        /// Simulated milliseconds per step.
        #[arg(long, default_value_t = DEFAULT_TICK_MS)]
        tick_ms: u64,

        /// Segmentation strategy (markdown, plain).
        #[arg(short, long, default_value = DEFAULT_STRATEGY, env = "STREAMSEG_STRATEGY")]
        strategy: String,
    },

    /// Segment many files in parallel and summarize each.
    Batch {
        /// Input files.
        files: Vec<PathBuf>,

        /// Segmentation strategy (markdown, plain).
        #[arg(short, long, default_value = DEFAULT_STRATEGY, env = "STREAMSEG_STRATEGY")]
        strategy: String,
    },

    /// List available segmentation strategies.
    Strategies,
}

/// Which part of a split buffer to classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    /// Only the answer.
    Answer,
    /// Only the reasoning trace.
    Trace,
    /// Trace and answer.
    Both,
}

impl Part {
    /// Parses a part name.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::InvalidArgument`] for unknown names.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "answer" => Ok(Self::Answer),
            "trace" => Ok(Self::Trace),
            "both" => Ok(Self::Both),
            other => Err(CommandError::InvalidArgument(format!(
                "--part {other} (expected answer, trace or both)"
            ))
            .into()),
        }
    }

    /// Returns true if the trace should be classified.
    #[must_use]
    pub const fn includes_trace(self) -> bool {
        matches!(self, Self::Trace | Self::Both)
    }

    /// Returns true if the answer should be classified.
    #[must_use]
    pub const fn includes_answer(self) -> bool {
        matches!(self, Self::Answer | Self::Both)
    }
}
