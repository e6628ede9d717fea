//! # streamseg
//!
//! Incremental segmentation of streamed language-model output.
//!
//! While a model generates, its output buffer grows a few characters at a
//! time. streamseg re-derives, from whatever prefix exists, a reasoning
//! trace (text inside `<think>` ... `</think>`), a final answer, and an
//! ordered list of typed display segments for each.
//!
//! ## Features
//!
//! - **Tag splitting**: reasoning trace vs. answer, tolerant of unclosed tags
//! - **Line classification**: headings, fenced code, LaTeX math and prose
//! - **Stream coordination**: memoized re-derivation on every buffer change
//! - **Reasoning timing**: "Thinking..." / "Thought for" labels

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
// Note: unsafe is needed for memory-mapped I/O (memmap2)
#![warn(unsafe_code)]

pub mod cli;
pub mod core;
pub mod error;
pub mod io;
pub mod segmenting;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use crate::core::{
    Classification, ClassifierState, Document, GenerationTiming, ReasoningClock, Segment,
    SegmentId, SegmentKind, ThinkingSplit, display_time, format_duration, reasoning_label,
};

// Re-export segmentation types
pub use segmenting::{
    DEFAULT_STRATEGY, MarkdownSegmenter, PlainSegmenter, Segmenter, StreamCoordinator,
    StreamView, available_strategies, classify, classify_lines, create_segmenter, derive_view,
    is_reasoning_phase, split_thinking,
};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
