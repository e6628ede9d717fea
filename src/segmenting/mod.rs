//! Segmentation of streamed generation output.
//!
//! A buffer is first split into its reasoning trace and answer
//! ([`split_thinking`]), then each part is turned into typed display
//! segments by a [`Segmenter`]. Two strategies are available:
//!
//! - **Markdown**: headings, fenced code, LaTeX math and prose (default)
//! - **Plain**: every line verbatim as plain text
//!
//! [`StreamCoordinator`] ties the two together for a buffer that grows
//! while the model is generating.

pub mod lines;
pub mod plain;
pub mod stream;
pub mod tags;
pub mod traits;

pub use lines::{MarkdownSegmenter, classify, classify_lines};
pub use plain::PlainSegmenter;
pub use stream::{StreamCoordinator, StreamView, derive_view};
pub use tags::{THINK_CLOSE, THINK_OPEN, is_reasoning_phase, split_thinking};
pub use traits::Segmenter;

/// Name of the default segmentation strategy.
pub const DEFAULT_STRATEGY: &str = "markdown";

/// Creates the default segmenter (markdown).
#[must_use]
pub const fn default_segmenter() -> MarkdownSegmenter {
    MarkdownSegmenter::new()
}

/// Creates a segmenter by name.
///
/// # Arguments
///
/// * `name` - Strategy name: "markdown" or "plain".
///
/// # Errors
///
/// Returns [`crate::error::SegmentError::UnknownStrategy`] if the strategy name is not recognized.
pub fn create_segmenter(name: &str) -> crate::error::Result<Box<dyn Segmenter>> {
    match name.to_lowercase().as_str() {
        "markdown" => Ok(Box::new(MarkdownSegmenter::new())),
        "plain" => Ok(Box::new(PlainSegmenter::new())),
        _ => Err(crate::error::SegmentError::UnknownStrategy {
            name: name.to_string(),
        }
        .into()),
    }
}

/// Lists available segmentation strategy names.
#[must_use]
pub fn available_strategies() -> Vec<&'static str> {
    vec!["markdown", "plain"]
}
