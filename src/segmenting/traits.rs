//! Segmenter trait definition.
//!
//! Defines the interface for line segmentation strategies, so renderers
//! with different capabilities can pick how text is classified.

use crate::core::Classification;

/// Trait for turning a text buffer into typed display segments.
///
/// Implementations must be pure: the same text always yields the same
/// `(kind, content)` sequence and final state. They must be `Send + Sync`
/// so independent buffers can be segmented in parallel.
///
/// # Examples
///
/// ```
/// use streamseg::segmenting::{MarkdownSegmenter, Segmenter};
///
/// let segmenter = MarkdownSegmenter::new();
/// let result = segmenter.segment("# Title\nbody");
/// assert_eq!(result.document.len(), 2);
/// ```
pub trait Segmenter: Send + Sync {
    /// Classifies every line of `text`.
    fn segment(&self, text: &str) -> Classification;

    /// Returns the name of the strategy.
    fn name(&self) -> &'static str;

    /// Returns a description of the strategy.
    fn description(&self) -> &'static str {
        "No description available"
    }
}

impl<S: Segmenter + ?Sized> Segmenter for Box<S> {
    fn segment(&self, text: &str) -> Classification {
        (**self).segment(text)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn description(&self) -> &'static str {
        (**self).description()
    }
}
