//! Plain line segmentation.
//!
//! Every line becomes a [`SegmentKind::PlainLine`]. Useful for renderers
//! that display raw text without markdown or math support.

use crate::core::{Classification, ClassifierState, Document, SegmentKind};
use crate::segmenting::traits::Segmenter;

/// Segmenter that classifies every line as plain text.
///
/// # Examples
///
/// ```
/// use streamseg::core::SegmentKind;
/// use streamseg::segmenting::{PlainSegmenter, Segmenter};
///
/// let result = PlainSegmenter::new().segment("# not a heading\n```");
/// assert!(result.document.iter().all(|s| s.kind == SegmentKind::PlainLine));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainSegmenter;

impl PlainSegmenter {
    /// Creates a plain segmenter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Segmenter for PlainSegmenter {
    fn segment(&self, text: &str) -> Classification {
        let document = if text.is_empty() {
            Document::new()
        } else {
            let mut document = Document::new();
            for line in text.split('\n') {
                document.push(SegmentKind::PlainLine, line);
            }
            document
        };

        Classification {
            document,
            final_state: ClassifierState::Normal,
        }
    }

    fn name(&self) -> &'static str {
        "plain"
    }

    fn description(&self) -> &'static str {
        "Every line verbatim as plain text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_keeps_lines_verbatim() {
        let result = PlainSegmenter::new().segment("# a\n```\n$$x$$");
        assert_eq!(
            result.document.pairs(),
            vec![
                (SegmentKind::PlainLine, "# a"),
                (SegmentKind::PlainLine, "```"),
                (SegmentKind::PlainLine, "$$x$$"),
            ]
        );
        assert_eq!(result.final_state, ClassifierState::Normal);
    }

    #[test]
    fn test_plain_empty_input() {
        assert!(PlainSegmenter::new().segment("").document.is_empty());
    }

    #[test]
    fn test_plain_name() {
        assert_eq!(PlainSegmenter::new().name(), "plain");
    }
}
