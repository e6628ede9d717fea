//! Re-derivation of the display view on every buffer change.
//!
//! The coordinator holds no state besides the last buffer it saw and the
//! view derived from it. Each new buffer is split and classified from
//! scratch; there is no incremental patching between prefixes.

use crate::core::{ClassifierState, Document, ThinkingSplit};
use crate::segmenting::lines::MarkdownSegmenter;
use crate::segmenting::tags::{is_reasoning_phase, split_thinking};
use crate::segmenting::traits::Segmenter;
use serde::Serialize;
use tracing::{debug, trace};

/// Everything a renderer needs for one snapshot of a streamed message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StreamView {
    /// The raw trace/answer split.
    pub split: ThinkingSplit,

    /// Segments of the reasoning trace, when a trace exists.
    pub trace: Option<Document>,

    /// Segments of the answer, when an answer exists.
    pub answer: Option<Document>,

    /// True while no closing reasoning tag has appeared.
    pub is_reasoning_phase: bool,

    /// Scan state at the end of the trace, if classified.
    pub trace_state: Option<ClassifierState>,

    /// Scan state at the end of the answer, if classified.
    pub answer_state: Option<ClassifierState>,
}

/// Derives a [`StreamView`] from a complete buffer snapshot.
#[must_use]
pub fn derive_view<S: Segmenter + ?Sized>(segmenter: &S, buffer: &str) -> StreamView {
    let split = split_thinking(buffer);

    let (answer, answer_state) = split.answer().map_or((None, None), |text| {
        let result = segmenter.segment(text);
        (Some(result.document), Some(result.final_state))
    });
    let (trace, trace_state) = split.trace().map_or((None, None), |text| {
        let result = segmenter.segment(text);
        (Some(result.document), Some(result.final_state))
    });

    StreamView {
        is_reasoning_phase: is_reasoning_phase(buffer),
        split,
        trace,
        answer,
        trace_state,
        answer_state,
    }
}

/// Re-derives the view of a growing buffer, skipping unchanged snapshots.
///
/// # Examples
///
/// ```
/// use streamseg::segmenting::StreamCoordinator;
///
/// let mut coordinator = StreamCoordinator::new();
/// let view = coordinator.update("<think>hm");
/// assert!(view.is_reasoning_phase);
/// assert!(view.answer.is_none());
///
/// let view = coordinator.update("<think>hm</think># Done");
/// assert!(!view.is_reasoning_phase);
/// assert_eq!(view.answer.as_ref().map(|d| d.len()), Some(1));
/// ```
#[derive(Debug)]
pub struct StreamCoordinator<S: Segmenter = MarkdownSegmenter> {
    segmenter: S,
    last_buffer: Option<String>,
    view: StreamView,
    derivations: usize,
}

impl StreamCoordinator<MarkdownSegmenter> {
    /// Creates a coordinator using the markdown segmenter.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_segmenter(MarkdownSegmenter::new())
    }
}

impl Default for StreamCoordinator<MarkdownSegmenter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Segmenter> StreamCoordinator<S> {
    /// Creates a coordinator using the given segmenter.
    #[must_use]
    pub const fn with_segmenter(segmenter: S) -> Self {
        Self {
            segmenter,
            last_buffer: None,
            view: StreamView {
                split: ThinkingSplit::new(None, None),
                trace: None,
                answer: None,
                is_reasoning_phase: true,
                trace_state: None,
                answer_state: None,
            },
            derivations: 0,
        }
    }

    /// Re-derives the view for `buffer`, returning the memoized view when
    /// the buffer is unchanged since the last call.
    pub fn update(&mut self, buffer: &str) -> &StreamView {
        if self.last_buffer.as_deref() == Some(buffer) {
            trace!(len = buffer.len(), "buffer unchanged, reusing view");
            return &self.view;
        }

        self.view = derive_view(&self.segmenter, buffer);
        self.derivations += 1;
        self.last_buffer = Some(buffer.to_string());

        debug!(
            len = buffer.len(),
            reasoning = self.view.is_reasoning_phase,
            trace_segments = self.view.trace.as_ref().map_or(0, Document::len),
            answer_segments = self.view.answer.as_ref().map_or(0, Document::len),
            "derived stream view"
        );
        &self.view
    }

    /// Returns the most recently derived view.
    #[must_use]
    pub const fn view(&self) -> &StreamView {
        &self.view
    }

    /// Returns how many times a view was actually derived.
    #[must_use]
    pub const fn derivations(&self) -> usize {
        self.derivations
    }

    /// Returns the segmenter in use.
    #[must_use]
    pub const fn segmenter(&self) -> &S {
        &self.segmenter
    }

    /// Forgets the memoized buffer, e.g. when a new message starts.
    pub fn reset(&mut self) {
        self.last_buffer = None;
        self.view = derive_view(&self.segmenter, "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SegmentKind;
    use crate::segmenting::plain::PlainSegmenter;

    #[test]
    fn test_untagged_answer() {
        let mut coordinator = StreamCoordinator::new();
        let view = coordinator.update("# Hello\nworld");
        assert!(view.trace.is_none());
        assert!(view.is_reasoning_phase);
        let answer = view.answer.as_ref().unwrap();
        assert_eq!(
            answer.pairs(),
            vec![
                (SegmentKind::Heading1, "Hello"),
                (SegmentKind::PlainLine, "world")
            ]
        );
        assert_eq!(view.answer_state, Some(ClassifierState::Normal));
    }

    #[test]
    fn test_open_trace_has_no_answer() {
        let mut coordinator = StreamCoordinator::new();
        let view = coordinator.update("<think>\n```\nlet x");
        assert!(view.answer.is_none());
        assert_eq!(view.answer_state, None);
        assert_eq!(
            view.trace.as_ref().unwrap().pairs(),
            vec![(SegmentKind::CodeBlockLine, "let x")]
        );
        assert_eq!(view.trace_state, Some(ClassifierState::InCodeBlock));
    }

    #[test]
    fn test_closed_trace_with_answer() {
        let mut coordinator = StreamCoordinator::new();
        let view = coordinator.update("<think>why</think>\n$$x$$");
        assert!(!view.is_reasoning_phase);
        assert_eq!(
            view.trace.as_ref().unwrap().pairs(),
            vec![(SegmentKind::PlainLine, "why")]
        );
        assert_eq!(
            view.answer.as_ref().unwrap().pairs(),
            vec![(SegmentKind::LatexBlockLine, "x")]
        );
    }

    #[test]
    fn test_unchanged_buffer_is_memoized() {
        let mut coordinator = StreamCoordinator::new();
        coordinator.update("abc");
        coordinator.update("abc");
        assert_eq!(coordinator.derivations(), 1);
        coordinator.update("abcd");
        assert_eq!(coordinator.derivations(), 2);
    }

    #[test]
    fn test_memoized_view_keeps_identities() {
        let mut coordinator = StreamCoordinator::new();
        let first = coordinator.update("line").answer.clone().unwrap();
        let second = coordinator.update("line").answer.clone().unwrap();
        assert_eq!(first.segments()[0].id, second.segments()[0].id);
    }

    #[test]
    fn test_matches_fresh_derivation() {
        let mut coordinator = StreamCoordinator::new();
        let text = "<think>a\nb</think>\n# c\n```\nd";
        for end in 0..=text.len() {
            let prefix = &text[..end];
            let view = coordinator.update(prefix).clone();
            assert_eq!(view, derive_view(&MarkdownSegmenter::new(), prefix));
        }
    }

    #[test]
    fn test_custom_segmenter() {
        let mut coordinator = StreamCoordinator::with_segmenter(PlainSegmenter::new());
        let view = coordinator.update("# raw");
        assert_eq!(
            view.answer.as_ref().unwrap().pairs(),
            vec![(SegmentKind::PlainLine, "# raw")]
        );
        assert_eq!(coordinator.segmenter().name(), "plain");
    }

    #[test]
    fn test_reset_forgets_buffer() {
        let mut coordinator = StreamCoordinator::new();
        coordinator.update("abc");
        coordinator.reset();
        assert!(coordinator.view().answer.as_ref().unwrap().is_empty());
        coordinator.update("abc");
        assert_eq!(coordinator.derivations(), 2);
    }
}
