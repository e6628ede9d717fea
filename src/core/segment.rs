//! Typed display segments.
//!
//! A [`Segment`] is one classified line of generated text. An ordered run
//! of segments forms a [`Document`], which is what a renderer consumes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SEGMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque segment identity.
///
/// Only meaningful to renderers that diff segment lists. Two
/// classifications of the same text produce different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(u64);

impl SegmentId {
    /// Allocates a fresh, process-unique identity.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_SEGMENT_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw identity value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// The display kind of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    /// `# ` heading.
    Heading1,
    /// `## ` heading.
    Heading2,
    /// `### ` heading.
    Heading3,
    /// `#### ` heading.
    Heading4,
    /// A line inside a fenced code block.
    CodeBlockLine,
    /// The title following an opening code fence (e.g. a language tag).
    CodeBlockTitle,
    /// A line of display math.
    LatexBlockLine,
    /// Prose with inline math somewhere in the line.
    LatexInlineMixed,
    /// Anything else.
    PlainLine,
}

impl SegmentKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Heading1,
        Self::Heading2,
        Self::Heading3,
        Self::Heading4,
        Self::CodeBlockLine,
        Self::CodeBlockTitle,
        Self::LatexBlockLine,
        Self::LatexInlineMixed,
        Self::PlainLine,
    ];

    /// Returns the stable snake-case name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heading1 => "heading1",
            Self::Heading2 => "heading2",
            Self::Heading3 => "heading3",
            Self::Heading4 => "heading4",
            Self::CodeBlockLine => "code_block_line",
            Self::CodeBlockTitle => "code_block_title",
            Self::LatexBlockLine => "latex_block_line",
            Self::LatexInlineMixed => "latex_inline_mixed",
            Self::PlainLine => "plain_line",
        }
    }

    /// Returns the heading level (1-4) for heading kinds.
    #[must_use]
    pub const fn heading_level(self) -> Option<u8> {
        match self {
            Self::Heading1 => Some(1),
            Self::Heading2 => Some(2),
            Self::Heading3 => Some(3),
            Self::Heading4 => Some(4),
            _ => None,
        }
    }

    /// Returns true for kinds that belong to a fenced code block.
    #[must_use]
    pub const fn is_code(self) -> bool {
        matches!(self, Self::CodeBlockLine | Self::CodeBlockTitle)
    }

    /// Returns true for kinds that carry math.
    #[must_use]
    pub const fn is_latex(self) -> bool {
        matches!(self, Self::LatexBlockLine | Self::LatexInlineMixed)
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified unit of display text.
///
/// Equality ignores [`Segment::id`]: two segments are equal when their kind
/// and content match.
///
/// # Examples
///
/// ```
/// use streamseg::core::{Segment, SegmentKind};
///
/// let a = Segment::new(SegmentKind::PlainLine, "hello");
/// let b = Segment::new(SegmentKind::PlainLine, "hello");
/// assert_ne!(a.id, b.id);
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Opaque identity for list diffing.
    pub id: SegmentId,

    /// Display kind.
    pub kind: SegmentKind,

    /// Text content, with any heading or fence prefix removed.
    pub content: String,
}

impl Segment {
    /// Creates a segment with a fresh identity.
    #[must_use]
    pub fn new(kind: SegmentKind, content: impl Into<String>) -> Self {
        Self {
            id: SegmentId::next(),
            kind,
            content: content.into(),
        }
    }
}

impl PartialEq for Segment {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.content == other.content
    }
}

/// An ordered sequence of segments, in source line order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    segments: Vec<Segment>,
}

impl Document {
    /// Creates an empty document.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Appends a segment of the given kind.
    pub fn push(&mut self, kind: SegmentKind, content: impl Into<String>) {
        self.segments.push(Segment::new(kind, content));
    }

    /// Returns the segments as a slice.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the document has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates over the segments in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// Returns `(kind, content)` pairs, ignoring identities.
    #[must_use]
    pub fn pairs(&self) -> Vec<(SegmentKind, &str)> {
        self.segments
            .iter()
            .map(|s| (s.kind, s.content.as_str()))
            .collect()
    }

    /// Counts segments per kind. Kinds that never occur are omitted.
    #[must_use]
    pub fn count_by_kind(&self) -> BTreeMap<SegmentKind, usize> {
        let mut counts = BTreeMap::new();
        for segment in &self.segments {
            *counts.entry(segment.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Consumes the document, returning the underlying segments.
    #[must_use]
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }
}

impl FromIterator<Segment> for Document {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Document {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

/// Block state carried from one line to the next during a classification pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierState {
    /// Outside any fenced block.
    #[default]
    Normal,
    /// Inside a ```` ``` ```` code block.
    InCodeBlock,
    /// Inside a `$$` / `$` math block.
    InLatexBlock,
}

impl ClassifierState {
    /// Returns true if a block was left open.
    #[must_use]
    pub const fn is_open_block(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

/// The result of one classification pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// The segments produced.
    pub document: Document,

    /// The state the scan ended in. Non-`Normal` means a block is still open.
    pub final_state: ClassifierState,
}
