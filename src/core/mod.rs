//! Core domain models for streamseg.
//!
//! Segments, documents, the reasoning split and generation timing. These
//! are pure value types with no I/O dependencies.

pub mod segment;
pub mod split;
pub mod timing;

pub use segment::{Classification, ClassifierState, Document, Segment, SegmentId, SegmentKind};
pub use split::ThinkingSplit;
pub use timing::{
    GenerationTiming, ReasoningClock, display_time, format_duration, reasoning_label,
};
