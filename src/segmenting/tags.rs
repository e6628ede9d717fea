//! Reasoning tag splitting.
//!
//! Separates a generation buffer into the reasoning trace wrapped in
//! `<think>`/`</think>` and the answer that follows it. The buffer may be a
//! prefix of the final text, so an unclosed trace is a normal state.

use crate::core::ThinkingSplit;

/// Opening reasoning delimiter.
pub const THINK_OPEN: &str = "<think>";

/// Closing reasoning delimiter.
pub const THINK_CLOSE: &str = "</think>";

/// Splits a buffer into its reasoning trace and answer.
///
/// Never fails: unbalanced or missing tags map to absent parts.
///
/// # Examples
///
/// ```
/// use streamseg::segmenting::split_thinking;
///
/// let split = split_thinking("<think>reasoning</think>answer");
/// assert_eq!(split.trace.as_deref(), Some("reasoning"));
/// assert_eq!(split.answer.as_deref(), Some("answer"));
///
/// let split = split_thinking("<think>still going");
/// assert_eq!(split.trace.as_deref(), Some("still going"));
/// assert_eq!(split.answer, None);
/// ```
#[must_use]
pub fn split_thinking(text: &str) -> ThinkingSplit {
    let Some(open) = text.find(THINK_OPEN) else {
        return ThinkingSplit::new(None, Some(text.trim().to_string()));
    };

    let after_open = &text[open + THINK_OPEN.len()..];
    let Some(close) = after_open.find(THINK_CLOSE) else {
        return ThinkingSplit::new(Some(after_open.trim().to_string()), None);
    };

    let trace = after_open[..close].trim();
    let answer = after_open[close + THINK_CLOSE.len()..].trim();

    ThinkingSplit::new(
        Some(trace.to_string()),
        (!answer.is_empty()).then(|| answer.to_string()),
    )
}

/// Returns true while no closing tag exists anywhere in the buffer.
///
/// This is also true for buffers that never used tags at all; combine it
/// with the generator's running flag before treating a message as
/// "still thinking".
#[must_use]
pub fn is_reasoning_phase(text: &str) -> bool {
    !text.contains(THINK_CLOSE)
}
