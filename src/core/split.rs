//! Reasoning trace / answer split of a generation buffer.

use serde::{Deserialize, Serialize};

/// A generation buffer separated into its reasoning trace and final answer.
///
/// `trace` is `None` only when the buffer never opened a reasoning block.
/// `answer` is `None` while the reasoning block is still open, or when
/// nothing but whitespace follows the closing tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThinkingSplit {
    /// Trimmed text between the reasoning tags.
    pub trace: Option<String>,

    /// Trimmed text after the reasoning block (or the whole buffer if untagged).
    pub answer: Option<String>,
}

impl ThinkingSplit {
    /// Creates a split from its two parts.
    #[must_use]
    pub const fn new(trace: Option<String>, answer: Option<String>) -> Self {
        Self { trace, answer }
    }

    /// Returns true if the trace has any non-whitespace content worth showing.
    ///
    /// # Examples
    ///
    /// ```
    /// use streamseg::core::ThinkingSplit;
    ///
    /// let split = ThinkingSplit::new(Some(String::new()), None);
    /// assert!(!split.has_visible_trace());
    /// ```
    #[must_use]
    pub fn has_visible_trace(&self) -> bool {
        self.trace.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    /// Returns the trace text, if any.
    #[must_use]
    pub fn trace(&self) -> Option<&str> {
        self.trace.as_deref()
    }

    /// Returns the answer text, if any.
    #[must_use]
    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }
}
