//! Unicode utilities for text processing.
//!
//! Streamed prefixes and previews must never cut through a character or a
//! grapheme cluster; these helpers find safe cut points.

use unicode_segmentation::UnicodeSegmentation;

/// Counts the number of grapheme clusters in a string.
///
/// # Examples
///
/// ```
/// use streamseg::io::unicode::grapheme_count;
///
/// assert_eq!(grapheme_count("Hello"), 5);
/// assert_eq!(grapheme_count("世界"), 2);
/// ```
#[must_use]
pub fn grapheme_count(s: &str) -> usize {
    s.graphemes(true).count()
}

/// Truncates a string at a grapheme cluster boundary.
#[must_use]
pub fn truncate_graphemes(s: &str, max_graphemes: usize) -> &str {
    let mut end_byte = 0;

    for (count, grapheme) in s.graphemes(true).enumerate() {
        if count >= max_graphemes {
            break;
        }
        end_byte += grapheme.len();
    }

    &s[..end_byte]
}

/// Shortens `s` to at most `max_graphemes`, marking the cut with `...`.
#[must_use]
pub fn preview(s: &str, max_graphemes: usize) -> String {
    if grapheme_count(s) <= max_graphemes {
        return s.to_string();
    }
    if max_graphemes <= 3 {
        return truncate_graphemes(s, max_graphemes).to_string();
    }
    format!("{}...", truncate_graphemes(s, max_graphemes - 3))
}

/// Byte offsets at which a text grows by `step` grapheme clusters at a time.
///
/// The last offset is always `s.len()`. An empty string yields no offsets;
/// a zero step is treated as one.
///
/// # Examples
///
/// ```
/// use streamseg::io::unicode::grapheme_prefix_ends;
///
/// assert_eq!(grapheme_prefix_ends("abcde", 2), vec![2, 4, 5]);
/// assert_eq!(grapheme_prefix_ends("世界", 1), vec![3, 6]);
/// ```
#[must_use]
pub fn grapheme_prefix_ends(s: &str, step: usize) -> Vec<usize> {
    let step = step.max(1);
    let mut ends = Vec::new();
    let mut end = 0;

    for (i, grapheme) in s.graphemes(true).enumerate() {
        end += grapheme.len();
        if (i + 1) % step == 0 {
            ends.push(end);
        }
    }
    if ends.last() != Some(&s.len()) && !s.is_empty() {
        ends.push(s.len());
    }
    ends
}
