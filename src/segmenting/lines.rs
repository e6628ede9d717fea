//! Markdown-flavoured line classification.
//!
//! A single forward scan over the lines of a buffer. The only state carried
//! between lines is whether a code or math block is open. Classification
//! always starts from scratch, so the result for any prefix of a streamed
//! message is well defined: an unterminated block simply leaves the final
//! state open.

use crate::core::{Classification, ClassifierState, Document, SegmentKind};
use crate::segmenting::traits::Segmenter;

/// Code block fence.
pub const CODE_FENCE: &str = "```";

/// Display math fence.
pub const LATEX_BLOCK_FENCE: &str = "$$";

/// Single-dollar math fence.
pub const LATEX_INLINE_FENCE: &str = "$";

/// Heading prefixes, checked in order.
const HEADINGS: [(&str, SegmentKind); 4] = [
    ("# ", SegmentKind::Heading1),
    ("## ", SegmentKind::Heading2),
    ("### ", SegmentKind::Heading3),
    ("#### ", SegmentKind::Heading4),
];

/// Classifies every line of `text`, reporting the state the scan ended in.
///
/// Empty input produces an empty document. Otherwise the text is split on
/// `\n`, so a trailing newline contributes a final empty plain line.
///
/// # Examples
///
/// ```
/// use streamseg::core::{ClassifierState, SegmentKind};
/// use streamseg::segmenting::classify_lines;
///
/// let result = classify_lines("```\ncode line");
/// assert_eq!(result.final_state, ClassifierState::InCodeBlock);
/// assert_eq!(result.document.pairs(), vec![(SegmentKind::CodeBlockLine, "code line")]);
/// ```
#[must_use]
pub fn classify_lines(text: &str) -> Classification {
    let mut document = Document::new();
    let mut state = ClassifierState::Normal;

    if !text.is_empty() {
        for line in text.split('\n') {
            state = classify_line(line, state, &mut document);
        }
    }

    Classification {
        document,
        final_state: state,
    }
}

/// Classifies `text` and returns only the document.
#[must_use]
pub fn classify(text: &str) -> Document {
    classify_lines(text).document
}

fn classify_line(line: &str, state: ClassifierState, document: &mut Document) -> ClassifierState {
    match state {
        // Closing fences are emitted verbatim as block content.
        ClassifierState::InCodeBlock => {
            document.push(SegmentKind::CodeBlockLine, line);
            if line.starts_with(CODE_FENCE) {
                ClassifierState::Normal
            } else {
                ClassifierState::InCodeBlock
            }
        }
        ClassifierState::InLatexBlock => {
            document.push(SegmentKind::LatexBlockLine, line);
            if line.starts_with(LATEX_BLOCK_FENCE) {
                ClassifierState::Normal
            } else {
                ClassifierState::InLatexBlock
            }
        }
        ClassifierState::Normal => classify_normal_line(line, document),
    }
}

fn classify_normal_line(line: &str, document: &mut Document) -> ClassifierState {
    if let Some((kind, rest)) = heading(line) {
        document.push(kind, rest);
        return ClassifierState::Normal;
    }

    if line == CODE_FENCE {
        return ClassifierState::InCodeBlock;
    }
    if let Some(title) = line.strip_prefix(CODE_FENCE) {
        document.push(SegmentKind::CodeBlockTitle, title);
        return ClassifierState::InCodeBlock;
    }

    if line == LATEX_BLOCK_FENCE || line == LATEX_INLINE_FENCE {
        return ClassifierState::InLatexBlock;
    }

    if let Some(inner) = strip_fences(line, LATEX_BLOCK_FENCE)
        .or_else(|| strip_fences(line, LATEX_INLINE_FENCE))
    {
        document.push(SegmentKind::LatexBlockLine, inner);
    } else if line.contains(LATEX_INLINE_FENCE) {
        document.push(SegmentKind::LatexInlineMixed, line);
    } else {
        document.push(SegmentKind::PlainLine, line);
    }
    ClassifierState::Normal
}

fn heading(line: &str) -> Option<(SegmentKind, &str)> {
    HEADINGS
        .iter()
        .find_map(|&(prefix, kind)| line.strip_prefix(prefix).map(|rest| (kind, rest)))
}

/// Strips `fence` from both ends, if the line is long enough for the two
/// fences not to overlap.
fn strip_fences<'a>(line: &'a str, fence: &str) -> Option<&'a str> {
    if line.len() < fence.len() * 2 {
        return None;
    }
    line.strip_prefix(fence)?.strip_suffix(fence)
}

/// The default segmentation strategy: headings, code, math and prose.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownSegmenter;

impl MarkdownSegmenter {
    /// Creates a markdown segmenter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Segmenter for MarkdownSegmenter {
    fn segment(&self, text: &str) -> Classification {
        classify_lines(text)
    }

    fn name(&self) -> &'static str {
        "markdown"
    }

    fn description(&self) -> &'static str {
        "Headings, fenced code, LaTeX math and plain prose, one segment per line"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn pairs(text: &str) -> Vec<(SegmentKind, String)> {
        classify(text)
            .iter()
            .map(|s| (s.kind, s.content.clone()))
            .collect()
    }

    fn single(text: &str) -> (SegmentKind, String) {
        let mut result = pairs(text);
        assert_eq!(result.len(), 1, "expected one segment for {text:?}");
        result.remove(0)
    }

    #[test_case("# Title", SegmentKind::Heading1, "Title" ; "heading 1")]
    #[test_case("## Sub", SegmentKind::Heading2, "Sub" ; "heading 2")]
    #[test_case("### Part", SegmentKind::Heading3, "Part" ; "heading 3")]
    #[test_case("#### Small", SegmentKind::Heading4, "Small" ; "heading 4")]
    #[test_case("##### Tiny", SegmentKind::PlainLine, "##### Tiny" ; "heading 5 is plain")]
    #[test_case("#NoSpace", SegmentKind::PlainLine, "#NoSpace" ; "hash without space")]
    #[test_case("# ", SegmentKind::Heading1, "" ; "empty heading")]
    #[test_case("```rust", SegmentKind::CodeBlockTitle, "rust" ; "code title")]
    #[test_case("$$\\sqrt{2}$$", SegmentKind::LatexBlockLine, "\\sqrt{2}" ; "double dollar line")]
    #[test_case("$x^2$", SegmentKind::LatexBlockLine, "x^2" ; "single dollar line")]
    #[test_case("$$$$", SegmentKind::LatexBlockLine, "" ; "empty double dollar")]
    #[test_case("$$$", SegmentKind::LatexBlockLine, "$" ; "three dollars")]
    #[test_case("$$x$", SegmentKind::LatexBlockLine, "$x" ; "mismatched fences")]
    #[test_case("costs $5 today", SegmentKind::LatexInlineMixed, "costs $5 today" ; "inline dollar")]
    #[test_case("where $$a$$ holds", SegmentKind::LatexInlineMixed, "where $$a$$ holds" ; "inline double")]
    #[test_case("$x", SegmentKind::LatexInlineMixed, "$x" ; "leading dollar only")]
    #[test_case("just prose", SegmentKind::PlainLine, "just prose" ; "plain")]
    #[test_case("  # indented", SegmentKind::PlainLine, "  # indented" ; "indented heading is plain")]
    fn test_single_line(line: &str, kind: SegmentKind, content: &str) {
        assert_eq!(single(line), (kind, content.to_string()));
    }

    #[test]
    fn test_empty_input() {
        let result = classify_lines("");
        assert!(result.document.is_empty());
        assert_eq!(result.final_state, ClassifierState::Normal);
    }

    #[test]
    fn test_heading_body_and_code_block() {
        assert_eq!(
            pairs("# Title\nbody\n```\nx\n```"),
            vec![
                (SegmentKind::Heading1, "Title".to_string()),
                (SegmentKind::PlainLine, "body".to_string()),
                (SegmentKind::CodeBlockLine, "x".to_string()),
                (SegmentKind::CodeBlockLine, "```".to_string()),
            ]
        );
    }

    #[test]
    fn test_unterminated_code_block() {
        let result = classify_lines("```\ncode line");
        assert_eq!(result.final_state, ClassifierState::InCodeBlock);
        assert_eq!(
            result.document.pairs(),
            vec![(SegmentKind::CodeBlockLine, "code line")]
        );
    }

    #[test]
    fn test_titled_code_block() {
        let result = classify_lines("```python\nprint(1)\n# comment\n```\nafter");
        assert_eq!(result.final_state, ClassifierState::Normal);
        assert_eq!(
            result.document.pairs(),
            vec![
                (SegmentKind::CodeBlockTitle, "python"),
                (SegmentKind::CodeBlockLine, "print(1)"),
                (SegmentKind::CodeBlockLine, "# comment"),
                (SegmentKind::CodeBlockLine, "```"),
                (SegmentKind::PlainLine, "after"),
            ]
        );
    }

    #[test]
    fn test_code_block_closes_on_fence_prefix() {
        let result = classify_lines("```\n```rust trailing");
        assert_eq!(result.final_state, ClassifierState::Normal);
        assert_eq!(
            result.document.pairs(),
            vec![(SegmentKind::CodeBlockLine, "```rust trailing")]
        );
    }

    #[test]
    fn test_latex_block() {
        let result = classify_lines("$$\n\\int_0^1 x\\,dx\n$$\ndone");
        assert_eq!(result.final_state, ClassifierState::Normal);
        assert_eq!(
            result.document.pairs(),
            vec![
                (SegmentKind::LatexBlockLine, "\\int_0^1 x\\,dx"),
                (SegmentKind::LatexBlockLine, "$$"),
                (SegmentKind::PlainLine, "done"),
            ]
        );
    }

    #[test]
    fn test_single_dollar_opens_block_but_only_double_closes() {
        let result = classify_lines("$\na + b\n$\nc");
        assert_eq!(result.final_state, ClassifierState::InLatexBlock);
        assert_eq!(
            result.document.pairs(),
            vec![
                (SegmentKind::LatexBlockLine, "a + b"),
                (SegmentKind::LatexBlockLine, "$"),
                (SegmentKind::LatexBlockLine, "c"),
            ]
        );
    }

    #[test]
    fn test_headings_inside_blocks_are_content() {
        let result = classify_lines("$$\n# not a heading");
        assert_eq!(result.final_state, ClassifierState::InLatexBlock);
        assert_eq!(
            result.document.pairs(),
            vec![(SegmentKind::LatexBlockLine, "# not a heading")]
        );
    }

    #[test]
    fn test_trailing_newline_yields_empty_plain_line() {
        assert_eq!(
            pairs("line\n"),
            vec![
                (SegmentKind::PlainLine, "line".to_string()),
                (SegmentKind::PlainLine, String::new()),
            ]
        );
    }

    #[test]
    fn test_one_segment_per_line_without_openers() {
        let text = "a\n## b\n$c$\nd $e$\n\nf";
        assert_eq!(classify(text).len(), text.split('\n').count());
    }

    #[test]
    fn test_reclassification_is_identical() {
        let text = "# T\n```js\nlet x;\n```\n$$y$$\nz";
        assert_eq!(classify(text), classify(text));
    }

    #[test]
    fn test_multibyte_content() {
        assert_eq!(
            single("## 日本語の見出し"),
            (SegmentKind::Heading2, "日本語の見出し".to_string())
        );
        assert_eq!(
            single("$αβ$"),
            (SegmentKind::LatexBlockLine, "αβ".to_string())
        );
    }

    #[test]
    fn test_markdown_segmenter_metadata() {
        let segmenter = MarkdownSegmenter::new();
        assert_eq!(segmenter.name(), "markdown");
        assert!(!segmenter.description().is_empty());
        assert_eq!(segmenter.segment("# x").document, classify("# x"));
    }
}
