//! Output formatting for CLI commands.
//!
//! Supports text, JSON and newline-delimited JSON output.

use crate::core::{Classification, ClassifierState, Document, SegmentKind, ThinkingSplit};
use crate::error::{CommandError, Result};
use crate::io::preview;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Pretty-printed JSON output.
    Json,
    /// One compact JSON object per line.
    Ndjson,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "ndjson" | "jsonl" => Self::Ndjson,
            _ => Self::Text,
        }
    }
}

/// A split buffer together with its reasoning-phase flag.
#[derive(Debug, Clone, Serialize)]
pub struct SplitReport<'a> {
    /// Trace and answer.
    #[serde(flatten)]
    pub split: &'a ThinkingSplit,
    /// True while no closing reasoning tag exists.
    pub is_reasoning_phase: bool,
}

/// Formats a split report.
///
/// # Errors
///
/// Returns [`CommandError::OutputFormat`] if JSON serialization fails.
pub fn format_split(report: &SplitReport<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(
                output,
                "Reasoning phase: {}",
                if report.is_reasoning_phase { "yes" } else { "no" }
            );
            push_text_block(&mut output, "Trace", report.split.trace());
            push_text_block(&mut output, "Answer", report.split.answer());
            Ok(output)
        }
        OutputFormat::Json => format_json(report),
        OutputFormat::Ndjson => format_ndjson_line(report),
    }
}

fn push_text_block(output: &mut String, title: &str, text: Option<&str>) {
    match text {
        None => {
            let _ = writeln!(output, "{title}: (none)");
        }
        Some(text) => {
            let _ = writeln!(output, "{title}:");
            output.push_str("---\n");
            output.push_str(text);
            if !text.ends_with('\n') {
                output.push('\n');
            }
            output.push_str("---\n");
        }
    }
}

/// One classified part of a buffer ("trace", "answer" or "buffer").
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedPart<'a> {
    /// Which part of the buffer this is.
    pub part: &'static str,
    /// The segments of this part.
    pub segments: &'a Document,
    /// Scan state at the end of the part.
    pub final_state: ClassifierState,
}

impl<'a> ClassifiedPart<'a> {
    /// Wraps a classification result under a part name.
    #[must_use]
    pub const fn new(part: &'static str, classification: &'a Classification) -> Self {
        Self {
            part,
            segments: &classification.document,
            final_state: classification.final_state,
        }
    }
}

/// Formats classified parts.
///
/// # Errors
///
/// Returns [`CommandError::OutputFormat`] if JSON serialization fails.
pub fn format_classified(parts: &[ClassifiedPart<'_>], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            if parts.is_empty() {
                return Ok("Nothing to classify.\n".to_string());
            }
            let mut output = String::new();
            for part in parts {
                let _ = writeln!(output, "[{}] {} segments", part.part, part.segments.len());
                push_document_text(&mut output, part.segments);
                if part.final_state.is_open_block() {
                    let _ = writeln!(output, "  (open block: {})", state_name(part.final_state));
                }
            }
            Ok(output)
        }
        OutputFormat::Json => format_json(&parts),
        OutputFormat::Ndjson => parts.iter().map(format_ndjson_line).collect(),
    }
}

fn push_document_text(output: &mut String, document: &Document) {
    for segment in document {
        let _ = writeln!(output, "  {:<20} {}", segment.kind.as_str(), segment.content);
    }
}

const fn state_name(state: ClassifierState) -> &'static str {
    match state {
        ClassifierState::Normal => "normal",
        ClassifierState::InCodeBlock => "code",
        ClassifierState::InLatexBlock => "latex",
    }
}

/// One update of a replayed stream.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayEvent {
    /// 1-based step number.
    pub step: usize,
    /// Buffer length in bytes at this step.
    pub bytes: usize,
    /// Simulated elapsed time in milliseconds.
    pub elapsed_ms: u64,
    /// True while no closing reasoning tag exists.
    pub is_reasoning_phase: bool,
    /// Reasoning label, when the buffer has a trace.
    pub label: Option<String>,
    /// Number of trace segments, when a trace exists.
    pub trace_segments: Option<usize>,
    /// Number of answer segments, when an answer exists.
    pub answer_segments: Option<usize>,
    /// Scan state at the end of the answer.
    pub answer_state: Option<ClassifierState>,
}

/// Final state of a replayed stream.
#[derive(Debug, Clone, Serialize)]
pub struct ReplaySummary<'a> {
    /// Number of buffer updates fed to the coordinator.
    pub steps: usize,
    /// Number of views actually derived.
    pub derivations: usize,
    /// Time spent reasoning, in milliseconds.
    pub thinking_ms: Option<u64>,
    /// Reasoning label of the finalized message, when it has a trace.
    pub label: Option<String>,
    /// Segments of the final trace.
    pub trace: Option<&'a Document>,
    /// Segments of the final answer.
    pub answer: Option<&'a Document>,
}

/// Formats replay results.
///
/// # Errors
///
/// Returns [`CommandError::OutputFormat`] if JSON serialization fails.
pub fn format_replay(
    events: &[ReplayEvent],
    summary: &ReplaySummary<'_>,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(
                output,
                "Replayed {} steps ({} derivations)",
                summary.steps, summary.derivations
            );
            if let Some(ref label) = summary.label {
                let _ = writeln!(output, "{label}");
            }
            if let Some(trace) = summary.trace {
                let _ = writeln!(output, "[trace] {} segments", trace.len());
                push_document_text(&mut output, trace);
            }
            if let Some(answer) = summary.answer {
                let _ = writeln!(output, "[answer] {} segments", answer.len());
                push_document_text(&mut output, answer);
            }
            Ok(output)
        }
        OutputFormat::Json => format_json(summary),
        OutputFormat::Ndjson => events.iter().map(format_ndjson_line).collect(),
    }
}

/// Per-file result of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    /// Input path.
    pub path: String,
    /// Input size in bytes.
    pub bytes: usize,
    /// True while no closing reasoning tag exists.
    pub is_reasoning_phase: bool,
    /// Number of trace segments, when a trace exists.
    pub trace_segments: Option<usize>,
    /// Number of answer segments, when an answer exists.
    pub answer_segments: Option<usize>,
    /// Segment counts per kind, trace and answer combined.
    pub kinds: BTreeMap<SegmentKind, usize>,
}

/// Formats batch results.
///
/// # Errors
///
/// Returns [`CommandError::OutputFormat`] if JSON serialization fails.
pub fn format_batch(entries: &[BatchEntry], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(
                output,
                "{:<32} {:<10} {:<8} {:<8} Kinds",
                "File", "Bytes", "Trace", "Answer"
            );
            output.push_str(&"-".repeat(80));
            output.push('\n');
            for entry in entries {
                let kinds = entry
                    .kinds
                    .iter()
                    .map(|(kind, count)| format!("{kind}={count}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                let _ = writeln!(
                    output,
                    "{:<32} {:<10} {:<8} {:<8} {}",
                    preview(&entry.path, 32),
                    entry.bytes,
                    count_or_dash(entry.trace_segments),
                    count_or_dash(entry.answer_segments),
                    kinds
                );
            }
            Ok(output)
        }
        OutputFormat::Json => format_json(&entries),
        OutputFormat::Ndjson => entries.iter().map(format_ndjson_line).collect(),
    }
}

fn count_or_dash(count: Option<usize>) -> String {
    count.map_or_else(|| "-".to_string(), |c| c.to_string())
}

/// Formats the list of segmentation strategies.
///
/// # Errors
///
/// Returns [`CommandError::OutputFormat`] if JSON serialization fails.
pub fn format_strategies(strategies: &[(&str, &str)], format: OutputFormat) -> Result<String> {
    #[derive(Serialize)]
    struct Strategy<'a> {
        name: &'a str,
        description: &'a str,
    }

    let items: Vec<Strategy<'_>> = strategies
        .iter()
        .map(|&(name, description)| Strategy { name, description })
        .collect();

    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            for item in &items {
                let _ = writeln!(output, "{:<10} {}", item.name, item.description);
            }
            Ok(output)
        }
        OutputFormat::Json => format_json(&items),
        OutputFormat::Ndjson => items.iter().map(format_ndjson_line).collect(),
    }
}

/// Formats an error for output.
///
/// Falls back to the plain message if the error cannot be serialized.
#[must_use]
pub fn format_error(error: &crate::error::Error, format: OutputFormat) -> String {
    #[derive(Serialize)]
    struct ErrorOutput {
        error: String,
    }

    let output = ErrorOutput {
        error: error.to_string(),
    };
    let formatted = match format {
        OutputFormat::Text => return output.error,
        OutputFormat::Json => format_json(&output),
        OutputFormat::Ndjson => format_ndjson_line(&output).map(|mut line| {
            line.pop();
            line
        }),
    };
    formatted.unwrap_or(output.error)
}

/// Formats a value as JSON.
fn format_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value).map_err(CommandError::from)?)
}

/// Formats a value as one compact JSON line, newline included.
fn format_ndjson_line<T: Serialize>(value: &T) -> Result<String> {
    let mut line = serde_json::to_string(value).map_err(CommandError::from)?;
    line.push('\n');
    Ok(line)
}
