//! CLI command implementations.
//!
//! Contains the logic for each CLI command. Commands return their output
//! as a string; printing is left to the binary.

use crate::cli::output::{
    BatchEntry, ClassifiedPart, OutputFormat, ReplayEvent, ReplaySummary, SplitReport,
    format_batch, format_classified, format_replay, format_split, format_strategies,
};
use crate::cli::parser::{Cli, Commands, Part};
use crate::core::{Classification, GenerationTiming, ReasoningClock, display_time, reasoning_label};
use crate::error::{CommandError, Result, SegmentError};
use crate::io::{grapheme_prefix_ends, read_file, read_input};
use crate::segmenting::{
    Segmenter, StreamCoordinator, available_strategies, create_segmenter, derive_view,
    is_reasoning_phase, split_thinking,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Executes the CLI command.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    debug!(command = ?cli.command, ?format, "executing command");

    match &cli.command {
        Commands::Split { file } => cmd_split(file.as_deref(), format),
        Commands::Classify {
            file,
            part,
            strategy,
            raw,
        } => cmd_classify(file.as_deref(), part, strategy, *raw, format),
        Commands::Replay {
            file,
            step,
            tick_ms,
            strategy,
        } => cmd_replay(file.as_deref(), *step, *tick_ms, strategy, format),
        Commands::Batch { files, strategy } => cmd_batch(files, strategy, format),
        Commands::Strategies => cmd_strategies(format),
    }
}

// ==================== Command Implementations ====================

fn cmd_split(file: Option<&Path>, format: OutputFormat) -> Result<String> {
    let text = read_input(file)?;
    let split = split_thinking(&text);
    let report = SplitReport {
        split: &split,
        is_reasoning_phase: is_reasoning_phase(&text),
    };
    format_split(&report, format)
}

fn cmd_classify(
    file: Option<&Path>,
    part: &str,
    strategy: &str,
    raw: bool,
    format: OutputFormat,
) -> Result<String> {
    let part = Part::parse(part)?;
    let segmenter = create_segmenter(strategy)?;
    let text = read_input(file)?;

    let mut results: Vec<(&'static str, Classification)> = Vec::new();
    if raw {
        results.push(("buffer", segmenter.segment(&text)));
    } else {
        let split = split_thinking(&text);
        if part.includes_trace()
            && let Some(trace) = split.trace()
        {
            results.push(("trace", segmenter.segment(trace)));
        }
        if part.includes_answer()
            && let Some(answer) = split.answer()
        {
            results.push(("answer", segmenter.segment(answer)));
        }
    }

    debug!(
        strategy = segmenter.name(),
        parts = results.len(),
        "classified buffer"
    );

    let parts: Vec<ClassifiedPart<'_>> = results
        .iter()
        .map(|(name, classification)| ClassifiedPart::new(*name, classification))
        .collect();
    format_classified(&parts, format)
}

fn cmd_replay(
    file: Option<&Path>,
    step: usize,
    tick_ms: u64,
    strategy: &str,
    format: OutputFormat,
) -> Result<String> {
    if step == 0 {
        return Err(SegmentError::ZeroReplayStep.into());
    }
    let segmenter = create_segmenter(strategy)?;
    let text = read_input(file)?;

    let tick = Duration::from_millis(tick_ms);
    let mut coordinator = StreamCoordinator::with_segmenter(segmenter);
    let mut clock = ReasoningClock::new();
    let mut events = Vec::new();
    let mut elapsed = Duration::ZERO;

    for (index, end) in grapheme_prefix_ends(&text, step).into_iter().enumerate() {
        elapsed = elapsed.saturating_add(tick);
        let view = coordinator.update(&text[..end]);
        clock.observe(view.is_reasoning_phase, elapsed);

        let timing = GenerationTiming::running(elapsed, clock.thinking_time());
        let label = view.split.trace.is_some().then(|| {
            reasoning_label(
                view.is_reasoning_phase,
                &display_time(&timing, view.is_reasoning_phase),
            )
        });

        events.push(ReplayEvent {
            step: index + 1,
            bytes: end,
            elapsed_ms: millis(elapsed),
            is_reasoning_phase: view.is_reasoning_phase,
            label,
            trace_segments: view.trace.as_ref().map(|d| d.len()),
            answer_segments: view.answer.as_ref().map(|d| d.len()),
            answer_state: view.answer_state,
        });
    }

    // A finalized message records its thinking time as the generating time.
    let view = coordinator.view();
    let finished = GenerationTiming::finished(clock.thinking_time().unwrap_or(elapsed));
    let label = view.split.trace.is_some().then(|| {
        reasoning_label(
            view.is_reasoning_phase,
            &display_time(&finished, view.is_reasoning_phase),
        )
    });

    debug!(
        steps = events.len(),
        derivations = coordinator.derivations(),
        "replay finished"
    );

    let summary = ReplaySummary {
        steps: events.len(),
        derivations: coordinator.derivations(),
        thinking_ms: clock.thinking_time().map(millis),
        label,
        trace: view.trace.as_ref(),
        answer: view.answer.as_ref(),
    };
    format_replay(&events, &summary, format)
}

fn cmd_batch(files: &[PathBuf], strategy: &str, format: OutputFormat) -> Result<String> {
    if files.is_empty() {
        return Err(CommandError::MissingArgument("FILES".to_string()).into());
    }
    let segmenter = create_segmenter(strategy)?;

    let entries = files
        .par_iter()
        .map(|path| batch_entry(segmenter.as_ref(), path))
        .collect::<Result<Vec<_>>>()?;

    debug!(files = entries.len(), "batch finished");
    format_batch(&entries, format)
}

fn batch_entry(segmenter: &dyn Segmenter, path: &Path) -> Result<BatchEntry> {
    let text = read_file(path)?;
    let view = derive_view(segmenter, &text);

    let mut kinds = std::collections::BTreeMap::new();
    for document in view.trace.iter().chain(view.answer.iter()) {
        for (kind, count) in document.count_by_kind() {
            *kinds.entry(kind).or_insert(0) += count;
        }
    }

    Ok(BatchEntry {
        path: path.to_string_lossy().to_string(),
        bytes: text.len(),
        is_reasoning_phase: view.is_reasoning_phase,
        trace_segments: view.trace.as_ref().map(|d| d.len()),
        answer_segments: view.answer.as_ref().map(|d| d.len()),
        kinds,
    })
}

fn cmd_strategies(format: OutputFormat) -> Result<String> {
    let strategies = available_strategies()
        .into_iter()
        .map(|name| create_segmenter(name).map(|s| (name, s.description())))
        .collect::<Result<Vec<_>>>()?;
    format_strategies(&strategies, format)
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
