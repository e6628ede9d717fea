//! Generation timing and the reasoning label shown above a trace.
//!
//! The generator reports an elapsed time while it runs and a final
//! generating time once the message is finalized. While the buffer is still
//! in its reasoning phase the elapsed time doubles as the thinking time;
//! [`ReasoningClock`] freezes it when the closing tag appears.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Shown when no timing information is available at all.
pub const ZERO_TIME: &str = "0s";

/// Formats a duration as whole minutes and seconds.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use streamseg::core::format_duration;
///
/// assert_eq!(format_duration(Duration::from_secs(7)), "7s");
/// assert_eq!(format_duration(Duration::from_secs(120)), "2m");
/// assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
/// ```
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let minutes = total / 60;
    let seconds = total % 60;

    if minutes > 0 {
        if seconds > 0 {
            format!("{minutes}m {seconds}s")
        } else {
            format!("{minutes}m")
        }
    } else {
        format!("{seconds}s")
    }
}

/// Timing values reported by the generator for one message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationTiming {
    /// Whether generation is still running.
    pub running: bool,

    /// Time since generation started, while running.
    pub elapsed: Option<Duration>,

    /// Time spent in the reasoning phase.
    pub thinking_time: Option<Duration>,

    /// Total generation time of a finalized message.
    pub generating_time: Option<Duration>,
}

impl GenerationTiming {
    /// Timing of a message that is still being generated.
    #[must_use]
    pub const fn running(elapsed: Duration, thinking_time: Option<Duration>) -> Self {
        Self {
            running: true,
            elapsed: Some(elapsed),
            thinking_time,
            generating_time: None,
        }
    }

    /// Timing of a finalized message.
    #[must_use]
    pub const fn finished(generating_time: Duration) -> Self {
        Self {
            running: false,
            elapsed: None,
            thinking_time: None,
            generating_time: Some(generating_time),
        }
    }
}

/// Picks the time to show next to the reasoning label.
#[must_use]
pub fn display_time(timing: &GenerationTiming, is_reasoning: bool) -> String {
    if timing.running
        && let Some(elapsed) = timing.elapsed
    {
        if is_reasoning {
            return format_duration(elapsed);
        }
        if let Some(thinking) = timing.thinking_time {
            return format_duration(thinking);
        }
    }

    timing
        .generating_time
        .map_or_else(|| ZERO_TIME.to_string(), format_duration)
}

/// Builds the label shown above a reasoning trace.
///
/// # Examples
///
/// ```
/// use streamseg::core::reasoning_label;
///
/// assert_eq!(reasoning_label(true, "3s"), "Thinking... (3s)");
/// assert_eq!(reasoning_label(false, "1m 2s"), "Thought for 1m 2s");
/// ```
#[must_use]
pub fn reasoning_label(is_reasoning: bool, time: &str) -> String {
    if is_reasoning {
        format!("Thinking... ({time})")
    } else {
        format!("Thought for {time}")
    }
}

/// Tracks how long a message spent reasoning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReasoningClock {
    thinking_time: Option<Duration>,
}

impl ReasoningClock {
    /// Creates a clock with no recorded thinking time.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            thinking_time: None,
        }
    }

    /// Records a new elapsed time. Only moves while still reasoning.
    pub const fn observe(&mut self, is_reasoning: bool, elapsed: Duration) {
        if is_reasoning {
            self.thinking_time = Some(elapsed);
        }
    }

    /// Returns the recorded thinking time.
    #[must_use]
    pub const fn thinking_time(&self) -> Option<Duration> {
        self.thinking_time
    }
}
