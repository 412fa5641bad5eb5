//! Human-readable duration rendering for reports.

use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::time::Duration;

const NANOS_PER_TICK: u32 = 100;
const SECS_PER_DAY: u64 = 86_400;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationStyle {
    /// `[d:]h:mm:ss[.fffffff]`, fractional part trimmed of trailing zeros.
    #[default]
    Clock,
    /// Single scaled unit, e.g. `1.50ms`.
    Compact,
}

impl DurationStyle {
    pub fn format(&self, duration: Duration) -> String {
        match self {
            DurationStyle::Clock => format_clock(duration),
            DurationStyle::Compact => format_compact(duration),
        }
    }
}

/// Formats a duration as a general short clock value.
///
/// The day component only appears when non-zero and the fraction carries at
/// most seven digits (100ns resolution):
///
/// ```
/// use std::time::Duration;
/// use benchmark_helper::format_clock;
///
/// assert_eq!(format_clock(Duration::from_millis(40)), "0:00:00.04");
/// assert_eq!(format_clock(Duration::from_secs(90)), "0:01:30");
/// ```
pub fn format_clock(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let days = total_secs / SECS_PER_DAY;
    let hours = (total_secs % SECS_PER_DAY) / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    let ticks = duration.subsec_nanos() / NANOS_PER_TICK;

    let mut out = String::with_capacity(16);
    if days > 0 {
        let _ = write!(out, "{}:", days);
    }
    let _ = write!(out, "{}:{:02}:{:02}", hours, minutes, seconds);
    if ticks > 0 {
        let fraction = format!("{:07}", ticks);
        let _ = write!(out, ".{}", fraction.trim_end_matches('0'));
    }
    out
}

/// Formats a duration in the largest unit that keeps the value at or above one.
pub fn format_compact(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if duration < Duration::from_micros(1) {
        format!("{}ns", duration.subsec_nanos())
    } else if duration < Duration::from_millis(1) {
        format!("{:.2}μs", secs * 1e6)
    } else if duration < Duration::from_secs(1) {
        format!("{:.2}ms", secs * 1e3)
    } else {
        format!("{:.2}s", secs)
    }
}

/// Converts fractional milliseconds to a duration, rounding to the nearest
/// nanosecond. Negative and non-finite inputs clamp to zero.
pub fn duration_from_millis_f64(millis: f64) -> Duration {
    if !millis.is_finite() || millis <= 0.0 {
        return Duration::ZERO;
    }
    Duration::from_nanos((millis * 1_000_000.0).round() as u64)
}
