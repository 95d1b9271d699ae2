//! Duration detection in recipe text and duration formatting.

use std::time::Duration;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static DURATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(\d+(?:\.\d+)?)(?:\s*(?:-|–|to)\s*\d+(?:\.\d+)?)?\s*(hours?|hrs?|h|minutes?|mins?|m|seconds?|secs?|s)\b",
    )
    .expect("duration pattern is valid")
});

/// Text allowed between an hour phrase and a minute phrase that add up
/// ("1 hour and 30 minutes", "1 hour, 30 minutes").
static JOINER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[\s,]*(?:and\s*)?$").expect("joiner pattern is valid"));

/// Longest timer a phrase may describe. Anything longer is not a cooking
/// duration.
pub const MAX_TIMER_DURATION: Duration = Duration::from_secs(24 * 3600);

#[derive(Clone, Copy, PartialEq, Eq)]
enum Unit {
    Hours,
    Minutes,
    Seconds,
}

impl Unit {
    fn parse(unit: &str) -> Self {
        match unit.to_lowercase().chars().next() {
            Some('h') => Unit::Hours,
            Some('m') => Unit::Minutes,
            _ => Unit::Seconds,
        }
    }

    fn seconds(self) -> f64 {
        match self {
            Unit::Hours => 3600.0,
            Unit::Minutes => 60.0,
            Unit::Seconds => 1.0,
        }
    }
}

fn phrase_duration(caps: &Captures<'_>) -> Option<(Unit, Duration)> {
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    let unit = Unit::parse(caps.get(2)?.as_str());
    let duration = Duration::try_from_secs_f64(value * unit.seconds()).ok()?;
    (duration <= MAX_TIMER_DURATION).then_some((unit, duration))
}

/// Finds the first cooking duration mentioned in free text.
///
/// Ranges ("25-30 minutes") use the lower bound. An hour phrase directly
/// followed by a minute phrase is summed ("1 hour 30 minutes"). Zero
/// durations and durations beyond [`MAX_TIMER_DURATION`] are ignored.
///
/// ```rust
/// use std::time::Duration;
/// use cookalong_core::timer::detect_duration;
///
/// assert_eq!(detect_duration("Bake for 25 minutes"), Some(Duration::from_secs(1500)));
/// assert_eq!(detect_duration("Simmer 1 hour and 15 mins"), Some(Duration::from_secs(4500)));
/// assert_eq!(detect_duration("Season to taste"), None);
/// ```
pub fn detect_duration(text: &str) -> Option<Duration> {
    let mut matches = DURATION_PATTERN.captures_iter(text);
    let first = matches.next()?;
    let (unit, mut total) = phrase_duration(&first)?;
    let first_end = first.get(0)?.end();

    if unit == Unit::Hours {
        if let Some(next) = matches.next() {
            let next_start = next.get(0)?.start();
            let joined = JOINER_PATTERN.is_match(&text[first_end..next_start]);
            if let Some((Unit::Minutes, minutes)) = phrase_duration(&next) {
                if joined {
                    total += minutes;
                }
            }
        }
    }

    (!total.is_zero() && total <= MAX_TIMER_DURATION).then_some(total)
}

/// Clock-style rendering used for timer lists: `M:SS` or `H:MM:SS`.
pub fn format_clock(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Spoken rendering used for narration: "1 hour 5 minutes", "30 seconds".
pub fn describe_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);

    let plural = |n: u64, unit: &str| {
        if n == 1 {
            format!("1 {unit}")
        } else {
            format!("{n} {unit}s")
        }
    };

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(plural(hours, "hour"));
    }
    if minutes > 0 {
        parts.push(plural(minutes, "minute"));
    }
    if seconds > 0 || parts.is_empty() {
        parts.push(plural(seconds, "second"));
    }
    parts.join(" ")
}
