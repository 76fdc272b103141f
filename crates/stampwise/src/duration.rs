//! Free-form duration strings.
//!
//! Two candidate readings, tried in order: a bare number (already seconds,
//! possibly fractional), then a tolerant colon-delimited form. The
//! colon-delimited grammar is `[HH:]MM:SS[.fff]` with a 1-2 digit seconds
//! group; absent optional groups default to zero. A two-group input like
//! `"1:02"` therefore reads as minutes:seconds (62 s), not hours:minutes.

use std::sync::OnceLock;

use chrono::Duration;
use regex::Regex;

const SECONDS_PER_MINUTE: u64 = 60;
const MINUTES_PER_HOUR: u64 = 60;
const MILLIS_PER_SECOND: f64 = 1_000.0;

/// `[HH:]MM:SS[.fff]`, with surrounding whitespace tolerated.
fn colon_duration_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(?:(\d+):)?(\d+):(\d\d?)(?:\.(\d+))?\s*$")
            .expect("duration pattern is a valid regex")
    })
}

/// Convert a duration string to seconds.
///
/// A direct numeric parse wins first and assumes the number already
/// denotes seconds; negative and non-finite values are rejected
/// (durations are non-negative). Otherwise the colon-delimited form is
/// matched. The fractional group is read as an integer count of
/// milliseconds: `total = ((h*60 + m)*60 + s) + fff/1000`.
///
/// Returns `None` when neither reading applies.
///
/// # Examples
///
/// ```
/// use stampwise::parse_duration_seconds;
///
/// assert_eq!(parse_duration_seconds("01:01:01"), Some(3661.0));
/// assert_eq!(parse_duration_seconds("90.5"), Some(90.5));
/// assert_eq!(parse_duration_seconds("not a duration"), None);
/// ```
pub fn parse_duration_seconds(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(seconds) = trimmed.parse::<f64>() {
        if seconds.is_finite() && seconds >= 0.0 {
            return Some(seconds);
        }
        return None;
    }

    if !trimmed.contains(':') {
        return None;
    }

    let caps = colon_duration_re().captures(raw)?;
    let hours: u64 = match caps.get(1) {
        Some(g) => g.as_str().parse().ok()?,
        None => 0,
    };
    let minutes: u64 = caps.get(2)?.as_str().parse().ok()?;
    let seconds: u64 = caps.get(3)?.as_str().parse().ok()?;
    let millis: u64 = match caps.get(4) {
        Some(g) => g.as_str().parse().ok()?,
        None => 0,
    };

    let whole = hours
        .checked_mul(MINUTES_PER_HOUR)?
        .checked_add(minutes)?
        .checked_mul(SECONDS_PER_MINUTE)?
        .checked_add(seconds)?;
    Some(whole as f64 + millis as f64 / MILLIS_PER_SECOND)
}

/// Render a duration as `[DDDT]HH:MM:SS[.fff]`.
///
/// Hours wrap modulo 24; spans of a day or more gain a zero-padded
/// three-digit day prefix (`001T00:00:00`). The millisecond suffix appears
/// only when the millisecond remainder is nonzero. Negative durations
/// clamp to zero.
pub fn format_duration_hhmmss(duration: Duration) -> String {
    let millis = duration.num_milliseconds().max(0);
    let total_seconds = millis / 1_000;
    let days = total_seconds / 86_400;

    let hhmmss = format!(
        "{:02}:{:02}:{:02}",
        (total_seconds / 3_600) % 24,
        (total_seconds % 3_600) / 60,
        total_seconds % 60
    );
    let fraction = if millis % 1_000 == 0 {
        String::new()
    } else {
        format!(".{:03}", millis % 1_000)
    };
    let day_prefix = if days == 0 {
        String::new()
    } else {
        format!("{days:03}T")
    };
    format!("{day_prefix}{hhmmss}{fraction}")
}

// ── Tests ───────────────────────────────────────────────────────────────────
