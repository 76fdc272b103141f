//! Julian day number fallback for colon-free numeric input.
//!
//! Conversion is anchored at Julian day 2451544.5 = 2000-01-01T00:00:00Z.
//! A converted value is accepted only when it lands strictly between the
//! Unix epoch and a far-future bound (roughly year 3000); anything outside
//! that range is treated as "not a Julian date" so the caller can fall
//! through to pattern parsing.

use chrono::{DateTime, Utc};

/// Julian day number of 2000-01-01T00:00:00Z, the conversion anchor.
pub const JULIAN_DAY_JAN_1_2000: f64 = 2_451_544.5;

/// Milliseconds since the Unix epoch at the anchor instant.
const MILLIS_JAN_1_2000: i64 = 946_684_800_000;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Upper sanity bound, roughly year 3000.
const MAX_MILLIS: i64 = 1_030 * 365 * 24 * 3_600 * 1_000;

/// Milliseconds since the Unix epoch for a Julian day number.
///
/// Saturates at the `i64` extremes for astronomically large inputs; the
/// bounds check in [`julian_to_instant`] rejects saturated values.
pub fn julian_to_millis(julian_day: f64) -> i64 {
    let delta_days = julian_day - JULIAN_DAY_JAN_1_2000;
    // The f64-to-i64 cast saturates, so the add must too: a finite but
    // huge day number must land outside the sane range, not overflow.
    MILLIS_JAN_1_2000.saturating_add((delta_days * MILLIS_PER_DAY) as i64)
}

/// Convert a Julian day number to an instant, bounds-checked.
///
/// Returns `None` for non-finite input or a result outside
/// (epoch, ~year 3000) — the value is then presumed not to be a Julian
/// date at all.
pub fn julian_to_instant(julian_day: f64) -> Option<DateTime<Utc>> {
    if !julian_day.is_finite() {
        return None;
    }
    let millis = julian_to_millis(julian_day);
    if millis <= 0 || millis >= MAX_MILLIS {
        return None;
    }
    DateTime::from_timestamp_millis(millis)
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_j2000_noon() {
        // 2451545.0 is the J2000 epoch: noon UTC, January 1, 2000
        let instant = julian_to_instant(2_451_545.0).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_anchor_midnight() {
        let instant = julian_to_instant(JULIAN_DAY_JAN_1_2000).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_fractional_day() {
        // Half a day past the J2000 epoch lands at midnight January 2
        let instant = julian_to_instant(2_451_545.5).unwrap();
        assert_eq!(instant, Utc.with_ymd_and_hms(2000, 1, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_before_unix_epoch_rejected() {
        // Julian day 1000.0 is deep in the past
        assert!(julian_to_instant(1_000.0).is_none());
    }

    #[test]
    fn test_far_future_rejected() {
        // A million days past the anchor is far beyond year 3000
        assert!(julian_to_instant(JULIAN_DAY_JAN_1_2000 + 1_000_000.0).is_none());
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(julian_to_instant(f64::NAN).is_none());
        assert!(julian_to_instant(f64::INFINITY).is_none());
    }

    #[test]
    fn test_astronomically_large_values_rejected() {
        // Finite values whose millisecond conversion exceeds i64 must
        // saturate into the rejection branch, not overflow
        assert!(julian_to_instant(1e300).is_none());
        assert!(julian_to_instant(-1e300).is_none());
        assert_eq!(julian_to_millis(1e300), i64::MAX);
    }

    #[test]
    fn test_julian_to_millis_truncates_toward_zero() {
        // Sub-millisecond remainders are dropped, not rounded
        let base = julian_to_millis(JULIAN_DAY_JAN_1_2000);
        assert_eq!(base, 946_684_800_000);
        let plus_tiny = julian_to_millis(JULIAN_DAY_JAN_1_2000 + 1e-9);
        assert!(plus_tiny - base <= 1);
    }
}
