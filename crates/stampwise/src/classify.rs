//! Structural classification of raw timestamp strings.
//!
//! These functions inspect punctuation positions only — they never run a
//! full parse. The parser uses their verdicts to prune the pattern catalog
//! before attempting candidates: a format without a timezone field will
//! happily match a string that carries one, so the tags must agree before
//! a pattern is tried.
//!
//! All position arithmetic is in bytes; catalog-shaped inputs are ASCII,
//! and a multi-byte input simply classifies as whatever its byte layout
//! implies (it will fail every pattern parse anyway).

use std::borrow::Cow;

/// Last-colon distances inside this window need the trailing-sign check;
/// e.g. the last `:` in `…12:34:56.789` is 6 bytes from the end, while a
/// trailing offset group pushes the distance past the window.
const OFFSET_WINDOW_MIN: usize = 4;
const OFFSET_WINDOW_MAX: usize = 6;

/// Whether the string appears to carry a sub-second fraction.
///
/// True iff the string contains a `.` that occurs after its last `:` —
/// a fractional component always directly follows the seconds field and
/// precedes any trailing timezone marker.
pub fn has_milliseconds(s: &str) -> bool {
    let Some(pos_dot) = s.rfind('.') else {
        return false;
    };
    match s.rfind(':') {
        Some(pos_colon) => pos_colon < pos_dot,
        None => true,
    }
}

/// Whether the string appears to carry a `-0700`/`+0300`-style offset.
///
/// Decision table, keyed on the distance from the end of the string to its
/// last `:` (a string with no colon counts the full length):
///
/// | colon distance | verdict                                              |
/// |----------------|------------------------------------------------------|
/// | `< 4`          | no offset (the seconds field ends the string)        |
/// | `> 6`          | offset, unless the tail is a ` ZZZ yyyy` abbreviation |
/// | `4..=6`        | offset iff a trailing `-`/`+` sits inside the window  |
///
/// A three-letter zone abbreviation followed by a year ("… GMT 2020") is
/// timezone information carried differently and classifies as false here.
pub fn has_timezone(s: &str) -> bool {
    let len = s.len();
    let colon_from_end = distance_from_end(s, b':');
    if colon_from_end < OFFSET_WINDOW_MIN {
        return false;
    }
    if colon_from_end > OFFSET_WINDOW_MAX {
        if len > 9 && tail_has_zone_abbrev(&s.as_bytes()[len - 9..]) {
            return false;
        }
        return true;
    }
    let minus_from_end = distance_from_end(s, b'-');
    if minus_from_end < colon_from_end && minus_from_end > 5 {
        return true;
    }
    let plus_from_end = distance_from_end(s, b'+');
    plus_from_end < colon_from_end && plus_from_end < 5
}

/// Rewrite an ISO-style `±HH:MM` offset suffix to `±HHMM`.
///
/// Applies only when the last colon is exactly three bytes from the end
/// (so the string ends `:MM`) and the string holds exactly three colons
/// total — the seconds separator pair plus the offset's internal colon.
/// Everything else is returned unchanged.
pub fn normalize_offset_colon(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    let len = bytes.len();
    if len < 3 {
        return Cow::Borrowed(s);
    }
    let colon_at = len - 3;
    if bytes[colon_at] != b':'
        || !bytes[colon_at + 1].is_ascii_digit()
        || !bytes[colon_at + 2].is_ascii_digit()
    {
        return Cow::Borrowed(s);
    }
    if bytes.iter().filter(|&&b| b == b':').count() != 3 {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(len - 1);
    out.push_str(&s[..colon_at]);
    out.push_str(&s[colon_at + 1..]);
    Cow::Owned(out)
}

/// Bytes between the rightmost occurrence of `needle` and the end of the
/// string; the full length when absent.
fn distance_from_end(s: &str, needle: u8) -> usize {
    match s.as_bytes().iter().rposition(|&b| b == needle) {
        Some(pos) => s.len() - pos - 1,
        None => s.len(),
    }
}

/// Whether a tail slice contains a space followed by three ASCII uppercase
/// letters — the shape of a `zzz` zone abbreviation in the textual form.
fn tail_has_zone_abbrev(tail: &[u8]) -> bool {
    tail.windows(4)
        .any(|w| w[0] == b' ' && w[1..].iter().all(u8::is_ascii_uppercase))
}

// ── Tests ───────────────────────────────────────────────────────────────────
