//! Adaptive timestamp parsing.
//!
//! Orchestrates the heuristic classifier, the pattern catalog, and the
//! Julian-day fallback, and remembers the last pattern index and input
//! length that succeeded so repeat callers with a steady source format pay
//! for one parse attempt instead of a catalog scan.
//!
//! The cache is a performance hint only. Catalog order decides which
//! pattern wins when several could structurally match, and a stale cache
//! entry can only cost extra attempts, never change the result — with one
//! deliberate exception: when the input length equals the cached length,
//! the cached pattern is retried without the tag-contradiction check, on
//! the assumption that identical-length repeats of the same source share a
//! format.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::catalog::{FormatCatalog, TemporalPattern};
use crate::classify;
use crate::error::Result;
use crate::julian;

/// Shared memory of the last successful parse: `(pattern index, input length)`.
///
/// Both values live in one `AtomicU64` (index in the high half, length in
/// the low half) so concurrent readers can never observe a torn pair. The
/// pair resets to `(0, 0)` at construction and is never persisted.
#[derive(Debug, Default)]
pub struct FormatMemory {
    cell: AtomicU64,
}

impl FormatMemory {
    pub fn new() -> Self {
        Self {
            cell: AtomicU64::new(0),
        }
    }

    /// Snapshot of `(last pattern index, last input length)`.
    pub fn get(&self) -> (usize, usize) {
        let packed = self.cell.load(Ordering::Relaxed);
        ((packed >> 32) as usize, (packed & 0xFFFF_FFFF) as usize)
    }

    pub fn set(&self, index: usize, length: usize) {
        let packed = ((index as u64) << 32) | (length as u64 & 0xFFFF_FFFF);
        self.cell.store(packed, Ordering::Relaxed);
    }
}

/// Timestamp parser with a validated catalog and its own format memory.
///
/// Construct one per test to avoid cross-test cache pollution, or use the
/// process-wide [`parse_timestamp`] which shares a single instance the way
/// the adaptive cache is meant to be shared in production.
#[derive(Debug)]
pub struct TimestampParser {
    catalog: FormatCatalog,
    memory: FormatMemory,
}

impl TimestampParser {
    /// Build a parser over the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCatalog`](crate::error::StampError::InvalidCatalog)
    /// if the catalog fails tag validation.
    pub fn new() -> Result<Self> {
        Ok(Self {
            catalog: FormatCatalog::new()?,
            memory: FormatMemory::new(),
        })
    }

    pub fn catalog(&self) -> &FormatCatalog {
        &self.catalog
    }

    /// Snapshot of the format memory, for instrumentation and tests.
    pub fn last_success(&self) -> (usize, usize) {
        self.memory.get()
    }

    /// Parse a timestamp string of undeclared format.
    ///
    /// Candidate strategies, in order: Julian day number (colon-free input
    /// only), then the pattern catalog filtered by the classifier. Naive
    /// patterns interpret the string in `default_zone` (UTC when `None`);
    /// offset-bearing patterns use the offset embedded in the string. The
    /// result is always normalized to UTC.
    ///
    /// Returns `None` for empty, blank, or unrecognized input — never an
    /// error and never a panic.
    pub fn parse(&self, raw: &str, default_zone: Option<Tz>) -> Option<DateTime<Utc>> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        if !trimmed.contains(':') {
            if let Ok(julian_day) = trimmed.parse::<f64>() {
                if let Some(instant) = julian::julian_to_instant(julian_day) {
                    return Some(instant);
                }
            }
            if self.catalog.all_patterns_have_colon() {
                return None;
            }
        }

        let normalized = classify::normalize_offset_colon(trimmed);
        let s = normalized.as_ref();

        let string_has_timezone = classify::has_timezone(s);
        let string_has_millis = classify::has_milliseconds(s);
        let length = s.len();

        let (cached_index, cached_length) = self.memory.get();

        let order: Vec<usize> = candidate_order(cached_index, self.catalog.len()).collect();
        for (attempt, &index) in order.iter().enumerate() {
            let Some(pattern) = self.catalog.get(index) else {
                continue;
            };
            // The cached pattern skips the contradiction check when the
            // input length matches the last success; see the module docs.
            let cached_retry = index == cached_index && cached_length == length;
            if !cached_retry
                && (string_has_timezone != pattern.has_timezone
                    || string_has_millis != pattern.has_milliseconds)
            {
                continue;
            }
            if let Some(instant) = try_parse_with(pattern, s, default_zone) {
                self.memory.set(index, length);
                return Some(instant);
            }
            if attempt + 1 == order.len() {
                tracing::debug!(
                    input = s,
                    pattern = pattern.pattern,
                    "timestamp matched no catalog pattern"
                );
            }
        }
        None
    }
}

/// Candidate indices: the cached index first, then every other index in
/// catalog order. Out-of-range cache values are dropped rather than
/// clamped, so a garbage cache degrades to a plain catalog scan.
pub(crate) fn candidate_order(cached: usize, len: usize) -> impl Iterator<Item = usize> {
    std::iter::once(cached)
        .chain((0..len).filter(move |&i| i != cached))
        .filter(move |&i| i < len)
}

/// One strict parse attempt against one pattern.
fn try_parse_with(
    pattern: &TemporalPattern,
    s: &str,
    default_zone: Option<Tz>,
) -> Option<DateTime<Utc>> {
    if pattern.textual_zone {
        return parse_textual_zone(pattern, s);
    }
    if pattern.has_timezone {
        return DateTime::parse_from_str(s, pattern.pattern)
            .ok()
            .map(|dt| dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(s, pattern.pattern).ok()?;
    match default_zone {
        Some(tz) => tz
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc)),
        None => Some(Utc.from_utc_datetime(&naive)),
    }
}

/// Parse the fixed textual form ("Sat Apr 04 12:34:56 GMT 2020").
///
/// chrono cannot parse a named zone (`%Z`), so the abbreviation token is
/// checked by hand and the remainder parsed naively. Only GMT-style
/// abbreviations are modeled; anything else is a non-match.
fn parse_textual_zone(pattern: &TemporalPattern, s: &str) -> Option<DateTime<Utc>> {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    if tokens.len() != 6 {
        return None;
    }
    if !matches!(tokens[4], "GMT" | "UT" | "UTC") {
        return None;
    }
    let without_zone = format!(
        "{} {} {} {} {}",
        tokens[0], tokens[1], tokens[2], tokens[3], tokens[5]
    );
    let naive_pattern = pattern.pattern.replace(" %Z", "");
    let naive = NaiveDateTime::parse_from_str(&without_zone, &naive_pattern).ok()?;
    Some(Utc.from_utc_datetime(&naive))
}

static SHARED_PARSER: LazyLock<TimestampParser> = LazyLock::new(|| {
    // The built-in catalog is validated by its own tests; a failure here
    // means the process is misconfigured and must not limp along.
    TimestampParser::new().unwrap_or_else(|e| panic!("built-in format catalog is invalid: {e}"))
});

/// Parse a timestamp with the process-wide shared parser.
///
/// All callers share one [`FormatMemory`], matching the adaptive behavior
/// described on [`TimestampParser`]. Pure string work, no I/O.
pub fn parse_timestamp(raw: &str, default_zone: Option<Tz>) -> Option<DateTime<Utc>> {
    SHARED_PARSER.parse(raw, default_zone)
}

// ── Tests ───────────────────────────────────────────────────────────────────
