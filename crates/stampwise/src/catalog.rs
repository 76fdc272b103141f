//! The ordered catalog of candidate timestamp patterns.
//!
//! Every pattern carries two tags — `has_timezone` and `has_milliseconds` —
//! that the parser compares against the classifier's verdict on the input
//! string before a full parse is attempted. Catalog order is significant:
//! the first-defined pattern is the default precedence, and the adaptive
//! format cache stores positional indices, so the order must never change
//! without updating consumers of those indices.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Result, StampError};

/// Strftime pattern for the default timestamp form (milliseconds + offset).
pub const TIMESTAMP_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Strftime pattern for the day-of-year timestamp form.
pub const DAY_OF_YEAR_PATTERN: &str = "%Y-%jT%H:%M:%S%.3f%z";

/// Strftime pattern for the fixed textual form ("Sat Apr 04 12:34:56 GMT 2020").
pub const TEXTUAL_PATTERN: &str = "%a %b %d %H:%M:%S %Z %Y";

/// One candidate timestamp format.
///
/// `has_timezone` and `has_milliseconds` must be derivable from the pattern
/// text itself; [`FormatCatalog::new`] rejects a catalog where they are not.
/// `textual_zone` marks the one fixed textual form whose zone is a
/// three-letter abbreviation rather than a numeric offset — that form is
/// tagged `has_timezone: false` because the classifier looks for
/// offset-style zones only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemporalPattern {
    /// The strftime-style pattern text.
    pub pattern: &'static str,
    /// Whether the pattern encodes a numeric UTC offset (`%z`).
    pub has_timezone: bool,
    /// Whether the pattern encodes a sub-second fraction (`%.3f`).
    pub has_milliseconds: bool,
    /// Whether the pattern carries a named zone abbreviation (`%Z`).
    pub textual_zone: bool,
}

impl TemporalPattern {
    const fn new(
        pattern: &'static str,
        has_timezone: bool,
        has_milliseconds: bool,
        textual_zone: bool,
    ) -> Self {
        Self {
            pattern,
            has_timezone,
            has_milliseconds,
            textual_zone,
        }
    }
}

/// Immutable, ordered list of candidate timestamp patterns.
#[derive(Debug)]
pub struct FormatCatalog {
    patterns: Vec<TemporalPattern>,
    all_have_colon: bool,
}

impl FormatCatalog {
    /// Build the built-in catalog.
    ///
    /// Order: the four month-day variants (millis+offset, offset,
    /// millis, neither), the same four as day-of-year variants, then the
    /// fixed textual form.
    ///
    /// # Errors
    ///
    /// Returns [`StampError::InvalidCatalog`] if any pattern's tags cannot
    /// be derived from its own text. This is the only fatal condition in
    /// the crate and surfaces at construction, never per-call.
    pub fn new() -> Result<Self> {
        Self::from_patterns(vec![
            TemporalPattern::new(TIMESTAMP_PATTERN, true, true, false),
            TemporalPattern::new("%Y-%m-%dT%H:%M:%S%z", true, false, false),
            TemporalPattern::new("%Y-%m-%dT%H:%M:%S%.3f", false, true, false),
            TemporalPattern::new("%Y-%m-%dT%H:%M:%S", false, false, false),
            TemporalPattern::new(DAY_OF_YEAR_PATTERN, true, true, false),
            TemporalPattern::new("%Y-%jT%H:%M:%S%z", true, false, false),
            TemporalPattern::new("%Y-%jT%H:%M:%S%.3f", false, true, false),
            TemporalPattern::new("%Y-%jT%H:%M:%S", false, false, false),
            TemporalPattern::new(TEXTUAL_PATTERN, false, false, true),
        ])
    }

    fn from_patterns(patterns: Vec<TemporalPattern>) -> Result<Self> {
        if patterns.is_empty() {
            return Err(StampError::InvalidCatalog {
                pattern: String::new(),
                reason: "catalog must contain at least one pattern".to_string(),
            });
        }
        for p in &patterns {
            validate_tags(p)?;
        }
        let all_have_colon = patterns.iter().all(|p| p.pattern.contains(':'));
        Ok(Self {
            patterns,
            all_have_colon,
        })
    }

    /// All patterns, in precedence order.
    pub fn patterns(&self) -> &[TemporalPattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TemporalPattern> {
        self.patterns.get(index)
    }

    /// The default (highest-precedence) pattern.
    pub fn default_pattern(&self) -> &TemporalPattern {
        &self.patterns[0]
    }

    /// Whether every pattern in the catalog contains a colon.
    ///
    /// Computed once at construction. When true, a colon-free input that is
    /// not a Julian day number cannot match any pattern, and the parser
    /// short-circuits without scanning the catalog.
    pub fn all_patterns_have_colon(&self) -> bool {
        self.all_have_colon
    }
}

/// Check that a pattern's stored tags match what its text implies.
fn validate_tags(p: &TemporalPattern) -> Result<()> {
    let derived_millis = p.pattern.contains("%.3f");
    let derived_tz = p.pattern.ends_with("%z");
    let derived_textual = p.pattern.contains("%Z");

    if p.has_milliseconds != derived_millis {
        return Err(StampError::InvalidCatalog {
            pattern: p.pattern.to_string(),
            reason: format!(
                "has_milliseconds is {} but the pattern text implies {}",
                p.has_milliseconds, derived_millis
            ),
        });
    }
    if p.has_timezone != derived_tz {
        return Err(StampError::InvalidCatalog {
            pattern: p.pattern.to_string(),
            reason: format!(
                "has_timezone is {} but the pattern text implies {}",
                p.has_timezone, derived_tz
            ),
        });
    }
    if p.textual_zone != derived_textual {
        return Err(StampError::InvalidCatalog {
            pattern: p.pattern.to_string(),
            reason: format!(
                "textual_zone is {} but the pattern text implies {}",
                p.textual_zone, derived_textual
            ),
        });
    }
    Ok(())
}

/// Render an instant with one of the catalog patterns.
///
/// The inverse of parsing; shares the same pattern table so round trips
/// can be tested against the exact catalog entries.
pub fn format_instant(instant: DateTime<Utc>, pattern: &TemporalPattern) -> String {
    instant.format(pattern.pattern).to_string()
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = FormatCatalog::new().unwrap();
        assert_eq!(catalog.len(), 9);
    }

    #[test]
    fn test_builtin_catalog_order() {
        let catalog = FormatCatalog::new().unwrap();
        let tags: Vec<(bool, bool)> = catalog
            .patterns()
            .iter()
            .map(|p| (p.has_timezone, p.has_milliseconds))
            .collect();
        assert_eq!(
            tags,
            vec![
                (true, true),
                (true, false),
                (false, true),
                (false, false),
                (true, true),
                (true, false),
                (false, true),
                (false, false),
                (false, false),
            ]
        );
        assert!(catalog.patterns()[8].textual_zone);
    }

    #[test]
    fn test_all_patterns_have_colon() {
        let catalog = FormatCatalog::new().unwrap();
        assert!(catalog.all_patterns_have_colon());
    }

    #[test]
    fn test_mistagged_pattern_rejected() {
        let result = FormatCatalog::from_patterns(vec![TemporalPattern::new(
            "%Y-%m-%dT%H:%M:%S",
            true,
            false,
            false,
        )]);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("has_timezone"), "got: {err}");
    }

    #[test]
    fn test_missing_millis_tag_rejected() {
        let result = FormatCatalog::from_patterns(vec![TemporalPattern::new(
            "%Y-%m-%dT%H:%M:%S%.3f",
            false,
            false,
            false,
        )]);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_instant_default_pattern() {
        let catalog = FormatCatalog::new().unwrap();
        let t = Utc.with_ymd_and_hms(2020, 4, 4, 12, 34, 56).unwrap()
            + chrono::Duration::milliseconds(789);
        let s = format_instant(t, catalog.default_pattern());
        assert_eq!(s, "2020-04-04T12:34:56.789+0000");
    }

    #[test]
    fn test_format_instant_textual_pattern() {
        let catalog = FormatCatalog::new().unwrap();
        let t = Utc.with_ymd_and_hms(2020, 4, 4, 12, 34, 56).unwrap();
        let s = format_instant(t, &catalog.patterns()[8]);
        assert_eq!(s, "Sat Apr 04 12:34:56 UTC 2020");
    }

    #[test]
    fn test_format_instant_day_of_year() {
        let catalog = FormatCatalog::new().unwrap();
        let t = Utc.with_ymd_and_hms(2020, 4, 4, 12, 34, 56).unwrap();
        // April 4 is day 095 of leap year 2020
        let s = format_instant(t, &catalog.patterns()[7]);
        assert_eq!(s, "2020-095T12:34:56");
    }
}
