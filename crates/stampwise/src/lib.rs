//! # stampwise
//!
//! Heuristic interpretation of loosely-specified temporal strings.
//!
//! Given a timestamp or duration string whose format is not declared,
//! stampwise infers the convention from structural cues — colon positions,
//! trailing sign placement, trailing digit-group length — and converts the
//! string to an unambiguous UTC instant or a count of seconds. Parsing is
//! pure string/CPU work with no I/O and no system clock access.
//!
//! Unparseable input yields `None`, never an error: the parsers exist to
//! absorb whatever a data source emits, and "not a timestamp" is an
//! ordinary answer. The only fatal condition is a misconfigured pattern
//! catalog, surfaced at construction.
//!
//! ## Modules
//!
//! - [`catalog`] — the ordered catalog of candidate timestamp patterns
//! - [`classify`] — structural timezone/millisecond detection
//! - [`julian`] — Julian day number fallback for colon-free numeric input
//! - [`parser`] — the adaptive timestamp parser and its format memory
//! - [`duration`] — duration-string parsing and `HH:MM:SS` formatting
//! - [`error`] — error types
//!
//! ## Example
//!
//! ```
//! use stampwise::{parse_duration_seconds, parse_timestamp};
//!
//! let a = parse_timestamp("2020-04-04T12:34:56.789-0700", None).unwrap();
//! let b = parse_timestamp("2020-04-04T12:34:56.789-07:00", None).unwrap();
//! assert_eq!(a, b);
//!
//! assert_eq!(parse_duration_seconds("01:01:01"), Some(3661.0));
//! assert_eq!(parse_timestamp("definitely not a time", None), None);
//! ```

pub mod catalog;
pub mod classify;
pub mod duration;
pub mod error;
pub mod julian;
pub mod parser;

pub use catalog::{format_instant, FormatCatalog, TemporalPattern};
pub use classify::{has_milliseconds, has_timezone};
pub use duration::{format_duration_hhmmss, parse_duration_seconds};
pub use error::StampError;
pub use julian::julian_to_instant;
pub use parser::{parse_timestamp, FormatMemory, TimestampParser};
