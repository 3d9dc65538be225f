//! Compact duration strings such as `PT2H30M`.
//!
//! The accepted grammar is `PT(<H>H)?(<M>M)?` over the whole string. Either
//! segment may be missing (counting as 0), so `"PT"` is valid and is zero
//! minutes. Anything else, including a missing `PT` prefix or trailing text,
//! is a [`QueryError::Format`].

use crate::error::{QueryError, Result};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?$").expect("duration pattern is valid")
});

/// Parse a compact duration into whole minutes
///
/// # Examples
/// ```
/// use pipeline::duration::parse_duration_minutes;
///
/// assert_eq!(parse_duration_minutes("PT2H30M").unwrap(), 150);
/// assert_eq!(parse_duration_minutes("PT45M").unwrap(), 45);
/// assert!(parse_duration_minutes("bogus").is_err());
/// ```
pub fn parse_duration_minutes(value: &str) -> Result<u64> {
    let captures = DURATION_PATTERN
        .captures(value)
        .ok_or_else(|| QueryError::Format {
            value: value.to_string(),
            reason: "expected PT[<hours>H][<minutes>M]".to_string(),
        })?;

    let hours = segment(&captures, 1, value)?;
    let minutes = segment(&captures, 2, value)?;

    // Large values are not rejected, only kept from wrapping
    Ok(hours.saturating_mul(60).saturating_add(minutes))
}

/// Numeric value of one optional capture group, 0 when absent
fn segment(captures: &Captures<'_>, group: usize, value: &str) -> Result<u64> {
    match captures.get(group) {
        Some(digits) => digits.as_str().parse().map_err(|e| QueryError::Format {
            value: value.to_string(),
            reason: format!("segment '{}' is out of range: {}", digits.as_str(), e),
        }),
        None => Ok(0),
    }
}
