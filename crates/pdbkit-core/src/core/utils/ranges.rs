use std::ops::RangeInclusive;
use thiserror::Error;

pub const DEFAULT_RANGE_KEY: &str = "-range";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Invalid range '{range}': expected two integers separated by ':'")]
    InvalidRange { range: String },
}

/// Removes every argument starting with `key` and parses its `x1:y1[,x2:y2...]` payload.
///
/// Endpoints are sorted, so `"5:3"` yields `3..=5`. On error `args` is left untouched.
///
/// ```
/// use pdbkit::core::utils::ranges::{extract_ranges, flatten_ranges};
///
/// let mut args = vec!["-v".to_string(), "-range1:3,7:6".to_string()];
/// let ranges = extract_ranges(&mut args, "-range").unwrap();
/// assert_eq!(ranges, vec![1..=3, 6..=7]);
/// assert_eq!(args, vec!["-v".to_string()]);
/// assert_eq!(flatten_ranges(&ranges), vec![1, 2, 3, 6, 7]);
/// ```
pub fn extract_ranges(
    args: &mut Vec<String>,
    key: &str,
) -> Result<Vec<RangeInclusive<i64>>, RangeError> {
    let mut ranges = Vec::new();
    for arg in args.iter().filter(|arg| arg.starts_with(key)) {
        for payload in arg[key.len()..].split(',') {
            ranges.push(parse_range(payload)?);
        }
    }
    args.retain(|arg| !arg.starts_with(key));
    Ok(ranges)
}

fn parse_range(payload: &str) -> Result<RangeInclusive<i64>, RangeError> {
    let invalid = || RangeError::InvalidRange {
        range: payload.to_string(),
    };
    let (begin, end) = payload.split_once(':').ok_or_else(invalid)?;
    let begin: i64 = begin.trim().parse().map_err(|_| invalid())?;
    let end: i64 = end.trim().parse().map_err(|_| invalid())?;
    Ok(begin.min(end)..=begin.max(end))
}

/// Expands ranges into the flat list of indices they contain, in order.
pub fn flatten_ranges(ranges: &[RangeInclusive<i64>]) -> Vec<i64> {
    ranges.iter().cloned().flatten().collect()
}
