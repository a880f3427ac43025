use std::f64::consts::{E, PI};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NumericError {
    #[error("'{0}' is not a floating-point number")]
    NotAFloat(String),
}

/// Parses one token as a float. `pi` and `e` (any case, surrounding whitespace ignored)
/// stand for the mathematical constants.
pub fn parse_float(token: &str) -> Result<f64, NumericError> {
    let trimmed = token.trim();
    if trimmed.eq_ignore_ascii_case("pi") {
        return Ok(PI);
    }
    if trimmed.eq_ignore_ascii_case("e") {
        return Ok(E);
    }
    trimmed
        .parse()
        .map_err(|_| NumericError::NotAFloat(token.to_string()))
}

/// Parses every token with [`parse_float`], failing on the first bad one.
pub fn parse_float_list<I, S>(items: I) -> Result<Vec<f64>, NumericError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| parse_float(item.as_ref()))
        .collect()
}
