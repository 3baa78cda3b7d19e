//! Turning noisy latitude/longitude fields into validated degrees.
//!
//! Exported spreadsheets carry values like `"13.1663° N"`, `" -77.5  "` or
//! strings with zero-width characters glued on. Everything except digits,
//! the decimal point and the minus sign is dropped before parsing; whatever
//! is left must be a finite float inside the axis range.

use std::fmt;

use crate::error::{CorridorError, Result};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    /// Largest legal absolute value in degrees.
    pub fn limit(&self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}

/// A coordinate field as it comes out of the data source.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RawCoordinate<'a> {
    Number(f64),
    Text(&'a str),
}

impl From<f64> for RawCoordinate<'_> {
    fn from(value: f64) -> Self {
        RawCoordinate::Number(value)
    }
}

impl<'a> From<&'a str> for RawCoordinate<'a> {
    fn from(value: &'a str) -> Self {
        RawCoordinate::Text(value)
    }
}

impl fmt::Display for RawCoordinate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawCoordinate::Number(n) => write!(f, "{}", n),
            RawCoordinate::Text(s) => write!(f, "{}", s),
        }
    }
}

// Zero code points of the decimal digit blocks seen in exported place data:
// Arabic-Indic, Extended Arabic-Indic, Devanagari, Bengali, Tamil, Telugu,
// Kannada, Malayalam and full-width forms.
const DIGIT_ZEROS: [u32; 9] = [
    0x0660, 0x06F0, 0x0966, 0x09E6, 0x0BE6, 0x0C66, 0x0CE6, 0x0D66, 0xFF10,
];

/// Maps a decimal digit from any of the supported scripts to its ASCII form.
fn ascii_digit(c: char) -> Option<char> {
    if c.is_ascii_digit() {
        return Some(c);
    }
    let code = c as u32;
    DIGIT_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&code))
        .and_then(|&zero| char::from_digit(code - zero, 10))
}

/// Keeps digits (folded to ASCII), `.` and `-`; drops everything else.
pub fn strip_noise(raw: &str) -> String {
    raw.chars()
        .filter_map(|c| match c {
            '.' | '-' => Some(c),
            _ => ascii_digit(c),
        })
        .collect()
}

pub fn normalize<'a, R: Into<RawCoordinate<'a>>>(raw: R, axis: Axis) -> Result<f64> {
    let raw = raw.into();
    let malformed = |reason: String| CorridorError::MalformedCoordinate {
        axis,
        raw: raw.to_string(),
        reason,
    };

    let value = match raw {
        RawCoordinate::Number(n) => n,
        RawCoordinate::Text(s) => {
            let cleaned = strip_noise(s);
            if cleaned.is_empty() {
                return Err(malformed("no digits".to_string()));
            }
            // A lone "-" or "." must not turn into 0.0.
            if !cleaned.chars().any(|c| c.is_ascii_digit()) {
                return Err(malformed(format!("{:?} is not a number", cleaned)));
            }
            cleaned
                .parse::<f64>()
                .map_err(|_| malformed(format!("{:?} is not a number", cleaned)))?
        }
    };

    if !value.is_finite() {
        return Err(malformed("not a finite number".to_string()));
    }
    let limit = axis.limit();
    if value < -limit || value > limit {
        return Err(malformed(format!(
            "{} is outside [-{}, {}]",
            value, limit, limit
        )));
    }
    Ok(value)
}
