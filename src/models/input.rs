//! Numeric parsing policy for form fields.
//!
//! Required fields reject blank or non-numeric text. Optional fields treat
//! blank as zero but still reject garbage, so a typo never silently becomes 0.

use crate::error::TrackerError;

pub fn required_u32(raw: &str, field: &'static str) -> Result<u32, TrackerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TrackerError::MissingInput { field });
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| TrackerError::MissingInput { field })
}

pub fn optional_u32(raw: &str, field: &'static str) -> Result<u32, TrackerError> {
    if raw.trim().is_empty() {
        Ok(0)
    } else {
        required_u32(raw, field)
    }
}

/// Heart rates for the orthostatic test must be strictly positive.
pub fn positive_heart_rate(raw: &str) -> Result<u32, TrackerError> {
    match required_u32(raw, "heart rate")? {
        0 => Err(TrackerError::MissingInput {
            field: "heart rate",
        }),
        hr => Ok(hr),
    }
}

pub fn required_text(raw: &str, field: &'static str) -> Result<String, TrackerError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(TrackerError::MissingInput { field })
    } else {
        Ok(trimmed.to_string())
    }
}
