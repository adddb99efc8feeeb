//! Validation helpers
//!
//! Custom validators plugged into `validator` derives, and normalisation of
//! loosely-typed trip input.

use validator::ValidationError;

/// Reject strings that are empty once trimmed
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Every interest must carry some text
pub fn validate_interests(values: &[String]) -> Result<(), ValidationError> {
    if values.iter().any(|v| v.trim().is_empty()) {
        return Err(ValidationError::new("empty_interest"));
    }
    Ok(())
}

/// Trim entries, drop empty ones and duplicates, keep first-seen order.
pub fn normalize_labels<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for value in values {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() || out.iter().any(|seen| seen == trimmed) {
            continue;
        }
        out.push(trimmed.to_string());
    }
    out
}

/// `Some` only when the string has content after trimming
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
