//! Argument checks shared by all parameter types.

use crate::error::JitbitError;

/// Rejects a zero identifier. Jitbit ids start at 1.
pub(crate) fn require_id(id: u64, field_name: &str) -> Result<(), JitbitError> {
    if id == 0 {
        return Err(JitbitError::validation(format!(
            "{} must be a non-zero id",
            field_name
        )));
    }
    Ok(())
}

/// Rejects an empty or whitespace-only string.
pub(crate) fn require_text(value: &str, field_name: &str) -> Result<(), JitbitError> {
    if value.trim().is_empty() {
        return Err(JitbitError::validation(format!(
            "{} is required and cannot be empty",
            field_name
        )));
    }
    Ok(())
}

/// Rejects a page or offset of zero; paging is 1-based.
pub(crate) fn require_one_based(value: u32, field_name: &str) -> Result<(), JitbitError> {
    if value == 0 {
        return Err(JitbitError::validation(format!(
            "{} is 1-based, got 0",
            field_name
        )));
    }
    Ok(())
}

/// Joins tags into the comma-separated form the API expects.
pub(crate) fn join_tags(tags: &[String]) -> Option<String> {
    let joined = tags
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(",");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}
