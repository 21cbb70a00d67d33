use crate::{CoreError, Result as CoreErrorResult};

/// Trim and check a broadcaster's display name.
///
/// Returns the trimmed name. Empty or whitespace-only names are rejected, as
/// are names longer than `max_length` characters.
#[track_caller]
pub fn validate_display_name(name: &str, max_length: usize) -> CoreErrorResult<String> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(CoreError::validation(
            "display_name",
            "display name is required before broadcasting",
        ));
    }

    let length = trimmed.chars().count();
    if length > max_length {
        return Err(CoreError::validation(
            "display_name",
            format!("display name must be at most {max_length} characters, got {length}"),
        ));
    }

    Ok(trimmed.to_string())
}
