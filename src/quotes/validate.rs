//! Helpers for checking caller-supplied names and search queries.

use super::types::StoreError;

/// Longest accepted quote name, counted in characters.
pub const MAX_NAME_CHARS: usize = 100;

/// Ensure a draft name is present, non-blank, and within [`MAX_NAME_CHARS`].
///
/// The name is returned as supplied; trimming only decides blankness.
pub fn require_name(value: Option<&str>) -> Result<&str, StoreError> {
    let Some(name) = value else {
        return Err(StoreError::InvalidInput("name is required".into()));
    };
    if name.trim().is_empty() {
        return Err(StoreError::InvalidInput("name must not be blank".into()));
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(StoreError::InvalidInput(format!(
            "name must be at most {MAX_NAME_CHARS} characters"
        )));
    }
    Ok(name)
}

/// Normalize a search query for case-insensitive substring matching.
pub fn normalize_query(value: Option<&str>) -> Result<String, StoreError> {
    value
        .map(str::to_lowercase)
        .ok_or_else(|| StoreError::InvalidInput("search query is required".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_and_blank_names() {
        assert!(matches!(
            require_name(None),
            Err(StoreError::InvalidInput(_))
        ));
        assert!(matches!(
            require_name(Some("")),
            Err(StoreError::InvalidInput(_))
        ));
        assert!(matches!(
            require_name(Some(" \t\n ")),
            Err(StoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn keeps_surrounding_whitespace() {
        assert_eq!(require_name(Some("  Stoic  ")), Ok("  Stoic  "));
    }

    #[test]
    fn enforces_length_in_characters() {
        let at_limit = "é".repeat(MAX_NAME_CHARS);
        assert!(require_name(Some(&at_limit)).is_ok());

        let over = "x".repeat(MAX_NAME_CHARS + 1);
        assert!(matches!(
            require_name(Some(&over)),
            Err(StoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn query_is_lowercased_and_required() {
        assert_eq!(normalize_query(Some("ApP")).unwrap(), "app");
        assert_eq!(normalize_query(Some("")).unwrap(), "");
        assert!(normalize_query(None).is_err());
    }
}
