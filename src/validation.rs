use crate::error::{ContactError, ContactResult};

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> ContactResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(ContactError::BlankField {
            field: field.to_string(),
        })
    } else {
        Ok(trimmed)
    }
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Characters that separate the parts of a formatted name on the wire.
fn is_name_separator(c: char) -> bool {
    c == '.' || c.is_whitespace()
}

/// Validates an honorific such as `Mr.`: one word closed by a single period.
pub fn title(value: &str) -> ContactResult<String> {
    let trimmed = non_blank(value, "title")?;
    let well_formed = matches!(
        trimmed.strip_suffix('.'),
        Some(word) if !word.is_empty() && !word.contains(is_name_separator)
    );
    if !well_formed {
        return Err(ContactError::InvalidField {
            field: "title".to_string(),
            reason: "must be a single word ending in a period".to_string(),
        });
    }
    Ok(trimmed)
}

/// Validates a first or last name: non-blank, without periods or inner
/// whitespace.
pub fn name_part(value: &str, field: &str) -> ContactResult<String> {
    let trimmed = non_blank(value, field)?;
    if trimmed.contains(is_name_separator) {
        return Err(ContactError::InvalidField {
            field: field.to_string(),
            reason: "must be a single word without periods".to_string(),
        });
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_blank_accepts_valid_string() {
        assert_eq!(non_blank("hello", "first name").unwrap(), "hello");
    }

    #[test]
    fn non_blank_trims_whitespace() {
        assert_eq!(non_blank("  hello  ", "first name").unwrap(), "hello");
    }

    #[test]
    fn non_blank_rejects_empty() {
        assert!(non_blank("", "first name").is_err());
    }

    #[test]
    fn non_blank_rejects_whitespace_only() {
        let err = non_blank("   ", "personal email").unwrap_err();
        assert_eq!(err.to_string(), "personal email cannot be blank");
    }

    #[test]
    fn trim_optional_trims() {
        assert_eq!(trim_optional(Some("  hi  ")), Some("hi".to_string()));
    }

    #[test]
    fn trim_optional_returns_none_for_blank() {
        assert_eq!(trim_optional(Some("   ")), None);
    }

    #[test]
    fn trim_optional_returns_none_for_none() {
        assert_eq!(trim_optional(None), None);
    }

    #[test]
    fn title_accepts_word_with_period() {
        assert_eq!(title(" Dr. ").unwrap(), "Dr.");
    }

    #[test]
    fn title_rejects_missing_period() {
        let err = title("Dr").unwrap_err();
        assert_eq!(err.to_string(), "title must be a single word ending in a period");
    }

    #[test]
    fn title_rejects_blank_bare_period_and_inner_separators() {
        assert!(matches!(title("  ").unwrap_err(), ContactError::BlankField { .. }));
        assert!(title(".").is_err());
        assert!(title("Prof.Dr.").is_err());
        assert!(title("Rev Dr.").is_err());
    }

    #[test]
    fn name_part_rejects_separators() {
        assert_eq!(name_part(" Mary ", "first name").unwrap(), "Mary");
        assert!(name_part("Mary Ann", "first name").is_err());
        assert!(name_part("St.John", "last name").is_err());
        assert!(name_part("Mary\tAnn", "first name").is_err());
    }
}
