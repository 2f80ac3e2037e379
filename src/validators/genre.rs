//! Genre-related custom validators.

use validator::ValidationError;

use crate::constants::{ERR_FIRST_LETTER_UPPERCASE, ERR_NAME_REQUIRED};

/// Custom validator: the first character must already be uppercase.
///
/// Blank values pass; presence is checked by a separate rule. Case mapping
/// is the locale-independent Unicode default, so a character passes when its
/// uppercase mapping is itself (digits and symbols included).
pub fn validate_first_letter_uppercase(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }

    let Some(first) = value.chars().next() else {
        return Ok(());
    };

    if first.to_uppercase().eq(std::iter::once(first)) {
        Ok(())
    } else {
        let mut error = ValidationError::new("first_letter_uppercase");
        error.message = Some(ERR_FIRST_LETTER_UPPERCASE.into());
        Err(error)
    }
}

/// Custom validator for genre names: whitespace-only names count as missing,
/// anything else must start with an uppercase letter.
pub fn validate_genre_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some(ERR_NAME_REQUIRED.into());
        return Err(error);
    }

    validate_first_letter_uppercase(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uppercase_first_letter_passes() {
        assert!(validate_first_letter_uppercase("Apple").is_ok());
        assert!(validate_first_letter_uppercase("Ángel").is_ok());
    }

    #[test]
    fn test_lowercase_first_letter_fails() {
        let err = validate_first_letter_uppercase("apple").unwrap_err();
        assert_eq!(err.code, "first_letter_uppercase");
        assert_eq!(
            err.message.as_deref(),
            Some("The first letter must be uppercase")
        );
        assert!(validate_first_letter_uppercase("élan").is_err());
    }

    #[test]
    fn test_blank_values_pass() {
        assert!(validate_first_letter_uppercase("").is_ok());
        assert!(validate_first_letter_uppercase("   ").is_ok());
    }

    #[test]
    fn test_caseless_first_character_passes() {
        assert!(validate_first_letter_uppercase("1984 Thrillers").is_ok());
        assert!(validate_first_letter_uppercase("¡Musical!").is_ok());
    }

    #[test]
    fn test_leading_whitespace_is_checked_as_is() {
        // The first character is a space, which has no case.
        assert!(validate_first_letter_uppercase(" drama").is_ok());
    }

    #[test]
    fn test_genre_name_rejects_blank() {
        let err = validate_genre_name("  ").unwrap_err();
        assert_eq!(err.code, "required");
        assert!(validate_genre_name("drama").is_err());
        assert!(validate_genre_name("Drama").is_ok());
    }
}
