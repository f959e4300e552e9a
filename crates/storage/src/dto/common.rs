use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9_\-\.]+)@([a-zA-Z0-9_\-\.]+)\.([a-zA-Z]{2,5})$")
        .expect("email pattern is valid")
});

const NAME_MAX_LEN: usize = 50;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub(crate) fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(error("invalid_email", "Email address is not valid"))
    }
}

/// Names are stored trimmed, so the length bound applies to the trimmed form
pub(crate) fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.trim().chars().count();
    if (1..=NAME_MAX_LEN).contains(&len) {
        Ok(())
    } else {
        Err(error("name_length", "Name must be between 1 and 50 characters"))
    }
}

pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error("blank", "Value must not be blank"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        assert!(validate_email("han.solo@star.com").is_ok());
        assert!(validate_email("john_do-2@mail.example.fr").is_ok());

        assert!(validate_email("test").is_err());
        assert!(validate_email("han@star").is_err());
        assert!(validate_email("han solo@star.com").is_err());
        assert!(validate_email("han@star.toolongtld").is_err());
    }

    #[test]
    fn test_name_length_counts_trimmed_characters() {
        assert!(validate_name("Han").is_ok());
        assert!(validate_name(&format!("Han{}", " ".repeat(60))).is_ok());
        assert!(validate_name(&"é".repeat(50)).is_ok());

        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"a".repeat(51)).is_err());
    }

    #[test]
    fn test_not_blank() {
        assert!(validate_not_blank("basket").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank(" \t ").is_err());
    }
}
