//! Input validation utilities

use std::sync::LazyLock;

use regex::Regex;

use crate::constants::{
    MAX_PASSWORD_LENGTH, MAX_PHONE_LENGTH, MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH,
    MIN_USERNAME_LENGTH,
};

static USERNAME_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$"));

static PHONE_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9][0-9 \-]*$"));

fn matches(re: &LazyLock<Result<Regex, regex::Error>>, value: &str) -> bool {
    re.as_ref().map(|re| re.is_match(value)).unwrap_or(false)
}

/// Validate username format: letters, digits and `@.+-_`
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    let len = username.chars().count() as u64;
    if len < MIN_USERNAME_LENGTH {
        return Err("Username must be at least 3 characters");
    }
    if len > MAX_USERNAME_LENGTH {
        return Err("Username must be at most 150 characters");
    }
    if !matches(&USERNAME_RE, username) {
        return Err("Username can only contain letters, numbers, and @/./+/-/_ characters");
    }
    Ok(())
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    let len = password.chars().count() as u64;
    if len < MIN_PASSWORD_LENGTH {
        return Err("Password must be at least 8 characters");
    }
    if len > MAX_PASSWORD_LENGTH {
        return Err("Password must be at most 128 characters");
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        return Err("Password cannot be entirely numeric");
    }
    Ok(())
}

/// The two password fields of a registration form must agree
pub fn validate_password_confirmation(password: &str, password2: &str) -> Result<(), &'static str> {
    if password != password2 {
        return Err("Password fields didn't match");
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if phone.len() as u64 > MAX_PHONE_LENGTH {
        return Err("Phone number must be at most 20 characters");
    }
    if !matches(&PHONE_RE, phone) {
        return Err("Phone number may only contain digits, spaces, dashes and a leading +");
    }
    Ok(())
}

/// Participant codes are short identifiers printed on badges
pub fn validate_participant_code(code: &str) -> Result<(), &'static str> {
    if code.trim().is_empty() {
        return Err("Participant code cannot be empty");
    }
    if code.chars().any(char::is_whitespace) {
        return Err("Participant code cannot contain whitespace");
    }
    Ok(())
}

/// `score_field` must be a JSON object
pub fn validate_score_field(score_field: &serde_json::Value) -> Result<(), &'static str> {
    if !score_field.is_object() {
        return Err("score_field must be a JSON object");
    }
    Ok(())
}

/// Sanitize string input (remove control characters, trim whitespace)
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("jury.member+1@site").is_ok());
        assert!(validate_username("123abc").is_ok());
        assert!(validate_username("ab").is_err()); // Too short
        assert!(validate_username("user name").is_err()); // Space
        assert!(validate_username("user#name").is_err()); // Invalid character
        assert!(validate_username(&"a".repeat(151)).is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("correct horse").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password("1234567890").is_err());
        assert!(validate_password(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_password_confirmation() {
        assert!(validate_password_confirmation("abcdefgh1", "abcdefgh1").is_ok());
        assert!(validate_password_confirmation("abcdefgh1", "abcdefgh2").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+62 812-3456-789").is_ok());
        assert!(validate_phone("0812345").is_ok());
        assert!(validate_phone("call me").is_err());
        assert!(validate_phone(&"1".repeat(21)).is_err());
    }

    #[test]
    fn test_validate_participant_code() {
        assert!(validate_participant_code("P-001").is_ok());
        assert!(validate_participant_code("  ").is_err());
        assert!(validate_participant_code("P 001").is_err());
    }

    #[test]
    fn test_validate_score_field() {
        assert!(validate_score_field(&serde_json::json!({"round1": 8.5})).is_ok());
        assert!(validate_score_field(&serde_json::json!([1, 2])).is_err());
        assert!(validate_score_field(&serde_json::json!(10)).is_err());
    }

    #[test]
    fn test_sanitize_string() {
        assert_eq!(sanitize_string("  Finals\u{0007} "), "Finals");
        assert_eq!(sanitize_string("a\tb"), "a\tb");
    }
}
