//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Usernames: letters, digits, dot, dash and underscore
static USERNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]{3,32}$").expect("valid username regex"));

/// Phone numbers: optional leading plus followed by 7 to 15 digits
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("valid phone regex"));

/// Check if an email address is syntactically valid
pub fn is_valid_email(email: &str) -> bool {
    validator::validate_email(email)
}

/// Check if a password satisfies the minimum length
pub fn is_valid_password(password: &str, min_length: usize) -> bool {
    password.chars().count() >= min_length
}

/// Check if a username has an acceptable shape
pub fn is_valid_username(username: &str) -> bool {
    USERNAME_REGEX.is_match(username)
}

/// Check if a phone number has an acceptable shape
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("student@school.edu"));
        assert!(is_valid_email("a@x.com"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_password_length() {
        assert!(is_valid_password("secret", 6));
        assert!(!is_valid_password("short", 6));
        assert!(is_valid_password("", 0));
    }

    #[test]
    fn test_username_validation() {
        assert!(is_valid_username("jane.doe"));
        assert!(is_valid_username("teacher_01"));
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username("has space"));
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("+14155552671"));
        assert!(is_valid_phone("0612345678"));
        assert!(!is_valid_phone("12-34"));
        assert!(!is_valid_phone("+1"));
    }
}
