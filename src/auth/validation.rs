use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ApiError;

const MIN_EXCLUSIVE_LEN: usize = 7;

fn has_both_cases(password: &str) -> bool {
    lazy_static! {
        static ref UPPER_RE: Regex = Regex::new(r"[A-Z]").unwrap();
        static ref LOWER_RE: Regex = Regex::new(r"[a-z]").unwrap();
    }
    UPPER_RE.is_match(password) && LOWER_RE.is_match(password)
}

/// Format rules for a new account, checked in the order clients rely on:
/// letter cases first, then username length, then password length.
pub fn validate_registration(username: &str, password: &str) -> Result<(), ApiError> {
    if !has_both_cases(password) {
        return Err(ApiError::WeakPassword);
    }
    if username.chars().count() <= MIN_EXCLUSIVE_LEN {
        return Err(ApiError::UsernameTooShort);
    }
    if password.chars().count() <= MIN_EXCLUSIVE_LEN {
        return Err(ApiError::PasswordTooShort);
    }
    Ok(())
}
