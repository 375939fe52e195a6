use regex::Regex;
use std::sync::OnceLock;

use crate::error::StoreError;

pub const MAX_USERNAME_CHARS: usize = 64;
pub const MAX_EMAIL_CHARS: usize = 254;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email pattern is a valid regex")
    })
}

/// Trimmed username for a lookup. Only emptiness is rejected; a name no
/// record could carry is simply unknown.
pub fn login_username(raw: &str) -> Result<&str, StoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(StoreError::invalid_input("username must not be empty"));
    }
    Ok(trimmed)
}

pub fn fits_username_limit(username: &str) -> bool {
    username.chars().count() <= MAX_USERNAME_CHARS
}

/// Trimmed username for a new record.
pub fn username(raw: &str) -> Result<&str, StoreError> {
    let trimmed = login_username(raw)?;
    if !fits_username_limit(trimmed) {
        return Err(StoreError::invalid_input(format!(
            "username too long (max {} characters)",
            MAX_USERNAME_CHARS
        )));
    }
    Ok(trimmed)
}

pub fn password(raw: &str) -> Result<(), StoreError> {
    if raw.is_empty() {
        return Err(StoreError::invalid_input("password must not be empty"));
    }
    Ok(())
}

/// Returns the trimmed email address.
pub fn email(raw: &str) -> Result<&str, StoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(StoreError::invalid_input("email must not be empty"));
    }
    if trimmed.chars().count() > MAX_EMAIL_CHARS {
        return Err(StoreError::invalid_input("email address too long"));
    }
    if !email_pattern().is_match(trimmed) {
        return Err(StoreError::invalid_input("invalid email format"));
    }
    Ok(trimmed)
}
