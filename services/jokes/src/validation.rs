//! Input validation utilities

use regex::Regex;
use std::sync::OnceLock;

/// Where logins land when no usable `redirectTo` was submitted
pub const DEFAULT_REDIRECT: &str = "/jokes";

/// Length in UTF-16 code units, the way browsers count form input
fn text_length(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Validate a joke's name
pub fn validate_joke_name(name: &str) -> Result<(), String> {
    if text_length(name) < 1 {
        return Err("That joke's name is too short".to_string());
    }

    Ok(())
}

/// Validate a joke's content
pub fn validate_joke_content(content: &str) -> Result<(), String> {
    if text_length(content) < 1 {
        return Err("That joke is too short".to_string());
    }

    Ok(())
}

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if text_length(username) < 3 {
        return Err("Usernames must be at least 3 characters long".to_string());
    }

    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("Failed to compile username regex"));

    if !regex.is_match(username) {
        return Err("Usernames can only contain letters, numbers, and underscores".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if text_length(password) < 6 {
        return Err("Passwords must be at least 6 characters long".to_string());
    }

    Ok(())
}

/// Only site-relative paths are followed after login; anything else goes to
/// [`DEFAULT_REDIRECT`]. The target ends up in a `Location` header, so it
/// must be visible ASCII.
pub fn validate_redirect(redirect_to: &str) -> &str {
    if redirect_to.starts_with('/')
        && !redirect_to.starts_with("//")
        && redirect_to.chars().all(|c| c.is_ascii_graphic())
    {
        redirect_to
    } else {
        DEFAULT_REDIRECT
    }
}
