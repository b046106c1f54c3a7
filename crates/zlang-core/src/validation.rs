//! Input validation, run at the boundary before any service logic.

use crate::error::DomainError;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Loose email shape: one `@`, non-empty local part and domain, no whitespace.
pub fn is_email_shaped(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@')
        }
        None => false,
    }
}

pub fn validate_registration(
    name: &str,
    username: &str,
    password: &str,
) -> Result<(), DomainError> {
    let mut problems = Vec::new();

    if name.trim().is_empty() {
        problems.push("Display name cannot be blank".to_string());
    }
    if username.trim().is_empty() {
        problems.push("Username cannot be blank".to_string());
    } else if !is_email_shaped(username) {
        problems.push("Username must be a valid email address".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        problems.push(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        ));
    }

    finish(problems)
}

pub fn validate_login(username: &str, password: &str) -> Result<(), DomainError> {
    let mut problems = Vec::new();
    if username.trim().is_empty() {
        problems.push("Username cannot be blank".to_string());
    }
    if password.is_empty() {
        problems.push("Password cannot be blank".to_string());
    }
    finish(problems)
}

pub fn validate_slang(term: &str, meaning: &str) -> Result<(), DomainError> {
    let mut problems = Vec::new();
    if term.trim().is_empty() {
        problems.push("Term cannot be blank".to_string());
    }
    if meaning.trim().is_empty() {
        problems.push("Meaning cannot be blank".to_string());
    }
    finish(problems)
}

fn finish(problems: Vec<String>) -> Result<(), DomainError> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(problems))
    }
}
