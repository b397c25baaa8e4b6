//! Request schema checks run before any business logic.

use crate::domain::error::DomainError;
use crate::domain::todo::TodoSchema;
use crate::domain::user::{LoginForm, UserSchema};
use regex::Regex;
use std::sync::OnceLock;

const MAX_USERNAME_LEN: usize = 64;
const MAX_EMAIL_LEN: usize = 254;

pub fn validate_user(schema: &UserSchema) -> Result<(), DomainError> {
    validate_username(&schema.username)?;
    validate_email(&schema.email)?;
    required("password", &schema.password)
}

pub fn validate_todo(schema: &TodoSchema) -> Result<(), DomainError> {
    required("title", schema.title.trim())
}

pub fn validate_login(form: &LoginForm) -> Result<(), DomainError> {
    required("username", &form.username)?;
    required("password", &form.password)
}

/// Canonical form an email is stored and looked up in.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn required(field: &str, value: &str) -> Result<(), DomainError> {
    if value.is_empty() {
        return Err(DomainError::Validation(format!("Field '{}' is required", field)));
    }
    Ok(())
}

fn validate_username(username: &str) -> Result<(), DomainError> {
    required("username", username.trim())?;

    if username.chars().count() > MAX_USERNAME_LEN {
        return Err(DomainError::Validation(format!(
            "Username must be at most {} characters long",
            MAX_USERNAME_LEN
        )));
    }

    Ok(())
}

fn validate_email(email: &str) -> Result<(), DomainError> {
    required("email", email)?;

    if email.len() > MAX_EMAIL_LEN {
        return Err(DomainError::Validation(format!(
            "Email must be at most {} characters long",
            MAX_EMAIL_LEN
        )));
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err(DomainError::Validation("Invalid email format".to_string()));
    }

    Ok(())
}
