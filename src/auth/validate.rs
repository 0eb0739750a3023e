//! Login form validation.
//!
//! Every check runs locally; a form with any field error never reaches the
//! gateway. Failures are reported per field so the prompt can show them
//! inline.

use regex::Regex;
use thiserror::Error;

/// Minimum password length accepted by the form
const MIN_PASSWORD_LENGTH: usize = 6;

/// Username length bounds (optional field)
const MIN_USERNAME_LENGTH: usize = 3;
const MAX_USERNAME_LENGTH: usize = 20;

/// Per-field validation failures for the login form.
#[derive(Error, Debug, Default, PartialEq, Eq)]
#[error("login form validation failed")]
pub struct FieldErrors {
    pub email: Option<String>,
    pub password: Option<String>,
    pub username: Option<String>,
}

impl FieldErrors {
    fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none() && self.username.is_none()
    }

    /// All messages in field order, for rendering.
    pub fn messages(&self) -> Vec<&str> {
        [&self.email, &self.password, &self.username]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect()
    }
}

pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").map_or(false, |re| re.is_match(email))
}

fn valid_username(username: &str) -> bool {
    Regex::new(r"^\w+$").map_or(false, |re| re.is_match(username))
}

/// Validate the login form. The username is optional; a blank one is
/// treated as absent.
pub fn validate_login(
    email: &str,
    password: &str,
    username: Option<&str>,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::default();

    let email = email.trim();
    if email.is_empty() {
        errors.email = Some("Email is required".to_string());
    } else if !valid_email(email) {
        errors.email = Some("Enter a valid email address".to_string());
    }

    if password.is_empty() {
        errors.password = Some("Password is required".to_string());
    } else if password.len() < MIN_PASSWORD_LENGTH {
        errors.password = Some(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        ));
    }

    if let Some(username) = username.map(str::trim).filter(|u| !u.is_empty()) {
        if username.len() < MIN_USERNAME_LENGTH || username.len() > MAX_USERNAME_LENGTH {
            errors.username = Some(format!(
                "Username must be {} to {} characters",
                MIN_USERNAME_LENGTH, MAX_USERNAME_LENGTH
            ));
        } else if !valid_username(username) {
            errors.username =
                Some("Username may only contain letters, digits, and underscores".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
