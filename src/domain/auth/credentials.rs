//! Sign-up and sign-in form validation.

use crate::domain::foundation::{DomainError, FieldErrors, ValidationError};
use crate::domain::user::{parse_display_name, Email};

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_PASSWORD_LENGTH: usize = 72;

pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";
pub const EMAIL_ALREADY_EXISTS: &str = "User with this email already exists";
pub const EMAIL_NOT_REGISTERED: &str = "Your email is not in the system!";
pub const WRONG_PASSWORD: &str = "Wrong password!";

fn check_password(raw: &str) -> Result<(), ValidationError> {
    let len = raw.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::invalid_format("password", PASSWORD_TOO_SHORT));
    }
    // bcrypt only looks at the first 72 bytes.
    if raw.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::length_out_of_range(
            "password",
            MIN_PASSWORD_LENGTH,
            MAX_PASSWORD_LENGTH,
            raw.len(),
        ));
    }
    Ok(())
}

/// A validated sign-up submission.
#[derive(Debug, Clone)]
pub struct SignUpForm {
    pub name: String,
    pub email: Email,
    pub password: String,
}

impl SignUpForm {
    /// Validates all fields and reports every failure per field.
    pub fn parse(
        name: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Self, DomainError> {
        let mut errors = FieldErrors::new();

        let name = errors.capture(parse_display_name(name));
        let email = errors.capture(Email::parse(email));
        let password_ok = errors.capture(check_password(password)).is_some();
        if password != confirm_password {
            errors.add("confirm_password", PASSWORDS_DO_NOT_MATCH);
        }

        errors.into_result()?;

        match (name, email, password_ok) {
            (Some(name), Some(email), true) => Ok(Self {
                name,
                email,
                password: password.to_string(),
            }),
            _ => Err(DomainError::internal("sign-up validation lost a field")),
        }
    }
}

/// A validated sign-in submission.
#[derive(Debug, Clone)]
pub struct SignInForm {
    pub email: Email,
    pub password: String,
}

impl SignInForm {
    pub fn parse(email: &str, password: &str) -> Result<Self, DomainError> {
        let mut errors = FieldErrors::new();

        let email = errors.capture(Email::parse(email));
        if password.is_empty() {
            errors.add("password", "Password is required");
        }

        errors.into_result()?;

        let email = email.ok_or_else(|| DomainError::internal("sign-in validation lost a field"))?;
        Ok(Self {
            email,
            password: password.to_string(),
        })
    }
}
