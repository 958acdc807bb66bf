//! Account value objects: email, username, display name and profile edits.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{DomainError, FieldErrors, ImageUrl, ValidationError};

pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MAX_USERNAME_LENGTH: usize = 30;
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_BIO_LENGTH: usize = 500;
pub const MAX_LOCATION_LENGTH: usize = 100;
pub const MAX_WEBSITE_LENGTH: usize = 200;

/// A normalized (trimmed, lowercased) email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let email = raw.trim().to_lowercase();
        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if email.len() > MAX_EMAIL_LENGTH {
            return Err(ValidationError::length_out_of_range(
                "email",
                3,
                MAX_EMAIL_LENGTH,
                email.len(),
            ));
        }
        if email.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format("email", "must not contain spaces"));
        }

        let (local, domain) = email
            .split_once('@')
            .ok_or_else(|| ValidationError::invalid_format("email", "missing @ symbol"))?;
        if local.is_empty() || domain.contains('@') {
            return Err(ValidationError::invalid_format("email", "invalid address"));
        }
        if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
            return Err(ValidationError::invalid_format("email", "invalid domain"));
        }

        Ok(Self(email))
    }

    /// Wraps a stored value without validation.
    pub fn from_trusted(email: String) -> Self {
        Self(email)
    }

    /// Part before the `@`.
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Public handle used in profile URLs: 3-30 chars of `[a-z0-9_.-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let name = raw.trim().trim_start_matches('@').to_lowercase();
        if name.is_empty() {
            return Err(ValidationError::empty_field("username"));
        }
        let len = name.chars().count();
        if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len) {
            return Err(ValidationError::length_out_of_range(
                "username",
                MIN_USERNAME_LENGTH,
                MAX_USERNAME_LENGTH,
                len,
            ));
        }
        if !name.chars().all(is_username_char) {
            return Err(ValidationError::invalid_format(
                "username",
                "only letters, digits, '_', '.' and '-' are allowed",
            ));
        }
        Ok(Self(name))
    }

    /// Derives a handle from the email local part.
    ///
    /// Disallowed characters become `_`; short results are padded with `_`.
    pub fn derive_from_email(email: &Email) -> Self {
        let mut base: String = email
            .local_part()
            .chars()
            .map(|c| if is_username_char(c) { c } else { '_' })
            .take(MAX_USERNAME_LENGTH)
            .collect();
        while base.chars().count() < MIN_USERNAME_LENGTH {
            base.push('_');
        }
        Self(base)
    }

    /// Returns `base-n`, truncating the base so the result stays in range.
    pub fn with_suffix(&self, n: u32) -> Self {
        let suffix = format!("-{}", n);
        let keep = MAX_USERNAME_LENGTH - suffix.len();
        let base: String = self.0.chars().take(keep).collect();
        Self(format!("{}{}", base, suffix))
    }

    /// Wraps a stored value without validation.
    pub fn from_trusted(username: String) -> Self {
        Self(username)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_username_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '_' | '.' | '-')
}

/// Validates a display name (1-100 characters after trimming).
pub fn parse_display_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::empty_field("name"));
    }
    let len = name.chars().count();
    if len > MAX_NAME_LENGTH {
        return Err(ValidationError::length_out_of_range("name", 1, MAX_NAME_LENGTH, len));
    }
    Ok(name.to_string())
}

fn parse_optional_text(
    field: &str,
    raw: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => {
            let len = text.chars().count();
            if len > max {
                Err(ValidationError::length_out_of_range(field, 0, max, len))
            } else {
                Ok(Some(text.to_string()))
            }
        }
    }
}

/// A validated edit of the public profile fields.
///
/// Blank optional fields clear the stored value. `image` is only touched when
/// the edit mentions it: `None` keeps the avatar, `Some(None)` removes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub image: Option<Option<ImageUrl>>,
}

impl ProfileUpdate {
    /// Validates every field, reporting all failures at once.
    pub fn new(
        name: &str,
        bio: Option<&str>,
        location: Option<&str>,
        website: Option<&str>,
        image: Option<&str>,
    ) -> Result<Self, DomainError> {
        let mut errors = FieldErrors::new();

        let name = errors.capture(parse_display_name(name));
        let bio = errors.capture(parse_optional_text("bio", bio, MAX_BIO_LENGTH));
        let location = errors.capture(parse_optional_text("location", location, MAX_LOCATION_LENGTH));
        let website = errors
            .capture(parse_optional_text("website", website, MAX_WEBSITE_LENGTH))
            .and_then(|w| match w {
                Some(w) if w.chars().any(char::is_whitespace) => {
                    errors.add("website", "Field 'website' has invalid format: must not contain spaces");
                    None
                }
                other => Some(other),
            });
        let image = match image {
            None => Some(None),
            Some(raw) => errors
                .capture(ImageUrl::parse_optional("image", Some(raw)))
                .map(Some),
        };

        errors.into_result()?;

        // Every capture succeeded when no errors were recorded.
        match (name, bio, location, website, image) {
            (Some(name), Some(bio), Some(location), Some(website), Some(image)) => Ok(Self {
                name,
                bio,
                location,
                website,
                image,
            }),
            _ => Err(DomainError::internal("profile validation lost a field")),
        }
    }
}

/// Turns a stored website into a clickable link.
pub fn website_href(website: &str) -> String {
    if website.starts_with("http://") || website.starts_with("https://") {
        website.to_string()
    } else {
        format!("https://{}", website)
    }
}
