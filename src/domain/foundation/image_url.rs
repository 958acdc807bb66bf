//! Reference to an externally hosted image.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Maximum accepted URL length.
pub const MAX_IMAGE_URL_LENGTH: usize = 2048;

/// An absolute http(s) URL pointing at an uploaded image.
///
/// Uploading is done elsewhere; the domain only stores the resulting URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Parses an image URL for the given form field.
    pub fn parse(field: &str, raw: &str) -> Result<Self, ValidationError> {
        let url = raw.trim();
        if url.is_empty() {
            return Err(ValidationError::empty_field(field));
        }
        if url.len() > MAX_IMAGE_URL_LENGTH {
            return Err(ValidationError::length_out_of_range(
                field,
                1,
                MAX_IMAGE_URL_LENGTH,
                url.len(),
            ));
        }
        let rest = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .ok_or_else(|| ValidationError::invalid_format(field, "must be an http(s) URL"))?;
        if rest.is_empty() || rest.starts_with('/') || url.chars().any(char::is_whitespace) {
            return Err(ValidationError::invalid_format(field, "must be an http(s) URL"));
        }
        Ok(Self(url.to_string()))
    }

    /// Parses an optional form value, treating blank input as absent.
    pub fn parse_optional(field: &str, raw: Option<&str>) -> Result<Option<Self>, ValidationError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(url) => Self::parse(field, url).map(Some),
        }
    }

    /// Wraps a stored value without validation.
    pub fn from_trusted(url: String) -> Self {
        Self(url)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
