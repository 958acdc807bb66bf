//! Authentication configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum HS256 secret length accepted in production.
pub const MIN_PRODUCTION_SECRET_LEN: usize = 32;

/// Session token and password hashing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret
    #[serde(default)]
    pub jwt_secret: String,

    /// `iss` claim written into and required from every token
    #[serde(default = "default_issuer")]
    pub jwt_issuer: String,

    /// Access token lifetime in seconds
    #[serde(default = "default_access_ttl")]
    pub access_token_ttl_secs: u64,

    /// Refresh token lifetime in seconds
    #[serde(default = "default_refresh_ttl")]
    pub refresh_token_ttl_secs: u64,

    /// bcrypt cost factor
    #[serde(default = "default_hash_cost")]
    pub password_hash_cost: u32,
}

impl AuthConfig {
    pub fn access_token_ttl(&self) -> Duration {
        Duration::from_secs(self.access_token_ttl_secs)
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_token_ttl_secs)
    }

    /// Validate authentication configuration
    ///
    /// Production additionally requires a secret of at least 32 bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment == Environment::Production
            && self.jwt_secret.len() < MIN_PRODUCTION_SECRET_LEN
        {
            return Err(ValidationError::JwtSecretTooShort(MIN_PRODUCTION_SECRET_LEN));
        }
        if self.jwt_issuer.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_ISSUER"));
        }
        if self.access_token_ttl_secs == 0 || self.refresh_token_ttl_secs == 0 {
            return Err(ValidationError::InvalidTokenTtl);
        }
        if self.refresh_token_ttl_secs <= self.access_token_ttl_secs {
            return Err(ValidationError::RefreshTtlTooShort);
        }
        if !(4..=31).contains(&self.password_hash_cost) {
            return Err(ValidationError::InvalidHashCost);
        }
        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_issuer: default_issuer(),
            access_token_ttl_secs: default_access_ttl(),
            refresh_token_ttl_secs: default_refresh_ttl(),
            password_hash_cost: default_hash_cost(),
        }
    }
}

fn default_issuer() -> String {
    "socialite".to_string()
}

fn default_access_ttl() -> u64 {
    3600
}

fn default_refresh_ttl() -> u64 {
    7 * 24 * 3600
}

fn default_hash_cost() -> u32 {
    10
}
