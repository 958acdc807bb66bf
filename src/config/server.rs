//! Listener, environment and browser-facing settings.

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// HTTP server settings. Every field falls back to `ServerConfig::default()`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,

    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: String,

    pub request_timeout_secs: u64,

    /// Comma-separated origins allowed to call the API with credentials.
    pub cors_origins: Option<String>,

    /// Overrides the `Secure` cookie attribute, which otherwise tracks
    /// `Environment::Production`.
    pub secure_cookies: Option<bool>,
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            environment: Environment::default(),
            log_level: "info,socialite=debug,sqlx=warn,tower_http=debug".to_string(),
            request_timeout_secs: 30,
            cors_origins: None,
            secure_cookies: None,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ValidationError::InvalidHost(self.host.clone()))
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    pub fn secure_cookies(&self) -> bool {
        self.secure_cookies.unwrap_or_else(|| self.is_production())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parsed `cors_origins`; blank entries are dropped.
    pub fn cors_origins_list(&self) -> Vec<String> {
        let Some(raw) = self.cors_origins.as_deref() else {
            return Vec::new();
        };
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        self.socket_addr()?;
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(configure: impl FnOnce(&mut ServerConfig)) -> ServerConfig {
        let mut config = ServerConfig::default();
        configure(&mut config);
        config
    }

    #[test]
    fn defaults_bind_all_interfaces_in_development() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unparseable_host_is_rejected() {
        let config = server(|c| c.host = "not a host".to_string());
        assert!(matches!(config.validate(), Err(ValidationError::InvalidHost(_))));
    }

    #[test]
    fn port_zero_is_rejected() {
        let config = server(|c| c.port = 0);
        assert!(matches!(config.validate(), Err(ValidationError::InvalidPort)));
    }

    #[test]
    fn timeout_must_be_between_one_second_and_five_minutes() {
        for secs in [0, MAX_REQUEST_TIMEOUT_SECS + 1] {
            let config = server(|c| c.request_timeout_secs = secs);
            assert!(matches!(config.validate(), Err(ValidationError::InvalidTimeout)));
        }
        assert!(server(|c| c.request_timeout_secs = MAX_REQUEST_TIMEOUT_SECS)
            .validate()
            .is_ok());
    }

    #[test]
    fn secure_cookies_track_production_unless_overridden() {
        assert!(!ServerConfig::default().secure_cookies());

        let production = server(|c| c.environment = Environment::Production);
        assert!(production.is_production());
        assert!(production.secure_cookies());

        let opted_out = server(|c| {
            c.environment = Environment::Production;
            c.secure_cookies = Some(false);
        });
        assert!(!opted_out.secure_cookies());
    }

    #[test]
    fn cors_origins_skip_blank_entries() {
        let config = server(|c| {
            c.cors_origins = Some("http://localhost:5173, ,http://localhost:3000,".to_string())
        });
        assert_eq!(
            config.cors_origins_list(),
            vec!["http://localhost:5173", "http://localhost:3000"]
        );
        assert!(ServerConfig::default().cors_origins_list().is_empty());
    }
}
