//! Centralized configuration for the identity provider.
//!
//! All configuration is loaded from environment variables (and an optional
//! `.env` file) and validated at startup.

use crate::error::IdpError;
use crate::jwt::SigningKey;
use std::env;
use std::time::Duration;

/// Where client credentials are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local map, seeded at startup
    Memory,
    /// Redis key-value table
    Redis {
        /// Connection URL
        url: String,
        /// Namespace for credential keys
        key_prefix: String,
    },
}

/// Identity provider configuration.
#[derive(Debug, Clone)]
pub struct Config {
    // Server settings
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Time allowed for in-flight requests on shutdown
    pub shutdown_timeout: Duration,

    // Token settings
    /// HMAC key shared by issuance and introspection
    pub signing_key: SigningKey,
    /// The key was generated because `SIGNING_KEY` was unset
    pub signing_key_ephemeral: bool,

    // Storage
    /// Credential store backend
    pub store: StoreBackend,
    /// Clients registered at startup
    pub seed_clients: Vec<(String, String)>,

    // Logging
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit JSON log lines
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid.
    pub fn from_env() -> Result<Self, IdpError> {
        dotenvy::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_env("PORT", 8080)?;
        let shutdown_timeout = Duration::from_secs(parse_env("SHUTDOWN_TIMEOUT", 10)?);

        let (signing_key, signing_key_ephemeral) = parse_signing_key()?;

        let store = match env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "memory".to_string())
            .to_lowercase()
            .as_str()
        {
            "memory" => StoreBackend::Memory,
            "redis" => StoreBackend::Redis {
                url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),
                key_prefix: env::var("REDIS_KEY_PREFIX").unwrap_or_else(|_| "clients".to_string()),
            },
            other => {
                return Err(IdpError::config(format!("Invalid STORE_BACKEND: {other}")));
            }
        };

        let seed_clients = parse_seed_clients(&env::var("SEED_CLIENTS").unwrap_or_default())?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_json = parse_env("LOG_JSON", false)?;

        Ok(Self {
            host,
            port,
            shutdown_timeout,
            signing_key,
            signing_key_ephemeral,
            store,
            seed_clients,
            log_level,
            log_json,
        })
    }

    /// `host:port` to bind.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Parse environment variable with default value.
fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T, IdpError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val
            .parse()
            .map_err(|e| IdpError::config(format!("Invalid {name}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Parse signing key from environment, generating one for development.
fn parse_signing_key() -> Result<(SigningKey, bool), IdpError> {
    match env::var("SIGNING_KEY") {
        Ok(key) if key.is_empty() => Err(IdpError::config("SIGNING_KEY must not be empty")),
        Ok(key) => Ok((SigningKey::from(key.as_str()), false)),
        Err(_) => Ok((SigningKey::generate(), true)),
    }
}

/// Parse `id:secret` pairs separated by commas.
fn parse_seed_clients(raw: &str) -> Result<Vec<(String, String)>, IdpError> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| match entry.split_once(':') {
            Some((id, secret)) if !id.is_empty() && !secret.is_empty() => {
                Ok((id.to_string(), secret.to_string()))
            }
            _ => Err(IdpError::config(format!(
                "Invalid SEED_CLIENTS entry, expected id:secret: {entry}"
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_clients_parsing() {
        let clients = parse_seed_clients("1234567890:client_secret, other:s3:cret").unwrap();

        assert_eq!(
            clients,
            vec![
                ("1234567890".to_string(), "client_secret".to_string()),
                ("other".to_string(), "s3:cret".to_string()),
            ]
        );
    }

    #[test]
    fn test_seed_clients_empty() {
        assert!(parse_seed_clients("").unwrap().is_empty());
        assert!(parse_seed_clients(" , ").unwrap().is_empty());
    }

    #[test]
    fn test_seed_clients_rejects_malformed_entries() {
        assert!(parse_seed_clients("no-secret").is_err());
        assert!(parse_seed_clients(":secret").is_err());
        assert!(parse_seed_clients("id:").is_err());
    }

    #[test]
    fn test_parse_env_default_when_unset() {
        let port: u16 = parse_env("OPEN_IDP_TEST_UNSET_PORT", 8080).unwrap();
        assert_eq!(port, 8080);
    }
}
