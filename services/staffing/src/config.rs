//! Service configuration loaded from the environment.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use token_codec::{SignatureEncoding, SigningAlgorithm};

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid port number
    #[error("Invalid port: must be between 1 and 65535")]
    InvalidPort,

    /// Invalid timeout value
    #[error("Invalid timeout for {name}: must be greater than 0")]
    InvalidTimeout {
        /// Variable holding the timeout
        name: String,
    },

    /// Missing required field
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    /// Environment variable parse error
    #[error("Failed to parse environment variable {name}: {reason}")]
    ParseError {
        /// Variable name
        name: String,
        /// Parser message
        reason: String,
    },
}

/// Account created at startup so the first login is possible.
#[derive(Debug)]
pub struct BootstrapUser {
    /// Login name
    pub username: String,
    /// Login password
    pub password: SecretString,
    /// Contact email
    pub email: String,
}

/// Service configuration with validation.
#[derive(Debug)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port (1-65535)
    pub port: u16,
    /// Signing key PEM file
    pub private_key_path: PathBuf,
    /// Verification key PEM file
    pub public_key_path: PathBuf,
    /// Signature scheme for issued and accepted tokens
    pub algorithm: SigningAlgorithm,
    /// Signature segment encoding
    pub signature_encoding: SignatureEncoding,
    /// `typ` header of issued tokens
    pub token_type: String,
    /// Log filter used when `RUST_LOG` is unset
    pub log_level: String,
    /// JSON log output
    pub log_json: bool,
    /// Request timeout in seconds (must be > 0)
    pub request_timeout_secs: u64,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_secs: u64,
    /// Optional seed account
    pub bootstrap_user: Option<BootstrapUser>,
}

impl Config {
    /// Loads configuration from environment variables (and `.env`) with
    /// validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable fails to parse or validate.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Loads configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable fails to parse or validate.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let config = Self {
            host: vars.string("HOST", "0.0.0.0"),
            port: vars.parse("PORT", 3000)?,
            private_key_path: vars.string("PRIVATE_KEY_PATH", "./private_key.pem").into(),
            public_key_path: vars.string("PUBLIC_KEY_PATH", "./public_key.pem").into(),
            algorithm: vars.parse("JWT_ALGORITHM", SigningAlgorithm::RS256)?,
            signature_encoding: vars.parse("TOKEN_SIGNATURE_ENCODING", SignatureEncoding::Raw)?,
            token_type: vars.string("TOKEN_TYPE", token_codec::header::DEFAULT_TOKEN_TYPE),
            log_level: vars.string("LOG_LEVEL", "info"),
            log_json: vars.parse("LOG_JSON", false)?,
            request_timeout_secs: vars.parse("REQUEST_TIMEOUT", 30)?,
            shutdown_timeout_secs: vars.parse("SHUTDOWN_TIMEOUT", 30)?,
            bootstrap_user: vars.bootstrap_user()?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                name: "REQUEST_TIMEOUT".to_string(),
            });
        }
        if self.token_type.is_empty() {
            return Err(ConfigError::MissingRequired("token_type".to_string()));
        }
        Ok(())
    }

    /// Address the listener binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Drain period after a shutdown signal.
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            private_key_path: "./private_key.pem".into(),
            public_key_path: "./public_key.pem".into(),
            algorithm: SigningAlgorithm::default(),
            signature_encoding: SignatureEncoding::default(),
            token_type: token_codec::header::DEFAULT_TOKEN_TYPE.to_string(),
            log_level: "info".to_string(),
            log_json: false,
            request_timeout_secs: 30,
            shutdown_timeout_secs: 30,
            bootstrap_user: None,
        }
    }
}

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        (self.0)(name).filter(|v| !v.trim().is_empty())
    }

    fn string(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable with a default value.
    fn parse<T>(&self, name: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(name) {
            Some(val) => val.trim().parse().map_err(|e: T::Err| ConfigError::ParseError {
                name: name.to_string(),
                reason: e.to_string(),
            }),
            None => Ok(default),
        }
    }

    /// Username and password must come together; email is optional.
    fn bootstrap_user(&self) -> Result<Option<BootstrapUser>, ConfigError> {
        match (self.get("BOOTSTRAP_USERNAME"), self.get("BOOTSTRAP_PASSWORD")) {
            (Some(username), Some(password)) => Ok(Some(BootstrapUser {
                email: self.get("BOOTSTRAP_EMAIL").unwrap_or_default(),
                username,
                password: SecretString::from(password),
            })),
            (None, None) => Ok(None),
            (Some(_), None) => Err(ConfigError::MissingRequired("BOOTSTRAP_PASSWORD".to_string())),
            (None, Some(_)) => Err(ConfigError::MissingRequired("BOOTSTRAP_USERNAME".to_string())),
        }
    }
}
