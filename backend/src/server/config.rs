//! Environment-driven server configuration.
//!
//! Configuration is read once at startup. Debug builds fall back to
//! development defaults with a warning; release builds fail fast on missing
//! or invalid settings so a misconfigured deployment never serves traffic
//! with an ephemeral signing key.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::Key;
use tracing::warn;

const BIND_ADDR_ENV: &str = "BIND_ADDR";
const TOKEN_SECRET_ENV: &str = "TOKEN_SECRET";
const SESSION_KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const DEV_TOKEN_SECRET: &str = "dev-token-secret";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no";

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings.
    Debug,
    /// Release builds require explicit, valid settings.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Errors raised while validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Startup settings derived from the environment.
pub struct Config {
    /// Socket address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// HMAC secret for signing access tokens.
    pub token_secret: String,
    /// Signing key for the favourites session cookie.
    pub session_key: Key,
    /// Whether the session cookie is marked `Secure`.
    pub cookie_secure: bool,
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env(mode: BuildMode) -> Result<Self, ConfigError> {
        Self::from_lookup(mode, |name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(mode: BuildMode, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = bind_addr_from(&lookup)?;
        let token_secret = token_secret_from(&lookup, mode)?;
        let session_key = session_key_from(&lookup, mode)?;
        let cookie_secure = cookie_secure_from(&lookup, mode)?;
        Ok(Self {
            bind_addr,
            token_secret,
            session_key,
            cookie_secure,
        })
    }
}

fn bind_addr_from<F: Fn(&str) -> Option<String>>(lookup: &F) -> Result<SocketAddr, ConfigError> {
    let raw = lookup(BIND_ADDR_ENV).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
    raw.parse().map_err(|_| ConfigError::InvalidEnv {
        name: BIND_ADDR_ENV,
        value: raw,
        expected: "host:port",
    })
}

fn token_secret_from<F: Fn(&str) -> Option<String>>(
    lookup: &F,
    mode: BuildMode,
) -> Result<String, ConfigError> {
    match lookup(TOKEN_SECRET_ENV) {
        Some(secret) if !secret.is_empty() => Ok(secret),
        Some(value) => Err(ConfigError::InvalidEnv {
            name: TOKEN_SECRET_ENV,
            value,
            expected: "non-empty secret",
        }),
        None => {
            if mode.is_debug() {
                warn!("TOKEN_SECRET not set; using development secret");
                Ok(DEV_TOKEN_SECRET.to_string())
            } else {
                Err(ConfigError::MissingEnv {
                    name: TOKEN_SECRET_ENV,
                })
            }
        }
    }
}

fn session_key_from<F: Fn(&str) -> Option<String>>(
    lookup: &F,
    mode: BuildMode,
) -> Result<Key, ConfigError> {
    let path = PathBuf::from(
        lookup(SESSION_KEY_FILE_ENV).unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_string()),
    );
    match std::fs::read(&path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(error) => {
            if mode.is_debug() {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary session key (dev only)"
                );
                Ok(Key::generate())
            } else {
                Err(ConfigError::KeyRead {
                    path,
                    source: error,
                })
            }
        }
    }
}

fn cookie_secure_from<F: Fn(&str) -> Option<String>>(
    lookup: &F,
    mode: BuildMode,
) -> Result<bool, ConfigError> {
    match lookup(COOKIE_SECURE_ENV) {
        Some(value) => parse_bool(&value).ok_or(ConfigError::InvalidEnv {
            name: COOKIE_SECURE_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
        None => {
            if mode.is_debug() {
                warn!("SESSION_COOKIE_SECURE not set; defaulting to insecure for development");
                Ok(false)
            } else {
                Ok(true)
            }
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}
