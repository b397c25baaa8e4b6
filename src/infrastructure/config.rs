//! Runtime settings read from the environment.
//!
//! Variables (a `.env` file is honoured when present):
//!
//! - `SECRET_KEY`: HMAC key used to sign access tokens (required)
//! - `ALGORITHM`: JWT signing algorithm (default `HS256`)
//! - `ACCESS_TOKEN_EXPIRE_MINUTES`: token lifetime (default 30)
//! - `HOST` / `PORT`: bind address (default `127.0.0.1:8000`)
//! - `LOG_LEVEL`: fallback filter when `RUST_LOG` is unset (default `info`)

use anyhow::{Context, Result, anyhow, bail};
use jsonwebtoken::Algorithm;
use std::env;
use std::str::FromStr;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_EXPIRE_MINUTES: i64 = 30;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub expire_minutes: i64,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: Algorithm::HS256,
            expire_minutes: DEFAULT_EXPIRE_MINUTES,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("SECRET_KEY")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow!("SECRET_KEY environment variable is required"))?;

        let algorithm = match lookup("ALGORITHM") {
            Some(name) => Algorithm::from_str(&name)
                .map_err(|_| anyhow!("Unsupported ALGORITHM: {}", name))?,
            None => Algorithm::HS256,
        };
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            bail!("ALGORITHM must be an HMAC algorithm (HS256, HS384, HS512)");
        }

        let expire_minutes = match lookup("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Some(raw) => raw
                .parse::<i64>()
                .with_context(|| format!("Invalid ACCESS_TOKEN_EXPIRE_MINUTES: {}", raw))?,
            None => DEFAULT_EXPIRE_MINUTES,
        };
        if expire_minutes <= 0 {
            bail!("ACCESS_TOKEN_EXPIRE_MINUTES must be positive");
        }

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT: {}", raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port,
            },
            jwt: JwtConfig {
                secret,
                algorithm,
                expire_minutes,
            },
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}
