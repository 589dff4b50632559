//! Runtime configuration read from the environment (and `.env`, if present).

use std::env;
use std::net::SocketAddr;

use anyhow::{bail, Context, Result};
use tracing::warn;

const DEFAULT_DATABASE_URL: &str = "sqlite:lesson_ledger.db";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;
const DEV_JWT_SECRET: &str = "lesson-ledger-dev-secret";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub cors_origin: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl AppConfig {
    /// Load configuration, reading a `.env` file first when one exists
    pub fn from_env() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(e).context("failed to read .env file");
            }
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bind_addr = read("LEDGER_BIND_ADDR", DEFAULT_BIND_ADDR);
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .with_context(|| format!("LEDGER_BIND_ADDR '{}' is not a socket address", bind_addr))?;

        let token_ttl_hours = match lookup("LEDGER_TOKEN_TTL_HOURS") {
            Some(value) => value
                .parse::<i64>()
                .ok()
                .filter(|hours| *hours > 0)
                .with_context(|| format!("LEDGER_TOKEN_TTL_HOURS '{}' must be a positive integer", value))?,
            None => DEFAULT_TOKEN_TTL_HOURS,
        };

        let jwt_secret = match lookup("LEDGER_JWT_SECRET") {
            Some(secret) if !secret.trim().is_empty() => secret,
            _ if cfg!(debug_assertions) => {
                warn!("LEDGER_JWT_SECRET is not set; using the development secret");
                DEV_JWT_SECRET.to_string()
            }
            _ => bail!("LEDGER_JWT_SECRET must be set in release builds"),
        };

        Ok(Self {
            database_url: read("LEDGER_DATABASE_URL", DEFAULT_DATABASE_URL),
            bind_addr,
            cors_origin: read("LEDGER_CORS_ORIGIN", DEFAULT_CORS_ORIGIN),
            jwt_secret,
            token_ttl_hours,
        })
    }
}
