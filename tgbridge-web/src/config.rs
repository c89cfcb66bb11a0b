//! Web server config. Loaded from env: HTTP_HOST, HTTP_PORT, HTTP_WORKERS, WEBHOOK_PATH, API_KEY.

use std::env;
use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Serialize;

pub const DEFAULT_WEBHOOK_PATH: &str = "/telegram/webhook";

/// Where updates come from. Webhook mode mounts the ingress route on the web server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BridgeMode {
    Polling,
    Webhook,
}

impl FromStr for BridgeMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "polling" | "poll" => Ok(Self::Polling),
            "webhook" => Ok(Self::Webhook),
            other => anyhow::bail!("BRIDGE_MODE must be polling or webhook (got {})", other),
        }
    }
}

impl fmt::Display for BridgeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Polling => write!(f, "polling"),
            Self::Webhook => write!(f, "webhook"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WebConfig {
    /// HTTP_HOST
    pub host: String,
    /// HTTP_PORT
    pub port: u16,
    /// HTTP_WORKERS, actix worker threads inside the web thread
    pub workers: usize,
    /// WEBHOOK_PATH, route Telegram posts updates to
    pub webhook_path: String,
    /// API_KEY, bearer token for /api/*; None disables the API
    pub api_key: Option<String>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            workers: 2,
            webhook_path: DEFAULT_WEBHOOK_PATH.to_string(),
            api_key: None,
        }
    }
}

impl WebConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let host = env::var("HTTP_HOST").unwrap_or(defaults.host);
        let port = parse_env("HTTP_PORT", defaults.port)?;
        let workers = parse_env("HTTP_WORKERS", defaults.workers)?;
        let webhook_path = env::var("WEBHOOK_PATH").unwrap_or(defaults.webhook_path);
        let api_key = env::var("API_KEY").ok().filter(|k| !k.trim().is_empty());
        Ok(Self {
            host,
            port,
            workers,
            webhook_path,
            api_key,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            anyhow::bail!("HTTP_HOST is empty");
        }
        if self.workers == 0 {
            anyhow::bail!("HTTP_WORKERS must be at least 1");
        }
        if !self.webhook_path.starts_with('/') || self.webhook_path.len() < 2 {
            anyhow::bail!(
                "WEBHOOK_PATH must start with '/' and name a route (got {})",
                self.webhook_path
            );
        }
        if self.webhook_path.starts_with("/api/") || self.webhook_path == "/health" {
            anyhow::bail!("WEBHOOK_PATH collides with a built-in route: {}", self.webhook_path);
        }
        Ok(())
    }
}

/// Reads and parses an env var, falling back to `default` when unset. Unparsable values are errors.
pub fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {}", key, raw)),
        Err(_) => Ok(default),
    }
}
