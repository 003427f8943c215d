//! Process configuration read from the environment at startup.

use std::env;
use std::time::Duration;

use crate::domain::rules::RevealPolicy;
use crate::error::AppError;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_RETENTION_SECS: u64 = 3600;
const DEFAULT_REAPER_INTERVAL_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// How long a finished (or never-joined) session is kept before the reaper drops it.
    pub session_retention: Duration,
    pub reaper_interval: Duration,
    pub reveal_policy: RevealPolicy,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            session_retention: Duration::from_secs(DEFAULT_RETENTION_SECS),
            reaper_interval: Duration::from_secs(DEFAULT_REAPER_INTERVAL_SECS),
            reveal_policy: RevealPolicy::default(),
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Unset or blank variables
    /// fall back to defaults; malformed ones are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = var("BUNKER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_var(var("BUNKER_PORT"), "BUNKER_PORT", DEFAULT_PORT)?;
        let retention = parse_var(
            var("BUNKER_SESSION_RETENTION_SECS"),
            "BUNKER_SESSION_RETENTION_SECS",
            DEFAULT_RETENTION_SECS,
        )?;
        let reaper_interval = parse_var(
            var("BUNKER_REAPER_INTERVAL_SECS"),
            "BUNKER_REAPER_INTERVAL_SECS",
            DEFAULT_REAPER_INTERVAL_SECS,
        )?;
        if reaper_interval == 0 {
            return Err(AppError::config(
                "BUNKER_REAPER_INTERVAL_SECS must be greater than zero".to_string(),
            ));
        }

        let reveal_policy = match var("BUNKER_REVEAL_POLICY") {
            Some(raw) => raw
                .parse::<RevealPolicy>()
                .map_err(|e| AppError::config(format!("BUNKER_REVEAL_POLICY: {e}")))?,
            None => RevealPolicy::default(),
        };

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            session_retention: Duration::from_secs(retention),
            reaper_interval: Duration::from_secs(reaper_interval),
            reveal_policy,
            cors_allowed_origins,
        })
    }
}

fn parse_var<T: std::str::FromStr>(raw: Option<String>, name: &str, default: T) -> Result<T, AppError> {
    match raw {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| AppError::config(format!("{name} must be a valid number, got '{raw}'"))),
        None => Ok(default),
    }
}

/// Comma-separated origins; keeps `*` and http(s) origins, drops the rest.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "null")
        .filter(|s| *s == "*" || s.starts_with("http://") || s.starts_with("https://"))
        .map(str::to_string)
        .collect()
}
