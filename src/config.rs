// src/config.rs
use std::{env, time::Duration};
use thiserror::Error;

/// Where articles are persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Storage {
    Postgres(String),
    Memory,
}

#[derive(Clone)]
pub struct AppConfig {
    storage: Storage,
    listen_addr: String,
    master_key: String,
    biscuit_private_key: String,
    token_ttl: Duration,
    allowed_origins: Vec<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("storage", &self.storage)
            .field("listen_addr", &self.listen_addr)
            .field("token_ttl", &self.token_ttl)
            .field("allowed_origins", &self.allowed_origins)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".into()
}

fn default_token_ttl() -> u64 {
    3600
}

impl AppConfig {
    /// Build configuration from environment variables, reading `.env` first
    /// when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let storage = match read("DATABASE_URL") {
            None => Storage::Memory,
            Some(url) if url.eq_ignore_ascii_case("memory") => Storage::Memory,
            Some(url) => Storage::Postgres(url),
        };

        let listen_addr = read("LISTEN_ADDR").unwrap_or_else(default_listen_addr);

        let master_key = read("MASTER_KEY").ok_or(ConfigError::Missing("MASTER_KEY"))?;

        let biscuit_private_key = read("BISCUIT_ROOT_PRIVATE_KEY")
            .ok_or(ConfigError::Missing("BISCUIT_ROOT_PRIVATE_KEY"))?;
        if biscuit_private_key.len() != 64
            || !biscuit_private_key.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(ConfigError::Invalid(
                "BISCUIT_ROOT_PRIVATE_KEY must be a 32-byte hex string".into(),
            ));
        }

        let token_ttl_secs = match read("TOKEN_TTL_SECONDS") {
            None => default_token_ttl(),
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    ConfigError::Invalid("TOKEN_TTL_SECONDS must be a positive integer".into())
                })?,
        };

        let allowed_origins = read("ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            storage,
            listen_addr,
            master_key,
            biscuit_private_key,
            token_ttl: Duration::from_secs(token_ttl_secs),
            allowed_origins,
        })
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn master_key(&self) -> &str {
        &self.master_key
    }

    pub fn biscuit_private_key(&self) -> &str {
        &self.biscuit_private_key
    }

    pub fn token_ttl(&self) -> Duration {
        self.token_ttl
    }

    /// Empty means any origin.
    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const KEY: &str = "0c1f4c7b0f7d3f3a2b1c9e8d7f6a5b4c3d2e1f0a9b8c7d6e5f4a3b2c1d0e9f8a";

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_fill_optional_values() {
        let cfg = config(&[("MASTER_KEY", "secret"), ("BISCUIT_ROOT_PRIVATE_KEY", KEY)]).unwrap();
        assert_eq!(cfg.storage(), &Storage::Memory);
        assert_eq!(cfg.listen_addr(), "127.0.0.1:8080");
        assert_eq!(cfg.token_ttl(), Duration::from_secs(3600));
        assert!(cfg.allowed_origins().is_empty());
    }

    #[test]
    fn database_url_selects_postgres() {
        let cfg = config(&[
            ("DATABASE_URL", "postgres://localhost/articles"),
            ("MASTER_KEY", "secret"),
            ("BISCUIT_ROOT_PRIVATE_KEY", KEY),
        ])
        .unwrap();
        assert_eq!(
            cfg.storage(),
            &Storage::Postgres("postgres://localhost/articles".into())
        );
    }

    #[test]
    fn master_key_is_required() {
        let err = config(&[("BISCUIT_ROOT_PRIVATE_KEY", KEY)]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("MASTER_KEY"));
    }

    #[test]
    fn short_biscuit_key_is_invalid() {
        let err = config(&[("MASTER_KEY", "secret"), ("BISCUIT_ROOT_PRIVATE_KEY", "abcd")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn zero_ttl_is_invalid() {
        let err = config(&[
            ("MASTER_KEY", "secret"),
            ("BISCUIT_ROOT_PRIVATE_KEY", KEY),
            ("TOKEN_TTL_SECONDS", "0"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let cfg = config(&[("MASTER_KEY", "secret"), ("BISCUIT_ROOT_PRIVATE_KEY", KEY)]).unwrap();
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("secret"));
        assert!(!rendered.contains(KEY));
    }
}
