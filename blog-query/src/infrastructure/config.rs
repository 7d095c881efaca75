use std::str::FromStr;

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_env_with_database_url(None)
    }

    /// Reads the environment (after loading `.env`); `database_url` wins over `DATABASE_URL`.
    pub fn from_env_with_database_url(database_url: Option<String>) -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| match (key, &database_url) {
            ("DATABASE_URL", Some(url)) => Some(url.clone()),
            _ => std::env::var(key).ok(),
        })
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url =
            lookup("DATABASE_URL").ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?;
        let max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 20)?;
        let min_connections = parse_or(&lookup, "DB_MIN_CONNECTIONS", 5)?;
        let acquire_timeout_secs = parse_or(&lookup, "DB_ACQUIRE_TIMEOUT_SECS", 5)?;

        if max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be positive");
        }
        if min_connections > max_connections {
            anyhow::bail!(
                "DB_MIN_CONNECTIONS ({}) exceeds DB_MAX_CONNECTIONS ({})",
                min_connections,
                max_connections
            );
        }

        Ok(Self {
            database_url,
            max_connections,
            min_connections,
            acquire_timeout_secs,
        })
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {}: {}", key, e)),
        None => Ok(default),
    }
}
