use anyhow::{Context, Result};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Connection settings, read from the environment (and `.env` when the binary loads it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub database_url: String,
    pub max_connections: u32,
}

impl DbConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;
        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value
                .parse::<u32>()
                .ok()
                .filter(|count| *count > 0)
                .with_context(|| {
                    format!("DATABASE_MAX_CONNECTIONS must be a positive integer, got {value:?}")
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        Ok(Self {
            database_url,
            max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn database_url_is_required() {
        let error = DbConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(error.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn max_connections_defaults_and_overrides() {
        let config = DbConfig::from_lookup(lookup(&[("DATABASE_URL", "sqlite://news.db")])).unwrap();
        assert_eq!(config, DbConfig::new("sqlite://news.db"));

        let config = DbConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite://news.db"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
        ]))
        .unwrap();
        assert_eq!(config.max_connections, 12);
    }

    #[test]
    fn zero_connections_is_rejected() {
        let result = DbConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "sqlite://news.db"),
            ("DATABASE_MAX_CONNECTIONS", "0"),
        ]));
        assert!(result.is_err());
    }
}
