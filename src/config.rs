use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::SedimentError;

/// Environment variable overriding `[db].path`.
pub const ENV_DB_PATH: &str = "SEDIMENT_DB_PATH";
/// Environment variable overriding `[db].collection`.
pub const ENV_COLLECTION: &str = "SEDIMENT_COLLECTION";
/// Environment variable overriding `[server].bind`.
pub const ENV_BIND: &str = "SEDIMENT_BIND";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub db: DbConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
    #[serde(default = "default_collection")]
    pub collection: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            collection: default_collection(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./data/sediment.sqlite")
}
fn default_collection() -> String {
    "samples".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

impl Config {
    /// Replaces settings with values found by `lookup`, keyed by the
    /// `SEDIMENT_*` variable names.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(ENV_DB_PATH) {
            self.db.path = PathBuf::from(path);
        }
        if let Some(collection) = lookup(ENV_COLLECTION) {
            self.db.collection = collection;
        }
        if let Some(bind) = lookup(ENV_BIND) {
            self.server.bind = bind;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !is_identifier(&self.db.collection) {
            return Err(SedimentError::InvalidCollectionName(self.db.collection.clone()).into());
        }
        if self.server.bind.trim().is_empty() {
            anyhow::bail!("server.bind must not be empty");
        }
        Ok(())
    }
}

/// The collection name is spliced into SQL, so only plain identifiers pass.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parses configuration text without touching the environment.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    Ok(config)
}

/// Loads the configuration file (defaults if it does not exist), then
/// applies `.env` and process-environment overrides.
pub fn load_config(path: &Path) -> Result<Config> {
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        parse_config(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?
    } else {
        Config::default()
    };

    dotenvy::dotenv().ok();
    config.apply_overrides(|key| std::env::var(key).ok());
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.db.path, PathBuf::from("./data/sediment.sqlite"));
        assert_eq!(config.db.collection, "samples");
        assert_eq!(config.server.bind, "127.0.0.1:8000");
    }

    #[test]
    fn test_parses_sections() {
        let config = parse_config(
            r#"
            [db]
            path = "/tmp/s.sqlite"
            collection = "sediment_2019"

            [server]
            bind = "0.0.0.0:9000"
            "#,
        )
        .unwrap();
        assert_eq!(config.db.path, PathBuf::from("/tmp/s.sqlite"));
        assert_eq!(config.db.collection, "sediment_2019");
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        config.validate().unwrap();
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut config = parse_config("[db]\ncollection = \"a\"\n").unwrap();
        let env: HashMap<&str, &str> = [(ENV_COLLECTION, "b"), (ENV_BIND, "127.0.0.1:1")]
            .into_iter()
            .collect();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.db.collection, "b");
        assert_eq!(config.server.bind, "127.0.0.1:1");
        assert_eq!(config.db.path, PathBuf::from("./data/sediment.sqlite"));
    }

    #[test]
    fn test_rejects_unsafe_collection_names() {
        for name in ["", "1abc", "samples; DROP TABLE x", "a-b", "a b"] {
            let mut config = Config::default();
            config.db.collection = name.to_string();
            assert!(config.validate().is_err(), "{:?} should be rejected", name);
        }
    }

    #[test]
    fn test_malformed_toml_is_an_error() {
        assert!(parse_config("[db\npath = ").is_err());
    }
}
