//! Application configuration.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Document store configuration.
    #[serde(default)]
    pub storage: StorageSettings,
    /// Relation database configuration. Absent means in-process relations.
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    /// Profile rendering defaults.
    #[serde(default)]
    pub profile: ProfileConfig,
}

/// Document store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Directory holding the current user's documents.
    #[serde(default = "default_documents_path")]
    pub documents_path: PathBuf,
    /// Key of the private following-list document.
    #[serde(default = "default_following_key")]
    pub following_key: String,
}

/// Database connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

/// Profile defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileConfig {
    /// Avatar used when a profile carries no image.
    #[serde(default = "default_avatar_url")]
    pub default_avatar_url: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            documents_path: default_documents_path(),
            following_key: default_following_key(),
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            default_avatar_url: default_avatar_url(),
        }
    }
}

fn default_documents_path() -> PathBuf {
    PathBuf::from("./documents")
}

fn default_following_key() -> String {
    "following".to_string()
}

const fn default_max_connections() -> u32 {
    10
}

const fn default_min_connections() -> u32 {
    1
}

fn default_avatar_url() -> String {
    "/images/user.png".to_string()
}

impl Config {
    /// Load configuration from files and environment variables.
    ///
    /// Configuration is loaded in the following order:
    /// 1. `.env` (if present)
    /// 2. `config/default.toml`
    /// 3. `config/{environment}.toml` (based on `GITIX_ENV`)
    /// 4. Environment variables with `GITIX__` prefix
    pub fn load() -> Result<Self, config::ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!(error = %e, "No .env file loaded");
        }

        let env = std::env::var("GITIX_ENV").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("GITIX")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load configuration from a specific file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .add_source(
                config::Environment::with_prefix("GITIX")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
