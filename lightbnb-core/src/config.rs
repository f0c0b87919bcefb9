use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::ConfigError;
use crate::search::DEFAULT_LIMIT;

/// Load environment variables from .env files
///
/// Priority order (highest to lowest):
/// 1. Current directory .env
/// 2. ~/.lightbnb/.env
/// 3. Environment variables already set
pub fn load_dotenv() {
    let mut loaded_from = Vec::new();

    if let Ok(path) = dotenvy::dotenv() {
        loaded_from.push(format!("current directory ({})", path.display()));
        debug!("Loaded .env from current directory: {}", path.display());
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            // dotenvy doesn't overwrite existing vars
            match dotenvy::from_path(&env_file) {
                Ok(()) => {
                    loaded_from.push(format!("~/.lightbnb/.env ({})", env_file.display()));
                }
                Err(e) => {
                    debug!("Failed to load {}: {}", env_file.display(), e);
                }
            }
        }
    }

    if loaded_from.is_empty() {
        debug!("No .env files found (current dir or ~/.lightbnb)");
    } else {
        info!("Loaded environment from: {}", loaded_from.join(", "));
    }
}

/// Get the lightbnb config directory path (~/.lightbnb)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".lightbnb"))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LightbnbConfig {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub search: SearchConfig,
}

/// Connection settings for the backing store.
///
/// `url`, when set (or when `DATABASE_URL` is in the environment), wins over
/// the individual fields.
#[derive(Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: default_host(),
            port: default_port(),
            database: default_database(),
            user: default_user(),
            password: None,
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
        }
    }
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<set>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_limit")]
    pub default_limit: i64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

// Default value functions for serde
fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_database() -> String {
    "lightbnb".to_string()
}

fn default_user() -> String {
    "vagrant".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    30
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl LightbnbConfig {
    /// Load config from TOML files, then apply `DATABASE_URL`
    ///
    /// Priority order (highest to lowest):
    /// 1. `DATABASE_URL` environment variable
    /// 2. ./lightbnb.toml (project-specific)
    /// 3. ~/.lightbnb/config.toml (user defaults)
    /// 4. Built-in defaults
    ///
    /// Unreadable or malformed files are logged and skipped.
    pub fn load() -> Self {
        let mut config = LightbnbConfig::default();

        let candidates = config_dir()
            .map(|d| d.join("config.toml"))
            .into_iter()
            .chain(std::iter::once(PathBuf::from("lightbnb.toml")));

        for path in candidates {
            if !path.exists() {
                continue;
            }
            match Self::from_file(&path) {
                Ok(loaded) => {
                    debug!("Loaded config from {}", path.display());
                    config = loaded;
                }
                Err(e) => warn!("{}", e),
            }
        }

        config.apply_env();
        config
    }

    /// Parse a single TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.trim().is_empty() {
                self.database.url = Some(url);
            }
        }
    }
}
