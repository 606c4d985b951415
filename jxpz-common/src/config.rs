//! Configuration loading and config file resolution
//!
//! Bootstrap configuration comes from a TOML file. Every field has a built-in
//! default, so a missing file is not an error. Settings priority:
//!
//! 1. Command-line arguments (applied by the binary)
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Built-in defaults

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "JXPZ_CONFIG";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TomlConfig {
    /// HTTP server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Remote catalog settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Mount cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Remote catalog (jx3box CMS) settings
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Endpoint returning `{"data": {"pages", "list"}}`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// `client` query parameter
    #[serde(default = "default_client")]
    pub client: String,

    /// Records per page; the catalog caps this at 20
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Prefix joined with a record id to build its view link
    #[serde(default = "default_view_url_base")]
    pub view_url_base: String,
}

/// Mount cache settings
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
pub struct CacheConfig {
    /// Serialize concurrent misses for the same mount into one fetch
    #[serde(default)]
    pub single_flight: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_port() -> u16 {
    5760
}

fn default_base_url() -> String {
    "https://cms.jx3box.com/api/cms/app/pz".to_string()
}

fn default_client() -> String {
    "origin".to_string()
}

fn default_per_page() -> u32 {
    20
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_view_url_base() -> String {
    "https://origin.jx3box.com/pz/view/".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            catalog: CatalogConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            client: default_client(),
            per_page: default_per_page(),
            timeout_secs: default_timeout_secs(),
            view_url_base: default_view_url_base(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl TomlConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file that must exist
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load a config file, falling back to defaults when it does not exist
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => {
                let config = Self::load(path)?;
                info!("Configuration loaded from {}", path.display());
                Ok(config)
            }
            Some(path) => {
                warn!(
                    "Config file {} not found, using built-in defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            None => {
                warn!("No config file location available, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    fn validate(&self) -> Result<()> {
        if self.catalog.per_page == 0 {
            return Err(Error::Config("catalog.per_page must be at least 1".to_string()));
        }
        if self.catalog.base_url.trim().is_empty() {
            return Err(Error::Config("catalog.base_url must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Resolve the config file location
///
/// 1. Command-line argument
/// 2. Environment variable `env_var_name`
/// 3. `<config dir>/jxpz/jxpz-finder.toml`
pub fn resolve_config_path(cli_arg: Option<&Path>, env_var_name: &str) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    default_config_path()
}

/// Platform config directory location of the finder config
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("jxpz").join("jxpz-finder.toml"))
}
