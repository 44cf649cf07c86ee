//! Configuration loading and resolution
//!
//! Every setting resolves through the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable names
const ENV_BIND_ADDRESS: &str = "SPECFORGE_BIND_ADDRESS";
const ENV_DATABASE_PATH: &str = "SPECFORGE_DATABASE_PATH";
const ENV_GEMINI_API_KEY: &str = "SPECFORGE_GEMINI_API_KEY";
const ENV_GEMINI_MODEL: &str = "SPECFORGE_GEMINI_MODEL";

/// Compiled defaults
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8000";
const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_AI_TIMEOUT_SECS: u64 = 30;

/// On-disk configuration file shape
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub bind_address: Option<String>,
    pub database_path: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub ai_timeout_secs: Option<u64>,
}

impl TomlConfig {
    /// Load a TOML config file from an explicit path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read config failed ({}): {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse config failed ({}): {}", path.display(), e)))
    }

    /// Load the config file from the default platform locations, if present
    ///
    /// Checks `~/.config/specforge/config.toml`, then `/etc/specforge/config.toml`
    /// on unix. Absence is not an error.
    pub fn load_default() -> Result<Option<Self>> {
        if let Some(path) = dirs::config_dir().map(|d| d.join("specforge").join("config.toml")) {
            if path.exists() {
                debug!("Loading config from {}", path.display());
                return Ok(Some(Self::load(&path)?));
            }
        }

        let system_config = PathBuf::from("/etc/specforge/config.toml");
        if system_config.exists() {
            debug!("Loading config from {}", system_config.display());
            return Ok(Some(Self::load(&system_config)?));
        }

        Ok(None)
    }
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// SQLite database file path
    pub database_path: PathBuf,
    /// Gemini API key (required)
    pub gemini_api_key: String,
    /// Gemini model name
    pub gemini_model: String,
    /// Timeout applied to every model call
    pub ai_timeout_secs: u64,
}

/// Command-line overrides passed into resolution
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_file: Option<PathBuf>,
    pub bind_address: Option<String>,
    pub database_path: Option<PathBuf>,
}

impl ServiceConfig {
    /// Resolve the full service configuration
    pub fn resolve(cli: &CliOverrides) -> Result<Self> {
        let toml_config = match &cli.config_file {
            Some(path) => Some(TomlConfig::load(path)?),
            None => TomlConfig::load_default()?,
        };
        let toml_config = toml_config.unwrap_or_default();

        let bind_address = cli
            .bind_address
            .clone()
            .or_else(|| std::env::var(ENV_BIND_ADDRESS).ok())
            .or_else(|| toml_config.bind_address.clone())
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let database_path = cli
            .database_path
            .clone()
            .or_else(|| std::env::var(ENV_DATABASE_PATH).ok().map(PathBuf::from))
            .or_else(|| toml_config.database_path.clone().map(PathBuf::from))
            .unwrap_or_else(default_database_path);

        let gemini_api_key = resolve_gemini_api_key(&toml_config)?;

        let gemini_model = std::env::var(ENV_GEMINI_MODEL)
            .ok()
            .or_else(|| toml_config.gemini_model.clone())
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        let ai_timeout_secs = toml_config
            .ai_timeout_secs
            .unwrap_or(DEFAULT_AI_TIMEOUT_SECS);

        Ok(Self {
            bind_address,
            database_path,
            gemini_api_key,
            gemini_model,
            ai_timeout_secs,
        })
    }
}

/// Resolve the Gemini API key from ENV then TOML
fn resolve_gemini_api_key(toml_config: &TomlConfig) -> Result<String> {
    if let Ok(key) = std::env::var(ENV_GEMINI_API_KEY) {
        if is_valid_key(&key) {
            info!("Gemini API key loaded from environment variable");
            return Ok(key);
        }
    }

    if let Some(key) = &toml_config.gemini_api_key {
        if is_valid_key(key) {
            info!("Gemini API key loaded from TOML config");
            return Ok(key.clone());
        }
    }

    Err(Error::Config(format!(
        "Gemini API key not configured. Please configure using one of:\n\
         1. Environment: {}=your-key-here\n\
         2. TOML config: ~/.config/specforge/config.toml (gemini_api_key = \"your-key\")",
        ENV_GEMINI_API_KEY
    )))
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// OS-dependent default database path
fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("specforge"))
        .unwrap_or_else(|| PathBuf::from("./specforge_data"))
        .join("specforge.db")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_full_toml_config() {
        let config: TomlConfig = toml::from_str(
            r#"
            bind_address = "0.0.0.0:9000"
            database_path = "/tmp/sf.db"
            gemini_api_key = "abc123"
            gemini_model = "gemini-1.5-pro"
            ai_timeout_secs = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.bind_address.as_deref(), Some("0.0.0.0:9000"));
        assert_eq!(config.database_path.as_deref(), Some("/tmp/sf.db"));
        assert_eq!(config.gemini_api_key.as_deref(), Some("abc123"));
        assert_eq!(config.gemini_model.as_deref(), Some("gemini-1.5-pro"));
        assert_eq!(config.ai_timeout_secs, Some(10));
    }

    #[test]
    fn parses_partial_toml_config() {
        let config: TomlConfig = toml::from_str(r#"gemini_api_key = "abc123""#).unwrap();
        assert!(config.bind_address.is_none());
        assert_eq!(config.gemini_api_key.as_deref(), Some("abc123"));
    }

    #[test]
    fn load_reports_missing_file() {
        let result = TomlConfig::load(Path::new("/nonexistent/specforge.toml"));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "bind_address = \"127.0.0.1:7777\"").unwrap();

        let config = TomlConfig::load(file.path()).unwrap();
        assert_eq!(config.bind_address.as_deref(), Some("127.0.0.1:7777"));
    }

    #[test]
    fn api_key_validation() {
        assert!(is_valid_key("abc"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("   "));
    }
}
