use color_eyre::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::script::{Duration, Genre, ScriptMode};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which path the generation service is mounted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointVariant {
    /// `POST /generate`
    #[default]
    Generate,
    /// `POST /api/generate`
    ApiGenerate,
}

impl EndpointVariant {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            EndpointVariant::Generate => "/generate",
            EndpointVariant::ApiGenerate => "/api/generate",
        }
    }
}

/// Generation service connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    pub endpoint: EndpointVariant,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            endpoint: EndpointVariant::Generate,
            timeout_secs: 120,
            connect_timeout_secs: 10,
        }
    }
}

/// Initial form selections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub default_mode: ScriptMode,
    pub default_duration: Duration,
    pub default_genre: Genre,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            default_mode: ScriptMode::Humanize,
            default_duration: Duration::Seconds45,
            default_genre: Genre::Mysterious,
        }
    }
}

/// Log filter used when `RUST_LOG` is not set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from disk or creates default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let config = Config::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents = fs::read_to_string(config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Writes configuration to `config_path`, creating parent directories
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(config_path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Returns the path to the configuration file
    pub fn config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.toml"))
    }

    /// Directory for the log file and credential storage
    pub fn data_dir() -> Result<PathBuf> {
        Ok(project_dirs()?.data_dir().to_path_buf())
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "scriptdesk")
        .ok_or_else(|| color_eyre::eyre::eyre!("Could not determine config directory"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_creates_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[server]\nendpoint = \"api_generate\"\n\n[form]\ndefault_mode = \"generate\"\ndefault_duration = 60\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server.endpoint, EndpointVariant::ApiGenerate);
        assert_eq!(config.server.base_url, "http://localhost:5000");
        assert_eq!(config.form.default_mode, ScriptMode::Generate);
        assert_eq!(config.form.default_duration, Duration::Seconds60);
        assert_eq!(config.form.default_genre, Genre::Mysterious);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_unsupported_duration_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[form]\ndefault_duration = 50\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
