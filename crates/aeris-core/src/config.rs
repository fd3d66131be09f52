use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the weather database
    pub data_dir: PathBuf,

    /// Database file name inside `data_dir`
    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// Session defaults applied at startup
    #[serde(default)]
    pub session: SessionConfig,

    /// UI preferences applied at startup
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// City selected as primary when the process starts
    #[serde(default = "default_primary_city_id")]
    pub primary_city_id: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            primary_city_id: default_primary_city_id(),
        }
    }
}

/// Display language for translated weather text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "en")]
    English,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Show temperatures in Fahrenheit
    #[serde(default)]
    pub use_fahrenheit: bool,

    /// Show wind speed in mph
    #[serde(default)]
    pub use_mph: bool,

    /// Dark theme enabled
    #[serde(default)]
    pub dark_theme: bool,

    #[serde(default)]
    pub language: Language,
}

fn default_database_file() -> String {
    "weather_app.db".to_string()
}

fn default_primary_city_id() -> i64 {
    1
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("aeris");

        Self {
            data_dir,
            database_file: default_database_file(),
            session: SessionConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, creating default if it doesn't exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;

        let config: Config =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        if self.database_file.trim().is_empty() {
            result.add_error("database_file", "Database file name must not be empty");
        } else if self.database_file.contains(['/', '\\']) {
            result.add_error(
                "database_file",
                "Database file name must not contain path separators",
            );
        }

        if self.session.primary_city_id <= 0 {
            result.add_error(
                "session.primary_city_id",
                "Primary city id must be greater than 0",
            );
        }

        if self.data_dir.exists() && !self.data_dir.is_dir() {
            result.add_error(
                "data_dir",
                format!("Path is not a directory: {}", self.data_dir.display()),
            );
        } else if !self.data_dir.exists() {
            result.add_warning(
                "data_dir",
                format!(
                    "Path does not exist yet and will be created: {}",
                    self.data_dir.display()
                ),
            );
        }

        result
    }

    /// Full path of the weather database
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_file)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("aeris");

        Ok(config_dir.join("config.toml"))
    }
}
