//! Layered configuration: defaults, an optional file, then `SCHEMAGEN__*`
//! environment variables.

use std::path::{Path, PathBuf};

use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::typegen::Language;

/// Application configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Target SQLite database
    pub database: DatabaseConfig,
    /// Generated declaration files
    pub output: OutputConfig,
    /// Log level, format and optional file
    pub logging: LoggingConfig,
}

/// Where and how the schema is applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path
    pub path: String,
    /// Delete the file before applying the schema
    pub recreate: bool,
    /// Insert the sample records after the tables are created
    pub seed_sample_data: bool,
}

/// Declaration file targets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Module name written in each file header; must match the file name
    pub module_name: String,
    /// Elm output file
    pub elm_path: Option<String>,
    /// Haskell output file
    pub haskell_path: Option<String>,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter level
    pub level: String,
    /// Rolling JSON log file
    pub file_path: Option<String>,
    /// Console format
    pub format: String, // "json" or "text"
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                path: "backend/db.db".to_string(),
                recreate: true,
                seed_sample_data: false,
            },
            output: OutputConfig {
                module_name: "DataDefs".to_string(),
                elm_path: Some("frontend/src/DataDefs.elm".to_string()),
                haskell_path: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
                format: "text".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from multiple sources with precedence.
    ///
    /// `path` replaces the optional `schemagen.*` file in the working directory.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let file = path.map_or_else(
            || File::with_name("schemagen").required(false),
            |p| File::from(p).required(true),
        );

        let config = Config::builder()
            // Start with default values
            .add_source(Config::try_from(&Self::default())?)
            .add_source(file)
            // SCHEMAGEN__OUTPUT__ELM_PATH=...
            .add_source(Environment::with_prefix("SCHEMAGEN").separator("__"))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| anyhow::anyhow!("Failed to deserialize configuration: {}", e))?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.database.path.trim().is_empty() {
            return Err(anyhow::anyhow!("database.path cannot be empty"));
        }

        let module = &self.output.module_name;
        let valid_segment = |segment: &str| {
            segment.chars().next().is_some_and(char::is_uppercase)
                && segment.chars().all(|c| c.is_alphanumeric() || c == '_')
        };
        if !module.split('.').all(valid_segment) {
            return Err(anyhow::anyhow!(
                "Invalid module name: {}. Every dot-separated segment must start with an uppercase letter",
                module
            ));
        }

        for (key, path) in [("output.elm_path", &self.output.elm_path), ("output.haskell_path", &self.output.haskell_path)] {
            if path.as_deref().is_some_and(|p| p.trim().is_empty()) {
                return Err(anyhow::anyhow!("{} cannot be empty when set", key));
            }
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level,
                valid_levels
            ));
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format: {}. Must be one of: {:?}",
                self.logging.format,
                valid_formats
            ));
        }

        Ok(())
    }

    /// Configured output file for a language, if any
    #[must_use]
    pub fn output_path(&self, language: Language) -> Option<PathBuf> {
        let path = match language {
            Language::Elm => self.output.elm_path.as_ref(),
            Language::Haskell => self.output.haskell_path.as_ref(),
        };
        path.map(PathBuf::from)
    }

    /// Get log level from environment or config
    pub fn get_log_level(&self) -> String {
        std::env::var("RUST_LOG").unwrap_or_else(|_| self.logging.level.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.database.path, "backend/db.db");
        assert_eq!(config.output.module_name, "DataDefs");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_validation() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let mut config = AppConfig::default();
        config.output.module_name = "dataDef".to_string();
        assert!(config.validate().is_err());
    }
}
