//! Configuration file parsing for the server.
//!
//! Loads settings from TOML files including bind address, input limits,
//! the placeholder text shown on the landing page, and the model location.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default text pre-filled in the landing page form
pub const PLACEHOLDER_TEXT: &str = "LABA, such as vilanterol, one of the active ingredients in BREO ELLIPTA, increase the risk of asthma-related death. Currently available data are inadequate to determine whether concurrent use of inhaled corticosteroids or other long-term asthma control drugs mitigates the increased risk of asthma-related death from LABA. Available data from controlled clinical trials suggest that LABA increase the risk of asthma-related hospitalization in pediatric and adolescent patients. Data from a large placebo-controlled US trial that compared the safety of another LABA (salmeterol) or placebo added to usual asthma therapy showed an increase in asthma-related deaths in subjects receiving salmeterol.  [See Warnings and Precautions (5.1).]";

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// Field present but unusable
    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid {
        /// Offending field
        field: String,
        /// Why it was rejected
        reason: String,
    },
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 8080)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Longest accepted input text, in characters
    #[serde(default = "default_max_text_length")]
    pub max_text_length: usize,

    /// Text pre-filled in the landing page form
    #[serde(default = "default_placeholder_text")]
    pub placeholder_text: String,

    /// NER model settings
    #[serde(default)]
    pub model: ModelConfig,
}

/// NER model configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model name (e.g., "drug")
    #[serde(default = "default_model_name")]
    pub name: String,

    /// Directory containing the model files
    #[serde(default = "default_model_path")]
    pub path: PathBuf,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    8080
}

/// Default input limit: 20k characters
fn default_max_text_length() -> usize {
    20_000
}

fn default_placeholder_text() -> String {
    PLACEHOLDER_TEXT.to_string()
}

fn default_model_name() -> String {
    "drug".to_string()
}

fn default_model_path() -> PathBuf {
    PathBuf::from("./models/drug/")
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            path: default_model_path(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            max_text_length: default_max_text_length(),
            placeholder_text: default_placeholder_text(),
            model: ModelConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: ServerConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::MissingField("bind_address".to_string()));
        }
        if self.model.name.trim().is_empty() {
            return Err(ConfigError::MissingField("model.name".to_string()));
        }
        if self.max_text_length == 0 {
            return Err(ConfigError::Invalid {
                field: "max_text_length".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Create a default configuration for testing
    ///
    /// Uses the stock model location with a tighter input limit.
    pub fn default_test_config() -> Self {
        ServerConfig {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 8080,
            max_text_length: 1_000,
            placeholder_text: default_placeholder_text(),
            model: ModelConfig::default(),
        }
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
