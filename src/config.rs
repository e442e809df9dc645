//! Configuration management for the `TripWeaver` application
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings. API credentials
//! live here and are passed explicitly into each client's constructor;
//! there is no process-wide implicit credential state.

use crate::PlannerError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `TripWeaver` application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PlannerConfig {
    /// Tavily web-search configuration
    #[serde(default)]
    pub search: SearchConfig,
    /// Language model configuration
    #[serde(default)]
    pub llm: LlmConfig,
    /// Export configuration
    #[serde(default)]
    pub export: ExportConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tavily search API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Tavily API key
    pub api_key: Option<String>,
    /// Base URL for the search API
    #[serde(default = "default_search_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Number of hotel results to request
    #[serde(default = "default_max_hotels")]
    pub max_hotels: u32,
    /// Number of attraction results to request
    #[serde(default = "default_max_attractions")]
    pub max_attractions: u32,
}

/// Language model API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Groq API key
    pub api_key: Option<String>,
    /// Base URL for the OpenAI-compatible chat completions API
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,
    /// Model identifier
    #[serde(default = "default_llm_model")]
    pub model: String,
    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_seconds: u32,
}

/// Export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory exported files are written to
    #[serde(default = "default_export_dir")]
    pub output_dir: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions
fn default_search_base_url() -> String {
    "https://api.tavily.com/search".to_string()
}

fn default_timeout() -> u32 {
    30
}

fn default_max_hotels() -> u32 {
    5
}

fn default_max_attractions() -> u32 {
    10
}

fn default_llm_base_url() -> String {
    "https://api.groq.com/openai/v1/chat/completions".to_string()
}

fn default_llm_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_llm_timeout() -> u32 {
    120
}

fn default_export_dir() -> String {
    "exports".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_search_base_url(),
            timeout_seconds: default_timeout(),
            max_hotels: default_max_hotels(),
            max_attractions: default_max_attractions(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_llm_base_url(),
            model: default_llm_model(),
            timeout_seconds: default_llm_timeout(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_export_dir(),
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

impl PlannerConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides, e.g. TRIPWEAVER_SEARCH__API_KEY
        builder = builder.add_source(
            Environment::with_prefix("TRIPWEAVER")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: PlannerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripweaver").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        // Keys are optional at load time so that offline commands still work;
        // the clients themselves require them at construction.
        if let Some(api_key) = &self.search.api_key {
            if api_key.trim().is_empty() {
                return Err(PlannerError::config(
                    "Search API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }
        }

        if let Some(api_key) = &self.llm.api_key {
            if api_key.trim().is_empty() {
                return Err(PlannerError::config(
                    "LLM API key cannot be empty if provided. Either remove it or provide a valid key.",
                )
                .into());
            }
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.search.timeout_seconds == 0 || self.search.timeout_seconds > 300 {
            return Err(
                PlannerError::config("Search timeout must be between 1 and 300 seconds").into(),
            );
        }

        if self.llm.timeout_seconds == 0 || self.llm.timeout_seconds > 600 {
            return Err(
                PlannerError::config("LLM timeout must be between 1 and 600 seconds").into(),
            );
        }

        if self.search.max_hotels == 0 || self.search.max_hotels > 20 {
            return Err(PlannerError::config("max_hotels must be between 1 and 20").into());
        }

        if self.search.max_attractions == 0 || self.search.max_attractions > 50 {
            return Err(PlannerError::config("max_attractions must be between 1 and 50").into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(PlannerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Search", &self.search.base_url),
            ("LLM", &self.llm.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(PlannerError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        if self.export.output_dir.trim().is_empty() {
            return Err(PlannerError::config("Export output directory cannot be empty").into());
        }

        Ok(())
    }
}
