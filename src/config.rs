//! Configuration management for commit2act
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::backend::UserRole;
use crate::constants::{CONFIG_GENERATED, MAX_REQUEST_TIMEOUT_SECONDS};
use crate::editor::validity::{Co2Pattern, ValidationRules};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub identity: IdentityConfig,
    pub validation: ValidationConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// GraphQL API configuration
///
/// These values correspond to the deployment parameters of the hosted backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend type, currently only "graphql"
    pub backend_type: String,
    /// GraphQL endpoint URL
    pub endpoint: String,
    /// GraphQL API id (informational)
    pub api_id: String,
    /// Environment variable holding the API key, sent as `x-api-key`
    pub api_key_env: String,
    /// Environment variable holding the user's auth token
    pub auth_token_env: String,
    /// Per-request timeout in seconds
    pub request_timeout_seconds: u64,
}

/// Signed-in session
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IdentityConfig {
    /// Identity pool the session belongs to
    pub user_pool_id: String,
    /// Id of the signed-in user; absent means unauthenticated
    pub user_id: Option<i64>,
    /// Display name
    pub name: String,
    /// "admin" or "standard"
    pub role: UserRole,
}

/// Form validation rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// "strict" or "legacy"
    pub co2_pattern: Co2Pattern,
    /// Accept empty validation labels
    pub allow_empty_labels: bool,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Screen shown on startup: "dashboard" or "actions"
    pub default_screen: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging to file
    pub enabled: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            backend_type: "graphql".to_string(),
            endpoint: String::new(),
            api_id: String::new(),
            api_key_env: "COMMIT2ACT_API_KEY".to_string(),
            auth_token_env: "COMMIT2ACT_AUTH_TOKEN".to_string(),
            request_timeout_seconds: 30,
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            co2_pattern: Co2Pattern::Strict,
            allow_empty_labels: false,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_screen: "dashboard".to_string(),
        }
    }
}

impl ValidationConfig {
    pub fn rules(&self) -> ValidationRules {
        ValidationRules {
            co2_pattern: self.co2_pattern,
            allow_empty_labels: self.allow_empty_labels,
        }
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("commit2act.toml");
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("commit2act").join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.api.backend_type != "graphql" {
            anyhow::bail!("unsupported backend_type '{}'", self.api.backend_type);
        }

        if !self.api.endpoint.is_empty()
            && !(self.api.endpoint.starts_with("https://") || self.api.endpoint.starts_with("http://"))
        {
            anyhow::bail!("endpoint must be an http(s) URL, got '{}'", self.api.endpoint);
        }

        if self.api.request_timeout_seconds == 0 || self.api.request_timeout_seconds > MAX_REQUEST_TIMEOUT_SECONDS {
            anyhow::bail!(
                "request_timeout_seconds must be between 1 and {}, got {}",
                MAX_REQUEST_TIMEOUT_SECONDS,
                self.api.request_timeout_seconds
            );
        }

        if let Some(user_id) = self.identity.user_id {
            if user_id <= 0 {
                anyhow::bail!("identity.user_id must be positive, got {}", user_id);
            }
        }

        let valid_screens = ["dashboard", "actions"];
        if !valid_screens.contains(&self.ui.default_screen.as_str()) {
            anyhow::bail!(
                "default_screen must be one of {}, got '{}'",
                valid_screens.join(", "),
                self.ui.default_screen
            );
        }

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# commit2act Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("commit2act"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
