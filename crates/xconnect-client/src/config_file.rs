//! Provider configuration file support.
//!
//! Loads and validates the provider configuration from a TOML file.
//! Default location: /etc/xconnect/provider.toml
//!
//! ```toml
//! [api]
//! base_url = "https://api.megaport.com"
//! request_timeout_secs = 60
//!
//! [lifecycle]
//! delete_ports = false
//! provisioning_timeout_secs = 900
//! provisioning_poll_interval_secs = 30
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use xconnect_common::ConfigError;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/xconnect/provider.toml";

/// Environment variable overriding `api.base_url`.
pub const ENV_API_URL: &str = "XCONNECT_API_URL";

/// Environment variable overriding `lifecycle.delete_ports`.
pub const ENV_DELETE_PORTS: &str = "XCONNECT_DELETE_PORTS";

/// Remote API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the provisioning API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Lifecycle policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Hard-delete ports instead of cancelling them at contract end
    #[serde(default)]
    pub delete_ports: bool,

    /// Upper bound on the wait for a new port to be provisioned, in seconds
    #[serde(default = "default_provisioning_timeout")]
    pub provisioning_timeout_secs: u64,

    /// Interval between provisioning status polls, in seconds
    #[serde(default = "default_poll_interval")]
    pub provisioning_poll_interval_secs: u64,
}

/// Complete provider configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Remote API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Lifecycle policy configuration
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
}

fn default_base_url() -> String {
    "https://api.megaport.com".to_string()
}

fn default_request_timeout() -> u64 {
    60
}

fn default_provisioning_timeout() -> u64 {
    900
}

fn default_poll_interval() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            delete_ports: false,
            provisioning_timeout_secs: default_provisioning_timeout(),
            provisioning_poll_interval_secs: default_poll_interval(),
        }
    }
}

impl ProviderConfig {
    /// Parses configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Loads configuration from file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(content) => {
                let config = Self::from_toml_str(&content)?;
                info!("Loaded provider configuration from {}", path.display());
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    "Config file {} not found, using defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Io {
                path: path.display().to_string(),
                source: e,
            }),
        }
    }

    /// Loads from `path`, applies environment overrides and validates the
    /// result.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Like [`load_from`](Self::load_from) with overrides taken from `lookup`.
    pub fn load_with<F>(path: impl AsRef<Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::load_or_default(path)?;
        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides from an arbitrary key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api.base_url = url;
        }

        if let Some(value) = lookup(ENV_DELETE_PORTS) {
            self.lifecycle.delete_ports = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => {
                    return Err(ConfigError::invalid(
                        ENV_DELETE_PORTS,
                        format!("expected a boolean, got '{}'", other),
                    ))
                }
            };
        }

        Ok(())
    }

    /// Saves configuration to file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Per-request timeout as Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.request_timeout_secs)
    }

    /// Provisioning wait bound as Duration.
    pub fn provisioning_timeout(&self) -> Duration {
        Duration::from_secs(self.lifecycle.provisioning_timeout_secs)
    }

    /// Provisioning poll interval as Duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.lifecycle.provisioning_poll_interval_secs)
    }

    /// Validates configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api.base_url.starts_with("http://") || self.api.base_url.starts_with("https://"))
        {
            return Err(ConfigError::invalid(
                "api.base_url",
                "must start with http:// or https://",
            ));
        }

        if self.api.request_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "api.request_timeout_secs",
                "must be > 0",
            ));
        }

        if self.lifecycle.provisioning_timeout_secs == 0 {
            return Err(ConfigError::invalid(
                "lifecycle.provisioning_timeout_secs",
                "must be > 0",
            ));
        }

        if self.lifecycle.provisioning_poll_interval_secs == 0
            || self.lifecycle.provisioning_poll_interval_secs
                > self.lifecycle.provisioning_timeout_secs
        {
            return Err(ConfigError::invalid(
                "lifecycle.provisioning_poll_interval_secs",
                "must be > 0 and not exceed provisioning_timeout_secs",
            ));
        }

        Ok(())
    }
}
