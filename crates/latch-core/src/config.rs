//! Client configuration persistence
//!
//! Saves and loads the endpoint address, request timeout, display language and
//! biometric backend.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::biometric::{BiometricProvider, FprintdProvider, NoBiometrics};
use crate::messages::Locale;

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Configuration directory under ~/.config
const CONFIG_DIR_NAME: &str = "latch";

/// Default authentication endpoint
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/login";

/// Default limit for a password login request
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Authentication endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Password login time limit in seconds (0 waits forever)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Display language
    #[serde(default)]
    pub locale: Locale,

    /// Which biometric provider to use
    #[serde(default)]
    pub biometrics: BiometricBackend,

    /// Where to write diagnostics
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

/// Biometric provider selection (serializable version)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiometricBackend {
    /// No biometric support
    None,
    /// Linux fingerprint daemon
    #[default]
    Fprintd,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            locale: Locale::default(),
            biometrics: BiometricBackend::default(),
            log_file: None,
        }
    }
}

impl BiometricBackend {
    /// Instantiate the selected provider
    pub fn provider(self) -> Arc<dyn BiometricProvider> {
        match self {
            BiometricBackend::None => Arc::new(NoBiometrics),
            BiometricBackend::Fprintd => Arc::new(FprintdProvider::for_current_user()),
        }
    }
}

impl FromStr for BiometricBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(BiometricBackend::None),
            "fprintd" => Ok(BiometricBackend::Fprintd),
            other => Err(format!("unknown biometric backend '{}' (expected none or fprintd)", other)),
        }
    }
}

impl ClientConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        // Try XDG_CONFIG_HOME first, then fall back to the platform default
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_config).join(CONFIG_DIR_NAME);
            return Some(path);
        }

        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME))
    }

    /// Get the full config file path
    pub fn config_file_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default location
    ///
    /// Returns default configuration if file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        match Self::config_file_path() {
            Some(path) => Self::load_or_default(&path),
            None => Self::default(),
        }
    }

    /// Load from `path`, falling back to defaults with a warning
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        Self::load_from(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load config file {:?}: {}", path, e);
            Self::default()
        })
    }

    /// Load from `path`, reporting any failure
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_file = Self::config_file_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&config_file)
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| ConfigError::Io(e.to_string()))?;
            }
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, contents).map_err(|e| ConfigError::Io(e.to_string()))?;

        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// Password login time limit, `None` when disabled
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),
}
