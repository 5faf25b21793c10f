//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;
use latch_core::{BiometricBackend, ClientConfig, Locale};

/// Log file name under the local data directory
const LOG_FILE_NAME: &str = "latch.log";

#[derive(Parser, Debug)]
#[command(name = "latch")]
#[command(about = "Terminal login client with password and fingerprint sign-in", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ~/.config/latch/config.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Authentication endpoint URL
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Password login time limit in seconds (0 waits forever)
    #[arg(short, long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Display language (en, pt-BR)
    #[arg(short, long)]
    pub locale: Option<Locale>,

    /// Biometric backend (none, fprintd)
    #[arg(short, long)]
    pub biometrics: Option<BiometricBackend>,

    /// Write diagnostics to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Persist the effective configuration before starting
    #[arg(long)]
    pub save_config: bool,
}

impl Cli {
    /// Load the configuration file and apply command-line overrides
    pub fn resolve_config(&self) -> ClientConfig {
        let mut config = match &self.config {
            Some(path) => ClientConfig::load_or_default(path),
            None => ClientConfig::load(),
        };

        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_secs = timeout;
        }
        if let Some(locale) = self.locale {
            config.locale = locale;
        }
        if let Some(biometrics) = self.biometrics {
            config.biometrics = biometrics;
        }
        if let Some(log_file) = &self.log_file {
            config.log_file = Some(log_file.clone());
        }

        config
    }

    /// Configuration file in use: `--config`, else the default location
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config.clone().or_else(ClientConfig::config_file_path)
    }

    /// Where to write logs: the configured file, else the local data directory
    pub fn log_path(&self, config: &ClientConfig) -> Option<PathBuf> {
        config
            .log_file
            .clone()
            .or_else(|| dirs::data_local_dir().map(|d| d.join("latch").join(LOG_FILE_NAME)))
    }
}
