//! Configuration module for the tearpay CLI.
//!
//! Handles loading configuration from an optional TOML file and applying
//! command line overrides.

pub mod file;

use crate::config::file::FileConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tearpay_core::config::SessionConfig;
use tearpay_sdk::config::{InvoiceServiceConfig, LedgerConfig};
use thiserror::Error;
use url::Url;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Loaded configuration result containing all parts.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub ledger: LedgerConfig,
    pub session: SessionConfig,
    pub clipboard_command: Option<Vec<String>>,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: PathBuf,
    rpc_url_override: Option<Url>,
    invoice_url_override: Option<Url>,
}

impl ConfigLoader {
    /// Create a new config loader.
    pub fn new(
        config_path: impl AsRef<Path>,
        rpc_url_override: Option<Url>,
        invoice_url_override: Option<Url>,
    ) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
            rpc_url_override,
            invoice_url_override,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file, falling back to defaults when it does not exist
    /// 2. Apply CLI overrides
    /// 3. Validate the configuration
    /// 4. Build the loaded configuration
    pub fn load(&self) -> Result<LoadedConfig, ConfigError> {
        let mut file_config = match std::fs::read_to_string(&self.config_path) {
            Ok(content) => toml::from_str::<FileConfig>(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(
                    path = %self.config_path.display(),
                    "Config file not found, using defaults"
                );
                FileConfig::default()
            }
            Err(e) => return Err(e.into()),
        };

        if let Some(url) = &self.rpc_url_override {
            file_config.ledger.rpc_url = url.clone();
        }
        if let Some(url) = &self.invoice_url_override {
            file_config.invoice.service_url = url.clone();
        }

        validate(&file_config)?;

        Ok(build_loaded_config(file_config))
    }
}

fn validate(config: &FileConfig) -> Result<(), ConfigError> {
    for (name, url) in [
        ("ledger.rpc_url", &config.ledger.rpc_url),
        ("invoice.service_url", &config.invoice.service_url),
    ] {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError(format!(
                "{name} must be an http(s) url, got {url}"
            )));
        }
    }
    if config.form.debounce_ms == 0 {
        return Err(ConfigError::ValidationError(
            "form.debounce_ms must be greater than zero".to_string(),
        ));
    }
    if config.form.toast_ms == 0 {
        return Err(ConfigError::ValidationError(
            "form.toast_ms must be greater than zero".to_string(),
        ));
    }
    if config.clipboard.timeout_ms == 0 {
        return Err(ConfigError::ValidationError(
            "clipboard.timeout_ms must be greater than zero".to_string(),
        ));
    }
    if let Some(command) = &config.clipboard.command {
        if command.first().is_none_or(|program| program.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "clipboard.command must name a program".to_string(),
            ));
        }
    }
    Ok(())
}

fn build_loaded_config(file_config: FileConfig) -> LoadedConfig {
    LoadedConfig {
        ledger: LedgerConfig::new(file_config.ledger.rpc_url),
        session: SessionConfig {
            debounce: Duration::from_millis(file_config.form.debounce_ms),
            toast_duration: Duration::from_millis(file_config.form.toast_ms),
            clipboard_timeout: Duration::from_millis(file_config.clipboard.timeout_ms),
            invoice_service: InvoiceServiceConfig::new(file_config.invoice.service_url),
        },
        clipboard_command: file_config.clipboard.command,
    }
}
