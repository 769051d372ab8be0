use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::pipeline::DEFAULT_SHELL;

/// Environment variable that overrides the config file location
pub const CONFIG_PATH_ENV: &str = "PIPEGATE_CONFIG";

#[derive(Debug, Error)]
pub enum GateConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Config directory not found")]
    DirectoryNotFound,

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

/// Tool-level configuration, independent of any project's allow list
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct GateConfig {
    #[serde(default)]
    pub shell: ShellConfig,
    #[serde(default)]
    pub audit: AuditConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ShellConfig {
    /// Program that receives the pipeline via `-c`
    #[serde(default = "default_shell_program")]
    pub program: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AuditConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub log_path: Option<PathBuf>,
}

fn default_shell_program() -> String {
    DEFAULT_SHELL.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            program: default_shell_program(),
        }
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_path: None,
        }
    }
}

impl GateConfig {
    /// Get the config directory path: ~/.config/pipegate
    pub fn config_dir() -> Result<PathBuf, GateConfigError> {
        let home = std::env::var("HOME").map_err(|_| GateConfigError::DirectoryNotFound)?;
        Ok(PathBuf::from(home).join(".config").join("pipegate"))
    }

    /// Get the config file path, honoring `PIPEGATE_CONFIG`
    pub fn config_path() -> Result<PathBuf, GateConfigError> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// A missing file yields the defaults. With no home directory and no
    /// override there is nowhere to look, which also yields the defaults.
    pub fn load() -> Result<Self, GateConfigError> {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(GateConfigError::DirectoryNotFound) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self, GateConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config: GateConfig = toml::from_str(&contents)?;

        // Validate config
        config.validate()?;

        Ok(config)
    }

    /// Path of the audit log, if auditing is enabled
    pub fn audit_log_path(&self) -> Result<Option<PathBuf>, GateConfigError> {
        if !self.audit.enabled {
            return Ok(None);
        }

        match &self.audit.log_path {
            Some(path) => Ok(Some(path.clone())),
            None => Ok(Some(Self::config_dir()?.join("history.log"))),
        }
    }

    /// Validate configuration values
    fn validate(&self) -> Result<(), GateConfigError> {
        if self.shell.program.trim().is_empty() {
            return Err(GateConfigError::InvalidValue(
                "shell.program must not be empty".to_string(),
            ));
        }

        if let Some(path) = &self.audit.log_path {
            if path.as_os_str().is_empty() {
                return Err(GateConfigError::InvalidValue(
                    "audit.log_path must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }
}
