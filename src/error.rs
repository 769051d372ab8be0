use thiserror::Error;

use crate::config::gate::GateConfigError;
use crate::config::settings::SettingsError;
use crate::pipeline::executor::ExecError;
use crate::pipeline::parser::UsageError;
use crate::security::validator::ValidationError;

/// Top-level error that wraps all module-specific errors
///
/// Every failure of an invocation travels up to `main` as one of these; the
/// variant decides the process exit status.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Usage(#[from] UsageError),

    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("Configuration error: {0}")]
    Config(#[from] GateConfigError),

    #[error("{0}")]
    Denied(#[from] ValidationError),

    #[error("{0}")]
    Exec(#[from] ExecError),
}

impl AppError {
    /// Process exit status for this error
    ///
    /// A pipeline that exited nonzero forwards its own status; everything
    /// else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Exec(e) => e.exit_code(),
            _ => 1,
        }
    }

    /// Whether the failing child has already reported on its own stderr
    pub fn is_reported_by_child(&self) -> bool {
        matches!(self, AppError::Exec(ExecError::Exited(_)))
    }
}

/// Result type for application-level operations
pub type AppResult<T> = std::result::Result<T, AppError>;
