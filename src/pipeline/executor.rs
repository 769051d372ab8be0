use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use thiserror::Error;

/// Shell used when no other program is configured
pub const DEFAULT_SHELL: &str = "/bin/bash";

/// Errors produced while running an admitted pipeline
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Failed to spawn {shell}: {source}")]
    Spawn {
        shell: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Pipeline exited with status {0}")]
    Exited(i32),

    #[error("Pipeline was terminated without an exit status")]
    Terminated,
}

impl ExecError {
    /// Numeric status the gate should exit with
    pub fn exit_code(&self) -> i32 {
        match self {
            ExecError::Exited(code) => *code,
            ExecError::Spawn { .. } | ExecError::Terminated => 1,
        }
    }
}

/// Runs a full pipeline command line
///
/// The real implementation hands the text to a shell; tests substitute a
/// recorder.
pub trait ShellRunner {
    fn run(&self, command_text: &str) -> Result<(), ExecError>;
}

/// Runs pipelines as `<shell> -c <text>` with inherited stdio
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: PathBuf,
}

impl ShellExecutor {
    /// Create an executor for the given shell program
    pub fn new<P: AsRef<Path>>(shell: P) -> Self {
        Self {
            shell: shell.as_ref().to_path_buf(),
        }
    }

    fn process_status(status: ExitStatus) -> Result<(), ExecError> {
        if status.success() {
            return Ok(());
        }

        match status.code() {
            Some(code) => Err(ExecError::Exited(code)),
            None => Err(ExecError::Terminated),
        }
    }
}

impl Default for ShellExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

impl ShellRunner for ShellExecutor {
    fn run(&self, command_text: &str) -> Result<(), ExecError> {
        tracing::debug!(shell = %self.shell.display(), command_text, "spawning pipeline");

        // stdin, stdout and stderr are inherited by default for status()
        let status = Command::new(&self.shell)
            .arg("-c")
            .arg(command_text)
            .status()
            .map_err(|source| ExecError::Spawn {
                shell: self.shell.display().to_string(),
                source,
            })?;

        tracing::debug!(?status, "pipeline finished");
        Self::process_status(status)
    }
}
