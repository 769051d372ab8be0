pub mod executor;
pub mod parser;

pub use executor::{ExecError, ShellExecutor, ShellRunner, DEFAULT_SHELL};
pub use parser::{Pipeline, UsageError};
