pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod gate;
pub mod logging;
pub mod pipeline;
pub mod security;

// Re-export commonly used types for convenience
pub use error::{AppError, AppResult};
pub use gate::{Gate, InputMode, Request};
pub use pipeline::{Pipeline, ShellExecutor, ShellRunner};
pub use security::{is_allowed, AllowSet};
