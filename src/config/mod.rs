pub mod gate;
pub mod settings;

pub use gate::{AuditConfig, GateConfig, GateConfigError, ShellConfig};
pub use settings::{load_allow_list, load_allow_list_from, resolve_project_dir, SettingsError};
