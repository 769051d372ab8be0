//! Loading of `permissions.allow` lists from Claude settings files.
//!
//! Two files are consulted under the project root, in this order:
//! `.claude/settings.json` (shared) and `.claude/settings.local.json`
//! (local override). A missing file contributes nothing. A file that exists
//! but cannot be read or parsed aborts the load.

use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::security::AllowSet;

/// Settings directory under the project root
pub const CLAUDE_DIR: &str = ".claude";

/// Settings files in priority order
pub const SETTINGS_FILES: &[&str] = &["settings.json", "settings.local.json"];

/// Environment variable that names the project root
pub const PROJECT_DIR_ENV: &str = "CLAUDE_PROJECT_DIR";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not determine project directory: {0}")]
    NoProjectDirectory(std::io::Error),
}

/// The subset of a settings document this tool reads
#[derive(Debug, Default, Deserialize)]
struct SettingsDocument {
    #[serde(default)]
    permissions: Option<Permissions>,
}

#[derive(Debug, Default, Deserialize)]
struct Permissions {
    #[serde(default)]
    allow: Option<Vec<String>>,
}

impl SettingsDocument {
    fn into_allow(self) -> Vec<String> {
        self.permissions
            .and_then(|permissions| permissions.allow)
            .unwrap_or_default()
    }
}

/// Resolve the project root
///
/// An explicit directory wins, then `CLAUDE_PROJECT_DIR`, then the current
/// working directory.
pub fn resolve_project_dir(explicit: Option<&Path>) -> Result<PathBuf, SettingsError> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }

    if let Ok(dir) = std::env::var(PROJECT_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }

    std::env::current_dir().map_err(SettingsError::NoProjectDirectory)
}

/// Settings file paths for a project, in priority order
pub fn settings_paths(project_dir: &Path) -> Vec<PathBuf> {
    SETTINGS_FILES
        .iter()
        .map(|file| project_dir.join(CLAUDE_DIR).join(file))
        .collect()
}

/// Load and merge the allow lists of a project's settings files
pub fn load_allow_list(project_dir: &Path) -> Result<AllowSet, SettingsError> {
    load_allow_list_from(&settings_paths(project_dir))
}

/// Load and merge the allow lists of the given settings files
///
/// Patterns are concatenated in file order and deduplicated, keeping the
/// first occurrence.
pub fn load_allow_list_from<P: AsRef<Path>>(paths: &[P]) -> Result<AllowSet, SettingsError> {
    let mut allow_set = AllowSet::new();

    for path in paths {
        let path = path.as_ref();
        let Some(patterns) = read_allow(path)? else {
            tracing::debug!(path = %path.display(), "settings file not found, skipping");
            continue;
        };

        tracing::debug!(path = %path.display(), count = patterns.len(), "loaded allow patterns");
        allow_set.extend(patterns);
    }

    Ok(allow_set)
}

/// Read one settings file; `None` when it does not exist
fn read_allow(path: &Path) -> Result<Option<Vec<String>>, SettingsError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let document: SettingsDocument =
        serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(Some(document.into_allow()))
}
