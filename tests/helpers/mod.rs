#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper to create a throwaway project directory with a `.claude` folder
pub fn create_test_project() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let project_path = temp_dir.path().to_path_buf();

    fs::create_dir_all(project_path.join(".claude")).expect("Failed to create .claude dir");

    (temp_dir, project_path)
}

/// Helper to write `.claude/settings.json` with the given allow patterns
pub fn write_shared_settings(project_path: &Path, allow: &[&str]) {
    write_settings(project_path, "settings.json", allow);
}

/// Helper to write `.claude/settings.local.json` with the given allow patterns
pub fn write_local_settings(project_path: &Path, allow: &[&str]) {
    write_settings(project_path, "settings.local.json", allow);
}

fn write_settings(project_path: &Path, file: &str, allow: &[&str]) {
    let doc = serde_json::json!({ "permissions": { "allow": allow } });
    fs::write(project_path.join(".claude").join(file), doc.to_string())
        .expect("Failed to write settings file");
}

/// Helper to write raw text to a settings file
pub fn write_raw_settings(project_path: &Path, file: &str, contents: &str) {
    fs::write(project_path.join(".claude").join(file), contents)
        .expect("Failed to write settings file");
}

/// Run the compiled binary inside `project_path` with an isolated HOME
pub fn run_pipegate(project_path: &Path, home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pipegate"))
        .args(args)
        .current_dir(project_path)
        .env("HOME", home)
        .env_remove("CLAUDE_PROJECT_DIR")
        .env_remove("PIPEGATE_CONFIG")
        .env_remove("PIPEGATE_LOG")
        .output()
        .expect("Failed to run pipegate")
}

/// JSON-encode pipeline segments as the single CLI argument
pub fn json_arg(segments: &[&str]) -> String {
    serde_json::to_string(segments).unwrap()
}
