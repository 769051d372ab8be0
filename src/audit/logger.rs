use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use chrono::Utc;

const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024; // 10MB

/// Append-only record of gate decisions
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    /// Create an AuditLogger writing to `path`
    ///
    /// Nothing touches the filesystem until the first entry is written.
    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            log_path: path.as_ref().to_path_buf(),
        }
    }

    /// Log an executed pipeline and the status it finished with
    ///
    /// Command text is written quoted and escaped so every entry stays on
    /// one line.
    pub fn log_execution(
        &self,
        pipeline: &str,
        project_dir: &Path,
        exit_code: i32,
    ) -> std::io::Result<()> {
        let entry = format!("[exit:{}] {:?}", exit_code, pipeline);
        self.append(project_dir, &entry)
    }

    /// Log a pipeline that was refused because of one segment
    pub fn log_denial(
        &self,
        segment: &str,
        pipeline: &str,
        project_dir: &Path,
    ) -> std::io::Result<()> {
        let entry = format!("[DENIED] segment={:?} pipeline={:?}", segment, pipeline);
        self.append(project_dir, &entry)
    }

    fn append(&self, project_dir: &Path, entry: &str) -> std::io::Result<()> {
        // Ensure directory exists
        if let Some(parent) = self.log_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Check and rotate log if needed
        self.rotate_if_needed()?;

        let timestamp = Utc::now().to_rfc3339();
        let user = std::env::var("USER").unwrap_or_else(|_| "unknown".to_string());

        let line = format!(
            "[{}] [{}] [{}] {}\n",
            timestamp,
            user,
            project_dir.display(),
            entry
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)?;

        file.write_all(line.as_bytes())?;
        file.flush()?;

        Ok(())
    }

    /// Rotate log file if it exceeds MAX_LOG_SIZE
    fn rotate_if_needed(&self) -> std::io::Result<()> {
        if !self.log_path.exists() {
            return Ok(());
        }

        let metadata = fs::metadata(&self.log_path)?;
        if metadata.len() > MAX_LOG_SIZE {
            fs::rename(&self.log_path, self.backup_path())?;
        }

        Ok(())
    }

    /// Rotation target: the log's file name with `.1` appended
    fn backup_path(&self) -> PathBuf {
        let mut name = self.log_path.file_name().unwrap_or_default().to_os_string();
        name.push(".1");
        self.log_path.with_file_name(name)
    }

    /// Get the path to the log file
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}
