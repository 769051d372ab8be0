use clap::Parser;
use std::path::PathBuf;

use crate::gate::{InputMode, Request};

#[derive(Parser, Debug)]
#[command(name = "pipegate")]
#[command(version)]
#[command(about = "Run a shell pipeline only if every segment is on the project's allow list")]
#[command(after_help = r#"Examples:
  pipegate '["git status", "grep modified"]'
  pipegate --split git log --oneline '|' head -5"#)]
pub struct Cli {
    /// Read shell tokens split on `|` instead of a single JSON array
    #[arg(long)]
    pub split: bool,

    /// Print each segment's verdict and the pipeline without running it
    #[arg(long)]
    pub dry_run: bool,

    /// Print the merged allow list and exit
    #[arg(long, conflicts_with_all = ["dry_run", "args"])]
    pub list: bool,

    /// Project root holding `.claude/settings*.json` (default: $CLAUDE_PROJECT_DIR or cwd)
    #[arg(long, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// JSON array of segments, or shell tokens with --split
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    pub fn mode(&self) -> InputMode {
        if self.split {
            InputMode::Split
        } else {
            InputMode::Json
        }
    }

    pub fn request(&self) -> Request {
        Request::new(self.mode(), self.args.clone())
    }
}
