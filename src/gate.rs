//! The gate: parse a proposed pipeline, check it against the project's allow
//! list and run it only when every segment is admitted.
//!
//! Each step is exposed on its own so callers and tests can stop at any
//! point. Nothing here exits the process; failures come back as
//! [`AppError`](crate::error::AppError) and `main` turns them into a status.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::audit::AuditLogger;
use crate::config::settings::load_allow_list;
use crate::error::AppResult;
use crate::pipeline::{Pipeline, ShellRunner, UsageError};
use crate::security::{AllowSet, PipelineValidator, SegmentVerdict, ValidationError};

/// How invocation arguments describe the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// One argument holding a JSON array of segments
    #[default]
    Json,
    /// Shell tokens separated by literal `|` tokens
    Split,
}

/// One proposed invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub mode: InputMode,
    pub args: Vec<String>,
}

impl Request {
    pub fn new(mode: InputMode, args: Vec<String>) -> Self {
        Self { mode, args }
    }

    /// Turn the invocation arguments into a pipeline
    pub fn parse(&self) -> Result<Pipeline, UsageError> {
        match self.mode {
            InputMode::Json => Pipeline::from_json_args(&self.args),
            InputMode::Split => Pipeline::from_tokens(&self.args),
        }
    }
}

/// Per-segment verdicts for a pipeline that was checked but not run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DryRunReport {
    pub command_text: String,
    pub verdicts: Vec<SegmentVerdict>,
}

impl DryRunReport {
    pub fn all_allowed(&self) -> bool {
        self.verdicts.iter().all(SegmentVerdict::is_allowed)
    }

    /// The denial a real run would have stopped at
    pub fn first_denial(&self) -> Option<ValidationError> {
        self.verdicts
            .iter()
            .find(|verdict| !verdict.is_allowed())
            .map(|verdict| ValidationError::NotAllowed(verdict.segment.clone()))
    }
}

impl fmt::Display for DryRunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for verdict in &self.verdicts {
            match &verdict.matched {
                Some(m) => writeln!(f, "allowed  {}  [{}]", verdict.segment, m.pattern)?,
                None => writeln!(f, "denied   {}", verdict.segment)?,
            }
        }
        write!(f, "pipeline: {}", self.command_text)
    }
}

pub struct Gate<R: ShellRunner> {
    project_dir: PathBuf,
    runner: R,
    audit: Option<AuditLogger>,
}

impl<R: ShellRunner> Gate<R> {
    pub fn new<P: AsRef<Path>>(project_dir: P, runner: R) -> Self {
        Self {
            project_dir: project_dir.as_ref().to_path_buf(),
            runner,
            audit: None,
        }
    }

    /// Record decisions to an audit log
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Load the merged allow list for the project
    pub fn load_policy(&self) -> AppResult<AllowSet> {
        let allow_set = load_allow_list(&self.project_dir)?;
        tracing::debug!(
            project = %self.project_dir.display(),
            patterns = allow_set.len(),
            shell_patterns = allow_set.shell_patterns().count(),
            "allow list loaded"
        );
        Ok(allow_set)
    }

    /// Validate every segment, failing at the first denial
    pub fn check(&self, pipeline: &Pipeline, allow_set: &AllowSet) -> AppResult<()> {
        let result = PipelineValidator::new(allow_set).validate(pipeline);

        if let Err(ValidationError::NotAllowed(segment)) = &result {
            self.audit_denial(segment, pipeline);
        }

        Ok(result?)
    }

    /// Run an already validated pipeline
    pub fn execute(&self, pipeline: &Pipeline) -> AppResult<()> {
        let result = self.runner.run(pipeline.command_text());

        let exit_code = match &result {
            Ok(()) => 0,
            Err(e) => e.exit_code(),
        };
        self.audit_execution(pipeline, exit_code);

        Ok(result?)
    }

    /// Parse, load policy, validate and execute
    ///
    /// Usage errors are reported before any settings file is read.
    pub fn run(&self, request: &Request) -> AppResult<()> {
        let pipeline = request.parse()?;
        self.run_pipeline(&pipeline)
    }

    /// Load policy, validate and execute an already parsed pipeline
    pub fn run_pipeline(&self, pipeline: &Pipeline) -> AppResult<()> {
        let allow_set = self.load_policy()?;
        self.check(pipeline, &allow_set)?;
        self.execute(pipeline)
    }

    /// Parse, load policy and report every segment's verdict without running
    pub fn dry_run(&self, request: &Request) -> AppResult<DryRunReport> {
        let pipeline = request.parse()?;
        self.report(&pipeline)
    }

    /// Report every segment's verdict for an already parsed pipeline
    pub fn report(&self, pipeline: &Pipeline) -> AppResult<DryRunReport> {
        let allow_set = self.load_policy()?;

        Ok(DryRunReport {
            command_text: pipeline.command_text().to_string(),
            verdicts: PipelineValidator::new(&allow_set).check_all(pipeline),
        })
    }

    fn audit_denial(&self, segment: &str, pipeline: &Pipeline) {
        let Some(logger) = &self.audit else {
            return;
        };
        if let Err(e) = logger.log_denial(segment, pipeline.command_text(), &self.project_dir) {
            tracing::warn!(path = %logger.log_path().display(), error = %e, "failed to write audit log");
        }
    }

    fn audit_execution(&self, pipeline: &Pipeline, exit_code: i32) {
        let Some(logger) = &self.audit else {
            return;
        };
        if let Err(e) = logger.log_execution(pipeline.command_text(), &self.project_dir, exit_code)
        {
            tracing::warn!(path = %logger.log_path().display(), error = %e, "failed to write audit log");
        }
    }
}
