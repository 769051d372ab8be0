use thiserror::Error;

/// Usage message for the default JSON-array convention
pub const JSON_USAGE: &str = r#"Usage: pipegate '["cmd1", "cmd2", ...]'"#;

/// Usage message for the `--split` token convention
pub const SPLIT_USAGE: &str = "Usage: pipegate --split <cmd1> | <cmd2> | ...";

/// Errors caused by malformed invocation arguments
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("{}", JSON_USAGE)]
    WrongArgumentCount,

    #[error("{}", SPLIT_USAGE)]
    MissingTokens,

    #[error("Invalid JSON array format")]
    InvalidJson,

    #[error("Pipeline must contain at least one command")]
    EmptyPipeline,

    #[error("Pipeline segment {0} is empty")]
    EmptySegment(usize),
}

/// An ordered, non-empty list of command segments and the text to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    segments: Vec<String>,
    command_text: String,
}

impl Pipeline {
    /// Build a pipeline from segments, joining them with ` | `
    pub fn from_segments<I, S>(segments: I) -> Result<Self, UsageError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        check_segments(&segments)?;

        let command_text = segments.join(" | ");
        Ok(Self {
            segments,
            command_text,
        })
    }

    /// Parse the default invocation: exactly one argument holding a JSON array
    /// of segment strings
    pub fn from_json_args(args: &[String]) -> Result<Self, UsageError> {
        let [arg] = args else {
            return Err(UsageError::WrongArgumentCount);
        };

        let segments: Vec<String> =
            serde_json::from_str(arg).map_err(|_| UsageError::InvalidJson)?;

        Self::from_segments(segments)
    }

    /// Parse the `--split` invocation: shell tokens joined by single spaces
    /// and cut on `|`
    ///
    /// The joined text is executed verbatim, so spacing inside tokens survives.
    pub fn from_tokens(tokens: &[String]) -> Result<Self, UsageError> {
        if tokens.is_empty() {
            return Err(UsageError::MissingTokens);
        }

        let command_text = tokens.join(" ");
        let segments: Vec<String> = command_text
            .split('|')
            .map(|segment| segment.trim().to_string())
            .collect();
        check_segments(&segments)?;

        Ok(Self {
            segments,
            command_text,
        })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The exact text handed to the shell
    pub fn command_text(&self) -> &str {
        &self.command_text
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

fn check_segments(segments: &[String]) -> Result<(), UsageError> {
    if segments.is_empty() {
        return Err(UsageError::EmptyPipeline);
    }

    if let Some(index) = segments.iter().position(|s| s.trim().is_empty()) {
        return Err(UsageError::EmptySegment(index + 1));
    }

    Ok(())
}
