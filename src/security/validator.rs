use thiserror::Error;

use crate::pipeline::Pipeline;
use crate::security::allowlist::AllowSet;
use crate::security::matcher::{find_match, Match};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Not allowed: {0}")]
    NotAllowed(String),
}

/// Verdict for one segment of a pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentVerdict {
    pub segment: String,
    pub matched: Option<Match>,
}

impl SegmentVerdict {
    pub fn is_allowed(&self) -> bool {
        self.matched.is_some()
    }
}

/// Checks every segment of a pipeline against an allow set
pub struct PipelineValidator<'a> {
    allow_set: &'a AllowSet,
}

impl<'a> PipelineValidator<'a> {
    pub fn new(allow_set: &'a AllowSet) -> Self {
        Self { allow_set }
    }

    /// Validate segments in order, stopping at the first denial
    ///
    /// The error carries the literal text of the denied segment. Segments
    /// after it are never checked.
    pub fn validate(&self, pipeline: &Pipeline) -> Result<(), ValidationError> {
        for segment in pipeline.segments() {
            if find_match(segment, self.allow_set).is_none() {
                tracing::info!(%segment, "segment denied");
                return Err(ValidationError::NotAllowed(segment.clone()));
            }
        }

        Ok(())
    }

    /// Report a verdict for every segment without stopping early
    pub fn check_all(&self, pipeline: &Pipeline) -> Vec<SegmentVerdict> {
        pipeline
            .segments()
            .iter()
            .map(|segment| SegmentVerdict {
                segment: segment.clone(),
                matched: find_match(segment, self.allow_set),
            })
            .collect()
    }
}
