pub mod allowlist;
pub mod matcher;
pub mod validator;

pub use allowlist::{AllowSet, Pattern};
pub use matcher::{find_match, is_allowed, Match};
pub use validator::{PipelineValidator, SegmentVerdict, ValidationError};
