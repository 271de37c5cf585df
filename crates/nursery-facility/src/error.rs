use nursery_core::{AgentId, ClassId, TargetId};
use thiserror::Error;

/// Errors raised while loading or validating facility configuration.
///
/// All of these are fatal: a scenario that references unknown locations or
/// carries inconsistent rosters must not start.
#[derive(Debug, Error)]
pub enum FacilityError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("{context} references target {target} missing from the catalog")]
    UnknownTarget { target: TargetId, context: String },

    #[error("class {0} defined more than once")]
    DuplicateClass(ClassId),

    #[error("agent {0} appears in more than one roster")]
    DuplicateAgent(AgentId),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

pub type FacilityResult<T> = Result<T, FacilityError>;
