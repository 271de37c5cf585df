//! Framework error type.
//!
//! Sub-crates define their own error enums and either convert into
//! `CoreError` via `From` impls or wrap it as one variant.  Both patterns
//! are acceptable; prefer whichever keeps error sites clean.

use thiserror::Error;

use crate::{AgentId, ClassId, TargetId};

/// The top-level error type for `nursery-core` and a common base for
/// sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("class {0} not found")]
    ClassNotFound(ClassId),

    #[error("target {0} not in the facility catalog")]
    TargetNotFound(TargetId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `nursery-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
