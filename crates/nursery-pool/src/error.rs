use nursery_core::AgentId;
use thiserror::Error;

/// Contract violations on pool operations.
///
/// Every variant is a scheduling-logic defect, not a recoverable condition:
/// callers must gate `assign` on availability and only `free` what they hold.
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("cannot assign agent {agent}: all {capacity} slots are occupied")]
    Exhausted { agent: AgentId, capacity: usize },

    #[error("agent {agent} holds no slot in this pool")]
    NotHeld { agent: AgentId },

    #[error("cannot enqueue agent {agent}: queue is full ({capacity} positions)")]
    QueueFull { agent: AgentId, capacity: usize },
}

pub type PoolResult<T> = Result<T, PoolError>;
