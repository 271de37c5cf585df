use nursery_core::AgentId;
use nursery_facility::FacilityError;
use nursery_pool::PoolError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("agent {0} not registered with the scheduler")]
    AgentNotFound(AgentId),

    /// A pool contract violation — a scheduling-logic defect.  The run must
    /// abort rather than continue with corrupted pool state.
    #[error("pool contract violation: {0}")]
    Pool(#[from] PoolError),

    #[error(transparent)]
    Facility(#[from] FacilityError),
}

pub type SimResult<T> = Result<T, SimError>;
