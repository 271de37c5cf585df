//! `nursery-core` — foundational types for the `nursery_sim` scheduling core.
//!
//! This crate is a dependency of every other `nursery-*` crate.  It
//! intentionally has no `nursery-*` dependencies and minimal external ones
//! (only `rand`/`rand_distr` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `ClassId`, `TargetId`                      |
//! | [`point`]   | `Point2`, Euclidean distance, arrival tolerance       |
//! | [`time`]    | `SimTime`, `StepClock`                                |
//! | [`rng`]     | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`error`]   | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod point;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, ClassId, TargetId};
pub use point::{Point2, ARRIVAL_TOLERANCE};
pub use rng::{AgentRng, SimRng};
pub use time::{SimTime, StepClock};
