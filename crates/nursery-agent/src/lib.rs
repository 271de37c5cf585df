//! `nursery-agent` — the agents themselves.
//!
//! Everything that happens *inside* one agent lives here: the desire queue
//! through which every destination change flows, the toilet journey state
//! machine, waypoint detours, and the role-specific behaviors invoked by the
//! class event lifecycle in `nursery-sim`.
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`state`]    | `ToiletState`, role status enums, `Role`                |
//! | [`desire`]   | `DesireQueue` — stable priority queue of target requests|
//! | [`route`]    | `WaypointRoute` — toilet/kitchenette detours            |
//! | [`agent`]    | `Agent` — per-agent state and timers                    |
//! | [`behavior`] | Phase × activity × role behavior dispatch               |
//! | [`toilet`]   | `ToiletPipeline` — queue → cubicle → sink chain         |
//! | [`timing`]   | Sampled-duration parameters for all of the above        |

pub mod agent;
pub mod behavior;
pub mod desire;
pub mod route;
pub mod state;
pub mod timing;
pub mod toilet;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use agent::Agent;
pub use behavior::{BehaviorCtx, ClassPools, Phase, SharedCtx};
pub use desire::{Desire, DesireQueue};
pub use route::{RouteStep, Waypoint, WaypointRoute};
pub use state::{ChillSpot, PrincipalStatus, Role, StaffKind, StaffStatus, StudentStatus, ToiletState};
pub use toilet::ToiletPipeline;
