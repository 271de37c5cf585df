//! `WaypointRoute` — short detours through fixed intermediate targets.
//!
//! Classes on the far side of the building cannot walk straight to the
//! toilet or the kitchenette; they thread through one or two doorway
//! waypoints first.  A route overrides the agent's walking target with the
//! next pending waypoint until the agent's reported position comes within
//! [`ARRIVAL_TOLERANCE`](nursery_core::ARRIVAL_TOLERANCE) of it, then moves
//! on; once all waypoints are consumed the original destination is restored.

use std::collections::VecDeque;

use nursery_core::{Point2, TargetId};

/// One intermediate stop: the catalog target and its floor position.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Waypoint {
    pub target: TargetId,
    pub position: Point2,
}

/// What the route wants the agent to do this tick.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum RouteStep {
    /// No route in progress.
    Idle,
    /// Keep walking toward this waypoint.
    Override(TargetId),
    /// All waypoints consumed — resume walking to the stored destination.
    Completed(TargetId),
}

/// An in-progress detour.  Inactive by default.
#[derive(Debug, Default)]
pub struct WaypointRoute {
    pending: VecDeque<Waypoint>,
    /// The real destination restored once the detour is done.
    resume: TargetId,
    active: bool,
}

impl WaypointRoute {
    /// A route with nothing to do.
    pub fn inactive() -> Self {
        Self::default()
    }

    /// Start a detour through `waypoints` (in walking order) toward
    /// `resume`.  An empty waypoint list yields an inactive route — the
    /// agent walks straight to `resume`.
    pub fn begin(&mut self, waypoints: &[Waypoint], resume: TargetId) {
        self.pending = waypoints.iter().copied().collect();
        self.resume = resume;
        self.active = !self.pending.is_empty();
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Replace the destination restored on completion.  Called whenever the
    /// pipeline re-targets the agent mid-detour (queue ranks shift every
    /// tick).
    pub fn retarget(&mut self, resume: TargetId) {
        self.resume = resume;
    }

    /// Advance against the agent's current position.
    pub fn advance(&mut self, position: Point2) -> RouteStep {
        if !self.active {
            return RouteStep::Idle;
        }
        // `active` implies at least one pending waypoint.
        let front = self.pending[0];
        if position.reached(front.position) {
            self.pending.pop_front();
            match self.pending.front() {
                Some(next) => RouteStep::Override(next.target),
                None => {
                    self.active = false;
                    RouteStep::Completed(self.resume)
                }
            }
        } else {
            RouteStep::Override(front.target)
        }
    }
}
