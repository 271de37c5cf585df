//! The `Agent` — identity, timers, and the desire/target plumbing.
//!
//! Behavior logic lives in [`behavior`](crate::behavior); the toilet journey
//! in [`toilet`](crate::toilet).  This module only owns the state those two
//! mutate, plus the small invariant-bearing operations on it:
//! `follow_desires` is the single choke point through which
//! `current_target` changes during a toilet journey.

use nursery_core::{AgentId, AgentRng, ClassId, Point2, SimTime, TargetId};

use crate::desire::DesireQueue;
use crate::route::{RouteStep, Waypoint, WaypointRoute};
use crate::state::{Role, ToiletState};
use crate::timing::{BLADDER_STDDEV_SECS, DWELL_STDDEV_SECS};
use crate::{ChillSpot, PrincipalStatus, StaffKind, StaffStatus, StudentStatus};

/// One simulated person.  Created once at scheduler initialization; never
/// destroyed during a run (departing agents are simply walked to the exit).
pub struct Agent {
    pub id: AgentId,
    /// The class the agent currently acts in.  Fixed for students and class
    /// staff; reassigned by rotation for floaters and by supervision for the
    /// principal.
    pub class_id: ClassId,
    pub role: Role,

    /// Where the agent should be walking right now — the single output
    /// consumed by the external movement engine each tick.
    pub current_target: TargetId,
    /// When the current goal is considered fulfilled.
    pub target_end_time: SimTime,
    /// Earliest time the agent may pick a new roaming spot.
    pub fidget_time: SimTime,

    pub toilet_state: ToiletState,
    /// When the bladder next demands attention.
    pub next_toilet_time: SimTime,
    pub bladder_capacity_secs: f64,

    /// End of the current free-time activity (staff free time, student
    /// free-choice rounds, end-of-day lingering).
    pub free_activity_end: SimTime,
    /// Set once the end-of-day wind-down has been armed.
    pub winding_down: bool,

    /// Last position reported by the movement engine.
    pub position: Point2,
    pub desires: DesireQueue,
    pub route: WaypointRoute,
    pub rng: AgentRng,
}

impl Agent {
    /// Construct an agent.  The initial walking target is drawn from
    /// `home_area` with the agent's own RNG, and the bladder timer is armed
    /// around `bladder_capacity_secs` from time zero.
    pub fn new(
        id: AgentId,
        class_id: ClassId,
        role: Role,
        bladder_capacity_secs: f64,
        home_area: &[TargetId],
        global_seed: u64,
    ) -> Self {
        let mut rng = AgentRng::new(global_seed, id);
        let current_target = rng.choose(home_area).copied().unwrap_or(TargetId::INVALID);
        let next_toilet_time =
            SimTime(rng.normal_min0(bladder_capacity_secs, BLADDER_STDDEV_SECS));
        Self {
            id,
            class_id,
            role,
            current_target,
            target_end_time: SimTime::ZERO,
            fidget_time: SimTime::ZERO,
            toilet_state: ToiletState::NotUsing,
            next_toilet_time,
            bladder_capacity_secs,
            free_activity_end: SimTime::ZERO,
            winding_down: false,
            position: Point2::ORIGIN,
            desires: DesireQueue::new(),
            route: WaypointRoute::inactive(),
            rng,
        }
    }

    // ── Bladder ───────────────────────────────────────────────────────────

    /// `true` once the bladder timer has elapsed (and no journey is already
    /// underway).
    #[inline]
    pub fn needs_toilet(&self, now: SimTime) -> bool {
        self.toilet_state == ToiletState::NotUsing && self.next_toilet_time.reached(now)
    }

    /// Re-arm the bladder timer around the agent's capacity.
    pub fn rearm_bladder(&mut self, now: SimTime) {
        let interval = self
            .rng
            .normal_min0(self.bladder_capacity_secs, BLADDER_STDDEV_SECS);
        self.next_toilet_time = now + interval;
    }

    // ── Goal fulfilment ───────────────────────────────────────────────────

    /// `true` once the current goal's end time has elapsed.
    #[inline]
    pub fn is_fulfilled(&self, now: SimTime) -> bool {
        self.target_end_time.reached(now)
    }

    // ── Desires ───────────────────────────────────────────────────────────

    /// Submit a target request.
    #[inline]
    pub fn push_desire(&mut self, priority: u8, target: TargetId, dwell_secs: f64) {
        self.desires.push(priority, target, dwell_secs);
    }

    /// Serve the most urgent desire, if any: adopt its target and arm the
    /// dwell timer around its mean.
    ///
    /// Agents whose journey has just ended (`NotUsing`/`JustEnded`) are
    /// instead pointed at a random spot of `home_area` — the walk back into
    /// class.  An active detour keeps following the agent's real
    /// destination via [`WaypointRoute::retarget`].
    pub fn follow_desires(&mut self, now: SimTime, home_area: &[TargetId]) {
        if let Some(desire) = self.desires.pop() {
            self.current_target = desire.target;
            self.target_end_time =
                now + self.rng.normal_min0(desire.dwell_secs, DWELL_STDDEV_SECS);
        }
        if matches!(self.toilet_state, ToiletState::NotUsing | ToiletState::JustEnded) {
            if let Some(&spot) = self.rng.choose(home_area) {
                self.current_target = spot;
            }
        }
        if self.route.is_active() {
            self.route.retarget(self.current_target);
        }
    }

    // ── Detours ───────────────────────────────────────────────────────────

    /// Begin a detour through `waypoints` toward the current target.
    pub fn begin_route(&mut self, waypoints: &[Waypoint]) {
        self.route.begin(waypoints, self.current_target);
        self.advance_route();
    }

    /// Step the active detour against the agent's reported position,
    /// overriding the walking target while waypoints remain.  Completing
    /// the walk back clears `JustEnded`.
    pub fn advance_route(&mut self) {
        match self.route.advance(self.position) {
            RouteStep::Idle => {}
            RouteStep::Override(target) => self.current_target = target,
            RouteStep::Completed(resume) => {
                self.current_target = resume;
                if self.toilet_state == ToiletState::JustEnded {
                    self.toilet_state = ToiletState::NotUsing;
                }
            }
        }
    }

    // ── Role accessors ────────────────────────────────────────────────────
    //
    // Behavior code reads a copy of the role-specific status, decides, and
    // writes back through these; matching through `&mut self.role` directly
    // would pin the whole agent borrow.

    pub fn student_status(&self) -> Option<StudentStatus> {
        match self.role {
            Role::Student { status } => Some(status),
            _ => None,
        }
    }

    pub fn set_student_status(&mut self, status: StudentStatus) {
        if let Role::Student { status: s } = &mut self.role {
            *s = status;
        }
    }

    pub fn staff_status(&self) -> Option<StaffStatus> {
        match self.role {
            Role::Staff { status, .. } => Some(status),
            _ => None,
        }
    }

    pub fn set_staff_status(&mut self, status: StaffStatus) {
        if let Role::Staff { status: s, .. } = &mut self.role {
            *s = status;
        }
    }

    pub fn staff_kind(&self) -> Option<StaffKind> {
        match self.role {
            Role::Staff { kind, .. } => Some(kind),
            _ => None,
        }
    }

    pub fn principal_status(&self) -> Option<PrincipalStatus> {
        match self.role {
            Role::Principal { status, .. } => Some(status),
            _ => None,
        }
    }

    pub fn set_principal_status(&mut self, status: PrincipalStatus) {
        if let Role::Principal { status: s, .. } = &mut self.role {
            *s = status;
        }
    }

    pub fn supervised_class(&self) -> Option<ClassId> {
        match self.role {
            Role::Principal { supervised, .. } => Some(supervised),
            _ => None,
        }
    }

    pub fn set_supervised(&mut self, class: ClassId) {
        if let Role::Principal { supervised, .. } = &mut self.role {
            *supervised = class;
        }
    }

    pub fn chill_spot(&self) -> Option<ChillSpot> {
        match self.role {
            Role::Staff { chill_spot, .. } | Role::Principal { chill_spot, .. } => chill_spot,
            Role::Student { .. } => None,
        }
    }

    pub fn set_chill_spot(&mut self, spot: ChillSpot) {
        match &mut self.role {
            Role::Staff { chill_spot, .. } | Role::Principal { chill_spot, .. } => {
                *chill_spot = Some(spot)
            }
            Role::Student { .. } => {}
        }
    }
}
