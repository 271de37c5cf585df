//! `Class` — one class group: roster, pools, grids, and the current event.

use nursery_agent::behavior::Phase;
use nursery_agent::route::Waypoint;
use nursery_agent::Agent;
use nursery_core::{AgentId, ClassId, SimRng, SimTime, TargetId};
use nursery_facility::{AreaGrid, ClassSchedule, ClassSite, TargetCatalog};
use nursery_pool::SeatPool;
use rustc_hash::FxHashMap;

use crate::event::{ClassEvent, EventState};
use crate::SimResult;

/// A class group and everything it owns.
pub struct Class {
    pub id: ClassId,
    pub name: String,
    pub schedule: ClassSchedule,

    pub students: Vec<AgentId>,
    pub staff: Vec<AgentId>,
    /// Floating staff currently rotated into this class.
    pub floaters: Vec<AgentId>,
    /// The lesson leader (the first rostered staff member).
    pub leader: AgentId,

    pub event: ClassEvent,
    pub seats: SeatPool,
    pub naps: SeatPool,

    pub grid: AreaGrid,
    /// Cached usable cells of `grid` — the roaming candidate set.
    pub area: Vec<TargetId>,
    pub leader_position: TargetId,

    /// Waypoints toward the toilet entrance (walked in reverse coming back).
    pub toilet_route: Vec<Waypoint>,
    /// Waypoints toward the kitchenette.
    pub kitchen_route: Vec<Waypoint>,

    /// Event-timing RNG stream, derived from the run seed per class.
    pub(crate) rng: SimRng,
}

impl Class {
    /// Build a class from its validated site definition, resolving waypoint
    /// coordinates against the catalog.
    pub fn from_site(site: &ClassSite, catalog: &TargetCatalog, rng: SimRng) -> SimResult<Self> {
        let first = site.schedule.get(0).ok_or_else(|| {
            nursery_facility::FacilityError::Invalid(format!(
                "class {} has an empty schedule",
                site.id
            ))
        })?;
        Ok(Self {
            id: site.id,
            name: site.name.clone(),
            schedule: site.schedule.clone(),
            students: site.students.clone(),
            staff: site.staff.clone(),
            floaters: Vec::new(),
            leader: site.staff[0],
            event: ClassEvent::new(first),
            seats: SeatPool::new(site.chairs.clone()),
            naps: SeatPool::new(site.nap_spots.clone()),
            grid: site.area.clone(),
            area: site.area.usable_vec(),
            leader_position: site.leader_position,
            toilet_route: resolve_route(&site.toilet_route, catalog)?,
            kitchen_route: resolve_route(&site.kitchen_route, catalog)?,
            rng,
        })
    }

    // ── Membership ────────────────────────────────────────────────────────

    /// Members stepped each tick: students, then permanent staff, then the
    /// floaters currently rotated in.  This order is the deterministic
    /// iteration order the resource pools rely on.
    pub fn step_members(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.students
            .iter()
            .chain(&self.staff)
            .chain(&self.floaters)
            .copied()
    }

    /// Members whose toilet state gates the event lifecycle (floaters come
    /// and go and do not hold the class back).
    pub fn gate_members(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.students.iter().chain(&self.staff).copied()
    }

    /// The toilet gate: `true` iff no gating member is mid-journey.
    pub fn members_clear(&self, agents: &FxHashMap<AgentId, Agent>) -> bool {
        self.gate_members()
            .all(|id| agents.get(&id).is_none_or(|a| !a.toilet_state.is_mid_journey()))
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Advance the event lifecycle by at most one transition.
    pub fn advance_event(
        &mut self,
        now: SimTime,
        members_clear: bool,
    ) -> Option<(EventState, EventState)> {
        self.event
            .advance(now, members_clear, &self.schedule, &mut self.rng)
    }

    /// The behavior phase members run under the current event state.
    pub fn phase(&self) -> Phase {
        match self.event.state {
            EventState::Preparing => Phase::Prepare,
            EventState::InProgress => Phase::Main,
            EventState::CleanUp => Phase::CleanUp,
            EventState::AllFinished => Phase::End,
            EventState::YetToStart | EventState::Finished => Phase::Idle,
        }
    }
}

fn resolve_route(targets: &[TargetId], catalog: &TargetCatalog) -> SimResult<Vec<Waypoint>> {
    targets
        .iter()
        .map(|&target| {
            Ok(Waypoint {
                target,
                position: catalog.position(target)?,
            })
        })
        .collect()
}
