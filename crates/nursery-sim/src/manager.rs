//! `ClassManager` — the per-tick scheduler.
//!
//! # Tick order
//!
//! Every tick runs the same deterministic sequence:
//!
//! 1. Floating-staff rotation, when the cadence timestamp has been reached.
//! 2. The principal: supervision candidate re-pick, toilet pipeline step,
//!    then behavior.
//! 3. Every class in configured order; within a class every member in
//!    roster order (students, staff, floaters): toilet pipeline step, then
//!    behavior.
//! 4. Each class's event lifecycle, gated on its members' toilet states.
//!
//! Resource mutations happen strictly inside the tick that triggers them,
//! so FIFO queue semantics and head-of-queue promotion are reproducible
//! under a fixed seed.  Nothing blocks: an unavailable resource leaves the
//! requesting agent in a waiting sub-state until a later tick.

use nursery_agent::behavior::{self, BehaviorCtx, ClassPools, SharedCtx};
use nursery_agent::{Agent, PrincipalStatus, Role, StaffKind, StaffStatus, ToiletPipeline, ToiletState};
use nursery_agent::timing::{STAFF_BLADDER_CAPACITY_SECS, STUDENT_BLADDER_CAPACITY_SECS};
use nursery_core::{AgentId, ClassId, Point2, SimRng, SimTime, TargetId};
use nursery_facility::Facility;
use nursery_pool::SeatPool;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::class::Class;
use crate::event::EventState;
use crate::observer::{NoopObserver, SimObserver};
use crate::{SimError, SimResult};

/// Owns the registry of classes and agents and advances the whole facility
/// one tick at a time.
pub struct ClassManager {
    facility: Facility,
    classes: Vec<Class>,
    agents: FxHashMap<AgentId, Agent>,
    /// The principal — exactly one per run, constructed here and nowhere
    /// else.
    principal: Agent,
    /// Visitor seats in the principal's office.
    office: SeatPool,
    toilet: ToiletPipeline,
    /// Next timestamp at which floaters rotate.
    next_rotation_secs: f64,
    rng: SimRng,
}

impl ClassManager {
    /// Build the scheduler from a validated facility.
    ///
    /// Classes are created in configured order, agents get their fixed
    /// class assignments and rotation offsets, and the initial floater
    /// rotation is performed so every floater starts attached to a class.
    pub fn new(facility: Facility) -> SimResult<Self> {
        let seed = facility.config.seed;
        let mut rng = SimRng::new(seed);

        let mut classes = Vec::with_capacity(facility.config.classes.len());
        for site in &facility.config.classes {
            let class_rng = rng.child(site.id.0 as u64);
            classes.push(Class::from_site(site, &facility.catalog, class_rng)?);
        }

        let mut agents = FxHashMap::default();
        for (site, class) in facility.config.classes.iter().zip(&classes) {
            for &id in &site.students {
                agents.insert(
                    id,
                    Agent::new(
                        id,
                        class.id,
                        Role::student(),
                        STUDENT_BLADDER_CAPACITY_SECS,
                        &class.area,
                        seed,
                    ),
                );
            }
            for &id in &site.staff {
                agents.insert(
                    id,
                    Agent::new(
                        id,
                        class.id,
                        Role::staff(StaffKind::Class, 0),
                        STAFF_BLADDER_CAPACITY_SECS,
                        &class.area,
                        seed,
                    ),
                );
            }
        }
        for (index, &id) in facility.config.floaters.iter().enumerate() {
            let offset = index % classes.len();
            let home = &classes[offset];
            agents.insert(
                id,
                Agent::new(
                    id,
                    home.id,
                    Role::staff(StaffKind::Floating, offset),
                    STAFF_BLADDER_CAPACITY_SECS,
                    &home.area,
                    seed,
                ),
            );
        }

        let shared = &facility.config.shared;
        let principal = Agent::new(
            facility.config.principal,
            classes[0].id,
            Role::principal(classes[0].id),
            STAFF_BLADDER_CAPACITY_SECS,
            &[shared.principal_desk],
            seed,
        );
        let office = SeatPool::new(shared.office_seats.clone());
        let toilet = ToiletPipeline::new(&facility.config.toilet);

        let mut manager = Self {
            facility,
            classes,
            agents,
            principal,
            office,
            toilet,
            next_rotation_secs: 0.0,
            rng,
        };
        // Attach every floater to its starting class before the first tick.
        manager.rotate_floaters(&mut NoopObserver)?;
        manager.next_rotation_secs = manager.facility.config.rotation_period_secs;
        Ok(manager)
    }

    // ── External interface ────────────────────────────────────────────────

    /// Record the position reported by the movement engine for one agent.
    pub fn set_position(&mut self, agent: AgentId, position: Point2) -> SimResult<()> {
        if self.principal.id == agent {
            self.principal.position = position;
            return Ok(());
        }
        let entry = self
            .agents
            .get_mut(&agent)
            .ok_or(SimError::AgentNotFound(agent))?;
        entry.position = position;
        Ok(())
    }

    /// The walking target currently assigned to `agent`.
    pub fn target_of(&self, agent: AgentId) -> Option<TargetId> {
        if self.principal.id == agent {
            return Some(self.principal.current_target);
        }
        self.agents.get(&agent).map(|a| a.current_target)
    }

    /// All `(agent, target)` pairs for this tick, sorted by agent id so the
    /// hand-off to the movement engine is reproducible.
    pub fn targets(&self) -> Vec<(AgentId, TargetId)> {
        let mut out: Vec<(AgentId, TargetId)> = self
            .agents
            .values()
            .map(|a| (a.id, a.current_target))
            .chain(std::iter::once((
                self.principal.id,
                self.principal.current_target,
            )))
            .collect();
        out.sort_unstable_by_key(|&(id, _)| id);
        out
    }

    /// `true` once every class has exhausted its schedule.
    pub fn all_finished(&self) -> bool {
        self.classes
            .iter()
            .all(|c| c.event.state == EventState::AllFinished)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    pub fn class(&self, id: ClassId) -> Option<&Class> {
        self.classes.iter().find(|c| c.id == id)
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        if self.principal.id == id {
            return Some(&self.principal);
        }
        self.agents.get(&id)
    }

    pub fn principal(&self) -> &Agent {
        &self.principal
    }

    pub fn toilet(&self) -> &ToiletPipeline {
        &self.toilet
    }

    pub fn office(&self) -> &SeatPool {
        &self.office
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the facility one tick without observer callbacks.
    pub fn step(&mut self, now: SimTime) -> SimResult<()> {
        self.step_with(now, &mut NoopObserver)
    }

    /// Advance the facility one tick.
    pub fn step_with<O: SimObserver>(&mut self, now: SimTime, observer: &mut O) -> SimResult<()> {
        if now.secs() >= self.next_rotation_secs {
            self.rotate_floaters(observer)?;
            self.next_rotation_secs += self.facility.config.rotation_period_secs;
        }

        self.step_principal(now, observer)?;

        // Visits are only received while the principal is actually at the
        // desk (and not mid-journey).
        let principal_in_office = self.principal.principal_status()
            == Some(PrincipalStatus::InOffice)
            && self.principal.toilet_state == ToiletState::NotUsing;

        // Explicit field borrows so the borrow checker sees disjoint access.
        let facility = &self.facility;
        let classes = &mut self.classes;
        let agents = &mut self.agents;
        let office = &mut self.office;
        let toilet = &mut self.toilet;

        for class in classes.iter_mut() {
            let members: Vec<AgentId> = class.step_members().collect();
            let phase = class.phase();

            for id in members {
                let agent = agents.get_mut(&id).ok_or(SimError::AgentNotFound(id))?;

                let before = agent.toilet_state;
                toilet.step(agent, now, &class.area, &class.toilet_route)?;
                if before != agent.toilet_state {
                    observer.on_toilet_transition(id, before, agent.toilet_state);
                }

                let shared = &facility.config.shared;
                let ctx = BehaviorCtx {
                    activity: class.event.activity,
                    area: &class.area,
                    grid: &class.grid,
                    leader_position: class.leader_position,
                    is_leader: id == class.leader,
                    kitchen_route: &class.kitchen_route,
                    shared: SharedCtx {
                        kitchenette: &shared.kitchenette,
                        break_room: &shared.break_room,
                        hangout_break_room: &shared.hangout_break_room,
                        hangout_kitchenette: &shared.hangout_kitchenette,
                        principal_desk: shared.principal_desk,
                        exit: shared.exit,
                        principal_in_office,
                    },
                };
                behavior::update_member(
                    agent,
                    phase,
                    &ctx,
                    ClassPools { seats: &mut class.seats, naps: &mut class.naps },
                    office,
                    now,
                )?;
            }

            let clear = class.members_clear(agents);
            if let Some((from, to)) = class.advance_event(now, clear) {
                info!(
                    class = %class.name,
                    ?from,
                    ?to,
                    activity = %class.event.activity,
                    "event transition"
                );
                observer.on_event_transition(class.id, from, to);
            }
        }

        observer.on_tick_end(now);
        Ok(())
    }

    // ── Principal ─────────────────────────────────────────────────────────

    fn step_principal<O: SimObserver>(
        &mut self,
        now: SimTime,
        observer: &mut O,
    ) -> SimResult<()> {
        // Re-pick the supervision candidate among classes still running.
        let open: Vec<ClassId> = self
            .classes
            .iter()
            .filter(|c| c.event.state != EventState::AllFinished)
            .map(|c| c.id)
            .collect();
        if let Some(&candidate) = self.rng.choose(&open) {
            self.principal.class_id = candidate;
        }

        // While supervising, roam the snapshotted class; otherwise the
        // current candidate.
        let area_class = match self.principal.principal_status() {
            Some(PrincipalStatus::Supervising) => self
                .principal
                .supervised_class()
                .unwrap_or(self.principal.class_id),
            _ => self.principal.class_id,
        };

        let facility = &self.facility;
        let classes = &self.classes;
        let principal = &mut self.principal;
        let toilet = &mut self.toilet;
        let office = &self.office;

        let home = classes
            .iter()
            .find(|c| c.id == area_class)
            .unwrap_or(&classes[0]);

        let before = principal.toilet_state;
        // The class route decides whether the journey ends in JustEnded.
        // The principal never walks the detour itself: update_principal
        // resolves the marker straight to the office desk.
        toilet.step(principal, now, &home.area, &home.toilet_route)?;
        if before != principal.toilet_state {
            observer.on_toilet_transition(principal.id, before, principal.toilet_state);
        }

        let shared = &facility.config.shared;
        let shared_ctx = SharedCtx {
            kitchenette: &shared.kitchenette,
            break_room: &shared.break_room,
            hangout_break_room: &shared.hangout_break_room,
            hangout_kitchenette: &shared.hangout_kitchenette,
            principal_desk: shared.principal_desk,
            exit: shared.exit,
            principal_in_office: false,
        };
        behavior::update_principal(principal, &home.area, &shared_ctx, office.is_empty(), now);
        Ok(())
    }

    // ── Floating staff ────────────────────────────────────────────────────

    /// Advance every floater one class along its rotation and re-attach it.
    ///
    /// Offsets are fixed at construction and stagger the floaters so they
    /// cycle through the classes without repeats.
    fn rotate_floaters<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let floaters = &self.facility.config.floaters;
        let classes = &mut self.classes;
        let agents = &mut self.agents;
        let office = &mut self.office;
        let count = classes.len();

        for class in classes.iter_mut() {
            class.floaters.clear();
        }

        for &id in floaters {
            let Some(agent) = agents.get_mut(&id) else { continue };
            let Role::Staff { rotation_offset, .. } = &mut agent.role else { continue };
            *rotation_offset = (*rotation_offset + 1) % count;
            let class = &mut classes[*rotation_offset];

            // A rotation interrupts whatever the floater was doing; an
            // office visit must hand its seat back.
            if agent.staff_status() == Some(StaffStatus::Talking)
                && office.slot_of(id).is_some()
            {
                office.free(id)?;
            }
            agent.class_id = class.id;
            agent.set_staff_status(StaffStatus::Free);
            class.floaters.push(id);
            debug!(agent = %id, class = %class.name, "floater rotated");
            observer.on_rotation(id, class.id);
        }
        Ok(())
    }
}
