//! Role behaviors: what each agent does in each phase of its class's event.
//!
//! The scheduler maps its event lifecycle onto a [`Phase`] and calls
//! [`update_member`] once per member per tick (the principal goes through
//! [`update_principal`] instead).  Dispatch is an exhaustive `match` over
//! `(phase, activity, role)` — nothing falls through silently.
//!
//! # The common roaming pattern
//!
//! Almost every behavior is a variation of one shape: on first entry into a
//! status, pick a target from a candidate set and arm a randomized fidget
//! timer; on later ticks, once the timer has elapsed, re-pick with a small
//! per-tick probability, optionally restricted to grid cells adjacent to
//! the current spot.  [`enter_roam`] and [`fidget_roam`] implement the two
//! halves.

use nursery_core::{AgentId, SimTime, TargetId};
use nursery_facility::{ActivityType, AreaGrid, Connectivity};
use nursery_pool::{PoolResult, SeatPool};

use crate::agent::Agent;
use crate::route::Waypoint;
use crate::state::{ChillSpot, PrincipalStatus, Role, StaffKind, StaffStatus, StudentStatus, ToiletState};
use crate::timing::{
    NormalParams, FIDGET_DEFAULT, FIDGET_REPICK_PROBABILITY, PRINCIPAL_CHILL, PRINCIPAL_OFFICE,
    PRINCIPAL_SUPERVISE, STAFF_BREAK, STAFF_CHILL, STAFF_LESSON_ENTRY_FIDGET, STAFF_LESSON_FIDGET,
    STAFF_OFFICE_VISIT, STAFF_PREP_TEACHING, STUDENT_FREE_CHOICE, STUDENT_LINGER,
};

// ── Phase ─────────────────────────────────────────────────────────────────────

/// The slice of the class event lifecycle a member behavior runs under.
///
/// `Idle` covers the lifecycle states with no member behavior (before the
/// first event starts and the one-tick gap between events); the bladder
/// trigger and detour bookkeeping still run there.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Phase {
    Prepare,
    Main,
    CleanUp,
    End,
    Idle,
}

// ── Contexts ──────────────────────────────────────────────────────────────────

/// Facility-wide locations and flags shared by every behavior call.
pub struct SharedCtx<'a> {
    pub kitchenette: &'a [TargetId],
    pub break_room: &'a [TargetId],
    pub hangout_break_room: &'a [TargetId],
    pub hangout_kitchenette: &'a [TargetId],
    pub principal_desk: TargetId,
    pub exit: TargetId,
    /// Whether the principal is at its desk and receiving visitors.
    pub principal_in_office: bool,
}

impl SharedCtx<'_> {
    fn hangout(&self, spot: ChillSpot) -> &[TargetId] {
        match spot {
            ChillSpot::BreakRoom => self.hangout_break_room,
            ChillSpot::Kitchenette => self.hangout_kitchenette,
        }
    }
}

/// Per-class context for one behavior call.
pub struct BehaviorCtx<'a> {
    pub activity: ActivityType,
    /// Usable cells of the class area — the default roaming candidate set.
    pub area: &'a [TargetId],
    pub grid: &'a AreaGrid,
    pub leader_position: TargetId,
    /// `true` when the agent being stepped is the class's lesson leader.
    pub is_leader: bool,
    /// Waypoints toward the kitchenette (empty for adjacent classes).
    pub kitchen_route: &'a [Waypoint],
    pub shared: SharedCtx<'a>,
}

/// The class's own resource pools, borrowed mutably for one member step.
pub struct ClassPools<'a> {
    pub seats: &'a mut SeatPool,
    pub naps: &'a mut SeatPool,
}

// ── Entry points ──────────────────────────────────────────────────────────────

/// Step one class member (student or staff) for this tick.
///
/// Runs the bladder trigger, skips behavior while the agent is mid-toilet
/// (advancing its detour when applicable), then dispatches on
/// `(phase, activity, role)`.
pub fn update_member(
    agent: &mut Agent,
    phase: Phase,
    ctx: &BehaviorCtx<'_>,
    pools: ClassPools<'_>,
    office: &mut SeatPool,
    now: SimTime,
) -> PoolResult<()> {
    if agent.needs_toilet(now) {
        agent.toilet_state = ToiletState::WantToGo;
        agent.rearm_bladder(now);
    }
    if agent.toilet_state.is_mid_journey() {
        if matches!(
            agent.toilet_state,
            ToiletState::InQueue | ToiletState::InCubicle | ToiletState::JustEnded
        ) {
            agent.advance_route();
        }
        return Ok(());
    }

    match agent.role {
        Role::Student { .. } => student_update(agent, phase, ctx, pools, now),
        Role::Staff { .. } => staff_update(agent, phase, ctx, office, now),
        // The principal is stepped by the scheduler via `update_principal`.
        Role::Principal { .. } => Ok(()),
    }
}

/// Step the principal for this tick.
///
/// `supervised_area` is the walkable area of the class currently being
/// supervised (or considered for supervision); `office_empty` reports
/// whether any visitor still holds an office seat.
pub fn update_principal(
    agent: &mut Agent,
    supervised_area: &[TargetId],
    shared: &SharedCtx<'_>,
    office_empty: bool,
    now: SimTime,
) {
    if agent.needs_toilet(now) {
        agent.toilet_state = ToiletState::WantToGo;
        agent.rearm_bladder(now);
    }
    // JustEnded is a one-tick marker here: the principal returns straight
    // to its desk rather than walking a class detour.
    if agent.toilet_state == ToiletState::JustEnded {
        agent.current_target = shared.principal_desk;
        agent.toilet_state = ToiletState::NotUsing;
    }
    if agent.toilet_state.is_mid_journey() {
        return;
    }

    if agent.principal_status() == Some(PrincipalStatus::Free) {
        const CHOICES: [PrincipalStatus; 3] = [
            PrincipalStatus::InOffice,
            PrincipalStatus::Supervising,
            PrincipalStatus::Chilling,
        ];
        match agent.rng.choose(&CHOICES).copied() {
            Some(PrincipalStatus::InOffice) => {
                agent.set_principal_status(PrincipalStatus::InOffice);
                agent.current_target = shared.principal_desk;
                agent.free_activity_end = now + PRINCIPAL_OFFICE.sample(&mut agent.rng);
            }
            Some(PrincipalStatus::Supervising) => {
                // Snapshot the class under consideration for this episode.
                let class = agent.class_id;
                agent.set_supervised(class);
                agent.set_principal_status(PrincipalStatus::Supervising);
                enter_roam(agent, supervised_area, FIDGET_DEFAULT, now);
                agent.free_activity_end = now + PRINCIPAL_SUPERVISE.sample(&mut agent.rng);
            }
            _ => {
                let spot = pick_chill_spot(agent);
                agent.set_principal_status(PrincipalStatus::Chilling);
                enter_roam(agent, shared.hangout(spot), FIDGET_DEFAULT, now);
                agent.free_activity_end = now + PRINCIPAL_CHILL.sample(&mut agent.rng);
            }
        }
    }

    if agent.free_activity_end.reached(now) {
        if agent.principal_status() == Some(PrincipalStatus::InOffice) && !office_empty {
            // Visitors are still seated; keep hosting.
            return;
        }
        agent.set_principal_status(PrincipalStatus::Free);
    } else if agent.principal_status() == Some(PrincipalStatus::Chilling) {
        if let Some(spot) = agent.chill_spot() {
            fidget_roam(agent, shared.hangout(spot), None, FIDGET_DEFAULT, now);
        }
    } else if agent.principal_status() == Some(PrincipalStatus::Supervising) {
        fidget_roam(agent, supervised_area, None, FIDGET_DEFAULT, now);
    }
}

// ── Student behaviors ─────────────────────────────────────────────────────────

fn student_update(
    agent: &mut Agent,
    phase: Phase,
    ctx: &BehaviorCtx<'_>,
    pools: ClassPools<'_>,
    now: SimTime,
) -> PoolResult<()> {
    match (phase, ctx.activity) {
        // Lessons happen gathered around the leader.
        (Phase::Prepare, ActivityType::Lesson) => {
            student_near_leader(agent, ctx, StudentStatus::Preparing, now);
            Ok(())
        }
        (Phase::Main, ActivityType::Lesson) => {
            student_near_leader(agent, ctx, StudentStatus::Learning, now);
            Ok(())
        }
        (Phase::CleanUp, ActivityType::Lesson) => {
            student_roam(agent, ctx, StudentStatus::CleaningUp, now);
            Ok(())
        }

        (Phase::Prepare, ActivityType::Meal) => student_prepare_meal(agent, pools, now),
        (Phase::Main, ActivityType::Meal) => student_do_meal(agent, pools),
        (Phase::CleanUp, ActivityType::Meal) => student_clean_up_meal(agent, ctx, pools, now),

        (Phase::Prepare, ActivityType::Nap) => {
            student_roam(agent, ctx, StudentStatus::Preparing, now);
            Ok(())
        }
        (Phase::Main, ActivityType::Nap) => student_do_nap(agent, pools),
        (Phase::CleanUp, ActivityType::Nap) => student_clean_up_nap(agent, ctx, pools, now),

        // Nothing to set up before free choice.
        (Phase::Prepare, ActivityType::FreeChoice) => Ok(()),
        (Phase::Main, ActivityType::FreeChoice) => student_free_choice(agent, ctx, pools, now),
        (Phase::CleanUp, ActivityType::FreeChoice) => {
            student_clean_up_free_choice(agent, ctx, pools, now)
        }

        (Phase::End, _) => {
            student_end_of_day(agent, ctx, now);
            Ok(())
        }
        (Phase::Idle, _) => Ok(()),
    }
}

/// Gather in the cells around the leader's position.
fn student_near_leader(
    agent: &mut Agent,
    ctx: &BehaviorCtx<'_>,
    status: StudentStatus,
    now: SimTime,
) {
    let near = ctx.grid.neighbors(ctx.leader_position, Connectivity::Eight);
    let area: &[TargetId] = if near.is_empty() { ctx.area } else { &near };
    if agent.student_status() != Some(status) {
        agent.set_student_status(status);
        enter_roam(agent, area, FIDGET_DEFAULT, now);
    } else {
        fidget_roam(agent, area, Some(ctx.grid), FIDGET_DEFAULT, now);
    }
}

/// Roam anywhere in the class area.
fn student_roam(agent: &mut Agent, ctx: &BehaviorCtx<'_>, status: StudentStatus, now: SimTime) {
    if agent.student_status() != Some(status) {
        agent.set_student_status(status);
        enter_roam(agent, ctx.area, FIDGET_DEFAULT, now);
    } else {
        fidget_roam(agent, ctx.area, Some(ctx.grid), FIDGET_DEFAULT, now);
    }
}

fn student_prepare_meal(
    agent: &mut Agent,
    pools: ClassPools<'_>,
    now: SimTime,
) -> PoolResult<()> {
    if agent.student_status() != Some(StudentStatus::Preparing) {
        // Hands get washed before eating: queue up for the toilet first.
        agent.set_student_status(StudentStatus::Preparing);
        agent.toilet_state = ToiletState::WantToGo;
        agent.rearm_bladder(now);
    } else {
        // Back from washing up: wait at the assigned table seat.
        let seat = pools.seats.assign(agent.id, &mut agent.rng)?;
        agent.current_target = seat;
    }
    Ok(())
}

fn student_do_meal(agent: &mut Agent, pools: ClassPools<'_>) -> PoolResult<()> {
    if agent.student_status() != Some(StudentStatus::Eating) {
        agent.set_student_status(StudentStatus::Eating);
        let seat = pools.seats.assign(agent.id, &mut agent.rng)?;
        agent.current_target = seat;
    }
    Ok(())
}

fn student_clean_up_meal(
    agent: &mut Agent,
    ctx: &BehaviorCtx<'_>,
    pools: ClassPools<'_>,
    now: SimTime,
) -> PoolResult<()> {
    if agent.student_status() != Some(StudentStatus::CleaningUp) {
        agent.set_student_status(StudentStatus::CleaningUp);
        // Hands washed again after eating; the seat goes back to the pool.
        agent.toilet_state = ToiletState::WantToGo;
        agent.rearm_bladder(now);
        free_if_held(pools.seats, agent.id)?;
    } else {
        fidget_roam(agent, ctx.area, Some(ctx.grid), FIDGET_DEFAULT, now);
    }
    Ok(())
}

fn student_do_nap(agent: &mut Agent, pools: ClassPools<'_>) -> PoolResult<()> {
    // Re-asserted every tick so an agent back from the toilet walks to its
    // mattress again; the pool assignment is idempotent.
    agent.set_student_status(StudentStatus::Napping);
    let spot = pools.naps.assign(agent.id, &mut agent.rng)?;
    agent.current_target = spot;
    Ok(())
}

fn student_clean_up_nap(
    agent: &mut Agent,
    ctx: &BehaviorCtx<'_>,
    pools: ClassPools<'_>,
    now: SimTime,
) -> PoolResult<()> {
    if agent.student_status() != Some(StudentStatus::CleaningUp) {
        // Held unless the entire nap was spent in the toilet pipeline.
        free_if_held(pools.naps, agent.id)?;
    }
    student_roam(agent, ctx, StudentStatus::CleaningUp, now);
    Ok(())
}

fn student_free_choice(
    agent: &mut Agent,
    ctx: &BehaviorCtx<'_>,
    pools: ClassPools<'_>,
    now: SimTime,
) -> PoolResult<()> {
    if agent.student_status() == Some(StudentStatus::Free) {
        // Alternate between seated learning and unstructured roaming.
        if agent.rng.gen_bool(0.5) {
            let seat = pools.seats.assign(agent.id, &mut agent.rng)?;
            agent.current_target = seat;
            agent.set_student_status(StudentStatus::Learning);
        } else {
            if let Some(&spot) = agent.rng.choose(ctx.area) {
                agent.current_target = spot;
            }
            agent.set_student_status(StudentStatus::Others);
        }
        agent.free_activity_end = now + STUDENT_FREE_CHOICE.sample(&mut agent.rng);
    }
    if now > agent.free_activity_end {
        if agent.student_status() == Some(StudentStatus::Learning) {
            pools.seats.free(agent.id)?;
        }
        agent.set_student_status(StudentStatus::Free);
    }
    Ok(())
}

fn student_clean_up_free_choice(
    agent: &mut Agent,
    ctx: &BehaviorCtx<'_>,
    pools: ClassPools<'_>,
    now: SimTime,
) -> PoolResult<()> {
    if agent.student_status() == Some(StudentStatus::Learning) {
        pools.seats.free(agent.id)?;
    }
    student_roam(agent, ctx, StudentStatus::CleaningUp, now);
    Ok(())
}

fn student_end_of_day(agent: &mut Agent, ctx: &BehaviorCtx<'_>, now: SimTime) {
    if !agent.winding_down {
        agent.free_activity_end = now + STUDENT_LINGER.sample(&mut agent.rng);
        agent.winding_down = true;
    }
    if agent.free_activity_end.reached(now) {
        agent.current_target = ctx.shared.exit;
    } else {
        student_roam(agent, ctx, StudentStatus::Free, now);
    }
}

// ── Staff behaviors ───────────────────────────────────────────────────────────

fn staff_update(
    agent: &mut Agent,
    phase: Phase,
    ctx: &BehaviorCtx<'_>,
    office: &mut SeatPool,
    now: SimTime,
) -> PoolResult<()> {
    match (phase, ctx.activity) {
        // Lesson material comes from the break room.
        (Phase::Prepare, ActivityType::Lesson) => {
            staff_settle(agent, ctx.shared.break_room, StaffStatus::Preparing, now);
            Ok(())
        }
        (Phase::Main, ActivityType::Lesson) => {
            staff_do_lesson(agent, ctx, now);
            Ok(())
        }
        (Phase::CleanUp, ActivityType::Lesson) => {
            // The leader keeps the class; everyone else returns material.
            if !ctx.is_leader {
                staff_settle(agent, ctx.shared.break_room, StaffStatus::CleaningUp, now);
            }
            Ok(())
        }

        (Phase::Prepare, ActivityType::Meal) => {
            staff_kitchen_trip(agent, ctx, StaffStatus::Preparing, now);
            Ok(())
        }
        (Phase::Main, ActivityType::Meal) => {
            staff_monitor_near_leader(agent, ctx, now);
            Ok(())
        }
        (Phase::CleanUp, ActivityType::Meal) => {
            staff_kitchen_trip(agent, ctx, StaffStatus::CleaningUp, now);
            Ok(())
        }

        // Nap setup is just keeping an eye on the class.
        (Phase::Prepare, ActivityType::Nap) => {
            staff_watch_class(agent, ctx, StaffStatus::Preparing, now);
            Ok(())
        }
        // While the children sleep, staff time is their own.
        (Phase::Main, ActivityType::Nap) => staff_free_time(agent, ctx, office, now),
        (Phase::CleanUp, ActivityType::Nap) => {
            if agent.staff_status() != Some(StaffStatus::CleaningUp) {
                if agent.staff_status() == Some(StaffStatus::Talking) {
                    office.free(agent.id)?;
                }
                agent.set_staff_status(StaffStatus::CleaningUp);
            }
            Ok(())
        }

        // Free choice runs under staff supervision of the class area.
        (Phase::Prepare, ActivityType::FreeChoice) => {
            staff_watch_class(agent, ctx, StaffStatus::Preparing, now);
            Ok(())
        }
        (Phase::Main, ActivityType::FreeChoice) => {
            staff_watch_class(agent, ctx, StaffStatus::Teaching, now);
            Ok(())
        }
        (Phase::CleanUp, ActivityType::FreeChoice) => {
            staff_watch_class(agent, ctx, StaffStatus::CleaningUp, now);
            Ok(())
        }

        (Phase::End, _) => {
            if !agent.winding_down {
                agent.set_staff_status(StaffStatus::Free);
                agent.winding_down = true;
            }
            staff_free_time(agent, ctx, office, now)
        }
        (Phase::Idle, _) => Ok(()),
    }
}

/// First-entry settle: pick a spot in `area` once and stay.
fn staff_settle(agent: &mut Agent, area: &[TargetId], status: StaffStatus, now: SimTime) {
    if agent.staff_status() != Some(status) {
        agent.set_staff_status(status);
        enter_roam(agent, area, FIDGET_DEFAULT, now);
    }
}

fn staff_do_lesson(agent: &mut Agent, ctx: &BehaviorCtx<'_>, now: SimTime) {
    if agent.staff_status() != Some(StaffStatus::Teaching) {
        if ctx.is_leader {
            // The leader holds the pedagogical position for the whole block.
            agent.current_target = ctx.leader_position;
        } else {
            enter_roam(agent, ctx.area, STAFF_LESSON_ENTRY_FIDGET, now);
        }
        agent.set_staff_status(StaffStatus::Teaching);
    } else if !ctx.is_leader {
        fidget_roam(agent, ctx.area, Some(ctx.grid), STAFF_LESSON_FIDGET, now);
    }
}

/// Walk to the kitchenette, threading the class's waypoints when it has
/// some.
fn staff_kitchen_trip(agent: &mut Agent, ctx: &BehaviorCtx<'_>, status: StaffStatus, now: SimTime) {
    if agent.staff_status() != Some(status) {
        agent.set_staff_status(status);
        enter_roam(agent, ctx.shared.kitchenette, FIDGET_DEFAULT, now);
        agent.begin_route(ctx.kitchen_route);
    } else {
        agent.advance_route();
    }
}

/// Hover near the leader's position while the class eats.
fn staff_monitor_near_leader(agent: &mut Agent, ctx: &BehaviorCtx<'_>, now: SimTime) {
    let near = ctx.grid.neighbors(ctx.leader_position, Connectivity::Eight);
    let area: &[TargetId] = if near.is_empty() { ctx.area } else { &near };
    if agent.staff_status() != Some(StaffStatus::Teaching) {
        agent.set_staff_status(StaffStatus::Teaching);
        enter_roam(agent, area, FIDGET_DEFAULT, now);
    } else {
        fidget_roam(agent, area, Some(ctx.grid), FIDGET_DEFAULT, now);
    }
}

/// Roam the class area with the given status.
fn staff_watch_class(agent: &mut Agent, ctx: &BehaviorCtx<'_>, status: StaffStatus, now: SimTime) {
    if agent.staff_status() != Some(status) {
        agent.set_staff_status(status);
        enter_roam(agent, ctx.area, FIDGET_DEFAULT, now);
    } else {
        fidget_roam(agent, ctx.area, Some(ctx.grid), FIDGET_DEFAULT, now);
    }
}

/// Free-time chooser: visit the principal, hang out, take a break, or stay
/// in class preparing material.  Each episode runs until its sampled end.
fn staff_free_time(
    agent: &mut Agent,
    ctx: &BehaviorCtx<'_>,
    office: &mut SeatPool,
    now: SimTime,
) -> PoolResult<()> {
    if agent.staff_status() == Some(StaffStatus::Preparing) {
        agent.set_staff_status(StaffStatus::Free);
    }

    if agent.staff_status() == Some(StaffStatus::Free) {
        let mut choices = vec![StaffStatus::Break, StaffStatus::Chilling];
        if ctx.shared.principal_in_office {
            choices.push(StaffStatus::Talking);
        }
        if agent.staff_kind() == Some(StaffKind::Class) {
            // Floaters have no class of their own to prepare for.
            choices.push(StaffStatus::Teaching);
        }
        match agent.rng.choose(&choices).copied() {
            Some(StaffStatus::Talking) => {
                if office.is_available() {
                    let seat = office.assign(agent.id, &mut agent.rng)?;
                    agent.current_target = seat;
                    agent.set_staff_status(StaffStatus::Talking);
                    agent.free_activity_end = now + STAFF_OFFICE_VISIT.sample(&mut agent.rng);
                }
                // Office full: stay Free and choose again next tick.
            }
            Some(StaffStatus::Chilling) => {
                let spot = pick_chill_spot(agent);
                agent.set_staff_status(StaffStatus::Chilling);
                enter_roam(agent, ctx.shared.hangout(spot), FIDGET_DEFAULT, now);
                agent.free_activity_end = now + STAFF_CHILL.sample(&mut agent.rng);
            }
            Some(StaffStatus::Break) => {
                agent.set_staff_status(StaffStatus::Break);
                enter_roam(agent, ctx.shared.break_room, FIDGET_DEFAULT, now);
                agent.free_activity_end = now + STAFF_BREAK.sample(&mut agent.rng);
            }
            Some(StaffStatus::Teaching) => {
                agent.set_staff_status(StaffStatus::Teaching);
                enter_roam(agent, ctx.area, FIDGET_DEFAULT, now);
                agent.free_activity_end = now + STAFF_PREP_TEACHING.sample(&mut agent.rng);
            }
            _ => {}
        }
    }

    if agent.staff_status() == Some(StaffStatus::Talking) && !ctx.shared.principal_in_office {
        // The principal left; the visit is over.
        office.free(agent.id)?;
        agent.set_staff_status(StaffStatus::Free);
    } else if agent.staff_status() == Some(StaffStatus::Chilling) {
        if let Some(spot) = agent.chill_spot() {
            fidget_roam(agent, ctx.shared.hangout(spot), None, FIDGET_DEFAULT, now);
        }
    }

    if agent.free_activity_end.reached(now) {
        if agent.staff_status() == Some(StaffStatus::Talking) {
            office.free(agent.id)?;
        }
        agent.set_staff_status(StaffStatus::Free);
    }
    Ok(())
}

// ── Shared helpers ────────────────────────────────────────────────────────────

/// First entry into a status: pick a target from `area` and arm the fidget
/// timer.
fn enter_roam(agent: &mut Agent, area: &[TargetId], fidget: NormalParams, now: SimTime) {
    if let Some(&spot) = agent.rng.choose(area) {
        agent.current_target = spot;
    }
    agent.fidget_time = now + fidget.sample(&mut agent.rng);
}

/// Later ticks: once the fidget timer has elapsed, re-pick with a small
/// probability — from the cells adjacent to the current spot when `nearby`
/// is given and the agent stands on the grid, otherwise from `area`.
fn fidget_roam(
    agent: &mut Agent,
    area: &[TargetId],
    nearby: Option<&AreaGrid>,
    fidget: NormalParams,
    now: SimTime,
) {
    if !agent.fidget_time.reached(now) || !agent.rng.gen_bool(FIDGET_REPICK_PROBABILITY) {
        return;
    }
    let adjacent = match nearby {
        Some(grid) if grid.contains(agent.current_target) => {
            grid.neighbors(agent.current_target, Connectivity::Eight)
        }
        _ => Vec::new(),
    };
    let candidates: &[TargetId] = if adjacent.is_empty() { area } else { &adjacent };
    if let Some(&spot) = agent.rng.choose(candidates) {
        agent.current_target = spot;
    }
    agent.fidget_time = now + fidget.sample(&mut agent.rng);
}

fn pick_chill_spot(agent: &mut Agent) -> ChillSpot {
    const SPOTS: [ChillSpot; 2] = [ChillSpot::BreakRoom, ChillSpot::Kitchenette];
    let spot = agent.rng.choose(&SPOTS).copied().unwrap_or(ChillSpot::BreakRoom);
    agent.set_chill_spot(spot);
    spot
}

fn free_if_held(pool: &mut SeatPool, agent: AgentId) -> PoolResult<()> {
    if pool.slot_of(agent).is_some() {
        pool.free(agent)?;
    }
    Ok(())
}
