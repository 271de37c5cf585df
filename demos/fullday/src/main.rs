//! fullday — smallest runnable scenario for the nursery_sim scheduling core.
//!
//! Two classes, eight children, four class staff, two floaters, and the
//! principal run one compressed day (meals, lessons, a nap, free choice).
//! A straight-line mover stands in for the external pedestrian-dynamics
//! engine: each tick it walks every agent toward its assigned target at a
//! fixed speed and reports positions back, exactly the contract the real
//! engine fulfils.
//!
//! Run with `RUST_LOG=info` to watch event transitions, or `RUST_LOG=debug`
//! to follow individual toilet journeys.

mod scenario;

use std::collections::HashMap;
use std::time::Instant;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use nursery_core::{AgentId, Point2, SimTime, StepClock, TargetId};
use nursery_facility::TargetCatalog;
use nursery_sim::{ClassManager, EventState, SimObserver};

const STEP_SECS: f64 = 0.4;
const WALK_SPEED: f64 = 1.3; // units per second, roughly walking pace
const MAX_TICKS: u64 = 200_000;

// ── Straight-line mover ───────────────────────────────────────────────────────

/// Walks every agent toward its current target and reports positions back.
struct LineMover {
    positions: HashMap<AgentId, Point2>,
}

impl LineMover {
    fn new(agents: impl Iterator<Item = AgentId>, start: Point2) -> Self {
        Self {
            positions: agents.map(|a| (a, start)).collect(),
        }
    }

    fn advance(&mut self, targets: &[(AgentId, TargetId)], catalog: &TargetCatalog) {
        for &(agent, target) in targets {
            let Some(goal) = catalog.get(target) else { continue };
            let position = self.positions.entry(agent).or_insert(goal);
            let dx = goal.x - position.x;
            let dy = goal.y - position.y;
            let dist = (dx * dx + dy * dy).sqrt();
            let reach = WALK_SPEED * STEP_SECS;
            if dist <= reach {
                *position = goal;
            } else {
                position.x += dx / dist * reach;
                position.y += dy / dist * reach;
            }
        }
    }
}

// ── Progress observer ─────────────────────────────────────────────────────────

#[derive(Default)]
struct Stats {
    event_transitions: usize,
    toilet_transitions: usize,
    rotations: usize,
}

impl SimObserver for Stats {
    fn on_event_transition(
        &mut self,
        _class: nursery_core::ClassId,
        _from: EventState,
        _to: EventState,
    ) {
        self.event_transitions += 1;
    }
    fn on_toilet_transition(
        &mut self,
        _agent: AgentId,
        _from: nursery_agent::ToiletState,
        _to: nursery_agent::ToiletState,
    ) {
        self.toilet_transitions += 1;
    }
    fn on_rotation(&mut self, _agent: AgentId, _class: nursery_core::ClassId) {
        self.rotations += 1;
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let facility = scenario::build()?;
    let catalog = facility.catalog.clone();
    let agent_count = facility
        .config
        .classes
        .iter()
        .map(|c| c.students.len() + c.staff.len())
        .sum::<usize>()
        + facility.config.floaters.len()
        + 1;

    println!("=== fullday — nursery_sim scheduling core ===");
    println!(
        "Classes: {}  |  Agents: {}  |  Seed: {}",
        facility.config.classes.len(),
        agent_count,
        facility.config.seed
    );
    println!();

    let mut manager = ClassManager::new(facility)?;
    let mut mover = LineMover::new(
        manager.targets().iter().map(|&(a, _)| a),
        Point2::new(0.0, 0.0),
    );
    let mut clock = StepClock::new(STEP_SECS);
    let mut stats = Stats::default();

    let t0 = Instant::now();
    let mut finished_at: Option<SimTime> = None;
    for _ in 0..MAX_TICKS {
        let targets = manager.targets();
        mover.advance(&targets, &catalog);
        for (&agent, &position) in &mover.positions {
            manager.set_position(agent, position)?;
        }

        let now = clock.advance();
        manager.step_with(now, &mut stats)?;

        if manager.all_finished() {
            finished_at = Some(now);
            break;
        }
    }
    let elapsed = t0.elapsed();

    match finished_at {
        Some(now) => info!(%now, "all classes finished"),
        None => anyhow::bail!("day did not finish within {MAX_TICKS} ticks"),
    }

    println!("Simulation complete in {:.3} s wall clock", elapsed.as_secs_f64());
    println!("  simulated time     : {}", clock.now);
    println!("  event transitions  : {}", stats.event_transitions);
    println!("  toilet transitions : {}", stats.toilet_transitions);
    println!("  floater rotations  : {}", stats.rotations);
    println!();

    // Final per-class summary.
    println!("{:<8} {:<14} {:<10}", "Class", "State", "Students");
    println!("{}", "-".repeat(34));
    for class in manager.classes() {
        println!(
            "{:<8} {:<14} {:<10}",
            class.name,
            format!("{:?}", class.event.state),
            class.students.len(),
        );
    }

    Ok(())
}
