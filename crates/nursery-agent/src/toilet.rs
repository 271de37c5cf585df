//! `ToiletPipeline` — the four-stage shared-resource chain.
//!
//! ```text
//! bounded queue → cubicle pool → sink pool → sink-waiting area
//! ```
//!
//! One pipeline serves the whole facility.  [`step`](ToiletPipeline::step)
//! is called once per agent per tick and drives that agent's
//! [`ToiletState`] forward as far as the shared resources allow; an
//! unavailable resource is the normal case and simply leaves the agent in
//! (or moves it into) a waiting sub-state until a later tick.  Only
//! double-assignment or freeing an unheld slot is a defect, surfaced as a
//! [`PoolError`].
//!
//! Every destination change goes through the agent's desire queue — the
//! pipeline never writes `current_target` directly.

use nursery_core::{AgentId, SimTime, TargetId};
use nursery_facility::ToiletConfig;
use nursery_pool::{PoolResult, SeatPool, ToiletQueue};
use tracing::debug;

use crate::agent::Agent;
use crate::desire::{PRIORITY_JOURNEY, PRIORITY_PARK};
use crate::route::Waypoint;
use crate::state::ToiletState;
use crate::timing::{CUBICLE_DWELL_SECS, QUEUE_DWELL_SECS, SINK_DWELL_SECS};

/// The facility's single toilet: queue, cubicles, sinks, and the crowd
/// waiting for a sink.
pub struct ToiletPipeline {
    queue: ToiletQueue,
    cubicles: SeatPool,
    sinks: SeatPool,
    /// Agents currently parked at the sink-waiting area, in arrival order.
    sink_waiting: Vec<AgentId>,
    sink_wait_area: TargetId,
    sink_wait_cap: usize,
    retry_probability: f64,
}

impl ToiletPipeline {
    pub fn new(config: &ToiletConfig) -> Self {
        Self {
            queue: ToiletQueue::new(config.queue_positions.clone()),
            cubicles: SeatPool::new(config.cubicles.clone()),
            sinks: SeatPool::new(config.sinks.clone()),
            sink_waiting: Vec::new(),
            sink_wait_area: config.sink_wait_area,
            sink_wait_cap: config.sink_wait_cap,
            retry_probability: config.queue_retry_probability,
        }
    }

    // ── Introspection (tests, observers) ──────────────────────────────────

    pub fn queue(&self) -> &ToiletQueue {
        &self.queue
    }

    pub fn cubicles(&self) -> &SeatPool {
        &self.cubicles
    }

    pub fn sinks(&self) -> &SeatPool {
        &self.sinks
    }

    pub fn sink_waiting_count(&self) -> usize {
        self.sink_waiting.len()
    }

    // ── Per-agent step ────────────────────────────────────────────────────

    /// Drive `agent`'s journey one tick forward.
    ///
    /// `home_area` is the walkable area of the agent's current class (the
    /// return destination set once the journey ends) and `toilet_route` the
    /// class's waypoints toward the toilet entrance (empty for adjacent
    /// classes; walked in reverse on the way back).
    pub fn step(
        &mut self,
        agent: &mut Agent,
        now: SimTime,
        home_area: &[TargetId],
        toilet_route: &[Waypoint],
    ) -> PoolResult<()> {
        // ── Admission: want-to-go / waiting-for-queue → in-queue ──────────
        //
        // A slot in the queue is not enough: while the sink-waiting area is
        // crowded past its cap, nobody new is admitted (backpressure, so
        // the area between cubicles and sinks cannot saturate).
        if matches!(
            agent.toilet_state,
            ToiletState::WantToGo | ToiletState::WaitingForQueue
        ) {
            if self.queue.has_space() && self.sink_waiting.len() < self.sink_wait_cap {
                let position = self.queue.join(agent.id)?;
                agent.push_desire(PRIORITY_JOURNEY, position, QUEUE_DWELL_SECS);
                self.transition(agent, ToiletState::InQueue);
                agent.follow_desires(now, home_area);
                agent.begin_route(toilet_route);
            } else if agent.toilet_state == ToiletState::WantToGo
                && agent.rng.gen_bool(self.retry_probability)
            {
                // Park in place and re-try on later ticks.
                agent.push_desire(PRIORITY_PARK, agent.current_target, QUEUE_DWELL_SECS);
                self.transition(agent, ToiletState::WaitingForQueue);
                agent.follow_desires(now, home_area);
            }
        }

        // ── Promotion: head of queue → free cubicle ───────────────────────
        if agent.toilet_state == ToiletState::InQueue {
            if self.cubicles.is_available() && self.queue.head() == Some(agent.id) {
                self.queue.pop_head();
                let cubicle = self.cubicles.assign(agent.id, &mut agent.rng)?;
                agent.push_desire(PRIORITY_JOURNEY, cubicle, CUBICLE_DWELL_SECS);
                self.transition(agent, ToiletState::InCubicle);
                agent.follow_desires(now, home_area);
            } else {
                // Ranks shift as the head leaves; refresh the standing spot.
                let position = self.queue.join(agent.id)?;
                agent.push_desire(PRIORITY_JOURNEY, position, QUEUE_DWELL_SECS);
                agent.follow_desires(now, home_area);
            }
        }

        // ── Cubicle done → sink or sink-waiting ───────────────────────────
        if (agent.toilet_state == ToiletState::InCubicle && agent.is_fulfilled(now))
            || agent.toilet_state == ToiletState::WaitingForSink
        {
            if agent.toilet_state == ToiletState::InCubicle {
                self.cubicles.free(agent.id)?;
            }
            if self.sinks.is_available() {
                let sink = self.sinks.assign(agent.id, &mut agent.rng)?;
                self.sink_waiting.retain(|&a| a != agent.id);
                agent.push_desire(PRIORITY_JOURNEY, sink, SINK_DWELL_SECS);
                self.transition(agent, ToiletState::InSink);
                agent.follow_desires(now, home_area);
            } else {
                agent.push_desire(PRIORITY_JOURNEY, self.sink_wait_area, SINK_DWELL_SECS);
                if !self.sink_waiting.contains(&agent.id) {
                    self.sink_waiting.push(agent.id);
                }
                self.transition(agent, ToiletState::WaitingForSink);
                agent.follow_desires(now, home_area);
            }
        }

        // ── Sink done → back to class ─────────────────────────────────────
        if agent.toilet_state == ToiletState::InSink && agent.is_fulfilled(now) {
            self.sinks.free(agent.id)?;
            let next = if toilet_route.is_empty() {
                ToiletState::NotUsing
            } else {
                ToiletState::JustEnded
            };
            self.transition(agent, next);
            agent.follow_desires(now, home_area);
            if !toilet_route.is_empty() {
                let back: Vec<Waypoint> = toilet_route.iter().rev().copied().collect();
                agent.begin_route(&back);
            }
        }

        Ok(())
    }

    fn transition(&self, agent: &mut Agent, to: ToiletState) {
        debug!(agent = %agent.id, from = ?agent.toilet_state, ?to, "toilet transition");
        agent.toilet_state = to;
    }
}
