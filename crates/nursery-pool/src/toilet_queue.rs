//! `ToiletQueue` — bounded FIFO of agents waiting for a cubicle.
//!
//! Each rank in the queue corresponds to a fixed standing position in the
//! facility (the queue-position targets in front of the toilet entrance), so
//! an agent's walking target while queueing is simply the position of its
//! current rank.  Ranks shift forward as the head is promoted, which is why
//! callers re-read [`position_of`](ToiletQueue::position_of) every tick.
//!
//! # Invariants
//!
//! - Queue length never exceeds the number of standing positions.
//! - Membership is unique: an agent cannot hold two ranks.
//! - Only the head may be promoted to a cubicle.

use std::collections::VecDeque;

use nursery_core::{AgentId, TargetId};

use crate::{PoolError, PoolResult};

/// Bounded FIFO with per-rank standing positions.
#[derive(Debug)]
pub struct ToiletQueue {
    /// Standing position for each rank; `positions.len()` is the capacity.
    positions: Vec<TargetId>,
    queue: VecDeque<AgentId>,
}

impl ToiletQueue {
    pub fn new(positions: Vec<TargetId>) -> Self {
        let capacity = positions.len();
        Self {
            positions,
            queue: VecDeque::with_capacity(capacity),
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn capacity(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// `true` if another agent can join the queue.
    #[inline]
    pub fn has_space(&self) -> bool {
        self.queue.len() < self.capacity()
    }

    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        self.queue.contains(&agent)
    }

    /// The agent currently first in line, if any.
    #[inline]
    pub fn head(&self) -> Option<AgentId> {
        self.queue.front().copied()
    }

    /// The standing position for `agent`'s current rank, or `None` if the
    /// agent is not queued.
    pub fn position_of(&self, agent: AgentId) -> Option<TargetId> {
        self.queue
            .iter()
            .position(|&a| a == agent)
            .map(|rank| self.positions[rank])
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Join the queue (or re-read the standing position if already queued)
    /// and return the position for the agent's rank.
    ///
    /// # Errors
    ///
    /// [`PoolError::QueueFull`] if the queue has no space — callers must
    /// gate on [`has_space`](ToiletQueue::has_space) first.
    pub fn join(&mut self, agent: AgentId) -> PoolResult<TargetId> {
        if let Some(position) = self.position_of(agent) {
            return Ok(position);
        }
        if !self.has_space() {
            return Err(PoolError::QueueFull {
                agent,
                capacity: self.capacity(),
            });
        }
        self.queue.push_back(agent);
        Ok(self.positions[self.queue.len() - 1])
    }

    /// Remove and return the head of the queue.
    ///
    /// Promotion to a cubicle always goes through here, so FIFO fairness is
    /// structural: there is no way to remove a non-head member.
    pub fn pop_head(&mut self) -> Option<AgentId> {
        self.queue.pop_front()
    }
}
