//! `SeatPool` — a fixed set of interchangeable slots with an assignment table.
//!
//! One type serves table seats, nap positions, the principal's office
//! chairs, toilet cubicles, and sinks; instantiations differ only in their
//! slot catalog.
//!
//! # Invariants
//!
//! - `occupant_of` and `slot_of` are exact inverses of each other.
//! - Occupied slots never exceed the fixed capacity.
//! - An occupant holds at most one slot at a time (`assign` is idempotent).
//!
//! Slot selection among the free slots is random (seeded through the
//! caller's RNG); no ordering guarantee is made or required.

use nursery_core::{AgentId, AgentRng, TargetId};
use rustc_hash::FxHashMap;

use crate::{PoolError, PoolResult};

/// Fixed-capacity slot↔occupant assignment table.
#[derive(Debug)]
pub struct SeatPool {
    /// The full slot catalog, fixed at construction.
    slots: Vec<TargetId>,
    /// Forward map: slot → occupant.  Absent key = free slot.
    occupant_of: FxHashMap<TargetId, AgentId>,
    /// Inverse map: occupant → slot.
    slot_of: FxHashMap<AgentId, TargetId>,
}

impl SeatPool {
    /// Build a pool over the given slot catalog.
    ///
    /// # Panics
    /// Panics in debug mode if the catalog contains duplicate slots.
    pub fn new(slots: Vec<TargetId>) -> Self {
        debug_assert!(
            {
                let mut sorted = slots.clone();
                sorted.sort_unstable();
                sorted.windows(2).all(|w| w[0] != w[1])
            },
            "slot catalog must not contain duplicates"
        );
        let capacity = slots.len();
        Self {
            slots,
            occupant_of: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            slot_of: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Total number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of currently occupied slots.
    #[inline]
    pub fn occupied(&self) -> usize {
        self.slot_of.len()
    }

    /// `true` if at least one slot is free.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.occupied() < self.capacity()
    }

    /// `true` if no slot is occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slot_of.is_empty()
    }

    /// The slot held by `agent`, if any.
    #[inline]
    pub fn slot_of(&self, agent: AgentId) -> Option<TargetId> {
        self.slot_of.get(&agent).copied()
    }

    /// The occupant of `slot`, if any.
    #[inline]
    pub fn occupant_of(&self, slot: TargetId) -> Option<AgentId> {
        self.occupant_of.get(&slot).copied()
    }

    /// Read-only view of the slot catalog.
    pub fn slots(&self) -> &[TargetId] {
        &self.slots
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Assign a free slot to `agent` and return it.
    ///
    /// Idempotent: if `agent` already holds a slot, that slot is returned
    /// unchanged.  The slot is picked at random among the free ones via the
    /// caller's RNG so runs stay reproducible under a fixed seed.
    ///
    /// # Errors
    ///
    /// [`PoolError::Exhausted`] if no slot is free.  Callers must gate on
    /// [`is_available`](SeatPool::is_available); hitting this error means
    /// the scheduling logic is broken and the run must abort.
    pub fn assign(&mut self, agent: AgentId, rng: &mut AgentRng) -> PoolResult<TargetId> {
        if let Some(held) = self.slot_of.get(&agent) {
            return Ok(*held);
        }
        let free: Vec<TargetId> = self
            .slots
            .iter()
            .copied()
            .filter(|s| !self.occupant_of.contains_key(s))
            .collect();
        let slot = *rng.choose(&free).ok_or(PoolError::Exhausted {
            agent,
            capacity: self.capacity(),
        })?;
        self.occupant_of.insert(slot, agent);
        self.slot_of.insert(agent, slot);
        Ok(slot)
    }

    /// Release the slot held by `agent` and return it.
    ///
    /// # Errors
    ///
    /// [`PoolError::NotHeld`] if `agent` holds nothing here — freeing a slot
    /// one does not hold is a defect, not a no-op.
    pub fn free(&mut self, agent: AgentId) -> PoolResult<TargetId> {
        let slot = self
            .slot_of
            .remove(&agent)
            .ok_or(PoolError::NotHeld { agent })?;
        self.occupant_of.remove(&slot);
        Ok(slot)
    }
}
