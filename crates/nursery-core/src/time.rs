//! Simulation time model.
//!
//! # Design
//!
//! The scheduling core does not own the clock.  The external movement engine
//! advances simulated time by one fixed step per tick and hands the current
//! time to the scheduler each call, so the canonical time unit here is a
//! float second count, not an integer tick.
//! All schedule arithmetic is plain `f64` addition against sampled interval
//! lengths; comparisons are `>=` threshold checks, so sub-step drift is
//! irrelevant as long as the driver's step size stays fixed.
//!
//! [`StepClock`] exists for drivers (demos, tests) that need to produce the
//! monotone time series themselves.

use std::fmt;
use std::ops::{Add, Sub};

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An absolute simulation timestamp, in seconds since the start of the day.
///
/// Monotonically non-decreasing across ticks.  Wrapped so that timestamps and
/// plain durations cannot be mixed up at call sites.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    /// Seconds since simulation start.
    #[inline]
    pub fn secs(self) -> f64 {
        self.0
    }

    /// `true` once this timestamp has been reached at `now`.
    #[inline]
    pub fn reached(self, now: SimTime) -> bool {
        now.0 >= self.0
    }
}

impl Add<f64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, secs: f64) -> SimTime {
        SimTime(self.0 + secs)
    }
}

impl Sub for SimTime {
    type Output = f64;
    #[inline]
    fn sub(self, rhs: SimTime) -> f64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}s", self.0)
    }
}

// ── StepClock ─────────────────────────────────────────────────────────────────

/// Fixed-step clock for drivers that generate the time series themselves.
///
/// The production driver receives `sim_time` from the movement engine; demos
/// and tests use a `StepClock` in its place.  Cheap to copy, no heap data.
#[derive(Clone, Debug)]
pub struct StepClock {
    /// Simulated seconds added per [`advance`](StepClock::advance).
    pub step_secs: f64,
    /// The current timestamp, starting at [`SimTime::ZERO`].
    pub now: SimTime,
}

impl StepClock {
    /// Create a clock with the given step size.
    ///
    /// # Panics
    /// Panics in debug mode if `step_secs` is not strictly positive.
    pub fn new(step_secs: f64) -> Self {
        debug_assert!(step_secs > 0.0, "step_secs must be > 0");
        Self { step_secs, now: SimTime::ZERO }
    }

    /// Advance by one step and return the new timestamp.
    #[inline]
    pub fn advance(&mut self) -> SimTime {
        self.now = self.now + self.step_secs;
        self.now
    }

    /// Number of whole steps taken so far.
    #[inline]
    pub fn steps_taken(&self) -> u64 {
        (self.now.0 / self.step_secs).round() as u64
    }
}

impl fmt::Display for StepClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (step {:.2}s)", self.now, self.step_secs)
    }
}
