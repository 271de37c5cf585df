//! `ClassEvent` — the lifecycle state machine for one scheduled activity
//! block.
//!
//! # Timing model
//!
//! Each block's nominal duration is partitioned once, when the block
//! starts, into three sampled intervals:
//!
//! ```text
//! prepare_secs + main_secs + cleanup_secs == nominal duration   (exactly)
//! ```
//!
//! Setup and teardown are drawn from a normal around a normal (the spread
//! of the spread varies day to day), clamped into `[0, nominal/3]` so the
//! main interval can never run negative.  Phase-end timestamps are
//! refreshed at each transition, so a phase held open by the toilet gate
//! pushes the following phases later rather than shortening them.
//!
//! # Gate
//!
//! Leaving `Preparing`, `InProgress`, or `CleanUp` additionally requires
//! that no class member is anywhere in the toilet pipeline.  The caller
//! evaluates that predicate (it owns the agents) and passes it in.

use nursery_core::{SimRng, SimTime};
use nursery_facility::{ActivityType, ClassSchedule, ScheduleEntry};

/// Mean and spread of the day-level setup/teardown interval distribution.
const SETUP_MEAN_SECS: f64 = 120.0;
const SETUP_MEAN_STDDEV_SECS: f64 = 30.0;
/// Spread of the per-event draw around the day-level mean.
const SETUP_STDDEV_SECS: f64 = 3.0;

// ── EventState ────────────────────────────────────────────────────────────────

/// Lifecycle state of a class's current activity block.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum EventState {
    /// Before the first block of the day starts.
    YetToStart,
    Preparing,
    InProgress,
    CleanUp,
    /// One-tick gap between blocks while the next one is derived.
    Finished,
    /// The schedule is exhausted.  Terminal.
    AllFinished,
}

// ── ClassEvent ────────────────────────────────────────────────────────────────

/// The current activity block and its derived timings.
#[derive(Debug)]
pub struct ClassEvent {
    /// Index of the current entry in the class schedule.
    pub index: usize,
    pub activity: ActivityType,
    pub nominal_secs: f64,
    pub state: EventState,

    pub prepare_secs: f64,
    pub main_secs: f64,
    pub cleanup_secs: f64,

    /// Phase-end timestamps.  `prepare_end <= main_end <= cleanup_end` at
    /// all times.
    pub prepare_end: SimTime,
    pub main_end: SimTime,
    pub cleanup_end: SimTime,
}

impl ClassEvent {
    /// Stage the first schedule entry; timings are derived when the block
    /// actually starts.
    pub fn new(first: &ScheduleEntry) -> Self {
        Self {
            index: 0,
            activity: first.activity,
            nominal_secs: first.duration_secs,
            state: EventState::YetToStart,
            prepare_secs: 0.0,
            main_secs: 0.0,
            cleanup_secs: 0.0,
            prepare_end: SimTime::ZERO,
            main_end: SimTime::ZERO,
            cleanup_end: SimTime::ZERO,
        }
    }

    /// Advance the lifecycle by at most one transition.
    ///
    /// `members_clear` is the toilet gate: `true` iff no member of the
    /// owning class is mid-journey.  Returns `Some((from, to))` when a
    /// transition fired.
    pub fn advance(
        &mut self,
        now: SimTime,
        members_clear: bool,
        schedule: &ClassSchedule,
        rng: &mut SimRng,
    ) -> Option<(EventState, EventState)> {
        let from = self.state;
        match self.state {
            EventState::YetToStart => {
                self.begin_block(now, rng);
                self.state = EventState::Preparing;
            }

            EventState::Preparing if members_clear && now > self.prepare_end => {
                self.main_end = now + self.main_secs;
                self.cleanup_end = self.main_end + self.cleanup_secs;
                self.state = EventState::InProgress;
            }

            EventState::InProgress if members_clear && now > self.main_end => {
                self.cleanup_end = now + self.cleanup_secs;
                self.state = EventState::CleanUp;
            }

            EventState::CleanUp if members_clear && now > self.cleanup_end => {
                self.state = EventState::Finished;
            }

            EventState::Finished => match schedule.get(self.index + 1) {
                Some(next) => {
                    self.index += 1;
                    self.activity = next.activity;
                    self.nominal_secs = next.duration_secs;
                    self.begin_block(now, rng);
                    self.state = EventState::Preparing;
                }
                None => self.state = EventState::AllFinished,
            },

            _ => {}
        }

        (from != self.state).then_some((from, self.state))
    }

    /// Sample the duration partition for the block starting at `now` and
    /// set the predicted phase-end timestamps.
    fn begin_block(&mut self, now: SimTime, rng: &mut SimRng) {
        self.prepare_secs = sample_interval(rng, self.nominal_secs);
        self.cleanup_secs = sample_interval(rng, self.nominal_secs);
        self.main_secs = self.nominal_secs - self.prepare_secs - self.cleanup_secs;

        self.prepare_end = now + self.prepare_secs;
        self.main_end = self.prepare_end + self.main_secs;
        self.cleanup_end = self.main_end + self.cleanup_secs;
    }
}

/// One setup/teardown interval: `N(N(120, 30), 3)` clamped into
/// `[0, nominal / 3]`.
fn sample_interval(rng: &mut SimRng, nominal_secs: f64) -> f64 {
    let day_mean = rng.normal(SETUP_MEAN_SECS, SETUP_MEAN_STDDEV_SECS);
    rng.normal(day_mean, SETUP_STDDEV_SECS)
        .clamp(0.0, nominal_secs / 3.0)
}
