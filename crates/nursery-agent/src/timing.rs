//! Sampled-duration parameters for agent behavior.
//!
//! Everything an agent waits for is drawn from a normal distribution and
//! clamped at zero; this module collects the `(mean, std_dev)` pairs in one
//! place.  Pipeline admission tuning (queue retry probability, sink-wait
//! cap) is *not* here — it describes the facility and ships as
//! configuration.

use nursery_core::AgentRng;

/// A `(mean, std_dev)` pair for normal sampling.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct NormalParams {
    pub mean: f64,
    pub std_dev: f64,
}

impl NormalParams {
    pub const fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    /// Draw a non-negative sample.
    #[inline]
    pub fn sample(self, rng: &mut AgentRng) -> f64 {
        rng.normal_min0(self.mean, self.std_dev)
    }
}

// ── Bladder ───────────────────────────────────────────────────────────────────

/// Students need the toilet roughly every two hours.
pub const STUDENT_BLADDER_CAPACITY_SECS: f64 = 7_200.0;
/// Staff (and the principal) hold out roughly twice as long.
pub const STAFF_BLADDER_CAPACITY_SECS: f64 = 14_400.0;
/// Spread applied around either capacity.
pub const BLADDER_STDDEV_SECS: f64 = 45.0;

// ── Dwell times ───────────────────────────────────────────────────────────────

/// Spread applied to every served desire's dwell time.
pub const DWELL_STDDEV_SECS: f64 = 2.0;
/// Mean dwell at a queue standing position between rank refreshes.
pub const QUEUE_DWELL_SECS: f64 = 20.0;
/// Mean dwell inside a cubicle.
pub const CUBICLE_DWELL_SECS: f64 = 10.0;
/// Mean dwell at a sink (and at the sink-waiting area).
pub const SINK_DWELL_SECS: f64 = 10.0;

// ── Fidgeting ─────────────────────────────────────────────────────────────────

/// Once the fidget timer has elapsed, chance per tick of picking a new spot.
pub const FIDGET_REPICK_PROBABILITY: f64 = 0.2;
/// Default fidget interval for roaming behaviors.
pub const FIDGET_DEFAULT: NormalParams = NormalParams::new(35.0, 2.0);
/// Non-leading staff settle-in interval at the start of a lesson.
pub const STAFF_LESSON_ENTRY_FIDGET: NormalParams = NormalParams::new(30.0, 5.0);
/// Non-leading staff fidget interval while a lesson runs.
pub const STAFF_LESSON_FIDGET: NormalParams = NormalParams::new(60.0, 5.0);

// ── Free-time activity durations ──────────────────────────────────────────────

/// Staff visiting the principal's office.
pub const STAFF_OFFICE_VISIT: NormalParams = NormalParams::new(450.0, 60.0);
/// Staff hanging out at a staff corner.
pub const STAFF_CHILL: NormalParams = NormalParams::new(900.0, 90.0);
/// Staff resting in the break room.
pub const STAFF_BREAK: NormalParams = NormalParams::new(900.0, 90.0);
/// Staff staying in class to prepare upcoming material.
pub const STAFF_PREP_TEACHING: NormalParams = NormalParams::new(1_800.0, 360.0);

/// Principal working at the office desk.
pub const PRINCIPAL_OFFICE: NormalParams = NormalParams::new(1_800.0, 120.0);
/// Principal supervising a class.
pub const PRINCIPAL_SUPERVISE: NormalParams = NormalParams::new(450.0, 60.0);
/// Principal at a staff corner.
pub const PRINCIPAL_CHILL: NormalParams = NormalParams::new(900.0, 90.0);

/// One round of a student's free-choice activity.
pub const STUDENT_FREE_CHOICE: NormalParams = NormalParams::new(300.0, 20.0);
/// How long students linger before walking to the exit at day end.
pub const STUDENT_LINGER: NormalParams = NormalParams::new(270.0, 180.0);
