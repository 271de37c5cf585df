//! Activity types, class schedules, and the CSV schedule loader.
//!
//! # CSV format
//!
//! One row per scheduled activity block, grouped by class and ordered
//! top-to-bottom within each class:
//!
//! ```csv
//! class_id,activity,duration_secs
//! 0,meal,1800
//! 0,lesson,3600
//! 1,lesson,1800
//! 1,nap,9000
//! 1,free_choice,3600
//! ```
//!
//! **`activity`** field:
//!
//! | Value         | Meaning                   |
//! |---------------|---------------------------|
//! | `lesson`      | [`ActivityType::Lesson`]  |
//! | `meal`        | [`ActivityType::Meal`]    |
//! | `nap`         | [`ActivityType::Nap`]     |
//! | `free_choice` | [`ActivityType::FreeChoice`] |

use std::fmt;
use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use nursery_core::ClassId;

use crate::{FacilityError, FacilityResult};

// ── ActivityType ──────────────────────────────────────────────────────────────

/// The kind of activity a class runs during one schedule block.
///
/// A closed enum: every behavior dispatch over activity types is an
/// exhaustive `match`, so adding a variant forces every decision point to
/// handle it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityType {
    Lesson,
    Meal,
    Nap,
    FreeChoice,
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActivityType::Lesson => "lesson",
            ActivityType::Meal => "meal",
            ActivityType::Nap => "nap",
            ActivityType::FreeChoice => "free_choice",
        };
        f.write_str(name)
    }
}

// ── ScheduleEntry / ClassSchedule ─────────────────────────────────────────────

/// One block in a class's daily schedule.
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub activity: ActivityType,
    /// Nominal block length in seconds.  Setup and teardown intervals are
    /// carved out of this, so prepare + main + cleanup always sums back to
    /// it exactly.
    pub duration_secs: f64,
}

/// An ordered list of schedule blocks for one class.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassSchedule {
    entries: Vec<ScheduleEntry>,
}

impl ClassSchedule {
    pub fn new(entries: Vec<ScheduleEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry at `index`, or `None` past the end of the day.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&ScheduleEntry> {
        self.entries.get(index)
    }

    /// Read-only slice of all entries, in schedule order.
    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ScheduleRecord {
    class_id: u16,
    activity: String,
    duration_secs: f64,
}

/// Load per-class schedules from a CSV file.
pub fn load_schedules_csv(path: &Path) -> FacilityResult<FxHashMap<ClassId, ClassSchedule>> {
    let file = std::fs::File::open(path).map_err(FacilityError::Io)?;
    load_schedules_reader(file)
}

/// Like [`load_schedules_csv`] but accepts any `Read` source.
pub fn load_schedules_reader<R: Read>(
    reader: R,
) -> FacilityResult<FxHashMap<ClassId, ClassSchedule>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut by_class: FxHashMap<ClassId, Vec<ScheduleEntry>> = FxHashMap::default();

    for result in csv_reader.deserialize::<ScheduleRecord>() {
        let row = result.map_err(|e| FacilityError::Parse(e.to_string()))?;
        if row.duration_secs <= 0.0 {
            return Err(FacilityError::Parse(format!(
                "class {}: non-positive duration {}",
                row.class_id, row.duration_secs
            )));
        }
        by_class
            .entry(ClassId(row.class_id))
            .or_default()
            .push(ScheduleEntry {
                activity: parse_activity(&row.activity)?,
                duration_secs: row.duration_secs,
            });
    }

    Ok(by_class
        .into_iter()
        .map(|(id, entries)| (id, ClassSchedule::new(entries)))
        .collect())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_activity(s: &str) -> FacilityResult<ActivityType> {
    match s.trim() {
        "lesson" => Ok(ActivityType::Lesson),
        "meal" => Ok(ActivityType::Meal),
        "nap" => Ok(ActivityType::Nap),
        "free_choice" => Ok(ActivityType::FreeChoice),
        other => Err(FacilityError::Parse(format!(
            "invalid activity {other:?}: expected lesson, meal, nap, or free_choice"
        ))),
    }
}
