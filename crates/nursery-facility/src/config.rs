//! Scenario configuration: class sites, shared sites, pool capacities, and
//! rosters.
//!
//! [`FacilityConfig`] is the raw serde form read from JSON.  [`Facility`]
//! is the validated form the scheduler consumes: construction checks every
//! cross-reference (targets against the catalog, roster uniqueness, pool
//! sizes against rosters) and fails fast, so the tick loop never has to
//! handle a dangling id.

use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use nursery_core::{AgentId, ClassId, TargetId};

use crate::{AreaGrid, ClassSchedule, FacilityError, FacilityResult, TargetCatalog};

// ── Per-class site ────────────────────────────────────────────────────────────

/// Everything static about one class: its floor area, furniture, roster,
/// and daily schedule.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ClassSite {
    pub id: ClassId,
    pub name: String,

    /// The class floor area as a grid (holes allowed) — the candidate set
    /// for roaming targets and the basis for nearby-cell fidgeting.
    pub area: AreaGrid,

    /// Table seats; must cover the student roster (every student holds one
    /// during meals).
    pub chairs: Vec<TargetId>,

    /// Nap positions; must cover the student roster.
    pub nap_spots: Vec<TargetId>,

    /// Where the leading staff member stands during lessons.
    pub leader_position: TargetId,

    /// Waypoints between this class and the toilet entrance, in walking
    /// order toward the toilet.  Empty for classes adjacent to the toilet.
    #[serde(default)]
    pub toilet_route: Vec<TargetId>,

    /// Waypoints between this class and the kitchenette, in walking order
    /// toward the kitchenette.  Empty for adjacent classes.
    #[serde(default)]
    pub kitchen_route: Vec<TargetId>,

    pub schedule: ClassSchedule,

    pub students: Vec<AgentId>,
    pub staff: Vec<AgentId>,
}

// ── Shared sites ──────────────────────────────────────────────────────────────

/// Facility-wide locations shared across classes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SharedSites {
    pub kitchenette: Vec<TargetId>,
    pub break_room: Vec<TargetId>,
    /// Staff hangout corner by the break room.
    pub hangout_break_room: Vec<TargetId>,
    /// Staff hangout corner by the kitchenette.
    pub hangout_kitchenette: Vec<TargetId>,
    /// Visitor chairs in the principal's office (a one-room seat pool).
    pub office_seats: Vec<TargetId>,
    /// The principal's own desk.
    pub principal_desk: TargetId,
    /// Where departing agents walk at the end of the day.
    pub exit: TargetId,
}

// ── Toilet configuration ──────────────────────────────────────────────────────

fn default_sink_wait_cap() -> usize {
    4
}

fn default_queue_retry_probability() -> f64 {
    0.4
}

/// Capacities and admission tuning for the toilet pipeline.
///
/// The sink-waiting cap and the queue retry probability ship as
/// configuration rather than constants: they describe the facility, not the
/// algorithm.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToiletConfig {
    /// Standing positions of the queue, front first; the length is the
    /// queue capacity.
    pub queue_positions: Vec<TargetId>,
    pub cubicles: Vec<TargetId>,
    pub sinks: Vec<TargetId>,
    /// Where agents wait when every sink is taken.
    pub sink_wait_area: TargetId,
    /// Queue admission is refused while this many agents crowd the
    /// sink-waiting area.
    #[serde(default = "default_sink_wait_cap")]
    pub sink_wait_cap: usize,
    /// Per-tick probability that an agent refused admission parks in place
    /// (`WaitingForQueue`) instead of re-trying immediately.
    #[serde(default = "default_queue_retry_probability")]
    pub queue_retry_probability: f64,
}

// ── Top-level configuration ───────────────────────────────────────────────────

fn default_rotation_period_secs() -> f64 {
    3600.0
}

/// The raw scenario file.  Validate with [`Facility::new`] before use.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FacilityConfig {
    /// Master RNG seed.  The same seed always produces identical runs.
    pub seed: u64,

    pub classes: Vec<ClassSite>,
    pub shared: SharedSites,
    pub toilet: ToiletConfig,

    /// Floating staff rotated across classes, in rotation order.
    #[serde(default)]
    pub floaters: Vec<AgentId>,

    /// The principal's agent id (exactly one per run).
    pub principal: AgentId,

    /// Seconds between floating-staff rotations.
    #[serde(default = "default_rotation_period_secs")]
    pub rotation_period_secs: f64,
}

impl FacilityConfig {
    /// Load a scenario from a JSON file.
    pub fn from_path(path: &Path) -> FacilityResult<Self> {
        let file = std::fs::File::open(path).map_err(FacilityError::Io)?;
        Self::from_reader(file)
    }

    /// Like [`from_path`](FacilityConfig::from_path) but accepts any `Read`
    /// source.
    pub fn from_reader<R: Read>(reader: R) -> FacilityResult<Self> {
        serde_json::from_reader(reader).map_err(|e| FacilityError::Parse(e.to_string()))
    }
}

// ── Facility (validated) ──────────────────────────────────────────────────────

/// A validated scenario: configuration plus the target catalog it was
/// checked against.
#[derive(Debug)]
pub struct Facility {
    pub config: FacilityConfig,
    pub catalog: TargetCatalog,
}

impl Facility {
    /// Validate `config` against `catalog`.
    ///
    /// Checks, in order: grid shapes, class id uniqueness, roster
    /// uniqueness (including floaters and the principal), schedule
    /// presence, pool sizes against rosters, and that every referenced
    /// target resolves in the catalog.
    pub fn new(config: FacilityConfig, catalog: TargetCatalog) -> FacilityResult<Self> {
        let facility = Self { config, catalog };
        facility.validate()?;
        Ok(facility)
    }

    /// The class with the given id, if configured.
    pub fn class(&self, id: ClassId) -> Option<&ClassSite> {
        self.config.classes.iter().find(|c| c.id == id)
    }

    /// The class an agent belongs to (students and permanent staff only;
    /// floaters and the principal move between classes).
    pub fn home_class(&self, agent: AgentId) -> Option<&ClassSite> {
        self.config
            .classes
            .iter()
            .find(|c| c.students.contains(&agent) || c.staff.contains(&agent))
    }

    // ── Validation ────────────────────────────────────────────────────────

    fn validate(&self) -> FacilityResult<()> {
        let cfg = &self.config;

        if cfg.classes.is_empty() {
            return Err(FacilityError::Invalid("no classes configured".into()));
        }

        let mut class_ids = FxHashSet::default();
        let mut roster = FxHashSet::default();
        let mut register = |agent: AgentId| -> FacilityResult<()> {
            if !roster.insert(agent) {
                return Err(FacilityError::DuplicateAgent(agent));
            }
            Ok(())
        };

        for class in &cfg.classes {
            if !class_ids.insert(class.id) {
                return Err(FacilityError::DuplicateClass(class.id));
            }
            class
                .area
                .validate()
                .map_err(|e| FacilityError::Invalid(format!("class {}: {e}", class.id)))?;
            if class.schedule.is_empty() {
                return Err(FacilityError::Invalid(format!(
                    "class {} has an empty schedule",
                    class.id
                )));
            }
            if class.chairs.len() < class.students.len() {
                return Err(FacilityError::Invalid(format!(
                    "class {}: {} chairs for {} students",
                    class.id,
                    class.chairs.len(),
                    class.students.len()
                )));
            }
            if class.nap_spots.len() < class.students.len() {
                return Err(FacilityError::Invalid(format!(
                    "class {}: {} nap spots for {} students",
                    class.id,
                    class.nap_spots.len(),
                    class.students.len()
                )));
            }
            if class.staff.is_empty() {
                return Err(FacilityError::Invalid(format!(
                    "class {} has no staff (a lesson leader is required)",
                    class.id
                )));
            }
            for &agent in class.students.iter().chain(&class.staff) {
                register(agent)?;
            }
        }

        for &floater in &cfg.floaters {
            register(floater)?;
        }
        register(cfg.principal)?;

        if cfg.toilet.queue_positions.is_empty()
            || cfg.toilet.cubicles.is_empty()
            || cfg.toilet.sinks.is_empty()
        {
            return Err(FacilityError::Invalid(
                "toilet queue, cubicles, and sinks must all be non-empty".into(),
            ));
        }
        if !(0.0..=1.0).contains(&cfg.toilet.queue_retry_probability) {
            return Err(FacilityError::Invalid(format!(
                "queue retry probability {} outside [0, 1]",
                cfg.toilet.queue_retry_probability
            )));
        }
        if cfg.rotation_period_secs <= 0.0 {
            return Err(FacilityError::Invalid(
                "rotation period must be positive".into(),
            ));
        }

        self.validate_targets()
    }

    /// Every target any part of the configuration can emit must resolve in
    /// the catalog.
    fn validate_targets(&self) -> FacilityResult<()> {
        let cfg = &self.config;
        let check = |targets: &[TargetId], context: &str| -> FacilityResult<()> {
            for &target in targets {
                if !self.catalog.contains(target) {
                    return Err(FacilityError::UnknownTarget {
                        target,
                        context: context.to_string(),
                    });
                }
            }
            Ok(())
        };

        for class in &cfg.classes {
            let ctx = format!("class {}", class.id);
            check(&class.area.usable_vec(), &ctx)?;
            check(&class.chairs, &ctx)?;
            check(&class.nap_spots, &ctx)?;
            check(&[class.leader_position], &ctx)?;
            check(&class.toilet_route, &ctx)?;
            check(&class.kitchen_route, &ctx)?;
        }

        let shared = &cfg.shared;
        check(&shared.kitchenette, "kitchenette")?;
        check(&shared.break_room, "break room")?;
        check(&shared.hangout_break_room, "hangout (break room)")?;
        check(&shared.hangout_kitchenette, "hangout (kitchenette)")?;
        check(&shared.office_seats, "office")?;
        check(&[shared.principal_desk], "principal desk")?;
        check(&[shared.exit], "exit")?;

        let toilet = &cfg.toilet;
        check(&toilet.queue_positions, "toilet queue")?;
        check(&toilet.cubicles, "cubicles")?;
        check(&toilet.sinks, "sinks")?;
        check(&[toilet.sink_wait_area], "sink waiting area")?;

        Ok(())
    }
}
