//! `nursery-facility` — the read-only world the scheduler runs against.
//!
//! Everything here is fixed at initialization: the scheduling core never
//! mutates the facility.  Missing or inconsistent configuration is a fatal
//! error at load time ([`FacilityError`]), never at tick time.
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`catalog`]  | `TargetCatalog` — location id → floor-plan coordinate  |
//! | [`grid`]     | `AreaGrid` — rectangular target grid with 4/8-neighbors|
//! | [`schedule`] | `ActivityType`, `ScheduleEntry`, CSV schedule loader   |
//! | [`config`]   | `FacilityConfig`, `ClassSite`, `ToiletConfig`, loader  |
//! | [`error`]    | `FacilityError`, `FacilityResult`                      |

pub mod catalog;
pub mod config;
pub mod error;
pub mod grid;
pub mod schedule;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use catalog::TargetCatalog;
pub use config::{ClassSite, Facility, FacilityConfig, SharedSites, ToiletConfig};
pub use error::{FacilityError, FacilityResult};
pub use grid::{AreaGrid, Connectivity};
pub use schedule::{ActivityType, ClassSchedule, ScheduleEntry};
