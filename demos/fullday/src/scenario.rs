//! Synthetic two-class facility for the fullday demo.
//!
//! The floor plan is laid out on a simple coordinate grid: class Sun near
//! the toilet wing, class Moon across the building (it detours through the
//! corridor waypoint both ways).  Schedules are parsed from an embedded CSV
//! in the same format a real scenario ships.

use std::io::Cursor;

use anyhow::{Context, Result};

use nursery_core::{AgentId, ClassId, Point2, TargetId};
use nursery_facility::{
    schedule::load_schedules_reader, AreaGrid, ClassSite, Facility, FacilityConfig, SharedSites,
    TargetCatalog, ToiletConfig,
};

const SEED: u64 = 42;

// One row per activity block, grouped by class.
const SCHEDULE_CSV: &str = "\
class_id,activity,duration_secs\n\
0,meal,1800\n\
0,lesson,1800\n\
0,nap,3600\n\
0,free_choice,1800\n\
1,lesson,1800\n\
1,meal,1800\n\
1,nap,3600\n\
1,lesson,900\n\
";

fn t(id: u32) -> TargetId {
    TargetId(id)
}

/// Build and validate the demo facility.
pub fn build() -> Result<Facility> {
    let mut schedules =
        load_schedules_reader(Cursor::new(SCHEDULE_CSV)).context("parsing schedule CSV")?;

    let sun = ClassSite {
        id: ClassId(0),
        name: "Sun".into(),
        area: AreaGrid::new(
            vec![t(100), t(101), t(102), t(103), t(104), t(105)],
            2,
            3,
        ),
        chairs: (110..114).map(TargetId).collect(),
        nap_spots: (120..124).map(TargetId).collect(),
        leader_position: t(101),
        toilet_route: vec![],
        kitchen_route: vec![],
        schedule: schedules.remove(&ClassId(0)).context("class 0 schedule")?,
        students: (500..504).map(AgentId).collect(),
        staff: vec![AgentId(600), AgentId(601)],
    };

    let moon = ClassSite {
        id: ClassId(1),
        name: "Moon".into(),
        area: AreaGrid::new(
            vec![t(200), t(201), t(202), t(203), t(204), t(205)],
            2,
            3,
        ),
        chairs: (210..214).map(TargetId).collect(),
        nap_spots: (220..224).map(TargetId).collect(),
        leader_position: t(201),
        // Across the building: thread the corridor doorway both ways.
        toilet_route: vec![t(90)],
        kitchen_route: vec![t(91)],
        schedule: schedules.remove(&ClassId(1)).context("class 1 schedule")?,
        students: (510..514).map(AgentId).collect(),
        staff: vec![AgentId(610), AgentId(611)],
    };

    let config = FacilityConfig {
        seed: SEED,
        classes: vec![sun, moon],
        shared: SharedSites {
            kitchenette: vec![t(30), t(31)],
            break_room: vec![t(32), t(33)],
            hangout_break_room: vec![t(34), t(35)],
            hangout_kitchenette: vec![t(36), t(37)],
            office_seats: vec![t(40), t(41)],
            principal_desk: t(42),
            exit: t(43),
        },
        toilet: ToiletConfig {
            queue_positions: (50..54).map(TargetId).collect(),
            cubicles: (60..63).map(TargetId).collect(),
            sinks: (70..73).map(TargetId).collect(),
            sink_wait_area: t(75),
            sink_wait_cap: 4,
            queue_retry_probability: 0.4,
        },
        floaters: vec![AgentId(700), AgentId(701)],
        principal: AgentId(800),
        rotation_period_secs: 3600.0,
    };

    Facility::new(config, catalog()).context("validating facility")
}

/// Floor-plan coordinates for every target the configuration references.
fn catalog() -> TargetCatalog {
    let mut pairs: Vec<(TargetId, Point2)> = Vec::new();

    // Class Sun: a 2x3 area near the toilet wing.
    grid_block(&mut pairs, 100, Point2::new(5.0, 5.0), 2, 3);
    row(&mut pairs, 110, 4, Point2::new(5.0, 9.0)); // chairs
    row(&mut pairs, 120, 4, Point2::new(5.0, 11.0)); // nap spots

    // Class Moon: across the building.
    grid_block(&mut pairs, 200, Point2::new(45.0, 5.0), 2, 3);
    row(&mut pairs, 210, 4, Point2::new(45.0, 9.0));
    row(&mut pairs, 220, 4, Point2::new(45.0, 11.0));

    // Corridor waypoints between Moon and the shared wing.
    pairs.push((t(90), Point2::new(30.0, 8.0)));
    pairs.push((t(91), Point2::new(30.0, 12.0)));

    // Shared wing: kitchenette, break room, hangouts, office, exit.
    row(&mut pairs, 30, 2, Point2::new(18.0, 14.0));
    row(&mut pairs, 32, 2, Point2::new(21.0, 14.0));
    row(&mut pairs, 34, 2, Point2::new(24.0, 14.0));
    row(&mut pairs, 36, 2, Point2::new(27.0, 14.0));
    row(&mut pairs, 40, 2, Point2::new(20.0, 18.0));
    pairs.push((t(42), Point2::new(22.0, 18.0)));
    pairs.push((t(43), Point2::new(0.0, 0.0)));

    // Toilet wing: queue, cubicles, sinks, sink-waiting area.
    row(&mut pairs, 50, 4, Point2::new(12.0, 2.0));
    row(&mut pairs, 60, 3, Point2::new(14.0, 0.5));
    row(&mut pairs, 70, 3, Point2::new(17.0, 0.5));
    pairs.push((t(75), Point2::new(16.0, 2.5)));

    TargetCatalog::from_pairs(pairs)
}

/// `count` targets in a row, 1.0 apart, starting at `origin`.
fn row(pairs: &mut Vec<(TargetId, Point2)>, base: u32, count: u32, origin: Point2) {
    for i in 0..count {
        pairs.push((t(base + i), Point2::new(origin.x + i as f64 * 1.5, origin.y)));
    }
}

/// `rows x cols` targets spaced 1.5 apart, row-major from `origin`.
fn grid_block(
    pairs: &mut Vec<(TargetId, Point2)>,
    base: u32,
    origin: Point2,
    rows: u32,
    cols: u32,
) {
    for r in 0..rows {
        for c in 0..cols {
            pairs.push((
                t(base + r * cols + c),
                Point2::new(origin.x + c as f64 * 1.5, origin.y + r as f64 * 1.5),
            ));
        }
    }
}
