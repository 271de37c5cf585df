//! `TargetCatalog` — the static location lookup service.
//!
//! # JSON format
//!
//! The catalog file maps stringified target ids to `[x, y]` floor-plan
//! coordinates, the format exported by the facility geometry tooling:
//!
//! ```json
//! { "144": [21.5, 8.0], "103": [23.1, 6.4] }
//! ```
//!
//! Every walkable destination the scheduler can emit must be present; a
//! missing entry is a fatal configuration error, caught during facility
//! validation rather than mid-run.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use rustc_hash::FxHashMap;

use nursery_core::{Point2, TargetId};

use crate::{FacilityError, FacilityResult};

/// Read-only map from location identifier to floor-plan coordinate.
#[derive(Debug, Default, Clone)]
pub struct TargetCatalog {
    positions: FxHashMap<TargetId, Point2>,
}

impl TargetCatalog {
    /// Build a catalog from `(target, position)` pairs — the programmatic
    /// path used by tests and demos.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (TargetId, Point2)>,
    {
        Self {
            positions: pairs.into_iter().collect(),
        }
    }

    /// Load a catalog from a JSON file.
    pub fn from_path(path: &Path) -> FacilityResult<Self> {
        let file = std::fs::File::open(path).map_err(FacilityError::Io)?;
        Self::from_reader(file)
    }

    /// Like [`from_path`](TargetCatalog::from_path) but accepts any `Read`
    /// source.  Useful for testing (pass a `std::io::Cursor`).
    pub fn from_reader<R: Read>(reader: R) -> FacilityResult<Self> {
        let raw: HashMap<String, (f64, f64)> = serde_json::from_reader(reader)
            .map_err(|e| FacilityError::Parse(e.to_string()))?;

        let mut positions =
            FxHashMap::with_capacity_and_hasher(raw.len(), Default::default());
        for (key, (x, y)) in raw {
            let id = key.trim().parse::<u32>().map_err(|_| {
                FacilityError::Parse(format!("invalid target id {key:?}: expected a u32"))
            })?;
            positions.insert(TargetId(id), Point2::new(x, y));
        }
        Ok(Self { positions })
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    /// Coordinate of `target`, or `None` if the catalog does not know it.
    #[inline]
    pub fn get(&self, target: TargetId) -> Option<Point2> {
        self.positions.get(&target).copied()
    }

    /// Coordinate of `target`; unknown ids are a fatal configuration error.
    pub fn position(&self, target: TargetId) -> FacilityResult<Point2> {
        self.get(target).ok_or(FacilityError::UnknownTarget {
            target,
            context: "catalog lookup".into(),
        })
    }

    #[inline]
    pub fn contains(&self, target: TargetId) -> bool {
        self.positions.contains_key(&target)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
