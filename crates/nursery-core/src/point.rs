//! Flat 2-D coordinates and distance checks.
//!
//! The facility floor plan is planar and small, so plain Euclidean distance
//! is exact enough; positions arrive from the movement engine in the same
//! coordinate frame the target catalog uses.

/// Distance (in catalog units) at which an agent counts as having reached a
/// waypoint.  Matches the movement engine's target-switch radius.
pub const ARRIVAL_TOLERANCE: f64 = 1.0;

/// A point on the facility floor plan.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const ORIGIN: Point2 = Point2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point2) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// `true` if `other` lies within [`ARRIVAL_TOLERANCE`] of `self`.
    #[inline]
    pub fn reached(self, other: Point2) -> bool {
        self.distance(other) <= ARRIVAL_TOLERANCE
    }
}

impl From<(f64, f64)> for Point2 {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}
