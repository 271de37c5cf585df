//! `AreaGrid` — a rectangular arrangement of floor targets.
//!
//! Class areas are laid out as row-major grids so that "fidget near where
//! you already stand" can be answered with a constant-time neighbor lookup
//! instead of a distance scan.  Cells that fall outside the usable floor
//! (pillars, furniture) carry the [`TargetId::INVALID`] sentinel and are
//! skipped by every query.

use nursery_core::TargetId;

/// Neighborhood shape for [`AreaGrid::neighbors`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Connectivity {
    /// Up, down, left, right.
    Four,
    /// Four-connected plus diagonals.
    Eight,
}

/// Row-major grid of targets with hole sentinels.
#[derive(Debug, Clone)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct AreaGrid {
    /// `rows * cols` cells, row-major; holes are `TargetId::INVALID`.
    cells: Vec<TargetId>,
    rows: usize,
    cols: usize,
}

impl AreaGrid {
    /// Construct a grid.
    ///
    /// # Panics
    /// Panics in debug mode if `cells.len() != rows * cols`.
    pub fn new(cells: Vec<TargetId>, rows: usize, cols: usize) -> Self {
        debug_assert_eq!(cells.len(), rows * cols, "cell count must equal rows * cols");
        Self { cells, rows, cols }
    }

    /// Validate shape after deserialization; grids from config files go
    /// through here during facility validation.
    pub fn validate(&self) -> Result<(), String> {
        if self.cells.len() != self.rows * self.cols {
            return Err(format!(
                "grid has {} cells but claims {}x{}",
                self.cells.len(),
                self.rows,
                self.cols
            ));
        }
        if self.usable().next().is_none() {
            return Err("grid has no usable cells".into());
        }
        Ok(())
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// All usable (non-hole) targets in row-major order.
    pub fn usable(&self) -> impl Iterator<Item = TargetId> + '_ {
        self.cells
            .iter()
            .copied()
            .filter(|&t| t != TargetId::INVALID)
    }

    /// Usable targets collected into a `Vec` — the common candidate set for
    /// random target picks.
    pub fn usable_vec(&self) -> Vec<TargetId> {
        self.usable().collect()
    }

    /// `true` if `target` is a usable cell of this grid.
    pub fn contains(&self, target: TargetId) -> bool {
        target != TargetId::INVALID && self.cells.contains(&target)
    }

    /// Usable neighbors of `of` under the given connectivity.
    ///
    /// Returns an empty `Vec` if `of` is not a cell of this grid; callers
    /// fall back to the full usable set in that case.
    pub fn neighbors(&self, of: TargetId, connectivity: Connectivity) -> Vec<TargetId> {
        let Some(index) = self.cells.iter().position(|&t| t == of) else {
            return Vec::new();
        };
        let (row, col) = (index / self.cols, index % self.cols);

        const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        const DIAGONAL: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

        let mut directions: Vec<(isize, isize)> = ORTHOGONAL.to_vec();
        if connectivity == Connectivity::Eight {
            directions.extend(DIAGONAL);
        }

        let mut found = Vec::with_capacity(directions.len());
        for &(dr, dc) in &directions {
            let (nr, nc) = (row as isize + dr, col as isize + dc);
            if nr < 0 || nc < 0 || nr >= self.rows as isize || nc >= self.cols as isize {
                continue;
            }
            let cell = self.cells[nr as usize * self.cols + nc as usize];
            if cell != TargetId::INVALID {
                found.push(cell);
            }
        }
        found
    }
}
