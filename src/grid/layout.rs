//! Level layouts: dimensions plus validated start, goal and hazard placement

use rand::{Rng, seq::IteratorRandom};
use serde::{Deserialize, Serialize};

use super::Cell;
use crate::error::{Error, Result};

/// Inclusive range for randomly drawn grid dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionRange {
    pub min: usize,
    pub max: usize,
}

impl DimensionRange {
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if min == 0 || min > max {
            return Err(Error::InvalidConfiguration {
                message: format!("dimension range {min}..={max} must satisfy 1 <= min <= max"),
            });
        }
        // A grid needs room for distinct start and goal cells.
        if max < 2 {
            return Err(Error::InvalidConfiguration {
                message: format!("dimension range {min}..={max} only allows a 1x1 grid"),
            });
        }
        Ok(Self { min, max })
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        rng.random_range(self.min..=self.max)
    }
}

impl Default for DimensionRange {
    /// Four to six cells per side.
    fn default() -> Self {
        Self { min: 4, max: 6 }
    }
}

/// Hazards to place on a generated level
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardRequest {
    /// Cells requested explicitly; invalid ones are skipped by the level driver
    pub fixed: Vec<Cell>,
    /// Additional hazards placed uniformly on free cells
    pub random: usize,
}

impl HazardRequest {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn fixed(cells: impl IntoIterator<Item = Cell>) -> Self {
        Self {
            fixed: cells.into_iter().collect(),
            random: 0,
        }
    }

    pub fn with_random(mut self, count: usize) -> Self {
        self.random = count;
        self
    }
}

/// A validated level: dimensions, start, goal and hazards
///
/// Every cell is in bounds and start, goal and hazards are pairwise distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelLayout {
    rows: usize,
    cols: usize,
    start: Cell,
    goal: Cell,
    hazards: Vec<Cell>,
}

impl LevelLayout {
    /// Validate and build a layout.
    pub fn new(
        rows: usize,
        cols: usize,
        start: Cell,
        goal: Cell,
        hazards: impl IntoIterator<Item = Cell>,
    ) -> Result<Self> {
        let mut layout = Self::open(rows, cols, start, goal)?;
        for hazard in hazards {
            layout.add_hazard(hazard)?;
        }
        Ok(layout)
    }

    /// Layout with no hazards yet.
    fn open(rows: usize, cols: usize, start: Cell, goal: Cell) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        let layout = Self {
            rows,
            cols,
            start,
            goal,
            hazards: Vec::new(),
        };
        layout.check_bounds("start", start)?;
        layout.check_bounds("goal", goal)?;
        if start == goal {
            return Err(Error::InvalidPlacement {
                role: "goal".to_string(),
                cell: goal,
                reason: "goal must differ from start".to_string(),
            });
        }
        Ok(layout)
    }

    /// Draw a fresh level: dimensions from `dims`, uniform start, and a uniform
    /// goal redrawn until it differs from the start. A 1x1 draw is discarded
    /// and both dimensions are drawn again.
    pub fn random<R: Rng>(rng: &mut R, dims: DimensionRange) -> Result<Self> {
        let (rows, cols) = loop {
            let rows = dims.sample(rng);
            let cols = dims.sample(rng);
            if rows * cols >= 2 {
                break (rows, cols);
            }
            if dims.max < 2 {
                return Err(Error::InvalidDimensions { rows, cols });
            }
        };

        let start = Cell::new(rng.random_range(0..rows), rng.random_range(0..cols));
        let mut goal = Cell::new(rng.random_range(0..rows), rng.random_range(0..cols));
        while goal == start {
            goal = Cell::new(rng.random_range(0..rows), rng.random_range(0..cols));
        }

        Self::open(rows, cols, start, goal)
    }

    /// Add one hazard, rejecting out-of-bounds cells and any overlap with start,
    /// goal or an existing hazard.
    pub fn add_hazard(&mut self, cell: Cell) -> Result<()> {
        self.check_bounds("hazard", cell)?;
        let clash = if cell == self.start {
            Some("hazard cannot sit on the start cell")
        } else if cell == self.goal {
            Some("hazard cannot sit on the goal cell")
        } else if self.hazards.contains(&cell) {
            Some("hazard already placed there")
        } else {
            None
        };
        if let Some(reason) = clash {
            return Err(Error::InvalidPlacement {
                role: "hazard".to_string(),
                cell,
                reason: reason.to_string(),
            });
        }
        self.hazards.push(cell);
        Ok(())
    }

    /// Place up to `count` hazards on uniformly chosen free cells.
    ///
    /// Returns how many were placed; fewer than `count` only when the grid runs
    /// out of free cells.
    pub fn add_random_hazards<R: Rng>(&mut self, count: usize, rng: &mut R) -> usize {
        let free: Vec<Cell> = self
            .cells()
            .filter(|&cell| cell != self.start && cell != self.goal && !self.hazards.contains(&cell))
            .collect();
        let chosen = free.into_iter().choose_multiple(rng, count);
        let placed = chosen.len();
        self.hazards.extend(chosen);
        placed
    }

    fn check_bounds(&self, role: &str, cell: Cell) -> Result<()> {
        if cell.row >= self.rows || cell.col >= self.cols {
            return Err(Error::InvalidPlacement {
                role: role.to_string(),
                cell,
                reason: format!("outside the {}x{} grid", self.rows, self.cols),
            });
        }
        Ok(())
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| Cell::new(row, col)))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    pub fn hazards(&self) -> &[Cell] {
        &self.hazards
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_rejects_zero_dimensions() {
        assert!(matches!(
            LevelLayout::new(0, 3, Cell::new(0, 0), Cell::new(0, 1), []),
            Err(Error::InvalidDimensions { rows: 0, cols: 3 })
        ));
    }

    #[test]
    fn test_rejects_overlapping_placements() {
        let start = Cell::new(0, 0);
        let goal = Cell::new(2, 2);
        assert!(LevelLayout::new(3, 3, start, start, []).is_err());
        assert!(LevelLayout::new(3, 3, start, goal, [start]).is_err());
        assert!(LevelLayout::new(3, 3, start, goal, [goal]).is_err());
        assert!(LevelLayout::new(3, 3, start, goal, [Cell::new(1, 1), Cell::new(1, 1)]).is_err());
        assert!(LevelLayout::new(3, 3, start, goal, [Cell::new(3, 0)]).is_err());
        assert!(LevelLayout::new(3, 3, start, Cell::new(0, 3), []).is_err());

        let ok = LevelLayout::new(3, 3, start, goal, [Cell::new(1, 1)]).unwrap();
        assert_eq!(ok.hazards(), &[Cell::new(1, 1)]);
    }

    #[test]
    fn test_random_layout_respects_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let layout = LevelLayout::random(&mut rng, DimensionRange::default()).unwrap();
            assert!((4..=6).contains(&layout.rows()));
            assert!((4..=6).contains(&layout.cols()));
            assert_ne!(layout.start(), layout.goal());
            assert!(layout.start().row < layout.rows() && layout.start().col < layout.cols());
            assert!(layout.goal().row < layout.rows() && layout.goal().col < layout.cols());
        }
    }

    #[test]
    fn test_random_hazards_fill_free_cells_only() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut layout = LevelLayout::new(2, 2, Cell::new(0, 0), Cell::new(1, 1), []).unwrap();
        let placed = layout.add_random_hazards(10, &mut rng);
        assert_eq!(placed, 2);
        let mut hazards = layout.hazards().to_vec();
        hazards.sort();
        assert_eq!(hazards, vec![Cell::new(0, 1), Cell::new(1, 0)]);
    }

    #[test]
    fn test_dimension_range_validation() {
        assert!(DimensionRange::new(0, 3).is_err());
        assert!(DimensionRange::new(5, 4).is_err());
        assert_eq!(DimensionRange::new(2, 2).unwrap(), DimensionRange { min: 2, max: 2 });
        assert!(DimensionRange::new(1, 1).is_err());
        assert!(DimensionRange::new(1, 2).is_ok());
    }

    #[test]
    fn test_smallest_range_never_fails() {
        let dims = DimensionRange::new(1, 2).unwrap();
        let mut drew_single_row = false;
        for seed in 0..300 {
            let mut rng = StdRng::seed_from_u64(seed);
            let layout = LevelLayout::random(&mut rng, dims).unwrap();
            assert!(layout.rows() * layout.cols() >= 2, "seed {seed}");
            assert_ne!(layout.start(), layout.goal());
            drew_single_row |= layout.rows() == 1;
        }
        assert!(drew_single_row);
    }

    #[test]
    fn test_degenerate_range_is_an_error() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            LevelLayout::random(&mut rng, DimensionRange { min: 1, max: 1 }),
            Err(Error::InvalidDimensions { rows: 1, cols: 1 })
        ));
    }
}
