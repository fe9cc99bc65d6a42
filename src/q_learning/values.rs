//! Per-cell summaries of a Q-table for reporting

use serde::{Deserialize, Serialize};

use super::q_table::QTable;
use crate::grid::{Action, Cell};

/// Best action and value for one cell, or an explicit marker for cells the
/// table never saw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellEstimate {
    Unvisited,
    Estimate { action: Action, value: f64 },
}

impl CellEstimate {
    pub fn action(&self) -> Option<Action> {
        match self {
            CellEstimate::Unvisited => None,
            CellEstimate::Estimate { action, .. } => Some(*action),
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            CellEstimate::Unvisited => None,
            CellEstimate::Estimate { value, .. } => Some(*value),
        }
    }
}

/// Row-major grid of [`CellEstimate`]s
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueDump {
    pub rows: usize,
    pub cols: usize,
    cells: Vec<CellEstimate>,
}

impl ValueDump {
    /// Summarize `table` over a `rows x cols` grid.
    ///
    /// The best action is taken over all four stored values, so a boundary cell
    /// may report a direction that points off the grid. Ties go to the first
    /// action in `Action::ALL` order, so an all-zero row reports `Up`.
    pub fn from_table(table: &QTable, rows: usize, cols: usize) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let estimate = match table.best_overall(Cell::new(row, col)) {
                    Some((action, value)) => CellEstimate::Estimate { action, value },
                    None => CellEstimate::Unvisited,
                };
                cells.push(estimate);
            }
        }
        Self { rows, cols, cells }
    }

    pub fn get(&self, cell: Cell) -> Option<CellEstimate> {
        if cell.row >= self.rows || cell.col >= self.cols {
            return None;
        }
        self.cells.get(cell.row * self.cols + cell.col).copied()
    }

    /// Estimates in row-major order with their cells
    pub fn iter(&self) -> impl Iterator<Item = (Cell, CellEstimate)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, estimate)| (Cell::new(i / self.cols, i % self.cols), *estimate))
    }

    /// Number of cells with an estimate
    pub fn visited(&self) -> usize {
        self.cells
            .iter()
            .filter(|e| matches!(e, CellEstimate::Estimate { .. }))
            .count()
    }
}
