//! Transition and reward model for a single level

use std::collections::HashSet;

use rand::Rng;

use super::{Action, ActionSet, Cell, LevelLayout};
use crate::error::{Error, Result};

/// Reward for entering the goal cell
pub const GOAL_REWARD: f64 = 100.0;
/// Reward for entering a hazard cell
pub const HAZARD_REWARD: f64 = -100.0;
/// Step cost on a deterministic grid
pub const PLAIN_STEP_REWARD: f64 = -1.0;
/// Step cost when sliding is enabled
pub const SLIDING_STEP_REWARD: f64 = -2.0;
/// Chance that a move slides one extra cell
pub const DEFAULT_SLIDE_PROBABILITY: f64 = 0.3;

/// Grid bounds, goal, hazards and the (optionally stochastic) movement rule
#[derive(Debug, Clone)]
pub struct GridEnvironment {
    rows: usize,
    cols: usize,
    goal: Cell,
    hazards: HashSet<Cell>,
    sliding_enabled: bool,
    slide_probability: f64,
}

impl GridEnvironment {
    /// Build the environment for a validated layout.
    pub fn new(layout: &LevelLayout, sliding_enabled: bool) -> Self {
        Self {
            rows: layout.rows(),
            cols: layout.cols(),
            goal: layout.goal(),
            hazards: layout.hazards().iter().copied().collect(),
            sliding_enabled,
            slide_probability: DEFAULT_SLIDE_PROBABILITY,
        }
    }

    /// Override the slide chance (only consulted when sliding is enabled).
    pub fn with_slide_probability(mut self, probability: f64) -> Self {
        self.slide_probability = probability;
        self
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn goal(&self) -> Cell {
        self.goal
    }

    pub fn sliding_enabled(&self) -> bool {
        self.sliding_enabled
    }

    pub fn slide_probability(&self) -> f64 {
        self.slide_probability
    }

    pub fn is_hazard(&self, cell: Cell) -> bool {
        self.hazards.contains(&cell)
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Actions whose single-step target stays inside the grid
    pub fn valid_actions(&self, cell: Cell) -> ActionSet {
        ActionSet::filtered(|action| cell.offset(action.delta(), self.rows, self.cols).is_some())
    }

    /// Like [`valid_actions`](Self::valid_actions), but a cell with no way out is an error.
    pub fn require_actions(&self, cell: Cell) -> Result<ActionSet> {
        let actions = self.valid_actions(cell);
        if actions.is_empty() {
            return Err(Error::DegenerateCell { cell });
        }
        Ok(actions)
    }

    /// Apply `action` from `cell`.
    ///
    /// Moves one cell, or stays put at the boundary. With sliding enabled each
    /// call draws once: on success the delta is applied a second time, and the
    /// slide stops at the first sub-step that would leave the grid.
    pub fn step<R: Rng>(&self, cell: Cell, action: Action, rng: &mut R) -> Cell {
        let repeats = if self.sliding_enabled && rng.random_bool(self.slide_probability) {
            2
        } else {
            1
        };

        let mut current = cell;
        for _ in 0..repeats {
            match current.offset(action.delta(), self.rows, self.cols) {
                Some(next) => current = next,
                None => break,
            }
        }
        current
    }

    /// Reward observed on entering `cell`
    pub fn reward(&self, cell: Cell) -> f64 {
        if cell == self.goal {
            GOAL_REWARD
        } else if self.hazards.contains(&cell) {
            HAZARD_REWARD
        } else if self.sliding_enabled {
            SLIDING_STEP_REWARD
        } else {
            PLAIN_STEP_REWARD
        }
    }
}
