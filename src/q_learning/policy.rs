//! Action selection over a Q-table

use rand::{Rng, seq::IndexedRandom};

use super::q_table::QTable;
use crate::{
    error::{Error, Result},
    grid::{Action, ActionSet, Cell, GridEnvironment},
};

/// Exploration rate used while training
pub const TRAINING_EPSILON: f64 = 0.1;

/// Valid actions at `cell`, or `None` when the cell is a dead end
fn available_actions(env: &GridEnvironment, cell: Cell) -> Result<Option<ActionSet>> {
    match env.require_actions(cell) {
        Ok(actions) => Ok(Some(actions)),
        Err(Error::DegenerateCell { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

/// ε-greedy selection restricted to in-bounds actions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpsilonGreedy {
    epsilon: f64,
}

impl EpsilonGreedy {
    pub fn new(epsilon: f64) -> Self {
        Self { epsilon }
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Ensure `cell`, then explore with probability ε or exploit otherwise.
    ///
    /// Returns `None` when `cell` has no valid action.
    pub fn choose<R: Rng>(
        &self,
        table: &mut QTable,
        env: &GridEnvironment,
        cell: Cell,
        rng: &mut R,
    ) -> Result<Option<Action>> {
        table.ensure(cell);
        let Some(actions) = available_actions(env, cell)? else {
            return Ok(None);
        };

        if rng.random::<f64>() < self.epsilon {
            // Explore: random valid action
            Ok(actions.as_slice().choose(rng).copied())
        } else {
            // Exploit: greedy action based on Q-values
            table.best_action(cell, &actions).map(Some)
        }
    }
}

impl Default for EpsilonGreedy {
    fn default() -> Self {
        Self::new(TRAINING_EPSILON)
    }
}

/// Strictly greedy selection; never explores and never writes to the table.
///
/// A cell the table has never seen behaves as if all its values were 0.0, so
/// the first valid action in enumeration order is returned.
pub fn greedy_action(table: &QTable, env: &GridEnvironment, cell: Cell) -> Result<Option<Action>> {
    let Some(actions) = available_actions(env, cell)? else {
        return Ok(None);
    };
    if !table.contains(cell) {
        return Ok(actions.first());
    }
    table.best_action(cell, &actions).map(Some)
}
