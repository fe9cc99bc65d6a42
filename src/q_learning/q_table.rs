//! Q-table implementation for temporal difference learning

use std::collections::HashMap;

use crate::{
    error::{Error, Result},
    grid::{ACTION_COUNT, Action, ActionSet, Cell},
};

/// Per-cell action values, indexed by [`Action::index`]
pub type ActionValues = [f64; ACTION_COUNT];

/// Q-table mapping cells to one value per action
///
/// A cell is either absent or holds a value for every action; entries are
/// created by [`QTable::ensure`] and never evicted.
#[derive(Debug, Clone, Default)]
pub struct QTable {
    /// Q-values: cell -> [Up, Down, Left, Right]
    q_values: HashMap<Cell, ActionValues>,
}

impl QTable {
    /// Create an empty Q-table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the entry for `cell` with every action at 0.0, unless it exists.
    pub fn ensure(&mut self, cell: Cell) {
        self.q_values.entry(cell).or_insert([0.0; ACTION_COUNT]);
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.q_values.contains_key(&cell)
    }

    /// All action values for `cell`, if it has been ensured
    pub fn values(&self, cell: Cell) -> Option<&ActionValues> {
        self.q_values.get(&cell)
    }

    fn entry(&self, cell: Cell) -> Result<&ActionValues> {
        let entry = self.q_values.get(&cell);
        debug_assert!(entry.is_some(), "value lookup on un-ensured cell {cell}");
        entry.ok_or(Error::UninitializedLookup { cell })
    }

    /// Get Q-value for a state-action pair
    pub fn get(&self, cell: Cell, action: Action) -> Result<f64> {
        Ok(self.entry(cell)?[action.index()])
    }

    /// Set Q-value for a state-action pair, creating the cell entry if needed
    pub fn set(&mut self, cell: Cell, action: Action, value: f64) {
        self.q_values
            .entry(cell)
            .or_insert([0.0; ACTION_COUNT])[action.index()] = value;
    }

    /// Select greedy action (highest Q-value) among `candidates`
    ///
    /// Ties go to the candidate that comes first in enumeration order. Panics in
    /// debug builds, and errors otherwise, when `cell` was never ensured.
    pub fn best_action(&self, cell: Cell, candidates: &ActionSet) -> Result<Action> {
        let values = self.entry(cell)?;
        let mut iter = candidates.iter();
        let first = iter.next().ok_or(Error::DegenerateCell { cell })?;
        Ok(iter.fold(first, |best, action| {
            if values[action.index()] > values[best.index()] {
                action
            } else {
                best
            }
        }))
    }

    /// Maximum Q-value over all four actions, regardless of grid bounds
    pub fn max_value(&self, cell: Cell) -> Result<f64> {
        Ok(self
            .entry(cell)?
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max))
    }

    /// Best action over all four actions and its value, first index winning ties
    pub fn best_overall(&self, cell: Cell) -> Option<(Action, f64)> {
        let values = self.q_values.get(&cell)?;
        let best = Action::ALL.into_iter().fold(Action::Up, |best, action| {
            if values[action.index()] > values[best.index()] {
                action
            } else {
                best
            }
        });
        Some((best, values[best.index()]))
    }

    /// Q-learning update: off-policy TD control
    ///
    /// Q(s,a) ← Q(s,a) + α[r + γ max_a' Q(s',a') - Q(s,a)]
    ///
    /// Both cells must already be ensured. The successor maximum is read before
    /// the current entry is written, which matters when `state == next_state`.
    pub fn q_learning_update(
        &mut self,
        state: Cell,
        action: Action,
        reward: f64,
        next_state: Cell,
        learning_rate: f64,
        discount_factor: f64,
    ) -> Result<f64> {
        let max_next_q = self.max_value(next_state)?;
        let current_q = self.get(state, action)?;
        let td_target = reward + discount_factor * max_next_q;
        let td_error = td_target - current_q;
        let new_q = current_q + learning_rate * td_error;
        self.set(state, action, new_q);
        Ok(new_q)
    }

    /// Drop every entry (a new level starts from scratch)
    pub fn reset(&mut self) {
        self.q_values.clear();
    }

    /// Number of cells with an entry
    pub fn len(&self) -> usize {
        self.q_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q_values.is_empty()
    }

    /// Iterate over every stored cell and its values (arbitrary order)
    pub fn iter(&self) -> impl Iterator<Item = (Cell, &ActionValues)> {
        self.q_values.iter().map(|(cell, values)| (*cell, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CELL: Cell = Cell::new(1, 1);

    #[test]
    fn test_qtable_initialization() {
        let mut qtable = QTable::new();
        assert!(qtable.values(CELL).is_none());
        qtable.ensure(CELL);
        assert_eq!(qtable.values(CELL), Some(&[0.0; ACTION_COUNT]));
        assert_eq!(qtable.get(CELL, Action::Left).unwrap(), 0.0);
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let mut qtable = QTable::new();
        qtable.ensure(CELL);
        qtable.set(CELL, Action::Down, 3.5);
        qtable.ensure(CELL);
        assert_eq!(qtable.get(CELL, Action::Down).unwrap(), 3.5);
        assert_eq!(qtable.len(), 1);
    }

    #[test]
    fn test_best_action_restricted_to_candidates() {
        let mut qtable = QTable::new();
        qtable.ensure(CELL);
        qtable.set(CELL, Action::Up, 9.0);
        qtable.set(CELL, Action::Left, 0.5);
        qtable.set(CELL, Action::Right, 1.5);

        let candidates = ActionSet::filtered(|a| a != Action::Up);
        assert_eq!(qtable.best_action(CELL, &candidates).unwrap(), Action::Right);
        assert_eq!(qtable.best_action(CELL, &ActionSet::all()).unwrap(), Action::Up);
    }

    #[test]
    fn test_best_action_ties_follow_enumeration_order() {
        let mut qtable = QTable::new();
        qtable.ensure(CELL);
        qtable.set(CELL, Action::Down, -1.0);
        let candidates = ActionSet::filtered(|a| a != Action::Up);
        // Left and Right tie at 0.0; Left comes first.
        assert_eq!(qtable.best_action(CELL, &candidates).unwrap(), Action::Left);
    }

    #[test]
    fn test_max_value_covers_all_actions() {
        let mut qtable = QTable::new();
        qtable.ensure(CELL);
        qtable.set(CELL, Action::Up, -4.0);
        qtable.set(CELL, Action::Down, -3.0);
        qtable.set(CELL, Action::Left, -2.0);
        qtable.set(CELL, Action::Right, -5.0);
        assert_eq!(qtable.max_value(CELL).unwrap(), -2.0);
    }

    #[test]
    fn test_best_overall() {
        let mut qtable = QTable::new();
        assert_eq!(qtable.best_overall(CELL), None);
        qtable.ensure(CELL);
        assert_eq!(qtable.best_overall(CELL), Some((Action::Up, 0.0)));
        qtable.set(CELL, Action::Right, 2.0);
        assert_eq!(qtable.best_overall(CELL), Some((Action::Right, 2.0)));
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_uninitialized_lookup_is_error() {
        let qtable = QTable::new();
        assert!(matches!(
            qtable.max_value(CELL),
            Err(Error::UninitializedLookup { .. })
        ));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "un-ensured cell")]
    fn test_uninitialized_lookup_asserts_in_debug() {
        let qtable = QTable::new();
        let _ = qtable.best_action(CELL, &ActionSet::all());
    }

    #[test]
    fn test_q_learning_update() {
        let mut qtable = QTable::new();
        let state = Cell::new(0, 0);
        let next_state = Cell::new(0, 1);
        qtable.ensure(state);
        qtable.ensure(next_state);
        qtable.set(next_state, Action::Down, 10.0);
        qtable.set(next_state, Action::Left, 20.0);

        let updated = qtable
            .q_learning_update(state, Action::Right, -1.0, next_state, 0.1, 0.9)
            .unwrap();

        // 0.0 + 0.1 * (-1.0 + 0.9 * 20.0 - 0.0) = 1.7
        assert!((updated - 1.7).abs() < 1e-12);
        assert!((qtable.get(state, Action::Right).unwrap() - 1.7).abs() < 1e-12);
    }

    #[test]
    fn test_self_loop_update_reads_successor_first() {
        let mut qtable = QTable::new();
        qtable.ensure(CELL);
        qtable.set(CELL, Action::Up, 10.0);

        // max over the old values is 10.0 (Up itself)
        qtable
            .q_learning_update(CELL, Action::Up, -1.0, CELL, 0.1, 0.9)
            .unwrap();

        // 10 + 0.1 * (-1 + 9 - 10) = 9.8
        assert!((qtable.get(CELL, Action::Up).unwrap() - 9.8).abs() < 1e-12);
    }
}
