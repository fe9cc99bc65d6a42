//! Greedy path extraction after training

use std::{collections::HashSet, fmt};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::q_table::QTable;
use crate::{
    error::Result,
    grid::{Action, Cell, GridEnvironment},
    q_learning::policy::greedy_action,
};

/// Why a greedy walk stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathEnd {
    /// The goal cell was reached (or the walk started on it)
    ReachedGoal,
    /// No valid action from the current cell
    DeadEnd,
    /// The last action left the position unchanged
    Stalled,
    /// A deterministic walk came back to a cell it already visited
    Cycle,
    /// The step limit ran out
    StepLimit,
}

impl PathEnd {
    pub fn label(&self) -> &'static str {
        match self {
            PathEnd::ReachedGoal => "reached goal",
            PathEnd::DeadEnd => "dead end",
            PathEnd::Stalled => "stalled",
            PathEnd::Cycle => "cycle",
            PathEnd::StepLimit => "step limit",
        }
    }
}

/// Actions taken from the start cell under the greedy policy, with the cells
/// they led to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub start: Cell,
    pub actions: Vec<Action>,
    /// `cells[i]` is the position after `actions[i]`
    pub cells: Vec<Cell>,
    pub end: PathEnd,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Position after the last action
    pub fn final_cell(&self) -> Cell {
        self.cells.last().copied().unwrap_or(self.start)
    }

    pub fn reached_goal(&self) -> bool {
        self.end == PathEnd::ReachedGoal
    }

    /// Start cell followed by every visited cell
    pub fn visited(&self) -> impl Iterator<Item = Cell> + '_ {
        std::iter::once(self.start).chain(self.cells.iter().copied())
    }
}

impl fmt::Display for Trajectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols: Vec<String> = self.actions.iter().map(|a| a.to_string()).collect();
        write!(f, "{}", symbols.join(" "))
    }
}

/// Upper bound on greedy steps for a grid when none is configured
pub fn default_step_limit(env: &GridEnvironment) -> usize {
    env.rows() * env.cols() * 4
}

/// Follow the greedy policy from `start`.
///
/// Stops at the goal, when no action is valid, or after an action that leaves
/// the position unchanged (that action is still recorded). Hazards do not end
/// the walk. Without sliding the walk is deterministic, so revisiting a cell
/// also stops it.
/// `rng` only drives sliding; the table is never written.
pub fn extract_path<R: Rng>(
    table: &QTable,
    env: &GridEnvironment,
    start: Cell,
    step_limit: usize,
    rng: &mut R,
) -> Result<Trajectory> {
    let mut state = start;
    let mut actions = Vec::new();
    let mut cells = Vec::new();
    let mut seen = HashSet::from([start]);

    let end = loop {
        if state == env.goal() {
            break PathEnd::ReachedGoal;
        }
        if actions.len() >= step_limit {
            break PathEnd::StepLimit;
        }
        let Some(action) = greedy_action(table, env, state)? else {
            break PathEnd::DeadEnd;
        };

        let next_state = env.step(state, action, rng);
        actions.push(action);
        cells.push(next_state);

        if next_state == state {
            break PathEnd::Stalled;
        }
        if !env.sliding_enabled() && !seen.insert(next_state) && next_state != env.goal() {
            break PathEnd::Cycle;
        }
        state = next_state;
    };

    Ok(Trajectory {
        start,
        actions,
        cells,
        end,
    })
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::grid::LevelLayout;

    fn env(hazards: Vec<Cell>) -> GridEnvironment {
        let layout = LevelLayout::new(3, 3, Cell::new(0, 0), Cell::new(0, 2), hazards).unwrap();
        GridEnvironment::new(&layout, false)
    }

    #[test]
    fn test_follows_table_to_goal() {
        let env = env(vec![]);
        let mut table = QTable::new();
        table.set(Cell::new(0, 0), Action::Right, 5.0);
        table.set(Cell::new(0, 1), Action::Right, 5.0);
        let mut rng = StdRng::seed_from_u64(0);

        let path = extract_path(&table, &env, Cell::new(0, 0), 100, &mut rng).unwrap();
        assert_eq!(path.actions, vec![Action::Right, Action::Right]);
        assert_eq!(path.cells, vec![Cell::new(0, 1), Cell::new(0, 2)]);
        assert!(path.reached_goal());
        assert_eq!(path.to_string(), "R R");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_start_on_goal_is_empty() {
        let env = env(vec![]);
        let table = QTable::new();
        let mut rng = StdRng::seed_from_u64(0);
        let path = extract_path(&table, &env, Cell::new(0, 2), 100, &mut rng).unwrap();
        assert!(path.is_empty());
        assert_eq!(path.end, PathEnd::ReachedGoal);
    }

    #[test]
    fn test_cycle_detection_without_sliding() {
        let env = env(vec![]);
        let mut table = QTable::new();
        table.set(Cell::new(0, 0), Action::Down, 5.0);
        table.set(Cell::new(1, 0), Action::Up, 5.0);
        let mut rng = StdRng::seed_from_u64(0);

        let path = extract_path(&table, &env, Cell::new(0, 0), 100, &mut rng).unwrap();
        assert_eq!(path.actions, vec![Action::Down, Action::Up]);
        assert_eq!(path.end, PathEnd::Cycle);
    }

    #[test]
    fn test_walks_through_hazard() {
        let env = env(vec![Cell::new(0, 1)]);
        let mut table = QTable::new();
        table.set(Cell::new(0, 0), Action::Right, 5.0);
        table.set(Cell::new(0, 1), Action::Right, 5.0);
        let mut rng = StdRng::seed_from_u64(0);

        let path = extract_path(&table, &env, Cell::new(0, 0), 100, &mut rng).unwrap();
        assert_eq!(path.cells, vec![Cell::new(0, 1), Cell::new(0, 2)]);
        assert_eq!(path.end, PathEnd::ReachedGoal);
    }

    #[test]
    fn test_step_limit() {
        let layout = LevelLayout::new(3, 3, Cell::new(0, 0), Cell::new(2, 2), []).unwrap();
        let env = GridEnvironment::new(&layout, true).with_slide_probability(0.0);
        let mut table = QTable::new();
        table.set(Cell::new(0, 0), Action::Down, 5.0);
        table.set(Cell::new(1, 0), Action::Up, 5.0);
        let mut rng = StdRng::seed_from_u64(0);

        // Sliding mode skips revisit detection, so only the limit stops the walk.
        let path = extract_path(&table, &env, Cell::new(0, 0), 7, &mut rng).unwrap();
        assert_eq!(path.len(), 7);
        assert_eq!(path.end, PathEnd::StepLimit);
    }
}
