//! Q-learning agent
//!
//! Holds the Q-table and the TD hyper-parameters. The random source lives with
//! the session so that exploration and sliding draw from one generator.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    policy::{EpsilonGreedy, greedy_action},
    q_table::QTable,
};
use crate::{
    error::Result,
    grid::{Action, Cell, GridEnvironment},
};

/// Learning rate α used unless configured otherwise
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
/// Discount factor γ used unless configured otherwise
pub const DEFAULT_DISCOUNT_FACTOR: f64 = 0.9;

/// One observed step: the pre-transition pair, the reward and the successor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub state: Cell,
    pub action: Action,
    pub reward: f64,
    pub next_state: Cell,
}

/// Q-learning agent (off-policy TD control)
///
/// Learns the optimal action values by always updating toward the maximum
/// next-state value, regardless of the action the ε-greedy policy takes next.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    q_table: QTable,
    learning_rate: f64,
    discount_factor: f64,
    policy: EpsilonGreedy,
}

impl QLearningAgent {
    /// Create a new Q-learning agent
    ///
    /// # Arguments
    ///
    /// * `learning_rate` - α parameter (0.0 to 1.0)
    /// * `discount_factor` - γ parameter (0.0 to 1.0)
    /// * `epsilon` - Exploration rate used while training
    pub fn new(learning_rate: f64, discount_factor: f64, epsilon: f64) -> Self {
        Self {
            q_table: QTable::new(),
            learning_rate,
            discount_factor,
            policy: EpsilonGreedy::new(epsilon),
        }
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    pub fn epsilon(&self) -> f64 {
        self.policy.epsilon()
    }

    /// Make sure `cell` has a full row in the table.
    pub fn observe(&mut self, cell: Cell) {
        self.q_table.ensure(cell);
    }

    /// ε-greedy action selection
    pub fn select_action<R: Rng>(
        &mut self,
        env: &GridEnvironment,
        cell: Cell,
        rng: &mut R,
    ) -> Result<Option<Action>> {
        self.policy.choose(&mut self.q_table, env, cell, rng)
    }

    /// Greedy action selection; never explores or writes
    pub fn greedy_action(&self, env: &GridEnvironment, cell: Cell) -> Result<Option<Action>> {
        greedy_action(&self.q_table, env, cell)
    }

    /// Apply the TD update for one transition and return the new value.
    pub fn learn(&mut self, transition: &Transition) -> Result<f64> {
        self.q_table.ensure(transition.state);
        self.q_table.ensure(transition.next_state);
        self.q_table.q_learning_update(
            transition.state,
            transition.action,
            transition.reward,
            transition.next_state,
            self.learning_rate,
            self.discount_factor,
        )
    }

    /// Forget everything learned so far
    pub fn reset(&mut self) {
        self.q_table.reset();
    }
}

impl Default for QLearningAgent {
    fn default() -> Self {
        Self::new(
            DEFAULT_LEARNING_RATE,
            DEFAULT_DISCOUNT_FACTOR,
            super::policy::TRAINING_EPSILON,
        )
    }
}
