//! Q-learning over grid cells
//!
//! This module implements one-step Q-learning (off-policy TD control) for the
//! hazard grid. Values are stored per cell as one entry for each of the four
//! actions and bootstrapped from the best successor value.
//!
//! ## Pieces
//!
//! - [`QTable`]: lazily initialized cell → action-value table
//! - [`EpsilonGreedy`] / [`greedy_action`]: action selection
//! - [`QLearningAgent`]: table plus α, γ, ε
//! - [`extract_path`]: greedy walk used for reporting
//! - [`ValueDump`]: per-cell best action and value for reporting
//!
//! ## Usage Example
//!
//! ```
//! use rand::{SeedableRng, rngs::StdRng};
//! use slipgrid::grid::{Action, Cell, GridEnvironment, LevelLayout};
//! use slipgrid::q_learning::{QLearningAgent, Transition};
//!
//! let layout = LevelLayout::new(3, 3, Cell::new(0, 0), Cell::new(2, 2), [])?;
//! let env = GridEnvironment::new(&layout, false);
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut agent = QLearningAgent::new(
//!     0.1, // learning_rate
//!     0.9, // discount_factor
//!     0.1, // epsilon
//! );
//!
//! let state = layout.start();
//! if let Some(action) = agent.select_action(&env, state, &mut rng)? {
//!     let next_state = env.step(state, action, &mut rng);
//!     let reward = env.reward(next_state);
//!     agent.learn(&Transition { state, action, reward, next_state })?;
//! }
//! # Ok::<(), slipgrid::Error>(())
//! ```

pub mod agent;
pub mod path;
pub mod policy;
pub mod q_table;
pub mod values;

// Public re-exports
pub use agent::{DEFAULT_DISCOUNT_FACTOR, DEFAULT_LEARNING_RATE, QLearningAgent, Transition};
pub use path::{PathEnd, Trajectory, default_step_limit, extract_path};
pub use policy::{EpsilonGreedy, TRAINING_EPSILON, greedy_action};
pub use q_table::{ActionValues, QTable};
pub use values::{CellEstimate, ValueDump};
