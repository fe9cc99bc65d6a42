//! Configuration types for session creation.

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    grid::DEFAULT_SLIDE_PROBABILITY,
    q_learning::{DEFAULT_DISCOUNT_FACTOR, DEFAULT_LEARNING_RATE, TRAINING_EPSILON},
};

/// Configuration for a learning session.
///
/// Builder-style; the defaults are α = 0.1, γ = 0.9, ε = 0.1 and a 0.3 slide
/// chance, with no seed and no per-episode step cap.
///
/// # Examples
///
/// ```
/// use slipgrid::app::SessionConfig;
///
/// let config = SessionConfig::new()
///     .with_seed(42)
///     .with_epsilon(0.2)
///     .with_max_steps(500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Learning rate α
    pub learning_rate: f64,
    /// Discount factor γ
    pub discount_factor: f64,
    /// Exploration rate ε during training
    pub epsilon: f64,
    /// Chance that a move slides one extra cell when sliding is enabled
    pub slide_probability: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    /// Optional cap on steps per training episode
    pub max_steps: Option<usize>,
    /// Optional cap on greedy path length (defaults to four times the cell count)
    pub path_step_limit: Option<usize>,
}

impl SessionConfig {
    pub fn new() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            discount_factor: DEFAULT_DISCOUNT_FACTOR,
            epsilon: TRAINING_EPSILON,
            slide_probability: DEFAULT_SLIDE_PROBABILITY,
            seed: None,
            max_steps: None,
            path_step_limit: None,
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_discount_factor(mut self, discount_factor: f64) -> Self {
        self.discount_factor = discount_factor;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_slide_probability(mut self, probability: f64) -> Self {
        self.slide_probability = probability;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn with_path_step_limit(mut self, limit: usize) -> Self {
        self.path_step_limit = Some(limit);
        self
    }

    /// Check that every rate lies in `[0, 1]` and caps are non-zero.
    pub fn validate(&self) -> Result<()> {
        let unit = [
            ("learning rate", self.learning_rate),
            ("discount factor", self.discount_factor),
            ("epsilon", self.epsilon),
            ("slide probability", self.slide_probability),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfiguration {
                    message: format!("{name} must be within [0, 1], got {value}"),
                });
            }
        }
        if self.max_steps == Some(0) {
            return Err(Error::InvalidConfiguration {
                message: "max steps per episode must be positive".to_string(),
            });
        }
        if self.path_step_limit == Some(0) {
            return Err(Error::InvalidConfiguration {
                message: "path step limit must be positive".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}
