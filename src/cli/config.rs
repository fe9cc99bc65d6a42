//! Shared configuration types for CLI commands

use std::path::PathBuf;

use clap::Args;
use serde::{Deserialize, Serialize};

use crate::app::SessionConfig;

/// Common configuration shared across commands
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
pub struct CommonConfig {
    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show a progress bar while training
    #[arg(long, default_value_t = false)]
    pub progress: bool,

    /// Log level progress at info
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            seed: None,
            progress: false,
            verbose: false,
        }
    }
}

/// Training flags shared by `run` and `solve`
#[derive(Args, Debug, Clone, Serialize, Deserialize)]
pub struct TrainingArgs {
    /// Training episodes per level
    #[arg(long, short = 'e', default_value_t = 1000)]
    pub episodes: usize,

    /// Let moves slide one extra cell with the configured probability
    #[arg(long, default_value_t = false)]
    pub sliding: bool,

    /// Learning rate α (0.0-1.0)
    #[arg(long, default_value_t = crate::q_learning::DEFAULT_LEARNING_RATE)]
    pub learning_rate: f64,

    /// Discount factor γ (0.0-1.0)
    #[arg(long, default_value_t = crate::q_learning::DEFAULT_DISCOUNT_FACTOR)]
    pub discount: f64,

    /// Exploration rate ε during training (0.0-1.0)
    #[arg(long, default_value_t = crate::q_learning::TRAINING_EPSILON)]
    pub epsilon: f64,

    /// Probability that a move slides one extra cell when sliding is on
    #[arg(long, default_value_t = crate::grid::DEFAULT_SLIDE_PROBABILITY)]
    pub slide_probability: f64,

    /// Cut training episodes off after this many steps
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Optional path for writing a JSON summary of every level
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Optional path for a CSV of per-cell best actions and values
    #[arg(long)]
    pub values_csv: Option<PathBuf>,

    /// Optional file for JSONL episode observations
    #[arg(long)]
    pub observations: Option<PathBuf>,
}

impl TrainingArgs {
    /// Session hyper-parameters for these flags
    pub fn session_config(&self, seed: Option<u64>) -> SessionConfig {
        let mut config = SessionConfig::new()
            .with_learning_rate(self.learning_rate)
            .with_discount_factor(self.discount)
            .with_epsilon(self.epsilon)
            .with_slide_probability(self.slide_probability);
        if let Some(seed) = seed {
            config = config.with_seed(seed);
        }
        if let Some(max_steps) = self.max_steps {
            config = config.with_max_steps(max_steps);
        }
        config
    }
}
