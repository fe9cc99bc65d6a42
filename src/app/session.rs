//! One level's environment, agent and random source

use rand::{SeedableRng, rngs::StdRng};

use super::config::SessionConfig;
use crate::{
    Result,
    grid::{Cell, GridEnvironment, LevelLayout},
    pipeline::{TrainingConfig, TrainingPipeline, TrainingResult},
    q_learning::{QLearningAgent, Trajectory, ValueDump, default_step_limit, extract_path},
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Environment plus an exclusively owned value table for a single level
#[derive(Debug, Clone)]
pub struct GridSession {
    layout: LevelLayout,
    env: GridEnvironment,
    agent: QLearningAgent,
    rng: StdRng,
    config: SessionConfig,
    episodes_trained: usize,
}

impl GridSession {
    /// Validate the placement and build a session with default hyper-parameters.
    pub fn configure(
        rows: usize,
        cols: usize,
        start: Cell,
        goal: Cell,
        hazards: impl IntoIterator<Item = Cell>,
        sliding_enabled: bool,
    ) -> Result<Self> {
        let layout = LevelLayout::new(rows, cols, start, goal, hazards)?;
        Self::new(layout, sliding_enabled, SessionConfig::default())
    }

    /// Build a session for an already validated layout.
    pub fn new(layout: LevelLayout, sliding_enabled: bool, config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let env = GridEnvironment::new(&layout, sliding_enabled)
            .with_slide_probability(config.slide_probability);
        let agent = QLearningAgent::new(config.learning_rate, config.discount_factor, config.epsilon);
        Ok(Self {
            layout,
            env,
            agent,
            rng: build_rng(config.seed),
            config,
            episodes_trained: 0,
        })
    }

    /// Run `episodes` training episodes without observers.
    pub fn train(&mut self, episodes: usize) -> Result<TrainingResult> {
        TrainingPipeline::new(TrainingConfig::new(episodes)).run(self)
    }

    /// Follow the greedy policy from the start cell. Leaves the table untouched.
    pub fn extract_path(&mut self) -> Result<Trajectory> {
        let limit = self
            .config
            .path_step_limit
            .unwrap_or_else(|| default_step_limit(&self.env));
        extract_path(
            self.agent.q_table(),
            &self.env,
            self.layout.start(),
            limit,
            &mut self.rng,
        )
    }

    /// Best action and value per cell, with `Unvisited` for cells never seen
    pub fn dump_values(&self) -> ValueDump {
        ValueDump::from_table(self.agent.q_table(), self.layout.rows(), self.layout.cols())
    }

    /// Empty the value table; the layout and random stream are kept.
    pub fn reset(&mut self) {
        self.agent.reset();
        self.episodes_trained = 0;
    }

    pub fn layout(&self) -> &LevelLayout {
        &self.layout
    }

    pub fn environment(&self) -> &GridEnvironment {
        &self.env
    }

    pub fn agent(&self) -> &QLearningAgent {
        &self.agent
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn episodes_trained(&self) -> usize {
        self.episodes_trained
    }

    pub(crate) fn record_episodes(&mut self, episodes: usize) {
        self.episodes_trained += episodes;
    }

    /// Borrow the pieces an episode loop mutates independently.
    pub(crate) fn parts_mut(&mut self) -> (&GridEnvironment, &mut QLearningAgent, &mut StdRng) {
        (&self.env, &mut self.agent, &mut self.rng)
    }
}
