//! Episodic training pipeline

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::{
    Result,
    app::GridSession,
    ports::Observer,
    q_learning::Transition,
};

/// Training configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Number of training episodes
    pub episodes: usize,
}

impl TrainingConfig {
    pub fn new(episodes: usize) -> Self {
        Self { episodes }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self { episodes: 1000 }
    }
}

/// How an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EpisodeOutcome {
    /// The agent entered the goal cell
    ReachedGoal,
    /// The agent entered a hazard; no transition is taken from it
    HitHazard,
    /// The current cell had no valid action
    DeadEnd,
    /// The configured per-episode step cap ran out
    Truncated,
}

impl EpisodeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, EpisodeOutcome::ReachedGoal)
    }
}

impl fmt::Display for EpisodeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EpisodeOutcome::ReachedGoal => "goal",
            EpisodeOutcome::HitHazard => "hazard",
            EpisodeOutcome::DeadEnd => "dead-end",
            EpisodeOutcome::Truncated => "truncated",
        };
        f.write_str(label)
    }
}

/// Per-episode report handed to observers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub episode: usize,
    pub outcome: EpisodeOutcome,
    pub steps: usize,
    /// Undiscounted sum of rewards
    pub total_reward: f64,
}

/// Result of a training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Total episodes run
    pub total_episodes: usize,
    /// Episodes that reached the goal
    pub goals: usize,
    /// Episodes that ended on a hazard
    pub hazards: usize,
    /// Episodes that hit a cell with no valid action
    pub dead_ends: usize,
    /// Episodes cut off by the step cap
    pub truncated: usize,
    /// Share of episodes that reached the goal
    pub success_rate: f64,
    /// Mean steps per episode
    pub mean_steps: f64,
    /// Mean undiscounted return per episode
    pub mean_return: f64,
    /// Cells in the value table after training
    pub table_size: usize,
}

impl TrainingResult {
    /// Aggregate episode summaries
    pub fn from_episodes(episodes: &[EpisodeSummary], table_size: usize) -> Self {
        let total_episodes = episodes.len();
        let count = |outcome: EpisodeOutcome| episodes.iter().filter(|e| e.outcome == outcome).count();
        let goals = count(EpisodeOutcome::ReachedGoal);
        let mean = |f: fn(&EpisodeSummary) -> f64| {
            if total_episodes > 0 {
                episodes.iter().map(f).sum::<f64>() / total_episodes as f64
            } else {
                0.0
            }
        };

        Self {
            total_episodes,
            goals,
            hazards: count(EpisodeOutcome::HitHazard),
            dead_ends: count(EpisodeOutcome::DeadEnd),
            truncated: count(EpisodeOutcome::Truncated),
            success_rate: if total_episodes > 0 {
                goals as f64 / total_episodes as f64
            } else {
                0.0
            },
            mean_steps: mean(|e: &EpisodeSummary| e.steps as f64),
            mean_return: mean(|e: &EpisodeSummary| e.total_reward),
            table_size,
        }
    }

    /// Save result to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load result from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let result = serde_json::from_reader(file)?;
        Ok(result)
    }
}

/// Training pipeline: a fixed budget of Q-learning episodes on one session
pub struct TrainingPipeline {
    config: TrainingConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    /// Create a new training pipeline
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run every episode of the budget; there is no convergence check.
    ///
    /// The session's value table accumulates across episodes.
    pub fn run(&mut self, session: &mut GridSession) -> Result<TrainingResult> {
        for observer in &mut self.observers {
            observer.on_training_start(self.config.episodes)?;
        }

        let mut summaries = Vec::with_capacity(self.config.episodes);
        for episode in 0..self.config.episodes {
            let summary = self.run_episode(episode, session)?;
            trace!(
                episode,
                outcome = %summary.outcome,
                steps = summary.steps,
                "episode finished"
            );
            for observer in &mut self.observers {
                observer.on_episode_end(&summary)?;
            }
            summaries.push(summary);
        }

        for observer in &mut self.observers {
            observer.on_training_end()?;
        }

        session.record_episodes(self.config.episodes);
        let result = TrainingResult::from_episodes(&summaries, session.agent().q_table().len());
        debug!(
            episodes = result.total_episodes,
            goals = result.goals,
            hazards = result.hazards,
            table_size = result.table_size,
            "training finished"
        );
        if result.truncated > 0 {
            warn!(
                truncated = result.truncated,
                episodes = result.total_episodes,
                "episodes hit the step cap before reaching the goal or a hazard"
            );
        }
        Ok(result)
    }

    /// One episode from the start cell until goal, hazard, dead end or the
    /// optional step cap.
    fn run_episode(&mut self, episode: usize, session: &mut GridSession) -> Result<EpisodeSummary> {
        for observer in &mut self.observers {
            observer.on_episode_start(episode)?;
        }

        let start = session.layout().start();
        let max_steps = session.config().max_steps;
        let (env, agent, rng) = session.parts_mut();

        let mut state = start;
        let mut steps = 0;
        let mut total_reward = 0.0;

        let outcome = loop {
            if state == env.goal() {
                break EpisodeOutcome::ReachedGoal;
            }
            if max_steps.is_some_and(|cap| steps >= cap) {
                break EpisodeOutcome::Truncated;
            }

            agent.observe(state);
            let Some(action) = agent.select_action(env, state, rng)? else {
                break EpisodeOutcome::DeadEnd;
            };

            let next_state = env.step(state, action, rng);
            let reward = env.reward(next_state);
            agent.observe(next_state);

            let transition = Transition {
                state,
                action,
                reward,
                next_state,
            };
            let updated_value = agent.learn(&transition)?;

            for observer in &mut self.observers {
                observer.on_step(episode, steps, &transition, updated_value)?;
            }

            steps += 1;
            total_reward += reward;

            if env.is_hazard(next_state) {
                break EpisodeOutcome::HitHazard;
            }
            state = next_state;
        };

        Ok(EpisodeSummary {
            episode,
            outcome,
            steps,
            total_reward,
        })
    }
}
