//! Observer pattern for training pipelines
//!
//! Observers allow composable data collection during training without coupling
//! training logic to specific output formats.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
    sync::{Arc, Mutex},
};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::training::{EpisodeOutcome, EpisodeSummary};
use crate::{Result, ports::Observer, q_learning::Transition};

/// Observation of a single step during an episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepObservation {
    /// Step number within episode
    pub step_num: usize,
    /// Transition taken
    #[serde(flatten)]
    pub transition: Transition,
    /// Q(state, action) after the update
    pub updated_value: f64,
}

/// Complete observation of a training episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    /// Level the episode belongs to, when run inside a campaign
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<usize>,
    /// Episode number
    pub episode: usize,
    /// Final outcome
    pub outcome: EpisodeOutcome,
    /// Undiscounted return
    pub total_reward: f64,
    /// Steps in the episode
    pub steps: Vec<StepObservation>,
}

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    label: String,
    goals: usize,
    hazards: usize,
}

impl ProgressObserver {
    /// Create a new progress observer
    pub fn new() -> Self {
        Self::with_label("episodes")
    }

    /// Progress observer whose bar shows `label` after the counter
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            progress_bar: None,
            label: label.into(),
            goals: 0,
            hazards: 0,
        }
    }

    fn message(&self) -> String {
        format!("goal:{} hazard:{}", self.goals, self.hazards)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> Result<()> {
        let pb = ProgressBar::new(total_episodes as u64);
        let template = format!(
            "[{{elapsed_precise}}] {{bar:40.cyan/blue}} {{pos}}/{{len}} {} ({{msg}})",
            self.label
        );
        pb.set_style(
            ProgressStyle::default_bar()
                .template(&template)
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.goals = 0;
        self.hazards = 0;
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        match summary.outcome {
            EpisodeOutcome::ReachedGoal => self.goals += 1,
            EpisodeOutcome::HitHazard => self.hazards += 1,
            EpisodeOutcome::DeadEnd | EpisodeOutcome::Truncated => {}
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(summary.episode as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks episode outcomes, lengths and returns
#[derive(Debug, Clone, Default)]
pub struct MetricsObserver {
    goals: usize,
    hazards: usize,
    dead_ends: usize,
    truncated: usize,
    episode_lengths: Vec<usize>,
    returns: Vec<f64>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_episodes(&self) -> usize {
        self.episode_lengths.len()
    }

    /// Share of episodes that reached the goal
    pub fn success_rate(&self) -> f64 {
        if self.total_episodes() == 0 {
            0.0
        } else {
            self.goals as f64 / self.total_episodes() as f64
        }
    }

    /// Get average episode length
    pub fn avg_episode_length(&self) -> f64 {
        if self.episode_lengths.is_empty() {
            0.0
        } else {
            self.episode_lengths.iter().sum::<usize>() as f64 / self.episode_lengths.len() as f64
        }
    }

    /// Mean return over the last `window` episodes
    pub fn recent_mean_return(&self, window: usize) -> f64 {
        let tail = &self.returns[self.returns.len().saturating_sub(window)..];
        if tail.is_empty() {
            0.0
        } else {
            tail.iter().sum::<f64>() / tail.len() as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_episodes: self.total_episodes(),
            goals: self.goals,
            hazards: self.hazards,
            dead_ends: self.dead_ends,
            truncated: self.truncated,
            success_rate: self.success_rate(),
            avg_episode_length: self.avg_episode_length(),
            recent_mean_return: self.recent_mean_return(100),
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_episodes: usize,
    pub goals: usize,
    pub hazards: usize,
    pub dead_ends: usize,
    pub truncated: usize,
    pub success_rate: f64,
    pub avg_episode_length: f64,
    /// Mean return over the final 100 episodes
    pub recent_mean_return: f64,
}

impl Observer for MetricsObserver {
    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        match summary.outcome {
            EpisodeOutcome::ReachedGoal => self.goals += 1,
            EpisodeOutcome::HitHazard => self.hazards += 1,
            EpisodeOutcome::DeadEnd => self.dead_ends += 1,
            EpisodeOutcome::Truncated => self.truncated += 1,
        }
        self.episode_lengths.push(summary.steps);
        self.returns.push(summary.total_reward);
        Ok(())
    }
}

/// Metrics observer that can be read back after the pipeline consumed it
#[derive(Debug, Clone, Default)]
pub struct SharedMetricsObserver {
    inner: Arc<Mutex<MetricsObserver>>,
}

impl SharedMetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current metrics; a poisoned lock still yields the last written state.
    pub fn summary(&self) -> MetricsSummary {
        match self.inner.lock() {
            Ok(metrics) => metrics.summary(),
            Err(poisoned) => poisoned.into_inner().summary(),
        }
    }
}

impl Observer for SharedMetricsObserver {
    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        match self.inner.lock() {
            Ok(mut metrics) => metrics.on_episode_end(summary),
            Err(poisoned) => poisoned.into_inner().on_episode_end(summary),
        }
    }
}

/// JSONL observer - Writes one JSON object per episode
pub struct JsonlObserver {
    writer: BufWriter<File>,
    level: Option<usize>,
    current_steps: Vec<StepObservation>,
}

impl JsonlObserver {
    /// Create a new JSONL observer (truncates `path`)
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::from_file(file))
    }

    /// Append to `path`, creating it if needed
    pub fn append<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::options().create(true).append(true).open(path)?;
        Ok(Self::from_file(file))
    }

    fn from_file(file: File) -> Self {
        Self {
            writer: BufWriter::new(file),
            level: None,
            current_steps: Vec::new(),
        }
    }

    /// Tag every written episode with a level number
    pub fn for_level(mut self, level: usize) -> Self {
        self.level = Some(level);
        self
    }
}

impl Observer for JsonlObserver {
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        self.current_steps.clear();
        Ok(())
    }

    fn on_step(
        &mut self,
        _episode: usize,
        step_num: usize,
        transition: &Transition,
        updated_value: f64,
    ) -> Result<()> {
        self.current_steps.push(StepObservation {
            step_num,
            transition: *transition,
            updated_value,
        });
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary) -> Result<()> {
        let observation = Observation {
            level: self.level,
            episode: summary.episode,
            outcome: summary.outcome,
            total_reward: summary.total_reward,
            steps: std::mem::take(&mut self.current_steps),
        };

        // Write as JSONL (one JSON object per line)
        serde_json::to_writer(&mut self.writer, &observation)?;
        writeln!(&mut self.writer)?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
