//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing training events,
//! allowing composable data collection without coupling training
//! logic to specific output formats or metrics.

use crate::{
    Result,
    pipeline::EpisodeSummary,
    q_learning::Transition,
};

/// Observer trait for monitoring training
///
/// Observers can be composed to collect different types of data during training.
/// Examples include:
/// - Progress bars for user feedback
/// - JSONL export of episode traces
/// - Outcome and return metrics
///
/// # Event Sequence
///
/// The observer methods are called in the following order:
/// 1. `on_training_start(total_episodes)` - Once at the beginning
/// 2. For each episode:
///    - `on_episode_start(episode)`
///    - `on_step(...)` - After each TD update
///    - `on_episode_end(summary)`
/// 3. `on_training_end()` - Once at the end
///
/// # Examples
///
/// ```no_run
/// use slipgrid::{pipeline::EpisodeSummary, ports::Observer};
///
/// struct GoalCounter {
///     goals: usize,
/// }
///
/// impl Observer for GoalCounter {
///     fn on_episode_end(&mut self, summary: &EpisodeSummary) -> slipgrid::Result<()> {
///         if summary.outcome.is_success() {
///             self.goals += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called when training starts.
    ///
    /// # Parameters
    ///
    /// * `total_episodes` - Number of episodes that will be run
    fn on_training_start(&mut self, _total_episodes: usize) -> Result<()> {
        Ok(())
    }

    /// Called when an episode starts.
    ///
    /// # Parameters
    ///
    /// * `episode` - Index of the episode (0-based)
    fn on_episode_start(&mut self, _episode: usize) -> Result<()> {
        Ok(())
    }

    /// Called for each transition, after its value update was applied.
    ///
    /// # Parameters
    ///
    /// * `episode` - Index of the current episode
    /// * `step_num` - Step number within the episode (0-based)
    /// * `transition` - The state, action, reward and successor of the step
    /// * `updated_value` - Q(state, action) after the update
    fn on_step(
        &mut self,
        _episode: usize,
        _step_num: usize,
        _transition: &Transition,
        _updated_value: f64,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when an episode ends, whatever the reason.
    fn on_episode_end(&mut self, _summary: &EpisodeSummary) -> Result<()> {
        Ok(())
    }

    /// Called when training completes.
    ///
    /// Use this to finalize outputs, close files, or display summaries.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}
