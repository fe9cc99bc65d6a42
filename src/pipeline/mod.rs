//! Training pipeline abstractions
//!
//! This module provides composable pipelines for:
//! - Training one session for a fixed episode budget
//! - Playing multi-level campaigns with fresh tables per level
//! - Recording observations during training

pub mod levels;
pub mod observers;
pub mod training;

pub use levels::{LevelCampaign, LevelPlan, LevelReport, ObserverFactory, SkippedHazard};
// Re-export observer implementations (adapters)
pub use observers::{
    JsonlObserver, MetricsObserver, MetricsSummary, Observation, ProgressObserver,
    SharedMetricsObserver, StepObservation,
};
pub use training::{
    EpisodeOutcome, EpisodeSummary, TrainingConfig, TrainingPipeline, TrainingResult,
};

pub use crate::ports::Observer;
