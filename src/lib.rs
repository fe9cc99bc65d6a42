//! Tabular Q-learning on small grid worlds
//!
//! This crate provides:
//! - A rectangular grid environment with a goal, hazards and optional sliding moves
//! - A lazily populated Q-value table with epsilon-greedy action selection
//! - An episodic training pipeline with pluggable observers
//! - Greedy path extraction and per-cell value dumps
//! - Multi-level campaigns on randomly generated layouts, plus CSV/JSON exports

pub mod app;
pub mod cli;
pub mod error;
pub mod export;
pub mod grid;
pub mod pipeline;
pub mod ports;
pub mod q_learning;

pub use app::{GridSession, SessionConfig};
pub use error::{Error, Result};
pub use grid::{Action, Cell, GridEnvironment, LevelLayout};
pub use pipeline::{LevelCampaign, LevelPlan, LevelReport, TrainingPipeline, TrainingResult};
pub use q_learning::{QLearningAgent, QTable, Trajectory, ValueDump};
