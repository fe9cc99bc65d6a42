//! Grid world: cells, the action catalog, level layouts and the transition model

pub mod action;
pub mod cell;
pub mod environment;
pub mod layout;

pub use action::{ACTION_COUNT, Action, ActionSet};
pub use cell::Cell;
pub use environment::{
    DEFAULT_SLIDE_PROBABILITY, GOAL_REWARD, GridEnvironment, HAZARD_REWARD, PLAIN_STEP_REWARD,
    SLIDING_STEP_REWARD,
};
pub use layout::{DimensionRange, HazardRequest, LevelLayout};
