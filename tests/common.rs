//! Common test utilities for the slipgrid test suite.
//!
//! Layout builders and seeded sessions shared by the integration tests.

#![allow(dead_code)]

use rand::{SeedableRng, rngs::StdRng};
use slipgrid::{
    app::{GridSession, SessionConfig},
    grid::{Cell, GridEnvironment, LevelLayout},
};

/// Build a layout from plain `(row, col)` pairs, panicking on invalid placement.
pub fn layout(
    rows: usize,
    cols: usize,
    start: (usize, usize),
    goal: (usize, usize),
    hazards: &[(usize, usize)],
) -> LevelLayout {
    LevelLayout::new(
        rows,
        cols,
        start.into(),
        goal.into(),
        hazards.iter().map(|&h| Cell::from(h)),
    )
    .expect("test layout should be valid")
}

/// Session with default hyper-parameters and a fixed seed.
pub fn seeded_session(layout: LevelLayout, sliding: bool, seed: u64) -> GridSession {
    GridSession::new(layout, sliding, SessionConfig::new().with_seed(seed))
        .expect("default config is valid")
}

/// Open grid with no hazards; start and goal in opposite corners.
pub fn open_env(rows: usize, cols: usize, sliding: bool) -> GridEnvironment {
    let layout = layout(rows, cols, (0, 0), (rows - 1, cols - 1), &[]);
    GridEnvironment::new(&layout, sliding)
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
