//! CLI infrastructure for the slipgrid toolkit
//!
//! This module provides the command-line interface for playing multi-level
//! campaigns on random grids and for solving a single hand-placed layout.

pub mod commands;
pub mod config;
pub mod output;
