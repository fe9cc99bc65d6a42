//! Subcommands of the `slipgrid` binary

pub mod run;
pub mod solve;
