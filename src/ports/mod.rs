//! Ports (trait boundaries) for external dependencies.
//!
//! This module defines the interfaces between the learning core and the
//! reporting infrastructure. The traits are owned by the core and implemented
//! by adapters elsewhere (see [`crate::pipeline::observers`]).

pub mod observer;

pub use observer::Observer;
