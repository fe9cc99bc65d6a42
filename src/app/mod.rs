//! Application layer: session configuration and the per-level session object.
//!
//! A [`GridSession`] owns everything one level needs: the validated layout, the
//! environment built from it, a Q-learning agent with an empty table and the
//! single random generator shared by exploration and sliding. The level driver
//! creates one per level and drops it before the next, so nothing learned on
//! one level leaks into another.
//!
//! # Usage
//!
//! ```
//! use slipgrid::app::{GridSession, SessionConfig};
//! use slipgrid::grid::{Cell, LevelLayout};
//!
//! let layout = LevelLayout::new(4, 4, Cell::new(0, 0), Cell::new(3, 3), [])?;
//! let mut session = GridSession::new(layout, false, SessionConfig::new().with_seed(42))?;
//!
//! session.train(500)?;
//! let path = session.extract_path()?;
//! let values = session.dump_values();
//! assert_eq!(values.rows, 4);
//! # let _ = path;
//! # Ok::<(), slipgrid::Error>(())
//! ```

pub mod config;
pub mod session;

pub use config::SessionConfig;
pub use session::GridSession;
