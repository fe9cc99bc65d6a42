//! The fixed catalog of movement actions

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of actions in the catalog
pub const ACTION_COUNT: usize = 4;

/// A single-cell movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    /// All actions in enumeration order. Ties in value lookups resolve to the
    /// earliest entry of this array.
    pub const ALL: [Action; ACTION_COUNT] = [Action::Up, Action::Down, Action::Left, Action::Right];

    const DELTAS: [(isize, isize); ACTION_COUNT] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

    /// Position of this action in [`Action::ALL`]; used to index value arrays.
    pub const fn index(self) -> usize {
        match self {
            Action::Up => 0,
            Action::Down => 1,
            Action::Left => 2,
            Action::Right => 3,
        }
    }

    /// `(row, col)` displacement of one step
    pub const fn delta(self) -> (isize, isize) {
        Self::DELTAS[self.index()]
    }

    /// One-letter label used in rendered tables and paths
    pub fn symbol(self) -> char {
        match self {
            Action::Up => 'U',
            Action::Down => 'D',
            Action::Left => 'L',
            Action::Right => 'R',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// An ordered subset of [`Action::ALL`]
///
/// Always kept in enumeration order, so "first occurrence" tie-breaking can
/// iterate it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSet {
    actions: [Action; ACTION_COUNT],
    len: usize,
}

impl ActionSet {
    pub const fn empty() -> Self {
        Self {
            actions: [Action::Up; ACTION_COUNT],
            len: 0,
        }
    }

    pub const fn all() -> Self {
        Self {
            actions: Action::ALL,
            len: ACTION_COUNT,
        }
    }

    /// Build a set containing the actions accepted by `keep`, in enumeration order.
    pub fn filtered(mut keep: impl FnMut(Action) -> bool) -> Self {
        let mut set = Self::empty();
        for action in Action::ALL {
            if keep(action) {
                set.actions[set.len] = action;
                set.len += 1;
            }
        }
        set
    }

    pub fn as_slice(&self) -> &[Action] {
        &self.actions[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = Action> + '_ {
        self.as_slice().iter().copied()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, action: Action) -> bool {
        self.as_slice().contains(&action)
    }

    pub fn first(&self) -> Option<Action> {
        self.as_slice().first().copied()
    }
}

impl Default for ActionSet {
    fn default() -> Self {
        Self::empty()
    }
}
