//! Grid coordinates

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A grid position, ordered by `(row, col)`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Translate by a signed delta, returning `None` when the result would leave
    /// the `rows x cols` rectangle.
    pub fn offset(self, delta: (isize, isize), rows: usize, cols: usize) -> Option<Cell> {
        let row = self.row.checked_add_signed(delta.0)?;
        let col = self.col.checked_add_signed(delta.1)?;
        (row < rows && col < cols).then_some(Cell { row, col })
    }

    /// Manhattan distance between two cells
    pub fn manhattan(self, other: Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl FromStr for Cell {
    type Err = Error;

    /// Parse `"ROW,COL"` (whitespace around either number is ignored).
    fn from_str(s: &str) -> Result<Self> {
        let parse_err = || Error::ParseCell {
            input: s.to_string(),
        };
        let (row, col) = s.split_once(',').ok_or_else(parse_err)?;
        let row = row.trim().parse().map_err(|_| parse_err())?;
        let col = col.trim().parse().map_err(|_| parse_err())?;
        Ok(Cell { row, col })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_stays_in_bounds() {
        let corner = Cell::new(0, 0);
        assert_eq!(corner.offset((-1, 0), 3, 3), None);
        assert_eq!(corner.offset((0, -1), 3, 3), None);
        assert_eq!(corner.offset((1, 0), 3, 3), Some(Cell::new(1, 0)));

        let far = Cell::new(2, 2);
        assert_eq!(far.offset((1, 0), 3, 3), None);
        assert_eq!(far.offset((0, 1), 3, 3), None);
    }

    #[test]
    fn test_ordering_is_row_major() {
        let mut cells = vec![Cell::new(1, 0), Cell::new(0, 2), Cell::new(0, 1)];
        cells.sort();
        assert_eq!(cells, vec![Cell::new(0, 1), Cell::new(0, 2), Cell::new(1, 0)]);
    }

    #[test]
    fn test_parse() {
        assert_eq!("2,3".parse::<Cell>().unwrap(), Cell::new(2, 3));
        assert_eq!(" 4 , 0 ".parse::<Cell>().unwrap(), Cell::new(4, 0));
        assert!(matches!(
            "4".parse::<Cell>(),
            Err(Error::ParseCell { .. })
        ));
        assert!("-1,2".parse::<Cell>().is_err());
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(Cell::new(0, 0).manhattan(Cell::new(3, 3)), 6);
        assert_eq!(Cell::new(2, 1).manhattan(Cell::new(2, 1)), 0);
    }
}
