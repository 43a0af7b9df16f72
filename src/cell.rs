use crate::error::{LifeError, LifeResult};

/// A cell coordinate on a square grid. Rows and columns are zero-based
/// and never wrap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

impl Cell {
    pub fn new(row: u8, col: u8) -> Self {
        Cell { row, col }
    }

    /// Validate a signed coordinate pair against a grid of `side`.
    pub fn checked(row: isize, col: isize, side: u8) -> LifeResult<Self> {
        let in_range = |v: isize| v >= 0 && v < side as isize;
        if in_range(row) && in_range(col) {
            Ok(Cell {
                row: row as u8,
                col: col as u8,
            })
        } else {
            Err(LifeError::OutOfRange { row, col, side })
        }
    }

    pub fn from_index(index: usize, side: u8) -> Self {
        let s = side as usize;
        Cell {
            row: (index / s) as u8,
            col: (index % s) as u8,
        }
    }

    pub fn to_index(&self, side: u8) -> usize {
        self.row as usize * side as usize + self.col as usize
    }

    pub fn is_valid(&self, side: u8) -> bool {
        self.row < side && self.col < side
    }
}

impl From<Cell> for (usize, usize) {
    fn from(cell: Cell) -> Self {
        (cell.row as usize, cell.col as usize)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
