//! Well-known starting configurations and an ASCII row parser.

use crate::bitboard::Bitboard;
use crate::error::{LifeError, LifeResult};
use crate::life::Life;

/// A named set of live cells, relative to its own top-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(u8, u8)],
}

pub const GLIDER: Pattern = Pattern {
    name: "glider",
    cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
};

pub const BLOCK: Pattern = Pattern {
    name: "block",
    cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
};

pub const BEEHIVE: Pattern = Pattern {
    name: "beehive",
    cells: &[(0, 1), (0, 2), (1, 0), (1, 3), (2, 1), (2, 2)],
};

pub const BLINKER: Pattern = Pattern {
    name: "blinker",
    cells: &[(0, 0), (0, 1), (0, 2)],
};

pub const TOAD: Pattern = Pattern {
    name: "toad",
    cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
};

pub const BEACON: Pattern = Pattern {
    name: "beacon",
    cells: &[(0, 0), (0, 1), (1, 0), (2, 3), (3, 2), (3, 3)],
};

pub const R_PENTOMINO: Pattern = Pattern {
    name: "r-pentomino",
    cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
};

pub const ALL: &[Pattern] = &[GLIDER, BLOCK, BEEHIVE, BLINKER, TOAD, BEACON, R_PENTOMINO];

pub fn by_name(name: &str) -> Option<&'static Pattern> {
    ALL.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

impl Pattern {
    /// Number of rows and columns spanned by the pattern.
    pub fn extent(&self) -> (usize, usize) {
        self.cells.iter().fold((0, 0), |(h, w), &(r, c)| {
            (h.max(r as usize + 1), w.max(c as usize + 1))
        })
    }

    /// Place the pattern with its top-left corner at `(row, col)`.
    pub fn place(&self, life: &Life, row: isize, col: isize) -> LifeResult<Bitboard> {
        life.from_cells(
            self.cells
                .iter()
                .map(|&(r, c)| (row + r as isize, col + c as isize)),
        )
    }
}

/// Parse rows of `#`/`1` (alive) and `.`/`0` (dead) into a grid, anchored
/// at the top-left corner. Short rows and missing rows are dead.
pub fn parse_rows(life: &Life, rows: &[&str]) -> LifeResult<Bitboard> {
    let mut grid = life.empty();
    for (row, line) in rows.iter().enumerate() {
        for (col, ch) in line.chars().enumerate() {
            match ch {
                '#' | '1' => grid = life.set(&grid, row as isize, col as isize)?,
                '.' | '0' => {
                    // Still reject dead cells that fall off the grid.
                    life.get(&grid, row as isize, col as isize)?;
                }
                _ => {
                    return Err(LifeError::InvalidPattern(format!(
                        "unexpected {:?} at row {}, column {}",
                        ch, row, col
                    )))
                }
            }
        }
    }
    Ok(grid)
}
