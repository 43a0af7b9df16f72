use std::fmt;
use std::str::FromStr;

use crate::bitboard::Bitboard;
use crate::cell::Cell;
use crate::error::{LifeError, LifeResult};
use crate::life::Life;

/// A grid value tagged with its side length.
///
/// `Display` prints the grid as rows of space-separated `0`/`1` tokens.
/// The compact cell-list form `"N:r,c;r,c;..."` is produced by
/// [`Board::to_cell_list`] and parsed by `FromStr`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    grid: Bitboard,
    side: u8,
}

impl Board {
    pub fn new(life: &Life, grid: &Bitboard) -> Self {
        Board {
            grid: *grid & life.geometry().board_mask,
            side: life.side(),
        }
    }

    pub fn side(&self) -> u8 {
        self.side
    }

    pub fn grid(&self) -> Bitboard {
        self.grid
    }

    /// Engine matching this board's side length.
    pub fn life(&self) -> LifeResult<Life> {
        Life::new(self.side as usize)
    }

    pub fn is_alive(&self, cell: &Cell) -> bool {
        cell.is_valid(self.side) && self.grid.get(cell.to_index(self.side))
    }

    pub fn to_cell_list(&self) -> String {
        let cells: Vec<String> = self
            .grid
            .iter_ones()
            .map(|idx| {
                let cell = Cell::from_index(idx, self.side);
                format!("{},{}", cell.row, cell.col)
            })
            .collect();
        format!("{}:{}", self.side, cells.join(";"))
    }
}

impl FromStr for Board {
    type Err = LifeError;

    fn from_str(s: &str) -> LifeResult<Self> {
        let (side, cells) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| LifeError::InvalidPattern(format!("missing side prefix in {:?}", s)))?;
        let side: usize = side
            .trim()
            .parse()
            .map_err(|e| LifeError::InvalidPattern(format!("invalid side: {}", e)))?;
        let life = Life::new(side)?;

        let mut grid = life.empty();
        for cell in cells.split(';').map(str::trim).filter(|c| !c.is_empty()) {
            let (row, col) = cell
                .split_once(',')
                .ok_or_else(|| LifeError::InvalidPattern(format!("invalid cell: {}", cell)))?;
            let row: isize = row
                .trim()
                .parse()
                .map_err(|e| LifeError::InvalidPattern(format!("invalid row: {}", e)))?;
            let col: isize = col
                .trim()
                .parse()
                .map_err(|e| LifeError::InvalidPattern(format!("invalid column: {}", e)))?;
            grid = life.set(&grid, row, col)?;
        }

        Ok(life.board(&grid))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = self.side as usize;
        for row in 0..side {
            for col in 0..side {
                if col > 0 {
                    write!(f, " ")?;
                }
                let bit = self.grid.get(row * side + col) as u8;
                write!(f, "{}", bit)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
