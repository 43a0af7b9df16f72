//! Conway's Game of Life on a bounded square grid, one bit per cell.
//!
//! ```
//! use bitlife::{patterns, Life};
//!
//! let life = Life::new(10).unwrap();
//! let glider = patterns::GLIDER.place(&life, 0, 0).unwrap();
//! let gens = life.run(&glider, 4).unwrap();
//! assert_eq!(gens.len(), 5);
//! assert_eq!(gens[4], patterns::GLIDER.place(&life, 1, 1).unwrap());
//! ```

pub mod bitboard;
pub mod board;
pub mod cell;
pub mod error;
pub mod history;
pub mod life;
pub mod patterns;

#[cfg(feature = "serde")]
pub mod serde_support;

pub use crate::bitboard::{Bitboard, Geometry};
pub use crate::board::Board;
pub use crate::cell::Cell;
pub use crate::error::{LifeError, LifeResult};
pub use crate::life::{Generations, Life, DEFAULT_SIDE, MAX_SIDE};

#[cfg(feature = "python")]
extern crate pyo3;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule(gil_used = false)]
fn bitlife(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use python_bindings::*;
    m.add_class::<PyLife>()?;
    m.add_class::<PyGrid>()?;
    m.add("MAX_SIDE", MAX_SIDE)?;
    Ok(())
}

#[cfg(feature = "python")]
mod python_bindings {
    use super::*;
    use pyo3::exceptions::{PyIndexError, PyValueError};

    impl From<LifeError> for PyErr {
        fn from(err: LifeError) -> PyErr {
            match err {
                LifeError::OutOfRange { .. } => PyIndexError::new_err(err.to_string()),
                _ => PyValueError::new_err(err.to_string()),
            }
        }
    }

    #[pyclass(name = "Grid", frozen)]
    #[derive(Clone)]
    pub struct PyGrid {
        grid: Bitboard,
    }

    #[pymethods]
    impl PyGrid {
        pub fn is_empty(&self) -> bool {
            self.grid.is_empty()
        }

        pub fn __eq__(&self, other: &PyGrid) -> bool {
            self.grid == other.grid
        }

        pub fn __hash__(&self) -> u64 {
            use std::hash::{Hash, Hasher};
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            self.grid.hash(&mut hasher);
            hasher.finish()
        }

        pub fn __repr__(&self) -> String {
            format!("Grid(population={})", self.grid.count())
        }
    }

    #[pyclass(name = "Life", frozen)]
    pub struct PyLife {
        life: Life,
    }

    impl PyLife {
        fn wrap(grid: Bitboard) -> PyGrid {
            PyGrid { grid }
        }
    }

    #[pymethods]
    impl PyLife {
        #[new]
        pub fn new(side: usize) -> PyResult<Self> {
            Ok(PyLife {
                life: Life::new(side)?,
            })
        }

        pub fn side(&self) -> usize {
            self.life.side() as usize
        }

        pub fn empty(&self) -> PyGrid {
            Self::wrap(self.life.empty())
        }

        pub fn from_cells(&self, cells: Vec<(isize, isize)>) -> PyResult<PyGrid> {
            Ok(Self::wrap(self.life.from_cells(cells)?))
        }

        #[staticmethod]
        pub fn parse(text: &str) -> PyResult<(PyLife, PyGrid)> {
            let board: Board = text.parse()?;
            Ok((PyLife { life: board.life()? }, Self::wrap(board.grid())))
        }

        pub fn pattern(&self, name: &str, row: isize, col: isize) -> PyResult<PyGrid> {
            let pattern = patterns::by_name(name)
                .ok_or_else(|| PyValueError::new_err(format!("unknown pattern: {}", name)))?;
            Ok(Self::wrap(pattern.place(&self.life, row, col)?))
        }

        pub fn get(&self, grid: &PyGrid, row: isize, col: isize) -> PyResult<bool> {
            Ok(self.life.get(&grid.grid, row, col)?)
        }

        pub fn set(&self, grid: &PyGrid, row: isize, col: isize) -> PyResult<PyGrid> {
            Ok(Self::wrap(self.life.set(&grid.grid, row, col)?))
        }

        pub fn clear(&self, grid: &PyGrid, row: isize, col: isize) -> PyResult<PyGrid> {
            Ok(Self::wrap(self.life.clear(&grid.grid, row, col)?))
        }

        pub fn toggle(&self, grid: &PyGrid, row: isize, col: isize) -> PyResult<PyGrid> {
            Ok(Self::wrap(self.life.toggle(&grid.grid, row, col)?))
        }

        pub fn population(&self, grid: &PyGrid) -> u32 {
            self.life.population(&grid.grid)
        }

        pub fn neighbor_count(&self, grid: &PyGrid, row: isize, col: isize) -> PyResult<u8> {
            Ok(self.life.neighbor_count(&grid.grid, row, col)?)
        }

        pub fn live_cells(&self, grid: &PyGrid) -> Vec<(usize, usize)> {
            self.life
                .live_cells(&grid.grid)
                .into_iter()
                .map(Into::into)
                .collect()
        }

        pub fn dead_cells(&self, grid: &PyGrid) -> Vec<(usize, usize)> {
            self.life
                .dead_cells(&grid.grid)
                .into_iter()
                .map(Into::into)
                .collect()
        }

        pub fn advance(&self, grid: &PyGrid) -> PyGrid {
            Self::wrap(self.life.advance(&grid.grid))
        }

        pub fn run(&self, grid: &PyGrid, iterations: i64) -> PyResult<Vec<PyGrid>> {
            Ok(self
                .life
                .run(&grid.grid, iterations)?
                .into_iter()
                .map(Self::wrap)
                .collect())
        }

        pub fn render(&self, grid: &PyGrid) -> String {
            self.life.board(&grid.grid).to_string()
        }

        pub fn to_cell_list(&self, grid: &PyGrid) -> String {
            self.life.board(&grid.grid).to_cell_list()
        }

        pub fn __repr__(&self) -> String {
            format!("Life(side={})", self.life.side())
        }
    }
}
