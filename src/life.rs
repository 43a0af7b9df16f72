use log::{debug, trace};
use rand::Rng;

use crate::bitboard::{Bitboard, Geometry};
use crate::board::Board;
use crate::cell::Cell;
use crate::error::{LifeError, LifeResult};

/// Largest supported side length; a 32×32 grid fills the bitboard exactly.
pub const MAX_SIDE: usize = 32;

pub const DEFAULT_SIDE: u8 = 10;

/// Conway's Game of Life on a bounded `side × side` grid.
///
/// The engine holds only the grid geometry. Grid values are plain
/// [`Bitboard`]s passed in and returned by every operation; bit `row * side + col`
/// is the state of cell `(row, col)`, and bits at or above `side * side` are
/// ignored on input and always zero on output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Life {
    side: u8,
    geometry: Geometry,
}

impl Life {
    pub fn new(side: usize) -> LifeResult<Self> {
        if side == 0 || side > MAX_SIDE {
            return Err(LifeError::InvalidSize {
                side,
                max: MAX_SIDE,
            });
        }
        debug!("configured {}x{} grid", side, side);
        Ok(Life {
            side: side as u8,
            geometry: Geometry::new(side),
        })
    }

    pub fn side(&self) -> u8 {
        self.side
    }

    pub fn area(&self) -> usize {
        self.geometry.area
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The all-dead grid.
    pub fn empty(&self) -> Bitboard {
        Bitboard::empty()
    }

    /// Build a grid from a set of initially live coordinates.
    pub fn from_cells<I>(&self, cells: I) -> LifeResult<Bitboard>
    where
        I: IntoIterator<Item = (isize, isize)>,
    {
        let mut grid = Bitboard::empty();
        for (row, col) in cells {
            grid.set(self.index(row, col)?);
        }
        Ok(grid)
    }

    /// Fill each cell independently with probability `fill_rate`.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R, fill_rate: f64) -> LifeResult<Bitboard> {
        if !(0.0..=1.0).contains(&fill_rate) {
            return Err(LifeError::InvalidFillRate(fill_rate));
        }
        let mut grid = Bitboard::empty();
        for idx in 0..self.area() {
            if rng.random_bool(fill_rate) {
                grid.set(idx);
            }
        }
        Ok(grid)
    }

    /// Pair a grid value with this engine's side length for rendering.
    pub fn board(&self, grid: &Bitboard) -> Board {
        Board::new(self, grid)
    }

    #[inline]
    fn index(&self, row: isize, col: isize) -> LifeResult<usize> {
        Ok(Cell::checked(row, col, self.side)?.to_index(self.side))
    }

    #[inline]
    fn live(&self, grid: &Bitboard) -> Bitboard {
        *grid & self.geometry.board_mask
    }

    pub fn get(&self, grid: &Bitboard, row: isize, col: isize) -> LifeResult<bool> {
        Ok(grid.get(self.index(row, col)?))
    }

    pub fn set(&self, grid: &Bitboard, row: isize, col: isize) -> LifeResult<Bitboard> {
        let mut out = self.live(grid);
        out.set(self.index(row, col)?);
        Ok(out)
    }

    pub fn clear(&self, grid: &Bitboard, row: isize, col: isize) -> LifeResult<Bitboard> {
        let mut out = self.live(grid);
        out.clear(self.index(row, col)?);
        Ok(out)
    }

    pub fn toggle(&self, grid: &Bitboard, row: isize, col: isize) -> LifeResult<Bitboard> {
        let mut out = self.live(grid);
        out.toggle(self.index(row, col)?);
        Ok(out)
    }

    pub fn population(&self, grid: &Bitboard) -> u32 {
        self.live(grid).count()
    }

    /// Number of live cells among the up-to-eight neighbors of `(row, col)`.
    /// Cells beyond the grid edge count as dead.
    pub fn neighbor_count(&self, grid: &Bitboard, row: isize, col: isize) -> LifeResult<u8> {
        let idx = self.index(row, col)?;
        Ok(self.count_at(&self.live(grid), idx) as u8)
    }

    #[inline]
    fn count_at(&self, live: &Bitboard, index: usize) -> u32 {
        (self.geometry.neighborhood(&Bitboard::single(index)) & *live).count()
    }

    /// Live cells in row-major order.
    pub fn live_cells(&self, grid: &Bitboard) -> Vec<Cell> {
        self.live(grid)
            .iter_ones()
            .map(|idx| Cell::from_index(idx, self.side))
            .collect()
    }

    /// Dead cells in row-major order.
    pub fn dead_cells(&self, grid: &Bitboard) -> Vec<Cell> {
        (!*grid & self.geometry.board_mask)
            .iter_ones()
            .map(|idx| Cell::from_index(idx, self.side))
            .collect()
    }

    /// Compute the next generation.
    ///
    /// A live cell dies unless it has two or three live neighbors. A dead
    /// cell is born with exactly three; only dead cells touching at least
    /// one live cell are examined. Every count is taken against the
    /// unmodified input, so the death and birth sets never overlap.
    #[cfg_attr(feature = "hotpath", hotpath::measure)]
    pub fn advance(&self, grid: &Bitboard) -> Bitboard {
        let live = self.live(grid);

        let mut deaths = Bitboard::empty();
        for idx in live.iter_ones() {
            let n = self.count_at(&live, idx);
            if !(2..=3).contains(&n) {
                deaths.set(idx);
            }
        }

        let candidates = self.geometry.neighborhood(&live) & !live;
        let mut births = Bitboard::empty();
        for idx in candidates.iter_ones() {
            if self.count_at(&live, idx) == 3 {
                births.set(idx);
            }
        }

        trace!(
            "advance: {} live, {} deaths, {} births",
            live.count(),
            deaths.count(),
            births.count()
        );

        (live & !deaths) | births
    }

    /// Generation 0 through generation `iterations`, inclusive.
    #[cfg_attr(feature = "hotpath", hotpath::measure)]
    pub fn run(&self, grid: &Bitboard, iterations: i64) -> LifeResult<Vec<Bitboard>> {
        let iterations =
            usize::try_from(iterations).map_err(|_| LifeError::InvalidIterations(iterations))?;
        debug!("running {} generations", iterations);
        Ok(self.generations(grid).take(iterations + 1).collect())
    }

    /// Lazy, unbounded sequence of generations starting with `grid` itself.
    /// Clone the iterator to restart from any point.
    pub fn generations(&self, grid: &Bitboard) -> Generations {
        Generations {
            life: *self,
            current: self.live(grid),
        }
    }
}

impl Default for Life {
    fn default() -> Self {
        Life {
            side: DEFAULT_SIDE,
            geometry: Geometry::new(DEFAULT_SIDE as usize),
        }
    }
}

/// Iterator returned by [`Life::generations`].
#[derive(Clone, Debug)]
pub struct Generations {
    life: Life,
    current: Bitboard,
}

impl Iterator for Generations {
    type Item = Bitboard;

    fn next(&mut self) -> Option<Bitboard> {
        let out = self.current;
        self.current = self.life.advance(&out);
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid(life: &Life, cells: &[(isize, isize)]) -> Bitboard {
        life.from_cells(cells.iter().copied()).unwrap()
    }

    fn cells(life: &Life, grid: &Bitboard) -> Vec<(usize, usize)> {
        life.live_cells(grid).into_iter().map(Into::into).collect()
    }

    #[test]
    fn test_new_validates_side() {
        assert!(Life::new(1).is_ok());
        assert!(Life::new(32).is_ok());
        assert_eq!(
            Life::new(0),
            Err(LifeError::InvalidSize { side: 0, max: 32 })
        );
        assert_eq!(
            Life::new(33),
            Err(LifeError::InvalidSize { side: 33, max: 32 })
        );
    }

    #[test]
    fn test_default_is_ten() {
        let life = Life::default();
        assert_eq!(life.side(), 10);
        assert_eq!(life.area(), 100);
        assert_eq!(life, Life::new(10).unwrap());
    }

    #[test]
    fn test_empty_is_fixed_point() {
        let life = Life::new(10).unwrap();
        let empty = life.empty();
        assert_eq!(life.advance(&empty), empty);
        assert!(life.run(&empty, 5).unwrap().iter().all(Bitboard::is_empty));
    }

    #[test]
    fn test_lone_cell_dies() {
        let life = Life::new(3).unwrap();
        for row in 0..3 {
            for col in 0..3 {
                let g = grid(&life, &[(row, col)]);
                assert!(life.advance(&g).is_empty(), "({}, {}) survived", row, col);
            }
        }
    }

    #[test]
    fn test_block_is_still() {
        let life = Life::new(4).unwrap();
        let block = grid(&life, &[(1, 1), (1, 2), (2, 1), (2, 2)]);
        assert_eq!(life.advance(&block), block);
        assert_eq!(life.advance(&life.advance(&block)), block);
    }

    #[test]
    fn test_block_in_corner_is_still() {
        let life = Life::new(5).unwrap();
        let block = grid(&life, &[(3, 3), (3, 4), (4, 3), (4, 4)]);
        assert_eq!(life.advance(&block), block);
    }

    #[test]
    fn test_blinker_oscillates() {
        let life = Life::new(5).unwrap();
        let blinker = grid(&life, &[(1, 0), (1, 1), (1, 2)]);
        let next = life.advance(&blinker);
        assert_ne!(next, blinker);
        assert_eq!(cells(&life, &next), vec![(0, 1), (1, 1), (2, 1)]);
        assert_eq!(life.advance(&next), blinker);
    }

    #[test]
    fn test_glider_translates() {
        let life = Life::new(10).unwrap();
        let glider = grid(&life, &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
        let gens = life.run(&glider, 4).unwrap();

        let shifted: Vec<(usize, usize)> = cells(&life, &glider)
            .into_iter()
            .map(|(r, c)| (r + 1, c + 1))
            .collect();
        assert_eq!(cells(&life, &gens[4]), shifted);
        for g in &gens {
            assert_eq!(life.population(g), 5);
        }
    }

    #[test]
    fn test_glider_dies_into_corner() {
        let life = Life::new(10).unwrap();
        let glider = grid(&life, &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
        let last = *life.run(&glider, 60).unwrap().last().unwrap();
        // The glider crashes into the bottom-right corner and settles as a block.
        assert_eq!(cells(&life, &last), vec![(8, 8), (8, 9), (9, 8), (9, 9)]);
        assert_eq!(life.advance(&last), last);
    }

    #[test]
    fn test_overcrowded_cell_dies() {
        let life = Life::new(5).unwrap();
        // Plus sign: the centre has four neighbors.
        let plus = grid(&life, &[(1, 2), (2, 1), (2, 2), (2, 3), (3, 2)]);
        assert_eq!(life.neighbor_count(&plus, 2, 2).unwrap(), 4);
        assert!(!life.get(&life.advance(&plus), 2, 2).unwrap());
    }

    #[test]
    fn test_neighbor_count_full_grid() {
        let life = Life::new(6).unwrap();
        let full = !life.empty();
        for row in 0..6isize {
            for col in 0..6isize {
                let on_row_edge = row == 0 || row == 5;
                let on_col_edge = col == 0 || col == 5;
                let expected = match (on_row_edge, on_col_edge) {
                    (true, true) => 3,
                    (true, false) | (false, true) => 5,
                    (false, false) => 8,
                };
                assert_eq!(life.neighbor_count(&full, row, col).unwrap(), expected);
            }
        }
    }

    #[test]
    fn test_neighbor_count_ignores_self_and_far_cells() {
        let life = Life::new(5).unwrap();
        let g = grid(&life, &[(2, 2), (0, 0), (4, 4)]);
        assert_eq!(life.neighbor_count(&g, 2, 2).unwrap(), 0);
        assert_eq!(life.neighbor_count(&g, 1, 1).unwrap(), 2);
        assert_eq!(life.neighbor_count(&g, 3, 3).unwrap(), 2);
    }

    #[test]
    fn test_neighbor_count_does_not_wrap() {
        let life = Life::new(5).unwrap();
        // Last column of row 1 must not see the first column of row 2.
        let g = grid(&life, &[(2, 0), (0, 0), (4, 4)]);
        assert_eq!(life.neighbor_count(&g, 1, 4).unwrap(), 0);
        assert_eq!(life.neighbor_count(&g, 0, 4).unwrap(), 0);
        assert_eq!(life.neighbor_count(&g, 3, 0).unwrap(), 1);
    }

    #[test]
    fn test_out_of_range_queries() {
        let life = Life::new(5).unwrap();
        let g = life.empty();
        for (row, col) in [(-1, 0), (5, 0), (0, -1), (0, 5)] {
            let expected = Err(LifeError::OutOfRange { row, col, side: 5 });
            assert_eq!(life.neighbor_count(&g, row, col), expected);
            assert!(life.get(&g, row, col).is_err());
            assert!(life.set(&g, row, col).is_err());
            assert!(life.clear(&g, row, col).is_err());
            assert!(life.toggle(&g, row, col).is_err());
        }
        assert!(life.from_cells([(0, 0), (5, 5)]).is_err());
    }

    #[test]
    fn test_set_clear_toggle_leave_input_untouched() {
        let life = Life::new(4).unwrap();
        let g = life.empty();
        let set = life.set(&g, 1, 2).unwrap();
        assert!(g.is_empty());
        assert!(life.get(&set, 1, 2).unwrap());
        assert_eq!(set, Bitboard::single(6));

        let toggled = life.toggle(&set, 1, 2).unwrap();
        assert!(toggled.is_empty());
        assert!(life.get(&set, 1, 2).unwrap());

        assert!(life.clear(&set, 1, 2).unwrap().is_empty());
    }

    #[test]
    fn test_bits_beyond_area_are_ignored() {
        let life = Life::new(3).unwrap();
        let junk = Bitboard::single(9) | Bitboard::single(500);
        assert_eq!(life.population(&junk), 0);
        assert!(life.live_cells(&junk).is_empty());
        assert_eq!(life.dead_cells(&junk).len(), 9);
        assert!(life.advance(&junk).is_empty());
        assert!(life.set(&junk, 0, 0).unwrap().get(0));
        assert!(!life.set(&junk, 0, 0).unwrap().get(9));
    }

    #[test]
    fn test_live_and_dead_cells_order() {
        let life = Life::new(3).unwrap();
        let g = grid(&life, &[(2, 0), (0, 2), (1, 1)]);
        assert_eq!(
            life.live_cells(&g),
            vec![Cell::new(0, 2), Cell::new(1, 1), Cell::new(2, 0)]
        );
        assert_eq!(
            life.dead_cells(&g),
            vec![
                Cell::new(0, 0),
                Cell::new(0, 1),
                Cell::new(1, 0),
                Cell::new(1, 2),
                Cell::new(2, 1),
                Cell::new(2, 2),
            ]
        );
    }

    #[test]
    fn test_run_lengths() {
        let life = Life::new(5).unwrap();
        let blinker = grid(&life, &[(1, 0), (1, 1), (1, 2)]);

        assert_eq!(life.run(&blinker, 0).unwrap(), vec![blinker]);

        let gens = life.run(&blinker, 3).unwrap();
        assert_eq!(gens.len(), 4);
        assert_eq!(gens[0], blinker);
        assert_eq!(gens[2], blinker);
        assert_eq!(gens[1], gens[3]);
    }

    #[test]
    fn test_run_rejects_negative_iterations() {
        let life = Life::new(5).unwrap();
        assert_eq!(
            life.run(&life.empty(), -1),
            Err(LifeError::InvalidIterations(-1))
        );
    }

    #[test]
    fn test_generations_restartable() {
        let life = Life::new(8).unwrap();
        let r = grid(&life, &[(3, 4), (3, 5), (4, 3), (4, 4), (5, 4)]);
        let mut gens = life.generations(&r);
        gens.next();
        let checkpoint = gens.clone();
        let a: Vec<_> = gens.take(5).collect();
        let b: Vec<_> = checkpoint.take(5).collect();
        assert_eq!(a, b);
        assert_eq!(a[0], life.advance(&r));
    }

    #[test]
    fn test_side_one() {
        let life = Life::new(1).unwrap();
        let g = grid(&life, &[(0, 0)]);
        assert_eq!(life.neighbor_count(&g, 0, 0).unwrap(), 0);
        assert!(life.advance(&g).is_empty());
    }

    #[test]
    fn test_full_32_grid() {
        let life = Life::new(32).unwrap();
        let full = !life.empty();
        assert_eq!(life.population(&full), 1024);
        // Only the four corners keep exactly three neighbors.
        let next = life.advance(&full);
        assert_eq!(
            cells(&life, &next),
            vec![(0, 0), (0, 31), (31, 0), (31, 31)]
        );
    }

    #[test]
    fn test_random_fill() {
        let life = Life::new(16).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(life.random(&mut rng, 0.0).unwrap().is_empty());
        assert_eq!(life.population(&life.random(&mut rng, 1.0).unwrap()), 256);

        let a = life.random(&mut StdRng::seed_from_u64(42), 0.3).unwrap();
        let b = life.random(&mut StdRng::seed_from_u64(42), 0.3).unwrap();
        assert_eq!(a, b);
        assert_eq!(a & !life.geometry().board_mask, Bitboard::empty());

        assert_eq!(
            life.random(&mut rng, 1.5),
            Err(LifeError::InvalidFillRate(1.5))
        );
        assert!(life.random(&mut rng, f64::NAN).is_err());
    }

    /// Reference rule evaluated cell by cell with plain coordinate arithmetic.
    fn brute_force_advance(life: &Life, g: &Bitboard) -> Bitboard {
        let side = life.side() as isize;
        let mut out = Bitboard::empty();
        for row in 0..side {
            for col in 0..side {
                let mut n = 0;
                for dr in -1..=1 {
                    for dc in -1..=1 {
                        let (r, c) = (row + dr, col + dc);
                        if (dr, dc) != (0, 0)
                            && (0..side).contains(&r)
                            && (0..side).contains(&c)
                            && life.get(g, r, c).unwrap()
                        {
                            n += 1;
                        }
                    }
                }
                let alive = life.get(g, row, col).unwrap();
                if matches!((alive, n), (true, 2) | (true, 3) | (false, 3)) {
                    out = life.set(&out, row, col).unwrap();
                }
            }
        }
        out
    }

    fn arb_grid() -> impl Strategy<Value = (Life, Bitboard)> {
        (1usize..=32, any::<[u64; 16]>()).prop_map(|(side, words)| {
            let life = Life::new(side).unwrap();
            let g = Bitboard::from_words(words) & life.geometry().board_mask;
            (life, g)
        })
    }

    proptest! {
        #[test]
        fn prop_live_and_dead_partition_grid((life, g) in arb_grid()) {
            let mut all: Vec<Cell> = life.live_cells(&g);
            all.extend(life.dead_cells(&g));
            all.sort();
            all.dedup();
            prop_assert_eq!(all.len(), life.area());
            prop_assert_eq!(life.live_cells(&g).len() as u32, life.population(&g));
        }

        #[test]
        fn prop_advance_matches_brute_force((life, g) in arb_grid()) {
            prop_assert_eq!(life.advance(&g), brute_force_advance(&life, &g));
        }

        #[test]
        fn prop_advance_stays_on_board((life, g) in arb_grid()) {
            let next = life.advance(&g);
            prop_assert!((next & !life.geometry().board_mask).is_empty());
        }

        #[test]
        fn prop_run_is_iterated_advance((life, g) in arb_grid(), k in 0i64..8) {
            let gens = life.run(&g, k).unwrap();
            prop_assert_eq!(gens.len() as i64, k + 1);
            prop_assert_eq!(gens[0], g);
            for pair in gens.windows(2) {
                prop_assert_eq!(pair[1], life.advance(&pair[0]));
            }
        }

        #[test]
        fn prop_neighbor_count_bounded((life, g) in arb_grid(), row in 0isize..32, col in 0isize..32) {
            let side = life.side() as isize;
            prop_assume!(row < side && col < side);
            prop_assert!(life.neighbor_count(&g, row, col).unwrap() <= 8);
        }
    }
}
