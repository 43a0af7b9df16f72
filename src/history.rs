//! Helpers for callers holding a sequence of generations, e.g. an
//! animation front-end deciding when to stop. The engine itself never
//! looks for fixed points or cycles.

use crate::bitboard::Bitboard;

/// Drop trailing generations that repeat their predecessor, keeping the
/// first occurrence of the final fixed point. Oscillators are untouched.
pub fn trim_stable_tail(generations: &[Bitboard]) -> &[Bitboard] {
    let mut end = generations.len();
    while end > 1 && generations[end - 1] == generations[end - 2] {
        end -= 1;
    }
    &generations[..end]
}

/// Smallest `p` in `1..=max_period` such that the last generation equals
/// the one `p` steps before it.
pub fn trailing_period(generations: &[Bitboard], max_period: usize) -> Option<usize> {
    let last = generations.last()?;
    (1..=max_period)
        .take_while(|&p| p < generations.len())
        .find(|&p| generations[generations.len() - 1 - p] == *last)
}
