use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use paste::paste;

/// Number of 64-bit words backing a `Bitboard`.
pub const WORDS: usize = 16;

/// Total number of addressable bits.
pub const CAPACITY: usize = WORDS * 64;

/// A fixed-size bitboard supporting up to 32×32 = 1024 cells.
/// Stored as 16 × u64 words, entirely on the stack.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Bitboard {
    words: [u64; WORDS],
}

impl Bitboard {
    /// All bits zero.
    #[inline]
    pub const fn empty() -> Self {
        Bitboard { words: [0; WORDS] }
    }

    /// Single bit set at `index`.
    #[inline]
    pub fn single(index: usize) -> Self {
        debug_assert!(index < CAPACITY);
        let mut bb = Self::empty();
        bb.words[index / 64] = 1u64 << (index % 64);
        bb
    }

    /// The lowest `n` bits set, everything above cleared.
    pub fn low_bits(n: usize) -> Self {
        let n = n.min(CAPACITY);
        let mut bb = Self::empty();
        for (i, word) in bb.words.iter_mut().enumerate() {
            let start = i * 64;
            if n >= start + 64 {
                *word = u64::MAX;
            } else if n > start {
                *word = (1u64 << (n - start)) - 1;
            }
        }
        bb
    }

    /// Construct from raw words.
    #[inline]
    pub const fn from_words(words: [u64; WORDS]) -> Self {
        Bitboard { words }
    }

    /// Raw words, least significant first.
    #[inline]
    pub const fn words(&self) -> &[u64; WORDS] {
        &self.words
    }

    /// Test whether bit `index` is set.
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        debug_assert!(index < CAPACITY);
        (self.words[index / 64] >> (index % 64)) & 1 != 0
    }

    /// Set bit `index` to 1.
    #[inline]
    pub fn set(&mut self, index: usize) {
        debug_assert!(index < CAPACITY);
        self.words[index / 64] |= 1u64 << (index % 64);
    }

    /// Clear bit `index` to 0.
    #[inline]
    pub fn clear(&mut self, index: usize) {
        debug_assert!(index < CAPACITY);
        self.words[index / 64] &= !(1u64 << (index % 64));
    }

    /// Flip bit `index`.
    #[inline]
    pub fn toggle(&mut self, index: usize) {
        debug_assert!(index < CAPACITY);
        self.words[index / 64] ^= 1u64 << (index % 64);
    }

    /// True if no bits are set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|&w| w == 0)
    }

    /// Population count — number of set bits.
    #[inline]
    pub fn count(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    /// Shift all bits left (toward higher indices) by `n` positions.
    /// Bits shifted beyond 1023 are lost.
    #[inline]
    pub fn shift_left(&self, n: usize) -> Self {
        if n == 0 {
            return *self;
        }
        if n >= CAPACITY {
            return Self::empty();
        }
        let word_shift = n / 64;
        let bit_shift = n % 64;
        let mut out = [0u64; WORDS];

        if bit_shift == 0 {
            out[word_shift..].copy_from_slice(&self.words[..WORDS - word_shift]);
        } else {
            for i in word_shift..WORDS {
                out[i] = self.words[i - word_shift] << bit_shift;
                if i > word_shift {
                    out[i] |= self.words[i - word_shift - 1] >> (64 - bit_shift);
                }
            }
        }
        Bitboard { words: out }
    }

    /// Shift all bits right (toward lower indices) by `n` positions.
    /// Bits shifted below 0 are lost.
    #[inline]
    pub fn shift_right(&self, n: usize) -> Self {
        if n == 0 {
            return *self;
        }
        if n >= CAPACITY {
            return Self::empty();
        }
        let word_shift = n / 64;
        let bit_shift = n % 64;
        let mut out = [0u64; WORDS];

        if bit_shift == 0 {
            out[..WORDS - word_shift].copy_from_slice(&self.words[word_shift..]);
        } else {
            for i in 0..WORDS - word_shift {
                out[i] = self.words[i + word_shift] >> bit_shift;
                if i + word_shift + 1 < WORDS {
                    out[i] |= self.words[i + word_shift + 1] << (64 - bit_shift);
                }
            }
        }
        Bitboard { words: out }
    }

    /// Iterate over indices of set bits, ascending.
    #[inline]
    pub fn iter_ones(&self) -> BitIterator {
        BitIterator {
            words: self.words,
            word_index: 0,
        }
    }
}

macro_rules! impl_bitwise {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait for Bitboard {
            type Output = Bitboard;
            #[inline]
            fn $method(self, rhs: Bitboard) -> Bitboard {
                let mut out = [0u64; WORDS];
                for i in 0..WORDS {
                    out[i] = self.words[i] $op rhs.words[i];
                }
                Bitboard { words: out }
            }
        }

        paste! {
            impl [<$trait Assign>] for Bitboard {
                #[inline]
                fn [<$method _assign>](&mut self, rhs: Bitboard) {
                    for i in 0..WORDS {
                        self.words[i] = self.words[i] $op rhs.words[i];
                    }
                }
            }
        }
    };
}

impl_bitwise!(BitAnd, bitand, &);
impl_bitwise!(BitOr, bitor, |);
impl_bitwise!(BitXor, bitxor, ^);

impl Not for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn not(self) -> Bitboard {
        let mut out = [0u64; WORDS];
        for i in 0..WORDS {
            out[i] = !self.words[i];
        }
        Bitboard { words: out }
    }
}

/// Iterator over set-bit indices in a `Bitboard`.
#[derive(Clone, Debug)]
pub struct BitIterator {
    words: [u64; WORDS],
    word_index: usize,
}

impl Iterator for BitIterator {
    type Item = usize;
    #[inline]
    fn next(&mut self) -> Option<usize> {
        while self.word_index < WORDS {
            let w = self.words[self.word_index];
            if w != 0 {
                let bit = w.trailing_zeros() as usize;
                // Clear lowest set bit
                self.words[self.word_index] = w & (w - 1);
                return Some(self.word_index * 64 + bit);
            }
            self.word_index += 1;
        }
        None
    }
}

/// Precomputed masks for a square `side × side` grid. Created once per engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub side: usize,
    pub area: usize,
    /// Mask with 1s at all valid cells (indices 0..area).
    pub board_mask: Bitboard,
    /// board_mask minus column 0 (drops cells that wrapped off the last column).
    pub not_col0: Bitboard,
    /// board_mask minus last column (drops cells that wrapped off column 0).
    pub not_col_last: Bitboard,
}

impl Geometry {
    /// Build geometry for a `side × side` grid.
    pub fn new(side: usize) -> Self {
        debug_assert!((1..=32).contains(&side));
        let area = side * side;
        let board_mask = Bitboard::low_bits(area);

        let mut not_col0 = board_mask;
        let mut not_col_last = board_mask;
        for row in 0..side {
            not_col0.clear(row * side);
            not_col_last.clear(row * side + side - 1);
        }

        Geometry {
            side,
            area,
            board_mask,
            not_col0,
            not_col_last,
        }
    }

    /// `bb` moved one step in each of the eight compass directions, clipped
    /// at the grid edges.
    ///
    /// Order: E, W, S, N, SE, SW, NE, NW.
    #[inline]
    pub fn neighbor_planes(&self, bb: &Bitboard) -> [Bitboard; 8] {
        let w = self.side;
        [
            // col+1: shift up one index, drop wraps into column 0
            bb.shift_left(1) & self.not_col0,
            // col-1: shift down one index, drop wraps into the last column
            bb.shift_right(1) & self.not_col_last,
            bb.shift_left(w) & self.board_mask,
            bb.shift_right(w),
            bb.shift_left(w + 1) & self.not_col0,
            bb.shift_left(w - 1) & self.not_col_last,
            bb.shift_right(w - 1) & self.not_col0,
            bb.shift_right(w + 1) & self.not_col_last,
        ]
    }

    /// Union of all Moore neighbors of every bit in `bb`. Bits of `bb`
    /// itself are included only when they neighbor another bit of `bb`.
    #[inline]
    pub fn neighborhood(&self, bb: &Bitboard) -> Bitboard {
        self.neighbor_planes(bb)
            .into_iter()
            .fold(Bitboard::empty(), |acc, plane| acc | plane)
            & self.board_mask
    }
}
