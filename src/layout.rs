//! Variable-index layout shared by the encoder, solver, and decoder
//!
//! Every Boolean variable in the solver belongs to one of three disjoint
//! regions of the manager's index space:
//!
//! - **Dictionary region**: 8 variables per character position. Bit `b` of
//!   the character at position `i` is variable `8*i + b`. The whole region
//!   spans `8 * max_word_len` variables and is shared by every word, pattern,
//!   and clue during encoding.
//! - **Clue-terminator region**: one byte per clue, directly above the
//!   dictionary region. Holds the renamed NUL terminator of each clue's word
//!   so that clue images stay disjoint there.
//! - **Grid region**: one byte per grid cell `(x, y)`, above the terminator
//!   region, in row-major order. Clues that cross share the cell variables of
//!   their crossing point, which is what makes a plain conjunction of clue
//!   constraints enforce cross-word consistency.
//!
//! Index arithmetic is the most bug-prone part of the encoding, so every
//! consumer goes through the named helpers below rather than open-coding the
//! formulas.

use crate::bdd::VarId;

/// Bits per encoded character
pub const CHAR_BITS: usize = 8;

/// Default maximum word length (and grid side length)
pub const DEFAULT_MAX_WORD_LEN: usize = 25;

/// Variable index of bit `bit` of the dictionary character at `pos`
///
/// Positions `0..max_word_len` cover the word body; the NUL terminator of a
/// word of length `len` sits at position `len`.
pub fn char_bit(pos: usize, bit: usize) -> VarId {
    debug_assert!(bit < CHAR_BITS);
    CHAR_BITS * pos + bit
}

/// Address space of one crossword: grid side length plus clue count
///
/// A layout is only meaningful for a fixed crossword because the grid region
/// starts above the terminator region, whose size is the number of clues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarLayout {
    max_word_len: usize,
    num_clues: usize,
}

impl VarLayout {
    /// Create the layout for a grid bounded by `max_word_len` with
    /// `num_clues` clues
    pub fn new(max_word_len: usize, num_clues: usize) -> Self {
        VarLayout {
            max_word_len,
            num_clues,
        }
    }

    /// The grid side length (equal to the word-length bound)
    pub fn max_word_len(&self) -> usize {
        self.max_word_len
    }

    /// The number of clues this layout reserves terminator bytes for
    pub fn num_clues(&self) -> usize {
        self.num_clues
    }

    /// Variable index of bit `bit` of clue `clue`'s terminator byte
    pub fn terminator_bit(&self, clue: usize, bit: usize) -> VarId {
        debug_assert!(clue < self.num_clues);
        debug_assert!(bit < CHAR_BITS);
        CHAR_BITS * (self.max_word_len + clue) + bit
    }

    /// Variable index of bit `bit` of the grid cell at `(x, y)`
    ///
    /// The origin is the top-left corner; `x` grows right and `y` grows down.
    pub fn cell_bit(&self, x: usize, y: usize, bit: usize) -> VarId {
        debug_assert!(x < self.max_word_len);
        debug_assert!(y < self.max_word_len);
        debug_assert!(bit < CHAR_BITS);
        CHAR_BITS * (self.max_word_len + self.num_clues + y * self.max_word_len + x) + bit
    }
}
