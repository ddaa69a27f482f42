//! # Lexigrid
//!
//! A symbolic crossword solver. A whole dictionary is represented as one
//! Boolean function over bit-blasted bytes, a crossword as a conjunction of
//! per-clue constraints sharing grid variables, and every satisfying
//! assignment of that conjunction is a complete fill.
//!
//! ## How it works
//!
//! - **Words as Boolean functions**: character `i` of a word occupies the
//!   eight variables `8*i .. 8*i+7`; a forced NUL byte marks the end. The
//!   dictionary is the disjunction of its word BDDs, so duplicates vanish
//!   and insertion order is irrelevant.
//! - **Patterns**: a wildcard position constrains its byte to "non-zero"
//!   instead of fixing bits, so `dict AND pattern` is exactly the set of
//!   matching words of the pattern's length.
//! - **Crosswords**: each clue's matches are renamed (via composition) from
//!   the dictionary region onto the grid cells the clue crosses. Crossing
//!   clues share cell variables, so conjoining all clues enforces crossing
//!   agreement for free.
//! - **Solutions**: cubes of the crossword BDD, instantiated under a
//!   relevance mask covering exactly the cells some clue touches.
//!
//! All BDDs live in a shared [`BddManager`] with hash consing and memoized
//! operations; handles are plain owned values.
//!
//! ## Matching patterns
//!
//! ```
//! use lexigrid::{BddManager, Dictionary};
//!
//! # fn main() -> std::io::Result<()> {
//! let manager = BddManager::new();
//! let dict = Dictionary::from_words(manager, 25, ["cat", "car", "bat"])?;
//!
//! let mut hits = dict.match_pattern("ca*")?;
//! hits.sort();
//! assert_eq!(hits, ["car", "cat"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Solving a crossword
//!
//! ```
//! use lexigrid::{solve, BddManager, Crossword, Dictionary};
//!
//! # fn main() -> std::io::Result<()> {
//! let manager = BddManager::new();
//! let dict = Dictionary::from_words(manager, 25, ["an", "at", "no", "on"])?;
//!
//! // Two crossing two-letter slots
//! let crossword = Crossword::from_raw_str("A 0 0 **\nD 1 0 **\n")?;
//!
//! let solutions = solve(&dict, &crossword)?;
//! assert!(!solutions.is_empty());
//! for solution in &solutions {
//!     println!("{}", solution);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Crosswords can also be read from ASCII diagrams
//! ([`Crossword::from_diagram_str`]), where letters are prefilled cells,
//! `*` is an open cell, and anything else blocks.
//!
//! Dictionaries can be serialized to a compact binary image
//! ([`Dictionary::write_image`]) and reloaded without re-encoding the word
//! list, and dumped as Graphviz DOT for inspection
//! ([`Dictionary::write_dot`]).

// Public modules
pub mod bdd;
pub mod crossword;
pub mod dict;
pub mod error;
pub mod layout;
pub mod solve;

// Re-export the high-level public API
pub use bdd::{Bdd, BddManager, Cube, VarId};
pub use crossword::{Clue, Crossword, Direction};
pub use dict::{encode_pattern, encode_word, Dictionary, DictionaryStats, WILDCARD};
pub use error::{
    CrosswordParseError, CrosswordReadError, EncodeError, ImageError, ImageReadError,
    ImageWriteError, SolveError, WordListError,
};
pub use layout::{VarLayout, CHAR_BITS, DEFAULT_MAX_WORD_LEN};
pub use solve::{decode_solutions, encode_crossword, solve, Solution};
