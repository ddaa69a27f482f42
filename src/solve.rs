//! Crossword encoding and solution decoding
//!
//! Each clue is turned into a constraint over grid variables in four steps:
//! intersect the dictionary with the clue's pattern (over the dictionary
//! region), rename the in-pattern character bits onto the grid cells the
//! clue crosses, rename the terminator byte onto the clue's private slot,
//! and existentially abstract the dictionary positions the clue does not
//! use. Renaming is plain composition: substituting a fresh variable for one
//! the function depends on.
//!
//! The crossword is the conjunction of all clue constraints. Crossing clues
//! share the variables of their crossing cell, so the conjunction enforces
//! agreement there without any dedicated machinery. Clue order changes the
//! intermediate BDD sizes but never the result.
//!
//! Decoding walks the satisfying cubes of the crossword BDD under a
//! relevance mask: only grid bits touched by some clue (and the clue
//! terminator bits) are instantiated, everything else stays quiet.

use std::fmt;

use log::debug;

use crate::bdd::{Bdd, Cube};
use crate::crossword::{Clue, Crossword};
use crate::dict::Dictionary;
use crate::error::SolveError;
use crate::layout::{char_bit, VarLayout, CHAR_BITS};

/// Encode a crossword as the conjunction of its clue constraints
///
/// The result ranges over grid and terminator variables only. A FALSE result
/// means the crossword has no solution in this dictionary.
pub fn encode_crossword(dict: &Dictionary, crossword: &Crossword) -> Result<Bdd, SolveError> {
    let layout = VarLayout::new(dict.max_word_len(), crossword.len());
    let mut encoded = dict.manager().constant(true);
    for (index, clue) in crossword.clues().iter().enumerate() {
        let projected = clue_bdd(dict, &layout, clue, index)?;
        encoded = encoded.and(&projected);
        debug!(
            "clue {} ({}) conjoined, {} nodes so far",
            index,
            clue,
            encoded.node_count()
        );
    }
    Ok(encoded)
}

/// The constraint one clue puts on the grid
///
/// Matches the dictionary against the clue's pattern, then moves the result
/// out of the dictionary region: character bits onto the clue's cells,
/// terminator bits onto the clue's slot, leftover positions abstracted away.
fn clue_bdd(
    dict: &Dictionary,
    layout: &VarLayout,
    clue: &Clue,
    index: usize,
) -> Result<Bdd, SolveError> {
    let manager = dict.manager();
    let max_word_len = layout.max_word_len();
    let len = clue.pattern().len();

    // Parsers never produce empty patterns, but programmatically built
    // crosswords can; reject them here so the invariant holds either way.
    if len == 0 {
        return Err(SolveError::EmptyClue { clue: index });
    }

    for (x, y) in clue.cells() {
        if x >= max_word_len || y >= max_word_len {
            return Err(SolveError::OutOfBounds {
                clue: index,
                x,
                y,
                max_word_len,
            });
        }
    }

    let mut projected = dict.match_pattern_bdd(clue.pattern())?;

    // Rename character bits onto the cells the clue crosses. The grid
    // variables are fresh here, so compose acts as pure renaming.
    for (pos, (x, y)) in clue.cells().enumerate() {
        for bit in 0..CHAR_BITS {
            let target = manager.var(layout.cell_bit(x, y, bit));
            projected = projected.compose(&target, char_bit(pos, bit));
        }
    }

    // Rename the terminator byte onto the clue's private slot so clue
    // images stay disjoint outside the grid.
    for bit in 0..CHAR_BITS {
        let target = manager.var(layout.terminator_bit(index, bit));
        projected = projected.compose(&target, char_bit(len, bit));
    }

    // Hide the dictionary positions above the terminator.
    for var in CHAR_BITS * (len + 1)..CHAR_BITS * max_word_len {
        projected = projected.exist_abstract(var);
    }

    Ok(projected)
}

/// Solve a crossword: encode it and decode every filled grid
///
/// An unsatisfiable crossword yields an empty vector.
pub fn solve(dict: &Dictionary, crossword: &Crossword) -> Result<Vec<Solution>, SolveError> {
    let encoded = encode_crossword(dict, crossword)?;
    let layout = VarLayout::new(dict.max_word_len(), crossword.len());
    Ok(decode_solutions(&encoded, crossword, &layout))
}

/// Enumerate the filled grids a crossword BDD admits
pub fn decode_solutions(bdd: &Bdd, crossword: &Crossword, layout: &VarLayout) -> Vec<Solution> {
    if bdd.is_false() {
        return Vec::new();
    }

    let mask = relevance_mask(crossword, layout, bdd.manager().var_count());
    let mut solutions = Vec::new();
    for mut cube in bdd.cubes() {
        instantiate_solution(&mut cube, &mask, 0, layout, &mut solutions);
    }
    solutions
}

/// Mark the variables that carry solution content: the grid bits of every
/// clue cell plus every clue's terminator bits
fn relevance_mask(crossword: &Crossword, layout: &VarLayout, size: usize) -> Vec<bool> {
    let mut mask = vec![false; size];
    for (index, clue) in crossword.clues().iter().enumerate() {
        for (x, y) in clue.cells() {
            for bit in 0..CHAR_BITS {
                let var = layout.cell_bit(x, y, bit);
                if var < size {
                    mask[var] = true;
                }
            }
        }
        for bit in 0..CHAR_BITS {
            let var = layout.terminator_bit(index, bit);
            if var < size {
                mask[var] = true;
            }
        }
    }
    mask
}

/// Instantiate every don't-care among the relevant variables of a cube,
/// collecting one solution per complete assignment
fn instantiate_solution(
    cube: &mut Cube,
    mask: &[bool],
    i: usize,
    layout: &VarLayout,
    solutions: &mut Vec<Solution>,
) {
    if i == cube.len() {
        solutions.push(extract_solution(cube, mask, layout));
    } else if !mask[i] || cube[i].is_some() {
        instantiate_solution(cube, mask, i + 1, layout, solutions);
    } else {
        cube[i] = Some(false);
        instantiate_solution(cube, mask, i + 1, layout, solutions);
        cube[i] = Some(true);
        instantiate_solution(cube, mask, i + 1, layout, solutions);
        cube[i] = None;
    }
}

/// Read the filled grid out of a fully instantiated cube
///
/// Scans cells row by row and stops once the cell's variable index leaves
/// the allocated pool; cells no clue touches stay empty.
fn extract_solution(cube: &Cube, mask: &[bool], layout: &VarLayout) -> Solution {
    let max_word_len = layout.max_word_len();
    let mut rows = Vec::new();
    'grid: for y in 0..max_word_len {
        let mut row = Vec::new();
        for x in 0..max_word_len {
            let base = layout.cell_bit(x, y, 0);
            if base >= cube.len() {
                rows.push(row);
                break 'grid;
            }
            if mask[base] {
                let mut byte = 0u8;
                for bit in 0..CHAR_BITS {
                    if cube[layout.cell_bit(x, y, bit)] == Some(true) {
                        byte |= 1 << bit;
                    }
                }
                row.push(Some(byte as char));
            } else {
                row.push(None);
            }
        }
        rows.push(row);
    }
    Solution { rows }
}

/// One filled crossword grid
///
/// Cells outside every clue hold `None`. Rendering prints letters in place,
/// collapsing runs of empty cells: spaces are only emitted immediately
/// before the next letter in the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    rows: Vec<Vec<Option<char>>>,
}

impl Solution {
    /// The letter at `(x, y)`, if any clue fills that cell
    pub fn cell(&self, x: usize, y: usize) -> Option<char> {
        self.rows.get(y).and_then(|row| row.get(x)).copied().flatten()
    }

    /// The word a clue spells in this solution
    ///
    /// `None` if any of the clue's cells lies outside the filled area.
    pub fn clue_word(&self, clue: &Clue) -> Option<String> {
        clue.cells().map(|(x, y)| self.cell(x, y)).collect()
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let mut pending_spaces = 0;
            for cell in row {
                match cell {
                    Some(c) => {
                        for _ in 0..pending_spaces {
                            write!(f, " ")?;
                        }
                        pending_spaces = 0;
                        write!(f, "{}", c)?;
                    }
                    None => pending_spaces += 1,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bdd::BddManager;
    use crate::crossword::Direction;

    fn dictionary(words: &[&str], max_word_len: usize) -> Dictionary {
        Dictionary::from_words(BddManager::new(), max_word_len, words.iter().copied()).unwrap()
    }

    #[test]
    fn test_clue_bdd_leaves_the_dictionary_region() {
        let dict = dictionary(&["an", "at"], 4);
        let layout = VarLayout::new(4, 1);
        let clue = Clue::new(Direction::Across, 0, 0, "**");

        let projected = clue_bdd(&dict, &layout, &clue, 0).unwrap();
        let first_grid_var = layout.terminator_bit(0, 0);
        assert!(projected
            .support()
            .iter()
            .all(|&var| var >= first_grid_var));
    }

    #[test]
    fn test_two_clue_cross() {
        let dict = dictionary(&["an", "at", "no", "on"], 4);
        let crossword = Crossword::new(vec![
            Clue::new(Direction::Across, 0, 0, "**"),
            Clue::new(Direction::Down, 1, 0, "**"),
        ]);

        let solutions = solve(&dict, &crossword).unwrap();
        assert!(!solutions.is_empty());

        let mut pairs: Vec<(String, String)> = solutions
            .iter()
            .map(|s| {
                (
                    s.clue_word(&crossword.clues()[0]).unwrap(),
                    s.clue_word(&crossword.clues()[1]).unwrap(),
                )
            })
            .collect();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("an".to_string(), "no".to_string()),
                ("no".to_string(), "on".to_string()),
                ("on".to_string(), "no".to_string()),
            ]
        );

        // The crossing cell carries the same letter for both clues
        for solution in &solutions {
            let across = solution.clue_word(&crossword.clues()[0]).unwrap();
            let down = solution.clue_word(&crossword.clues()[1]).unwrap();
            assert_eq!(across.chars().nth(1), down.chars().next());
            assert_eq!(solution.cell(1, 0), across.chars().nth(1));
        }
    }

    #[test]
    fn test_unsatisfiable_crossword_is_false() {
        let dict = dictionary(&["a"], 4);
        let crossword =
            Crossword::new(vec![Clue::new(Direction::Across, 0, 0, "**")]);

        let encoded = encode_crossword(&dict, &crossword).unwrap();
        assert!(encoded.is_false());
        assert!(solve(&dict, &crossword).unwrap().is_empty());
    }

    #[test]
    fn test_empty_clue_rejected() {
        let dict = dictionary(&["an"], 4);
        let crossword =
            Crossword::new(vec![Clue::new(Direction::Across, 0, 0, "")]);

        let err = encode_crossword(&dict, &crossword).unwrap_err();
        assert_eq!(err, SolveError::EmptyClue { clue: 0 });
    }

    #[test]
    fn test_clue_out_of_bounds() {
        let dict = dictionary(&["an"], 4);
        let crossword =
            Crossword::new(vec![Clue::new(Direction::Across, 3, 0, "**")]);

        let err = solve(&dict, &crossword).unwrap_err();
        assert_eq!(
            err,
            SolveError::OutOfBounds {
                clue: 0,
                x: 4,
                y: 0,
                max_word_len: 4,
            }
        );
    }

    #[test]
    fn test_pattern_longer_than_bound() {
        let dict = dictionary(&["an"], 4);
        let crossword =
            Crossword::new(vec![Clue::new(Direction::Down, 0, 0, "****")]);

        let err = solve(&dict, &crossword).unwrap_err();
        assert!(matches!(err, SolveError::Encode(_)));
    }

    #[test]
    fn test_clue_order_does_not_change_solutions() {
        let dict = dictionary(&["an", "at", "no", "on"], 4);
        let across = Clue::new(Direction::Across, 0, 0, "**");
        let down = Clue::new(Direction::Down, 1, 0, "**");

        let forward = Crossword::new(vec![across.clone(), down.clone()]);
        let backward = Crossword::new(vec![down, across]);

        // Same conjunction either way; the terminator slots swap clues, so
        // compare the decoded grids rather than the raw BDDs.
        let collect = |cw: &Crossword| {
            let mut grids: Vec<String> = solve(&dict, cw)
                .unwrap()
                .iter()
                .map(|s| s.to_string())
                .collect();
            grids.sort();
            grids
        };
        assert_eq!(collect(&forward), collect(&backward));
    }

    #[test]
    fn test_prefilled_letter_restricts_solutions() {
        let dict = dictionary(&["ca", "ba"], 4);
        let crossword =
            Crossword::new(vec![Clue::new(Direction::Across, 0, 0, "c*")]);

        let solutions = solve(&dict, &crossword).unwrap();
        assert_eq!(solutions.len(), 1);
        assert_eq!(
            solutions[0].clue_word(&crossword.clues()[0]).unwrap(),
            "ca"
        );
    }

    #[test]
    fn test_solution_rendering_collapses_gaps() {
        let dict = dictionary(&["an", "no"], 4);
        let crossword = Crossword::new(vec![
            Clue::new(Direction::Across, 0, 0, "a*"),
            Clue::new(Direction::Down, 1, 0, "n*"),
        ]);

        let solutions = solve(&dict, &crossword).unwrap();
        assert_eq!(solutions.len(), 1);
        let rendered = solutions[0].to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "an");
        assert_eq!(lines[1], " o");
    }
}
