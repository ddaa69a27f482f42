//! Crossword descriptions: clues, grids, and their two input formats
//!
//! A crossword is a list of oriented clues. Each clue anchors a wildcard
//! pattern at a grid cell, running right (across) or down. Two formats
//! produce the same model:
//!
//! - **Raw clue list**: one clue per line, `<A|D> <x> <y> <pattern>`.
//! - **ASCII diagram**: letters are prefilled cells, `*` is an open cell,
//!   anything else blocks. Clues are derived geometrically from maximal runs
//!   of occupying cells, numbered in row-major scan order with across before
//!   down at the same cell.
//!
//! The diagram origin is the top-left corner; `x` grows right, `y` grows
//! down.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::dict::WILDCARD;
use crate::error::{CrosswordParseError, CrosswordReadError};

/// Orientation of a clue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Left to right
    Across,
    /// Top to bottom
    Down,
}

impl Direction {
    fn letter(self) -> char {
        match self {
            Direction::Across => 'A',
            Direction::Down => 'D',
        }
    }
}

/// One slot of a crossword: an anchored, directed wildcard pattern
///
/// Patterns are lowercase; a `*` cell matches any letter. The parsers only
/// ever produce non-empty patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    direction: Direction,
    x: usize,
    y: usize,
    pattern: String,
}

impl Clue {
    /// Create a clue anchored at `(x, y)`
    pub fn new(direction: Direction, x: usize, y: usize, pattern: impl Into<String>) -> Self {
        Clue {
            direction,
            x,
            y,
            pattern: pattern.into(),
        }
    }

    /// The clue's orientation
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// x coordinate of the anchor cell
    pub fn x(&self) -> usize {
        self.x
    }

    /// y coordinate of the anchor cell
    pub fn y(&self) -> usize {
        self.y
    }

    /// The wildcard pattern this clue's word must match
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The grid cells this clue occupies, anchor first
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (x, y) = (self.x, self.y);
        let across = self.direction == Direction::Across;
        (0..self.pattern.len()).map(move |i| if across { (x + i, y) } else { (x, y + i) })
    }
}

impl fmt::Display for Clue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.direction.letter(),
            self.x,
            self.y,
            self.pattern
        )
    }
}

/// A crossword: its clues in scan order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Crossword {
    clues: Vec<Clue>,
}

impl Crossword {
    /// Create a crossword from a clue list
    pub fn new(clues: Vec<Clue>) -> Self {
        Crossword { clues }
    }

    /// The clues in scan order
    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    /// Number of clues
    pub fn len(&self) -> usize {
        self.clues.len()
    }

    /// Whether the crossword has no clues at all
    pub fn is_empty(&self) -> bool {
        self.clues.is_empty()
    }

    /// Parse a raw clue list: one `<A|D> <x> <y> <pattern>` per line
    ///
    /// Blank lines are skipped; patterns are lowercased.
    pub fn from_raw_reader<R: BufRead>(reader: R) -> Result<Self, CrosswordReadError> {
        let mut clues = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let number = index + 1;
            if line.trim().is_empty() {
                continue;
            }

            let malformed = || CrosswordParseError::MalformedClue {
                line: number,
                content: line.clone(),
            };

            let mut fields = line.split_whitespace();
            let (dir, x, y, pattern) = match (
                fields.next(),
                fields.next(),
                fields.next(),
                fields.next(),
                fields.next(),
            ) {
                (Some(dir), Some(x), Some(y), Some(pattern), None) => (dir, x, y, pattern),
                _ => return Err(malformed().into()),
            };

            let direction = match dir {
                "A" | "a" => Direction::Across,
                "D" | "d" => Direction::Down,
                _ => {
                    return Err(CrosswordParseError::InvalidDirection {
                        line: number,
                        found: dir.chars().next().unwrap_or(' '),
                    }
                    .into())
                }
            };
            let x: usize = x.parse().map_err(|_| malformed())?;
            let y: usize = y.parse().map_err(|_| malformed())?;
            if pattern.is_empty() {
                return Err(CrosswordParseError::EmptyPattern { line: number }.into());
            }

            clues.push(Clue::new(direction, x, y, pattern.to_ascii_lowercase()));
        }
        Ok(Crossword::new(clues))
    }

    /// Parse a raw clue list from a string
    pub fn from_raw_str(text: &str) -> Result<Self, CrosswordReadError> {
        Crossword::from_raw_reader(text.as_bytes())
    }

    /// Parse a raw clue list from a file
    pub fn from_raw_file<P: AsRef<Path>>(path: P) -> Result<Self, CrosswordReadError> {
        let file = File::open(path)?;
        Crossword::from_raw_reader(BufReader::new(file))
    }

    /// Derive clues from an ASCII diagram bounded by `max_word_len`
    ///
    /// Cells are lowercased on read. Letters and `*` occupy; anything else
    /// blocks. Every maximal occupying run of length two or more yields one
    /// clue.
    pub fn from_diagram_reader<R: BufRead>(
        reader: R,
        max_word_len: usize,
    ) -> Result<Self, CrosswordReadError> {
        let mut grid: Vec<Vec<char>> = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let row: Vec<char> = line.chars().map(|c| c.to_ascii_lowercase()).collect();
            if grid.len() >= max_word_len || row.len() > max_word_len {
                return Err(CrosswordParseError::DiagramTooLarge { max_word_len }.into());
            }
            grid.push(row);
        }

        let mut clues = Vec::new();
        for y in 0..max_word_len {
            for x in 0..max_word_len {
                if across_start(&grid, x, y) {
                    let pattern: String = (x..max_word_len)
                        .map(|x| cell(&grid, x, y))
                        .take_while(|&c| occupying(c))
                        .collect();
                    clues.push(Clue::new(Direction::Across, x, y, pattern));
                }
                if down_start(&grid, x, y) {
                    let pattern: String = (y..max_word_len)
                        .map(|y| cell(&grid, x, y))
                        .take_while(|&c| occupying(c))
                        .collect();
                    clues.push(Clue::new(Direction::Down, x, y, pattern));
                }
            }
        }
        Ok(Crossword::new(clues))
    }

    /// Derive clues from an ASCII diagram in a string
    pub fn from_diagram_str(text: &str, max_word_len: usize) -> Result<Self, CrosswordReadError> {
        Crossword::from_diagram_reader(text.as_bytes(), max_word_len)
    }

    /// Derive clues from an ASCII diagram file
    pub fn from_diagram_file<P: AsRef<Path>>(
        path: P,
        max_word_len: usize,
    ) -> Result<Self, CrosswordReadError> {
        let file = File::open(path)?;
        Crossword::from_diagram_reader(BufReader::new(file), max_word_len)
    }
}

impl fmt::Display for Crossword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for clue in &self.clues {
            writeln!(f, "{}", clue)?;
        }
        Ok(())
    }
}

/// Whether a cell takes part in some clue
fn occupying(c: char) -> bool {
    c.is_ascii_alphabetic() || c == WILDCARD
}

/// The diagram cell at `(x, y)`; out-of-range reads as a block
fn cell(grid: &[Vec<char>], x: usize, y: usize) -> char {
    grid.get(y).and_then(|row| row.get(x)).copied().unwrap_or(' ')
}

/// A cell starts an across clue iff it occupies, its right neighbor
/// occupies, and it has no occupying left neighbor
fn across_start(grid: &[Vec<char>], x: usize, y: usize) -> bool {
    occupying(cell(grid, x, y))
        && occupying(cell(grid, x + 1, y))
        && (x == 0 || !occupying(cell(grid, x - 1, y)))
}

/// A cell starts a down clue iff it occupies, the cell below occupies, and
/// it has no occupying cell above
fn down_start(grid: &[Vec<char>], x: usize, y: usize) -> bool {
    occupying(cell(grid, x, y))
        && occupying(cell(grid, x, y + 1))
        && (y == 0 || !occupying(cell(grid, x, y - 1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_parse() {
        let cw = Crossword::from_raw_str("A 0 0 c**\nD 2 1 ***\n").unwrap();
        assert_eq!(
            cw.clues(),
            &[
                Clue::new(Direction::Across, 0, 0, "c**"),
                Clue::new(Direction::Down, 2, 1, "***"),
            ]
        );
    }

    #[test]
    fn test_raw_parse_lowercases_patterns() {
        let cw = Crossword::from_raw_str("A 0 0 CAT\n").unwrap();
        assert_eq!(cw.clues()[0].pattern(), "cat");
    }

    #[test]
    fn test_raw_parse_skips_blank_lines() {
        let cw = Crossword::from_raw_str("\nA 0 0 **\n\n").unwrap();
        assert_eq!(cw.len(), 1);
    }

    #[test]
    fn test_raw_parse_rejects_bad_direction() {
        let err = Crossword::from_raw_str("X 0 0 **\n").unwrap_err();
        assert!(matches!(
            err,
            CrosswordReadError::Parse(CrosswordParseError::InvalidDirection { line: 1, .. })
        ));
    }

    #[test]
    fn test_raw_parse_rejects_short_line() {
        let err = Crossword::from_raw_str("A 0 0\n").unwrap_err();
        assert!(matches!(
            err,
            CrosswordReadError::Parse(CrosswordParseError::MalformedClue { line: 1, .. })
        ));
    }

    #[test]
    fn test_raw_parse_rejects_trailing_fields() {
        let err = Crossword::from_raw_str("A 0 0 ** extra\n").unwrap_err();
        assert!(matches!(
            err,
            CrosswordReadError::Parse(CrosswordParseError::MalformedClue { line: 1, .. })
        ));
    }

    #[test]
    fn test_diagram_two_by_two() {
        // One block in the bottom-right corner
        let cw = Crossword::from_diagram_str("**\n*.\n", 25).unwrap();
        assert_eq!(
            cw.clues(),
            &[
                Clue::new(Direction::Across, 0, 0, "**"),
                Clue::new(Direction::Down, 0, 0, "**"),
            ]
        );
    }

    #[test]
    fn test_diagram_prefilled_letter() {
        let cw = Crossword::from_diagram_str("c*\n**\n", 25).unwrap();
        let across: Vec<_> = cw
            .clues()
            .iter()
            .filter(|c| c.direction() == Direction::Across)
            .collect();
        assert_eq!(across[0].pattern(), "c*");
        assert_eq!((across[0].x(), across[0].y()), (0, 0));
    }

    #[test]
    fn test_diagram_across_before_down_at_same_cell() {
        let cw = Crossword::from_diagram_str("**\n**\n", 25).unwrap();
        assert_eq!(
            cw.clues(),
            &[
                Clue::new(Direction::Across, 0, 0, "**"),
                Clue::new(Direction::Down, 0, 0, "**"),
                Clue::new(Direction::Down, 1, 0, "**"),
                Clue::new(Direction::Across, 0, 1, "**"),
            ]
        );
    }

    #[test]
    fn test_diagram_separated_runs() {
        // A gap splits the row into two runs; single cells emit no clue
        let cw = Crossword::from_diagram_str("**.***\n", 25).unwrap();
        assert_eq!(
            cw.clues(),
            &[
                Clue::new(Direction::Across, 0, 0, "**"),
                Clue::new(Direction::Across, 3, 0, "***"),
            ]
        );
    }

    #[test]
    fn test_diagram_uppercase_cells_lowered() {
        let cw = Crossword::from_diagram_str("C*\n", 25).unwrap();
        assert_eq!(cw.clues()[0].pattern(), "c*");
    }

    #[test]
    fn test_diagram_full_width_row_accepted() {
        let row: String = std::iter::repeat('*').take(4).collect();
        let cw = Crossword::from_diagram_str(&format!("{}\n", row), 4).unwrap();
        assert_eq!(cw.clues()[0].pattern(), "****");
    }

    #[test]
    fn test_diagram_too_wide_rejected() {
        let err = Crossword::from_diagram_str("*****\n", 4).unwrap_err();
        assert!(matches!(
            err,
            CrosswordReadError::Parse(CrosswordParseError::DiagramTooLarge { max_word_len: 4 })
        ));
    }

    #[test]
    fn test_diagram_too_tall_rejected() {
        let text = "*\n".repeat(5);
        let err = Crossword::from_diagram_str(&text, 4).unwrap_err();
        assert!(matches!(
            err,
            CrosswordReadError::Parse(CrosswordParseError::DiagramTooLarge { max_word_len: 4 })
        ));
    }

    #[test]
    fn test_clue_cells() {
        let across = Clue::new(Direction::Across, 1, 2, "abc");
        assert_eq!(
            across.cells().collect::<Vec<_>>(),
            vec![(1, 2), (2, 2), (3, 2)]
        );

        let down = Clue::new(Direction::Down, 1, 2, "ab");
        assert_eq!(down.cells().collect::<Vec<_>>(), vec![(1, 2), (1, 3)]);
    }

    #[test]
    fn test_display_round_trip() {
        let cw = Crossword::from_raw_str("A 0 0 c**\nD 2 1 ***\n").unwrap();
        let rendered = cw.to_string();
        let reparsed = Crossword::from_raw_str(&rendered).unwrap();
        assert_eq!(cw, reparsed);
    }
}
