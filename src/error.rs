//! Error types for the symbolic crossword solver
//!
//! This module provides error types organized by source and operation.
//! Each error source has its own enum with specific variants, and operations
//! have wrapper enums that combine only the errors they can produce.

use std::fmt;
use std::io;

// ============================================================================
// Source-Level Error Enums
// ============================================================================

/// Errors related to encoding words and patterns as BDDs
///
/// These errors occur when a word or wildcard pattern cannot be expressed
/// within the dictionary variable region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// The word (or pattern) does not fit the word-length bound
    ///
    /// A word of length `len` occupies `len + 1` byte positions including its
    /// NUL terminator, so `len` must be strictly below the bound.
    TooLong {
        /// The offending word or pattern
        word: String,
        /// The configured maximum word length
        max_word_len: usize,
    },
    /// The word contains a byte outside printable ASCII
    InvalidByte {
        /// The offending word or pattern
        word: String,
        /// The first invalid byte encountered
        byte: u8,
    },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::TooLong { word, max_word_len } => write!(
                f,
                "Word {:?} is too long: {} characters, but the word-length bound is {} \
                 (one position is reserved for the terminator)",
                word,
                word.len(),
                max_word_len
            ),
            EncodeError::InvalidByte { word, byte } => write!(
                f,
                "Word {:?} contains byte 0x{:02x}; only printable ASCII is accepted",
                word, byte
            ),
        }
    }
}

impl std::error::Error for EncodeError {}

impl From<EncodeError> for io::Error {
    fn from(err: EncodeError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

/// Errors related to parsing crossword descriptions
///
/// These errors occur when a raw clue list or an ASCII diagram is malformed
/// or exceeds the grid bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrosswordParseError {
    /// A raw clue line does not have the `<A|D> <x> <y> <pattern>` shape
    MalformedClue {
        /// 1-based line number within the input
        line: usize,
        /// The offending line content
        content: String,
    },
    /// The direction letter of a raw clue is neither `A` nor `D`
    InvalidDirection {
        /// 1-based line number within the input
        line: usize,
        /// The letter that was found instead
        found: char,
    },
    /// A clue has an empty pattern
    EmptyPattern {
        /// 1-based line number within the input
        line: usize,
    },
    /// The diagram has more rows or columns than the grid allows
    DiagramTooLarge {
        /// The configured maximum word length (grid side)
        max_word_len: usize,
    },
}

impl fmt::Display for CrosswordParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrosswordParseError::MalformedClue { line, content } => write!(
                f,
                "Malformed clue on line {}: {:?} (expected \"<A|D> <x> <y> <pattern>\")",
                line, content
            ),
            CrosswordParseError::InvalidDirection { line, found } => write!(
                f,
                "Invalid direction {:?} on line {}: expected 'A' (across) or 'D' (down)",
                found, line
            ),
            CrosswordParseError::EmptyPattern { line } => {
                write!(f, "Empty clue pattern on line {}", line)
            }
            CrosswordParseError::DiagramTooLarge { max_word_len } => write!(
                f,
                "Crossword diagram too big (must fit within {}x{})",
                max_word_len, max_word_len
            ),
        }
    }
}

impl std::error::Error for CrosswordParseError {}

impl From<CrosswordParseError> for io::Error {
    fn from(err: CrosswordParseError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

/// Errors related to the binary BDD image format
///
/// These errors occur when a serialized dictionary image is structurally
/// invalid. I/O failures while reading are reported separately through
/// [`ImageReadError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// The file does not start with the expected magic bytes
    BadMagic {
        /// The bytes that were found instead
        found: [u8; 4],
    },
    /// The image was written by an incompatible format version
    UnsupportedVersion {
        /// The version number found in the header
        version: u32,
    },
    /// A node record references a node that has not been defined yet
    ///
    /// Nodes are serialized children-first, so a forward reference means the
    /// image is corrupt.
    DanglingNode {
        /// Index of the offending record
        record: usize,
        /// The out-of-range child reference
        child: u32,
    },
    /// A node record carries a variable index at or above the declared count
    VariableOutOfRange {
        /// Index of the offending record
        record: usize,
        /// The out-of-range variable index
        variable: u32,
    },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::BadMagic { found } => write!(
                f,
                "Not a dictionary BDD image (bad magic bytes {:02x?})",
                found
            ),
            ImageError::UnsupportedVersion { version } => {
                write!(f, "Unsupported BDD image version {}", version)
            }
            ImageError::DanglingNode { record, child } => write!(
                f,
                "Corrupt BDD image: node record {} references undefined node {}",
                record, child
            ),
            ImageError::VariableOutOfRange { record, variable } => write!(
                f,
                "Corrupt BDD image: node record {} uses variable {} beyond the declared count",
                record, variable
            ),
        }
    }
}

impl std::error::Error for ImageError {}

impl From<ImageError> for io::Error {
    fn from(err: ImageError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

// ============================================================================
// Operation-Level Error Enums
// ============================================================================

/// Errors that can occur while building a dictionary from a word list
///
/// This error type is returned by `Dictionary::from_reader` and
/// `Dictionary::from_word_file`.
#[derive(Debug)]
pub enum WordListError {
    /// A word could not be encoded
    Encode(EncodeError),
    /// IO error while reading the word list
    Io(io::Error),
}

impl fmt::Display for WordListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordListError::Encode(e) => write!(f, "Word list error: {}", e),
            WordListError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for WordListError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WordListError::Encode(e) => Some(e),
            WordListError::Io(e) => Some(e),
        }
    }
}

impl From<EncodeError> for WordListError {
    fn from(err: EncodeError) -> Self {
        WordListError::Encode(err)
    }
}

impl From<io::Error> for WordListError {
    fn from(err: io::Error) -> Self {
        WordListError::Io(err)
    }
}

impl From<WordListError> for io::Error {
    fn from(err: WordListError) -> Self {
        match err {
            WordListError::Io(e) => e,
            WordListError::Encode(e) => io::Error::new(io::ErrorKind::InvalidData, e),
        }
    }
}

/// Errors that can occur while reading a crossword description
///
/// This error type is returned by the `Crossword::from_raw_*` and
/// `Crossword::from_diagram_*` constructors.
#[derive(Debug)]
pub enum CrosswordReadError {
    /// The description is malformed or exceeds the grid bounds
    Parse(CrosswordParseError),
    /// IO error while reading the description
    Io(io::Error),
}

impl fmt::Display for CrosswordReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrosswordReadError::Parse(e) => write!(f, "Crossword error: {}", e),
            CrosswordReadError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for CrosswordReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CrosswordReadError::Parse(e) => Some(e),
            CrosswordReadError::Io(e) => Some(e),
        }
    }
}

impl From<CrosswordParseError> for CrosswordReadError {
    fn from(err: CrosswordParseError) -> Self {
        CrosswordReadError::Parse(err)
    }
}

impl From<io::Error> for CrosswordReadError {
    fn from(err: io::Error) -> Self {
        CrosswordReadError::Io(err)
    }
}

impl From<CrosswordReadError> for io::Error {
    fn from(err: CrosswordReadError) -> Self {
        match err {
            CrosswordReadError::Io(e) => e,
            CrosswordReadError::Parse(e) => io::Error::new(io::ErrorKind::InvalidData, e),
        }
    }
}

/// Errors that can occur while encoding a crossword against a dictionary
///
/// This error type is returned by `encode_crossword` and `solve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// A clue has an empty pattern
    EmptyClue {
        /// 0-based clue index in scan order
        clue: usize,
    },
    /// A clue extends beyond the grid
    OutOfBounds {
        /// 0-based clue index in scan order
        clue: usize,
        /// x coordinate of the offending cell
        x: usize,
        /// y coordinate of the offending cell
        y: usize,
        /// The grid side length
        max_word_len: usize,
    },
    /// A clue pattern could not be encoded
    Encode(EncodeError),
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveError::EmptyClue { clue } => {
                write!(f, "Clue {} is malformed: its pattern is empty", clue)
            }
            SolveError::OutOfBounds {
                clue,
                x,
                y,
                max_word_len,
            } => write!(
                f,
                "Clue {} reaches cell ({}, {}) outside the {}x{} grid",
                clue, x, y, max_word_len, max_word_len
            ),
            SolveError::Encode(e) => write!(f, "Clue pattern error: {}", e),
        }
    }
}

impl std::error::Error for SolveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SolveError::EmptyClue { .. } => None,
            SolveError::OutOfBounds { .. } => None,
            SolveError::Encode(e) => Some(e),
        }
    }
}

impl From<EncodeError> for SolveError {
    fn from(err: EncodeError) -> Self {
        SolveError::Encode(err)
    }
}

impl From<SolveError> for io::Error {
    fn from(err: SolveError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

/// Errors that can occur when reading a BDD image
///
/// This error type is returned by `Dictionary::from_image_reader` and
/// `Dictionary::from_image_file`.
#[derive(Debug)]
pub enum ImageReadError {
    /// The image is structurally invalid
    Image(ImageError),
    /// IO error during reading
    Io(io::Error),
}

impl fmt::Display for ImageReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageReadError::Image(e) => write!(f, "BDD image error: {}", e),
            ImageReadError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ImageReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImageReadError::Image(e) => Some(e),
            ImageReadError::Io(e) => Some(e),
        }
    }
}

impl From<ImageError> for ImageReadError {
    fn from(err: ImageError) -> Self {
        ImageReadError::Image(err)
    }
}

impl From<io::Error> for ImageReadError {
    fn from(err: io::Error) -> Self {
        ImageReadError::Io(err)
    }
}

impl From<ImageReadError> for io::Error {
    fn from(err: ImageReadError) -> Self {
        match err {
            ImageReadError::Io(e) => e,
            ImageReadError::Image(e) => io::Error::new(io::ErrorKind::InvalidData, e),
        }
    }
}

/// Errors that can occur when writing a BDD image
///
/// This error type is returned by `Dictionary::write_image` and
/// `Dictionary::to_image_file`.
#[derive(Debug)]
pub enum ImageWriteError {
    /// IO error during writing
    Io(io::Error),
}

impl fmt::Display for ImageWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageWriteError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ImageWriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImageWriteError::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for ImageWriteError {
    fn from(err: io::Error) -> Self {
        ImageWriteError::Io(err)
    }
}

impl From<ImageWriteError> for io::Error {
    fn from(err: ImageWriteError) -> Self {
        match err {
            ImageWriteError::Io(e) => e,
        }
    }
}
