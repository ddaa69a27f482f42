//! Dictionary construction and pattern matching
//!
//! A word is encoded over the dictionary variable region byte by byte: bit
//! `b` of the character at position `i` constrains variable `8*i + b`, and a
//! forced NUL byte after the last character marks the word's end. The
//! dictionary is simply the disjunction of all word BDDs, which makes
//! insertion order irrelevant and duplicate insertion a no-op.
//!
//! A wildcard pattern is encoded the same way except that a `*` position
//! demands only "this byte is non-zero", so conjoining a pattern with the
//! dictionary selects exactly the words of the pattern's length that agree
//! with its fixed positions.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;

use crate::bdd::image::{read_u32, write_u32};
use crate::bdd::{Bdd, BddManager, Cube};
use crate::error::{
    EncodeError, ImageError, ImageReadError, ImageWriteError, WordListError,
};
use crate::layout::{char_bit, CHAR_BITS};

/// The wildcard character in patterns and diagrams
pub const WILDCARD: char = '*';

const DICT_MAGIC: [u8; 4] = *b"LXDI";
const DICT_VERSION: u32 = 1;

/// Encode a literal word over the dictionary variable region
///
/// The resulting BDD fixes every bit of the word's characters, fixes the
/// following byte to NUL, and leaves all higher positions unconstrained.
pub fn encode_word(
    manager: &BddManager,
    word: &str,
    max_word_len: usize,
) -> Result<Bdd, EncodeError> {
    check_encodable(word, max_word_len)?;

    let mut bdd = manager.constant(true);
    for (pos, byte) in word.bytes().enumerate() {
        bdd = fix_byte(manager, bdd, byte, pos);
    }
    bdd = fix_byte(manager, bdd, 0, word.len());
    Ok(bdd)
}

/// Encode a wildcard pattern over the dictionary variable region
///
/// Like [`encode_word`], except a `*` position only requires the byte to be
/// non-zero. The trailing NUL is forced either way, which pins the length of
/// every match to the pattern's length.
pub fn encode_pattern(
    manager: &BddManager,
    pattern: &str,
    max_word_len: usize,
) -> Result<Bdd, EncodeError> {
    check_encodable(pattern, max_word_len)?;

    let mut bdd = manager.constant(true);
    for (pos, byte) in pattern.bytes().enumerate() {
        if byte == WILDCARD as u8 {
            bdd = require_nonzero(manager, bdd, pos);
        } else {
            bdd = fix_byte(manager, bdd, byte, pos);
        }
    }
    bdd = fix_byte(manager, bdd, 0, pattern.len());
    Ok(bdd)
}

fn check_encodable(word: &str, max_word_len: usize) -> Result<(), EncodeError> {
    // The terminator needs one position of its own
    if word.len() >= max_word_len {
        return Err(EncodeError::TooLong {
            word: word.to_string(),
            max_word_len,
        });
    }
    if let Some(byte) = word.bytes().find(|b| !b.is_ascii_graphic()) {
        return Err(EncodeError::InvalidByte {
            word: word.to_string(),
            byte,
        });
    }
    Ok(())
}

/// Conjoin the constraint "the byte at `pos` equals `byte`"
fn fix_byte(manager: &BddManager, bdd: Bdd, byte: u8, pos: usize) -> Bdd {
    let mut result = bdd;
    for bit in 0..CHAR_BITS {
        let var = manager.var(char_bit(pos, bit));
        result = if byte & (1 << bit) != 0 {
            result.and(&var)
        } else {
            result.and(&var.not())
        };
    }
    result
}

/// Conjoin the constraint "the byte at `pos` is non-zero"
fn require_nonzero(manager: &BddManager, bdd: Bdd, pos: usize) -> Bdd {
    let mut any = manager.constant(false);
    for bit in 0..CHAR_BITS {
        any = any.or(&manager.var(char_bit(pos, bit)));
    }
    bdd.and(&any)
}

/// A finite language of words represented as a single BDD
///
/// Words are lowercased on insertion. The word-length bound fixes the size of
/// the dictionary variable region and, downstream, the side length of the
/// crossword grid.
#[derive(Debug, Clone)]
pub struct Dictionary {
    manager: BddManager,
    bdd: Bdd,
    max_word_len: usize,
    words_read: usize,
    chars_read: usize,
}

impl Dictionary {
    /// Create an empty dictionary (the empty language)
    pub fn new(manager: BddManager, max_word_len: usize) -> Self {
        let bdd = manager.constant(false);
        Dictionary {
            manager,
            bdd,
            max_word_len,
            words_read: 0,
            chars_read: 0,
        }
    }

    /// Build a dictionary from an iterator of words
    pub fn from_words<'a, I>(
        manager: BddManager,
        max_word_len: usize,
        words: I,
    ) -> Result<Self, EncodeError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut dict = Dictionary::new(manager, max_word_len);
        for word in words {
            dict.add_word(word)?;
        }
        Ok(dict)
    }

    /// Build a dictionary from whitespace-separated words
    pub fn from_reader<R: BufRead>(
        manager: BddManager,
        max_word_len: usize,
        mut reader: R,
    ) -> Result<Self, WordListError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;

        let mut dict = Dictionary::new(manager, max_word_len);
        for word in text.split_whitespace() {
            dict.add_word(word)?;
        }
        debug!(
            "dictionary built: {} words, {} manager nodes",
            dict.words_read,
            dict.manager.node_count()
        );
        Ok(dict)
    }

    /// Build a dictionary from a word-list file
    pub fn from_word_file<P: AsRef<Path>>(
        manager: BddManager,
        max_word_len: usize,
        path: P,
    ) -> Result<Self, WordListError> {
        let file = File::open(path)?;
        Dictionary::from_reader(manager, max_word_len, BufReader::new(file))
    }

    /// Add one word, lowercased, to the language
    ///
    /// Adding a word twice leaves the dictionary unchanged (`a | a = a`),
    /// though the read statistics still count both occurrences.
    pub fn add_word(&mut self, word: &str) -> Result<(), EncodeError> {
        let word = word.to_ascii_lowercase();
        let encoded = encode_word(&self.manager, &word, self.max_word_len)?;
        self.bdd = self.bdd.or(&encoded);
        self.words_read += 1;
        self.chars_read += word.len();
        Ok(())
    }

    /// The dictionary as a BDD over the dictionary variable region
    pub fn bdd(&self) -> &Bdd {
        &self.bdd
    }

    /// The manager all of this dictionary's BDDs live in
    pub fn manager(&self) -> &BddManager {
        &self.manager
    }

    /// The word-length bound
    pub fn max_word_len(&self) -> usize {
        self.max_word_len
    }

    /// The subset of the dictionary matching `pattern`, as a BDD
    ///
    /// Exactly the dictionary words whose length equals the pattern's and
    /// that agree with it at every non-wildcard position.
    pub fn match_pattern_bdd(&self, pattern: &str) -> Result<Bdd, EncodeError> {
        let pat = encode_pattern(&self.manager, pattern, self.max_word_len)?;
        Ok(self.bdd.and(&pat))
    }

    /// Enumerate the dictionary words matching `pattern`
    pub fn match_pattern(&self, pattern: &str) -> Result<Vec<String>, EncodeError> {
        Ok(decode_words(&self.match_pattern_bdd(pattern)?))
    }

    /// Enumerate every word in the dictionary
    pub fn words(&self) -> Vec<String> {
        decode_words(&self.bdd)
    }

    /// Snapshot of the dictionary's size statistics
    pub fn stats(&self) -> DictionaryStats {
        DictionaryStats {
            words_read: self.words_read,
            chars_read: self.chars_read,
            nodes: self.manager.node_count(),
            vars: self.manager.var_count(),
        }
    }

    /// Serialize the dictionary to a binary image
    ///
    /// The image records the word-length bound ahead of the BDD so a reload
    /// reconstructs an identical variable layout.
    pub fn write_image<W: Write>(&self, writer: &mut W) -> Result<(), ImageWriteError> {
        writer.write_all(&DICT_MAGIC)?;
        write_u32(writer, DICT_VERSION)?;
        write_u32(writer, self.max_word_len as u32)?;
        self.bdd.write_image(writer)
    }

    /// Serialize the dictionary to a binary image file
    pub fn to_image_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ImageWriteError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_image(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Reconstruct a dictionary from a binary image
    ///
    /// Word and character counts are not part of the image; a loaded
    /// dictionary reports zero words read.
    pub fn from_image_reader<R: Read>(
        manager: BddManager,
        reader: &mut R,
    ) -> Result<Self, ImageReadError> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if magic != DICT_MAGIC {
            return Err(ImageError::BadMagic { found: magic }.into());
        }
        let version = read_u32(reader)?;
        if version != DICT_VERSION {
            return Err(ImageError::UnsupportedVersion { version }.into());
        }
        let max_word_len = read_u32(reader)? as usize;
        let bdd = manager.read_image(reader)?;
        Ok(Dictionary {
            manager,
            bdd,
            max_word_len,
            words_read: 0,
            chars_read: 0,
        })
    }

    /// Reconstruct a dictionary from a binary image file
    pub fn from_image_file<P: AsRef<Path>>(
        manager: BddManager,
        path: P,
    ) -> Result<Self, ImageReadError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Dictionary::from_image_reader(manager, &mut reader)
    }

    /// Dump the dictionary BDD in Graphviz DOT format
    pub fn write_dot<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.bdd.write_dot(writer)
    }
}

/// Size statistics of a built dictionary
///
/// Observational only; rendering mirrors the summary block printed after a
/// word-list load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DictionaryStats {
    /// Number of words read (duplicates counted)
    pub words_read: usize,
    /// Number of characters read, terminators excluded
    pub chars_read: usize,
    /// Unique nodes in the manager
    pub nodes: usize,
    /// Allocated variables in the manager
    pub vars: usize,
}

impl DictionaryStats {
    /// Total encoded bits, NUL terminators included
    pub fn total_bits(&self) -> usize {
        CHAR_BITS * (self.chars_read + self.words_read)
    }

    /// Nodes per encoded input bit; a rough compression measure
    pub fn nodes_per_bit(&self) -> f64 {
        let bits = self.total_bits();
        if bits == 0 {
            0.0
        } else {
            self.nodes as f64 / bits as f64
        }
    }
}

impl fmt::Display for DictionaryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} words read.", self.words_read)?;
        writeln!(f, "{} characters read.", self.chars_read)?;
        writeln!(f, "{} total bits.", self.total_bits())?;
        writeln!(f)?;
        writeln!(f, "BDD has {} nodes.", self.nodes)?;
        writeln!(f, "BDD has {} variables.", self.vars)?;
        writeln!(f)?;
        write!(f, "num nodes / total bits = {:.6}.", self.nodes_per_bit())
    }
}

/// Decode every word a dictionary-region BDD accepts
///
/// Walks each cube bit by bit, branching at don't-care bits; a completed NUL
/// byte ends a word, so padding above the terminator is never explored.
fn decode_words(bdd: &Bdd) -> Vec<String> {
    let mut words = Vec::new();
    for mut cube in bdd.cubes() {
        let mut buf = vec![0u8; cube.len() / CHAR_BITS + 1];
        instantiate_cube(&mut cube, 0, &mut buf, &mut words);
    }
    words
}

fn instantiate_cube(cube: &mut Cube, i: usize, buf: &mut [u8], words: &mut Vec<String>) {
    if i == cube.len() {
        // Cube exhausted without a terminator; emit the complete bytes read
        // so far. Unreachable for BDDs built by the encoders above.
        let len = i / CHAR_BITS;
        words.push(String::from_utf8_lossy(&buf[..len]).into_owned());
        return;
    }
    match cube[i] {
        Some(value) => {
            let pos = i / CHAR_BITS;
            let bit = i % CHAR_BITS;
            set_bit(&mut buf[pos], bit, value);
            if bit == CHAR_BITS - 1 && buf[pos] == 0 {
                words.push(String::from_utf8_lossy(&buf[..pos]).into_owned());
            } else {
                instantiate_cube(cube, i + 1, buf, words);
            }
        }
        None => {
            cube[i] = Some(false);
            instantiate_cube(cube, i, buf, words);
            cube[i] = Some(true);
            instantiate_cube(cube, i, buf, words);
            cube[i] = None;
        }
    }
}

fn set_bit(byte: &mut u8, bit: usize, value: bool) {
    if value {
        *byte |= 1 << bit;
    } else {
        *byte &= !(1 << bit);
    }
}
