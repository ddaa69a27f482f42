//! Lexigrid - symbolic crossword solver command-line interface
//!
//! Builds (or reloads) a dictionary BDD, then optionally matches a wildcard
//! pattern against it or solves a crossword described as a raw clue list or
//! an ASCII diagram.

use clap::{ArgGroup, Parser};
use lexigrid::{solve, BddManager, Crossword, Dictionary, DEFAULT_MAX_WORD_LEN};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "lexigrid")]
#[command(about = "Symbolic crossword solver over a BDD-encoded dictionary", long_about = None)]
#[command(version)]
#[command(group(
    ArgGroup::new("dictionary_source")
        .required(true)
        .multiple(true)
        .args(["words", "in_bdd"])
))]
struct Args {
    /// Build the dictionary from a whitespace-separated word list
    #[arg(short = 'w', long = "words", value_name = "FILE")]
    words: Option<PathBuf>,

    /// Load a previously serialized dictionary BDD
    #[arg(long = "ib", value_name = "FILE")]
    in_bdd: Option<PathBuf>,

    /// Serialize the dictionary BDD after build
    #[arg(long = "ob", value_name = "FILE")]
    out_bdd: Option<PathBuf>,

    /// Dump the dictionary BDD in Graphviz DOT format
    #[arg(short = 'd', long = "dot", value_name = "FILE")]
    dot: Option<PathBuf>,

    /// Match a wildcard pattern against the dictionary and print the hits
    #[arg(short = 'p', long = "pattern", value_name = "PATTERN")]
    pattern: Option<String>,

    /// Solve a crossword given as a raw clue list (one "<A|D> <x> <y> <pattern>" per line)
    #[arg(long = "rcw", value_name = "FILE", conflicts_with = "diagram_crossword")]
    raw_crossword: Option<PathBuf>,

    /// Solve a crossword given as an ASCII diagram
    #[arg(long = "cwd", value_name = "FILE")]
    diagram_crossword: Option<PathBuf>,

    /// Maximum word length (also the grid side length)
    #[arg(long = "max-word-len", value_name = "LEN", default_value_t = DEFAULT_MAX_WORD_LEN)]
    max_word_len: usize,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let manager = BddManager::new();

    // A word list takes precedence when both sources are given.
    let dict = match (&args.words, &args.in_bdd) {
        (Some(path), _) => {
            match Dictionary::from_word_file(manager.clone(), args.max_word_len, path) {
                Ok(dict) => {
                    println!("{}", dict.stats());
                    dict
                }
                Err(e) => {
                    eprintln!("Error reading word list '{}': {}", path.display(), e);
                    process::exit(1);
                }
            }
        }
        (None, Some(path)) => match Dictionary::from_image_file(manager.clone(), path) {
            Ok(dict) => dict,
            Err(e) => {
                eprintln!("Error loading dictionary image '{}': {}", path.display(), e);
                process::exit(1);
            }
        },
        (None, None) => unreachable!("clap requires a dictionary source"),
    };

    if let Some(ref path) = args.out_bdd {
        if let Err(e) = dict.to_image_file(path) {
            eprintln!("Error writing dictionary image '{}': {}", path.display(), e);
            process::exit(1);
        }
    }

    if let Some(ref path) = args.dot {
        let result = File::create(path).and_then(|file| {
            let mut writer = BufWriter::new(file);
            dict.write_dot(&mut writer)?;
            writer.flush()
        });
        if let Err(e) = result {
            eprintln!("Error writing dot file '{}': {}", path.display(), e);
            process::exit(1);
        }
    }

    if let Some(ref pattern) = args.pattern {
        let pattern = pattern.to_ascii_lowercase();
        match dict.match_pattern(&pattern) {
            Ok(words) => {
                for word in words {
                    println!("{}", word);
                }
            }
            Err(e) => {
                eprintln!("Error matching pattern '{}': {}", pattern, e);
                process::exit(1);
            }
        }
    }

    let crossword = match (&args.raw_crossword, &args.diagram_crossword) {
        (Some(path), _) => Some(Crossword::from_raw_file(path).unwrap_or_else(|e| {
            eprintln!("Error reading crossword '{}': {}", path.display(), e);
            process::exit(1);
        })),
        (None, Some(path)) => Some(
            Crossword::from_diagram_file(path, args.max_word_len).unwrap_or_else(|e| {
                eprintln!("Error reading crossword '{}': {}", path.display(), e);
                process::exit(1);
            }),
        ),
        (None, None) => None,
    };

    if let Some(crossword) = crossword {
        println!("Crossword read:");
        println!();
        print!("{}", crossword);

        match solve(&dict, &crossword) {
            Ok(solutions) if solutions.is_empty() => {
                println!();
                println!("No solutions found!");
            }
            Ok(solutions) => {
                println!();
                println!("Found solutions!");
                for solution in &solutions {
                    println!();
                    print!("{}", solution);
                }
                println!();
            }
            Err(e) => {
                eprintln!("Error solving crossword: {}", e);
                process::exit(1);
            }
        }
    }
}
