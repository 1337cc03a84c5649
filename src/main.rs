//! Magic Cube
//!
//! Models an NxNxN cube as permutations of its facelets. Turns the cube,
//! prints the net permutation of a move sequence in cycle notation, discovers
//! the generator permutations of any cube size, and searches short move
//! sequences for ones that only disturb a few pieces.

mod visualization;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use env_logger::TimestampPrecision;
use log::LevelFilter;
use thiserror::Error;

use magicube::cycles::render;
use magicube::generators::{edge_corner_table, GeneratorCache};
use magicube::moves::{parse_sequence, KNOWN_SEQUENCES};
use magicube::{
    Cube, CubeError, GeneratorError, MoveSearch, NotationError, SearchConfig, SearchError,
    SearchOutcome, Tolerance,
};

/// Explores the permutation group of an NxNxN cube.
#[derive(Parser)]
#[command(name = "magicube")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Cube size N.
    #[arg(default_value_t = 3)]
    size: usize,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Relative and absolute tolerance for matching sticker positions.
    #[arg(long, default_value_t = 0.01, global = true)]
    tolerance: f64,

    /// Directory to cache discovered generator tables in.
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive 3D viewer.
    View,
    /// Discover and list the generator permutations of the cube.
    Generators,
    /// Apply a move sequence such as "R * U * (R)^-1" and print its permutation.
    Apply { sequence: String },
    /// Print the permutations of the known operation sequences.
    Ops,
    /// Search move sequences for permutations that only disturb a few pieces.
    Search {
        /// Longest sequence explored, seed included.
        #[arg(long, default_value_t = 8)]
        depth: usize,
        /// Index of the generator every sequence starts with.
        #[arg(long, default_value_t = 0)]
        seed: usize,
        /// Search the generators discovered for the cube size instead of the
        /// built-in 24-facelet table.
        #[arg(long)]
        discovered: bool,
    },
}

#[derive(Error, Debug)]
enum AppError {
    #[error(transparent)]
    Cube(#[from] CubeError),
    #[error(transparent)]
    Generators(#[from] GeneratorError),
    #[error(transparent)]
    Notation(#[from] NotationError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("The cube state after {0:?} could not be matched against a solved cube")]
    Unmatched(String),
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    let tolerance = Tolerance::uniform(cli.tolerance);
    let result = match cli.command {
        None | Some(Command::View) => run_view(cli.size, tolerance),
        Some(Command::Generators) => run_generators(cli.size, tolerance, cli.cache_dir),
        Some(Command::Apply { sequence }) => {
            sequence_report(cli.size, tolerance, &sequence).map(|report| print!("{report}"))
        }
        Some(Command::Ops) => run_ops(cli.size, tolerance),
        Some(Command::Search {
            depth,
            seed,
            discovered,
        }) => run_search(
            cli.size,
            tolerance,
            cli.cache_dir,
            depth,
            seed,
            discovered,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Opens the viewer on a solved cube.
fn run_view(size: usize, tolerance: Tolerance) -> Result<(), AppError> {
    println!("Controls: U/D/L/R/F/B turn, Up/Down layer, Left/Right direction, S solve");
    visualization::display(size, tolerance)?;
    Ok(())
}

/// Prints every generator of the cube in cycle notation.
fn run_generators(
    size: usize,
    tolerance: Tolerance,
    cache_dir: Option<PathBuf>,
) -> Result<(), AppError> {
    let mut cache = GeneratorCache::new(tolerance);
    if let Some(directory) = cache_dir {
        cache = cache.with_directory(directory);
    }
    let table = cache.get(size)?;

    println!("{} generators for {size}x{size}x{size}:\n", table.len());
    print!("{}", table.listing(&Cube::new(size)?.space()));
    Ok(())
}

/// Applies `sequence` to a solved cube and describes the resulting permutation.
fn sequence_report(size: usize, tolerance: Tolerance, sequence: &str) -> Result<String, AppError> {
    let turns = parse_sequence(sequence)?;
    let mut cube = Cube::new(size)?;
    cube.apply_sequence(&turns);

    let permutation = cube
        .state(tolerance)
        .ok_or_else(|| AppError::Unmatched(sequence.to_string()))?;
    Ok(format!(
        "{sequence}\n{} = {permutation}\n",
        render(&permutation, &cube.space())
    ))
}

fn run_ops(size: usize, tolerance: Tolerance) -> Result<(), AppError> {
    for sequence in KNOWN_SEQUENCES {
        print!("{}", sequence_report(size, tolerance, sequence)?);
        println!("------");
    }
    Ok(())
}

/// Runs the move search, printing each report as it is found.
fn run_search(
    size: usize,
    tolerance: Tolerance,
    cache_dir: Option<PathBuf>,
    depth: usize,
    seed: usize,
    discovered: bool,
) -> Result<(), AppError> {
    let (table, defaults) = if discovered {
        let mut cache = GeneratorCache::new(tolerance);
        if let Some(directory) = cache_dir {
            cache = cache.with_directory(directory);
        }
        (cache.get(size)?.with_inverses(), SearchConfig::for_cube(size))
    } else {
        let table = edge_corner_table();
        let defaults = SearchConfig::for_domain(table.domain());
        (table, defaults)
    };

    let config = SearchConfig {
        max_depth: depth,
        seed,
        ..defaults
    };
    let outcome = MoveSearch::new(&table, config).run(|node| println!("{node}"))?;
    print!("{}", search_summary(&outcome));
    Ok(())
}

fn search_summary(outcome: &SearchOutcome) -> String {
    let mut summary = format!(
        "Complete: {} nodes, {} reports\n",
        outcome.nodes_visited, outcome.reports
    );
    match &outcome.best {
        Some(best) => summary.push_str(&format!("Best: {best}\n")),
        None => summary.push_str("Best: none\n"),
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_report_of_cancelling_turns() {
        let report = sequence_report(3, Tolerance::default(), "R * (R)^-1").unwrap();
        assert!(report.starts_with("R * (R)^-1\n[] = [1, 2, 3,"));
    }

    #[test]
    fn test_sequence_report_rejects_bad_notation() {
        let error = sequence_report(3, Tolerance::default(), "R * X").unwrap_err();
        assert!(matches!(error, AppError::Notation(NotationError::UnknownFace('X'))));
    }

    #[test]
    fn test_known_sequences_leave_most_facelets_fixed() {
        let fixed: Vec<usize> = KNOWN_SEQUENCES
            .iter()
            .map(|sequence| {
                let mut cube = Cube::new(3).unwrap();
                cube.apply_sequence(&parse_sequence(sequence).unwrap());
                cube.state(Tolerance::default()).unwrap().fixed_points()
            })
            .collect();
        assert_eq!(fixed, vec![50, 46, 46, 46, 38, 40, 36]);
    }

    #[test]
    fn test_search_summary() {
        let table = edge_corner_table();
        let config = SearchConfig {
            max_depth: 4,
            ..SearchConfig::for_domain(table.domain())
        };
        let outcome = MoveSearch::new(&table, config).run(|_| {}).unwrap();

        insta::assert_snapshot!(search_summary(&outcome), @r"
        Complete: 1464 nodes, 0 reports
        Best: 1 12 [F] [1, 2, 16, 15, 5, 6, 12, 11, 9, 10, 3, 4, 13, 14, 7, 8, 17, 18, 19, 20, 22, 24, 21, 23]
        ");
    }
}
