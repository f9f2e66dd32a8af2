//! Argument parsing and the driver function `main.rs` calls.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::board::Board;
use crate::error::PieceSetError;
use crate::piece::ParseConfig;
use crate::piece_set::PieceSet;
use crate::solver::{SolveConfig, Solver};

/// Enumerate every exact tiling of a rectangular board by a multiset of
/// polyomino pieces.
#[derive(Debug, Parser)]
#[command(name = "polyomino-tiler")]
pub struct Args {
    /// Board width, in cells.
    #[arg(long)]
    pub width: usize,

    /// Board height, in cells.
    #[arg(long)]
    pub height: usize,

    /// Stop after this many solutions.
    #[arg(long)]
    pub cap: Option<usize>,

    /// Log a progress line every time the solution count crosses a multiple
    /// of this value.
    #[arg(long)]
    pub progress: Option<usize>,

    /// One or more `PATH=MULTIPLICITY` piece specifications.
    #[arg(required = true, value_parser = parse_piece_spec)]
    pub pieces: Vec<PieceSpec>,
}

#[derive(Debug, Clone)]
pub struct PieceSpec {
    pub path: PathBuf,
    pub mult: usize,
}

fn parse_piece_spec(s: &str) -> Result<PieceSpec, String> {
    let (path, mult) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected PATH=MULTIPLICITY, got {s:?}"))?;
    let mult: usize = mult
        .parse()
        .map_err(|_| format!("{mult:?} is not a valid multiplicity"))?;
    Ok(PieceSpec {
        path: PathBuf::from(path),
        mult,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read piece file {path}: {source}")]
    ReadPieceFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    PieceSet(#[from] PieceSetError),
}

pub fn run(args: Args) -> Result<ExitCode, CliError> {
    let contents = args
        .pieces
        .iter()
        .map(|spec| {
            fs::read_to_string(&spec.path).map_err(|source| CliError::ReadPieceFile {
                path: spec.path.clone(),
                source,
            })
        })
        .collect::<Result<Vec<String>, CliError>>()?;

    let inputs: Vec<(&str, usize)> = contents
        .iter()
        .zip(&args.pieces)
        .map(|(text, spec)| (text.as_str(), spec.mult))
        .collect();

    let piece_set = PieceSet::build(&inputs, ParseConfig::default())?;

    let config = SolveConfig {
        solution_cap: args.cap,
        progress_interval: args.progress,
    };
    let mut solver = Solver::with_config(&piece_set, args.width, args.height, config);
    let solutions = solver.solve();

    for (i, solution) in solutions.iter().enumerate() {
        if i > 0 {
            println!();
        }
        print_solution(solution, &piece_set, args.width, args.height);
    }
    println!("\n{} solution(s)", solutions.len());

    Ok(ExitCode::SUCCESS)
}

fn print_solution(
    solution: &crate::solver::Solution,
    piece_set: &PieceSet,
    width: usize,
    height: usize,
) {
    let mut board = Board::new(width, height);
    for placement in solution {
        let piece = &piece_set.types()[placement.piece_index].rotations()[placement.rotation_index];
        board
            .insert(piece, placement.x, placement.y)
            .expect("a saved solution's placements must still fit on a fresh board");
    }
    board.sync_to_bit_field();
    println!("{board}");
}
