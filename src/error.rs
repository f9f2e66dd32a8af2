//! Crate-wide error types.
//!
//! Errors fall into two families (see the module docs on [`crate::board`] for
//! the third): input validation, surfaced at construction and never mid-search,
//! and board geometry/collision signals, which the solver consumes as control
//! flow and which never escape [`crate::solver::Solver::solve`].

use thiserror::Error;

/// Errors from parsing or trimming a [`crate::bitmatrix::BitMatrix`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BitMatrixError {
    #[error("line {line} has length {actual}, expected {expected}")]
    InconsistentLineLength {
        line: usize,
        expected: usize,
        actual: usize,
    },
    #[error("line {line}, column {column}: unexpected character {found:?}, expected {char0:?} or {char1:?}")]
    UnexpectedCharacter {
        line: usize,
        column: usize,
        found: char,
        char0: char,
        char1: char,
    },
    #[error("cannot trim {requested} rows/columns from a dimension of size {available}")]
    TrimTooLarge { requested: usize, available: usize },
}

/// Errors from building a [`crate::piece::Piece`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PieceError {
    #[error(transparent)]
    Matrix(#[from] BitMatrixError),
    #[error("piece is {width} cells wide, wider than the word width of {word_bits}")]
    TooWide { width: usize, word_bits: usize },
}

/// Errors from building a [`crate::piece_set::PieceSet`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PieceSetError {
    #[error(transparent)]
    Piece(#[from] PieceError),
    #[error("piece multiplicity must be at least 1")]
    MultiplicityZero,
}

/// Geometry and collision signals produced while placing a piece on a
/// [`crate::board::Board`].
///
/// These are not failures in the usual sense: the solver's state machine
/// matches on every variant to decide its next state. They are still modeled
/// as an `Error` type because that's the correct contract for `insert`/
/// `remove` (the operation did not happen), not because callers are expected
/// to propagate them with `?`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("piece overflows both the width and height of the board")]
    WidthAndHeightOverflow,
    #[error("piece overflows the width of the board")]
    WidthOverflow,
    #[error("piece overflows the height of the board")]
    HeightOverflow,
    #[error("piece collides with an already-set cell")]
    InsertCollision,
    #[error("piece claims a cell that is not currently set")]
    RemoveMismatch,
}
