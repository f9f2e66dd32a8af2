//! Exact-cover tiling of a rectangular board with a multiset of polyominoes.
//!
//! - [`bitmatrix`] — the row-major bit-packed grid every other module builds on.
//! - [`piece`] — a single oriented polyomino, parsed from an ASCII silhouette.
//! - [`piece_set`] — a permutation-free multiset of piece types, merged by rotation class.
//! - [`board`] — the column-major placement surface, with O(height) insert/remove.
//! - [`solver`] — the iterative backtracking search that enumerates tilings.
//! - [`error`] — the error types returned by the above.
//! - [`cli`] — the argument struct and driver function behind the `polyomino-tiler` binary.

pub mod bitmatrix;
pub mod board;
pub mod cli;
pub mod error;
pub mod piece;
pub mod piece_set;
pub mod solver;

pub use bitmatrix::BitMatrix;
pub use board::Board;
pub use piece::{ParseConfig, Piece};
pub use piece_set::{PieceSet, PieceType};
pub use solver::{Placement, Solution, SolveConfig, Solver};
