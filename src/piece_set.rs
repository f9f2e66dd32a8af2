//! A multiset of piece types, built by merging user-supplied silhouettes
//! whose rotation classes coincide.

use smallvec::SmallVec;

use crate::error::PieceSetError;
use crate::piece::{ParseConfig, Piece};

/// One rotation class of polyomino, bundled with how many copies of it
/// appear in the puzzle.
///
/// `rotations` holds between 1 and 4 distinct oriented pieces, in the order
/// produced by repeatedly rotating the first.
#[derive(Clone, Debug)]
pub struct PieceType {
    rotations: SmallVec<[Piece; 4]>,
    mult: usize,
}

impl PieceType {
    pub fn rotations(&self) -> &[Piece] {
        &self.rotations
    }

    pub fn mult(&self) -> usize {
        self.mult
    }

    fn build_rotations(first: Piece) -> SmallVec<[Piece; 4]> {
        let mut rotations: SmallVec<[Piece; 4]> = SmallVec::new();
        rotations.push(first.clone());

        let mut current = first.rotate();
        for _ in 0..3 {
            if current == rotations[0] {
                break;
            }
            let next = current.rotate();
            rotations.push(current);
            current = next;
        }

        rotations
    }

    fn shares_a_rotation_with(&self, other: &PieceType) -> bool {
        self.rotations
            .iter()
            .any(|r| other.rotations.iter().any(|o| r == o))
    }
}

/// An ordered, permutation-free multiset of piece types.
///
/// No two types share any rotation: inputs whose polyominoes are equal up to
/// rotation are merged into a single type with summed multiplicity.
#[derive(Clone, Debug, Default)]
pub struct PieceSet {
    types: Vec<PieceType>,
}

impl PieceSet {
    /// One `(ascii silhouette, multiplicity)` pair describing the pieces to
    /// place.
    pub fn build(
        inputs: &[(&str, usize)],
        config: ParseConfig,
    ) -> Result<PieceSet, PieceSetError> {
        let mut set = PieceSet { types: Vec::new() };

        for &(ascii, mult) in inputs {
            if mult == 0 {
                return Err(PieceSetError::MultiplicityZero);
            }

            let piece = Piece::from_ascii(ascii, config)?;
            let candidate = PieceType {
                rotations: PieceType::build_rotations(piece),
                mult,
            };

            if let Some(existing) = set
                .types
                .iter_mut()
                .find(|t| t.shares_a_rotation_with(&candidate))
            {
                existing.mult += mult;
            } else {
                set.types.push(candidate);
            }
        }

        Ok(set)
    }

    pub fn types(&self) -> &[PieceType] {
        &self.types
    }

    /// Total piece count N = sum of every type's multiplicity.
    pub fn total_count(&self) -> usize {
        self.types.iter().map(|t| t.mult).sum()
    }
}
