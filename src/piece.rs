//! A single oriented polyomino.

use crate::bitmatrix::{BitMatrix, WORD_BITS};
use crate::error::PieceError;

/// Characters used when parsing piece silhouettes and board renderings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseConfig {
    pub char0: char,
    pub char1: char,
}

impl Default for ParseConfig {
    fn default() -> Self {
        ParseConfig {
            char0: '0',
            char1: '1',
        }
    }
}

/// One oriented polyomino: a [`BitMatrix`] trimmed to its bounding box, plus
/// derived metrics.
///
/// `width` is guaranteed to be at most [`WORD_BITS`] — pieces wider than a
/// word are rejected at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    store: BitMatrix,
    area: usize,
}

impl Piece {
    /// Parses an ASCII silhouette, trims it to its bounding box, and
    /// computes its area.
    pub fn from_ascii(s: &str, config: ParseConfig) -> Result<Self, PieceError> {
        let matrix = BitMatrix::parse(s, config.char0, config.char1)?;
        Piece::from_matrix(matrix.trim_whitespace())
    }

    /// Builds a piece directly from an already-trimmed matrix.
    ///
    /// The caller is responsible for trimming; this does not call
    /// [`BitMatrix::trim_whitespace`].
    pub fn from_matrix(store: BitMatrix) -> Result<Self, PieceError> {
        if store.width() > WORD_BITS {
            return Err(PieceError::TooWide {
                width: store.width(),
                word_bits: WORD_BITS,
            });
        }

        let area = store.bit_reader().filter(|&(_, _, v)| v).count();

        Ok(Piece { store, area })
    }

    pub fn width(&self) -> usize {
        self.store.width()
    }

    pub fn height(&self) -> usize {
        self.store.height()
    }

    pub fn area(&self) -> usize {
        self.area
    }

    pub(crate) fn store(&self) -> &BitMatrix {
        &self.store
    }

    /// Returns a new piece, rotated 90 degrees clockwise.
    ///
    /// For every set bit (x, y) of `self`, the rotated piece has (height - 1
    /// - y, x) set. Dimensions are swapped: the result's width is `self`'s
    /// height, and vice versa.
    pub fn rotate(&self) -> Piece {
        let new_width = self.height();
        let new_height = self.width();
        let mut store = BitMatrix::new(new_width, new_height);

        for (x, y, v) in self.store.bit_reader() {
            if v {
                store.set(self.height() - 1 - y, x, true);
            }
        }

        Piece {
            store,
            area: self.area,
        }
    }
}
