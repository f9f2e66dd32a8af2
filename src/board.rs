//! The mutable placement surface the solver drives.
//!
//! A [`Board`] keeps two representations of the same occupancy in sync on
//! demand: `bit_field`, a row-major [`BitMatrix`] meant for I/O, and
//! `current`, a column-major word-packed store meant for the hot path.
//! Placing a piece of height h touches h consecutive words of `current` —
//! one per row — so `insert`/`remove` cost O(piece.height) word operations
//! regardless of the piece's area.
//!
//! `current[col * height + row]` holds a word whose bit k (MSB-first) is
//! cell `(col * WORD_BITS + k, row)`. `current` carries `WORD_BITS` words of
//! trailing padding so a full word-sized read past the last real column
//! never runs off the end of the backing `Vec`.

use std::fmt;

use crate::bitmatrix::{row_words_for, BitMatrix, WORD_BITS};
use crate::error::BoardError;
use crate::piece::{ParseConfig, Piece};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RowOp {
    Insert,
    Remove,
}

#[derive(Clone, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    row_words: usize,
    bit_field: BitMatrix,
    current: Vec<u64>,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.current == other.current
    }
}
impl Eq for Board {}

impl Board {
    /// An empty board of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        let row_words = row_words_for(width);
        Board {
            width,
            height,
            row_words,
            bit_field: BitMatrix::new(width, height),
            current: vec![0u64; row_words * height + WORD_BITS],
        }
    }

    /// Parses an ASCII board rendering and translates it into the
    /// column-major working store.
    pub fn parse(s: &str, config: ParseConfig) -> Result<Self, crate::error::BitMatrixError> {
        let bit_field = BitMatrix::parse(s, config.char0, config.char1)?;
        let mut board = Board::new(bit_field.width(), bit_field.height());
        board.bit_field = bit_field;
        board.rebuild_current_from_bit_field();
        Ok(board)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reads a single cell directly from the hot-path store, without
    /// requiring a sync.
    pub fn get(&self, x: usize, y: usize) -> bool {
        let col = x / WORD_BITS;
        let bit = (WORD_BITS - 1 - (x % WORD_BITS)) as u32;
        (self.current[col * self.height + y] >> bit) & 1 != 0
    }

    fn set_current_bit(&mut self, x: usize, y: usize, value: bool) {
        let col = x / WORD_BITS;
        let bit = (WORD_BITS - 1 - (x % WORD_BITS)) as u32;
        let idx = col * self.height + y;
        let mask = 1u64 << bit;
        if value {
            self.current[idx] |= mask;
        } else {
            self.current[idx] &= !mask;
        }
    }

    fn rebuild_current_from_bit_field(&mut self) {
        for (x, y, v) in self.bit_field.bit_reader() {
            if v {
                self.set_current_bit(x, y, true);
            }
        }
    }

    /// Rewrites `bit_field` from `current` so callers can read or print the
    /// board. `current` is the authoritative store between calls to this
    /// method.
    pub fn sync_to_bit_field(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                self.bit_field.set(x, y, self.get(x, y));
            }
        }
    }

    /// The last-synced row-major view. Call [`Board::sync_to_bit_field`]
    /// first if a placement may have happened since the last sync.
    pub fn bit_field(&self) -> &BitMatrix {
        &self.bit_field
    }

    fn check_bounds(&self, piece: &Piece, x: usize, y: usize) -> Result<(), BoardError> {
        let width_overflow = x + piece.width() > self.width;
        let height_overflow = y + piece.height() > self.height;

        match (width_overflow, height_overflow) {
            (true, true) => Err(BoardError::WidthAndHeightOverflow),
            (true, false) => Err(BoardError::WidthOverflow),
            (false, true) => Err(BoardError::HeightOverflow),
            (false, false) => Ok(()),
        }
    }

    /// ORs `piece.store()` into the board at `(x, y)`.
    ///
    /// Leaves the board unchanged on any error.
    pub fn insert(&mut self, piece: &Piece, x: usize, y: usize) -> Result<(), BoardError> {
        self.check_bounds(piece, x, y)?;
        self.apply_rows(piece, x, y, RowOp::Insert)
    }

    /// The inverse of [`Board::insert`].
    ///
    /// Leaves the board unchanged on any error.
    pub fn remove(&mut self, piece: &Piece, x: usize, y: usize) -> Result<(), BoardError> {
        self.check_bounds(piece, x, y)?;
        self.apply_rows(piece, x, y, RowOp::Remove)
    }

    /// Shared word-level routine for both `insert` and `remove`.
    ///
    /// Handles pieces that straddle a word boundary (`shift + piece.width() >
    /// WORD_BITS`) by splitting each row word across the two column-words it
    /// touches. Writes are applied eagerly, row by row; if a row fails, the
    /// rows already written are walked back in reverse with the same
    /// XOR (self-inverse).
    fn apply_rows(&mut self, piece: &Piece, x: usize, y: usize, op: RowOp) -> Result<(), BoardError> {
        let col = x / WORD_BITS;
        let shift = (x % WORD_BITS) as u32;
        let height = piece.height();
        let data = piece.store().data();
        debug_assert!(col < self.row_words, "bounds check should have caught this");

        let split = |row_word: u64| -> (u64, u64) {
            let low = row_word >> shift;
            let high = if shift == 0 {
                0
            } else {
                row_word << (WORD_BITS as u32 - shift)
            };
            (low, high)
        };

        for r in 0..height {
            let (low_part, high_part) = split(data[r]);
            let idx_lo = col * self.height + y + r;
            let idx_hi = (col + 1) * self.height + y + r;

            let ok = match op {
                RowOp::Insert => {
                    (self.current[idx_lo] & low_part) == 0
                        && (high_part == 0 || (self.current[idx_hi] & high_part) == 0)
                }
                RowOp::Remove => {
                    (self.current[idx_lo] & low_part) == low_part
                        && (high_part == 0 || (self.current[idx_hi] & high_part) == high_part)
                }
            };

            if !ok {
                for back in (0..r).rev() {
                    let (back_low, back_high) = split(data[back]);
                    let back_idx_lo = col * self.height + y + back;
                    let back_idx_hi = (col + 1) * self.height + y + back;
                    self.current[back_idx_lo] ^= back_low;
                    if back_high != 0 {
                        self.current[back_idx_hi] ^= back_high;
                    }
                }
                return Err(match op {
                    RowOp::Insert => BoardError::InsertCollision,
                    RowOp::Remove => BoardError::RemoveMismatch,
                });
            }

            self.current[idx_lo] ^= low_part;
            if high_part != 0 {
                self.current[idx_hi] ^= high_part;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Board {
    /// Formats the last-synced `bit_field`. Call [`Board::sync_to_bit_field`]
    /// beforehand if the board may have changed since.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.bit_field.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t_piece() -> Piece {
        Piece::from_ascii("010\n111", ParseConfig::default()).unwrap()
    }

    fn square() -> Piece {
        Piece::from_ascii("11\n11", ParseConfig::default()).unwrap()
    }

    #[test]
    fn insert_then_remove_restores_empty_board() {
        let mut board = Board::new(10, 10);
        let piece = t_piece();

        board.insert(&piece, 3, 3).unwrap();
        board.remove(&piece, 3, 3).unwrap();
        assert_eq!(board, Board::new(10, 10));

        board.insert(&piece, 2, 5).unwrap();
        board.remove(&piece, 2, 5).unwrap();
        assert_eq!(board, Board::new(10, 10));
    }

    #[test]
    fn insert_detects_collision_and_rolls_back() {
        let mut board = Board::new(4, 4);
        let piece = square();

        board.insert(&piece, 0, 0).unwrap();
        let before = board.clone();

        let err = board.insert(&piece, 1, 1).unwrap_err();
        assert_eq!(err, BoardError::InsertCollision);
        assert_eq!(board, before);
    }

    #[test]
    fn remove_detects_mismatch_and_rolls_back() {
        let mut board = Board::new(4, 4);
        let piece = square();
        let before = board.clone();

        let err = board.remove(&piece, 0, 0).unwrap_err();
        assert_eq!(err, BoardError::RemoveMismatch);
        assert_eq!(board, before);
    }

    #[test]
    fn insert_reports_overflow_direction() {
        let mut board = Board::new(4, 4);
        let piece = square();

        assert_eq!(
            board.insert(&piece, 3, 0).unwrap_err(),
            BoardError::WidthOverflow
        );
        assert_eq!(
            board.insert(&piece, 0, 3).unwrap_err(),
            BoardError::HeightOverflow
        );
        assert_eq!(
            board.insert(&piece, 3, 3).unwrap_err(),
            BoardError::WidthAndHeightOverflow
        );
    }

    #[test]
    fn overlapping_placement_straddles_a_word_boundary() {
        // A 70-wide board forces row_words = 2; a piece placed at x = 60
        // straddles the boundary between word 0 and word 1.
        let mut board = Board::new(70, 2);
        let piece = Piece::from_ascii("1111\n1111", ParseConfig::default()).unwrap();

        board.insert(&piece, 60, 0).unwrap();
        for x in 60..64 {
            assert!(board.get(x, 0));
            assert!(board.get(x, 1));
        }

        let before = board.clone();
        assert_eq!(
            board.insert(&piece, 60, 0).unwrap_err(),
            BoardError::InsertCollision
        );
        assert_eq!(board, before);

        board.remove(&piece, 60, 0).unwrap();
        assert_eq!(board, Board::new(70, 2));
    }

    #[test]
    fn parse_and_sync_round_trip() {
        let s = "010\n111";
        let mut board = Board::parse(s, ParseConfig::default()).unwrap();
        board.sync_to_bit_field();
        assert_eq!(board.bit_field().to_string(), s);
    }
}
