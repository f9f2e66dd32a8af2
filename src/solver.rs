//! Iterative depth-first enumeration of every distinct tiling.
//!
//! The search is written as an explicit state machine, not recursion, so
//! that backtracking costs O(1) and performs no allocation — the only
//! allocation in the whole search is the one copy of the placement stack
//! made per emitted solution.

use crate::board::Board;
use crate::piece_set::PieceSet;

/// One piece placed on the board.
///
/// `type_index` is the 1-based ordinal of this placement among copies of
/// the same [`crate::piece_set::PieceType`] (1..=mult).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub x: usize,
    pub y: usize,
    pub piece_index: usize,
    pub rotation_index: usize,
    pub type_index: usize,
}

/// An ordered sequence of N placements whose union covers the board.
pub type Solution = Vec<Placement>;

/// Knobs that bound how much work `solve` does and how much it reports.
/// Never affect which solutions are correct, only which (and how many) are
/// found and how much is logged along the way.
#[derive(Clone, Copy, Debug, Default)]
pub struct SolveConfig {
    /// Stop the search after this many solutions have been found.
    pub solution_cap: Option<usize>,
    /// Emit a `log::debug!` line every time the solution count crosses a
    /// multiple of this value.
    pub progress_interval: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    TryPlacement,
    AcceptPiece,
    SaveSolution,
    MoveX,
    MoveNextRow,
    NextRotation,
    Backtrack,
    End,
}

/// Search cursor: which piece/rotation/copy is being attempted next, and
/// where.
#[derive(Clone, Copy, Debug, Default)]
struct Cursor {
    next_index: usize,
    next_rotation: usize,
    n_type_placed: usize,
    next_x: usize,
    next_y: usize,
}

pub struct Solver<'a> {
    piece_set: &'a PieceSet,
    board: Board,
    stack: Vec<Placement>,
    config: SolveConfig,
}

impl<'a> Solver<'a> {
    /// Preallocates the placement stack to the piece set's total count.
    pub fn new(piece_set: &'a PieceSet, width: usize, height: usize) -> Self {
        Solver::with_config(piece_set, width, height, SolveConfig::default())
    }

    pub fn with_config(
        piece_set: &'a PieceSet,
        width: usize,
        height: usize,
        config: SolveConfig,
    ) -> Self {
        Solver {
            piece_set,
            board: Board::new(width, height),
            stack: Vec::with_capacity(piece_set.total_count()),
            config,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Enumerates every distinct tiling. May return an empty list.
    pub fn solve(&mut self) -> Vec<Solution> {
        let types = self.piece_set.types();
        let n = self.piece_set.total_count();

        log::info!(
            "solving {}x{} board with {} pieces across {} types",
            self.board.width(),
            self.board.height(),
            n,
            types.len()
        );

        let started = std::time::Instant::now();
        let mut solutions = Vec::new();

        if types.is_empty() {
            if self.board.width() * self.board.height() == 0 {
                solutions.push(Vec::new());
            }
            log::info!(
                "search complete: {} solutions in {:?}",
                solutions.len(),
                started.elapsed()
            );
            return solutions;
        }

        let mut cursor = Cursor::default();
        let mut pieces_placed = 0usize;
        let mut state = State::TryPlacement;

        loop {
            state = match state {
                State::TryPlacement => {
                    let piece_type = &types[cursor.next_index];
                    let piece = &piece_type.rotations()[cursor.next_rotation];

                    match self.board.insert(piece, cursor.next_x, cursor.next_y) {
                        Ok(()) => State::AcceptPiece,
                        Err(crate::error::BoardError::InsertCollision) => State::MoveX,
                        Err(crate::error::BoardError::WidthOverflow) => State::MoveNextRow,
                        Err(_) => State::NextRotation,
                    }
                }

                State::AcceptPiece => {
                    self.stack.push(Placement {
                        x: cursor.next_x,
                        y: cursor.next_y,
                        piece_index: cursor.next_index,
                        rotation_index: cursor.next_rotation,
                        type_index: cursor.n_type_placed + 1,
                    });
                    pieces_placed += 1;
                    cursor.n_type_placed += 1;

                    if self.load_next_piece(types, &mut cursor, pieces_placed, n) {
                        State::TryPlacement
                    } else {
                        State::SaveSolution
                    }
                }

                State::SaveSolution => {
                    solutions.push(self.stack[..pieces_placed].to_vec());

                    if let Some(interval) = self.config.progress_interval {
                        if interval != 0 && solutions.len() % interval == 0 {
                            log::debug!("{} solutions found so far", solutions.len());
                        }
                    }

                    match self.config.solution_cap {
                        Some(cap) if solutions.len() >= cap => State::End,
                        _ => State::Backtrack,
                    }
                }

                State::MoveX => {
                    cursor.next_x += 1;
                    State::TryPlacement
                }

                State::MoveNextRow => {
                    cursor.next_x = 0;
                    cursor.next_y += 1;
                    State::TryPlacement
                }

                State::NextRotation => {
                    cursor.next_rotation += 1;
                    if cursor.next_rotation >= types[cursor.next_index].rotations().len() {
                        State::Backtrack
                    } else {
                        State::TryPlacement
                    }
                }

                State::Backtrack => {
                    if pieces_placed == 0 {
                        State::End
                    } else {
                        let popped = self.stack.pop().expect("pieces_placed > 0");
                        pieces_placed -= 1;

                        let piece = &types[popped.piece_index].rotations()[popped.rotation_index];
                        self.board
                            .remove(piece, popped.x, popped.y)
                            .expect("removing a placement that was just inserted must succeed");

                        cursor.next_index = popped.piece_index;
                        cursor.next_rotation = popped.rotation_index;
                        cursor.n_type_placed = popped.type_index - 1;
                        cursor.next_x = popped.x;
                        cursor.next_y = popped.y;

                        State::MoveX
                    }
                }

                State::End => break,
            };
        }

        log::info!(
            "search complete: {} solutions in {:?}",
            solutions.len(),
            started.elapsed()
        );
        solutions
    }

    /// Canonicalising rule: forces the next copy of the same piece type to
    /// start strictly after the previous copy in row-major order, which
    /// prunes permutations of interchangeable identical pieces.
    ///
    /// Returns `true` if there's a next candidate to try (`TRY_PLACEMENT`),
    /// `false` if every piece has been placed (`SAVE_SOLUTION`).
    fn load_next_piece(
        &self,
        types: &[crate::piece_set::PieceType],
        cursor: &mut Cursor,
        pieces_placed: usize,
        n: usize,
    ) -> bool {
        let current_type = &types[cursor.next_index];

        if cursor.n_type_placed < current_type.mult() {
            let prev = self.stack.last().expect("a piece was just placed");
            cursor.next_x = prev.x + 1;
            cursor.next_y = prev.y;
            cursor.next_rotation = 0;
            true
        } else if pieces_placed == n {
            false
        } else {
            cursor.next_index += 1;
            cursor.next_rotation = 0;
            cursor.n_type_placed = 0;
            cursor.next_x = 0;
            cursor.next_y = 0;
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::ParseConfig;

    fn total_area(solution: &Solution, piece_set: &PieceSet) -> usize {
        solution
            .iter()
            .map(|p| piece_set.types()[p.piece_index].rotations()[p.rotation_index].area())
            .sum()
    }

    fn no_overlaps(solution: &Solution, piece_set: &PieceSet, width: usize, height: usize) -> bool {
        let mut board = Board::new(width, height);
        solution
            .iter()
            .all(|p| {
                let piece = &piece_set.types()[p.piece_index].rotations()[p.rotation_index];
                board.insert(piece, p.x, p.y).is_ok()
            })
    }

    #[test]
    fn four_unit_squares_tile_a_4x4_board_in_one_way() {
        let set = PieceSet::build(&[("11\n11", 4)], ParseConfig::default()).unwrap();
        let mut solver = Solver::new(&set, 4, 4);
        let solutions = solver.solve();
        assert_eq!(solutions.len(), 1);
    }

    #[test]
    fn three_unit_squares_on_a_4x4_board_has_eight_solutions() {
        let set = PieceSet::build(&[("11\n11", 3)], ParseConfig::default()).unwrap();
        let mut solver = Solver::new(&set, 4, 4);
        let solutions = solver.solve();
        assert_eq!(solutions.len(), 8);
    }

    #[test]
    fn three_single_cells_on_a_2x2_board_has_three_solutions() {
        let set = PieceSet::build(&[("1", 3)], ParseConfig::default()).unwrap();
        let mut solver = Solver::new(&set, 2, 2);
        let solutions = solver.solve();
        assert_eq!(solutions.len(), 3);
    }

    #[test]
    fn every_solution_covers_the_board_exactly_once() {
        let set = PieceSet::build(&[("010\n111", 1), ("11\n11", 3)], ParseConfig::default()).unwrap();
        let (width, height) = (5, 4);
        let mut solver = Solver::new(&set, width, height);
        let solutions = solver.solve();

        assert!(!solutions.is_empty());
        for solution in &solutions {
            assert_eq!(solution.len(), set.total_count());
            assert_eq!(total_area(solution, &set), width * height);
            assert!(no_overlaps(solution, &set, width, height));
        }
    }

    #[test]
    fn unsolvable_board_yields_no_solutions() {
        // A single T-tetromino can never exactly tile a 1x1 board.
        let set = PieceSet::build(&[("010\n111", 1)], ParseConfig::default()).unwrap();
        let mut solver = Solver::new(&set, 1, 1);
        assert!(solver.solve().is_empty());
    }

    #[test]
    fn empty_piece_set_on_empty_board_has_one_trivial_solution() {
        let set = PieceSet::default();
        let mut solver = Solver::new(&set, 0, 0);
        assert_eq!(solver.solve(), vec![Vec::new()]);
    }

    #[test]
    fn solution_cap_stops_the_search_early() {
        let set = PieceSet::build(&[("11\n11", 3)], ParseConfig::default()).unwrap();
        let mut solver = Solver::with_config(
            &set,
            4,
            4,
            SolveConfig {
                solution_cap: Some(2),
                progress_interval: None,
            },
        );
        assert_eq!(solver.solve().len(), 2);
    }

    #[test]
    fn swapping_identical_copies_never_yields_a_new_solution() {
        // With canonical ordering, every emitted solution's placements of a
        // given type are already in row-major order among themselves.
        let set = PieceSet::build(&[("1", 3)], ParseConfig::default()).unwrap();
        let mut solver = Solver::new(&set, 2, 2);
        for solution in solver.solve() {
            let same_type: Vec<_> = solution
                .iter()
                .filter(|p| p.piece_index == 0)
                .map(|p| (p.y, p.x))
                .collect();
            let mut sorted = same_type.clone();
            sorted.sort_unstable();
            assert_eq!(same_type, sorted);
        }
    }
}
