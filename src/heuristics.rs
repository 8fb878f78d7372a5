//! Priority functions for the best-first search and a closed-form solvability test.
use crate::engine::{Board, BLANK};
use std::fmt;

/// The estimate added to the move count to order search nodes.
///
/// Both heuristics never overestimate the remaining number of moves, so either
/// ordering finds a shortest solution. Manhattan is tighter and expands far fewer
/// nodes; it is the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Priority {
    /// Number of misplaced tiles.
    Hamming,
    /// Sum of row and column distances of tiles from their goal cells.
    #[default]
    Manhattan,
}

impl Priority {
    /// Heuristic value of `board` alone.
    pub fn estimate(&self, board: &Board) -> u32 {
        match self {
            Priority::Hamming => board.hamming(),
            Priority::Manhattan => board.manhattan(),
        }
    }

    /// Search priority of a node: heuristic plus moves made so far. Lower is better.
    ///
    /// # Examples
    /// ```
    /// use slider_solver::engine::Board;
    /// use slider_solver::heuristics::Priority;
    /// let board = Board::new(&[[8, 1, 3], [4, 0, 2], [7, 6, 5]]).unwrap();
    /// assert_eq!(Priority::Hamming.score(&board, 4), 9);
    /// assert_eq!(Priority::Manhattan.score(&board, 4), 14);
    /// ```
    pub fn score(&self, board: &Board, moves: u32) -> u32 {
        self.estimate(board) + moves
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::Hamming => "hamming",
            Priority::Manhattan => "manhattan",
        };
        f.pad(name)
    }
}

/// Number of tile pairs, blank excluded, that appear in the wrong relative order
/// when the board is read row by row.
pub fn count_inversions(board: &Board) -> usize {
    let tiles: Vec<u32> = board
        .tiles()
        .iter()
        .copied()
        .filter(|&v| v != BLANK)
        .collect();

    tiles
        .iter()
        .enumerate()
        .map(|(i, &value)| tiles[i + 1..].iter().filter(|&&next| next < value).count())
        .sum()
}

/// Whether `board` can reach the goal, decided from permutation parity.
///
/// With an odd width a blank move never changes the inversion parity, so the
/// board is solvable iff the inversion count is even. With an even width a
/// vertical move flips it, so the blank's row (counted from the top, 0-based)
/// enters the sum, and the board is solvable iff `inversions + row` is odd.
///
/// The solver decides solvability by searching the twin in lockstep; this
/// function is an independent check of that verdict.
pub fn is_solvable_by_parity(board: &Board) -> bool {
    let inversions = count_inversions(board);
    if board.dimension() % 2 == 1 {
        inversions % 2 == 0
    } else {
        let (blank_row, _) = board.blank_position();
        (inversions + blank_row) % 2 == 1
    }
}
