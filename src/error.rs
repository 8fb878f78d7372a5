//! Error types for board construction, parsing and bounded searches.
//!
//! An unsolvable board is not an error: [`crate::solver::Solver`] reports it
//! through `is_solvable() == false` and `moves() == -1`.
use std::time::Duration;
use thiserror::Error;

/// Rejected board input. Every variant is a malformed argument; none are retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The tile matrix has no rows.
    #[error("board has no rows")]
    Empty,

    /// A row's length does not match the number of rows.
    #[error("row {row} has {found} tiles, expected {expected}")]
    NotSquare {
        /// Index of the offending row (0-based).
        row: usize,
        /// The board dimension inferred from the row count.
        expected: usize,
        /// The length actually found.
        found: usize,
    },

    /// A flat tile slice does not hold `n * n` values.
    #[error("expected {expected} tiles for the given dimension, found {found}")]
    WrongTileCount {
        /// `n * n`.
        expected: usize,
        /// Number of tiles supplied.
        found: usize,
    },

    /// `n * n` tiles cannot be numbered with `u32` values.
    #[error("dimension {n} is too large")]
    DimensionTooLarge {
        /// The requested dimension.
        n: usize,
    },

    /// A tile value lies outside `0..=n*n-1`.
    #[error("tile {value} is out of range, maximum is {max}")]
    TileOutOfRange {
        /// The offending value.
        value: u32,
        /// The largest legal value, `n * n - 1`.
        max: u32,
    },

    /// A value occurs more than once. A repeated `0` means more than one blank.
    #[error("tile {value} appears more than once")]
    DuplicateTile {
        /// The repeated value.
        value: u32,
    },

    /// No cell holds the blank (`0`).
    #[error("board has no blank tile")]
    MissingBlank,
}

/// Failure to read a board from text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input is empty, so there is no leading dimension.
    #[error("missing board dimension")]
    MissingDimension,

    /// A token is not a non-negative integer.
    #[error("invalid number '{token}'")]
    InvalidNumber {
        /// The token as it appeared in the input.
        token: String,
    },

    /// The number of tiles does not match the declared dimension.
    #[error("expected {expected} tiles, found {found}")]
    TileCount {
        /// `n * n`.
        expected: usize,
        /// Tiles actually present.
        found: usize,
    },

    /// The tiles were read but do not form a valid board.
    #[error("invalid board: {0}")]
    Board(#[from] BoardError),
}

/// A bounded search stopped before reaching a verdict.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The configured number of node expansions was used up.
    #[error("search stopped after {limit} expansions without a verdict")]
    ExpansionLimit {
        /// The configured limit.
        limit: u64,
    },

    /// The configured wall-clock budget ran out.
    #[error("search stopped after {limit:?} without a verdict")]
    TimeLimit {
        /// The configured limit.
        limit: Duration,
    },
}
