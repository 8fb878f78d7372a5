//! # Slider Solver Library
//!
//! This library solves the N×N sliding-tile puzzle (the 8-puzzle, 15-puzzle and
//! larger). Given a board it decides whether the goal is reachable and, if so,
//! finds a shortest sequence of boards leading to it.
//!
//! It is used by two binaries:
//! - `solver`: reads a board file and prints a shortest solution.
//! - `priority_evaluator`: compares the Hamming and Manhattan priority functions
//!   on a batch of seeded scrambles.
//!
//! ## Modules
//! - `engine`: the immutable `Board` with its heuristic scores, goal test, twin
//!   and neighbor generation, plus the `Direction` of a blank move.
//! - `solver`: the A* `Solver` that searches the board and its twin in lockstep.
//! - `heuristics`: the `Priority` functions used to order the search and an
//!   inversion-parity solvability check.
//! - `utils`: parsing boards from text.
//! - `error`: error types for construction, parsing and bounded searches.

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod solver;
pub mod utils;

pub use engine::{Board, Direction};
pub use error::{BoardError, ParseError, SolveError};
pub use heuristics::Priority;
pub use solver::{SearchStats, Solver, SolverConfig};
