//! Board representation for the N×N sliding-tile puzzle.
//!
//! This module defines:
//! - `Direction`: the four ways the blank can slide.
//! - `Board`: an immutable tile arrangement with its heuristic scores
//!   (`hamming`, `manhattan`), goal test, twin and neighbor generation.
//!
//! Boards are values. Every operation that "changes" a board returns a new one,
//! so a board can be shared freely between search nodes.
use crate::error::BoardError;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Value stored in the empty cell.
pub const BLANK: u32 = 0;

/// Number of cells of an `n`×`n` board, checked so every tile fits in a `u32`.
pub(crate) fn cell_count(n: usize) -> Result<usize, BoardError> {
    if n == 0 {
        return Err(BoardError::Empty);
    }
    n.checked_mul(n)
        .filter(|&cells| u32::try_from(cells - 1).is_ok())
        .ok_or(BoardError::DimensionTooLarge { n })
}

/// A move of the blank cell. `Up` swaps the blank with the tile above it, and so on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Blank moves one row up.
    Up,
    /// Blank moves one row down.
    Down,
    /// Blank moves one column left.
    Left,
    /// Blank moves one column right.
    Right,
}

impl Direction {
    /// All directions, in the order neighbors are generated.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The move that undoes this one.
    ///
    /// # Examples
    /// ```
    /// use slider_solver::engine::Direction;
    /// assert_eq!(Direction::Up.opposite(), Direction::Down);
    /// assert_eq!(Direction::Left.opposite(), Direction::Right);
    /// ```
    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// One arrangement of tiles on an `n`×`n` grid.
///
/// Tiles are stored row-major in a flat vector. The goal places tile `v` at flat
/// index `v - 1` and the blank in the last cell. Construction validates the input,
/// so every `Board` in existence holds exactly one blank and a permutation of
/// `1..n*n`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    n: usize,
    tiles: Vec<u32>,
    blank: usize,
}

impl Board {
    /// Creates a board from an `n`×`n` matrix, `tiles[row][col]`, with `0` as the blank.
    ///
    /// # Errors
    /// Returns a [`BoardError`] if the matrix is empty or not square, holds a value
    /// outside `0..n*n`, repeats a value, or has no blank.
    ///
    /// # Examples
    /// ```
    /// use slider_solver::engine::Board;
    /// let board = Board::new(&[[1, 2, 3], [4, 5, 6], [7, 8, 0]]).unwrap();
    /// assert!(board.is_goal());
    /// assert!(Board::new(&[[1, 2], [3, 4]]).is_err());
    /// ```
    pub fn new<R: AsRef<[u32]>>(tiles: &[R]) -> Result<Self, BoardError> {
        let n = tiles.len();
        let mut flat = Vec::with_capacity(cell_count(n)?);
        for (row, values) in tiles.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != n {
                return Err(BoardError::NotSquare {
                    row,
                    expected: n,
                    found: values.len(),
                });
            }
            flat.extend_from_slice(values);
        }

        Self::from_flat(n, flat)
    }

    /// Creates a board from a row-major flat vector of `n * n` tiles.
    ///
    /// # Errors
    /// Same conditions as [`Board::new`], plus [`BoardError::WrongTileCount`] if the
    /// vector length is not `n * n` and [`BoardError::DimensionTooLarge`] if `n * n`
    /// overflows.
    pub fn from_flat(n: usize, tiles: Vec<u32>) -> Result<Self, BoardError> {
        let cells = cell_count(n)?;
        if tiles.len() != cells {
            return Err(BoardError::WrongTileCount {
                expected: cells,
                found: tiles.len(),
            });
        }

        let max = (cells - 1) as u32;
        let mut seen = vec![false; cells];
        let mut blank = None;
        for (idx, &value) in tiles.iter().enumerate() {
            if value > max {
                return Err(BoardError::TileOutOfRange { value, max });
            }
            if seen[value as usize] {
                return Err(BoardError::DuplicateTile { value });
            }
            seen[value as usize] = true;
            if value == BLANK {
                blank = Some(idx);
            }
        }
        let blank = blank.ok_or(BoardError::MissingBlank)?;

        Ok(Board { n, tiles, blank })
    }

    /// The solved board of dimension `n`.
    ///
    /// # Errors
    /// Returns [`BoardError::Empty`] for `n == 0` and [`BoardError::DimensionTooLarge`]
    /// if the tiles cannot be numbered.
    pub fn goal(n: usize) -> Result<Self, BoardError> {
        let cells = cell_count(n)?;
        let mut tiles: Vec<u32> = (1..cells as u32).collect();
        tiles.push(BLANK);
        Ok(Board {
            n,
            tiles,
            blank: cells - 1,
        })
    }

    /// A reproducible scrambled board: the blank takes `walk_len` random steps from
    /// the goal, never immediately undoing the previous step.
    ///
    /// Because only legal moves are applied, the result is always solvable and
    /// needs at most `walk_len` moves.
    ///
    /// # Errors
    /// Returns [`BoardError::Empty`] for `n == 0`.
    pub fn new_random_with_seed(n: usize, seed: u64, walk_len: usize) -> Result<Self, BoardError> {
        let mut board = Self::goal(n)?;
        if n < 2 {
            return Ok(board);
        }
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut last: Option<Direction> = None;

        for _ in 0..walk_len {
            let options: Vec<Direction> = Direction::ALL
                .iter()
                .copied()
                .filter(|d| last.map_or(true, |l| *d != l.opposite()))
                .filter(|d| board.blank_target(*d).is_some())
                .collect();
            let dir = options[rng.gen_range(0..options.len())];
            board = board.slide(dir).unwrap_or(board);
            last = Some(dir);
        }
        Ok(board)
    }

    /// A reproducible uniformly shuffled arrangement. About half of these are unsolvable.
    ///
    /// # Errors
    /// Returns [`BoardError::Empty`] for `n == 0`.
    pub fn random_permutation_with_seed(n: usize, seed: u64) -> Result<Self, BoardError> {
        let cells = cell_count(n)?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut tiles: Vec<u32> = (0..cells as u32).collect();
        tiles.shuffle(&mut rng);
        Self::from_flat(n, tiles)
    }

    /// Board dimension `n`.
    pub fn dimension(&self) -> usize {
        self.n
    }

    /// All tiles in row-major order, blank as `0`.
    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    /// Tile at `row`, `col` (0-based).
    ///
    /// # Panics
    /// Panics if `row` or `col` is not below `dimension()`.
    pub fn tile(&self, row: usize, col: usize) -> u32 {
        assert!(row < self.n && col < self.n, "cell ({}, {}) outside {}x{} board", row, col, self.n, self.n);
        self.tiles[row * self.n + col]
    }

    /// `(row, col)` of the blank, 0-based.
    pub fn blank_position(&self) -> (usize, usize) {
        (self.blank / self.n, self.blank % self.n)
    }

    /// Number of tiles, blank excluded, not in their goal position.
    pub fn hamming(&self) -> u32 {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(idx, &value)| value != BLANK && value as usize != idx + 1)
            .count() as u32
    }

    /// Sum over tiles (blank excluded) of the row plus column distance to the goal cell.
    ///
    /// # Examples
    /// ```
    /// use slider_solver::engine::Board;
    /// // 1 and 13 swapped in a 4x4 grid: each is three rows away from home.
    /// let board = Board::new(&[
    ///     [13, 2, 3, 4],
    ///     [5, 6, 7, 8],
    ///     [9, 10, 11, 12],
    ///     [1, 14, 15, 0],
    /// ]).unwrap();
    /// assert_eq!(board.manhattan(), 6);
    /// ```
    pub fn manhattan(&self) -> u32 {
        let n = self.n;
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value != BLANK)
            .map(|(idx, &value)| {
                let goal = value as usize - 1;
                let rows = (idx / n).abs_diff(goal / n);
                let cols = (idx % n).abs_diff(goal % n);
                (rows + cols) as u32
            })
            .sum()
    }

    /// Whether every tile is in its goal position.
    pub fn is_goal(&self) -> bool {
        self.tiles
            .iter()
            .enumerate()
            .all(|(idx, &value)| value == BLANK || value as usize == idx + 1)
    }

    /// A board with the first two non-blank tiles (in row-major order) swapped.
    ///
    /// The twin has the opposite permutation parity, so exactly one of a board and
    /// its twin can reach the goal. A 1×1 board has no two tiles to swap and is
    /// returned unchanged.
    pub fn twin(&self) -> Board {
        let mut positions = self
            .tiles
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value != BLANK)
            .map(|(idx, _)| idx);

        match (positions.next(), positions.next()) {
            (Some(first), Some(second)) => self.swapped(first, second, self.blank),
            _ => self.clone(),
        }
    }

    /// Same dimension and identical tiles in identical positions.
    pub fn equals(&self, other: &Board) -> bool {
        self == other
    }

    /// Every board one blank move away, in the order up, down, left, right.
    ///
    /// A board has two neighbors when the blank is in a corner, three on an edge
    /// and four in the interior.
    pub fn neighbors(&self) -> Vec<Board> {
        Direction::ALL
            .iter()
            .filter_map(|&dir| self.slide(dir))
            .collect()
    }

    /// The board after sliding the blank one cell in `dir`, or `None` at a grid edge.
    pub fn slide(&self, dir: Direction) -> Option<Board> {
        self.blank_target(dir)
            .map(|target| self.swapped(self.blank, target, target))
    }

    /// The direction the blank moved to turn `self` into `next`, if they are one move apart.
    pub fn move_between(&self, next: &Board) -> Option<Direction> {
        Direction::ALL
            .iter()
            .copied()
            .find(|&dir| self.slide(dir).as_ref() == Some(next))
    }

    fn blank_target(&self, dir: Direction) -> Option<usize> {
        let n = self.n;
        let (row, col) = self.blank_position();
        match dir {
            Direction::Up if row > 0 => Some(self.blank - n),
            Direction::Down if row + 1 < n => Some(self.blank + n),
            Direction::Left if col > 0 => Some(self.blank - 1),
            Direction::Right if col + 1 < n => Some(self.blank + 1),
            _ => None,
        }
    }

    fn swapped(&self, a: usize, b: usize, blank: usize) -> Board {
        let mut tiles = self.tiles.clone();
        tiles.swap(a, b);
        Board {
            n: self.n,
            tiles,
            blank,
        }
    }
}

impl fmt::Display for Board {
    /// Dimension on the first line, then one line of right-aligned tiles per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = ((self.n * self.n - 1).to_string().len()).max(2);
        writeln!(f, "{}", self.n)?;
        for row in self.tiles.chunks(self.n) {
            for value in row {
                write!(f, "{:>width$} ", value, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[[u32; 3]; 3]) -> Board {
        Board::new(rows).unwrap()
    }

    #[test]
    fn test_new_rejects_malformed_input() {
        let empty: [[u32; 0]; 0] = [];
        assert_eq!(Board::new(&empty), Err(BoardError::Empty));

        let ragged: Vec<Vec<u32>> = vec![vec![1, 2], vec![0]];
        assert_eq!(
            Board::new(&ragged),
            Err(BoardError::NotSquare {
                row: 1,
                expected: 2,
                found: 1
            })
        );

        assert_eq!(
            Board::new(&[[1, 2], [3, 4]]),
            Err(BoardError::TileOutOfRange { value: 4, max: 3 })
        );
        assert_eq!(
            Board::new(&[[0, 2], [0, 1]]),
            Err(BoardError::DuplicateTile { value: 0 })
        );
        assert_eq!(
            Board::from_flat(2, vec![1, 2, 3]),
            Err(BoardError::WrongTileCount {
                expected: 4,
                found: 3
            })
        );
    }

    #[test]
    fn test_oversized_dimension_is_rejected() {
        assert_eq!(
            Board::from_flat(usize::MAX, vec![]),
            Err(BoardError::DimensionTooLarge { n: usize::MAX })
        );
        assert_eq!(
            Board::goal(usize::MAX),
            Err(BoardError::DimensionTooLarge { n: usize::MAX })
        );
        assert_eq!(
            Board::random_permutation_with_seed(1 << 20, 0),
            Err(BoardError::DimensionTooLarge { n: 1 << 20 })
        );
        assert_eq!(cell_count(65_536), Err(BoardError::DimensionTooLarge { n: 65_536 }));
        assert_eq!(cell_count(65_535), Ok(65_535 * 65_535));
    }

    #[test]
    fn test_goal_board() {
        let goal = Board::goal(3).unwrap();
        assert_eq!(goal.tiles(), &[1, 2, 3, 4, 5, 6, 7, 8, 0]);
        assert_eq!(goal.blank_position(), (2, 2));
        assert!(goal.is_goal());
        assert_eq!(goal.hamming(), 0);
        assert_eq!(goal.manhattan(), 0);
        assert!(Board::goal(0).is_err());
    }

    #[test]
    fn test_hamming_and_manhattan() {
        // Classic algs4 example: hamming 5, manhattan 10.
        let b = board(&[[8, 1, 3], [4, 0, 2], [7, 6, 5]]);
        assert_eq!(b.hamming(), 5);
        assert_eq!(b.manhattan(), 10);
        assert!(!b.is_goal());
    }

    #[test]
    fn test_manhattan_full_column_offset() {
        let b = Board::new(&[
            [13, 2, 3, 4],
            [5, 6, 7, 8],
            [9, 10, 11, 12],
            [1, 14, 15, 0],
        ])
        .unwrap();
        assert_eq!(b.hamming(), 2);
        // Tile 1 sits three rows below its goal cell; tile 13 three rows above.
        assert_eq!(b.manhattan(), 3 + 3);
    }

    #[test]
    fn test_single_misplaced_tile() {
        let b = board(&[[1, 2, 3], [4, 5, 6], [7, 0, 8]]);
        assert!(!b.is_goal());
        assert_eq!(b.hamming(), 1);
        assert_eq!(b.manhattan(), 1);
    }

    #[test]
    fn test_neighbors_corner_edge_interior() {
        let corner = Board::goal(3).unwrap();
        let ns = corner.neighbors();
        assert_eq!(ns.len(), 2);
        // Up first, then left.
        assert_eq!(ns[0].tiles(), &[1, 2, 3, 4, 5, 0, 7, 8, 6]);
        assert_eq!(ns[1].tiles(), &[1, 2, 3, 4, 5, 6, 7, 0, 8]);

        let edge = board(&[[1, 2, 3], [4, 5, 6], [7, 0, 8]]);
        assert_eq!(edge.neighbors().len(), 3);

        let interior = board(&[[1, 2, 3], [4, 0, 6], [7, 5, 8]]);
        let ns = interior.neighbors();
        assert_eq!(ns.len(), 4);
        let blanks: Vec<(usize, usize)> = ns.iter().map(|b| b.blank_position()).collect();
        assert_eq!(blanks, vec![(0, 1), (2, 1), (1, 0), (1, 2)]);
    }

    #[test]
    fn test_neighbors_do_not_mutate_source() {
        let b = board(&[[1, 2, 3], [4, 0, 6], [7, 5, 8]]);
        let before = b.clone();
        let _ = b.neighbors();
        assert_eq!(b, before);
    }

    #[test]
    fn test_twin_swaps_first_two_tiles() {
        let b = board(&[[0, 1, 3], [4, 2, 5], [7, 8, 6]]);
        let twin = b.twin();
        assert_eq!(twin.tiles(), &[0, 3, 1, 4, 2, 5, 7, 8, 6]);
        assert_eq!(twin.blank_position(), b.blank_position());
        let diffs = b
            .tiles()
            .iter()
            .zip(twin.tiles())
            .filter(|(x, y)| x != y)
            .count();
        assert_eq!(diffs, 2);
    }

    #[test]
    fn test_twin_of_single_cell_board() {
        let b = Board::goal(1).unwrap();
        assert_eq!(b.twin(), b);
    }

    #[test]
    fn test_equals() {
        let a = Board::goal(3).unwrap();
        let b = board(&[[1, 2, 3], [4, 5, 6], [7, 8, 0]]);
        assert!(a.equals(&b));
        assert!(!a.equals(&Board::goal(2).unwrap()));
        assert!(!a.equals(&a.twin()));
    }

    #[test]
    fn test_slide_and_move_between() {
        let goal = Board::goal(3).unwrap();
        assert!(goal.slide(Direction::Down).is_none());
        assert!(goal.slide(Direction::Right).is_none());

        let up = goal.slide(Direction::Up).unwrap();
        assert_eq!(goal.move_between(&up), Some(Direction::Up));
        assert_eq!(up.move_between(&goal), Some(Direction::Down));
        assert_eq!(goal.move_between(&goal), None);
    }

    #[test]
    fn test_random_walk_is_reproducible_and_valid() {
        let a = Board::new_random_with_seed(4, 7, 30).unwrap();
        let b = Board::new_random_with_seed(4, 7, 30).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.dimension(), 4);
        assert!(Board::from_flat(4, a.tiles().to_vec()).is_ok());
        assert!(Board::new_random_with_seed(3, 1, 0).unwrap().is_goal());
    }

    #[test]
    fn test_random_permutation_is_reproducible() {
        let a = Board::random_permutation_with_seed(3, 99).unwrap();
        let b = Board::random_permutation_with_seed(3, 99).unwrap();
        assert_eq!(a, b);
        let mut sorted = a.tiles().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..9).collect::<Vec<u32>>());
    }

    #[test]
    fn test_display_format() {
        let b = Board::goal(3).unwrap();
        assert_eq!(format!("{}", b), "3\n 1  2  3 \n 4  5  6 \n 7  8  0 \n");

        let wide = Board::goal(11).unwrap();
        let text = format!("{}", wide);
        assert!(text.starts_with("11\n  1   2 "));
        assert_eq!(text.lines().count(), 12);
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::Left.to_string(), "Left");
        assert_eq!(Direction::ALL.len(), 4);
    }
}
