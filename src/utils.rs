use crate::engine::{cell_count, Board};
use crate::error::ParseError;

/// Parses a board in the plain-text puzzle file format.
///
/// The first integer is the dimension `n`; the next `n * n` integers are the tiles
/// in row-major order, `0` for the blank. Tokens are separated by any whitespace,
/// so line breaks are not significant.
///
/// # Errors
/// * [`ParseError::MissingDimension`] if the input has no tokens.
/// * [`ParseError::InvalidNumber`] if a token is not a non-negative integer.
/// * [`ParseError::TileCount`] if the number of tiles is not `n * n`.
/// * [`ParseError::Board`] if the tiles do not form a valid board.
///
/// # Examples
/// ```
/// use slider_solver::utils::board_from_str;
///
/// let board = board_from_str("3\n 0  1  3\n 4  2  5\n 7  8  6\n").unwrap();
/// assert_eq!(board.dimension(), 3);
/// assert_eq!(board.tile(0, 1), 1);
///
/// assert!(board_from_str("2\n1 2\n3").is_err());
/// ```
pub fn board_from_str(s: &str) -> Result<Board, ParseError> {
    let mut tokens = s.split_whitespace();
    let n = match tokens.next() {
        Some(token) => parse_number(token)? as usize,
        None => return Err(ParseError::MissingDimension),
    };

    let tiles = tokens.map(parse_number).collect::<Result<Vec<u32>, _>>()?;

    let expected = cell_count(n)?;
    if tiles.len() != expected {
        return Err(ParseError::TileCount {
            expected,
            found: tiles.len(),
        });
    }

    Ok(Board::from_flat(n, tiles)?)
}

/// Parses a board given one string per row, tiles separated by whitespace.
///
/// The dimension is the number of rows.
///
/// # Errors
/// [`ParseError::InvalidNumber`] for a token that is not a non-negative integer, or
/// [`ParseError::Board`] if the rows do not form a valid board (empty, ragged,
/// out-of-range or repeated tiles).
///
/// # Examples
/// ```
/// use slider_solver::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["1 2 3", "4 5 6", "7 8 0"]).unwrap();
/// assert!(board.is_goal());
/// ```
pub fn board_from_str_array(rows: &[&str]) -> Result<Board, ParseError> {
    let grid = rows
        .iter()
        .map(|row| {
            row.split_whitespace()
                .map(parse_number)
                .collect::<Result<Vec<u32>, _>>()
        })
        .collect::<Result<Vec<Vec<u32>>, _>>()?;

    Ok(Board::new(&grid)?)
}

fn parse_number(token: &str) -> Result<u32, ParseError> {
    token.parse::<u32>().map_err(|_| ParseError::InvalidNumber {
        token: token.to_string(),
    })
}
