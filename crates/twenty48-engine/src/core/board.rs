use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{InvalidRankError, InvalidValueError, SetCellError};

use super::{direction::Axis, rank::Rank};

/// Side length of the board.
pub const BOARD_SIZE: usize = 4;

/// One row or column of the board, in traversal order.
pub type Line = [Rank; BOARD_SIZE];

/// 4×4 grid of tile ranks.
///
/// `Board` is a plain value: it is `Copy`, hashable, and carries no score or
/// session state. It is the unit exchanged with move selectors and renderers,
/// and it serializes as a nested `[[u8; 4]; 4]` rank matrix.
///
/// Coordinates are `(row, col)` with `(0, 0)` at the top-left corner.
///
/// # Example
///
/// ```
/// use twenty48_engine::{Board, Rank};
///
/// let board = Board::from_ranks([
///     [1, 0, 0, 0],
///     [0, 2, 0, 0],
///     [0, 0, 0, 0],
///     [0, 0, 0, 11],
/// ])
/// .unwrap();
///
/// assert_eq!(board.get(3, 3), Some(Rank::new(11).unwrap()));
/// assert_eq!(board.tile_count(), 3);
/// assert_eq!(board.to_values()[3][3], 2048);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Rank; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub const SIZE: usize = BOARD_SIZE;
    pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

    pub const EMPTY: Self = Self {
        cells: [[Rank::EMPTY; BOARD_SIZE]; BOARD_SIZE],
    };

    #[must_use]
    pub const fn new(cells: [[Rank; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    /// Builds a board from a raw rank matrix, validating every cell.
    pub fn from_ranks(ranks: [[u8; BOARD_SIZE]; BOARD_SIZE]) -> Result<Self, InvalidRankError> {
        let mut board = Self::EMPTY;
        for (row, ranks) in board.cells.iter_mut().zip(ranks) {
            for (cell, rank) in row.iter_mut().zip(ranks) {
                *cell = Rank::new(rank)?;
            }
        }
        Ok(board)
    }

    /// Builds a board from displayed tile values (`0`, `2`, `4`, ...).
    pub fn from_values(values: [[u64; BOARD_SIZE]; BOARD_SIZE]) -> Result<Self, InvalidValueError> {
        let mut board = Self::EMPTY;
        for (row, values) in board.cells.iter_mut().zip(values) {
            for (cell, value) in row.iter_mut().zip(values) {
                *cell = Rank::from_value(value)?;
            }
        }
        Ok(board)
    }

    /// Raw rank matrix, the encoding handed to external collaborators.
    #[must_use]
    pub fn to_ranks(&self) -> [[u8; BOARD_SIZE]; BOARD_SIZE] {
        self.cells.map(|row| row.map(Rank::get))
    }

    /// Displayed tile values, for renderers.
    #[must_use]
    pub fn to_values(&self) -> [[u64; BOARD_SIZE]; BOARD_SIZE] {
        self.cells.map(|row| row.map(Rank::value))
    }

    #[must_use]
    pub fn rows(&self) -> &[[Rank; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<Rank> {
        self.cells.get(row)?.get(col).copied()
    }

    pub fn set(&mut self, row: usize, col: usize, rank: Rank) -> Result<(), SetCellError> {
        let cell = self
            .cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(SetCellError::OutOfBounds { row, col })?;
        *cell = rank;
        Ok(())
    }

    /// Reads line `index` along `axis`, reversed if requested.
    ///
    /// For [`Axis::Row`] the line is row `index` read left to right; for
    /// [`Axis::Column`] it is column `index` read top to bottom.
    #[must_use]
    pub(crate) fn line(&self, axis: Axis, index: usize, reversed: bool) -> Line {
        let mut line = match axis {
            Axis::Row => self.cells[index],
            Axis::Column => self.cells.map(|row| row[index]),
        };
        if reversed {
            line.reverse();
        }
        line
    }

    /// Writes a line back using the same mapping as [`Board::line`].
    pub(crate) fn set_line(&mut self, axis: Axis, index: usize, reversed: bool, mut line: Line) {
        if reversed {
            line.reverse();
        }
        match axis {
            Axis::Row => self.cells[index] = line,
            Axis::Column => {
                for (row, rank) in self.cells.iter_mut().zip(line) {
                    row[index] = rank;
                }
            }
        }
    }

    /// Positions of all empty cells in row-major order.
    pub fn empty_positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        Self::positions().filter(|&(row, col)| self.cells[row][col].is_empty())
    }

    /// All 16 positions in row-major order.
    pub fn positions() -> impl Iterator<Item = (usize, usize)> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| (row, col)))
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|rank| !rank.is_empty())
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tile_count() == 0
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.tile_count() == Self::CELL_COUNT
    }

    #[must_use]
    pub fn max_rank(&self) -> Rank {
        self.cells
            .iter()
            .flatten()
            .copied()
            .max()
            .unwrap_or(Rank::EMPTY)
    }

    /// Left-right mirror image.
    #[must_use]
    pub fn mirrored_horizontally(&self) -> Self {
        Self {
            cells: self.cells.map(|mut row| {
                row.reverse();
                row
            }),
        }
    }

    /// Top-bottom mirror image.
    #[must_use]
    pub fn mirrored_vertically(&self) -> Self {
        let mut cells = self.cells;
        cells.reverse();
        Self { cells }
    }

    #[must_use]
    pub fn transposed(&self) -> Self {
        let mut cells = self.cells;
        for (row, cells_row) in cells.iter_mut().enumerate() {
            for (col, cell) in cells_row.iter_mut().enumerate() {
                *cell = self.cells[col][row];
            }
        }
        Self { cells }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, rank) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                if rank.is_empty() {
                    write!(f, "{:>5}", ".")?;
                } else {
                    write!(f, "{:>5}", rank.value())?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Board {
        Board::from_ranks([
            [1, 2, 3, 4], //
            [5, 6, 7, 8],
            [9, 10, 11, 12],
            [13, 14, 15, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_board() {
        let board = Board::EMPTY;
        assert!(board.is_empty());
        assert_eq!(board.empty_positions().count(), Board::CELL_COUNT);
        assert_eq!(board.max_rank(), Rank::EMPTY);
        assert_eq!(board, Board::default());
    }

    #[test]
    fn test_from_ranks_rejects_out_of_range() {
        let mut ranks = [[0; 4]; 4];
        ranks[2][1] = 40;
        assert_eq!(
            Board::from_ranks(ranks),
            Err(InvalidRankError { rank: 40 })
        );
    }

    #[test]
    fn test_value_round_trip() {
        let board = sample();
        assert_eq!(Board::from_values(board.to_values()).unwrap(), board);
        assert_eq!(board.to_values()[0], [2, 4, 8, 16]);
        assert_eq!(board.to_values()[3][3], 0);
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut board = Board::EMPTY;
        assert_eq!(
            board.set(4, 0, Rank::MIN_TILE),
            Err(SetCellError::OutOfBounds { row: 4, col: 0 })
        );
        assert_eq!(
            board.set(0, 7, Rank::MIN_TILE),
            Err(SetCellError::OutOfBounds { row: 0, col: 7 })
        );
        assert!(board.is_empty());

        board.set(3, 2, Rank::MIN_TILE).unwrap();
        assert_eq!(board.get(3, 2), Some(Rank::MIN_TILE));
        assert_eq!(board.get(4, 2), None);
    }

    #[test]
    fn test_line_mapping() {
        let board = sample();
        let r = |v: u8| Rank::new(v).unwrap();

        assert_eq!(board.line(Axis::Row, 1, false), [r(5), r(6), r(7), r(8)]);
        assert_eq!(board.line(Axis::Row, 1, true), [r(8), r(7), r(6), r(5)]);
        assert_eq!(
            board.line(Axis::Column, 2, false),
            [r(3), r(7), r(11), r(15)]
        );
        assert_eq!(
            board.line(Axis::Column, 2, true),
            [r(15), r(11), r(7), r(3)]
        );
    }

    #[test]
    fn test_set_line_inverts_line() {
        let board = sample();
        for axis in [Axis::Row, Axis::Column] {
            for reversed in [false, true] {
                for index in 0..BOARD_SIZE {
                    let mut copy = board;
                    let line = board.line(axis, index, reversed);
                    copy.set_line(axis, index, reversed, line);
                    assert_eq!(copy, board, "{axis:?} {index} reversed={reversed}");
                }
            }
        }
    }

    #[test]
    fn test_mirrors_and_transpose() {
        let board = sample();
        assert_eq!(board.mirrored_horizontally().to_ranks()[0], [4, 3, 2, 1]);
        assert_eq!(board.mirrored_vertically().to_ranks()[0], [13, 14, 15, 0]);
        assert_eq!(board.transposed().to_ranks()[0], [1, 5, 9, 13]);
        assert_eq!(board.transposed().transposed(), board);
        assert_eq!(board.mirrored_horizontally().mirrored_horizontally(), board);
    }

    #[test]
    fn test_serde_as_rank_matrix() {
        let board = sample();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(
            json,
            "[[1,2,3,4],[5,6,7,8],[9,10,11,12],[13,14,15,0]]"
        );
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
        assert!(serde_json::from_str::<Board>("[[32,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,0]]").is_err());
    }
}
