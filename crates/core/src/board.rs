//! Board module - manages the settled grid
//!
//! The board is a 10x20 grid where each cell is `Shape::Empty` or the shape of
//! the piece that settled there. Uses a flat array for cache locality and
//! zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right) and y ranges 0..19
//! (**bottom to top**).
//!
//! Cells only become non-empty through [`Board::settle`]; line clears and
//! [`Board::reset`] are the only other mutations.

use arrayvec::ArrayVec;

use crate::pieces::PieceShape;
use crate::types::{Cell, Shape, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Upper bound on rows removed by one clear
pub const MAX_CLEARED_ROWS: usize = BOARD_HEIGHT as usize;

/// Row indices removed by one clear, bottom to top (pre-clear indices)
pub type ClearedRows = ArrayVec<usize, MAX_CLEARED_ROWS>;

/// The settled grid - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x), row 0 at the bottom
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Shape::Empty; BOARD_SIZE],
        }
    }

    /// Build a board from text rows, **top row first**.
    ///
    /// `.` is an empty cell, a shape letter (`z s i t o l j`, any case) a settled
    /// cell. Missing rows at the top are empty. Returns `None` for malformed
    /// input (too many rows, wrong width, unknown characters).
    ///
    /// ```
    /// use tetris_sim_core::Board;
    /// use tetris_sim_core::types::Shape;
    ///
    /// let board = Board::from_rows(&["..........", "iiiiiiiii."]).unwrap();
    /// assert_eq!(board.get(0, 0), Some(Shape::I));
    /// assert_eq!(board.get(9, 0), Some(Shape::Empty));
    /// assert!(!board.is_row_full(0));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        if rows.len() > BOARD_HEIGHT as usize {
            return None;
        }
        let mut board = Self::new();
        for (i, row) in rows.iter().enumerate() {
            let y = rows.len() - 1 - i;
            if row.chars().count() != BOARD_WIDTH as usize {
                return None;
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = Shape::from_str(ch.encode_utf8(&mut [0u8; 4]))?;
                board.cells[y * BOARD_WIDTH as usize + x] = cell;
            }
        }
        Some(board)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Check if position is within bounds and empty
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Shape::Empty))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(cell) if !cell.is_empty())
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    /// Whether a piece with these offsets fits with its pivot at (x, y)
    ///
    /// Every mino `(x + ox, y - oy)` must be on the board and empty.
    pub fn is_legal(&self, offsets: &PieceShape, x: i8, y: i8) -> bool {
        offsets
            .iter()
            .all(|&(ox, oy)| self.is_free(x + ox, y - oy))
    }

    /// Write a piece's shape into its four cells
    /// Returns false (and writes nothing) if the placement is not legal
    pub fn settle(&mut self, offsets: &PieceShape, x: i8, y: i8, shape: Shape) -> bool {
        if shape.is_empty() || !self.is_legal(offsets, x, y) {
            return false;
        }

        for &(ox, oy) in offsets {
            if let Some(idx) = Self::index(x + ox, y - oy) {
                self.cells[idx] = shape;
            }
        }

        true
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .map(|row| row.iter().all(|cell| !cell.is_empty()))
            .unwrap_or(false)
    }

    /// Cells of row `y` (left to right), None if out of range
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Remove every full row and compact the rest downward.
    ///
    /// Rows are scanned bottom to top. Each surviving row is copied down to the
    /// next free write position, so after the pass rows `0..write_y` hold the
    /// survivors in their original order and everything above is empty.
    /// Returns the removed row indices (pre-clear, bottom to top).
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = 0usize;

        for read_y in 0..BOARD_HEIGHT as usize {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
                continue;
            }
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
            write_y += 1;
        }

        for cell in &mut self.cells[write_y * width..] {
            *cell = Shape::Empty;
        }

        cleared_rows
    }

    /// Get a reference to the internal cells array (row 0 first)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Copy the grid into a 2D array indexed `[y][x]`, row 0 at the bottom
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            let start = y * BOARD_WIDTH as usize;
            row.copy_from_slice(&self.cells[start..start + BOARD_WIDTH as usize]);
        }
    }

    /// Clear the entire board
    pub fn reset(&mut self) {
        self.cells = [Shape::Empty; BOARD_SIZE];
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::offsets;

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_from_rows_places_last_row_at_bottom() {
        let board = Board::from_rows(&["t.........", "..o......."]).unwrap();
        assert_eq!(board.get(0, 1), Some(Shape::T));
        assert_eq!(board.get(2, 0), Some(Shape::O));
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        assert!(Board::from_rows(&["short"]).is_none());
        assert!(Board::from_rows(&["x........."]).is_none());
        let too_many = [".........."; 21];
        assert!(Board::from_rows(&too_many).is_none());
    }

    #[test]
    fn test_settle_writes_shape() {
        let mut board = Board::new();
        assert!(board.settle(&offsets(Shape::T), 4, 1, Shape::T));
        assert_eq!(board.get(3, 1), Some(Shape::T));
        assert_eq!(board.get(4, 1), Some(Shape::T));
        assert_eq!(board.get(5, 1), Some(Shape::T));
        assert_eq!(board.get(4, 0), Some(Shape::T));
        assert_eq!(board.filled_count(), 4);
    }

    #[test]
    fn test_settle_refuses_illegal_or_empty() {
        let mut board = Board::new();
        assert!(!board.settle(&offsets(Shape::T), 4, 0, Shape::T));
        assert!(!board.settle(&offsets(Shape::Empty), 4, 4, Shape::Empty));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_clear_keeps_order_of_survivors() {
        let mut board = Board::from_rows(&[
            "s.........",
            "zzzzzzzzzz",
            "..t.......",
            "iiiiiiiiii",
        ])
        .unwrap();

        let cleared = board.clear_full_rows();

        assert_eq!(cleared.as_slice(), &[0, 2]);
        assert_eq!(board.get(2, 0), Some(Shape::T));
        assert_eq!(board.get(0, 1), Some(Shape::S));
        assert_eq!(board.filled_count(), 2);
    }
}
