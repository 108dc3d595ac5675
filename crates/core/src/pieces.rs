//! Pieces module - tetromino shapes and rotation
//!
//! Offsets are given relative to the piece pivot with `x` growing to the right
//! and `y` growing *downward*: a mino at offset `(ox, oy)` of a piece whose
//! pivot sits on board cell `(x, y)` occupies board cell `(x + ox, y - oy)`
//! (board rows count up from the bottom).
//!
//! Rotation is a pure quarter-turn of every offset about the pivot. There are
//! no kick tables: the caller checks the rotated piece against the board and
//! simply rejects it when it does not fit.

use crate::types::{Rotation, Shape, BOARD_HEIGHT, BOARD_WIDTH};

/// Offset of a single mino relative to the piece pivot
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the pivot
pub type PieceShape = [MinoOffset; 4];

/// Base (spawn orientation) offsets for a shape
pub fn offsets(shape: Shape) -> PieceShape {
    match shape {
        Shape::Empty => [(0, 0), (0, 0), (0, 0), (0, 0)],
        Shape::Z => [(0, -1), (0, 0), (-1, 0), (-1, 1)],
        Shape::S => [(0, -1), (0, 0), (1, 0), (1, 1)],
        Shape::I => [(0, -1), (0, 0), (0, 1), (0, 2)],
        Shape::T => [(-1, 0), (0, 0), (1, 0), (0, 1)],
        Shape::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
        Shape::L => [(-1, -1), (0, -1), (0, 0), (0, 1)],
        Shape::J => [(1, -1), (0, -1), (0, 0), (0, 1)],
    }
}

/// A piece instance: shape identity, current offsets and pivot position
///
/// Offsets only change through [`Tetromino::rotate_left`] and
/// [`Tetromino::rotate_right`], which always derive them from the previous
/// offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    shape: Shape,
    rotation: Rotation,
    offsets: PieceShape,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a piece in its base orientation with the pivot at (0, 0)
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            rotation: Rotation::North,
            offsets: offsets(shape),
            x: 0,
            y: 0,
        }
    }

    /// Create a piece in its base orientation at the spawn coordinate
    pub fn spawned(shape: Shape) -> Self {
        let piece = Self::new(shape);
        let (x, y) = spawn_position(&piece);
        piece.at(x, y)
    }

    /// Same piece, pivot moved to (x, y)
    pub fn at(self, x: i8, y: i8) -> Self {
        Self { x, y, ..self }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn offsets(&self) -> &PieceShape {
        &self.offsets
    }

    /// Counter-clockwise quarter turn: `(x, y) -> (y, -x)`
    ///
    /// The O piece is returned unchanged.
    pub fn rotate_left(&self) -> Self {
        if self.shape == Shape::O {
            return *self;
        }
        Self {
            rotation: self.rotation.rotate_ccw(),
            offsets: self.offsets.map(|(x, y)| (y, -x)),
            ..*self
        }
    }

    /// Clockwise quarter turn: `(x, y) -> (-y, x)`
    ///
    /// The O piece is returned unchanged.
    pub fn rotate_right(&self) -> Self {
        if self.shape == Shape::O {
            return *self;
        }
        Self {
            rotation: self.rotation.rotate_cw(),
            offsets: self.offsets.map(|(x, y)| (-y, x)),
            ..*self
        }
    }

    pub fn min_y(&self) -> i8 {
        self.offsets.iter().map(|&(_, y)| y).min().unwrap_or(0)
    }

    /// Absolute board cells with the pivot at (x, y)
    pub fn cells_at(&self, x: i8, y: i8) -> [(i8, i8); 4] {
        self.offsets.map(|(ox, oy)| (x + ox, y - oy))
    }

    /// Absolute board cells at the piece's own position
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.cells_at(self.x, self.y)
    }
}

/// Spawn coordinate for a piece: horizontal center, topmost mino on the top row
pub fn spawn_position(piece: &Tetromino) -> (i8, i8) {
    (
        (BOARD_WIDTH / 2) as i8,
        BOARD_HEIGHT as i8 - 1 + piece.min_y(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_shape_is_all_origin() {
        assert_eq!(offsets(Shape::Empty), [(0, 0); 4]);
    }

    #[test]
    fn test_rotate_right_matches_transform() {
        let t = Tetromino::new(Shape::T).rotate_right();
        assert_eq!(t.offsets(), &[(0, -1), (0, 0), (0, 1), (-1, 0)]);
        assert_eq!(t.rotation(), Rotation::East);
    }

    #[test]
    fn test_rotate_left_matches_transform() {
        let t = Tetromino::new(Shape::T).rotate_left();
        assert_eq!(t.offsets(), &[(0, 1), (0, 0), (0, -1), (1, 0)]);
        assert_eq!(t.rotation(), Rotation::West);
    }

    #[test]
    fn test_o_piece_is_fixed_point() {
        let o = Tetromino::new(Shape::O);
        assert_eq!(o.rotate_left(), o);
        assert_eq!(o.rotate_right(), o);
        assert_eq!(o.rotate_right().rotation(), Rotation::North);
    }

    #[test]
    fn test_four_turns_restore_offsets() {
        for shape in Shape::PLAYABLE {
            let piece = Tetromino::new(shape);
            let spun = piece.rotate_right().rotate_right().rotate_right().rotate_right();
            assert_eq!(spun, piece, "{:?}", shape);
        }
    }

    #[test]
    fn test_spawn_position_puts_top_mino_on_top_row() {
        for shape in Shape::PLAYABLE {
            let piece = Tetromino::spawned(shape);
            let top = piece.cells().iter().map(|&(_, y)| y).max().unwrap();
            assert_eq!(top, BOARD_HEIGHT as i8 - 1, "{:?}", shape);
            assert_eq!(piece.x, 5);
        }
    }

    #[test]
    fn test_cells_at_flips_vertical_offset() {
        let i = Tetromino::new(Shape::I);
        assert_eq!(i.cells_at(5, 10), [(5, 11), (5, 10), (5, 9), (5, 8)]);
    }
}
