use serde::Serialize;

use crate::pieces::{PieceShape, Tetromino};
use crate::types::{Cell, MachineState, Rotation, Shape, BOARD_HEIGHT, BOARD_WIDTH, QUEUE_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub shape: Shape,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
    pub offsets: PieceShape,
    pub cells: [(i8, i8); 4],
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            shape: value.shape(),
            rotation: value.rotation(),
            x: value.x,
            y: value.y,
            offsets: *value.offsets(),
            cells: value.cells(),
        }
    }
}

/// Read-only copy of everything a presentation layer needs
///
/// `board[y][x]` has row 0 at the bottom.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub queue: [Shape; QUEUE_LEN],
    pub hold: Option<Shape>,
    pub can_hold: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub gravity_ms: u64,
    pub clock_ms: u64,
    pub state: MachineState,
    pub episode_id: u32,
    pub seed: u64,
}

impl GameSnapshot {
    /// Board rows as text, top row first (`.` for empty, shape letter otherwise)
    pub fn board_rows(&self) -> Vec<String> {
        self.board
            .iter()
            .rev()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Shape::Empty => '.',
                        other => other.as_str().chars().next().unwrap_or('?'),
                    })
                    .collect()
            })
            .collect()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[Shape::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            hold: None,
            queue: [Shape::Empty; QUEUE_LEN],
            can_hold: true,
            score: 0,
            level: 1,
            lines: 0,
            gravity_ms: 0,
            clock_ms: 0,
            state: MachineState::Ready,
            episode_id: 0,
            seed: 0,
        }
    }
}
