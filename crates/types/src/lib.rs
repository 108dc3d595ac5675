//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the simulation.
//! Everything here is plain data, usable from the core engine, the script
//! runner, and any presentation layer that reads snapshots.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, **bottom to top**)
//! - **Spawn column**: `BOARD_WIDTH / 2`
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Suggested host tick cadence |
//! | `BASE_DROP_MS` | 400 | Gravity interval at level 1 |
//! | `DROP_STEP_MS` | 50 | Interval reduction per level |
//! | `DROP_FLOOR_MS` | 50 | Fastest gravity interval |
//! | `SOFT_DROP_MS` | 50 | Gravity interval while soft drop is held |
//! | `LOCK_DELAY_MS` | 1000 | Grounded time before a piece locks |
//!
//! # Examples
//!
//! ```
//! use tetris_sim_types::{Command, Rotation, Shape, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let shape = Shape::from_str("t").unwrap();
//! assert_eq!(shape, Shape::T);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//!
//! let command = Command::from_str("hardDrop").unwrap();
//! assert_eq!(command, Command::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Number of upcoming pieces kept in the preview queue
pub const QUEUE_LEN: usize = 3;

/// Suggested host tick cadence (16ms ≈ 60 FPS)
pub const TICK_MS: u64 = 16;

/// Gravity interval at level 1
pub const BASE_DROP_MS: u64 = 400;

/// Gravity interval reduction per level above 1
pub const DROP_STEP_MS: u64 = 50;

/// Gravity never gets faster than this
pub const DROP_FLOOR_MS: u64 = 50;

/// Gravity interval while soft drop is held
pub const SOFT_DROP_MS: u64 = 50;

/// Time a grounded piece may rest before it locks
pub const LOCK_DELAY_MS: u64 = 1000;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table, indexed by rows cleared (4+ uses the last entry).
///
/// Points are multiplied by the level in effect when the rows were cleared.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Relative draw weights, in [`Shape::PLAYABLE`] order (Z, S, I, T, O, L, J).
///
/// Out of 140: I draws 10% of the time, every other shape 15%.
pub const SHAPE_WEIGHTS: [u32; 7] = [21, 21, 14, 21, 21, 21, 21];

/// Shape identity of a piece or a settled cell
///
/// `Empty` doubles as "no piece" and "empty grid cell". The ordinal order
/// (Empty, Z, S, I, T, O, L, J) is stable and used for compact grid dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Shape {
    #[default]
    Empty,
    Z,
    S,
    I,
    T,
    O,
    L,
    J,
}

impl Shape {
    /// The seven drawable shapes, in ordinal order
    pub const PLAYABLE: [Shape; 7] = [
        Shape::Z,
        Shape::S,
        Shape::I,
        Shape::T,
        Shape::O,
        Shape::L,
        Shape::J,
    ];

    /// Parse shape from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_sim_types::Shape;
    ///
    /// assert_eq!(Shape::from_str("i"), Some(Shape::I));
    /// assert_eq!(Shape::from_str("O"), Some(Shape::O));
    /// assert_eq!(Shape::from_str("empty"), Some(Shape::Empty));
    /// assert_eq!(Shape::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "empty" | "." => Some(Shape::Empty),
            "z" => Some(Shape::Z),
            "s" => Some(Shape::S),
            "i" => Some(Shape::I),
            "t" => Some(Shape::T),
            "o" => Some(Shape::O),
            "l" => Some(Shape::L),
            "j" => Some(Shape::J),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Empty => "empty",
            Shape::Z => "z",
            Shape::S => "s",
            Shape::I => "i",
            Shape::T => "t",
            Shape::O => "o",
            Shape::L => "l",
            Shape::J => "j",
        }
    }

    /// Stable ordinal (Empty = 0 .. J = 7)
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Shape::Empty)
    }
}

/// A cell on the game board: `Shape::Empty` or the shape that settled there
pub type Cell = Shape;

/// Quarter-turn orientation of the active piece
///
/// - **North**: spawn orientation
/// - **East**: one clockwise turn
/// - **South**: two turns
/// - **West**: one counter-clockwise turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_sim_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }
}

/// Discrete commands accepted by the engine
///
/// These are what an input layer (keyboard, script, AI) sends. Each one maps
/// to a single engine method returning whether the state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Spawn the first piece of a fresh game
    Start,
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Start accelerated gravity
    SoftDropBegin,
    /// Return to level gravity
    SoftDropEnd,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Drop to the lowest legal row and lock immediately
    HardDrop,
    /// Swap with the hold slot (once per lock)
    Hold,
    /// Freeze the game clock
    Pause,
    /// Unfreeze the game clock
    Resume,
    /// Replace the whole game with a fresh one and start it
    Restart,
}

impl Command {
    /// Every command, in declaration order
    pub const ALL: [Command; 12] = [
        Command::Start,
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDropBegin,
        Command::SoftDropEnd,
        Command::RotateCw,
        Command::RotateCcw,
        Command::HardDrop,
        Command::Hold,
        Command::Pause,
        Command::Resume,
        Command::Restart,
    ];

    /// Parse command from string (case-insensitive camelCase name)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_sim_types::Command;
    ///
    /// assert_eq!(Command::from_str("moveLeft"), Some(Command::MoveLeft));
    /// assert_eq!(Command::from_str("ROTATECW"), Some(Command::RotateCw));
    /// assert_eq!(Command::from_str("softDropBegin"), Some(Command::SoftDropBegin));
    /// assert_eq!(Command::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(Command::Start),
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdropbegin" => Some(Command::SoftDropBegin),
            "softdropend" => Some(Command::SoftDropEnd),
            "rotatecw" => Some(Command::RotateCw),
            "rotateccw" => Some(Command::RotateCcw),
            "harddrop" => Some(Command::HardDrop),
            "hold" => Some(Command::Hold),
            "pause" => Some(Command::Pause),
            "resume" => Some(Command::Resume),
            "restart" => Some(Command::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDropBegin => "softDropBegin",
            Command::SoftDropEnd => "softDropEnd",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::HardDrop => "hardDrop",
            Command::Hold => "hold",
            Command::Pause => "pause",
            Command::Resume => "resume",
            Command::Restart => "restart",
        }
    }
}

/// Externally visible machine state
///
/// `Paused` overlays whichever drop state was active when the game paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MachineState {
    /// Created but `start()` not called yet
    Ready,
    Falling,
    Grounded,
    GameOver,
    Paused,
}

impl MachineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            MachineState::Ready => "ready",
            MachineState::Falling => "falling",
            MachineState::Grounded => "grounded",
            MachineState::GameOver => "gameOver",
            MachineState::Paused => "paused",
        }
    }
}

/// Outcome of the most recent lock, for presentation feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockEvent {
    pub shape: Shape,
    pub lines_cleared: u32,
    pub points: u32,
    pub level_up: bool,
}
