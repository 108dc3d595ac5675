//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the falling-block simulation: the board, the
//! seven pieces, the piece stream, scoring and the drop & lock controller. It
//! does no I/O and never reads a wall clock; the host supplies timestamps.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, collision tests and line clearing
//! - [`pieces`]: shape offsets and quarter-turn rotation (no kicks)
//! - [`rng`]: weighted piece draws and the three-piece preview queue
//! - [`hold`]: one-slot hold buffer, usable once per lock
//! - [`scoring`]: line scores, levels and gravity intervals
//! - [`config`]: tunables and their validation
//! - [`game_state`]: the controller tying it all together
//! - [`snapshot`]: read-only copy of the state for presentation
//!
//! # Game Rules
//!
//! - **Weighted draws**: independent draws, I at 10%, the other six at 15%
//! - **Rotation**: pure quarter turns about the pivot; O never rotates
//! - **Lock delay**: a grounded piece locks once it has rested more than 1000ms;
//!   every successful move or rotation restarts the delay
//! - **Hold**: once per lock, swapped-in pieces respawn at the top
//! - **Scoring**: 100/300/500/800 × level before the clear
//! - **Leveling**: one level per 10 lines, gravity 400ms minus 50ms per level
//!   down to 50ms
//!
//! # Example
//!
//! ```
//! use tetris_sim_core::GameState;
//! use tetris_sim_core::types::Command;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//! game.tick(0);
//!
//! game.apply(Command::MoveRight);
//! game.apply(Command::RotateCw);
//! game.apply(Command::HardDrop);
//!
//! assert!(game.board().filled_count() > 0 || game.game_over());
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) with a monotonic host
//! timestamp in milliseconds, nominally every 16ms. Each tick runs at most one
//! gravity step or lock check.

pub mod board;
pub mod config;
pub mod game_state;
pub mod hold;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetris_sim_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use config::{ConfigError, GameConfig};
pub use game_state::{DropState, GameState};
pub use hold::HoldSlot;
pub use pieces::{PieceShape, Tetromino};
pub use rng::{PieceQueue, Randomizer};
pub use scoring::{calculate_level, calculate_line_score, drop_interval_ms, ScoreState};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
