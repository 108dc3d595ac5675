//! Falling-block simulation (workspace facade crate).
//!
//! The rules live in `tetris-sim-core` and the shared vocabulary in
//! `tetris-sim-types`; this package re-exports both as `tetris_sim::{core,types}`
//! and adds the headless [`script`] runner used by the `tetris-sim` binary.

pub use tetris_sim_core as core;
pub use tetris_sim_types as types;

pub mod script;
