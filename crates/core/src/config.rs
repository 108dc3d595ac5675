//! Game configuration
//!
//! Tunables for gravity, lock delay, leveling and piece weights. Defaults are
//! the constants from [`crate::types`]; a config file only needs to name the
//! fields it overrides.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{
    BASE_DROP_MS, DROP_FLOOR_MS, DROP_STEP_MS, LINES_PER_LEVEL, LOCK_DELAY_MS, SHAPE_WEIGHTS,
    SOFT_DROP_MS,
};

/// Rejected configuration or piece source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `lines_per_level` must be at least 1
    ZeroLinesPerLevel,
    /// A timing field was zero
    ZeroInterval(&'static str),
    /// `drop_floor_ms` is above `base_drop_ms`
    FloorAboveBase { floor_ms: u64, base_ms: u64 },
    /// Shape weights must have a positive total
    InvalidWeights,
    /// A scripted piece source needs at least one playable shape
    EmptyScript,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroLinesPerLevel => write!(f, "lines_per_level must be at least 1"),
            ConfigError::ZeroInterval(field) => write!(f, "{} must be greater than zero", field),
            ConfigError::FloorAboveBase { floor_ms, base_ms } => write!(
                f,
                "drop_floor_ms ({}) must not exceed base_drop_ms ({})",
                floor_ms, base_ms
            ),
            ConfigError::InvalidWeights => {
                write!(f, "shape_weights must contain at least one positive weight")
            }
            ConfigError::EmptyScript => write!(f, "piece script contains no playable shape"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Game tunables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grounded time before a piece locks
    pub lock_delay_ms: u64,
    /// Gravity interval at level 1
    pub base_drop_ms: u64,
    /// Interval reduction per level
    pub drop_step_ms: u64,
    /// Fastest gravity interval
    pub drop_floor_ms: u64,
    /// Gravity interval while soft drop is held
    pub soft_drop_ms: u64,
    pub lines_per_level: u32,
    /// Draw weights in Z, S, I, T, O, L, J order
    pub shape_weights: [u32; 7],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            lock_delay_ms: LOCK_DELAY_MS,
            base_drop_ms: BASE_DROP_MS,
            drop_step_ms: DROP_STEP_MS,
            drop_floor_ms: DROP_FLOOR_MS,
            soft_drop_ms: SOFT_DROP_MS,
            lines_per_level: LINES_PER_LEVEL,
            shape_weights: SHAPE_WEIGHTS,
        }
    }
}

impl GameConfig {
    /// Check the config for values the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        for (name, value) in [
            ("lock_delay_ms", self.lock_delay_ms),
            ("base_drop_ms", self.base_drop_ms),
            ("drop_floor_ms", self.drop_floor_ms),
            ("soft_drop_ms", self.soft_drop_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroInterval(name));
            }
        }
        if self.drop_floor_ms > self.base_drop_ms {
            return Err(ConfigError::FloorAboveBase {
                floor_ms: self.drop_floor_ms,
                base_ms: self.base_drop_ms,
            });
        }
        if self.shape_weights.iter().all(|&w| w == 0) {
            return Err(ConfigError::InvalidWeights);
        }
        Ok(())
    }
}
