//! Scoring module - line clear points, leveling and gravity speed
//!
//! Scoring is the classic per-count table scaled by level:
//! - 1 row: 100 × level
//! - 2 rows: 300 × level
//! - 3 rows: 500 × level
//! - 4+ rows: 800 × level
//!
//! The level used is the one in effect *before* the clear. Levels start at 1
//! and rise every `lines_per_level` lines; gravity speeds up by a fixed step
//! per level down to a floor.

use crate::config::GameConfig;
use crate::types::LINE_SCORES;

/// Score, level and cumulative lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScoreState {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            lines: 0,
        }
    }
}

/// What one line clear changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearResult {
    pub lines: u32,
    pub points: u32,
    pub level_up: bool,
}

impl ScoreState {
    /// Account for `rows` cleared rows.
    ///
    /// A zero-row clear changes nothing.
    pub fn apply_clear(&mut self, rows: u32, config: &GameConfig) -> ClearResult {
        if rows == 0 {
            return ClearResult::default();
        }

        let points = calculate_line_score(rows, self.level);
        let previous_level = self.level;

        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(rows);
        self.level = calculate_level(self.lines, config.lines_per_level);

        ClearResult {
            lines: rows,
            points,
            level_up: self.level > previous_level,
        }
    }
}

/// Calculate line clear score
/// lines: number of rows cleared (4+ scores as 4)
/// level: level in effect when the rows were cleared (1-based)
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    let idx = (lines as usize).min(LINE_SCORES.len() - 1);
    LINE_SCORES[idx].saturating_mul(level)
}

/// Level for a cumulative line count (starts at 1)
pub fn calculate_level(total_lines: u32, lines_per_level: u32) -> u32 {
    total_lines / lines_per_level.max(1) + 1
}

/// Gravity interval for a level (in milliseconds), clamped at the floor
pub fn drop_interval_ms(level: u32, config: &GameConfig) -> u64 {
    let reduction = (level.saturating_sub(1) as u64).saturating_mul(config.drop_step_ms);
    config
        .base_drop_ms
        .saturating_sub(reduction)
        .max(config.drop_floor_ms)
}

/// Gravity interval while soft drop is held
/// Never slower than the level interval
pub fn soft_drop_interval_ms(level_interval_ms: u64, config: &GameConfig) -> u64 {
    config.soft_drop_ms.min(level_interval_ms)
}
