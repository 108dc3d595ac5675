//! Headless script runner
//!
//! Replays a text script against a [`GameState`] with a simulated host clock.
//! One step per line:
//!
//! ```text
//! # comments and blank lines are ignored
//! moveLeft
//! rotateCw
//! wait 800        # advance host time, ticking every tick_ms
//! hardDrop
//! ```
//!
//! Together with a seed (or a fixed piece list) a script reproduces a game
//! exactly.

use std::fmt;

use log::{debug, trace};

use tetris_sim_core::GameState;
use tetris_sim_types::{Command, MachineState, TICK_MS};

/// Longest single `wait` a script may ask for (one day)
pub const MAX_WAIT_MS: u64 = 24 * 60 * 60 * 1000;

/// One parsed script step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Command(Command),
    /// Advance host time by this many milliseconds
    Wait(u64),
}

/// A step together with its 1-based source line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub step: Step,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    UnknownStep { line: usize, text: String },
    BadWait { line: usize, text: String },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::UnknownStep { line, text } => {
                write!(f, "line {}: unknown step `{}`", line, text)
            }
            ScriptError::BadWait { line, text } => {
                write!(
                    f,
                    "line {}: `wait` needs a millisecond count up to {}, got `{}`",
                    line, MAX_WAIT_MS, text
                )
            }
        }
    }
}

impl std::error::Error for ScriptError {}

/// Parse a whole script
pub fn parse(source: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut steps = Vec::new();

    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let text = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        }
        .trim();
        if text.is_empty() {
            continue;
        }

        let mut words = text.split_whitespace();
        let head = words.next().unwrap_or_default();

        let step = if head.eq_ignore_ascii_case("wait") {
            let arg = words.next().unwrap_or_default();
            let ms = arg
                .parse::<u64>()
                .ok()
                .filter(|&ms| ms <= MAX_WAIT_MS)
                .ok_or_else(|| ScriptError::BadWait {
                    line,
                    text: arg.to_string(),
                })?;
            Step::Wait(ms)
        } else {
            Command::from_str(head)
                .map(Step::Command)
                .ok_or_else(|| ScriptError::UnknownStep {
                    line,
                    text: head.to_string(),
                })?
        };

        if let Some(extra) = words.next() {
            return Err(ScriptError::UnknownStep {
                line,
                text: extra.to_string(),
            });
        }

        steps.push(ScriptLine { line, step });
    }

    Ok(steps)
}

/// Drives a game with a simulated host clock
#[derive(Debug, Clone)]
pub struct Runner {
    state: GameState,
    now_ms: u64,
    tick_ms: u64,
}

impl Runner {
    pub fn new(state: GameState) -> Self {
        Self::with_tick(state, TICK_MS)
    }

    /// `tick_ms` of zero is treated as 1
    pub fn with_tick(state: GameState, tick_ms: u64) -> Self {
        Self {
            state,
            now_ms: 0,
            tick_ms: tick_ms.max(1),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Apply a command at the current host time
    ///
    /// After a command that (re)starts the clock, the runner ticks once at the
    /// current time so the next `wait` counts from here.
    pub fn apply(&mut self, command: Command) -> bool {
        let changed = self.state.apply(command);
        trace!("{} at {}ms -> {}", command.as_str(), self.now_ms, changed);

        if changed && matches!(command, Command::Start | Command::Resume | Command::Restart) {
            self.state.tick(self.now_ms);
        }
        changed
    }

    /// Advance host time by `ms`, ticking every `tick_ms`
    ///
    /// Host time saturates at `u64::MAX`. Once the game is not running
    /// (ready, paused or over) the rest of the wait is skipped in one jump,
    /// since ticks would not change anything.
    pub fn wait(&mut self, ms: u64) {
        let target = self.now_ms.saturating_add(ms);
        while self.now_ms < target {
            if !self.running() {
                self.now_ms = target;
                break;
            }
            self.now_ms = self.now_ms.saturating_add(self.tick_ms).min(target);
            self.state.tick(self.now_ms);
        }
    }

    fn running(&self) -> bool {
        matches!(
            self.state.machine_state(),
            MachineState::Falling | MachineState::Grounded
        )
    }

    pub fn step(&mut self, step: Step) {
        match step {
            Step::Command(command) => {
                self.apply(command);
            }
            Step::Wait(ms) => self.wait(ms),
        }
    }

    /// Run every step in order
    pub fn run(&mut self, steps: &[ScriptLine]) {
        for line in steps {
            self.step(line.step);
        }
        debug!(
            "script finished at {}ms: score {}, lines {}, state {}",
            self.now_ms,
            self.state.score(),
            self.state.lines(),
            self.state.machine_state().as_str()
        );
    }
}
