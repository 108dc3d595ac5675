//! Game state module - the drop & lock controller and command surface
//!
//! This module ties together all core components: board, pieces, queue, hold
//! and scoring. Timing is one explicit state machine:
//!
//! ```text
//!            start / spawn ok
//!   Ready ───────────────────► Falling ◄──────────────┐
//!                               │   ▲                 │ move/rotate
//!          gravity due, no room │   │ move/rotate     │ opens a gap
//!                               ▼   │ opens a gap     │
//!                        Grounded{since} ─────────────┘
//!                               │
//!   clock - since > lock delay  │  (hard drop locks from either state)
//!                               ▼
//!                     lock, clear, score, spawn ──► Falling | GameOver
//! ```
//!
//! The engine keeps its own game clock. [`GameState::tick`] advances it by the
//! difference between consecutive host timestamps; the first tick after start
//! or resume only records the baseline, so paused time never counts. Commands
//! read the clock as of the latest tick.

use log::{debug, info, trace, warn};

use crate::board::Board;
use crate::config::{ConfigError, GameConfig};
use crate::hold::HoldSlot;
use crate::pieces::Tetromino;
use crate::rng::{PieceQueue, Randomizer};
use crate::scoring::{drop_interval_ms, soft_drop_interval_ms, ScoreState};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{Command, LockEvent, MachineState, Shape, QUEUE_LEN};

/// Drop & lock phase of the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropState {
    /// Created, `start()` not called yet
    Ready,
    /// The piece has room below it (as of the last gravity step)
    Falling,
    /// No downward move was available at game-clock time `since`
    Grounded { since: u64 },
    /// A spawn collided with settled cells
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    active: Option<Tetromino>,
    queue: PieceQueue,
    hold: HoldSlot,
    score: ScoreState,
    drop_state: DropState,
    paused: bool,
    soft_dropping: bool,
    /// Game clock in ms (frozen while paused)
    clock_ms: u64,
    /// Host timestamp of the previous tick (None right after start/resume)
    last_tick_at: Option<u64>,
    /// Game-clock time of the next gravity step
    next_drop_at: u64,
    /// Monotonic episode id (increments on restart)
    episode_id: u32,
    /// Pieces that became active this episode (spawns and hold swaps)
    active_id: u32,
    /// Last lock event (consumed by observers)
    last_event: Option<LockEvent>,
}

impl GameState {
    /// Create a game with default tuning and a weighted piece stream
    pub fn new(seed: u64) -> Self {
        Self::build(GameConfig::default(), Randomizer::seeded(seed))
    }

    /// Create a game with custom tuning; pieces use the config's weights
    pub fn with_config(seed: u64, config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let randomizer = Randomizer::weighted(seed, config.shape_weights)?;
        Ok(Self::build(config, randomizer))
    }

    /// Create a game with custom tuning and an explicit piece source
    pub fn with_randomizer(
        config: GameConfig,
        randomizer: Randomizer,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, randomizer))
    }

    fn build(config: GameConfig, randomizer: Randomizer) -> Self {
        Self {
            config,
            board: Board::new(),
            active: None,
            queue: PieceQueue::new(randomizer),
            hold: HoldSlot::new(),
            score: ScoreState::default(),
            drop_state: DropState::Ready,
            paused: false,
            soft_dropping: false,
            clock_ms: 0,
            last_tick_at: None,
            next_drop_at: 0,
            episode_id: 0,
            active_id: 0,
            last_event: None,
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) -> bool {
        if self.drop_state != DropState::Ready {
            return false;
        }
        info!(
            "episode {} started (seed {})",
            self.episode_id,
            self.queue.randomizer().seed()
        );
        self.spawn_piece();
        true
    }

    /// Replace board, queue, hold and score with fresh values and start again
    pub fn restart(&mut self) -> bool {
        let episode_id = self.episode_id.wrapping_add(1);
        let randomizer = self.queue.randomizer().for_episode(episode_id);
        let config = self.config.clone();

        *self = Self::build(config, randomizer);
        self.episode_id = episode_id;
        info!("restarting");
        self.start()
    }

    /// Freeze the game clock
    pub fn pause(&mut self) -> bool {
        if self.paused || !self.in_play() {
            return false;
        }
        self.paused = true;
        info!("paused at {}ms", self.clock_ms);
        true
    }

    /// Unfreeze the game clock; the next tick only sets the baseline
    pub fn resume(&mut self) -> bool {
        if !self.paused {
            return false;
        }
        self.paused = false;
        self.last_tick_at = None;
        info!("resumed at {}ms", self.clock_ms);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume()
        } else {
            self.pause()
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn queue(&self) -> [Shape; QUEUE_LEN] {
        self.queue.peek()
    }

    pub fn hold_piece(&self) -> Option<Shape> {
        self.hold.shape()
    }

    pub fn can_hold(&self) -> bool {
        self.hold.can_hold()
    }

    pub fn score(&self) -> u32 {
        self.score.score
    }

    pub fn level(&self) -> u32 {
        self.score.level
    }

    pub fn lines(&self) -> u32 {
        self.score.lines
    }

    pub fn drop_state(&self) -> DropState {
        self.drop_state
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.drop_state == DropState::GameOver
    }

    pub fn soft_dropping(&self) -> bool {
        self.soft_dropping
    }

    pub fn clock_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn active_id(&self) -> u32 {
        self.active_id
    }

    /// Externally visible state; `Paused` overrides the drop state
    pub fn machine_state(&self) -> MachineState {
        match self.drop_state {
            DropState::Ready => MachineState::Ready,
            DropState::GameOver => MachineState::GameOver,
            _ if self.paused => MachineState::Paused,
            DropState::Falling => MachineState::Falling,
            DropState::Grounded { .. } => MachineState::Grounded,
        }
    }

    /// Current gravity interval (soft drop applied)
    pub fn gravity_interval_ms(&self) -> u64 {
        let level_interval = drop_interval_ms(self.score.level, &self.config);
        if self.soft_dropping {
            soft_drop_interval_ms(level_interval, &self.config)
        } else {
            level_interval
        }
    }

    /// Row the active piece's pivot would land on if hard-dropped
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        Some(self.landing_y(&active))
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.queue = self.queue.peek();
        out.hold = self.hold.shape();
        out.can_hold = self.hold.can_hold();
        out.score = self.score.score;
        out.level = self.score.level;
        out.lines = self.score.lines;
        out.gravity_ms = self.gravity_interval_ms();
        out.clock_ms = self.clock_ms;
        out.state = self.machine_state();
        out.episode_id = self.episode_id;
        out.seed = self.queue.randomizer().seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Advance the game clock to host time `now_ms` and run one gravity /
    /// lock-delay evaluation. Returns true if the state changed.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.in_play() || self.paused {
            return false;
        }

        if let Some(prev) = self.last_tick_at {
            self.clock_ms = self.clock_ms.saturating_add(now_ms.saturating_sub(prev));
        }
        self.last_tick_at = Some(now_ms);

        match self.drop_state {
            DropState::Grounded { since } => {
                if self.clock_ms.saturating_sub(since) > self.config.lock_delay_ms {
                    self.lock_piece();
                    return true;
                }
                false
            }
            DropState::Falling => {
                if self.clock_ms < self.next_drop_at {
                    return false;
                }
                self.schedule_drop();
                self.gravity_step();
                true
            }
            DropState::Ready | DropState::GameOver => false,
        }
    }

    /// Apply a command
    pub fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Start => self.start(),
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::SoftDropBegin => self.soft_drop_begin(),
            Command::SoftDropEnd => self.soft_drop_end(),
            Command::RotateCw => self.rotate_cw(),
            Command::RotateCcw => self.rotate_ccw(),
            Command::HardDrop => self.hard_drop(),
            Command::Hold => self.hold(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::Restart => self.restart(),
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1)
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.try_rotate(true)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.try_rotate(false)
    }

    /// Switch gravity to the soft-drop interval
    pub fn soft_drop_begin(&mut self) -> bool {
        if self.soft_dropping || !self.playable() {
            return false;
        }
        self.soft_dropping = true;
        if self.drop_state == DropState::Falling {
            let soon = self.clock_ms.saturating_add(self.gravity_interval_ms());
            self.next_drop_at = self.next_drop_at.min(soon);
        }
        true
    }

    /// Return to the level gravity interval
    pub fn soft_drop_end(&mut self) -> bool {
        if !self.soft_dropping {
            return false;
        }
        self.soft_dropping = false;
        if self.drop_state == DropState::Falling {
            self.schedule_drop();
        }
        true
    }

    /// Drop the active piece to the lowest legal row and lock it
    pub fn hard_drop(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let landing_y = self.landing_y(&active);
        self.active = Some(active.at(active.x, landing_y));
        self.lock_piece();
        true
    }

    /// Swap the active piece with the hold slot (once per lock)
    pub fn hold(&mut self) -> bool {
        if !self.playable() {
            return false;
        }
        let Some(mut active) = self.active else {
            return false;
        };

        if !self.hold.swap(&mut active, &mut self.queue) {
            trace!("hold rejected: already used since last lock");
            return false;
        }

        debug!(
            "held {:?}, now playing {:?}",
            self.hold.shape(),
            active.shape()
        );
        self.activate(active);
        true
    }

    /// Running: started, not over (paused or not)
    fn in_play(&self) -> bool {
        matches!(
            self.drop_state,
            DropState::Falling | DropState::Grounded { .. }
        )
    }

    /// Accepting piece commands
    fn playable(&self) -> bool {
        self.in_play() && !self.paused && self.active.is_some()
    }

    fn try_move(&mut self, dx: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        self.try_commit(active.at(active.x + dx, active.y))
    }

    fn try_rotate(&mut self, clockwise: bool) -> bool {
        let Some(active) = self.active else {
            return false;
        };
        let rotated = if clockwise {
            active.rotate_right()
        } else {
            active.rotate_left()
        };
        // O turns in place; it only counts while grounded, where it restarts
        // the lock delay.
        if rotated == active && !matches!(self.drop_state, DropState::Grounded { .. }) {
            return false;
        }
        self.try_commit(rotated)
    }

    /// Commit `candidate` as the active piece if it fits.
    ///
    /// While grounded, a successful commit either refreshes the lock delay
    /// (still resting) or returns to falling (a gap opened below).
    fn try_commit(&mut self, candidate: Tetromino) -> bool {
        if !self.playable() {
            return false;
        }
        if !self
            .board
            .is_legal(candidate.offsets(), candidate.x, candidate.y)
        {
            trace!(
                "rejected {:?} at ({}, {})",
                candidate.shape(),
                candidate.x,
                candidate.y
            );
            return false;
        }

        self.active = Some(candidate);

        if let DropState::Grounded { .. } = self.drop_state {
            if self.can_fall(&candidate) {
                self.drop_state = DropState::Falling;
                self.schedule_drop();
            } else {
                self.drop_state = DropState::Grounded {
                    since: self.clock_ms,
                };
            }
        }

        true
    }

    fn can_fall(&self, piece: &Tetromino) -> bool {
        self.board.is_legal(piece.offsets(), piece.x, piece.y - 1)
    }

    /// Lowest pivot row reachable by straight downward moves
    fn landing_y(&self, piece: &Tetromino) -> i8 {
        let mut y = piece.y;
        while self.board.is_legal(piece.offsets(), piece.x, y - 1) {
            y -= 1;
        }
        y
    }

    /// One row down, or become grounded
    fn gravity_step(&mut self) {
        let Some(active) = self.active else {
            return;
        };

        if self.can_fall(&active) {
            self.active = Some(active.at(active.x, active.y - 1));
        } else {
            self.drop_state = DropState::Grounded {
                since: self.clock_ms,
            };
        }
    }

    /// Spawn the next piece from the queue
    fn spawn_piece(&mut self) -> bool {
        let piece = self.queue.spawn();
        self.activate(piece)
    }

    /// Make `piece` the active piece, or end the game if it does not fit
    ///
    /// Only the spawn cells are checked. The piece is not stepped down a row
    /// first, so a spawn with room at the top but none below it still plays
    /// and grounds on the next gravity step.
    fn activate(&mut self, piece: Tetromino) -> bool {
        if !self.board.is_legal(piece.offsets(), piece.x, piece.y) {
            self.active = None;
            self.drop_state = DropState::GameOver;
            self.soft_dropping = false;
            info!(
                "game over: {:?} blocked at spawn (score {}, lines {})",
                piece.shape(),
                self.score.score,
                self.score.lines
            );
            return false;
        }

        self.active = Some(piece);
        self.active_id = self.active_id.wrapping_add(1);
        self.drop_state = DropState::Falling;
        self.schedule_drop();
        true
    }

    /// Next gravity step one interval from now
    fn schedule_drop(&mut self) {
        self.next_drop_at = self.clock_ms.saturating_add(self.gravity_interval_ms());
    }

    /// Lock the active piece onto the board and handle line clears
    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        if !self
            .board
            .settle(active.offsets(), active.x, active.y, active.shape())
        {
            warn!(
                "lock of {:?} at ({}, {}) did not fit; dropping it",
                active.shape(),
                active.x,
                active.y
            );
        }

        let cleared_rows = self.board.clear_full_rows();
        let result = self
            .score
            .apply_clear(cleared_rows.len() as u32, &self.config);

        debug!(
            "locked {:?} at ({}, {}), cleared {} rows for {} points",
            active.shape(),
            active.x,
            active.y,
            result.lines,
            result.points
        );
        if result.level_up {
            info!(
                "level {} reached, gravity now {}ms",
                self.score.level,
                drop_interval_ms(self.score.level, &self.config)
            );
        }

        self.last_event = Some(LockEvent {
            shape: active.shape(),
            lines_cleared: result.lines,
            points: result.points,
            level_up: result.level_up,
        });

        self.hold.unlock();
        self.spawn_piece();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
