//! Game session orchestration.
//!
//! One session owns one maze attempt: the grid, the fusion state and the
//! collected total. The stepping loop is their only mutator. The telemetry
//! callback runs on another task and shares exactly three things with the
//! loop — the running flag, the play-time tick counter and the last
//! temperature reading — so those live behind atomics and a mutex while
//! everything else stays unsynchronized.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use log::{debug, info};
use rand::Rng;
use serde::{Serialize, Deserialize};
use uuid::Uuid;

use crate::config::game::{COLLECT_WEIGHT, MIN_GRID_SIZE, TIME_WEIGHT};
use crate::game::grid::{self, is_grid_empty};
use crate::game::systems::movement::{MoveOutcome, move_player};
use crate::game::types::Grid;
use crate::steering::fusion::{self, FusionState};
use crate::steering::{SteeringKind, SteeringSource};

/// Settings the surrounding application persists for the game.
pub trait SettingsStore {
    /// Configured maze side length. Values below the minimum are clamped,
    /// never rejected.
    fn grid_size(&self) -> usize;

    /// Which steering variant the session should read.
    fn steering(&self) -> SteeringKind;
}

/// Sink for finished attempts, persisted by the surrounding application
/// (leaderboard or otherwise).
pub trait ScoreStore {
    fn submit(&self, entry: ScoreEntry);
}

/// One finished attempt as handed to the score store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub session_id: Uuid,
    pub play_time: u32,
    pub collected: u32,
    pub score: f32,
}

/// Point-in-time view of a session for the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub grid: Grid,
    pub collected: u32,
    pub play_time: u32,
    pub temperature: f32,
    pub solved: bool,
}

/// The shared half of the session state.
#[derive(Debug, Default)]
struct SharedState {
    running: AtomicBool,
    play_time: AtomicU32,
    temperature: Mutex<f32>,
}

/// Cloneable telemetry sink.
///
/// Every recorded reading stores the temperature and, while the session is
/// running, accrues one play-time tick. Accrual is driven entirely by the
/// telemetry cadence and is decoupled from the stepping loop.
#[derive(Clone)]
pub struct TelemetryHandle {
    shared: Arc<SharedState>,
}

impl TelemetryHandle {
    pub fn record(&self, temperature: f32) {
        let mut last = self
            .shared
            .temperature
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *last = temperature;
        drop(last);

        if self.shared.running.load(Ordering::Relaxed) {
            self.shared.play_time.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// One logical game: maze, fusion state and totals for a single attempt.
pub struct GameSession {
    id: Uuid,
    grid: Grid,
    fusion: FusionState,
    collected: u32,
    shared: Arc<SharedState>,
    scores: Arc<dyn ScoreStore + Send + Sync>,
}

impl GameSession {
    /// Build a session from the persisted settings: clamps the configured
    /// size to the minimum and generates a fresh maze.
    pub fn new(
        settings: &dyn SettingsStore,
        scores: Arc<dyn ScoreStore + Send + Sync>,
        rng: &mut impl Rng,
    ) -> Self {
        let size = settings.grid_size().max(MIN_GRID_SIZE);
        let grid = grid::generate(size, rng);
        let id = Uuid::new_v4();
        info!("session {id}: generated a {size}x{size} maze");

        Self {
            id,
            grid,
            fusion: FusionState::new(),
            collected: 0,
            shared: Arc::new(SharedState::default()),
            scores,
        }
    }

    /// Resume-style constructor over an explicit grid, bypassing generation.
    pub fn with_grid(grid: Grid, scores: Arc<dyn ScoreStore + Send + Sync>) -> Self {
        Self {
            id: Uuid::new_v4(),
            grid,
            fusion: FusionState::new(),
            collected: 0,
            shared: Arc::new(SharedState::default()),
            scores,
        }
    }

    /// One game step: sample the source, fuse, move.
    ///
    /// Returns whether the grid is now the all-empty solved sentinel. Before
    /// the fusion has ever latched a direction no move is attempted.
    pub fn step(&mut self, source: &mut dyn SteeringSource) -> bool {
        let sample = source.sample();
        if let Some(direction) = fusion::fuse(&sample, &mut self.fusion) {
            match move_player(&mut self.grid, direction) {
                MoveOutcome::Collected => {
                    self.collected += 1;
                    debug!("collectible picked up ({} total)", self.collected);
                }
                MoveOutcome::Won => {
                    let entry = self.score_entry();
                    info!(
                        "session {}: solved with score {:.1} ({} ticks, {} collected)",
                        self.id, entry.score, entry.play_time, entry.collected
                    );
                    self.scores.submit(entry);
                }
                MoveOutcome::Moved | MoveOutcome::NoOp => {}
            }
        }
        is_grid_empty(&self.grid)
    }

    /// Telemetry sink wired to this session's shared counters.
    pub fn telemetry(&self) -> TelemetryHandle {
        TelemetryHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn set_running(&self, running: bool) {
        self.shared.running.store(running, Ordering::Relaxed);
    }

    pub fn running(&self) -> bool {
        self.shared.running.load(Ordering::Relaxed)
    }

    /// Play time in telemetry ticks.
    pub fn play_time(&self) -> u32 {
        self.shared.play_time.load(Ordering::Relaxed)
    }

    pub fn collected(&self) -> u32 {
        self.collected
    }

    /// Last temperature pushed by the telemetry feed. Opaque passthrough;
    /// nothing in the game logic reads it.
    pub fn temperature(&self) -> f32 {
        *self
            .shared
            .temperature
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn is_solved(&self) -> bool {
        is_grid_empty(&self.grid)
    }

    /// Final score: weighted play time plus weighted collectible count.
    pub fn final_score(&self) -> f32 {
        TIME_WEIGHT * self.play_time() as f32 + COLLECT_WEIGHT * self.collected as f32
    }

    fn score_entry(&self) -> ScoreEntry {
        ScoreEntry {
            session_id: self.id,
            play_time: self.play_time(),
            collected: self.collected,
            score: self.final_score(),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            grid: self.grid.clone(),
            collected: self.collected,
            play_time: self.play_time(),
            temperature: self.temperature(),
            solved: self.is_solved(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::game::types::Cell;

    /// Score store that remembers every submitted entry.
    #[derive(Default)]
    struct RecordingStore {
        entries: Mutex<Vec<ScoreEntry>>,
    }

    impl ScoreStore for RecordingStore {
        fn submit(&self, entry: ScoreEntry) {
            self.entries.lock().unwrap().push(entry);
        }
    }

    fn store() -> Arc<RecordingStore> {
        Arc::new(RecordingStore::default())
    }

    #[test]
    fn telemetry_ticks_only_while_running() {
        let session = GameSession::with_grid(vec![vec![Cell::Empty]], store());
        let telemetry = session.telemetry();

        telemetry.record(25.5);
        assert_eq!(session.play_time(), 0);
        assert_eq!(session.temperature(), 25.5);

        session.set_running(true);
        telemetry.record(27.8);
        assert_eq!(session.play_time(), 1);
        assert_eq!(session.temperature(), 27.8);

        session.set_running(false);
        telemetry.record(30.0);
        assert_eq!(session.play_time(), 1);
    }

    #[test]
    fn score_formula_weighs_time_against_collectibles() {
        use approx::assert_relative_eq;

        let session = GameSession::with_grid(vec![vec![Cell::Empty]], store());
        let telemetry = session.telemetry();

        session.set_running(true);
        for _ in 0..10 {
            telemetry.record(21.0);
        }

        // No collectibles: 10 ticks at -0.5 each.
        assert_relative_eq!(session.final_score(), -5.0);
    }

    #[test]
    fn winning_step_submits_one_score_entry() {
        use crate::steering::{BoardSteering, SteeringSource as _};

        // Player one cell below the top row; the cell above is adjacent to
        // the finish, so a single Up move wins.
        let grid = vec![
            vec![Cell::Wall, Cell::Finish, Cell::Wall],
            vec![Cell::Wall, Cell::Empty, Cell::Wall],
            vec![Cell::Wall, Cell::Player, Cell::Wall],
        ];
        let scores = store();
        let mut session = GameSession::with_grid(grid, scores.clone());

        let mut source = BoardSteering::new();
        let feed = source.feed();
        source.start();
        // A strong forward tilt: positive y latches Up.
        feed.ingest_frame("(0.0,8.0,0.0,0.0,0.0,0.0)").unwrap();

        let solved = session.step(&mut source);
        assert!(solved);
        assert!(session.is_solved());
        assert_eq!(scores.entries.lock().unwrap().len(), 1);

        // Further steps stay solved and do not submit again.
        let solved = session.step(&mut source);
        assert!(solved);
        assert_eq!(scores.entries.lock().unwrap().len(), 1);
    }

    #[test]
    fn step_without_any_latched_direction_moves_nothing() {
        use crate::steering::{DeviceSteering, SteeringSource as _};

        let grid = vec![
            vec![Cell::Wall, Cell::Wall, Cell::Wall],
            vec![Cell::Empty, Cell::Player, Cell::Empty],
            vec![Cell::Wall, Cell::Wall, Cell::Wall],
        ];
        let mut session = GameSession::with_grid(grid.clone(), store());

        let mut source = DeviceSteering::new();
        source.start();

        assert!(!session.step(&mut source));
        assert_eq!(session.grid(), &grid);
    }

    #[test]
    fn collectible_pickups_accumulate() {
        use crate::steering::{BoardSteering, SteeringSource as _};

        let grid = vec![
            vec![Cell::Wall, Cell::Wall, Cell::Wall, Cell::Wall],
            vec![Cell::Player, Cell::Collectible, Cell::Collectible, Cell::Empty],
            vec![Cell::Wall, Cell::Wall, Cell::Wall, Cell::Wall],
        ];
        let mut session = GameSession::with_grid(grid, store());

        let mut source = BoardSteering::new();
        let feed = source.feed();
        source.start();
        feed.ingest_frame("(8.0,0.0,0.0,0.0,0.0,0.0)").unwrap();

        // The latched Right direction replays on every step.
        assert!(!session.step(&mut source));
        assert!(!session.step(&mut source));
        assert!(!session.step(&mut source));

        assert_eq!(session.collected(), 2);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.collected, 2);
        assert!(!snapshot.solved);

        // No telemetry ticks accrued, so the score is pure pickup credit.
        approx::assert_relative_eq!(session.final_score(), 2.6);
    }
}
