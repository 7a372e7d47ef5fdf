//! Demo driver for the maze core.
//!
//! Wires the session to a steering source fed with a synthetic tilt pattern
//! and to a fake temperature feed, runs the fixed-delay game loop for a
//! bounded time, and prints the final session snapshot as JSON.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::info;
use tokio::sync::mpsc;

use tilt_maze::config::game::TICK_INTERVAL_MS;
use tilt_maze::game::game_loop::{run_game_loop, spawn_telemetry_feed};
use tilt_maze::session::{GameSession, ScoreEntry, ScoreStore, SettingsStore};
use tilt_maze::steering::{DeviceSteering, SteeringKind};

/// Fixed settings for the demo run.
struct DemoSettings;

impl SettingsStore for DemoSettings {
    fn grid_size(&self) -> usize {
        12
    }

    fn steering(&self) -> SteeringKind {
        SteeringKind::Device
    }
}

/// Score sink that just logs what a real leaderboard would persist.
struct LogScores;

impl ScoreStore for LogScores {
    fn submit(&self, entry: ScoreEntry) {
        info!(
            "score submitted: {:.1} ({} ticks, {} collected)",
            entry.score, entry.play_time, entry.collected
        );
    }
}

#[tokio::main]
async fn main() {
    // Initialize logger from environment variable (default to info level).
    env_logger::init();

    let settings = DemoSettings;
    let mut rng = rand::rng();
    let mut session = GameSession::new(&settings, Arc::new(LogScores), &mut rng);

    // A real frontend would build a BoardSteering when the settings say so
    // and hand its feed to the transport glue; the demo drives the device
    // variant in-process.
    let mut source = DeviceSteering::new();
    let motion = source.handle();

    // Synthetic steering: alternate strong right/down tilts with neutral
    // holds so the direction lock releases between turns.
    let driver = tokio::spawn(async move {
        let mut tilt_right = true;
        loop {
            let (x, y) = if tilt_right { (8.0, 0.0) } else { (0.0, -8.0) };
            motion.push_accel(x, y, 0.0);
            motion.push_gyro(0.0, 0.0, 0.0);
            tokio::time::sleep(Duration::from_millis(TICK_INTERVAL_MS * 2)).await;

            motion.push_accel(0.0, 0.0, 0.0);
            tokio::time::sleep(Duration::from_millis(TICK_INTERVAL_MS * 4)).await;
            tilt_right = !tilt_right;
        }
    });

    // Fake temperature telemetry; each reading accrues one play-time tick.
    let (temp_tx, temp_rx) = mpsc::channel(16);
    let telemetry = spawn_telemetry_feed(temp_rx, session.telemetry());
    let temp_feed = tokio::spawn(async move {
        while temp_tx.send(21.5).await.is_ok() {
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
    });

    // Cooperative stop after a bounded demo window.
    let stop = Arc::new(AtomicBool::new(false));
    let stopper = {
        let stop = Arc::clone(&stop);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(10)).await;
            stop.store(true, Ordering::Relaxed);
        })
    };

    let solved = run_game_loop(&mut session, &mut source, &stop).await;

    driver.abort();
    temp_feed.abort();
    telemetry.abort();
    stopper.abort();

    match serde_json::to_string_pretty(&session.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("failed to serialize snapshot: {err}"),
    }
    info!(
        "demo finished: solved={solved}, score={:.1}",
        session.final_score()
    );
}
