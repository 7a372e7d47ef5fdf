//! Fixed-delay game loop.
//!
//! Drives a session at the stepping cadence until the maze is solved or the
//! caller raises the stop flag. Telemetry arrives on its own task and is
//! decoupled from this loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::info;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::game::TICK_INTERVAL_MS;
use crate::session::{GameSession, TelemetryHandle};
use crate::steering::SteeringSource;

/// Step `session` every tick until it reports solved or `stop` is raised.
///
/// Returns whether the maze was solved. Cancellation is cooperative: the
/// flag is checked between ticks, never inside a step.
pub async fn run_game_loop(
    session: &mut GameSession,
    source: &mut dyn SteeringSource,
    stop: &AtomicBool,
) -> bool {
    let mut ticker = tokio::time::interval(Duration::from_millis(TICK_INTERVAL_MS));
    source.start();
    session.set_running(true);

    let solved = loop {
        ticker.tick().await;
        if stop.load(Ordering::Relaxed) {
            info!("game loop stopped by request");
            break false;
        }
        if session.step(source) {
            info!("maze solved after {} play-time ticks", session.play_time());
            break true;
        }
    };

    session.set_running(false);
    source.stop();
    solved
}

/// Drain temperature readings from `rx` into the session's telemetry handle.
///
/// Each reading accrues one play-time tick while the session is running.
pub fn spawn_telemetry_feed(
    mut rx: mpsc::Receiver<f32>,
    handle: TelemetryHandle,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(reading) = rx.recv().await {
            handle.record(reading);
        }
    })
}
