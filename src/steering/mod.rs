//! Steering sources and sensor types.
//!
//! A steering source delivers the raw 6-axis samples the direction fusion
//! consumes. Two variants exist — the wired sensor board and the device's
//! own motion sensors — selected by configuration; the game core is
//! agnostic to which one is active.

pub mod board;
pub mod device;
pub mod fusion;

pub use board::{BoardFeed, BoardSteering};
pub use device::{DeviceMotionHandle, DeviceSteering};
pub use fusion::FusionState;

use serde::{Serialize, Deserialize};
use thiserror::Error;

/// One 6-axis motion reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    pub acc_x: f32,
    pub acc_y: f32,
    pub acc_z: f32,
    pub gyro_x: f32,
    pub gyro_y: f32,
    pub gyro_z: f32,
    /// Capture time in seconds on the source's monotonic clock.
    pub timestamp: f64,
}

impl SensorSample {
    pub fn new(acc: [f32; 3], gyro: [f32; 3], timestamp: f64) -> Self {
        Self {
            acc_x: acc[0],
            acc_y: acc[1],
            acc_z: acc[2],
            gyro_x: gyro[0],
            gyro_y: gyro[1],
            gyro_z: gyro[2],
            timestamp,
        }
    }
}

/// Steering error types.
#[derive(Error, Debug, Clone)]
pub enum SteeringError {
    #[error("malformed sensor frame: {0}")]
    BadFrame(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Which steering variant the session reads, persisted in the settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SteeringKind {
    /// The wired sensor board feed.
    Board,
    /// The device's own motion sensors.
    Device,
}

/// A source of motion samples.
pub trait SteeringSource {
    /// Begin accepting fresh readings.
    fn start(&mut self);

    /// Stop accepting fresh readings. Held values stay readable.
    fn stop(&mut self);

    /// Latest 6-axis reading, stamped on the source's monotonic clock.
    fn sample(&mut self) -> SensorSample;
}
