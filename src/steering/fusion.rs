//! Direction fusion.
//!
//! Pure computation: raw 6-axis samples in, one latched discrete direction
//! out. Independent of the steering transport and of the game loop, so it
//! can be driven with recorded or scripted data.
//!
//! The accelerometer path is high-pass filtered and the gyroscope path
//! integrated over the sample interval; both are dead-zoned, weighted and
//! combined per axis. A direction is emitted when the combined tilt crosses
//! the tilt threshold and is then locked until the device returns near
//! neutral on both axes, which keeps the output from oscillating around the
//! decision boundary.

use log::debug;

use crate::config::steering::{
    ACCELEROMETER_WEIGHT, ALPHA, DEAD_ZONE_THRESHOLD, GYROSCOPE_WEIGHT, LOCK_THRESHOLD,
    MAX_ACCELEROMETER_RANGE, MAX_GYROSCOPE_RANGE, TILT_THRESHOLD,
};
use crate::game::types::Direction;
use crate::steering::SensorSample;

/// Filter and latch state carried between fusion calls.
#[derive(Debug, Clone, Default)]
pub struct FusionState {
    high_pass: [f32; 3],
    orientation: [f32; 3],
    // Reference the high-pass filter subtracts. The pipeline this was
    // calibrated against never refreshes it from the current reading;
    // kept as-is pending recalibration against the sensor board.
    acc_baseline: [f32; 3],
    locked: bool,
    latched: Option<Direction>,
    last_timestamp: Option<f64>,
}

impl FusionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direction latched by the most recent threshold crossing, if any.
    pub fn latched(&self) -> Option<Direction> {
        self.latched
    }

    /// Whether the latched direction is currently locked against updates.
    pub fn locked(&self) -> bool {
        self.locked
    }

    fn reset_orientation(&mut self) {
        self.high_pass = [0.0; 3];
        self.orientation = [0.0; 3];
    }

    fn latch(&mut self, direction: Direction) {
        self.latched = Some(direction);
        self.locked = true;
        self.reset_orientation();
        debug!("direction latched: {direction:?}");
    }
}

/// Fuse one sample into `state` and return the latched direction.
///
/// The output is sticky: once any direction has been emitted, every call
/// returns the last one — through dead-zone quiescence included — until a
/// new tilt crosses the threshold. `None` is returned only before the first
/// emission, and the caller must not move on it.
pub fn fuse(sample: &SensorSample, state: &mut FusionState) -> Option<Direction> {
    let norm_acc = [
        sample.acc_x / MAX_ACCELEROMETER_RANGE,
        sample.acc_y / MAX_ACCELEROMETER_RANGE,
        sample.acc_z / MAX_ACCELEROMETER_RANGE,
    ];
    let norm_gyro = [
        sample.gyro_x / MAX_GYROSCOPE_RANGE,
        sample.gyro_y / MAX_GYROSCOPE_RANGE,
        sample.gyro_z / MAX_GYROSCOPE_RANGE,
    ];

    for i in 0..3 {
        state.high_pass[i] = ALPHA * (state.high_pass[i] + norm_acc[i] - state.acc_baseline[i]);
    }

    let dt = state
        .last_timestamp
        .map_or(0.0, |prev| (sample.timestamp - prev).max(0.0)) as f32;
    state.last_timestamp = Some(sample.timestamp);
    for i in 0..3 {
        state.orientation[i] += norm_gyro[i] * dt;
    }

    // Dead zone: a vector too small to mean anything is noise.
    if magnitude(state.high_pass) < DEAD_ZONE_THRESHOLD {
        state.high_pass = [0.0; 3];
    }
    if magnitude(state.orientation) < DEAD_ZONE_THRESHOLD {
        state.orientation = [0.0; 3];
    }

    let combined_x =
        ACCELEROMETER_WEIGHT * state.high_pass[0] + GYROSCOPE_WEIGHT * state.orientation[0];
    let combined_y =
        ACCELEROMETER_WEIGHT * state.high_pass[1] + GYROSCOPE_WEIGHT * state.orientation[1];

    if state.locked {
        // Release only once both axes are back near neutral.
        if combined_x.abs() < LOCK_THRESHOLD && combined_y.abs() < LOCK_THRESHOLD {
            state.locked = false;
            state.reset_orientation();
            debug!("direction unlocked");
        }
    } else if combined_x.abs() > TILT_THRESHOLD && combined_x.abs() > combined_y.abs() {
        state.latch(if combined_x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        });
    } else if combined_y.abs() > TILT_THRESHOLD {
        // Positive y is a tilt away from the player: up the grid.
        state.latch(if combined_y > 0.0 {
            Direction::Up
        } else {
            Direction::Down
        });
    }

    state.latched
}

fn magnitude(v: [f32; 3]) -> f32 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}
