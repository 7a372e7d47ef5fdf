//! Device motion steering.
//!
//! The platform's sensor callbacks deliver accelerometer and gyroscope
//! triples independently; this source caches whichever values arrived last
//! for each sensor, the way a handset listener does, and pairs them up when
//! the game loop samples.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use log::debug;

use crate::steering::{SensorSample, SteeringSource};

/// Push half of the device source. The platform glue clones this and calls
/// the push methods from its accelerometer and gyroscope callbacks.
#[derive(Clone)]
pub struct DeviceMotionHandle {
    accel: Arc<Mutex<[f32; 3]>>,
    gyro: Arc<Mutex<[f32; 3]>>,
    active: Arc<AtomicBool>,
}

impl DeviceMotionHandle {
    /// Store an accelerometer reading. Ignored while the source is stopped,
    /// as if the listener were unregistered.
    pub fn push_accel(&self, x: f32, y: f32, z: f32) {
        if !self.active.load(Ordering::Relaxed) {
            return;
        }
        let mut accel = self
            .accel
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *accel = [x, y, z];
    }

    /// Store a gyroscope reading. Ignored while the source is stopped.
    pub fn push_gyro(&self, x: f32, y: f32, z: f32) {
        if !self.active.load(Ordering::Relaxed) {
            return;
        }
        let mut gyro = self
            .gyro
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *gyro = [x, y, z];
    }
}

/// Steering through the device's own motion sensors.
pub struct DeviceSteering {
    accel: Arc<Mutex<[f32; 3]>>,
    gyro: Arc<Mutex<[f32; 3]>>,
    active: Arc<AtomicBool>,
    clock: Instant,
}

impl DeviceSteering {
    pub fn new() -> Self {
        Self {
            accel: Arc::new(Mutex::new([0.0; 3])),
            gyro: Arc::new(Mutex::new([0.0; 3])),
            active: Arc::new(AtomicBool::new(false)),
            clock: Instant::now(),
        }
    }

    /// Handle for the platform glue that owns the sensor callbacks.
    pub fn handle(&self) -> DeviceMotionHandle {
        DeviceMotionHandle {
            accel: Arc::clone(&self.accel),
            gyro: Arc::clone(&self.gyro),
            active: Arc::clone(&self.active),
        }
    }
}

impl Default for DeviceSteering {
    fn default() -> Self {
        Self::new()
    }
}

impl SteeringSource for DeviceSteering {
    fn start(&mut self) {
        self.active.store(true, Ordering::Relaxed);
        debug!("device steering started");
    }

    fn stop(&mut self) {
        self.active.store(false, Ordering::Relaxed);
        debug!("device steering stopped");
    }

    fn sample(&mut self) -> SensorSample {
        let acc = *self
            .accel
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let gyro = *self
            .gyro
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        SensorSample::new(acc, gyro, self.clock.elapsed().as_secs_f64())
    }
}
