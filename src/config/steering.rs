/// Steering and sensor fusion constants.
///
/// These values are calibrated against the mpu6050 sensor board and the
/// handset sensors the game ships with; both feeds are normalized into the
/// same range before fusion.
pub const MAX_ACCELEROMETER_RANGE: f32 = 9.81; // Maximum accelerometer reading (m/s^2).

/// Maximum gyroscope reading (degrees/second).
pub const MAX_GYROSCOPE_RANGE: f32 = 2000.0;

/// High-pass filter constant for the accelerometer path.
pub const ALPHA: f32 = 0.5;

/// Weight of the high-passed accelerometer vector in the combined tilt.
pub const ACCELEROMETER_WEIGHT: f32 = 0.7;

/// Weight of the integrated gyroscope vector in the combined tilt.
pub const GYROSCOPE_WEIGHT: f32 = 0.3;

/// Magnitude below which a sensor vector is zeroed to suppress jitter.
pub const DEAD_ZONE_THRESHOLD: f32 = 0.05;

/// Combined tilt magnitude that triggers a direction.
pub const TILT_THRESHOLD: f32 = 0.1;

/// Combined tilt magnitude both axes must drop under before a locked
/// direction is released.
pub const LOCK_THRESHOLD: f32 = 0.2;
