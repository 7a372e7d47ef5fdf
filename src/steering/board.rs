//! Wired sensor-board steering.
//!
//! The external transport pushes the board's readings as text frames of the
//! form `"(ax,ay,az,gx,gy,gz)"`. This source parses them and holds the
//! latest values for the game loop to sample; frames arriving while the
//! source is stopped are dropped, the way an unsubscribed feed goes quiet.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use log::debug;

use crate::steering::{SensorSample, SteeringError, SteeringSource};

#[derive(Debug, Clone, Copy, Default)]
struct AxisValues {
    acc: [f32; 3],
    gyro: [f32; 3],
}

/// Ingest half of the board source. The transport glue clones this and
/// calls [`BoardFeed::ingest_frame`] for every frame the board publishes.
#[derive(Clone)]
pub struct BoardFeed {
    values: Arc<Mutex<AxisValues>>,
    active: Arc<AtomicBool>,
}

impl BoardFeed {
    /// Parse one `"(ax,ay,az,gx,gy,gz)"` frame and store its values.
    ///
    /// Frames received while the source is stopped are accepted and
    /// discarded. A frame with the wrong arity or a non-numeric field is
    /// rejected; the previously held values stay in place.
    pub fn ingest_frame(&self, frame: &str) -> Result<(), SteeringError> {
        if !self.active.load(Ordering::Relaxed) {
            return Ok(());
        }

        let fields: Vec<&str> = frame
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .split(',')
            .collect();
        if fields.len() != 6 {
            return Err(SteeringError::BadFrame(format!(
                "expected 6 values, got {}",
                fields.len()
            )));
        }

        let mut parsed = [0.0f32; 6];
        for (slot, field) in parsed.iter_mut().zip(&fields) {
            *slot = field
                .trim()
                .parse()
                .map_err(|_| SteeringError::BadFrame(format!("not a number: {field:?}")))?;
        }

        let mut values = self
            .values
            .lock()
            .map_err(|_| SteeringError::Internal("board values lock poisoned".into()))?;
        values.acc = [parsed[0], parsed[1], parsed[2]];
        values.gyro = [parsed[3], parsed[4], parsed[5]];
        Ok(())
    }
}

/// Steering through the wired sensor board.
pub struct BoardSteering {
    values: Arc<Mutex<AxisValues>>,
    active: Arc<AtomicBool>,
    clock: Instant,
}

impl BoardSteering {
    pub fn new() -> Self {
        Self {
            values: Arc::new(Mutex::new(AxisValues::default())),
            active: Arc::new(AtomicBool::new(false)),
            clock: Instant::now(),
        }
    }

    /// Handle for the transport glue that receives board frames.
    pub fn feed(&self) -> BoardFeed {
        BoardFeed {
            values: Arc::clone(&self.values),
            active: Arc::clone(&self.active),
        }
    }
}

impl Default for BoardSteering {
    fn default() -> Self {
        Self::new()
    }
}

impl SteeringSource for BoardSteering {
    fn start(&mut self) {
        self.active.store(true, Ordering::Relaxed);
        debug!("board steering started");
    }

    fn stop(&mut self) {
        self.active.store(false, Ordering::Relaxed);
        debug!("board steering stopped");
    }

    fn sample(&mut self) -> SensorSample {
        let values = *self
            .values
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        SensorSample::new(values.acc, values.gyro, self.clock.elapsed().as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_roundtrip() {
        let mut source = BoardSteering::new();
        let feed = source.feed();
        source.start();

        feed.ingest_frame("(0.5,0.2,-0.3,0.1,-0.4,0.6)").unwrap();
        let sample = source.sample();

        assert_eq!(sample.acc_x, 0.5);
        assert_eq!(sample.acc_z, -0.3);
        assert_eq!(sample.gyro_z, 0.6);
    }

    #[test]
    fn wrong_arity_is_rejected_and_values_kept() {
        let mut source = BoardSteering::new();
        let feed = source.feed();
        source.start();

        feed.ingest_frame("(1,2,3,4,5,6)").unwrap();
        let err = feed.ingest_frame("(1,2,3)");
        assert!(matches!(err, Err(SteeringError::BadFrame(_))));

        let sample = source.sample();
        assert_eq!(sample.gyro_z, 6.0);
    }

    #[test]
    fn non_numeric_field_is_rejected() {
        let mut source = BoardSteering::new();
        let feed = source.feed();
        source.start();

        let err = feed.ingest_frame("(a,b,c,d,e,f)");
        assert!(matches!(err, Err(SteeringError::BadFrame(_))));
    }

    #[test]
    fn frames_while_stopped_are_dropped() {
        let mut source = BoardSteering::new();
        let feed = source.feed();

        feed.ingest_frame("(1,1,1,1,1,1)").unwrap();
        assert_eq!(source.sample().acc_x, 0.0);

        source.start();
        feed.ingest_frame("(2,2,2,2,2,2)").unwrap();
        source.stop();
        feed.ingest_frame("(3,3,3,3,3,3)").unwrap();

        // Stop keeps the last accepted values readable.
        assert_eq!(source.sample().acc_x, 2.0);
    }

    #[test]
    fn samples_are_monotonically_stamped() {
        let mut source = BoardSteering::new();
        let first = source.sample().timestamp;
        let second = source.sample().timestamp;
        assert!(second >= first);
    }
}
