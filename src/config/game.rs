/// Game configuration constants.
///
/// This module defines the main gameplay parameters such as the stepping
/// cadence, grid dimensions, and scoring weights.
pub const TICK_INTERVAL_MS: u64 = 40; // Delay between game steps in milliseconds.

/// Minimum side length of the maze grid. Smaller configured sizes are
/// silently clamped up to this value.
pub const MIN_GRID_SIZE: usize = 10;

/// Probability that a carved empty cell receives a collectible.
pub const COLLECTIBLE_CHANCE: f64 = 0.1;

/// Maximum number of maze carving attempts before the generator falls back
/// to force-carving a cell next to the finish.
pub const MAX_CARVE_ATTEMPTS: u32 = 8;

/// Weight of the play-time tick total in the final score.
pub const TIME_WEIGHT: f32 = -0.5;

/// Weight of the collected-item total in the final score.
pub const COLLECT_WEIGHT: f32 = 1.3;
