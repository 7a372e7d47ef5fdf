/// Main configuration module.
///
/// Re-exports submodules for game and steering configuration.
pub mod game;
pub mod steering;
