//! RPS Arena - rock-paper-scissors particle toy
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, conversion rules, run loop)
//! - `renderer`: 2D raster painting of the arena with a fading trail
//! - `config`: Run configuration supplied by the UI form or a JSON file

pub mod config;
pub mod renderer;
pub mod sim;

pub use config::{CollisionPolicy, ConfigError, SimConfig};

/// Arena and run defaults
pub mod consts {
    /// Default number of items of each kind
    pub const DEFAULT_COUNT: u32 = 10;
    /// Default item size (collision distance and sprite extent)
    pub const DEFAULT_SIZE: f32 = 30.0;
    /// Random velocities are drawn per axis from [-RANDOM_VELOCITY, RANDOM_VELOCITY]
    pub const RANDOM_VELOCITY: i32 = 3;

    /// Opacity of the white overlay painted each frame (leaves fading trails)
    pub const TRAIL_ALPHA: f32 = 0.3;

    /// Arena used by the native headless runner
    pub const HEADLESS_WIDTH: f32 = 800.0;
    pub const HEADLESS_HEIGHT: f32 = 600.0;
    /// Tick cap for headless runs
    pub const MAX_TICKS: u64 = 10_000;
}
