//! Run configuration
//!
//! Built by the UI form (or a JSON file natively) and consumed once per run.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_COUNT, DEFAULT_SIZE};
use crate::sim::Arena;

/// What happens to velocities when two items of different kinds collide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CollisionPolicy {
    /// Invert both items' velocity vectors on every registered collision
    pub invert_velocity: bool,
}

/// Preferences for a single run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimConfig {
    pub num_rock: u32,
    pub num_paper: u32,
    pub num_scissors: u32,
    /// Uniform item size (collision distance and sprite extent)
    pub size: f32,
    /// Fixed horizontal velocity; `None` (or 0) randomizes per item
    pub velocity_x: Option<f32>,
    /// Fixed vertical velocity; `None` (or 0) randomizes per item
    pub velocity_y: Option<f32>,
    /// Bounce colliding items off each other
    pub bounce_on_collision: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_rock: DEFAULT_COUNT,
            num_paper: DEFAULT_COUNT,
            num_scissors: DEFAULT_COUNT,
            size: DEFAULT_SIZE,
            velocity_x: None,
            velocity_y: None,
            bounce_on_collision: false,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON preferences object
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Total number of items this config creates
    pub fn total(&self) -> usize {
        self.num_rock as usize + self.num_paper as usize + self.num_scissors as usize
    }

    pub fn collision_policy(&self) -> CollisionPolicy {
        CollisionPolicy {
            invert_velocity: self.bounce_on_collision,
        }
    }

    /// Effective fixed velocity for an axis. Zero counts as unset.
    pub fn fixed_velocity_x(&self) -> Option<f32> {
        self.velocity_x.filter(|v| *v != 0.0)
    }

    pub fn fixed_velocity_y(&self) -> Option<f32> {
        self.velocity_y.filter(|v| *v != 0.0)
    }

    /// Check the config against the arena it will populate.
    ///
    /// A fixed velocity may not exceed the item size: walls are tested before
    /// the move, so one step of overshoot must stay within the wall margin.
    pub fn validate(&self, arena: &Arena) -> Result<(), ConfigError> {
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(ConfigError::InvalidSize(self.size));
        }
        for v in [self.velocity_x, self.velocity_y].into_iter().flatten() {
            if !v.is_finite() || v.abs() > self.size {
                return Err(ConfigError::InvalidVelocity(v));
            }
        }
        if self.total() > 0 && arena.placement_range(self.size).is_none() {
            return Err(ConfigError::ArenaTooSmall {
                size: self.size,
                width: arena.width,
                height: arena.height,
            });
        }
        Ok(())
    }
}

/// Parse an item count typed into the form. Blank means "keep the default".
pub fn parse_count(raw: &str) -> Result<Option<u32>, ConfigError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| ConfigError::InvalidCount(raw.to_string()))
}

/// Rejected configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Size must be a positive finite number
    InvalidSize(f32),
    /// Fixed velocities must be finite and no faster than the item size
    InvalidVelocity(f32),
    /// Item counts must be non-negative integers
    InvalidCount(String),
    /// No room to place an item of this size away from the walls
    ArenaTooSmall { size: f32, width: f32, height: f32 },
    /// Malformed JSON preferences
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSize(size) => write!(f, "item size must be positive, got {size}"),
            ConfigError::InvalidVelocity(v) => write!(
                f,
                "velocity must be finite and no larger than the item size, got {v}"
            ),
            ConfigError::InvalidCount(raw) => {
                write!(f, "item count must be a whole number of at least 0, got {raw:?}")
            }
            ConfigError::ArenaTooSmall {
                size,
                width,
                height,
            } => write!(
                f,
                "arena {width}x{height} is too small for items of size {size}"
            ),
            ConfigError::Parse(msg) => write!(f, "invalid preferences: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
