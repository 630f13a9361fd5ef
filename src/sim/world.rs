//! The world: every live item plus the run counters
//!
//! Items are stored in creation order (rocks, then papers, then scissors).
//! That order drives the per-tick iteration and must stay stable for runs
//! to be reproducible.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::item::{Item, ItemKind};
use super::rng::random_int;
use crate::config::{ConfigError, SimConfig};
use crate::consts::RANDOM_VELOCITY;

/// Arena bounds; the playfield spans `[0, width] x [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Integer spawn ranges `(x_min, x_max, y_min, y_max)` for an item of `size`,
    /// keeping it at least `size` away from every wall. `None` if it cannot fit.
    pub fn placement_range(&self, size: f32) -> Option<(i32, i32, i32, i32)> {
        let lo = size.ceil() as i32;
        let x_max = (self.width - size).floor() as i32;
        let y_max = (self.height - size).floor() as i32;
        (lo <= x_max && lo <= y_max).then_some((lo, x_max, lo, y_max))
    }

    /// Whether a center lies within the walls widened by `margin`
    pub fn contains_with_margin(&self, point: Vec2, margin: f32) -> bool {
        point.x >= -margin
            && point.x <= self.width + margin
            && point.y >= -margin
            && point.y <= self.height + margin
    }
}

/// All state for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub arena: Arena,
    /// Items in creation order
    pub items: Vec<Item>,
    /// Registered collisions this run
    pub collisions: u64,
    /// Ticks executed this run
    pub ticks: u64,
    /// Seed the run was created from
    pub seed: u64,
}

impl World {
    /// An empty world over `arena`
    pub fn empty(arena: Arena) -> Self {
        Self {
            arena,
            items: Vec::new(),
            collisions: 0,
            ticks: 0,
            seed: 0,
        }
    }

    /// Populate a world from a validated config.
    ///
    /// Each item gets a random integer position at least `size` from every
    /// wall and, per axis, either the fixed velocity or a random integer one.
    pub fn from_config(config: &SimConfig, arena: Arena, seed: u64) -> Result<Self, ConfigError> {
        config.validate(&arena)?;

        let mut world = Self::empty(arena);
        world.seed = seed;
        if config.total() == 0 {
            return Ok(world);
        }

        let Some((x_min, x_max, y_min, y_max)) = arena.placement_range(config.size) else {
            return Err(ConfigError::ArenaTooSmall {
                size: config.size,
                width: arena.width,
                height: arena.height,
            });
        };

        let mut rng = Pcg32::seed_from_u64(seed);
        let counts = [config.num_rock, config.num_paper, config.num_scissors];
        world.items.reserve(config.total());

        for (kind, count) in ItemKind::ALL.into_iter().zip(counts) {
            for _ in 0..count {
                let pos = Vec2::new(
                    random_int(&mut rng, x_min, x_max) as f32,
                    random_int(&mut rng, y_min, y_max) as f32,
                );
                let vel = Vec2::new(
                    config
                        .fixed_velocity_x()
                        .unwrap_or_else(|| random_velocity(&mut rng)),
                    config
                        .fixed_velocity_y()
                        .unwrap_or_else(|| random_velocity(&mut rng)),
                );
                world.items.push(Item::new(pos, vel, config.size, kind));
            }
        }

        Ok(world)
    }

    /// Drop every item and zero the counters
    pub fn reset(&mut self) {
        self.items.clear();
        self.collisions = 0;
        self.ticks = 0;
    }

    /// The shared kind when at most one kind remains.
    ///
    /// `Some(None)` for an empty world, `None` while kinds still differ.
    pub fn converged_kind(&self) -> Option<Option<ItemKind>> {
        let Some(first) = self.items.first() else {
            return Some(None);
        };
        self.items
            .iter()
            .all(|item| item.kind == first.kind)
            .then_some(Some(first.kind))
    }

    /// Current population per kind, in `ItemKind::ALL` order
    pub fn census(&self) -> [usize; 3] {
        let mut counts = [0; 3];
        for item in &self.items {
            counts[item.kind as usize] += 1;
        }
        counts
    }

    pub fn kinds(&self) -> Vec<ItemKind> {
        self.items.iter().map(|i| i.kind).collect()
    }
}

fn random_velocity(rng: &mut Pcg32) -> f32 {
    random_int(rng, -RANDOM_VELOCITY, RANDOM_VELOCITY) as f32
}
