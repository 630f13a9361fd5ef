//! Arena items and their per-tick physics

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::world::Arena;

/// The three item kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Rock,
    Paper,
    Scissors,
}

impl ItemKind {
    /// Creation order used when populating a world
    pub const ALL: [ItemKind; 3] = [ItemKind::Rock, ItemKind::Paper, ItemKind::Scissors];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Rock => "rock",
            ItemKind::Paper => "paper",
            ItemKind::Scissors => "scissors",
        }
    }
}

/// One moving shape
///
/// `center` is tracked alongside `pos` rather than recomputed, so both are
/// advanced by the same velocity every tick and `center - pos` stays `size / 2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Top-left anchor of the sprite
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub kind: ItemKind,
    /// Collision center
    pub center: Vec2,
}

impl Item {
    pub fn new(pos: Vec2, vel: Vec2, size: f32, kind: ItemKind) -> Self {
        Self {
            pos,
            vel,
            size,
            kind,
            center: pos + Vec2::splat(size / 2.0),
        }
    }

    /// Reflect off the arena walls, then advance one tick.
    ///
    /// The wall test runs on the pre-move center, so an item may overshoot a
    /// wall by up to one velocity step before it turns around.
    pub fn update(&mut self, arena: &Arena) {
        if self.center.x + self.size >= arena.width || self.center.x - self.size <= 0.0 {
            self.vel.x = -self.vel.x;
        }
        if self.center.y + self.size >= arena.height || self.center.y - self.size <= 0.0 {
            self.vel.y = -self.vel.y;
        }

        self.pos += self.vel;
        self.center += self.vel;
    }

    /// Whether `other` is close enough to count as touching
    #[inline]
    pub fn overlaps(&self, other: &Item) -> bool {
        self.center.distance(other.center) < self.size
    }

    /// Reverse direction (collision bounce)
    #[inline]
    pub fn invert_velocity(&mut self) {
        self.vel = -self.vel;
    }
}
