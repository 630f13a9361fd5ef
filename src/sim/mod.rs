//! Deterministic simulation module
//!
//! All arena logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only (placement and random velocities)
//! - Stable iteration order (creation order of items)
//! - No rendering or platform dependencies; painting goes through `FramePainter`

pub mod collision;
pub mod item;
pub mod rng;
pub mod rules;
pub mod tick;
pub mod world;

pub use collision::collide_and_resolve;
pub use item::{Item, ItemKind};
pub use rng::random_int;
pub use rules::convert;
pub use tick::{FramePainter, NullPainter, RunPhase, RunSummary, RunToken, Simulation, TickOutcome};
pub use world::{Arena, World};
