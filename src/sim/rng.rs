//! Bounded random integers
//!
//! The generator itself is owned by the `World`; this is just the draw.

use rand::Rng;

/// Uniform integer in `[min, max]` (both inclusive).
///
/// Callers guarantee `min <= max`.
#[inline]
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    rng.random_range(min..=max)
}
