//! Pairwise collision detection and resolution
//!
//! Brute force: every item is tested against every other item, O(n²) per tick.
//! Fine for the tens of items the arena is meant for.

use super::item::Item;
use super::rules::convert;
use crate::config::CollisionPolicy;

/// Test item `index` against every other item and resolve each hit.
///
/// A hit needs the centers closer than the item's size and the kinds to
/// differ at the moment of the check; same-kind overlaps are ignored. Kinds
/// are converted one pair at a time, so later pairs in the same pass see
/// the result of earlier ones.
///
/// Returns the number of registered collisions.
pub fn collide_and_resolve(items: &mut [Item], index: usize, policy: CollisionPolicy) -> u64 {
    let mut hits = 0;

    for other in 0..items.len() {
        if other == index {
            continue;
        }

        let (this, that) = pair_mut(items, index, other);
        if this.kind == that.kind || !this.overlaps(that) {
            continue;
        }

        hits += 1;
        convert(&mut this.kind, &mut that.kind);

        if policy.invert_velocity {
            this.invert_velocity();
            that.invert_velocity();
        }
    }

    hits
}

/// Mutable references to two distinct items
fn pair_mut(items: &mut [Item], a: usize, b: usize) -> (&mut Item, &mut Item) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
