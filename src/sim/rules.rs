//! Kind conversion on collision
//!
//! Paper covers rock, scissors cut paper, rock blunts scissors. The table is
//! applied as three ordered stages, each reading the kinds left behind by the
//! previous stage. `a` is the item doing the collision check, `b` the one it hit.

use super::item::ItemKind::{self, Paper, Rock, Scissors};

/// Apply the conversion rule to a colliding pair in place
pub fn convert(a: &mut ItemKind, b: &mut ItemKind) {
    match (*a, *b) {
        (Rock, Paper) => *a = Paper,
        (Paper, Rock) => *b = Paper,
        _ => {}
    }

    match (*a, *b) {
        (Paper, Scissors) => *a = Scissors,
        (Scissors, Paper) => *b = Scissors,
        _ => {}
    }

    match (*a, *b) {
        (Rock, Scissors) => *b = Rock,
        (Scissors, Rock) => *a = Rock,
        _ => {}
    }
}
