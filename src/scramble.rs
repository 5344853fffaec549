//! Random scramble generation from an explicit, seedable RNG.

use rand::Rng;

use crate::moves::{Move, MoveSequence};

/// Draw `length` moves uniformly and independently from the 12-move alphabet.
///
/// Consecutive moves are not filtered, so a scramble may partly cancel itself.
pub fn random_scramble<R: Rng + ?Sized>(rng: &mut R, length: usize) -> MoveSequence {
    (0..length)
        .map(|_| Move::ALL[rng.gen_range(0..Move::ALL.len())])
        .collect()
}
