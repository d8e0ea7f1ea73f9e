//! Deterministic random number generation.
//!
//! The engine itself is fully deterministic; the only randomness is the
//! optional deck shuffle before the first turn. Each seat shuffles from its
//! own context stream so that one deck's size never changes the other
//! deck's order.
//!
//! ```
//! use card_battler::core::GameRng;
//!
//! let mut a = GameRng::new(42).for_context("deck-0");
//! let mut b = GameRng::new(42).for_context("deck-0");
//!
//! let mut left = vec![1, 2, 3, 4, 5];
//! let mut right = left.clone();
//! a.shuffle(&mut left);
//! b.shuffle(&mut right);
//! assert_eq!(left, right);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shuffle_is_deterministic() {
        let mut rng1 = GameRng::new(42);
        let mut rng2 = GameRng::new(42);

        let mut a: Vec<u32> = (0..20).collect();
        let mut b = a.clone();
        rng1.shuffle(&mut a);
        rng2.shuffle(&mut b);

        assert_eq!(a, b);
    }

    #[test]
    fn test_shuffle_keeps_elements() {
        let mut rng = GameRng::new(3);
        let mut cards: Vec<u32> = (0..20).collect();
        rng.shuffle(&mut cards);
        cards.sort_unstable();
        assert_eq!(cards, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_contexts_are_independent() {
        let rng = GameRng::new(42);
        let first = rng.for_context("deck-0");
        let second = rng.for_context("deck-1");
        assert_ne!(first.seed(), second.seed());
        assert_eq!(first.seed(), rng.for_context("deck-0").seed());
    }
}
