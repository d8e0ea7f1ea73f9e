//! Live-instance counters per variant.
//!
//! Some variants grow stronger the more of them are on the table. The count
//! belongs to the variant, not to any card, and only changes when a card
//! enters or leaves play.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::variant::VariantId;

/// Live-instance counters keyed by variant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationRegistry {
    counts: FxHashMap<VariantId, u32>,
}

impl PopulationRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live instances counted for `variant`.
    #[must_use]
    pub fn count(&self, variant: VariantId) -> u32 {
        self.counts.get(&variant).copied().unwrap_or(0)
    }

    /// Record an instance entering play.
    pub fn enter(&mut self, variant: VariantId) {
        let count = self.counts.entry(variant).or_insert(0);
        *count += 1;
        trace!(%variant, count = *count, "population up");
    }

    /// Record an instance leaving play. Never drops below zero.
    pub fn leave(&mut self, variant: VariantId) {
        if let Some(count) = self.counts.get_mut(&variant) {
            *count = count.saturating_sub(1);
            trace!(%variant, count = *count, "population down");
        }
    }

    /// Damage bonus for `variant`: the triangular number of its count.
    ///
    /// ```
    /// use card_battler::cards::{PopulationRegistry, VariantId};
    ///
    /// let lad = VariantId::new(0);
    /// let mut population = PopulationRegistry::new();
    /// for _ in 0..3 {
    ///     population.enter(lad);
    /// }
    /// assert_eq!(population.bonus(lad), 6);
    /// ```
    #[must_use]
    pub fn bonus(&self, variant: VariantId) -> i64 {
        triangular(self.count(variant))
    }
}

/// `k * (k + 1) / 2`.
#[must_use]
pub fn triangular(k: u32) -> i64 {
    let k = i64::from(k);
    k * (k + 1) / 2
}
