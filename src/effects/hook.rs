//! Damage hooks.
//!
//! A hook transforms a damage value on its way through the pipeline. Hooks
//! are plain data: the pipeline looks one up for the card whose turn it is
//! to modify the value, asks it for a [`HookOutcome`], and suspends when
//! the outcome asks for the view to signal the ability first.
//!
//! Hooks live in [`HookTable`]s. Every variant owns one table (shared by
//! all of its instances) and every card instance owns an override table.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{PopulationRegistry, VariantId};

/// The damage events a hook can be attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HookKind {
    /// Outgoing damage aimed at a creature.
    DealtToCreature,
    /// Outgoing damage aimed at the opposing hero.
    DealtToPlayer,
    /// Incoming damage.
    Taken,
}

impl HookKind {
    /// Every hook kind, in pipeline order.
    pub const ALL: [HookKind; 3] = [HookKind::DealtToCreature, HookKind::DealtToPlayer, HookKind::Taken];
}

/// A damage transformation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hook {
    /// Subtract a flat amount, floored at zero. With `signal` the ability is
    /// shown by the view before the reduced value is passed on.
    Reduce { amount: i64, signal: bool },

    /// Add the population bonus of a variant.
    PopulationBonus { of: VariantId },

    /// Subtract the population bonus of a variant, floored at zero.
    PopulationGuard { of: VariantId },
}

/// Result of applying a hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HookOutcome {
    /// The new value can be passed on right away.
    Ready(i64),

    /// The new value is passed on once the view has signalled the ability.
    Signal(i64),
}

impl HookOutcome {
    /// The transformed value.
    #[must_use]
    pub fn value(self) -> i64 {
        match self {
            HookOutcome::Ready(value) | HookOutcome::Signal(value) => value,
        }
    }
}

impl Hook {
    /// Apply the hook to `value`.
    ///
    /// Never returns a negative value. Population bonuses are read from
    /// `population` at call time, so they follow the live count.
    #[must_use]
    pub fn apply(&self, value: i64, population: &PopulationRegistry) -> HookOutcome {
        match *self {
            Hook::Reduce { amount, signal } => {
                let reduced = value.saturating_sub(amount).max(0);
                if signal {
                    HookOutcome::Signal(reduced)
                } else {
                    HookOutcome::Ready(reduced)
                }
            }
            Hook::PopulationBonus { of } => {
                HookOutcome::Ready(value.saturating_add(population.bonus(of)).max(0))
            }
            Hook::PopulationGuard { of } => {
                HookOutcome::Ready(value.saturating_sub(population.bonus(of)).max(0))
            }
        }
    }
}

/// Apply an optional hook. No hook passes the value through unchanged.
#[must_use]
pub fn apply_hook(hook: Option<Hook>, value: i64, population: &PopulationRegistry) -> HookOutcome {
    match hook {
        Some(hook) => hook.apply(value, population),
        None => HookOutcome::Ready(value.max(0)),
    }
}

/// A set of hooks, at most one per [`HookKind`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookTable {
    hooks: FxHashMap<HookKind, Hook>,
}

impl HookTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a hook (builder pattern).
    #[must_use]
    pub fn with(mut self, kind: HookKind, hook: Hook) -> Self {
        self.hooks.insert(kind, hook);
        self
    }

    /// Get the hook for a kind.
    #[must_use]
    pub fn get(&self, kind: HookKind) -> Option<Hook> {
        self.hooks.get(&kind).copied()
    }

    /// Check if the table has a hook for a kind.
    #[must_use]
    pub fn contains(&self, kind: HookKind) -> bool {
        self.hooks.contains_key(&kind)
    }

    /// Insert a hook, returning the one it replaced.
    pub fn insert(&mut self, kind: HookKind, hook: Hook) -> Option<Hook> {
        self.hooks.insert(kind, hook)
    }

    /// Remove the hook for a kind.
    pub fn remove(&mut self, kind: HookKind) -> Option<Hook> {
        self.hooks.remove(&kind)
    }

    /// Number of hooks in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Kinds present in the table, in pipeline order.
    #[must_use]
    pub fn kinds(&self) -> SmallVec<[HookKind; 3]> {
        HookKind::ALL
            .into_iter()
            .filter(|kind| self.hooks.contains_key(kind))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_clamps_at_zero() {
        let population = PopulationRegistry::new();
        let hook = Hook::Reduce { amount: 1, signal: false };

        assert_eq!(hook.apply(5, &population), HookOutcome::Ready(4));
        assert_eq!(hook.apply(1, &population), HookOutcome::Ready(0));
        assert_eq!(hook.apply(0, &population), HookOutcome::Ready(0));
    }

    #[test]
    fn test_signalling_reduce() {
        let population = PopulationRegistry::new();
        let hook = Hook::Reduce { amount: 1, signal: true };
        assert_eq!(hook.apply(5, &population), HookOutcome::Signal(4));
    }

    #[test]
    fn test_population_hooks_follow_count() {
        let lad = VariantId::new(3);
        let mut population = PopulationRegistry::new();
        let bonus = Hook::PopulationBonus { of: lad };
        let guard = Hook::PopulationGuard { of: lad };

        assert_eq!(bonus.apply(2, &population).value(), 2);

        population.enter(lad);
        population.enter(lad);
        // 2 * 3 / 2
        assert_eq!(bonus.apply(2, &population).value(), 5);
        assert_eq!(guard.apply(2, &population).value(), 0);
        assert_eq!(guard.apply(7, &population).value(), 4);
    }

    #[test]
    fn test_extreme_values_saturate() {
        let lad = VariantId::new(3);
        let mut population = PopulationRegistry::new();
        population.enter(lad);

        let bonus = Hook::PopulationBonus { of: lad };
        let guard = Hook::PopulationGuard { of: lad };
        let reduce = Hook::Reduce { amount: i64::MIN, signal: false };

        assert_eq!(bonus.apply(i64::MAX, &population).value(), i64::MAX);
        assert_eq!(guard.apply(i64::MAX, &population).value(), i64::MAX - 1);
        assert_eq!(reduce.apply(i64::MAX, &population).value(), i64::MAX);
    }

    #[test]
    fn test_missing_hook_is_identity() {
        let population = PopulationRegistry::new();
        assert_eq!(apply_hook(None, 3, &population), HookOutcome::Ready(3));
    }

    #[test]
    fn test_table_kinds_in_pipeline_order() {
        let table = HookTable::new()
            .with(HookKind::Taken, Hook::Reduce { amount: 1, signal: false })
            .with(HookKind::DealtToCreature, Hook::Reduce { amount: 2, signal: false });

        assert_eq!(
            table.kinds().as_slice(),
            &[HookKind::DealtToCreature, HookKind::Taken]
        );
        assert!(!table.contains(HookKind::DealtToPlayer));
    }
}
