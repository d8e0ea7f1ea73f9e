//! Variant registry.
//!
//! The `VariantRegistry` stores every variant definition of a battle and
//! owns their hook tables. Because a variant's table is shared by all of
//! its instances (and by every variant layered on it), removing a hook
//! here changes the behaviour of every such card at once. Hook theft
//! relies on exactly that.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use super::variant::{AttackStyle, BeforeAttack, Capabilities, VariantDefinition, VariantId};
use crate::core::{EngineError, EngineResult};
use crate::effects::{Hook, HookKind};

/// Registry of variant definitions.
///
/// ## Example
///
/// ```
/// use card_battler::cards::{VariantDefinition, VariantRegistry};
/// use card_battler::effects::{Hook, HookKind};
///
/// let mut registry = VariantRegistry::new();
/// let creature = registry.register(VariantDefinition::base("creature", "Creature")).unwrap();
/// let brute = registry
///     .register(
///         VariantDefinition::new("brute", "Brute", 5)
///             .extends(creature)
///             .with_hook(HookKind::Taken, Hook::Reduce { amount: 1, signal: false }),
///     )
///     .unwrap();
///
/// assert_eq!(registry.by_key("brute"), Some(brute));
/// assert!(registry.lookup_hook(brute, HookKind::Taken).is_some());
/// assert!(registry.lookup_hook(creature, HookKind::Taken).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct VariantRegistry {
    variants: Vec<VariantDefinition>,
    by_key: FxHashMap<String, VariantId>,
}

impl VariantRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The ID the next registered variant will get.
    ///
    /// Lets a variant refer to itself in its own hooks.
    #[must_use]
    pub fn next_id(&self) -> VariantId {
        VariantId::new(self.variants.len() as u16)
    }

    /// Register a variant and return its assigned ID.
    ///
    /// The parent, if any, must already be registered, so the parent chain
    /// can never form a cycle.
    pub fn register(&mut self, mut variant: VariantDefinition) -> EngineResult<VariantId> {
        if self.by_key.contains_key(&variant.key) {
            return Err(EngineError::DuplicateVariant(variant.key));
        }
        if variant.playable && variant.power <= 0 {
            return Err(EngineError::PowerlessVariant(variant.key));
        }
        if let Some(parent) = variant.parent {
            if self.get(parent).is_none() {
                return Err(EngineError::UnknownVariant(parent.to_string()));
            }
        }

        let id = self.next_id();
        variant.id = id;
        debug!(%id, key = %variant.key, "variant registered");
        self.by_key.insert(variant.key.clone(), id);
        self.variants.push(variant);
        Ok(id)
    }

    /// Get a definition by ID.
    #[must_use]
    pub fn get(&self, id: VariantId) -> Option<&VariantDefinition> {
        self.variants.get(id.index())
    }

    /// Get a definition by ID, or an error.
    pub fn require(&self, id: VariantId) -> EngineResult<&VariantDefinition> {
        self.get(id)
            .ok_or_else(|| EngineError::UnknownVariant(id.to_string()))
    }

    /// Look up a variant ID by key.
    #[must_use]
    pub fn by_key(&self, key: &str) -> Option<VariantId> {
        self.by_key.get(key).copied()
    }

    /// Get the number of registered variants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Iterate over all definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &VariantDefinition> {
        self.variants.iter()
    }

    /// Iterate from `id` up through its ancestors, most-derived first.
    pub fn lineage(&self, id: VariantId) -> impl Iterator<Item = &VariantDefinition> {
        let mut next = self.get(id);
        std::iter::from_fn(move || {
            let current = next?;
            next = current.parent.and_then(|parent| self.get(parent));
            Some(current)
        })
    }

    /// Check if `id` is `ancestor` or layered on it.
    #[must_use]
    pub fn is_a(&self, id: VariantId, ancestor: VariantId) -> bool {
        self.lineage(id).any(|variant| variant.id == ancestor)
    }

    /// Find the hook for `kind` along the parent chain.
    ///
    /// Returns the hook together with the variant whose table holds it.
    #[must_use]
    pub fn lookup_hook(&self, id: VariantId, kind: HookKind) -> Option<(VariantId, Hook)> {
        self.lineage(id)
            .find_map(|variant| variant.hooks.get(kind).map(|hook| (variant.id, hook)))
    }

    /// Capabilities of the variant and all of its ancestors.
    #[must_use]
    pub fn capabilities(&self, id: VariantId) -> Capabilities {
        let mut capabilities = Capabilities::new();
        for variant in self.lineage(id) {
            capabilities.extend(&variant.capabilities);
        }
        capabilities
    }

    /// The nearest declared attack style.
    #[must_use]
    pub fn attack_style(&self, id: VariantId) -> AttackStyle {
        self.lineage(id)
            .find_map(|variant| variant.attack)
            .unwrap_or_default()
    }

    /// The nearest declared before-attack behaviour.
    #[must_use]
    pub fn before_attack(&self, id: VariantId) -> Option<&BeforeAttack> {
        self.lineage(id).find_map(|variant| variant.before_attack.as_ref())
    }

    /// Variants in the chain whose population an instance of `id` counts toward.
    #[must_use]
    pub fn population_keys(&self, id: VariantId) -> SmallVec<[VariantId; 2]> {
        self.lineage(id)
            .filter(|variant| variant.tracks_population)
            .map(|variant| variant.id)
            .collect()
    }

    /// Remove a hook from the variant's own table.
    ///
    /// Ancestor tables are left alone, so a hook declared further up the
    /// chain shows through once the variant's own one is gone.
    pub fn take_hook(&mut self, id: VariantId, kind: HookKind) -> Option<Hook> {
        self.variants.get_mut(id.index())?.hooks.remove(kind)
    }

    /// Check if the variant's own table still holds any hook.
    #[must_use]
    pub fn owns_hooks(&self, id: VariantId) -> bool {
        self.get(id).is_some_and(|variant| !variant.hooks.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Capability;

    fn reduce(amount: i64) -> Hook {
        Hook::Reduce { amount, signal: false }
    }

    fn layered() -> (VariantRegistry, VariantId, VariantId, VariantId) {
        let mut registry = VariantRegistry::new();
        let creature = registry
            .register(VariantDefinition::base("creature", "Creature").with_capability(Capability::Creature))
            .unwrap();
        let dog = registry
            .register(
                VariantDefinition::new("dog", "Dog", 3)
                    .extends(creature)
                    .with_capability(Capability::Dog)
                    .with_hook(HookKind::DealtToPlayer, reduce(1)),
            )
            .unwrap();
        let brute = registry
            .register(
                VariantDefinition::new("brute", "Brute", 5)
                    .extends(dog)
                    .with_capability(Capability::Trasher)
                    .with_hook(HookKind::Taken, reduce(1))
                    .with_hook(HookKind::DealtToPlayer, reduce(2)),
            )
            .unwrap();
        (registry, creature, dog, brute)
    }

    #[test]
    fn test_register_assigns_sequential_ids() {
        let (registry, creature, dog, brute) = layered();
        assert_eq!(creature, VariantId::new(0));
        assert_eq!(dog, VariantId::new(1));
        assert_eq!(brute, VariantId::new(2));
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get(brute).unwrap().id, brute);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let (mut registry, ..) = layered();
        let err = registry.register(VariantDefinition::new("dog", "Other Dog", 1)).unwrap_err();
        assert_eq!(err, EngineError::DuplicateVariant("dog".to_string()));
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let mut registry = VariantRegistry::new();
        let err = registry
            .register(VariantDefinition::new("orphan", "Orphan", 1).extends(VariantId::new(9)))
            .unwrap_err();
        assert!(matches!(err, EngineError::UnknownVariant(_)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_powerless_playable_variant_rejected() {
        let mut registry = VariantRegistry::new();
        let err = registry
            .register(VariantDefinition::new("husk", "Husk", 0))
            .unwrap_err();
        assert_eq!(err, EngineError::PowerlessVariant("husk".to_string()));
        assert!(registry.by_key("husk").is_none());

        // Abstract layers carry no power of their own.
        assert!(registry.register(VariantDefinition::base("shell", "Shell")).is_ok());
    }

    #[test]
    fn test_lineage_most_derived_first() {
        let (registry, creature, dog, brute) = layered();
        let chain: Vec<_> = registry.lineage(brute).map(|v| v.id).collect();
        assert_eq!(chain, vec![brute, dog, creature]);
        assert!(registry.is_a(brute, creature));
        assert!(!registry.is_a(dog, brute));
    }

    #[test]
    fn test_nearest_hook_wins() {
        let (registry, _, dog, brute) = layered();
        assert_eq!(
            registry.lookup_hook(brute, HookKind::DealtToPlayer),
            Some((brute, reduce(2)))
        );
        assert_eq!(
            registry.lookup_hook(dog, HookKind::DealtToPlayer),
            Some((dog, reduce(1)))
        );
    }

    #[test]
    fn test_take_hook_reveals_ancestor() {
        let (mut registry, _, dog, brute) = layered();

        assert_eq!(registry.take_hook(brute, HookKind::DealtToPlayer), Some(reduce(2)));
        assert_eq!(
            registry.lookup_hook(brute, HookKind::DealtToPlayer),
            Some((dog, reduce(1)))
        );
        assert_eq!(registry.take_hook(brute, HookKind::DealtToPlayer), None);
    }

    #[test]
    fn test_capabilities_accumulate() {
        let (registry, _, dog, brute) = layered();
        let caps = registry.capabilities(brute);
        assert!(caps.contains(Capability::Creature));
        assert!(caps.contains(Capability::Dog));
        assert!(caps.contains(Capability::Trasher));
        assert!(!registry.capabilities(dog).contains(Capability::Trasher));
    }

    #[test]
    fn test_attack_style_inherited() {
        let mut registry = VariantRegistry::new();
        let gun = registry
            .register(VariantDefinition::base("gun", "Gun").with_attack(AttackStyle::Sweep { damage: 2 }))
            .unwrap();
        let big_gun = registry
            .register(VariantDefinition::new("big-gun", "Big Gun", 8).extends(gun))
            .unwrap();

        assert_eq!(registry.attack_style(big_gun), AttackStyle::Sweep { damage: 2 });
    }

    #[test]
    fn test_population_keys() {
        let mut registry = VariantRegistry::new();
        let lad = registry
            .register(VariantDefinition::new("lad", "Lad", 2).tracking_population())
            .unwrap();
        let big_lad = registry
            .register(VariantDefinition::new("big-lad", "Big Lad", 4).extends(lad))
            .unwrap();

        assert_eq!(registry.population_keys(big_lad).as_slice(), &[lad]);
        assert_eq!(registry.population_keys(lad).as_slice(), &[lad]);
    }
}
