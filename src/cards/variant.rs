//! Variant definitions.
//!
//! A variant is the behavioural profile shared by every card dealt from it:
//! its name, base power, capability flags, hooks, attack style and ability
//! text. Variants are layered: a variant names a parent and inherits
//! everything it does not declare itself. "Brute" is "Bandit Dog" plus a
//! damage-reduction hook; "Bandit Dog" is "Creature" plus the Dog flag.
//!
//! A definition only holds what its own layer declares. Walking the parent
//! chain is the job of the [`VariantRegistry`](super::VariantRegistry).

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::effects::{Hook, HookKind, HookTable};

/// Identifier of a registered variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VariantId(pub u16);

impl VariantId {
    /// Create a variant ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Index into the registry.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for VariantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Variant({})", self.0)
    }
}

/// A declared trait of a variant, used to describe what a card is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// Fights on the table and gets a creature description.
    Creature,
    Duck,
    Dog,
    Trasher,
}

/// A set of capabilities.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities(SmallVec<[Capability; 4]>);

impl Capabilities {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a capability. Adding one twice is a no-op.
    pub fn insert(&mut self, capability: Capability) {
        if !self.0.contains(&capability) {
            self.0.push(capability);
        }
    }

    /// Check for a capability.
    #[must_use]
    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    /// Add every capability of `other`.
    pub fn extend(&mut self, other: &Capabilities) {
        for capability in other.iter() {
            self.insert(capability);
        }
    }

    /// Iterate over capabilities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        let mut set = Capabilities::new();
        for capability in iter {
            set.insert(capability);
        }
        set
    }
}

/// How a variant attacks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackStyle {
    /// Strike the card in the opposite slot with current power, or the
    /// opposing hero when that slot is empty.
    #[default]
    Opposite,

    /// Strike every opposing slot in table order for a fixed amount.
    Sweep { damage: i64 },
}

/// Something a variant does before its attack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeforeAttack {
    /// Take the listed hook kinds from the variant of the first opposing card.
    StealHooks(SmallVec<[HookKind; 3]>),
}

/// A line of ability text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    /// Text shown to players.
    pub text: String,

    /// Listed only while the declaring variant still owns at least one hook.
    pub hook_bound: bool,
}

/// One layer of variant behaviour.
///
/// ## Example
///
/// ```
/// use card_battler::cards::{Capability, VariantDefinition};
/// use card_battler::effects::{Hook, HookKind};
///
/// let brute = VariantDefinition::new("trasher", "Brute", 5)
///     .with_capability(Capability::Trasher)
///     .with_hook(HookKind::Taken, Hook::Reduce { amount: 1, signal: true })
///     .with_hook_ability("Takes 1 less damage");
///
/// assert_eq!(brute.power, 5);
/// assert!(brute.hooks.contains(HookKind::Taken));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDefinition {
    /// Assigned on registration.
    pub id: VariantId,

    /// Unique lookup key, e.g. `"trasher"`.
    pub key: String,

    /// Display name, e.g. `"Brute"`.
    pub title: String,

    /// Maximum power of cards dealt from this variant.
    pub power: i64,

    /// The variant this one is layered on.
    pub parent: Option<VariantId>,

    /// Capabilities declared by this layer.
    pub capabilities: Capabilities,

    /// Hooks owned by this layer. Shared by every instance of the variant
    /// and of variants layered on it.
    pub hooks: HookTable,

    /// Ability text declared by this layer.
    pub abilities: SmallVec<[Ability; 2]>,

    /// Attack style. `None` inherits the parent's.
    pub attack: Option<AttackStyle>,

    /// Behaviour before attacking. `None` inherits the parent's.
    pub before_attack: Option<BeforeAttack>,

    /// Count live instances of this variant (and of variants layered on it).
    pub tracks_population: bool,

    /// Abstract layers cannot be dealt.
    pub playable: bool,
}

impl VariantDefinition {
    /// Create a playable layer with no parent.
    ///
    /// Registration rejects a playable layer whose power is not positive.
    pub fn new(key: impl Into<String>, title: impl Into<String>, power: i64) -> Self {
        Self {
            id: VariantId::new(0),
            key: key.into(),
            title: title.into(),
            power: power.max(0),
            parent: None,
            capabilities: Capabilities::new(),
            hooks: HookTable::new(),
            abilities: SmallVec::new(),
            attack: None,
            before_attack: None,
            tracks_population: false,
            playable: true,
        }
    }

    /// Create an abstract layer that other variants build on.
    pub fn base(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            playable: false,
            ..Self::new(key, title, 0)
        }
    }

    /// Layer this variant on `parent` (builder pattern).
    #[must_use]
    pub fn extends(mut self, parent: VariantId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Declare a capability (builder pattern).
    #[must_use]
    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    /// Declare a hook (builder pattern).
    #[must_use]
    pub fn with_hook(mut self, kind: HookKind, hook: Hook) -> Self {
        self.hooks.insert(kind, hook);
        self
    }

    /// Add ability text that is always listed (builder pattern).
    #[must_use]
    pub fn with_ability(mut self, text: impl Into<String>) -> Self {
        self.abilities.push(Ability {
            text: text.into(),
            hook_bound: false,
        });
        self
    }

    /// Add ability text that disappears once this layer has lost all of its
    /// hooks (builder pattern).
    #[must_use]
    pub fn with_hook_ability(mut self, text: impl Into<String>) -> Self {
        self.abilities.push(Ability {
            text: text.into(),
            hook_bound: true,
        });
        self
    }

    /// Set the attack style (builder pattern).
    #[must_use]
    pub fn with_attack(mut self, attack: AttackStyle) -> Self {
        self.attack = Some(attack);
        self
    }

    /// Set the before-attack behaviour (builder pattern).
    #[must_use]
    pub fn with_before_attack(mut self, before: BeforeAttack) -> Self {
        self.before_attack = Some(before);
        self
    }

    /// Count live instances of this variant (builder pattern).
    #[must_use]
    pub fn tracking_population(mut self) -> Self {
        self.tracks_population = true;
        self
    }
}
