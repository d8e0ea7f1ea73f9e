//! Card descriptions.
//!
//! Describing a card is a pure function of its variant's declared
//! capabilities and the current state of the hook tables.

use super::registry::VariantRegistry;
use super::variant::{Capabilities, Capability, VariantId};

/// What kind of creature the capabilities make a card.
#[must_use]
pub fn creature_description(capabilities: &Capabilities) -> &'static str {
    let duck = capabilities.contains(Capability::Duck);
    let dog = capabilities.contains(Capability::Dog);

    if duck && dog {
        "Duck-Dog"
    } else if duck {
        "Duck"
    } else if dog {
        "Dog"
    } else if capabilities.contains(Capability::Trasher) {
        "Brute"
    } else {
        "Creature"
    }
}

/// Describe a variant.
///
/// The creature description comes first (creatures only), then ability
/// text from the most-derived layer to the least-derived, then the lineage.
/// Hook-bound ability text is left out once its layer has no hooks left.
///
/// ```
/// use card_battler::cards::{describe, standard_registry};
///
/// let (registry, std) = standard_registry().unwrap();
/// assert_eq!(
///     describe(&registry, std.trasher),
///     vec![
///         "Dog".to_string(),
///         "Takes 1 less damage".to_string(),
///         "Brute > Bandit Dog > Creature > Card".to_string(),
///     ]
/// );
/// ```
#[must_use]
pub fn describe(registry: &VariantRegistry, variant: VariantId) -> Vec<String> {
    let mut lines = Vec::new();

    let capabilities = registry.capabilities(variant);
    if capabilities.contains(Capability::Creature) {
        lines.push(creature_description(&capabilities).to_string());
    }

    for layer in registry.lineage(variant) {
        let hooked = !layer.hooks.is_empty();
        lines.extend(
            layer
                .abilities
                .iter()
                .filter(|ability| !ability.hook_bound || hooked)
                .map(|ability| ability.text.clone()),
        );
    }

    let lineage: Vec<&str> = registry.lineage(variant).map(|layer| layer.title.as_str()).collect();
    if !lineage.is_empty() {
        lines.push(lineage.join(" > "));
    }

    lines
}
