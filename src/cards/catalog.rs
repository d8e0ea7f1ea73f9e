//! The standard variants.
//!
//! | key | title | power | layered on |
//! |---|---|---|---|
//! | `duck` | Peaceful Duck | 2 | creature |
//! | `dog` | Bandit Dog | 3 | creature |
//! | `trasher` | Brute | 5 | dog |
//! | `gatling` | Gatling | 6 | creature |
//! | `rogue` | Rogue | 2 | creature |
//! | `lad` | Lad | 2 | card |

use smallvec::smallvec;

use super::registry::VariantRegistry;
use super::variant::{AttackStyle, BeforeAttack, Capability, VariantDefinition, VariantId};
use crate::core::EngineResult;
use crate::effects::{Hook, HookKind};

/// Damage dealt to each opposing slot by the gatling sweep.
pub const GATLING_DAMAGE: i64 = 2;

/// IDs of the standard variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StandardVariants {
    pub card: VariantId,
    pub creature: VariantId,
    pub duck: VariantId,
    pub dog: VariantId,
    pub trasher: VariantId,
    pub gatling: VariantId,
    pub rogue: VariantId,
    pub lad: VariantId,
}

/// Register the standard variants.
pub fn register_standard(registry: &mut VariantRegistry) -> EngineResult<StandardVariants> {
    let card = registry.register(VariantDefinition::base("card", "Card"))?;
    let creature = registry.register(
        VariantDefinition::base("creature", "Creature")
            .extends(card)
            .with_capability(Capability::Creature),
    )?;

    let duck = registry.register(
        VariantDefinition::new("duck", "Peaceful Duck", 2)
            .extends(creature)
            .with_capability(Capability::Duck),
    )?;
    let dog = registry.register(
        VariantDefinition::new("dog", "Bandit Dog", 3)
            .extends(creature)
            .with_capability(Capability::Dog),
    )?;
    let trasher = registry.register(
        VariantDefinition::new("trasher", "Brute", 5)
            .extends(dog)
            .with_capability(Capability::Trasher)
            .with_hook(HookKind::Taken, Hook::Reduce { amount: 1, signal: true })
            .with_ability("Takes 1 less damage"),
    )?;
    let gatling = registry.register(
        VariantDefinition::new("gatling", "Gatling", 6)
            .extends(creature)
            .with_attack(AttackStyle::Sweep { damage: GATLING_DAMAGE })
            .with_ability("Deals 2 damage to every opposing card in turn"),
    )?;
    let rogue = registry.register(
        VariantDefinition::new("rogue", "Rogue", 2)
            .extends(creature)
            .with_before_attack(BeforeAttack::StealHooks(smallvec![
                HookKind::DealtToCreature,
                HookKind::DealtToPlayer,
                HookKind::Taken,
            ]))
            .with_ability("Steals the damage abilities of the first opposing card's kind"),
    )?;

    let lad = registry.next_id();
    registry.register(
        VariantDefinition::new("lad", "Lad", 2)
            .extends(card)
            .tracking_population()
            .with_hook(HookKind::DealtToCreature, Hook::PopulationBonus { of: lad })
            .with_hook(HookKind::Taken, Hook::PopulationGuard { of: lad })
            .with_hook_ability("The more of them, the stronger they are"),
    )?;

    Ok(StandardVariants {
        card,
        creature,
        duck,
        dog,
        trasher,
        gatling,
        rogue,
        lad,
    })
}

/// Create a registry holding only the standard variants.
pub fn standard_registry() -> EngineResult<(VariantRegistry, StandardVariants)> {
    let mut registry = VariantRegistry::new();
    let standard = register_standard(&mut registry)?;
    Ok((registry, standard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_powers() {
        let (registry, std) = standard_registry().unwrap();
        let power = |id| registry.get(id).unwrap().power;

        assert_eq!(power(std.duck), 2);
        assert_eq!(power(std.dog), 3);
        assert_eq!(power(std.trasher), 5);
        assert_eq!(power(std.gatling), 6);
        assert_eq!(power(std.rogue), 2);
        assert_eq!(power(std.lad), 2);
    }

    #[test]
    fn test_base_layers_not_playable() {
        let (registry, std) = standard_registry().unwrap();
        assert!(!registry.get(std.card).unwrap().playable);
        assert!(!registry.get(std.creature).unwrap().playable);
        assert!(registry.get(std.duck).unwrap().playable);
    }

    #[test]
    fn test_trasher_is_a_dog() {
        let (registry, std) = standard_registry().unwrap();
        assert!(registry.is_a(std.trasher, std.dog));
        assert!(registry.capabilities(std.trasher).contains(Capability::Dog));
        assert!(registry.lookup_hook(std.dog, HookKind::Taken).is_none());
    }

    #[test]
    fn test_lad_hooks_refer_to_lad() {
        let (registry, std) = standard_registry().unwrap();
        assert_eq!(
            registry.lookup_hook(std.lad, HookKind::DealtToCreature),
            Some((std.lad, Hook::PopulationBonus { of: std.lad }))
        );
        assert_eq!(registry.population_keys(std.lad).as_slice(), &[std.lad]);
        assert!(!registry.capabilities(std.lad).contains(Capability::Creature));
    }

    #[test]
    fn test_keys_resolve() {
        let (registry, std) = standard_registry().unwrap();
        for (key, id) in [
            ("duck", std.duck),
            ("dog", std.dog),
            ("trasher", std.trasher),
            ("gatling", std.gatling),
            ("rogue", std.rogue),
            ("lad", std.lad),
        ] {
            assert_eq!(registry.by_key(key), Some(id));
        }
    }
}
