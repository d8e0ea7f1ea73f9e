//! Battle configuration.
//!
//! `BattleConfig` fixes the shape of a battle before any card is dealt:
//! how many slots each table has, how strong the heroes are, and how much
//! damage an unopposed attack deals to the opposing hero.

use serde::{Deserialize, Serialize};

/// Configuration for a battle.
///
/// ## Example
///
/// ```
/// use card_battler::core::BattleConfig;
///
/// let config = BattleConfig::default()
///     .with_table_size(3)
///     .with_hero_power(12)
///     .with_shuffled_decks(7);
///
/// assert_eq!(config.table_size, 3);
/// assert_eq!(config.hero_power, 12);
/// assert!(config.shuffle_decks);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Fixed number of slots on each seat's table.
    pub table_size: usize,

    /// Starting (and maximum) power of each hero.
    pub hero_power: i64,

    /// Raw damage dealt to the opposing hero when the opposite slot is empty.
    pub player_damage: i64,

    /// Shuffle decks before the first turn.
    pub shuffle_decks: bool,

    /// Seed for deck shuffling.
    pub seed: u64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            table_size: 5,
            hero_power: 10,
            player_damage: 1,
            shuffle_decks: false,
            seed: 0,
        }
    }
}

impl BattleConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of table slots per seat.
    #[must_use]
    pub fn with_table_size(mut self, size: usize) -> Self {
        assert!(size > 0, "Table must have at least one slot");
        self.table_size = size;
        self
    }

    /// Set the starting hero power.
    #[must_use]
    pub fn with_hero_power(mut self, power: i64) -> Self {
        self.hero_power = power.max(0);
        self
    }

    /// Set the damage an unopposed attack deals to the hero.
    #[must_use]
    pub fn with_player_damage(mut self, damage: i64) -> Self {
        self.player_damage = damage.max(0);
        self
    }

    /// Shuffle decks with the given seed before the first turn.
    #[must_use]
    pub fn with_shuffled_decks(mut self, seed: u64) -> Self {
        self.shuffle_decks = true;
        self.seed = seed;
        self
    }
}
