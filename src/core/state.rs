//! Board state.
//!
//! The `Board` is the shared game context every step runs against:
//!
//! - Two seats, each with a hero, a fixed-size table and a deck
//! - Every card instance ever dealt, in play or not
//! - The variant registry (shared hook tables)
//! - The population registry (live-instance counters)
//!
//! Cards enter and leave play only through [`Board::put_into_play`] and
//! [`Board::remove_from_play`], which run the lifecycle hooks exactly once
//! per transition.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, info};

use super::config::BattleConfig;
use super::entity::CardId;
use super::error::{EngineError, EngineResult};
use super::player::{PlayerId, PlayerMap};
use crate::cards::{describe, CardInstance, PopulationRegistry, VariantId, VariantRegistry};
use crate::effects::{Hook, HookKind};

/// One seat: a hero, a table and a deck.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Seat {
    /// Remaining hero power.
    pub hero_power: i64,

    /// Table slots in order. `None` is an empty slot.
    pub table: Vec<Option<CardId>>,

    /// Cards not yet played, top first.
    pub deck: VecDeque<CardId>,
}

impl Seat {
    fn new(config: &BattleConfig) -> Self {
        Self {
            hero_power: config.hero_power,
            table: vec![None; config.table_size],
            deck: VecDeque::new(),
        }
    }

    /// Cards on the table, in slot order.
    pub fn cards_in_play(&self) -> impl Iterator<Item = CardId> + '_ {
        self.table.iter().flatten().copied()
    }

    /// First empty slot.
    #[must_use]
    pub fn first_empty_slot(&self) -> Option<usize> {
        self.table.iter().position(Option::is_none)
    }
}

/// Shared game context.
#[derive(Clone, Debug)]
pub struct Board {
    config: BattleConfig,

    /// Per-seat heroes, tables and decks.
    pub seats: PlayerMap<Seat>,

    cards: FxHashMap<CardId, CardInstance>,

    /// Variant definitions and their hook tables.
    pub variants: VariantRegistry,

    /// Live-instance counters.
    pub population: PopulationRegistry,

    next_card: CardId,

    redraw_requested: bool,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new(config: BattleConfig, variants: VariantRegistry) -> Self {
        Self {
            seats: PlayerMap::new(|_| Seat::new(&config)),
            config,
            cards: FxHashMap::default(),
            variants,
            population: PopulationRegistry::new(),
            next_card: CardId::new(0),
            redraw_requested: false,
        }
    }

    /// The battle configuration.
    #[must_use]
    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    // === Cards ===

    /// Create a card of `variant` for `owner`. The card is not in play and
    /// not in any deck.
    pub fn create_card(&mut self, owner: PlayerId, variant: VariantId) -> EngineResult<CardId> {
        let definition = self.variants.require(variant)?;
        if !definition.playable {
            return Err(EngineError::UnknownVariant(definition.key.clone()));
        }

        let id = self.next_card;
        self.next_card = id.next();
        let card = CardInstance::new(id, definition, owner);
        debug!(%id, name = %card.name, %owner, "card created");
        self.cards.insert(id, card);
        Ok(id)
    }

    /// Create a card by variant key and put it at the bottom of `owner`'s deck.
    pub fn deal(&mut self, owner: PlayerId, key: &str) -> EngineResult<CardId> {
        let variant = self
            .variants
            .by_key(key)
            .ok_or_else(|| EngineError::UnknownVariant(key.to_string()))?;
        let id = self.create_card(owner, variant)?;
        self.seats[owner].deck.push_back(id);
        Ok(id)
    }

    /// Create a card by variant key and put it straight into play.
    pub fn summon(&mut self, owner: PlayerId, key: &str) -> EngineResult<CardId> {
        let variant = self
            .variants
            .by_key(key)
            .ok_or_else(|| EngineError::UnknownVariant(key.to_string()))?;
        let id = self.create_card(owner, variant)?;
        self.put_into_play(id)?;
        Ok(id)
    }

    /// Get a card.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&CardInstance> {
        self.cards.get(&id)
    }

    /// Get a card, or an error.
    pub fn require_card(&self, id: CardId) -> EngineResult<&CardInstance> {
        self.cards.get(&id).ok_or(EngineError::UnknownCard(id))
    }

    /// Get a mutable card.
    pub fn card_mut(&mut self, id: CardId) -> Option<&mut CardInstance> {
        self.cards.get_mut(&id)
    }

    /// Check if a card is on a table.
    #[must_use]
    pub fn in_play(&self, id: CardId) -> bool {
        self.card(id).is_some_and(CardInstance::in_play)
    }

    /// Current power of a card, if it exists.
    #[must_use]
    pub fn power(&self, id: CardId) -> Option<i64> {
        self.card(id).map(CardInstance::current_power)
    }

    /// A seat's table.
    #[must_use]
    pub fn table(&self, player: PlayerId) -> &[Option<CardId>] {
        &self.seats[player].table
    }

    /// Remaining hero power of a seat.
    #[must_use]
    pub fn hero_power(&self, player: PlayerId) -> i64 {
        self.seats[player].hero_power
    }

    /// The card across the table from `id`, if any.
    #[must_use]
    pub fn opposite_card(&self, id: CardId) -> Option<CardId> {
        let card = self.card(id)?;
        let slot = card.slot()?;
        self.table(card.owner.opponent()).get(slot).copied().flatten()
    }

    /// The first occupied slot on a seat's table.
    #[must_use]
    pub fn first_in_play(&self, player: PlayerId) -> Option<CardId> {
        self.seats[player].cards_in_play().next()
    }

    // === Lifecycle ===

    /// Put a card into the first empty slot of its owner's table.
    ///
    /// Runs the enter-play lifecycle. Returns the slot.
    pub fn put_into_play(&mut self, id: CardId) -> EngineResult<usize> {
        let card = self.require_card(id)?;
        if let Some(slot) = card.slot() {
            return Ok(slot);
        }
        let owner = card.owner;
        let variant = card.variant;

        self.seats[owner].deck.retain(|&queued| queued != id);
        let slot = self.seats[owner]
            .first_empty_slot()
            .ok_or(EngineError::TableFull(owner))?;
        self.seats[owner].table[slot] = Some(id);
        if let Some(card) = self.cards.get_mut(&id) {
            card.set_slot(Some(slot));
        }

        for key in self.variants.population_keys(variant) {
            self.population.enter(key);
        }
        info!(%id, %owner, slot, "card entered play");
        self.request_redraw();
        Ok(slot)
    }

    /// Take a card off the table.
    ///
    /// Runs the leave-play lifecycle. Returns `false` (and does nothing) if
    /// the card was not in play, so a removal can never be counted twice.
    pub fn remove_from_play(&mut self, id: CardId) -> bool {
        let Some(card) = self.cards.get_mut(&id) else {
            return false;
        };
        let Some(slot) = card.slot() else {
            return false;
        };
        card.set_slot(None);
        let owner = card.owner;
        let variant = card.variant;

        if self.seats[owner].table.get(slot) == Some(&Some(id)) {
            self.seats[owner].table[slot] = None;
        }
        for key in self.variants.population_keys(variant) {
            self.population.leave(key);
        }
        info!(%id, %owner, slot, "card left play");
        self.request_redraw();
        true
    }

    // === Damage ===

    /// Find the hook a card uses for `kind`.
    ///
    /// The card's own overrides come first, then its variant chain.
    #[must_use]
    pub fn hook_for(&self, id: CardId, kind: HookKind) -> Option<Hook> {
        let card = self.card(id)?;
        card.overrides
            .get(kind)
            .or_else(|| self.variants.lookup_hook(card.variant, kind).map(|(_, hook)| hook))
    }

    /// Subtract damage from a card. A card reaching zero leaves play.
    ///
    /// Returns `true` if the card was removed.
    pub fn damage_card(&mut self, id: CardId, amount: i64) -> bool {
        let Some(card) = self.cards.get_mut(&id) else {
            return false;
        };
        if amount <= 0 {
            return false;
        }
        let dead = card.take_damage(amount);
        debug!(%id, amount, power = card.current_power(), "card damaged");
        self.request_redraw();
        dead && self.remove_from_play(id)
    }

    /// Subtract damage from a hero, floored at zero.
    pub fn damage_hero(&mut self, player: PlayerId, amount: i64) {
        if amount <= 0 {
            return;
        }
        let seat = &mut self.seats[player];
        seat.hero_power = (seat.hero_power - amount).max(0);
        debug!(%player, amount, power = seat.hero_power, "hero damaged");
        self.request_redraw();
    }

    // === Hook theft ===

    /// Move hooks from the victim's variant table to the thief's own table.
    ///
    /// Only the victim variant's own table is touched, never its ancestors'
    /// and never the victim instance's overrides. Every instance of that
    /// variant loses the hooks. Returns the kinds that moved.
    pub fn steal_hooks(
        &mut self,
        thief: CardId,
        victim: CardId,
        kinds: &[HookKind],
    ) -> EngineResult<SmallVec<[HookKind; 3]>> {
        self.require_card(thief)?;
        let victim_variant = self.require_card(victim)?.variant;

        let mut stolen = SmallVec::new();
        for &kind in kinds {
            if let Some(hook) = self.variants.take_hook(victim_variant, kind) {
                if let Some(card) = self.cards.get_mut(&thief) {
                    card.overrides.insert(kind, hook);
                }
                stolen.push(kind);
            }
        }

        info!(%thief, %victim, variant = %victim_variant, ?stolen, "hooks stolen");
        self.request_redraw();
        Ok(stolen)
    }

    // === View ===

    /// Describe a card's variant.
    pub fn describe(&self, id: CardId) -> EngineResult<Vec<String>> {
        let card = self.require_card(id)?;
        Ok(describe(&self.variants, card.variant))
    }

    /// Ask for the view to be redrawn at the next opportunity.
    pub fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    /// Consume a pending redraw request.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::standard_registry;

    fn board() -> Board {
        let (registry, _) = standard_registry().unwrap();
        Board::new(BattleConfig::default().with_table_size(3), registry)
    }

    #[test]
    fn test_new_board() {
        let board = board();
        for player in PlayerId::all() {
            assert_eq!(board.hero_power(player), 10);
            assert_eq!(board.table(player).len(), 3);
            assert!(board.table(player).iter().all(Option::is_none));
        }
    }

    #[test]
    fn test_deal_goes_to_deck() {
        let mut board = board();
        let duck = board.deal(PlayerId::FIRST, "duck").unwrap();

        assert_eq!(board.seats[PlayerId::FIRST].deck, VecDeque::from([duck]));
        assert!(!board.in_play(duck));
        assert_eq!(board.power(duck), Some(2));
    }

    #[test]
    fn test_unknown_and_abstract_variants_rejected() {
        let mut board = board();
        assert!(matches!(
            board.deal(PlayerId::FIRST, "dragon"),
            Err(EngineError::UnknownVariant(_))
        ));
        assert!(matches!(
            board.deal(PlayerId::FIRST, "creature"),
            Err(EngineError::UnknownVariant(_))
        ));
    }

    #[test]
    fn test_put_into_play_fills_first_empty_slot() {
        let mut board = board();
        let a = board.summon(PlayerId::FIRST, "duck").unwrap();
        let b = board.summon(PlayerId::FIRST, "dog").unwrap();

        assert_eq!(board.table(PlayerId::FIRST), &[Some(a), Some(b), None]);

        board.remove_from_play(a);
        let c = board.summon(PlayerId::FIRST, "duck").unwrap();
        assert_eq!(board.table(PlayerId::FIRST), &[Some(c), Some(b), None]);
    }

    #[test]
    fn test_full_table() {
        let mut board = board();
        for _ in 0..3 {
            board.summon(PlayerId::SECOND, "duck").unwrap();
        }
        assert_eq!(
            board.summon(PlayerId::SECOND, "duck"),
            Err(EngineError::TableFull(PlayerId::SECOND))
        );
    }

    #[test]
    fn test_opposite_card() {
        let mut board = board();
        let ours = board.summon(PlayerId::FIRST, "duck").unwrap();
        assert_eq!(board.opposite_card(ours), None);

        let theirs = board.summon(PlayerId::SECOND, "dog").unwrap();
        assert_eq!(board.opposite_card(ours), Some(theirs));
        assert_eq!(board.opposite_card(theirs), Some(ours));
    }

    #[test]
    fn test_removal_runs_once() {
        let (registry, std) = standard_registry().unwrap();
        let mut board = Board::new(BattleConfig::default(), registry);
        let lad = board.summon(PlayerId::FIRST, "lad").unwrap();
        assert_eq!(board.population.count(std.lad), 1);

        assert!(board.remove_from_play(lad));
        assert!(!board.remove_from_play(lad));
        assert_eq!(board.population.count(std.lad), 0);
    }

    #[test]
    fn test_damage_to_zero_removes() {
        let mut board = board();
        let duck = board.summon(PlayerId::FIRST, "duck").unwrap();

        assert!(!board.damage_card(duck, 1));
        assert_eq!(board.power(duck), Some(1));

        assert!(board.damage_card(duck, 4));
        assert_eq!(board.power(duck), Some(0));
        assert!(!board.in_play(duck));
        assert!(board.table(PlayerId::FIRST).iter().all(Option::is_none));
    }

    #[test]
    fn test_hero_damage_floors() {
        let mut board = board();
        board.damage_hero(PlayerId::SECOND, 25);
        assert_eq!(board.hero_power(PlayerId::SECOND), 0);
    }

    #[test]
    fn test_hook_for_prefers_overrides() {
        let mut board = board();
        let duck = board.summon(PlayerId::FIRST, "duck").unwrap();
        let brute = board.summon(PlayerId::SECOND, "trasher").unwrap();

        assert_eq!(board.hook_for(duck, HookKind::Taken), None);
        assert_eq!(
            board.hook_for(brute, HookKind::Taken),
            Some(Hook::Reduce { amount: 1, signal: true })
        );

        let custom = Hook::Reduce { amount: 3, signal: false };
        board.card_mut(duck).unwrap().overrides.insert(HookKind::Taken, custom);
        assert_eq!(board.hook_for(duck, HookKind::Taken), Some(custom));
    }

    #[test]
    fn test_redraw_flag() {
        let mut board = board();
        assert!(!board.take_redraw());
        board.summon(PlayerId::FIRST, "duck").unwrap();
        assert!(board.take_redraw());
        assert!(!board.take_redraw());
    }
}
