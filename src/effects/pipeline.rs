//! The damage resolution pipeline.
//!
//! One damage event runs through a fixed sequence:
//!
//! 1. The attacker's outgoing hook (`DealtToCreature` or `DealtToPlayer`)
//! 2. The defender's `Taken` hook (creature targets only)
//! 3. The final value is subtracted from the target, floored at zero
//!
//! Either hook may ask the view to signal its ability first. The pipeline
//! then suspends with the transformed value held in its phase and carries
//! on from the next stage when polled again.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::hook::{apply_hook, HookKind, HookOutcome};
use crate::core::{Board, CardId, PlayerId};
use crate::stack::{AckRequest, Step, StepStatus};

/// What a damage event is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageTarget {
    Creature(CardId),
    Hero(PlayerId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// Nothing has run yet.
    Start,
    /// The outgoing hook produced this value.
    Dealt(i64),
    /// The incoming hook produced this value.
    Taken(i64),
    Finished,
}

/// A single damage event, resolved as a step.
///
/// ## Example
///
/// ```
/// use card_battler::cards::standard_registry;
/// use card_battler::core::{BattleConfig, Board, PlayerId};
/// use card_battler::effects::DamageResolution;
/// use card_battler::stack::{Step, StepStatus};
///
/// let (registry, _) = standard_registry().unwrap();
/// let mut board = Board::new(BattleConfig::default(), registry);
/// let duck = board.summon(PlayerId::FIRST, "duck").unwrap();
/// let dog = board.summon(PlayerId::SECOND, "dog").unwrap();
///
/// let mut bite = DamageResolution::to_creature(dog, duck, 1);
/// assert_eq!(bite.poll(&mut board), StepStatus::Done);
/// assert_eq!(board.power(duck), Some(1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DamageResolution {
    source: CardId,
    target: DamageTarget,
    raw: i64,
    phase: Phase,
    applied: Option<i64>,
}

impl DamageResolution {
    /// Damage from `source` aimed at `target`.
    #[must_use]
    pub fn new(source: CardId, target: DamageTarget, raw: i64) -> Self {
        Self {
            source,
            target,
            raw: raw.max(0),
            phase: Phase::Start,
            applied: None,
        }
    }

    /// Damage from `source` aimed at the creature `target`.
    #[must_use]
    pub fn to_creature(source: CardId, target: CardId, raw: i64) -> Self {
        Self::new(source, DamageTarget::Creature(target), raw)
    }

    /// Damage from `source` aimed at `player`'s hero.
    #[must_use]
    pub fn to_hero(source: CardId, player: PlayerId, raw: i64) -> Self {
        Self::new(source, DamageTarget::Hero(player), raw)
    }

    /// The attacking card.
    #[must_use]
    pub fn source(&self) -> CardId {
        self.source
    }

    /// What the damage is aimed at.
    #[must_use]
    pub fn target(&self) -> DamageTarget {
        self.target
    }

    /// Damage before any hook.
    #[must_use]
    pub fn raw(&self) -> i64 {
        self.raw
    }

    /// The final value, once applied. `None` if the event fizzled or has
    /// not finished.
    #[must_use]
    pub fn applied(&self) -> Option<i64> {
        self.applied
    }

    /// Check if the pipeline has run to completion.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    fn outgoing_kind(&self) -> HookKind {
        match self.target {
            DamageTarget::Creature(_) => HookKind::DealtToCreature,
            DamageTarget::Hero(_) => HookKind::DealtToPlayer,
        }
    }

    fn target_present(&self, board: &Board) -> bool {
        match self.target {
            DamageTarget::Creature(card) => board.in_play(card),
            DamageTarget::Hero(_) => true,
        }
    }

    fn finish(&mut self, applied: Option<i64>) -> StepStatus {
        self.phase = Phase::Finished;
        self.applied = applied;
        StepStatus::Done
    }
}

impl Step<Board> for DamageResolution {
    fn poll(&mut self, board: &mut Board) -> StepStatus {
        loop {
            match self.phase {
                Phase::Start => {
                    if !self.target_present(board) {
                        debug!(source = %self.source, target = ?self.target, "damage target gone");
                        return self.finish(None);
                    }
                    let hook = board.hook_for(self.source, self.outgoing_kind());
                    let outcome = apply_hook(hook, self.raw, &board.population);
                    debug!(source = %self.source, raw = self.raw, value = outcome.value(), "outgoing damage");
                    self.phase = Phase::Dealt(outcome.value());
                    if let HookOutcome::Signal(_) = outcome {
                        return StepStatus::Suspended(AckRequest::SignalAbility { card: self.source });
                    }
                }
                Phase::Dealt(value) => match self.target {
                    DamageTarget::Hero(player) => {
                        board.damage_hero(player, value);
                        return self.finish(Some(value));
                    }
                    DamageTarget::Creature(card) => {
                        let hook = board.hook_for(card, HookKind::Taken);
                        let outcome = apply_hook(hook, value, &board.population);
                        debug!(target = %card, value, taken = outcome.value(), "incoming damage");
                        self.phase = Phase::Taken(outcome.value());
                        if let HookOutcome::Signal(_) = outcome {
                            return StepStatus::Suspended(AckRequest::SignalAbility { card });
                        }
                    }
                },
                Phase::Taken(value) => {
                    let DamageTarget::Creature(card) = self.target else {
                        return self.finish(None);
                    };
                    if !board.in_play(card) {
                        return self.finish(None);
                    }
                    board.damage_card(card, value);
                    return self.finish(Some(value));
                }
                Phase::Finished => return StepStatus::Done,
            }
        }
    }

    fn label(&self) -> &'static str {
        "damage"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::standard_registry;
    use crate::core::BattleConfig;

    fn board() -> Board {
        let (registry, _) = standard_registry().unwrap();
        Board::new(BattleConfig::default(), registry)
    }

    #[test]
    fn test_plain_damage() {
        let mut board = board();
        let dog = board.summon(PlayerId::FIRST, "dog").unwrap();
        let other = board.summon(PlayerId::SECOND, "dog").unwrap();

        let mut step = DamageResolution::to_creature(dog, other, 2);
        assert_eq!(step.poll(&mut board), StepStatus::Done);
        assert_eq!(step.applied(), Some(2));
        assert_eq!(board.power(other), Some(1));
    }

    #[test]
    fn test_negative_raw_clamped() {
        let mut board = board();
        let dog = board.summon(PlayerId::FIRST, "dog").unwrap();
        let other = board.summon(PlayerId::SECOND, "dog").unwrap();

        let mut step = DamageResolution::to_creature(dog, other, -5);
        assert_eq!(step.raw(), 0);
        step.poll(&mut board);
        assert_eq!(board.power(other), Some(3));
    }

    #[test]
    fn test_signal_suspends_before_power_changes() {
        let mut board = board();
        let dog = board.summon(PlayerId::FIRST, "dog").unwrap();
        let brute = board.summon(PlayerId::SECOND, "trasher").unwrap();

        let mut step = DamageResolution::to_creature(dog, brute, 3);
        assert_eq!(
            step.poll(&mut board),
            StepStatus::Suspended(AckRequest::SignalAbility { card: brute })
        );
        assert_eq!(board.power(brute), Some(5));
        assert!(!step.is_finished());

        assert_eq!(step.poll(&mut board), StepStatus::Done);
        assert_eq!(board.power(brute), Some(3));
        assert_eq!(step.applied(), Some(2));
    }

    #[test]
    fn test_missing_target_fizzles() {
        let mut board = board();
        let dog = board.summon(PlayerId::FIRST, "dog").unwrap();
        let gone = board.summon(PlayerId::SECOND, "duck").unwrap();
        board.remove_from_play(gone);

        let mut step = DamageResolution::to_creature(dog, gone, 2);
        assert_eq!(step.poll(&mut board), StepStatus::Done);
        assert_eq!(step.applied(), None);
        assert_eq!(board.power(gone), Some(2));
    }

    #[test]
    fn test_hero_damage() {
        let mut board = board();
        let dog = board.summon(PlayerId::FIRST, "dog").unwrap();

        let mut step = DamageResolution::to_hero(dog, PlayerId::SECOND, 4);
        assert_eq!(step.poll(&mut board), StepStatus::Done);
        assert_eq!(board.hero_power(PlayerId::SECOND), 6);
    }

    #[test]
    fn test_polling_finished_step_is_inert() {
        let mut board = board();
        let dog = board.summon(PlayerId::FIRST, "dog").unwrap();

        let mut step = DamageResolution::to_hero(dog, PlayerId::SECOND, 4);
        step.poll(&mut board);
        step.poll(&mut board);
        assert_eq!(board.hero_power(PlayerId::SECOND), 6);
    }
}
