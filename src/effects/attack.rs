//! Attack planning.
//!
//! Planning is the targeting phase of an attack: it reads the attacker's
//! variant chain and the opposing table and turns them into the ordered
//! steps that resolve the attack. Each step is one animatable sub-effect.

use smallvec::SmallVec;
use tracing::{debug, warn};

use super::hook::HookKind;
use super::pipeline::DamageResolution;
use crate::cards::{AttackStyle, BeforeAttack};
use crate::core::{Board, CardId, EngineResult};
use crate::stack::{AckRequest, Step, StepStatus};

/// One sub-effect of an attack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BattleStep {
    /// Wait for the view to play the attack animation.
    ShowAttack { attacker: CardId, shown: bool },

    /// Take hooks from the variant of the first opposing card.
    StealHooks {
        thief: CardId,
        kinds: SmallVec<[HookKind; 3]>,
    },

    /// Resolve one damage event.
    Damage(DamageResolution),

    /// An empty opposing slot. Done immediately.
    EmptySlot { slot: usize },
}

impl BattleStep {
    /// The attack animation step for `attacker`.
    #[must_use]
    pub fn show_attack(attacker: CardId) -> Self {
        BattleStep::ShowAttack {
            attacker,
            shown: false,
        }
    }
}

impl Step<Board> for BattleStep {
    fn poll(&mut self, board: &mut Board) -> StepStatus {
        match self {
            BattleStep::ShowAttack { attacker, shown } => {
                if *shown {
                    StepStatus::Done
                } else {
                    *shown = true;
                    StepStatus::Suspended(AckRequest::ShowAttack { card: *attacker })
                }
            }
            BattleStep::StealHooks { thief, kinds } => {
                let Some(owner) = board.card(*thief).map(|card| card.owner) else {
                    return StepStatus::Done;
                };
                let Some(victim) = board.first_in_play(owner.opponent()) else {
                    debug!(%thief, "nothing to steal from");
                    return StepStatus::Done;
                };
                if let Err(error) = board.steal_hooks(*thief, victim, kinds) {
                    warn!(%thief, %victim, %error, "hook theft failed");
                }
                StepStatus::Done
            }
            BattleStep::Damage(resolution) => resolution.poll(board),
            BattleStep::EmptySlot { slot } => {
                debug!(slot = *slot, "empty slot");
                StepStatus::Done
            }
        }
    }

    fn label(&self) -> &'static str {
        match self {
            BattleStep::ShowAttack { .. } => "show-attack",
            BattleStep::StealHooks { .. } => "steal-hooks",
            BattleStep::Damage(_) => "damage",
            BattleStep::EmptySlot { .. } => "empty-slot",
        }
    }
}

/// Plan the steps of `attacker`'s attack.
///
/// A card that is not in play plans no steps, so its attack resolves
/// immediately with no effect.
pub fn plan_attack(board: &Board, attacker: CardId) -> EngineResult<Vec<BattleStep>> {
    let card = board.require_card(attacker)?;
    let Some(slot) = card.slot() else {
        debug!(%attacker, "attacker not in play");
        return Ok(Vec::new());
    };
    let opponent = card.owner.opponent();

    let mut steps = Vec::new();
    if let Some(BeforeAttack::StealHooks(kinds)) = board.variants.before_attack(card.variant) {
        steps.push(BattleStep::StealHooks {
            thief: attacker,
            kinds: kinds.clone(),
        });
    }

    steps.push(BattleStep::show_attack(attacker));
    match board.variants.attack_style(card.variant) {
        AttackStyle::Opposite => {
            let resolution = match board.table(opponent).get(slot).copied().flatten() {
                Some(target) => DamageResolution::to_creature(attacker, target, card.current_power()),
                None => DamageResolution::to_hero(attacker, opponent, board.config().player_damage),
            };
            steps.push(BattleStep::Damage(resolution));
        }
        AttackStyle::Sweep { damage } => {
            for (index, entry) in board.table(opponent).iter().enumerate() {
                steps.push(match entry {
                    Some(target) => BattleStep::Damage(DamageResolution::to_creature(attacker, *target, damage)),
                    None => BattleStep::EmptySlot { slot: index },
                });
            }
        }
    }

    debug!(%attacker, steps = steps.len(), "attack planned");
    Ok(steps)
}
