//! The attack driver.
//!
//! `Battle` owns the board, the view and a step queue. An attack moves
//! through `Idle -> Targeting -> Resolving -> Resolved`: planning builds the
//! steps, the queue runs them, and every suspension is routed to the view
//! until the last step is done.

use tracing::{debug, info};

use super::view::BattleView;
use crate::core::{Board, CardId, EngineError, EngineResult};
use crate::effects::{plan_attack, BattleStep, DamageResolution, DamageTarget};
use crate::stack::{AckRequest, AckTicket, QueueStatus, StepQueue};

/// Where the current attack is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AttackPhase {
    /// No attack has started yet.
    #[default]
    Idle,
    /// Choosing targets and building steps.
    Targeting,
    /// Steps are running or waiting on the view.
    Resolving,
    /// The last attack is fully resolved.
    Resolved,
}

/// Result of starting or resuming an attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackStatus {
    /// Every step is done.
    Resolved,
    /// The view must acknowledge this ticket before anything else happens.
    Pending(AckTicket),
}

/// Runs attacks against a board and routes animations to a view.
pub struct Battle<V> {
    board: Board,
    view: V,
    queue: StepQueue<Board>,
    phase: AttackPhase,
    attacker: Option<CardId>,
}

impl<V: BattleView> Battle<V> {
    /// Create a battle over `board`.
    pub fn new(board: Board, view: V) -> Self {
        Self {
            board,
            view,
            queue: StepQueue::new(),
            phase: AttackPhase::Idle,
            attacker: None,
        }
    }

    /// The board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The board, mutably. Only safe to change between attacks.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// The view.
    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// The view, mutably.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Where the current attack is.
    #[must_use]
    pub fn phase(&self) -> AttackPhase {
        self.phase
    }

    /// The card whose attack is running or ran last.
    #[must_use]
    pub fn attacker(&self) -> Option<CardId> {
        self.attacker
    }

    /// The ticket the battle is waiting on, if any.
    #[must_use]
    pub fn outstanding(&self) -> Option<AckTicket> {
        self.queue.outstanding()
    }

    /// Start `attacker`'s attack.
    pub fn attack(&mut self, attacker: CardId) -> EngineResult<AttackStatus> {
        self.attack_then(attacker, |_| {})
    }

    /// Start `attacker`'s attack and call `on_resolved` once it has fully
    /// resolved. A card that is not in play resolves at once, with no effect.
    pub fn attack_then(
        &mut self,
        attacker: CardId,
        on_resolved: impl FnOnce(&mut Board) + 'static,
    ) -> EngineResult<AttackStatus> {
        self.ensure_idle()?;
        self.phase = AttackPhase::Targeting;
        let steps = match plan_attack(&self.board, attacker) {
            Ok(steps) => steps,
            Err(error) => {
                self.phase = AttackPhase::Idle;
                return Err(error);
            }
        };

        info!(%attacker, steps = steps.len(), "attack started");
        self.attacker = Some(attacker);
        for step in steps {
            self.queue.enqueue(step);
        }
        self.resolve(on_resolved)
    }

    /// Resolve a single damage event from `source` through the pipeline.
    pub fn strike(&mut self, source: CardId, target: DamageTarget, raw: i64) -> EngineResult<AttackStatus> {
        self.ensure_idle()?;
        self.board.require_card(source)?;
        if let DamageTarget::Creature(card) = target {
            self.board.require_card(card)?;
        }

        self.attacker = Some(source);
        self.queue.enqueue(BattleStep::Damage(DamageResolution::new(source, target, raw)));
        self.resolve(|_| {})
    }

    /// Acknowledge the outstanding ticket and continue.
    pub fn acknowledge(&mut self, ticket: AckTicket) -> EngineResult<AttackStatus> {
        let status = self.queue.acknowledge(&mut self.board, ticket)?;
        Ok(self.settle(status))
    }

    /// Acknowledge every request on the view's behalf until resolved.
    pub fn finish(&mut self, mut status: AttackStatus) -> EngineResult<()> {
        while let AttackStatus::Pending(ticket) = status {
            status = self.acknowledge(ticket)?;
        }
        Ok(())
    }

    /// Describe a card.
    pub fn describe(&self, card: CardId) -> EngineResult<Vec<String>> {
        self.board.describe(card)
    }

    fn ensure_idle(&self) -> EngineResult<()> {
        if self.phase == AttackPhase::Resolving || self.queue.is_suspended() {
            return Err(EngineError::AttackInProgress);
        }
        Ok(())
    }

    fn resolve(&mut self, on_resolved: impl FnOnce(&mut Board) + 'static) -> EngineResult<AttackStatus> {
        self.phase = AttackPhase::Resolving;
        let status = self.queue.run_then(&mut self.board, on_resolved)?;
        Ok(self.settle(status))
    }

    fn settle(&mut self, status: QueueStatus) -> AttackStatus {
        if self.board.take_redraw() {
            self.view.update_view(&self.board);
        }

        match status {
            QueueStatus::Complete => {
                debug!(attacker = ?self.attacker, "attack resolved");
                self.phase = AttackPhase::Resolved;
                AttackStatus::Resolved
            }
            QueueStatus::Suspended { ticket, request } => {
                if let Some(card) = self.board.card(request.card()) {
                    match request {
                        AckRequest::SignalAbility { .. } => self.view.signal_ability(ticket, card),
                        AckRequest::ShowAttack { .. } => self.view.show_attack(ticket, card),
                    }
                }
                AttackStatus::Pending(ticket)
            }
        }
    }
}
