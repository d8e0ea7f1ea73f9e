//! The view boundary.
//!
//! The engine never waits on the view directly. When a step suspends, the
//! view is handed the request together with its [`AckTicket`]; once the
//! animation is over, whoever drives the battle acknowledges that ticket.

use crate::cards::CardInstance;
use crate::core::{Board, CardId};
use crate::stack::AckTicket;

/// Receives animation requests and redraw notifications.
pub trait BattleView {
    /// Highlight `card`'s ability. Acknowledge `ticket` when done.
    fn signal_ability(&mut self, ticket: AckTicket, card: &CardInstance);

    /// Play `card`'s attack animation. Acknowledge `ticket` when done.
    fn show_attack(&mut self, ticket: AckTicket, card: &CardInstance);

    /// Redraw after the board changed. Fire-and-forget.
    fn update_view(&mut self, _board: &Board) {}
}

/// Something a [`RecordingView`] was asked to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewEvent {
    SignalAbility { ticket: AckTicket, card: CardId },
    ShowAttack { ticket: AckTicket, card: CardId },
    Redraw,
}

/// A view that only records what it was asked to do.
#[derive(Clone, Debug, Default)]
pub struct RecordingView {
    events: Vec<ViewEvent>,
}

impl RecordingView {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[ViewEvent] {
        &self.events
    }

    /// Cards whose ability was signalled, in order.
    #[must_use]
    pub fn signalled(&self) -> Vec<CardId> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ViewEvent::SignalAbility { card, .. } => Some(*card),
                _ => None,
            })
            .collect()
    }

    /// Cards whose attack was shown, in order.
    #[must_use]
    pub fn attacks(&self) -> Vec<CardId> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ViewEvent::ShowAttack { card, .. } => Some(*card),
                _ => None,
            })
            .collect()
    }

    /// Number of redraws.
    #[must_use]
    pub fn redraws(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, ViewEvent::Redraw))
            .count()
    }

    /// Forget everything recorded.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl BattleView for RecordingView {
    fn signal_ability(&mut self, ticket: AckTicket, card: &CardInstance) {
        self.events.push(ViewEvent::SignalAbility { ticket, card: card.id });
    }

    fn show_attack(&mut self, ticket: AckTicket, card: &CardInstance) {
        self.events.push(ViewEvent::ShowAttack { ticket, card: card.id });
    }

    fn update_view(&mut self, _board: &Board) {
        self.events.push(ViewEvent::Redraw);
    }
}
