//! Sequential step scheduling.
//!
//! Animated effects are broken into [`Step`]s that run strictly one at a
//! time. A step either finishes during a poll ([`StepStatus::Done`]) or
//! suspends on an external acknowledgment ([`StepStatus::Suspended`]).
//! A suspended step is polled again only after its [`AckTicket`] has been
//! acknowledged, so step *i + 1* never begins before step *i* is done.
//!
//! ## Example
//!
//! ```
//! use card_battler::core::CardId;
//! use card_battler::stack::{AckRequest, QueueStatus, StepQueue, StepStatus};
//!
//! let mut log: Vec<&'static str> = Vec::new();
//! let mut queue = StepQueue::new();
//!
//! queue.enqueue(|log: &mut Vec<&'static str>| {
//!     log.push("first");
//!     StepStatus::Done
//! });
//! let mut waited = false;
//! queue.enqueue(move |log: &mut Vec<&'static str>| {
//!     if !waited {
//!         waited = true;
//!         return StepStatus::Suspended(AckRequest::ShowAttack { card: CardId::new(0) });
//!     }
//!     log.push("second");
//!     StepStatus::Done
//! });
//!
//! let ticket = match queue.run(&mut log).unwrap() {
//!     QueueStatus::Suspended { ticket, .. } => ticket,
//!     QueueStatus::Complete => unreachable!(),
//! };
//! assert_eq!(log, vec!["first"]);
//!
//! let status = queue.acknowledge(&mut log, ticket).unwrap();
//! assert_eq!(status, QueueStatus::Complete);
//! assert_eq!(log, vec!["first", "second"]);
//! ```

mod queue;

pub use queue::StepQueue;

use serde::{Deserialize, Serialize};

use crate::core::CardId;

/// Ticket identifying one outstanding acknowledgment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AckTicket(pub u64);

impl AckTicket {
    /// Get the raw ticket value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for AckTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ack({})", self.0)
    }
}

/// What the view is asked to show before the engine may continue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AckRequest {
    /// Highlight a card whose ability just changed a damage value.
    SignalAbility { card: CardId },

    /// Play a card's attack animation.
    ShowAttack { card: CardId },
}

impl AckRequest {
    /// The card the request is about.
    #[must_use]
    pub fn card(&self) -> CardId {
        match self {
            AckRequest::SignalAbility { card } | AckRequest::ShowAttack { card } => *card,
        }
    }
}

/// Result of polling a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepStatus {
    /// The step has finished. The queue moves on to the next step.
    Done,

    /// The step cannot continue until the request is acknowledged.
    Suspended(AckRequest),
}

/// Status of a step queue after running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueStatus {
    /// Every enqueued step is done.
    Complete,

    /// The front step is waiting for `ticket` to be acknowledged.
    Suspended {
        ticket: AckTicket,
        request: AckRequest,
    },
}

impl QueueStatus {
    /// Check if the queue ran to completion.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, QueueStatus::Complete)
    }

    /// The outstanding ticket, if suspended.
    #[must_use]
    pub fn ticket(&self) -> Option<AckTicket> {
        match self {
            QueueStatus::Complete => None,
            QueueStatus::Suspended { ticket, .. } => Some(*ticket),
        }
    }
}

/// A unit of sequential work.
///
/// `poll` is called once when the step reaches the front of the queue and
/// once more after each acknowledgment of a suspension it returned. The
/// step is dropped as soon as it returns [`StepStatus::Done`], so it can
/// signal completion at most once.
pub trait Step<C> {
    /// Advance the step.
    fn poll(&mut self, ctx: &mut C) -> StepStatus;

    /// Short name used in logs.
    fn label(&self) -> &'static str {
        "step"
    }
}

impl<C, F> Step<C> for F
where
    F: FnMut(&mut C) -> StepStatus,
{
    fn poll(&mut self, ctx: &mut C) -> StepStatus {
        self(ctx)
    }
}
