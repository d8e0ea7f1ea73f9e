//! Engine errors.
//!
//! The error surface is deliberately small. Running out of targets and
//! damage underflow are normal outcomes, not errors. What remains are
//! lookups of things that do not exist and violations of the
//! acknowledgment protocol.

use thiserror::Error;

use super::entity::CardId;
use super::player::PlayerId;
use crate::stack::AckTicket;

/// Errors returned by engine operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No card with this ID was ever dealt.
    #[error("unknown card {0}")]
    UnknownCard(CardId),

    /// No variant with this ID or key is registered.
    #[error("unknown variant {0}")]
    UnknownVariant(String),

    /// A variant with this key is already registered.
    #[error("variant `{0}` is already registered")]
    DuplicateVariant(String),

    /// An acknowledgment arrived for a ticket that is not outstanding.
    ///
    /// This covers acknowledging twice, acknowledging a stale ticket, and
    /// acknowledging when nothing is suspended.
    #[error("unexpected acknowledgment {received} (outstanding: {outstanding:?})")]
    UnexpectedAcknowledgment {
        received: AckTicket,
        outstanding: Option<AckTicket>,
    },

    /// The step queue is waiting for an acknowledgment and cannot be run.
    #[error("step queue is suspended on {0}")]
    QueueSuspended(AckTicket),

    /// Another attack has not yet resolved.
    #[error("an attack is already in progress")]
    AttackInProgress,

    /// A playable variant must start with positive power.
    #[error("variant `{0}` has no power")]
    PowerlessVariant(String),

    /// No seat with this index exists.
    #[error("no seat {0}")]
    InvalidSeat(u8),

    /// The seat's table has no empty slot.
    #[error("table of {0} is full")]
    TableFull(PlayerId),

    /// The duel has already been decided.
    #[error("the duel is over")]
    DuelOver,
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
