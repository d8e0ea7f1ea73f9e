//! Two-seat duel: the turn controller around the effect engine.
//!
//! - Each seat starts with a hero and a deck of cards
//! - On your turn: put the top card of your deck on your table, then every
//!   card on your table attacks in slot order
//! - A hero reduced to 0 power loses
//!
//! Every animation the engine asks for is routed to a [`BattleView`]; the
//! duel waits until the view's ticket is acknowledged before continuing.

mod view;
mod battle;
mod game;

pub use view::{BattleView, RecordingView, ViewEvent};
pub use battle::{AttackPhase, AttackStatus, Battle};
pub use game::{Duel, DuelBuilder, DuelStatus, GameResult};
