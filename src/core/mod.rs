//! Core engine types: card ids, seats, configuration, RNG, errors, board.
//!
//! Everything here is independent of which card variants exist. Variants
//! and their behaviour live in [`crate::cards`] and [`crate::effects`].

pub mod entity;
pub mod player;
pub mod config;
pub mod rng;
pub mod error;
pub mod state;

pub use entity::CardId;
pub use player::{PlayerId, PlayerMap, SEAT_COUNT};
pub use config::BattleConfig;
pub use rng::GameRng;
pub use error::{EngineError, EngineResult};
pub use state::{Board, Seat};
