//! Playable games built on the engine.

pub mod duel;
