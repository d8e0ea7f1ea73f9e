//! # card-battler
//!
//! Effect resolution engine for a two-player, turn-based card battler.
//!
//! ## Design Principles
//!
//! 1. **Sequential Steps**: Every visible effect is a step in a queue. A step
//!    either finishes or suspends until the view acknowledges it.
//!
//! 2. **Modifier Chains**: Damage flows through hooks contributed by the
//!    dealer and the receiver. Any hook may pause the chain for the view.
//!
//! 3. **Shared Variant Behavior**: Hooks live on variant tables shared by
//!    every instance, with per-instance overrides on top.
//!
//! ## Modules
//!
//! - `core`: Card and seat ids, configuration, RNG, errors, the board
//! - `stack`: The step queue and acknowledgment tickets
//! - `effects`: Damage hooks, the damage pipeline and attack planning
//! - `cards`: Variants, instances, population counts and the standard catalog
//! - `games`: The duel: battles, views and the turn controller

pub mod core;
pub mod stack;
pub mod effects;
pub mod cards;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    BattleConfig, Board, CardId, EngineError, EngineResult, GameRng, PlayerId, PlayerMap, Seat,
};

pub use crate::stack::{AckRequest, AckTicket, QueueStatus, Step, StepQueue, StepStatus};

pub use crate::effects::{
    plan_attack, BattleStep, DamageResolution, DamageTarget, Hook, HookKind, HookOutcome, HookTable,
};

pub use crate::cards::{
    describe, standard_registry, AttackStyle, CardInstance, PopulationRegistry, StandardVariants,
    VariantDefinition, VariantId, VariantRegistry,
};

pub use crate::games::duel::{
    Battle, BattleView, Duel, DuelBuilder, DuelStatus, GameResult, RecordingView, ViewEvent,
};
