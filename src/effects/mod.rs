//! Damage effects: hooks, the resolution pipeline and attack planning.
//!
//! - `Hook` / `HookTable`: per-event damage transformations
//! - `DamageResolution`: attacker hook, then defender hook, then apply
//! - `plan_attack`: turns a card's attack into ordered `BattleStep`s

mod hook;
mod pipeline;
mod attack;

pub use hook::{apply_hook, Hook, HookKind, HookOutcome, HookTable};
pub use pipeline::{DamageResolution, DamageTarget};
pub use attack::{plan_attack, BattleStep};
