//! Card system: variants, instances, population counters, descriptions.
//!
//! ## Key Types
//!
//! - `VariantId` / `VariantDefinition`: one layer of shared card behaviour
//! - `VariantRegistry`: all layers plus their shared hook tables
//! - `CardInstance`: runtime card state (power, slot, own hooks)
//! - `PopulationRegistry`: live-instance counts per variant
//!
//! ## Two-Level Hooks
//!
//! A card's hook for a damage event is found by checking its own override
//! table first, then its variant's table, then each ancestor's table.
//! Variant tables are shared, so changing one changes every card of that
//! variant, present and future.

pub mod variant;
pub mod registry;
pub mod instance;
pub mod population;
pub mod catalog;
pub mod describe;

pub use variant::{Ability, AttackStyle, BeforeAttack, Capabilities, Capability, VariantDefinition, VariantId};
pub use registry::VariantRegistry;
pub use instance::CardInstance;
pub use population::{triangular, PopulationRegistry};
pub use catalog::{register_standard, standard_registry, StandardVariants, GATLING_DAMAGE};
pub use describe::{creature_description, describe};
