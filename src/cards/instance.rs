//! Card instances - runtime card state.
//!
//! `CardInstance` is one specific card dealt into a battle. It tracks the
//! mutable state the variant does not: current power, whether and where it
//! is in play, and the hooks it holds on its own (taken from other
//! variants).

use serde::{Deserialize, Serialize};

use super::variant::{VariantDefinition, VariantId};
use crate::core::{CardId, PlayerId};
use crate::effects::HookTable;

/// A card instance in a battle.
///
/// Power always stays within `0..=max_power`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique ID of this instance.
    pub id: CardId,

    /// The variant the card was dealt from.
    pub variant: VariantId,

    /// Display name, copied from the variant title.
    pub name: String,

    /// Seat the card belongs to.
    pub owner: PlayerId,

    /// Power the card was dealt with.
    pub max_power: i64,

    current_power: i64,

    /// Table slot while in play.
    slot: Option<usize>,

    /// Hooks held by this instance alone. Checked before the variant's.
    pub overrides: HookTable,

    /// Opaque handle owned by the view layer.
    pub image: Option<String>,
}

impl CardInstance {
    /// Create an instance at full power, not in play.
    #[must_use]
    pub fn new(id: CardId, variant: &VariantDefinition, owner: PlayerId) -> Self {
        Self {
            id,
            variant: variant.id,
            name: variant.title.clone(),
            owner,
            max_power: variant.power,
            current_power: variant.power,
            slot: None,
            overrides: HookTable::new(),
            image: None,
        }
    }

    /// Attach a view handle (builder pattern).
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Current power.
    #[must_use]
    pub fn current_power(&self) -> i64 {
        self.current_power
    }

    /// Check if the card is on a table.
    #[must_use]
    pub fn in_play(&self) -> bool {
        self.slot.is_some()
    }

    /// Table slot while in play.
    #[must_use]
    pub fn slot(&self) -> Option<usize> {
        self.slot
    }

    pub(crate) fn set_slot(&mut self, slot: Option<usize>) {
        self.slot = slot;
    }

    /// Lose `amount` power, floored at zero. Non-positive amounts are ignored.
    ///
    /// Returns `true` if the card is now at zero power.
    pub fn take_damage(&mut self, amount: i64) -> bool {
        if amount > 0 {
            self.current_power = (self.current_power - amount).max(0);
        }
        self.current_power == 0
    }
}
