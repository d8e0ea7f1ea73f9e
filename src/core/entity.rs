//! Card instance identification.
//!
//! Every card dealt into a battle gets a unique `CardId`. Ids are handed out
//! by the [`Board`](crate::core::Board) in allocation order and are never
//! reused, so an id still identifies the same card after it has left play.
//!
//! ```
//! use card_battler::core::CardId;
//!
//! let first = CardId::new(0);
//! assert_eq!(first.next(), CardId::new(1));
//! assert_eq!(format!("{}", first), "Card(0)");
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier of a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The ID allocated after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}
