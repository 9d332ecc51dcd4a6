//! Status enums for storefront entities.

use serde::{Deserialize, Serialize};

/// Cart lifecycle state.
///
/// `Empty` is both the initial state and a valid terminal state; the cart
/// re-enters it on clear, on checkout completion, and when the last unit of
/// the last line item is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CartState {
    #[default]
    Empty,
    Populated,
}

impl CartState {
    /// Derive the state from the number of line items.
    #[must_use]
    pub const fn for_line_count(lines: usize) -> Self {
        if lines == 0 {
            Self::Empty
        } else {
            Self::Populated
        }
    }

    /// Returns `true` if the cart has no line items.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}
