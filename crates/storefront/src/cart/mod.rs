//! Persistent shopping cart.
//!
//! [`CartService`] owns the ordered line items and is the only thing allowed
//! to change them. Every mutation is written through to the key-value store
//! before it becomes visible in memory: the next state is built on a copy,
//! the copy is persisted, and only then does it replace the current items.
//! A failed write therefore leaves the cart exactly as last saved.
//!
//! Totals and counts are recomputed from the line items on every call. A
//! change whose total would not fit in a `Decimal` is refused, so every
//! stored cart has a representable total.

mod snapshot;

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use vitrina_core::{CartState, CurrencyCode, ProductId};

use crate::catalog::Product;
use crate::storage::{CART_KEY, KeyValueStore, StorageError};

/// One cart row: a product and how many units of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Always at least 1 while the line is in a cart.
    pub quantity: u32,
}

impl CartLineItem {
    /// `unit_price * quantity`, saturating at `Decimal::MAX`.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.checked_subtotal().unwrap_or(Decimal::MAX)
    }

    /// `unit_price * quantity`, or `None` if it overflows.
    #[must_use]
    pub fn checked_subtotal(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }
}

/// Sum of line subtotals.
///
/// On overflow returns the id of the line that pushed the total out of range.
fn checked_total(items: &[CartLineItem]) -> Result<Decimal, &ProductId> {
    items.iter().try_fold(Decimal::ZERO, |total, item| {
        item.checked_subtotal()
            .and_then(|subtotal| total.checked_add(subtotal))
            .ok_or(&item.id)
    })
}

/// What a cart operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
    /// A new line was appended with quantity 1.
    Added,
    /// An existing line now has `quantity` units.
    Updated { quantity: u32 },
    /// The line was removed.
    Removed,
    /// No line with that id; nothing changed.
    Missing,
    /// Every line was removed.
    Cleared,
}

/// Cart errors.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Negative price for {0}")]
    NegativePrice(ProductId),
    #[error("Quantity limit reached for {0}")]
    QuantityOverflow(ProductId),
    #[error("Cart total is too large after changing {0}")]
    AmountOverflow(ProductId),
}

/// The cart service.
pub struct CartService {
    store: Arc<dyn KeyValueStore>,
    currency: CurrencyCode,
    items: Vec<CartLineItem>,
}

impl std::fmt::Debug for CartService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartService")
            .field("currency", &self.currency)
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl CartService {
    /// Load the saved cart from `store`.
    ///
    /// Never fails: a missing snapshot, an unreadable store, or a snapshot
    /// that does not parse or breaks a cart invariant all start an empty
    /// cart (the last two are logged).
    #[must_use]
    pub fn load(store: Arc<dyn KeyValueStore>, currency: CurrencyCode) -> Self {
        let items = match store.get(CART_KEY) {
            Ok(Some(raw)) => snapshot::decode(&raw, currency).unwrap_or_else(|e| {
                warn!(error = %e, "Discarding unreadable cart snapshot");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Cart storage unavailable, starting empty");
                Vec::new()
            }
        };

        debug!(lines = items.len(), "Cart loaded");
        Self {
            store,
            currency,
            items,
        }
    }

    /// Line items in the order they were first added.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id.as_str() == id)
    }

    #[must_use]
    pub fn state(&self) -> CartState {
        CartState::for_line_count(self.items.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Sum of `unit_price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> Decimal {
        checked_total(&self.items).unwrap_or(Decimal::MAX)
    }

    /// Sum of quantities (the badge count, not the number of lines).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |count, item| count.saturating_add(item.quantity))
    }

    /// Add one unit of a product.
    ///
    /// Increments the existing line if the id is already in the cart,
    /// otherwise appends a new line with quantity 1. The unit price is
    /// rounded to the cart currency's minor units.
    ///
    /// # Errors
    ///
    /// Returns an error if the price is negative, the quantity or the cart
    /// total would overflow, or the store write fails.
    #[instrument(skip(self, name, image))]
    pub fn add_item(
        &mut self,
        id: ProductId,
        name: &str,
        unit_price: Decimal,
        image: Option<&str>,
    ) -> Result<LineChange, CartError> {
        if unit_price.is_sign_negative() && !unit_price.is_zero() {
            return Err(CartError::NegativePrice(id));
        }

        if self.get(id.as_str()).is_some() {
            return self.increment_item(id.as_str());
        }

        let mut next = self.items.clone();
        next.push(CartLineItem {
            id,
            name: name.to_string(),
            unit_price: self.currency.round(unit_price),
            image: image.map(str::to_string),
            quantity: 1,
        });
        self.commit(next)?;
        Ok(LineChange::Added)
    }

    /// Add one unit of a catalogue product.
    ///
    /// # Errors
    ///
    /// See [`CartService::add_item`].
    pub fn add_product(&mut self, product: &Product) -> Result<LineChange, CartError> {
        self.add_item(
            product.id.clone(),
            &product.title,
            product.price,
            product.image.as_deref(),
        )
    }

    /// Add one unit to an existing line. Unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the quantity or the cart total would overflow, or
    /// the store write fails.
    #[instrument(skip(self))]
    pub fn increment_item(&mut self, id: &str) -> Result<LineChange, CartError> {
        let Some(index) = self.position(id) else {
            return Ok(LineChange::Missing);
        };

        let mut next = self.items.clone();
        let Some(line) = next.get_mut(index) else {
            return Ok(LineChange::Missing);
        };
        line.quantity = line
            .quantity
            .checked_add(1)
            .ok_or_else(|| CartError::QuantityOverflow(line.id.clone()))?;
        let quantity = line.quantity;

        self.commit(next)?;
        Ok(LineChange::Updated { quantity })
    }

    /// Remove one unit from a line, dropping the line when it reaches zero.
    /// Unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    #[instrument(skip(self))]
    pub fn decrement_item(&mut self, id: &str) -> Result<LineChange, CartError> {
        let Some(index) = self.position(id) else {
            return Ok(LineChange::Missing);
        };

        let mut next = self.items.clone();
        let Some(line) = next.get_mut(index) else {
            return Ok(LineChange::Missing);
        };
        let change = if line.quantity > 1 {
            line.quantity -= 1;
            LineChange::Updated {
                quantity: line.quantity,
            }
        } else {
            next.remove(index);
            LineChange::Removed
        };

        self.commit(next)?;
        Ok(change)
    }

    /// Remove a line regardless of quantity. Unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, id: &str) -> Result<LineChange, CartError> {
        let Some(index) = self.position(id) else {
            return Ok(LineChange::Missing);
        };

        let mut next = self.items.clone();
        next.remove(index);
        self.commit(next)?;
        Ok(LineChange::Removed)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> Result<LineChange, CartError> {
        self.commit(Vec::new())?;
        Ok(LineChange::Cleared)
    }

    /// Write the current line items to the store.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the store write fails.
    pub fn save(&self) -> Result<(), CartError> {
        self.persist(&self.items)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id.as_str() == id)
    }

    fn persist(&self, items: &[CartLineItem]) -> Result<(), CartError> {
        let json = snapshot::encode(items)?;
        self.store.set(CART_KEY, &json)?;
        Ok(())
    }

    fn commit(&mut self, next: Vec<CartLineItem>) -> Result<(), CartError> {
        if let Err(id) = checked_total(&next) {
            return Err(CartError::AmountOverflow(id.clone()));
        }
        self.persist(&next)?;
        self.items = next;
        debug!(
            lines = self.items.len(),
            units = self.item_count(),
            total = %self.total(),
            "Cart updated"
        );
        Ok(())
    }
}
