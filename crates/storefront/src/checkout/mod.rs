//! Checkout hand-off.
//!
//! Checkout turns the cart into an order message, URL-encodes it into a
//! messaging deep link (`https://wa.me/<phone>?text=<message>`), and empties
//! the cart. Opening the link is left to the presentation layer.
//!
//! The formatter only accepts [`OrderLines`], which cannot be built from an
//! empty slice, so an empty cart can never produce a message.

mod message;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, instrument};
use vitrina_core::PhoneNumber;

use crate::cart::{CartError, CartLineItem, CartService};

pub use message::{ORDER_GREETING, format_order_message};

/// A non-empty set of line items, ready to be formatted.
#[derive(Debug, Clone, Copy)]
pub struct OrderLines<'a>(&'a [CartLineItem]);

impl OrderLines<'_> {
    #[must_use]
    pub const fn items(&self) -> &[CartLineItem] {
        self.0
    }
}

/// Where order messages are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutDestination {
    /// Deep-link base, e.g. `https://wa.me`.
    pub base_url: String,
    pub phone: PhoneNumber,
}

impl CheckoutDestination {
    #[must_use]
    pub fn new(base_url: impl Into<String>, phone: PhoneNumber) -> Self {
        Self {
            base_url: base_url.into(),
            phone,
        }
    }

    /// Build the deep link carrying `message`.
    #[must_use]
    pub fn url_for(&self, message: &str) -> String {
        checkout_url(&self.base_url, &self.phone, message)
    }
}

/// `<base_url>/<phone>?text=<url-encoded message>`.
#[must_use]
pub fn checkout_url(base_url: &str, phone: &PhoneNumber, message: &str) -> String {
    format!(
        "{}/{}?text={}",
        base_url.trim_end_matches('/'),
        phone.as_str(),
        urlencoding::encode(message)
    )
}

/// The result of a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutReceipt {
    pub message: String,
    pub url: String,
    pub total: Decimal,
    pub item_count: u32,
}

/// Checkout errors.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,
    #[error("No checkout destination configured")]
    MissingDestination,
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),
}

/// Format the cart, build the deep link, and empty the cart.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] without touching anything if the
/// cart is empty, or a cart error if clearing the cart fails.
#[instrument(skip_all)]
pub fn checkout(
    cart: &mut CartService,
    destination: &CheckoutDestination,
) -> Result<CheckoutReceipt, CheckoutError> {
    let total = cart.total();
    let item_count = cart.item_count();

    let message = {
        let lines = OrderLines::new(cart.items())?;
        format_order_message(&lines, total, cart.currency())
    };
    let url = destination.url_for(&message);

    cart.clear()?;
    info!(%total, item_count, "Checkout completed");

    Ok(CheckoutReceipt {
        message,
        url,
        total,
        item_count,
    })
}
