//! Order message formatting.

use rust_decimal::Decimal;
use vitrina_core::{CurrencyCode, Price};

use super::{CheckoutError, OrderLines};

/// Opening line of every order message.
pub const ORDER_GREETING: &str = "Hello! I would like to place the following order:";

impl<'a> OrderLines<'a> {
    /// Wrap a non-empty slice of line items.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if `items` is empty.
    pub fn new(items: &'a [crate::cart::CartLineItem]) -> Result<Self, CheckoutError> {
        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        Ok(Self(items))
    }
}

/// Render the order summary sent to the messaging channel.
///
/// One line per item with name, quantity, unit price and subtotal, then the
/// grand total. The output depends only on the inputs.
#[must_use]
pub fn format_order_message(
    lines: &OrderLines<'_>,
    total: Decimal,
    currency: CurrencyCode,
) -> String {
    let money = |amount: Decimal| Price::new(amount, currency).display();

    let mut body = String::new();
    for item in lines.items() {
        body.push_str(&format!(
            "- {} x{} @ {} = {}\n",
            item.name,
            item.quantity,
            money(item.unit_price),
            money(item.subtotal()),
        ));
    }

    format!("{ORDER_GREETING}\n\n{body}\nTotal: {}", money(total))
}
