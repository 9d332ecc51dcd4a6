//! Checkout.

use vitrina_core::Price;
use vitrina_storefront::{AppState, Result};

/// Build the order message, print it with the deep link, and empty the cart.
///
/// # Errors
///
/// Returns a checkout error if the cart is empty, no destination is
/// configured, or the cart cannot be cleared.
pub fn run(state: &mut AppState) -> Result<String> {
    let receipt = state.checkout()?;
    let total = Price::new(receipt.total, state.config().currency);

    tracing::info!(url = %receipt.url, "Order link ready");

    Ok(format!(
        "{}\n\nOpen this link to send your order ({} items, {total}):\n{}",
        receipt.message, receipt.item_count, receipt.url
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vitrina_storefront::AppError;
    use vitrina_storefront::checkout::CheckoutError;

    use super::*;
    use crate::commands::{cart, fixtures};

    #[test]
    fn test_checkout_prints_message_and_link() {
        let mut state = fixtures::state();
        cart::add(&mut state, "p2").unwrap();
        cart::add(&mut state, "p2").unwrap();

        let output = run(&mut state).unwrap();
        assert!(output.contains("- Blue Case x2 @ €12.50 = €25.00"));
        assert!(output.contains("(2 items, €25.00)"));
        assert!(output.ends_with(
            "https://wa.me/56912345678?text=Hello%21%20I%20would%20like%20to%20place%20\
             the%20following%20order%3A%0A%0A-%20Blue%20Case%20x2%20%40%20%E2%82%AC12.50%20\
             %3D%20%E2%82%AC25.00%0A%0ATotal%3A%20%E2%82%AC25.00"
        ));
        assert!(state.cart().is_empty());
    }

    #[test]
    fn test_checkout_empty_cart() {
        let mut state = fixtures::state();
        assert!(matches!(
            run(&mut state),
            Err(AppError::Checkout(CheckoutError::EmptyCart))
        ));
    }
}
