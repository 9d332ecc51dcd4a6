//! Catalogue listing and product detail.

use vitrina_storefront::{AppState, Result, views};

/// Every product, one per line.
pub fn list(state: &AppState) -> String {
    if state.catalog().is_empty() {
        return "The catalogue is empty.".to_string();
    }
    views::render_products(state.catalog(), state.config().currency)
}

/// Detail view for one product.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown id.
pub fn show(state: &AppState, id: &str) -> Result<String> {
    let (product, details) = state.product(id)?;
    Ok(views::render_product(
        product,
        details,
        state.config().currency,
    ))
}
