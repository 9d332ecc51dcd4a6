//! Cart management.

use vitrina_storefront::cart::LineChange;
use vitrina_storefront::{AppState, Result, views};

/// Cart view with the badge count.
pub fn show(state: &AppState) -> String {
    views::render_cart(state.cart())
}

/// Add one unit of a catalogue product.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown id or a cart error if the
/// change cannot be saved.
pub fn add(state: &mut AppState, id: &str) -> Result<String> {
    let change = state.add_to_cart(id)?;
    Ok(report(state, id, change))
}

/// Increase a line's quantity by one.
///
/// # Errors
///
/// Returns a cart error if the change cannot be saved.
pub fn increment(state: &mut AppState, id: &str) -> Result<String> {
    let change = state.cart_mut().increment_item(id)?;
    Ok(report(state, id, change))
}

/// Decrease a line's quantity by one.
///
/// # Errors
///
/// Returns a cart error if the change cannot be saved.
pub fn decrement(state: &mut AppState, id: &str) -> Result<String> {
    let change = state.cart_mut().decrement_item(id)?;
    Ok(report(state, id, change))
}

/// Remove a line entirely.
///
/// # Errors
///
/// Returns a cart error if the change cannot be saved.
pub fn remove(state: &mut AppState, id: &str) -> Result<String> {
    let change = state.cart_mut().remove_item(id)?;
    Ok(report(state, id, change))
}

/// Empty the cart.
///
/// # Errors
///
/// Returns a cart error if the change cannot be saved.
pub fn clear(state: &mut AppState) -> Result<String> {
    let change = state.cart_mut().clear()?;
    Ok(report(state, "", change))
}

/// Status line for `change` followed by the cart view.
fn report(state: &AppState, id: &str, change: LineChange) -> String {
    let name = state
        .cart()
        .get(id)
        .map(|item| item.name.as_str())
        .or_else(|| state.catalog().get(id).map(|p| p.title.as_str()))
        .unwrap_or(id);

    let status = match change {
        LineChange::Added => format!("Added {name} to the cart."),
        LineChange::Updated { quantity } => format!("{name}: quantity {quantity}."),
        LineChange::Removed => format!("Removed {name} from the cart."),
        LineChange::Missing => format!("{name} is not in the cart."),
        LineChange::Cleared => "Cart cleared.".to_string(),
    };

    let badge = views::cart_badge(state.cart())
        .map_or_else(String::new, |count| format!(" [{count}]"));

    format!("{status}{badge}\n\n{}", views::render_cart(state.cart()))
}
