//! Unified error handling.
//!
//! Provides a unified `AppError` type for everything the storefront can
//! surface to a shopper. Front ends should show `user_message()` and log
//! the full `Display` form.

use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalogue could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Key-value store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout failed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Product not in the catalogue.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Message safe to show the shopper.
    ///
    /// Storage and parse failures are reported generically; details stay in
    /// the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(err) => format!("The shop is misconfigured: {err}"),
            Self::Catalog(_) => "The product catalogue is unavailable".to_string(),
            Self::Storage(_) => "Your changes could not be saved, please try again".to_string(),
            Self::Cart(err) => match err {
                CartError::Storage(_) | CartError::Serialization(_) => {
                    "Your cart could not be saved, please try again".to_string()
                }
                _ => err.to_string(),
            },
            Self::Checkout(err) => match err {
                CheckoutError::Cart(_) => {
                    "Your order was prepared but the cart could not be updated".to_string()
                }
                CheckoutError::MissingDestination => {
                    "Checkout is not available for this shop".to_string()
                }
                CheckoutError::EmptyCart => err.to_string(),
            },
            Self::NotFound(id) => format!("Product {id} was not found"),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("p-123".to_string());
        assert_eq!(err.to_string(), "Not found: p-123");

        let err = AppError::Checkout(CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "Checkout error: Your cart is empty");
    }

    #[test]
    fn test_user_message_hides_storage_details() {
        let err = AppError::Storage(StorageError::Io {
            path: "/var/secret/storage.json".into(),
            source: std::io::Error::other("disk full"),
        });
        let message = err.user_message();
        assert!(!message.contains("/var/secret"));
        assert!(!message.contains("disk full"));
    }

    #[test]
    fn test_user_message_empty_cart() {
        let err = AppError::from(CheckoutError::EmptyCart);
        assert_eq!(err.user_message(), "Your cart is empty");
    }

    #[test]
    fn test_user_message_not_found() {
        let err = AppError::NotFound("p9".to_string());
        assert_eq!(err.user_message(), "Product p9 was not found");
    }
}
