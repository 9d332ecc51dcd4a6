//! Integration tests for Vitrina.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vitrina-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `search` - Catalogue search, snippets and highlighting
//! - `cart_persistence` - Cart and history surviving a restart
//! - `checkout` - Order message, deep link and cart clearing
//!
//! Every test runs against a catalogue and store written to a fresh
//! temporary directory, so tests never share state.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use tempfile::TempDir;
use vitrina_core::{CurrencyCode, PhoneNumber};
use vitrina_storefront::checkout::CheckoutDestination;
use vitrina_storefront::config::StorefrontConfig;

/// Catalogue used across the integration tests.
pub const CATALOG_YAML: &str = r#"
products:
  - id: p1
    title: Red Phone
    description: Compact 5G handset with a 4500 mAh battery
    tags: [phone, 5g]
    price: 199.90
    image: img/red-phone.jpg
    details:
      summary: A small phone with a big battery.
      features:
        - Dual SIM
        - USB-C
      specs:
        - label: Battery
          value: 4500 mAh
  - id: p2
    title: Blue Case
    description: Silicone case for the Red Phone
    tags: [case, accessory]
    price: 12.50
  - id: p3
    title: C++ Primer (5th ed.)
    description: A book about c++ programming
    tags: [book]
    price: 45
"#;

/// A temporary shop: catalogue file, store path and matching config.
///
/// The directory is deleted when the value is dropped.
pub struct TestShop {
    _dir: TempDir,
    pub config: StorefrontConfig,
}

impl TestShop {
    /// Create a shop with [`CATALOG_YAML`], EUR prices and a checkout phone.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory or catalogue file cannot be created.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let catalog_path = dir.path().join("catalog.yaml");
        std::fs::write(&catalog_path, CATALOG_YAML).unwrap();

        let config = StorefrontConfig {
            catalog_path,
            storage_path: dir.path().join("state").join("storage.json"),
            currency: CurrencyCode::EUR,
            checkout: Some(CheckoutDestination::new(
                "https://wa.me/",
                PhoneNumber::parse("+56 9 1234 5678").unwrap(),
            )),
            ..StorefrontConfig::default()
        };

        Self { _dir: dir, config }
    }

    /// Same shop without a checkout destination.
    #[must_use]
    pub fn without_checkout() -> Self {
        let mut shop = Self::new();
        shop.config.checkout = None;
        shop
    }

    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.config.storage_path.clone()
    }
}

impl Default for TestShop {
    fn default() -> Self {
        Self::new()
    }
}
