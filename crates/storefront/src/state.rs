//! Application state shared by every front end.

use std::sync::Arc;

use tracing::{info, warn};

use crate::cart::{CartService, LineChange};
use crate::catalog::{Catalog, Product, ProductDetails};
use crate::checkout::{self, CheckoutError, CheckoutReceipt};
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::search::{self, Debouncer, SearchHistory, SearchOutcome};
use crate::storage::{JsonFileStore, KeyValueStore};

/// Application state: catalogue, cart and search history over one store.
///
/// The cart and the history share the same [`KeyValueStore`] under
/// different keys.
pub struct AppState {
    config: StorefrontConfig,
    catalog: Catalog,
    store: Arc<dyn KeyValueStore>,
    cart: CartService,
    history: SearchHistory,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("products", &self.catalog.len())
            .field("cart", &self.cart)
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Load the catalogue and open the store named by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalogue cannot be read or the store file
    /// exists but cannot be read.
    pub fn open(config: StorefrontConfig) -> Result<Self> {
        let catalog = Catalog::load(&config.catalog_path, config.currency)?;
        let store: Arc<dyn KeyValueStore> =
            Arc::new(JsonFileStore::open(config.storage_path.clone())?);

        info!(
            products = catalog.len(),
            storage = %config.storage_path.display(),
            "Storefront opened"
        );
        Ok(Self::new(config, catalog, store))
    }

    /// Build state from already-loaded parts.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        catalog: Catalog,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let cart = CartService::load(Arc::clone(&store), config.currency);
        let history = SearchHistory::load(Arc::clone(&store), config.search.history_limit);

        Self {
            config,
            catalog,
            store,
            cart,
            history,
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    /// Get a reference to the product catalogue.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Get a reference to the backing store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    #[must_use]
    pub const fn cart(&self) -> &CartService {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartService {
        &mut self.cart
    }

    #[must_use]
    pub const fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub const fn history_mut(&mut self) -> &mut SearchHistory {
        &mut self.history
    }

    /// A debouncer for search-as-you-type, using the configured delay.
    #[must_use]
    pub const fn search_debouncer<T>(&self) -> Debouncer<T> {
        Debouncer::new(self.config.search.debounce)
    }

    /// Look up a product and its detail content.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no product has this id.
    pub fn product(&self, id: &str) -> Result<(&Product, Option<&ProductDetails>)> {
        let product = self
            .catalog
            .get(id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        Ok((product, self.catalog.details(id)))
    }

    /// Search the catalogue and remember the term.
    ///
    /// Empty input is not recorded. A history write failure is logged and
    /// does not affect the results.
    pub fn run_search(&mut self, raw: &str) -> SearchOutcome {
        let outcome = search::run(raw, self.catalog.products());

        if let SearchOutcome::NoMatches { term } | SearchOutcome::Matches { term, .. } = &outcome
            && let Err(e) = self.history.record(term)
        {
            warn!(error = %e, "Failed to save search history");
        }

        outcome
    }

    /// Add one unit of the catalogue product `id` to the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown id, or a cart error if the
    /// change cannot be saved.
    pub fn add_to_cart(&mut self, id: &str) -> Result<LineChange> {
        let product = self
            .catalog
            .get(id)
            .ok_or_else(|| AppError::NotFound(id.to_string()))?;
        Ok(self.cart.add_product(product)?)
    }

    /// Send the cart to the configured checkout destination.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if there is nothing to order,
    /// `CheckoutError::MissingDestination` if no phone number is configured,
    /// or a cart error if the cart cannot be cleared afterwards.
    pub fn checkout(&mut self) -> Result<CheckoutReceipt> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart.into());
        }
        let destination = self
            .config
            .checkout
            .as_ref()
            .ok_or(CheckoutError::MissingDestination)?;
        Ok(checkout::checkout(&mut self.cart, destination)?)
    }
}
