//! Static product catalogue.
//!
//! The catalogue is loaded once at startup from a YAML file and never
//! mutated afterwards. Each product carries a lower-cased `searchable_text`
//! blob that the search service matches against; when the file does not
//! provide one it is derived from the title, description, tags and
//! formatted price.
//!
//! Product detail data (the long-form content shown in a product modal) is
//! kept in a separate read-only map keyed by product id. Neither the search
//! service nor the cart reads it.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use vitrina_core::{CurrencyCode, Price, ProductId};

/// A catalogue product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Lower-cased full-text blob used for matching.
    pub searchable_text: String,
    pub price: Decimal,
    pub image: Option<String>,
}

impl Product {
    /// Create a product whose searchable text is its lower-cased title.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, title: impl Into<String>, price: Decimal) -> Self {
        let title = title.into();
        Self {
            id: id.into(),
            searchable_text: title.to_lowercase(),
            title,
            price,
            image: None,
        }
    }

    /// Replace the searchable text. The value is lower-cased.
    #[must_use]
    pub fn with_searchable_text(mut self, text: &str) -> Self {
        self.searchable_text = text.to_lowercase();
        self
    }

    /// Attach an image reference.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

/// Long-form product content for the detail view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetails {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub specs: Vec<Spec>,
}

/// A labelled specification row ("Battery: 4500 mAh").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spec {
    pub label: String,
    pub value: String,
}

/// On-disk catalogue layout.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    products: Vec<ProductEntry>,
}

#[derive(Debug, Deserialize)]
struct ProductEntry {
    id: ProductId,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    tags: Vec<String>,
    price: Decimal,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    searchable_text: Option<String>,
    #[serde(default)]
    details: Option<ProductDetails>,
}

impl ProductEntry {
    fn into_parts(self, currency: CurrencyCode) -> (Product, Option<ProductDetails>) {
        let price = currency.round(self.price);

        let searchable_text = self.searchable_text.map_or_else(
            || {
                let formatted = Price::new(price, currency).display();
                let tags = self.tags.join(" ");
                [
                    self.title.as_str(),
                    self.description.as_str(),
                    tags.as_str(),
                    formatted.as_str(),
                ]
                .iter()
                .filter(|part| !part.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase()
            },
            |text| text.to_lowercase(),
        );

        let product = Product {
            id: self.id,
            title: self.title,
            searchable_text,
            price,
            image: self.image.filter(|s| !s.is_empty()),
        };

        (product, self.details)
    }
}

/// The immutable product catalogue.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    details: HashMap<ProductId, ProductDetails>,
}

impl Catalog {
    /// Build a catalogue from products, in the order given.
    ///
    /// # Errors
    ///
    /// Returns an error on duplicate ids, empty titles or negative prices.
    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        validate(&products)?;
        Ok(Self {
            products,
            details: HashMap::new(),
        })
    }

    /// Parse a catalogue from YAML, rounding prices to `currency`.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or a product is invalid.
    pub fn from_yaml_str(yaml: &str, currency: CurrencyCode) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;

        let mut products = Vec::with_capacity(file.products.len());
        let mut details = HashMap::new();
        for entry in file.products {
            let (product, product_details) = entry.into_parts(currency);
            if let Some(d) = product_details {
                details.insert(product.id.clone(), d);
            }
            products.push(product);
        }

        validate(&products)?;
        Ok(Self { products, details })
    }

    /// Load a catalogue file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument]
    pub fn load(path: &Path, currency: CurrencyCode) -> Result<Self, CatalogError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_yaml_str(&yaml, currency)?;
        info!(products = catalog.len(), "Catalogue loaded");
        Ok(catalog)
    }

    /// All products in catalogue order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id.as_str() == id)
    }

    /// Detail content for a product, if the catalogue provides any.
    #[must_use]
    pub fn details(&self, id: &str) -> Option<&ProductDetails> {
        self.details.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn validate(products: &[Product]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(products.len());
    for product in products {
        if !seen.insert(product.id.as_str()) {
            return Err(CatalogError::DuplicateId(product.id.clone()));
        }
        if product.title.trim().is_empty() {
            return Err(CatalogError::EmptyTitle(product.id.clone()));
        }
        if product.price.is_sign_negative() && !product.price.is_zero() {
            return Err(CatalogError::NegativePrice(product.id.clone()));
        }
    }
    Ok(())
}

/// Catalogue loading errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalogue {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid catalogue file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Duplicate product id: {0}")]
    DuplicateId(ProductId),
    #[error("Product {0} has an empty title")]
    EmptyTitle(ProductId),
    #[error("Product {0} has a negative price")]
    NegativePrice(ProductId),
}
