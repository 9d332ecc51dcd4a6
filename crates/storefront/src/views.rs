//! Plain-text rendering of storefront screens.
//!
//! These functions only format; they never touch storage. The CLI prints
//! them as-is and a GUI can reuse the wording.

use rust_decimal::Decimal;
use vitrina_core::{CurrencyCode, Price};

use crate::cart::CartService;
use crate::catalog::{Catalog, Product, ProductDetails};
use crate::search::{HighlightMarker, SearchHistory, SearchOutcome, highlight};

/// Shown in place of the cart when it has no lines.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";

/// Shown when a search is submitted with nothing to search for.
pub const EMPTY_QUERY_MESSAGE: &str = "Type something to search.";

/// Badge counts above this are shown as "99+".
const BADGE_MAX: u32 = 99;

fn money(amount: Decimal, currency: CurrencyCode) -> String {
    Price::new(amount, currency).display()
}

/// Header line for a search outcome.
#[must_use]
pub fn search_summary(outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::NoQuery => EMPTY_QUERY_MESSAGE.to_string(),
        SearchOutcome::NoMatches { term } => format!("No results for \"{term}\"."),
        SearchOutcome::Matches { term, results } => {
            let noun = if results.len() == 1 { "result" } else { "results" };
            format!("Found {} {noun} for \"{term}\":", results.len())
        }
    }
}

/// Summary line followed by one entry per result, with the term highlighted
/// in both title and snippet.
#[must_use]
pub fn render_search(
    outcome: &SearchOutcome,
    currency: CurrencyCode,
    marker: &HighlightMarker,
) -> String {
    let mut out = search_summary(outcome);

    if let SearchOutcome::Matches { term, results } = outcome {
        for result in results {
            out.push_str(&format!(
                "\n\n[{}] {} - {}\n  {}",
                result.product_id,
                highlight(&result.title, term, marker),
                money(result.price, currency),
                highlight(&result.snippet, term, marker),
            ));
        }
    }
    out
}

/// One line per catalogue product.
#[must_use]
pub fn render_products(catalog: &Catalog, currency: CurrencyCode) -> String {
    catalog
        .products()
        .iter()
        .map(|p| format!("[{}] {} - {}", p.id, p.title, money(p.price, currency)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Product detail view: title, price, then any long-form content.
#[must_use]
pub fn render_product(
    product: &Product,
    details: Option<&ProductDetails>,
    currency: CurrencyCode,
) -> String {
    let mut out = format!("{}\n{}", product.title, money(product.price, currency));

    if let Some(image) = &product.image {
        out.push_str(&format!("\nImage: {image}"));
    }

    let Some(details) = details else {
        return out;
    };

    if !details.summary.is_empty() {
        out.push_str("\n\n");
        out.push_str(&details.summary);
    }
    if !details.features.is_empty() {
        out.push_str("\n\nFeatures:");
        for feature in &details.features {
            out.push_str("\n  - ");
            out.push_str(feature);
        }
    }
    if !details.specs.is_empty() {
        out.push_str("\n\nSpecifications:");
        for spec in &details.specs {
            out.push_str(&format!("\n  {}: {}", spec.label, spec.value));
        }
    }
    out
}

/// Cart lines with subtotals and the grand total, or the empty message.
#[must_use]
pub fn render_cart(cart: &CartService) -> String {
    if cart.is_empty() {
        return EMPTY_CART_MESSAGE.to_string();
    }

    let currency = cart.currency();
    let mut lines = String::new();
    for item in cart.items() {
        lines.push_str(&format!(
            "[{}] {} x{} @ {} = {}\n",
            item.id,
            item.name,
            item.quantity,
            money(item.unit_price, currency),
            money(item.subtotal(), currency),
        ));
    }

    format!(
        "{lines}\nItems: {}\nTotal: {}",
        cart.item_count(),
        money(cart.total(), currency)
    )
}

/// Cart badge text; `None` hides the badge.
#[must_use]
pub fn cart_badge(cart: &CartService) -> Option<String> {
    match cart.item_count() {
        0 => None,
        n if n > BADGE_MAX => Some(format!("{BADGE_MAX}+")),
        n => Some(n.to_string()),
    }
}

/// Recent searches, most recent first.
#[must_use]
pub fn render_history(history: &SearchHistory) -> String {
    if history.terms().is_empty() {
        return "No recent searches.".to_string();
    }
    history
        .terms()
        .iter()
        .enumerate()
        .map(|(i, term)| format!("{}. {term}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use vitrina_core::ProductId;

    use super::*;
    use crate::catalog::Spec;
    use crate::search;
    use crate::storage::{KeyValueStore, MemoryStore};

    fn items() -> Vec<Product> {
        vec![
            Product::new("p1", "Red Phone", Decimal::new(19990, 2))
                .with_searchable_text("red phone 5g"),
            Product::new("p2", "Blue Case", Decimal::new(1250, 2)),
        ]
    }

    fn cart() -> CartService {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        CartService::load(store, CurrencyCode::EUR)
    }

    #[test]
    fn test_search_summary() {
        assert_eq!(
            search_summary(&search::run("", &items())),
            EMPTY_QUERY_MESSAGE
        );
        assert_eq!(
            search_summary(&search::run("laptop", &items())),
            "No results for \"laptop\"."
        );
        assert_eq!(
            search_summary(&search::run("PHONE", &items())),
            "Found 1 result for \"phone\":"
        );
    }

    #[test]
    fn test_render_search_highlights_title_and_snippet() {
        let outcome = search::run("phone", &items());
        let rendered = render_search(&outcome, CurrencyCode::EUR, &HighlightMarker::html());
        assert_eq!(
            rendered,
            "Found 1 result for \"phone\":\n\n\
             [p1] Red <span class=\"highlight\">Phone</span> - €199.90\n  \
             red <span class=\"highlight\">phone</span> 5g"
        );
    }

    #[test]
    fn test_render_products() {
        let catalog = Catalog::from_products(items()).unwrap();
        assert_eq!(
            render_products(&catalog, CurrencyCode::USD),
            "[p1] Red Phone - $199.90\n[p2] Blue Case - $12.50"
        );
    }

    #[test]
    fn test_render_product_with_details() {
        let product = items().remove(0).with_image("img/red.jpg");
        let details = ProductDetails {
            summary: "A red phone.".to_string(),
            features: vec!["5G".to_string()],
            specs: vec![Spec {
                label: "Battery".to_string(),
                value: "4500 mAh".to_string(),
            }],
        };

        let rendered = render_product(&product, Some(&details), CurrencyCode::EUR);
        assert_eq!(
            rendered,
            "Red Phone\n€199.90\nImage: img/red.jpg\n\nA red phone.\n\n\
             Features:\n  - 5G\n\nSpecifications:\n  Battery: 4500 mAh"
        );
        assert_eq!(
            render_product(&product, None, CurrencyCode::EUR),
            "Red Phone\n€199.90\nImage: img/red.jpg"
        );
    }

    #[test]
    fn test_render_product_skips_empty_sections() {
        let product = items().remove(1);
        let details = ProductDetails {
            summary: String::new(),
            features: vec!["Slim".to_string(), "Matte".to_string()],
            specs: Vec::new(),
        };

        assert_eq!(
            render_product(&product, Some(&details), CurrencyCode::EUR),
            "Blue Case\n€12.50\n\nFeatures:\n  - Slim\n  - Matte"
        );
    }

    #[test]
    fn test_render_empty_cart() {
        assert_eq!(render_cart(&cart()), EMPTY_CART_MESSAGE);
        assert_eq!(cart_badge(&cart()), None);
    }

    #[test]
    fn test_render_cart_lines_and_total() {
        let mut cart = cart();
        cart.add_item(ProductId::new("p1"), "Red Phone", Decimal::new(19990, 2), None)
            .unwrap();
        cart.increment_item("p1").unwrap();
        cart.add_item(ProductId::new("p2"), "Blue Case", Decimal::new(1250, 2), None)
            .unwrap();

        assert_eq!(
            render_cart(&cart),
            "[p1] Red Phone x2 @ €199.90 = €399.80\n\
             [p2] Blue Case x1 @ €12.50 = €12.50\n\
             \nItems: 3\nTotal: €412.30"
        );
        assert_eq!(cart_badge(&cart).as_deref(), Some("3"));
    }

    #[test]
    fn test_badge_caps_large_counts() {
        let mut cart = cart();
        cart.add_item(ProductId::new("p1"), "A", Decimal::ONE, None)
            .unwrap();
        for _ in 0..120 {
            cart.increment_item("p1").unwrap();
        }
        assert_eq!(cart_badge(&cart).as_deref(), Some("99+"));
    }

    #[test]
    fn test_render_history() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut history = SearchHistory::load(store, 10);
        assert_eq!(render_history(&history), "No recent searches.");

        history.record("phone").unwrap();
        history.record("case").unwrap();
        assert_eq!(render_history(&history), "1. case\n2. phone");
    }
}
