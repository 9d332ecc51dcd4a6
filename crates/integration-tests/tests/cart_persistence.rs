//! Integration tests for cart persistence.
//!
//! These tests drive the cart through `AppState`, drop it, and reopen the
//! same storage file to check what a restarted session sees.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use rust_decimal::Decimal;
use vitrina_core::{CartState, CurrencyCode, ProductId};
use vitrina_integration_tests::TestShop;
use vitrina_storefront::AppState;
use vitrina_storefront::cart::{CartService, LineChange};
use vitrina_storefront::storage::{CART_KEY, JsonFileStore, KeyValueStore};

fn open(shop: &TestShop) -> AppState {
    AppState::open(shop.config.clone()).unwrap()
}

// =============================================================================
// Round Trip
// =============================================================================

#[test]
fn test_cart_survives_restart() {
    let shop = TestShop::new();
    {
        let mut state = open(&shop);
        state.add_to_cart("p1").unwrap();
        state.add_to_cart("p2").unwrap();
        state.add_to_cart("p1").unwrap();
    }

    let state = open(&shop);
    let cart = state.cart();
    let ids: Vec<_> = cart.items().iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, ["p1", "p2"]);
    assert_eq!(cart.get("p1").unwrap().quantity, 2);
    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.total(), Decimal::new(41230, 2));
    assert_eq!(
        cart.get("p1").unwrap().image.as_deref(),
        Some("img/red-phone.jpg")
    );
}

#[test]
fn test_decrement_and_remove_persist() {
    let shop = TestShop::new();
    {
        let mut state = open(&shop);
        state.add_to_cart("p1").unwrap();
        state.add_to_cart("p2").unwrap();
        assert_eq!(
            state.cart_mut().decrement_item("p1").unwrap(),
            LineChange::Removed
        );
    }

    let mut state = open(&shop);
    assert!(state.cart().get("p1").is_none());
    assert_eq!(
        state.cart_mut().remove_item("p2").unwrap(),
        LineChange::Removed
    );
    drop(state);

    assert_eq!(open(&shop).cart().state(), CartState::Empty);
}

#[test]
fn test_snapshot_is_json_array_of_lines() {
    let shop = TestShop::new();
    let mut state = open(&shop);
    state.add_to_cart("p2").unwrap();

    let raw = state.store().get(CART_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let line = json.as_array().unwrap().first().unwrap();

    assert_eq!(line["id"], "p2");
    assert_eq!(line["name"], "Blue Case");
    assert_eq!(line["price"], "12.50");
    assert_eq!(line["quantity"], 1);
}

// =============================================================================
// Damaged Storage
// =============================================================================

#[test]
fn test_corrupt_snapshot_starts_empty() {
    let shop = TestShop::new();
    {
        let store = JsonFileStore::open(shop.storage_path()).unwrap();
        store
            .set(CART_KEY, r#"[{"id":"p1","name":"Red Phone","price":"1","quantity":0}]"#)
            .unwrap();
    }

    let mut state = open(&shop);
    assert!(state.cart().is_empty());

    // The next mutation overwrites the bad snapshot
    state.add_to_cart("p2").unwrap();
    assert_eq!(open(&shop).cart().item_count(), 1);
}

#[test]
fn test_snapshot_with_unrepresentable_total_starts_empty() {
    let shop = TestShop::new();
    {
        let store = JsonFileStore::open(shop.storage_path()).unwrap();
        store
            .set(
                CART_KEY,
                r#"[{"id":"p1","name":"Red Phone","price":"79228162514264337593543950335","quantity":2}]"#,
            )
            .unwrap();
    }

    let state = open(&shop);
    assert!(state.cart().is_empty());
    assert_eq!(state.cart().total(), Decimal::ZERO);
    assert_eq!(state.cart().state(), CartState::Empty);
}

#[test]
fn test_unreadable_store_file_starts_empty() {
    let shop = TestShop::new();
    let path = shop.storage_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "not json at all").unwrap();

    let state = open(&shop);
    assert!(state.cart().is_empty());
    assert!(state.history().terms().is_empty());
}

#[test]
fn test_legacy_float_snapshot_is_rounded() {
    let shop = TestShop::new();
    let store: Arc<dyn KeyValueStore> =
        Arc::new(JsonFileStore::open(shop.storage_path()).unwrap());
    store
        .set(
            CART_KEY,
            r#"[{"id":1,"name":"Old Item","price":9.999,"quantity":2}]"#,
        )
        .unwrap();

    let cart = CartService::load(store, CurrencyCode::EUR);
    let line = cart.get("1").unwrap();
    assert_eq!(line.id, ProductId::new("1"));
    assert_eq!(line.unit_price, Decimal::new(1000, 2));
    assert_eq!(cart.total(), Decimal::new(2000, 2));
}
