//! Cart snapshot encoding.
//!
//! A snapshot is a JSON array of line items:
//!
//! ```json
//! [{"id":"p1","name":"Red Phone","price":"199.90","image":"img/red.jpg","quantity":2}]
//! ```
//!
//! Prices are written as decimal strings. On load they are accepted either
//! as strings or as JSON numbers (older snapshots stored floats) and rounded
//! to the currency's minor units.

use std::collections::HashSet;

use vitrina_core::{CurrencyCode, ProductId};

use super::{CartLineItem, checked_total};

/// Reasons a stored snapshot is rejected.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Line {0} has zero quantity")]
    ZeroQuantity(ProductId),
    #[error("Line {0} has a negative price")]
    NegativePrice(ProductId),
    #[error("Line {0} appears more than once")]
    DuplicateId(ProductId),
    #[error("Cart total overflows at line {0}")]
    AmountOverflow(ProductId),
}

/// Serialize line items for storage.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode(items: &[CartLineItem]) -> Result<String, serde_json::Error> {
    serde_json::to_string(items)
}

/// Parse and validate a stored snapshot.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or any line breaks a cart
/// invariant (zero quantity, negative price, repeated id, a total too large
/// to represent).
pub fn decode(raw: &str, currency: CurrencyCode) -> Result<Vec<CartLineItem>, SnapshotError> {
    let mut items: Vec<CartLineItem> = serde_json::from_str(raw)?;

    let mut seen = HashSet::with_capacity(items.len());
    for item in &mut items {
        if item.quantity == 0 {
            return Err(SnapshotError::ZeroQuantity(item.id.clone()));
        }
        if item.unit_price.is_sign_negative() && !item.unit_price.is_zero() {
            return Err(SnapshotError::NegativePrice(item.id.clone()));
        }
        if !seen.insert(item.id.clone()) {
            return Err(SnapshotError::DuplicateId(item.id.clone()));
        }
        item.unit_price = currency.round(item.unit_price);
    }

    if let Err(id) = checked_total(&items) {
        return Err(SnapshotError::AmountOverflow(id.clone()));
    }
    Ok(items)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_encode_field_names() {
        let items = vec![CartLineItem {
            id: ProductId::new("p1"),
            name: "Red Phone".to_string(),
            unit_price: Decimal::new(19990, 2),
            image: None,
            quantity: 2,
        }];
        let json = encode(&items).unwrap();
        assert_eq!(
            json,
            r#"[{"id":"p1","name":"Red Phone","price":"199.90","quantity":2}]"#
        );
    }

    #[test]
    fn test_decode_legacy_float_prices() {
        let raw = r#"[{"id":"1","name":"Funda","price":12.99,"quantity":3}]"#;
        let items = decode(raw, CurrencyCode::EUR).unwrap();
        let item = items.first().unwrap();
        assert_eq!(item.unit_price, Decimal::new(1299, 2));
        assert_eq!(item.quantity, 3);
        assert_eq!(item.image, None);
    }

    #[test]
    fn test_decode_numeric_ids() {
        let raw = r#"[{"id":7,"name":"Funda","price":"1","quantity":1}]"#;
        let items = decode(raw, CurrencyCode::EUR).unwrap();
        assert_eq!(items.first().unwrap().id, ProductId::new("7"));
    }

    #[test]
    fn test_decode_rejects_zero_quantity() {
        let raw = r#"[{"id":"p1","name":"A","price":"1","quantity":0}]"#;
        assert!(matches!(
            decode(raw, CurrencyCode::EUR),
            Err(SnapshotError::ZeroQuantity(_))
        ));
    }

    #[test]
    fn test_decode_rejects_negative_quantity() {
        let raw = r#"[{"id":"p1","name":"A","price":"1","quantity":-1}]"#;
        assert!(matches!(
            decode(raw, CurrencyCode::EUR),
            Err(SnapshotError::Parse(_))
        ));
    }

    #[test]
    fn test_decode_rejects_negative_price() {
        let raw = r#"[{"id":"p1","name":"A","price":"-1","quantity":1}]"#;
        assert!(matches!(
            decode(raw, CurrencyCode::EUR),
            Err(SnapshotError::NegativePrice(_))
        ));
    }

    #[test]
    fn test_decode_rejects_duplicates() {
        let raw = r#"[
            {"id":"p1","name":"A","price":"1","quantity":1},
            {"id":"p1","name":"A","price":"1","quantity":2}
        ]"#;
        assert!(matches!(
            decode(raw, CurrencyCode::EUR),
            Err(SnapshotError::DuplicateId(_))
        ));
    }

    #[test]
    fn test_decode_rejects_unrepresentable_total() {
        let raw = r#"[
            {"id":"p1","name":"A","price":"79228162514264337593543950335","quantity":2}
        ]"#;
        assert!(matches!(
            decode(raw, CurrencyCode::EUR),
            Err(SnapshotError::AmountOverflow(id)) if id.as_str() == "p1"
        ));

        // Each line fits, the sum does not
        let raw = r#"[
            {"id":"p1","name":"A","price":"79228162514264337593543950335","quantity":1},
            {"id":"p2","name":"B","price":"1","quantity":1}
        ]"#;
        assert!(matches!(
            decode(raw, CurrencyCode::EUR),
            Err(SnapshotError::AmountOverflow(id)) if id.as_str() == "p2"
        ));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(decode("{}", CurrencyCode::EUR).is_err());
        assert!(decode("not json", CurrencyCode::EUR).is_err());
    }
}
