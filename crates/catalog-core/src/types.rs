//! # Domain Types
//!
//! Core domain types used throughout the catalog.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Product = two rows                              │
//! │                                                                         │
//! │  ┌─────────────────────┐            ┌─────────────────────┐            │
//! │  │      products       │   1 : 1    │   productquantity   │            │
//! │  │  ─────────────────  │ ◄────────► │  ─────────────────  │            │
//! │  │  id (generated)     │  same id   │  id                 │            │
//! │  │  name               │            │  quantity           │            │
//! │  │  description        │            └─────────────────────┘            │
//! │  │  image              │                                               │
//! │  │  price              │                                               │
//! │  │  createdat          │                                               │
//! │  └─────────────────────┘                                               │
//! │                                                                         │
//! │  Both rows are written in one transaction, always together.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Product
// =============================================================================

/// A catalog product joined with its stock quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Identifier assigned by storage on creation.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Free-form description.
    pub description: String,

    /// Image reference (path or URL).
    pub image: String,

    /// Unit price.
    pub price: f64,

    /// Units in stock. Lives in `productquantity`, keyed by `id`.
    pub quantity: i64,

    /// When the product was created (assigned by storage).
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Returns true when no units are in stock.
    #[inline]
    pub fn is_out_of_stock(&self) -> bool {
        self.quantity <= 0
    }
}

// =============================================================================
// CreateProductPayload
// =============================================================================

/// Fields needed to create a product.
///
/// The identifier and creation timestamp are assigned by storage, so they
/// are absent here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    pub name: String,
    pub price: f64,
    pub image: String,
    pub description: String,
    pub quantity: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_deserializes_from_json() {
        let json = r#"{
            "name": "Mug",
            "price": 9.99,
            "image": "mug.png",
            "description": "A mug",
            "quantity": 10
        }"#;

        let payload: CreateProductPayload = serde_json::from_str(json).unwrap();

        assert_eq!(payload.name, "Mug");
        assert_eq!(payload.price, 9.99);
        assert_eq!(payload.quantity, 10);
    }

    #[test]
    fn test_product_serializes_created_at_in_camel_case() {
        let product = Product {
            id: 7,
            name: "Mug".to_string(),
            description: "A mug".to_string(),
            image: "mug.png".to_string(),
            price: 9.99,
            quantity: 0,
            created_at: DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };

        let value = serde_json::to_value(&product).unwrap();

        assert_eq!(value["id"], 7);
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
        assert!(product.is_out_of_stock());
    }
}
