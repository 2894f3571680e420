//! # Validation Module
//!
//! Payload validation for callers of the catalog repository.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller (HTTP handler, seed binary)                           │
//! │  └── THIS MODULE: field rules on CreateProductPayload / Product        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Repository (catalog-db)                                      │
//! │  └── No checks. Values are bound as-is.                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK (quantity >= 0)                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catalog_core::validation::{validate_price, validate_quantity};
//!
//! assert!(validate_price(9.99).is_ok());
//! assert!(validate_quantity(-1).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{CreateProductPayload, Product};
use crate::{MAX_IMAGE_LEN, MAX_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - At most [`MAX_NAME_LEN`] characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates an image reference.
pub fn validate_image(image: &str) -> ValidationResult<()> {
    let image = image.trim();

    if image.is_empty() {
        return Err(ValidationError::Required {
            field: "image".to_string(),
        });
    }

    if image.chars().count() > MAX_IMAGE_LEN {
        return Err(ValidationError::TooLong {
            field: "image".to_string(),
            max: MAX_IMAGE_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price.
///
/// ## Rules
/// - Must be finite (no NaN / infinity)
/// - Must be non-negative; zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use catalog_core::validation::validate_price;
///
/// assert!(validate_price(0.0).is_ok());
/// assert!(validate_price(-1.0).is_err());
/// assert!(validate_price(f64::NAN).is_err());
/// ```
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "price".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a stock quantity. Zero is a valid (sold out) quantity.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Aggregate Validators
// =============================================================================

/// Validates every field of a create payload, stopping at the first error.
pub fn validate_create_payload(payload: &CreateProductPayload) -> ValidationResult<()> {
    validate_product_name(&payload.name)?;
    validate_image(&payload.image)?;
    validate_price(payload.price)?;
    validate_quantity(payload.quantity)?;
    Ok(())
}

/// Validates the mutable fields of a product before an update.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_image(&product.image)?;
    validate_price(product.price)?;
    validate_quantity(product.quantity)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
