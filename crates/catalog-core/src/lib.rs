//! # catalog-core: Domain Types for the Product Catalog
//!
//! This crate holds the catalog's domain types and caller-side validation
//! as plain data and pure functions, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              HTTP handlers (outside this workspace)              │   │
//! │  │    validate payload ──► call repository ──► render response     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ catalog-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────────────┐        ┌───────────────────────┐   │   │
//! │  │   │        types          │        │      validation       │   │   │
//! │  │   │  Product              │        │  name / price / image │   │   │
//! │  │   │  CreateProductPayload │        │  quantity checks      │   │   │
//! │  │   └───────────────────────┘        └───────────────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   catalog-db (Database Layer)                   │   │
//! │  │         products ⋈ productquantity, migrations, seeding         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CreateProductPayload)
//! - [`error`] - Validation error types
//! - [`validation`] - Payload validation for callers
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::validation::validate_create_payload;
//! use catalog_core::CreateProductPayload;
//!
//! let payload = CreateProductPayload {
//!     name: "Mug".to_string(),
//!     description: "A mug".to_string(),
//!     image: "mug.png".to_string(),
//!     price: 9.99,
//!     quantity: 10,
//! };
//!
//! assert!(validate_create_payload(&payload).is_ok());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name, in characters.
pub const MAX_NAME_LEN: usize = 255;

/// Maximum length of an image reference, in characters.
pub const MAX_IMAGE_LEN: usize = 2048;
