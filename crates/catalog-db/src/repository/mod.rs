//! # Repository Module
//!
//! Database repository implementations for the catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.products().get_products_by_id(&ids)                        │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── get_product_by_id / find_product_by_id                            │
//! │  ├── get_products_by_id                                                │
//! │  ├── get_products                                                      │
//! │  ├── create_product                                                    │
//! │  ├── update_product                                                    │
//! │  └── update_product_quantity                                           │
//! │       │                                                                 │
//! │       │  SQL (products ⋈ productquantity)                              │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD across both tables

pub mod product;
