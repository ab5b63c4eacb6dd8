//! Patisserie Core - Shared types and pure storefront logic.
//!
//! This crate provides the domain model used across all Patisserie
//! components:
//! - `storefront` - Shopper-side session engine (catalog, cart, checkout)
//! - `admin` - Catalog administration (CRUD + image upload)
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. The cart algebra, order validation, and order-message
//! serialization all live here so they can be tested without any external
//! collaborator.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, phone numbers, categories
//! - [`product`] - Product documents and write payloads
//! - [`catalog`] - Full-replacement catalog snapshots and category filtering
//! - [`cart`] - The in-memory cart mapping and its operations
//! - [`order`] - Order submission validation and message serialization

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod order;
pub mod product;
pub mod types;

pub use cart::Cart;
pub use catalog::{Catalog, CategoryFilter};
pub use order::{Order, OrderDraft, OrderLine, OrderValidationError};
pub use product::{Product, ProductInput};
pub use types::*;
