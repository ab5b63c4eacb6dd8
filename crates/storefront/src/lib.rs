//! Patisserie Storefront - the shopper-side session engine.
//!
//! This crate drives everything the shopper view needs:
//!
//! - a live catalog subscription (full-replacement snapshots from the
//!   document database, via `patisserie-docstore`)
//! - per-session state: the cart, the checkout form draft, and the category
//!   filter
//! - order submission: validate, serialize the order message, clear the
//!   session, and after a fixed delay yield the outbound WhatsApp link
//!
//! There is no server process and no persistence here. The session lives in
//! memory, the database owns all durable state, and the only outbound side
//! effect is a URL the caller opens in a new browsing context.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod session;
pub mod whatsapp;

pub use config::{ConfigError, StorefrontConfig};
pub use error::StorefrontError;
pub use session::ShopSession;
