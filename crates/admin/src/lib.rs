//! Patisserie Admin - catalog administration engine.
//!
//! Everything the admin view needs, with no server process behind it:
//!
//! - a password gate (plaintext compare against the configured password; a
//!   documented limitation of this shop, not an oversight)
//! - the product form draft and its validation
//! - create/update/delete against the document database, with `updatedAt`
//!   stamping and last-write-wins semantics
//! - image upload behind a single capability with two swappable backends
//!   (direct blob API or hosted upload widget)
//!
//! The admin view shares the same live catalog subscription as the
//! storefront (`patisserie_docstore::ProductWatcher`); this crate only adds
//! the write side.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod config;
pub mod error;
pub mod form;
pub mod images;
pub mod session;

pub use auth::AdminGate;
pub use config::{AdminConfig, ConfigError, ImageBackendConfig};
pub use error::AdminError;
pub use form::{FormError, ImageSource, ProductForm, ValidatedForm};
pub use images::{ImageError, ImageStore, ImageUpload};
pub use session::{AdminSession, SaveOutcome};
