//! Core types for Patisserie.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod id;
pub mod phone;
pub mod price;

pub use category::{Category, CategoryParseError};
pub use id::ProductId;
pub use phone::{PhoneNumber, PhoneNumberError};
pub use price::Price;
