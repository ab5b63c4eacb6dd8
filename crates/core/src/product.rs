//! Product documents and write payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Category, Price, ProductId};

/// A product as read from the external document database.
///
/// The client never mutates a `Product` in place: the catalog is replaced
/// wholesale on every change notification, and writes go through
/// [`ProductInput`]. `updatedAt` is stamped by the admin on every write but
/// may be absent on documents created before the field existed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Database-assigned document id.
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub category: Category,
    pub description: String,
    /// URL of the product image on the external image host.
    pub image: String,
    #[serde(
        rename = "updatedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The write payload for creating or updating a product.
///
/// Carries no id: creates are assigned one by the database and updates
/// address the document by id in the request path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub price: Price,
    pub category: Category,
    pub description: String,
    pub image: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
