//! The in-memory shopping cart.

use std::collections::BTreeMap;

use crate::catalog::Catalog;
use crate::types::{Price, ProductId};

/// A shopper's cart: product id mapped to a positive quantity.
///
/// The cart exists only in memory for the duration of a session and is
/// discarded on order submission. It holds ids, not product data - prices
/// and names are always looked up in the live catalog snapshot at the moment
/// they are needed, so an admin price change is reflected immediately.
///
/// Invariant: a stored quantity is always >= 1. Decrementing a quantity of
/// one removes the entry; nothing ever stores a zero.
///
/// Entries are kept in id order (`BTreeMap`) so serialized order lines come
/// out deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    quantities: BTreeMap<ProductId, u32>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            quantities: BTreeMap::new(),
        }
    }

    /// Add one unit of the product, starting from zero for absent keys.
    pub fn increment(&mut self, id: &ProductId) {
        let quantity = self.quantities.entry(id.clone()).or_insert(0);
        *quantity = quantity.saturating_add(1);
    }

    /// Remove one unit of the product.
    ///
    /// A quantity of one removes the entry entirely; an absent key is a
    /// no-op.
    pub fn decrement(&mut self, id: &ProductId) {
        if let Some(quantity) = self.quantities.get_mut(id) {
            if *quantity > 1 {
                *quantity -= 1;
            } else {
                self.quantities.remove(id);
            }
        }
    }

    /// Drop the product from the cart regardless of quantity.
    pub fn remove(&mut self, id: &ProductId) {
        self.quantities.remove(id);
    }

    /// Discard every entry (order submitted or cart abandoned).
    pub fn clear(&mut self) {
        self.quantities.clear();
    }

    /// Quantity of a product, zero if absent.
    #[must_use]
    pub fn quantity(&self, id: &ProductId) -> u32 {
        self.quantities.get(id).copied().unwrap_or(0)
    }

    /// Sum of all quantities - the cart badge, and the checkout gate.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.quantities
            .values()
            .fold(0_u32, |acc, q| acc.saturating_add(*q))
    }

    /// Cart total priced against the current catalog snapshot.
    ///
    /// An entry whose id is no longer in the catalog contributes zero; the
    /// product was deleted while sitting in the cart and is silently
    /// skipped, not an error.
    #[must_use]
    pub fn total(&self, catalog: &Catalog) -> Price {
        self.quantities
            .iter()
            .fold(Price::ZERO, |acc, (id, quantity)| {
                let line = catalog
                    .get(id)
                    .map_or(Price::ZERO, |p| p.price.line_total(*quantity));
                acc.saturating_add(line)
            })
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Entries in deterministic (id) order.
    pub fn entries(&self) -> impl Iterator<Item = (&ProductId, u32)> {
        self.quantities.iter().map(|(id, q)| (id, *q))
    }
}
