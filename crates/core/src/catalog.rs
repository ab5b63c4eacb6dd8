//! Full-replacement catalog snapshots.

use crate::product::Product;
use crate::types::{Category, ProductId};

/// Category filter for the shopper view.
///
/// `All` shows the whole catalog; `Only` narrows to a single category. The
/// chip list offered to the shopper is `All` plus whatever categories the
/// live snapshot actually contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Whether a product passes the filter.
    #[must_use]
    pub fn matches(self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => product.category == category,
        }
    }
}

/// A point-in-time snapshot of the product catalog.
///
/// The external database pushes whole snapshots, not diffs, so a `Catalog`
/// is immutable once built and is replaced in full on every change
/// notification. Lookup by id is linear; the catalog is a shop menu, not a
/// warehouse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from a snapshot of products.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// Look up a product by id. Returns `None` for ids no longer present,
    /// which callers treat as "deleted out from under us".
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// All products in snapshot order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Products passing the given category filter, in snapshot order.
    pub fn filtered(&self, filter: CategoryFilter) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(move |p| filter.matches(p))
    }

    /// Distinct categories present in the snapshot, in first-seen order.
    ///
    /// This drives the filter chips, so an empty catalog yields no chips
    /// beyond the implicit `All`.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category) {
                seen.push(product.category);
            }
        }
        seen
    }

    /// Number of products in the snapshot.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the snapshot contains no products.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
