//! Per-session shopper state.
//!
//! One `ShopSession` backs one shopper view: the cart, the checkout form
//! draft, and the category filter, all layered over the live catalog
//! snapshot from the watcher. Everything here is discarded when the session
//! ends; the database is the only durable state.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, instrument};
use url::Url;

use patisserie_core::{
    Cart, Category, CategoryFilter, Order, OrderDraft, Price, Product, ProductId,
};
use patisserie_docstore::CatalogSnapshot;

use crate::error::StorefrontError;
use crate::whatsapp;

/// Delay between the "order placed" confirmation and opening the messaging
/// link.
pub const CONFIRMATION_DELAY: Duration = Duration::from_millis(1500);

/// A shopper's session state.
///
/// The session holds only ids and form text; product names and prices are
/// always read from the current catalog snapshot, so an admin edit is
/// reflected the next time anything is displayed or totalled.
#[derive(Debug)]
pub struct ShopSession {
    catalog: watch::Receiver<CatalogSnapshot>,
    cart: Cart,
    draft: OrderDraft,
    filter: CategoryFilter,
    shop_owner_phone: String,
    /// True while the confirmation is showing and the link is pending.
    /// Blocks a second submission.
    submitting: bool,
}

impl ShopSession {
    /// Start a session over a catalog subscription.
    #[must_use]
    pub fn new(catalog: watch::Receiver<CatalogSnapshot>, shop_owner_phone: String) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            draft: OrderDraft::default(),
            filter: CategoryFilter::All,
            shop_owner_phone,
            submitting: false,
        }
    }

    // =========================================================================
    // Catalog view
    // =========================================================================

    /// The current catalog snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.catalog.borrow().clone()
    }

    /// Whether the first snapshot (or first failure) has arrived.
    #[must_use]
    pub fn loaded(&self) -> bool {
        self.catalog.borrow().loaded
    }

    /// Products visible under the current category filter.
    #[must_use]
    pub fn visible_products(&self) -> Vec<Product> {
        self.catalog
            .borrow()
            .catalog
            .filtered(self.filter)
            .cloned()
            .collect()
    }

    /// The category chips: every category present in the live snapshot, in
    /// first-seen order. `All` is implicit and always available.
    #[must_use]
    pub fn category_chips(&self) -> Vec<Category> {
        self.catalog.borrow().catalog.categories()
    }

    /// Set the category filter.
    pub const fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    /// The active category filter.
    #[must_use]
    pub const fn filter(&self) -> CategoryFilter {
        self.filter
    }

    // =========================================================================
    // Cart operations
    // =========================================================================

    /// Add one unit of a product to the cart.
    pub fn add_to_cart(&mut self, id: &ProductId) {
        self.cart.increment(id);
    }

    /// Remove one unit of a product from the cart.
    pub fn remove_one(&mut self, id: &ProductId) {
        self.cart.decrement(id);
    }

    /// Drop a product from the cart entirely.
    pub fn remove_from_cart(&mut self, id: &ProductId) {
        self.cart.remove(id);
    }

    /// Cart badge count; also gates the checkout UI.
    #[must_use]
    pub fn cart_count(&self) -> u32 {
        self.cart.count()
    }

    /// Cart total priced against the current snapshot.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.cart.total(&self.catalog.borrow().catalog)
    }

    /// Read access to the cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Update the customer name field.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
    }

    /// Update the phone field.
    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.draft.phone = phone.into();
    }

    /// The checkout form draft.
    #[must_use]
    pub const fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    /// Whether an order submission is currently in flight (confirmation
    /// showing, link pending). The submit control is disabled while true.
    #[must_use]
    pub const fn placing_order(&self) -> bool {
        self.submitting
    }

    /// Submit the order.
    ///
    /// Validates the form and cart, derives the order and its message
    /// strictly from the current catalog snapshot, clears the cart and the
    /// form fields, shows the transient confirmation for
    /// [`CONFIRMATION_DELAY`], and then yields the outbound link for the
    /// caller to open. Prices may drift between submission and opening the
    /// link; the link carries what was on screen at submission, and no
    /// stronger guarantee is made.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad draft or empty cart, and
    /// [`StorefrontError::SubmissionInFlight`] if called while a previous
    /// submission has not completed.
    #[instrument(skip(self), fields(items = self.cart.count()))]
    pub async fn place_order(&mut self) -> Result<Url, StorefrontError> {
        if self.submitting {
            return Err(StorefrontError::SubmissionInFlight);
        }

        let order = {
            let snapshot = self.catalog.borrow();
            Order::build(&self.draft, &self.cart, &snapshot.catalog)?
        };

        let link = whatsapp::order_link(&self.shop_owner_phone, &order)?;

        info!(
            items = order.lines.len(),
            total = %order.total,
            "Order placed"
        );

        // The order is committed from the session's point of view: clear
        // everything before the confirmation delay, exactly once.
        self.cart.clear();
        self.draft = OrderDraft::default();

        // The flag must clear even when the caller drops this future during
        // the delay; a stuck flag would lock the session out of ordering.
        {
            let _submitting = InFlight::set(&mut self.submitting);
            tokio::time::sleep(CONFIRMATION_DELAY).await;
        }

        Ok(link)
    }
}

/// Holds a boolean flag true for a scope, clearing it on drop - including
/// the drop of a cancelled future.
struct InFlight<'a>(&'a mut bool);

impl<'a> InFlight<'a> {
    fn set(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use patisserie_core::Catalog;

    fn product(id: &str, name: &str, price: u64, category: Category) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            price: Price::new(price),
            category,
            description: String::new(),
            image: String::new(),
            updated_at: None,
        }
    }

    fn session_with(products: Vec<Product>) -> (watch::Sender<CatalogSnapshot>, ShopSession) {
        let (tx, rx) = watch::channel(CatalogSnapshot {
            catalog: Catalog::new(products),
            loaded: true,
        });
        (tx, ShopSession::new(rx, "917299731118".to_owned()))
    }

    fn sample_products() -> Vec<Product> {
        vec![
            product("a", "A", 100, Category::Cakes),
            product("b", "B", 50, Category::Pastries),
        ]
    }

    #[test]
    fn test_filter_and_chips() {
        let (_tx, mut session) = session_with(sample_products());

        assert_eq!(
            session.category_chips(),
            vec![Category::Cakes, Category::Pastries]
        );

        session.set_filter(CategoryFilter::Only(Category::Pastries));
        let visible = session.visible_products();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible.first().unwrap().name, "B");
    }

    #[test]
    fn test_cart_count_and_total_track_snapshot() {
        let (tx, mut session) = session_with(sample_products());

        session.add_to_cart(&ProductId::new("a"));
        session.add_to_cart(&ProductId::new("a"));
        session.add_to_cart(&ProductId::new("b"));
        assert_eq!(session.cart_count(), 3);
        assert_eq!(session.cart_total(), Price::new(250));

        // Admin deletes "b": its entry silently contributes zero, leaving
        // only "a" at qty 2.
        tx.send_replace(CatalogSnapshot {
            catalog: Catalog::new(vec![product("a", "A", 100, Category::Cakes)]),
            loaded: true,
        });
        assert_eq!(session.cart_total(), Price::new(200));
        assert_eq!(session.cart_count(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_place_order_clears_session_and_yields_link() {
        let (_tx, mut session) = session_with(sample_products());

        session.add_to_cart(&ProductId::new("a"));
        session.add_to_cart(&ProductId::new("a"));
        session.add_to_cart(&ProductId::new("b"));
        session.set_name("Asha");
        session.set_phone("1234567890");

        let link = session.place_order().await.unwrap();

        assert_eq!(link.host_str(), Some("wa.me"));
        assert_eq!(link.path(), "/917299731118");
        let text = link
            .query_pairs()
            .find(|(k, _)| k == "text")
            .map(|(_, v)| v.into_owned())
            .unwrap();
        assert!(text.contains("A x2 (₹200)"));
        assert!(text.contains("*Total:* ₹250"));

        // Cart and form fields are cleared; a new submission would be an
        // empty-cart validation error.
        assert!(session.cart().is_empty());
        assert_eq!(session.draft().name, "");
        assert_eq!(session.draft().phone, "");
        assert!(!session.placing_order());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_submission_does_not_lock_session() {
        let (_tx, mut session) = session_with(sample_products());

        session.add_to_cart(&ProductId::new("a"));
        session.set_name("Asha");
        session.set_phone("1234567890");

        // The caller abandons the submission during the confirmation delay
        // (e.g. navigating away). The zero timeout fires on the first timer
        // check, dropping the future mid-sleep.
        let abandoned = tokio::time::timeout(Duration::ZERO, session.place_order()).await;
        assert!(abandoned.is_err());
        assert!(!session.placing_order());

        // The session is still usable: refill and submit again.
        session.add_to_cart(&ProductId::new("b"));
        session.set_name("Asha");
        session.set_phone("1234567890");
        let link = session.place_order().await.unwrap();
        assert_eq!(link.host_str(), Some("wa.me"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_place_order_rejects_invalid_phone() {
        let (_tx, mut session) = session_with(sample_products());

        session.add_to_cart(&ProductId::new("a"));
        session.set_name("Asha");
        session.set_phone("12345");

        let err = session.place_order().await.unwrap_err();
        assert!(matches!(err, StorefrontError::Validation(_)));

        // Nothing was cleared.
        assert_eq!(session.cart_count(), 1);
        assert_eq!(session.draft().name, "Asha");
    }

    #[tokio::test(start_paused = true)]
    async fn test_place_order_rejects_empty_cart() {
        let (_tx, mut session) = session_with(sample_products());

        session.set_name("Asha");
        session.set_phone("1234567890");

        let err = session.place_order().await.unwrap_err();
        assert!(matches!(err, StorefrontError::Validation(_)));
    }
}
