//! The full shopper path: live catalog, cart, checkout, outbound link.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use patisserie_core::{Category, CategoryFilter, Price, ProductId};
use patisserie_docstore::ProductWatcher;
use patisserie_integration_tests::{docstore_client, product_json};
use patisserie_storefront::{ShopSession, StorefrontError};

const POLL: Duration = Duration::from_millis(50);
const WAIT: Duration = Duration::from_secs(5);

async fn catalog_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json("p1", "Chocolate Truffle", 550, "Cakes"),
            product_json("p2", "Lemon Tart", 120, "Pastries"),
            product_json("p3", "Vanilla Cupcake", 80, "Cupcakes"),
        ])))
        .mount(&server)
        .await;
    server
}

async fn loaded_session(server: &MockServer) -> (ProductWatcher, ShopSession) {
    let watcher = ProductWatcher::spawn(docstore_client(&server.uri()), POLL);
    let mut rx = watcher.subscribe();
    tokio::time::timeout(WAIT, rx.changed()).await.unwrap().unwrap();

    let session = ShopSession::new(watcher.subscribe(), "917299731118".to_owned());
    (watcher, session)
}

#[tokio::test]
async fn test_browse_filter_and_order() {
    let server = catalog_server().await;
    let (_watcher, mut session) = loaded_session(&server).await;

    assert!(session.loaded());
    assert_eq!(session.visible_products().len(), 3);
    assert_eq!(
        session.category_chips(),
        vec![Category::Cakes, Category::Pastries, Category::Cupcakes]
    );

    // Narrow to pastries, then buy across categories anyway.
    session.set_filter(CategoryFilter::Only(Category::Pastries));
    assert_eq!(session.visible_products().len(), 1);

    session.add_to_cart(&ProductId::new("p1"));
    session.add_to_cart(&ProductId::new("p1"));
    session.add_to_cart(&ProductId::new("p2"));
    assert_eq!(session.cart_count(), 3);
    assert_eq!(session.cart_total(), Price::new(1220));

    session.set_name("Asha");
    session.set_phone("9876543210");

    let link = session.place_order().await.unwrap();

    assert_eq!(link.host_str(), Some("wa.me"));
    assert_eq!(link.path(), "/917299731118");
    let text = link
        .query_pairs()
        .find(|(k, _)| k == "text")
        .map(|(_, v)| v.into_owned())
        .unwrap();
    assert!(text.contains("Name: Asha"));
    assert!(text.contains("Phone: 9876543210"));
    assert!(text.contains("Chocolate Truffle x2 (₹1100)"));
    assert!(text.contains("Lemon Tart x1 (₹120)"));
    assert!(text.contains("*Total:* ₹1220"));

    // The session is reset; resubmitting is an empty-cart error.
    assert!(session.cart().is_empty());
    let err = session.place_order().await.unwrap_err();
    assert!(matches!(err, StorefrontError::Validation(_)));
}

#[tokio::test]
async fn test_order_prices_follow_live_catalog() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json("p1", "Chocolate Truffle", 550, "Cakes"),
        ])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            product_json("p1", "Chocolate Truffle", 600, "Cakes"),
        ])))
        .mount(&server)
        .await;

    let (watcher, mut session) = loaded_session(&server).await;
    session.add_to_cart(&ProductId::new("p1"));
    assert_eq!(session.cart_total(), Price::new(550));

    // An admin price edit lands before checkout; the order carries the
    // price on screen at submission time.
    let mut rx = watcher.subscribe();
    loop {
        tokio::time::timeout(WAIT, rx.changed()).await.unwrap().unwrap();
        if session.cart_total() == Price::new(600) {
            break;
        }
    }

    session.set_name("Asha");
    session.set_phone("9876543210");
    let link = session.place_order().await.unwrap();

    let text = link
        .query_pairs()
        .find(|(k, _)| k == "text")
        .map(|(_, v)| v.into_owned())
        .unwrap();
    assert!(text.contains("*Total:* ₹600"));
}
