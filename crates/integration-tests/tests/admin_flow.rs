//! Admin write path: form validation, image upload, create/edit/delete.

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use patisserie_admin::{
    AdminError, AdminGate, AdminSession, FormError, ImageBackendConfig, ImageStore, ImageUpload,
    SaveOutcome,
};
use patisserie_core::{Category, Price, Product, ProductId};
use patisserie_integration_tests::{docstore_client, product_json};

const PASSWORD: &str = "counter-key-7";

fn upload() -> ImageUpload {
    ImageUpload {
        filename: "truffle.jpg".to_owned(),
        content_type: "image/jpeg".to_owned(),
        bytes: vec![0xff, 0xd8, 0xff],
    }
}

fn existing_product() -> Product {
    Product {
        id: ProductId::new("p1"),
        name: "Chocolate Truffle".to_owned(),
        price: Price::new(550),
        category: Category::Cakes,
        description: "Dark chocolate layers".to_owned(),
        image: "https://img.test/p1.jpg".to_owned(),
        updated_at: None,
    }
}

/// A logged-in admin session wired to one mock server playing both the
/// document database and the blob image host.
fn admin_session(server: &MockServer) -> AdminSession {
    let gate = AdminGate::new(SecretString::from(PASSWORD));
    let images = ImageStore::new(&ImageBackendConfig::Blob {
        base_url: server.uri(),
        api_key: "blob-key".to_owned(),
        api_secret: SecretString::from("blob-secret-9"),
    });
    let mut session = AdminSession::new(gate, docstore_client(&server.uri()), images);
    assert!(session.login(PASSWORD));
    session
}

fn fill_create_form(session: &mut AdminSession, with_image: bool) {
    session.open_create_form();
    let form = session.form_mut().unwrap();
    form.name = "Red Velvet".to_owned();
    form.price = "600".to_owned();
    form.category = Some(Category::Cakes);
    form.description = "Cream cheese frosting".to_owned();
    if with_image {
        form.select_image(upload());
    }
}

#[tokio::test]
async fn test_create_uploads_image_then_writes_document() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "url": "https://img.test/red-velvet.jpg" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/products"))
        .and(body_partial_json(json!({
            "name": "Red Velvet",
            "price": 600,
            "image": "https://img.test/red-velvet.jpg",
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(product_json("p9", "Red Velvet", 600, "Cakes")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut session = admin_session(&server);
    fill_create_form(&mut session, true);

    let outcome = session.save().await.unwrap();
    assert!(matches!(outcome, SaveOutcome::Created(p) if p.id == ProductId::new("p9")));

    // Form is dropped after a successful save.
    assert!(session.form().is_none());
    assert!(!session.saving());
}

#[tokio::test]
async fn test_create_without_image_is_rejected_before_any_request() {
    let server = MockServer::start().await;

    let mut session = admin_session(&server);
    fill_create_form(&mut session, false);

    let err = session.save().await.unwrap_err();
    assert!(matches!(
        err,
        AdminError::Validation(FormError::MissingImage)
    ));

    // Nothing hit the wire and the form survives for correction.
    assert!(server.received_requests().await.unwrap().is_empty());
    assert!(session.form().is_some());
}

#[tokio::test]
async fn test_edit_without_new_image_keeps_existing_url() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/v1/products/p1"))
        .and(body_partial_json(json!({
            "price": 575,
            "image": "https://img.test/p1.jpg",
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(product_json("p1", "Chocolate Truffle", 575, "Cakes")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut session = admin_session(&server);
    session.open_edit_form(&existing_product());
    session.form_mut().unwrap().price = "575".to_owned();

    let outcome = session.save().await.unwrap();
    assert!(matches!(outcome, SaveOutcome::Updated(_)));

    // No upload happened; the only request was the PATCH, carrying a fresh
    // updatedAt stamp.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("updatedAt").is_some());
}

#[tokio::test]
async fn test_upload_failure_aborts_save_and_keeps_form() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(500).set_body_string("disk full"))
        .mount(&server)
        .await;

    let mut session = admin_session(&server);
    fill_create_form(&mut session, true);

    let err = session.save().await.unwrap_err();
    assert!(matches!(err, AdminError::Image(_)));

    // No document write was attempted; the save flag is released.
    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() == "/upload"));
    assert!(session.form().is_some());
    assert!(!session.saving());
}

#[tokio::test]
async fn test_delete_swallows_image_removal_failure() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/products/p1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/images"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = admin_session(&server);
    let product = existing_product();

    // The product deletion succeeds even though the blob delete fails.
    session.delete(&product.id, &product.image).await.unwrap();
}

#[tokio::test]
async fn test_delete_failure_skips_image_removal() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/products/p1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let mut session = admin_session(&server);
    let product = existing_product();

    let err = session.delete(&product.id, &product.image).await.unwrap_err();
    assert!(matches!(err, AdminError::DocStore(_)));

    // The image was never touched.
    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() != "/images"));
}
