//! Product CRUD behavior through the full router.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;

use apparels_integration_tests::TestContext;
use apparels_server::routes::MAX_BODY_BYTES;

const MISSING_FIELDS: &str = "All fields (name, image, price) are required";

#[tokio::test]
async fn create_rejects_missing_fields_and_persists_nothing() {
    let ctx = TestContext::new();

    let bodies = [
        json!({ "image": "a.png", "price": 1.0 }),
        json!({ "name": "Shirt", "price": 1.0 }),
        json!({ "name": "Shirt", "image": "a.png" }),
        json!({ "name": "", "image": "a.png", "price": 1.0 }),
        json!({ "name": "Shirt", "image": "", "price": 1.0 }),
        json!({}),
    ];

    for body in &bodies {
        let (status, response) = ctx.post("/api/products", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(response["error"], MISSING_FIELDS);
    }
    assert!(ctx.products.is_empty());
}

#[tokio::test]
async fn create_accepts_zero_price() {
    let ctx = TestContext::new();

    let (status, response) = ctx
        .post(
            "/api/products",
            &json!({ "name": "Freebie", "image": "free.png", "price": 0 }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response["message"], "Product added successfully");
    assert_eq!(response["product"]["price"], 0.0);
}

#[tokio::test]
async fn create_then_list_round_trip() {
    let ctx = TestContext::new();

    let (status, created) = ctx
        .post(
            "/api/products",
            &json!({ "name": "Linen Shirt", "image": "shirt.png", "price": 39.5 }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let id = created["product"]["_id"].as_str().unwrap();
    assert_eq!(id.len(), 24, "hex ObjectId expected");
    assert!(created["product"]["createdAt"].is_string());
    assert!(created["product"].get("updatedAt").is_none());

    let (status, listed) = ctx.get("/api/products").await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["_id"], id);
    assert_eq!(listed[0]["name"], "Linen Shirt");
    assert_eq!(listed[0]["image"], "shirt.png");
    assert_eq!(listed[0]["price"], 39.5);
}

#[tokio::test]
async fn list_empty_collection_yields_empty_array() {
    let ctx = TestContext::new();

    let (status, response) = ctx.get("/api/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, json!([]));
}

#[tokio::test]
async fn update_nonexistent_id_returns_404_without_creating() {
    let ctx = TestContext::new();

    let (status, response) = ctx
        .put(
            "/api/products/ffffffffffffffffffffffff",
            &json!({ "name": "Ghost", "image": "g.png", "price": 1.0 }),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["error"], "Product not found");
    assert!(ctx.products.is_empty(), "upsert-free update must not create");
}

#[tokio::test]
async fn update_replaces_fields_and_echoes_them() {
    let ctx = TestContext::new();

    let (_, created) = ctx
        .post(
            "/api/products",
            &json!({ "name": "Cap", "image": "cap.png", "price": 10.0 }),
        )
        .await;
    let id = created["product"]["_id"].as_str().unwrap().to_owned();

    let (status, updated) = ctx
        .put(
            &format!("/api/products/{id}"),
            &json!({ "name": "Snapback", "image": "snap.png", "price": 12.5 }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["message"], "Product updated successfully");
    assert_eq!(updated["product"]["_id"], id);
    assert_eq!(updated["product"]["name"], "Snapback");
    assert_eq!(updated["product"]["price"], 12.5);
    assert!(updated["product"]["updatedAt"].is_string());

    let (_, listed) = ctx.get("/api/products").await;
    assert_eq!(listed[0]["name"], "Snapback");
    assert!(listed[0]["updatedAt"].is_string());
}

#[tokio::test]
async fn update_validates_body_before_touching_store() {
    let ctx = TestContext::new();

    let (status, response) = ctx
        .put(
            "/api/products/ffffffffffffffffffffffff",
            &json!({ "name": "NoPrice", "image": "x.png" }),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], MISSING_FIELDS);
}

#[tokio::test]
async fn malformed_id_is_a_request_error_not_a_500() {
    let ctx = TestContext::new();

    let (status, response) = ctx
        .put(
            "/api/products/not-an-object-id",
            &json!({ "name": "X", "image": "x.png", "price": 1.0 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "Invalid product id");

    let (status, response) = ctx.delete("/api/products/short").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "Invalid product id");
}

#[tokio::test]
async fn delete_twice_returns_200_then_404() {
    let ctx = TestContext::new();

    let (_, created) = ctx
        .post(
            "/api/products",
            &json!({ "name": "Socks", "image": "socks.png", "price": 4.99 }),
        )
        .await;
    let id = created["product"]["_id"].as_str().unwrap().to_owned();

    let (status, response) = ctx.delete(&format!("/api/products/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["message"], "Product deleted successfully");

    let (status, response) = ctx.delete(&format!("/api/products/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["error"], "Product not found");
}

#[tokio::test]
async fn liveness_route_confirms_serving() {
    let ctx = TestContext::new();

    let (status, body) = ctx.get_text("/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Backend Running");
}

#[tokio::test]
async fn oversized_body_is_rejected_at_the_transport_layer() {
    let ctx = TestContext::new();

    let oversized = "a".repeat(MAX_BODY_BYTES + 1);
    let request = Request::post("/api/products")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(oversized))
        .unwrap();

    let (status, _) = ctx.send(request).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(ctx.products.is_empty());
}
