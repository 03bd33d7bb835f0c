//! Moderator CRUD behavior through the full router.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::{Value, json};

use apparels_integration_tests::TestContext;

const MISSING_FIELDS: &str = "UID, displayName, email, and role are required";
const INVALID_ROLE: &str = "Role must be either \"admin\" or \"moderator\"";
const DUPLICATE_UID: &str = "Moderator with this UID already exists";

fn moderator_body(uid: &str, role: &str) -> Value {
    json!({
        "uid": uid,
        "displayName": "Dana",
        "email": "dana@example.com",
        "role": role,
    })
}

#[tokio::test]
async fn create_rejects_missing_fields() {
    let ctx = TestContext::new();

    let bodies = [
        json!({ "displayName": "D", "email": "d@x.com", "role": "admin" }),
        json!({ "uid": "u1", "email": "d@x.com", "role": "admin" }),
        json!({ "uid": "u1", "displayName": "D", "role": "admin" }),
        json!({ "uid": "u1", "displayName": "D", "email": "d@x.com" }),
        json!({ "uid": "", "displayName": "D", "email": "d@x.com", "role": "admin" }),
    ];

    for body in &bodies {
        let (status, response) = ctx.post("/api/moderators", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(response["error"], MISSING_FIELDS);
    }
    assert!(ctx.moderators.is_empty());
}

#[tokio::test]
async fn create_rejects_unknown_role_and_persists_nothing() {
    let ctx = TestContext::new();

    let (status, response) = ctx
        .post("/api/moderators", &moderator_body("u1", "superadmin"))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], INVALID_ROLE);
    assert!(ctx.moderators.is_empty());
}

#[tokio::test]
async fn create_returns_stored_document() {
    let ctx = TestContext::new();

    let (status, response) = ctx
        .post("/api/moderators", &moderator_body("u1", "moderator"))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(response["message"], "Moderator added successfully");
    let moderator = &response["moderator"];
    assert_eq!(moderator["uid"], "u1");
    assert_eq!(moderator["displayName"], "Dana");
    assert_eq!(moderator["role"], "moderator");
    assert_eq!(moderator["_id"].as_str().unwrap().len(), 24);
    assert!(moderator["createdAt"].is_string());
    // image was not submitted, so the key is absent
    assert!(moderator.get("image").is_none());
}

#[tokio::test]
async fn duplicate_uid_returns_400_and_keeps_one_document() {
    let ctx = TestContext::new();

    let (status, _) = ctx
        .post("/api/moderators", &moderator_body("u1", "admin"))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, response) = ctx
        .post("/api/moderators", &moderator_body("u1", "moderator"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], DUPLICATE_UID);

    assert_eq!(ctx.moderators.count_by_uid("u1"), 1);
}

#[tokio::test]
async fn list_filters_by_uid_equality() {
    let ctx = TestContext::new();

    ctx.post("/api/moderators", &moderator_body("u1", "admin"))
        .await;
    ctx.post("/api/moderators", &moderator_body("u2", "moderator"))
        .await;

    let (status, all) = ctx.get("/api/moderators").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);

    let (status, filtered) = ctx.get("/api/moderators?uid=u2").await;
    assert_eq!(status, StatusCode::OK);
    let filtered = filtered.as_array().unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["uid"], "u2");

    // a blank uid parameter behaves like no filter
    let (status, blank) = ctx.get("/api/moderators?uid=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(blank.as_array().unwrap().len(), 2);

    let (_, none) = ctx.get("/api/moderators?uid=unknown").await;
    assert_eq!(none, json!([]));
}

#[tokio::test]
async fn update_replaces_fields_and_echoes_them() {
    let ctx = TestContext::new();

    let (_, created) = ctx
        .post("/api/moderators", &moderator_body("u1", "moderator"))
        .await;
    let id = created["moderator"]["_id"].as_str().unwrap().to_owned();

    let (status, updated) = ctx
        .put(
            &format!("/api/moderators/{id}"),
            &json!({
                "uid": "u1",
                "displayName": "Dana Q",
                "email": "dana.q@example.com",
                "role": "admin",
                "image": "avatar.png",
            }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["message"], "Moderator updated successfully");
    let moderator = &updated["moderator"];
    assert_eq!(moderator["_id"], id);
    assert_eq!(moderator["displayName"], "Dana Q");
    assert_eq!(moderator["role"], "admin");
    assert_eq!(moderator["image"], "avatar.png");
    assert!(moderator["updatedAt"].is_string());

    let (_, listed) = ctx.get("/api/moderators?uid=u1").await;
    assert_eq!(listed[0]["email"], "dana.q@example.com");
    assert_eq!(listed[0]["role"], "admin");
}

#[tokio::test]
async fn update_without_image_clears_stored_image() {
    let ctx = TestContext::new();

    let mut body = moderator_body("u1", "admin");
    body["image"] = json!("old-avatar.png");
    let (status, created) = ctx.post("/api/moderators", &body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["moderator"]["image"], "old-avatar.png");
    let id = created["moderator"]["_id"].as_str().unwrap().to_owned();

    // a full replacement that omits image removes the stored one
    let (status, updated) = ctx
        .put(&format!("/api/moderators/{id}"), &moderator_body("u1", "admin"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(updated["moderator"].get("image").is_none());

    let (_, listed) = ctx.get("/api/moderators?uid=u1").await;
    assert!(listed[0].get("image").is_none());
}

#[tokio::test]
async fn update_enforces_same_validation_as_create() {
    let ctx = TestContext::new();

    let (_, created) = ctx
        .post("/api/moderators", &moderator_body("u1", "admin"))
        .await;
    let id = created["moderator"]["_id"].as_str().unwrap().to_owned();

    let (status, response) = ctx
        .put(&format!("/api/moderators/{id}"), &moderator_body("u1", "owner"))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], INVALID_ROLE);

    let (status, response) = ctx
        .put(&format!("/api/moderators/{id}"), &json!({ "uid": "u1" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], MISSING_FIELDS);
}

#[tokio::test]
async fn update_nonexistent_id_returns_404() {
    let ctx = TestContext::new();

    let (status, response) = ctx
        .put(
            "/api/moderators/ffffffffffffffffffffffff",
            &moderator_body("ghost", "admin"),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["error"], "Moderator not found");
    assert!(ctx.moderators.is_empty());
}

#[tokio::test]
async fn malformed_id_is_a_request_error() {
    let ctx = TestContext::new();

    let (status, response) = ctx.delete("/api/moderators/nope").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["error"], "Invalid moderator id");
}

#[tokio::test]
async fn delete_twice_returns_200_then_404() {
    let ctx = TestContext::new();

    let (_, created) = ctx
        .post("/api/moderators", &moderator_body("u1", "admin"))
        .await;
    let id = created["moderator"]["_id"].as_str().unwrap().to_owned();

    let (status, response) = ctx.delete(&format!("/api/moderators/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["message"], "Moderator deleted successfully");

    let (status, response) = ctx.delete(&format!("/api/moderators/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["error"], "Moderator not found");
}
