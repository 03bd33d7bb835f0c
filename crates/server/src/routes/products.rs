//! Product resource handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
};
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::AppError;
use crate::models::{NewProduct, ProductResponse, ProductUpdate};
use crate::state::AppState;

const MISSING_FIELDS: &str = "All fields (name, image, price) are required";

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create).get(list))
        .route("/{id}", put(update).delete(remove))
}

/// Incoming product body for create and update.
///
/// Fields are optional at the serde level so a missing field becomes a 400
/// with the fixed message instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub name: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
}

impl ProductPayload {
    /// Require name and image non-empty and price present (zero is valid).
    fn validate(self) -> Result<NewProduct, AppError> {
        match (self.name, self.image, self.price) {
            (Some(name), Some(image), Some(price)) if !name.is_empty() && !image.is_empty() => {
                Ok(NewProduct { name, image, price })
            }
            _ => Err(AppError::BadRequest(MISSING_FIELDS.to_string())),
        }
    }
}

/// Echo of the submitted fields returned by a successful update.
///
/// Not re-fetched from the store; the timestamp is the one written in `$set`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdatedProduct {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    image: String,
    price: f64,
    updated_at: DateTime<Utc>,
}

fn parse_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::BadRequest("Invalid product id".to_string()))
}

/// `POST /api/products`
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<ProductPayload>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let product = body.validate()?;
    let stored = state
        .products()
        .insert(product)
        .await
        .map_err(AppError::db("add product"))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Product added successfully",
            "product": ProductResponse::from(stored),
        })),
    ))
}

/// `GET /api/products`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state
        .products()
        .list()
        .await
        .map_err(AppError::db("fetch products"))?;

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

/// `PUT /api/products/{id}`
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ProductPayload>,
) -> Result<Json<Value>, AppError> {
    let product = body.validate()?;
    let id = parse_id(&id)?;

    let update = ProductUpdate::new(product.name, product.image, product.price);
    let matched = state
        .products()
        .update(id, update.clone())
        .await
        .map_err(AppError::db("update product"))?;
    if !matched {
        return Err(AppError::NotFound("Product not found".to_string()));
    }

    Ok(Json(json!({
        "message": "Product updated successfully",
        "product": UpdatedProduct {
            id: id.to_hex(),
            name: update.name,
            image: update.image,
            price: update.price,
            updated_at: update.updated_at.to_chrono(),
        },
    })))
}

/// `DELETE /api/products/{id}`
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id)?;

    let deleted = state
        .products()
        .delete(id)
        .await
        .map_err(AppError::db("delete product"))?;
    if !deleted {
        return Err(AppError::NotFound("Product not found".to_string()));
    }

    Ok(Json(json!({ "message": "Product deleted successfully" })))
}
