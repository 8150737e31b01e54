//! Product endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use super::{check_limit, ApiError, AppState};
use crate::domain::Product;
use crate::product_actor::{ListProducts, NewProduct, ProductChange};

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProducts>,
) -> Result<Json<Vec<Product>>, ApiError> {
    check_limit(query.limit)?;
    Ok(Json(state.products.list(query).await?))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    state
        .products
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product not found"))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let fields = NewProduct::from_json(body)?;
    let product = state.products.create(fields).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn edit_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Product>, ApiError> {
    let change = ProductChange::from_json(body)?;
    Ok(Json(state.products.edit(&id, change).await?))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.products.destroy(&id).await?;
    Ok(Json(json!({ "success": true })))
}
