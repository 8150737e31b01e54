//! Order endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use super::{check_limit, ApiError, AppState};
use crate::domain::{Order, PopulatedOrder};
use crate::order_actor::{ListOrders, NewOrder, OrderChange};

/// `GET /orders?offset&limit&productId&status`
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<ListOrders>,
) -> Result<Json<Vec<Order>>, ApiError> {
    check_limit(query.limit)?;
    Ok(Json(state.orders.list(query).await?))
}

/// `GET /orders/{id}`
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PopulatedOrder>, ApiError> {
    state
        .orders
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Order not found"))
}

/// `POST /orders`
pub async fn create_order(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<PopulatedOrder>), ApiError> {
    let fields = NewOrder::from_json(body)?;
    let order = state.orders.create(fields).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// `PATCH /orders/{id}`
pub async fn edit_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<PopulatedOrder>, ApiError> {
    let change = OrderChange::from_json(body)?;
    Ok(Json(state.orders.edit(&id, change).await?))
}

/// `DELETE /orders/{id}`
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    state.orders.destroy(&id).await?;
    Ok(Json(json!({ "success": true, "message": "Order deleted successfully." })))
}
