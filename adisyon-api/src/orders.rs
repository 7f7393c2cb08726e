use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use adisyon_engine::{OpenOrderSummary, OrderView};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OpenOrderRequest {
    pub table_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub menu_item_id: Uuid,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    pub notes: Option<String>,
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
pub struct CloseOrderRequest {
    pub payment_method: String,
}

#[derive(Debug, Deserialize)]
pub struct SetItemStatusRequest {
    pub status: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/orders", post(open_order))
        .route("/api/orders/open", get(list_open_orders))
        .route("/api/orders/{id}", get(get_order))
        .route("/api/orders/{id}/items", post(add_item))
        .route("/api/orders/{id}/close", post(close_order))
        .route("/api/order-items/{id}", patch(set_item_status))
}

/// POST /api/orders is an upsert on the table's open order: 201 when a new
/// order was opened, 200 when an existing one was returned.
async fn open_order(
    State(state): State<AppState>,
    Json(req): Json<OpenOrderRequest>,
) -> Result<(StatusCode, Json<OrderView>), AppError> {
    let (order, created) = state.engine.open_or_create(req.table_id).await?;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(order)))
}

async fn list_open_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<OpenOrderSummary>>, AppError> {
    Ok(Json(state.engine.list_open_orders().await?))
}

async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderView>, AppError> {
    let order = state
        .engine
        .get_order_view(id)
        .await?
        .ok_or_else(|| AppError::NotFound("order not found".to_string()))?;
    Ok(Json(order))
}

async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<OrderView>), AppError> {
    let order = state
        .engine
        .add_item(id, req.menu_item_id, req.quantity, req.notes)
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

async fn close_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CloseOrderRequest>,
) -> Result<Json<OrderView>, AppError> {
    Ok(Json(state.engine.close_order(id, &req.payment_method).await?))
}

async fn set_item_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetItemStatusRequest>,
) -> Result<Json<OrderView>, AppError> {
    Ok(Json(state.engine.set_item_status(id, &req.status).await?))
}
