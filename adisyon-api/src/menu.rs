use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use adisyon_core::MenuItem;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateMenuItemRequest {
    pub name: String,
    #[serde(default)]
    pub category: String,
    pub price: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMenuItemRequest {
    pub is_active: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/menu-items", get(list_menu_items).post(create_menu_item))
        .route("/api/menu-items/{id}", patch(update_menu_item))
}

async fn list_menu_items(State(state): State<AppState>) -> Result<Json<Vec<MenuItem>>, AppError> {
    Ok(Json(state.engine.list_menu_items().await?))
}

async fn create_menu_item(
    State(state): State<AppState>,
    Json(req): Json<CreateMenuItemRequest>,
) -> Result<(StatusCode, Json<MenuItem>), AppError> {
    let item = state
        .engine
        .create_menu_item(&req.name, &req.category, req.price)
        .await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_menu_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMenuItemRequest>,
) -> Result<StatusCode, AppError> {
    state.engine.set_menu_item_active(id, req.is_active).await?;
    Ok(StatusCode::NO_CONTENT)
}
