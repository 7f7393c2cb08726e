use axum::{extract::State, routing::get, Json, Router};

use adisyon_engine::TableStatus;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/tables", get(list_tables))
}

/// The floor map: every table with its occupancy and open order, if any.
async fn list_tables(State(state): State<AppState>) -> Result<Json<Vec<TableStatus>>, AppError> {
    Ok(Json(state.engine.table_status().await?))
}
