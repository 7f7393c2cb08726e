use axum::{extract::State, routing::get, Json, Router};

use adisyon_engine::KitchenTicket;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/kitchen/tickets", get(list_tickets))
}

/// Pending lines of open orders, oldest first.
async fn list_tickets(State(state): State<AppState>) -> Result<Json<Vec<KitchenTicket>>, AppError> {
    Ok(Json(state.engine.kitchen_tickets().await?))
}
