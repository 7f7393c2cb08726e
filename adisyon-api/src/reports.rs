use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use adisyon_engine::DailyReport;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DailyReportQuery {
    pub date: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/reports/daily", get(daily_report))
}

/// GET /api/reports/daily?date=YYYY-MM-DD, defaulting to today (UTC).
async fn daily_report(
    State(state): State<AppState>,
    Query(query): Query<DailyReportQuery>,
) -> Result<Json<DailyReport>, AppError> {
    Ok(Json(state.engine.daily_report(query.date.as_deref()).await?))
}
