use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sellable menu entry. Deactivation (never deletion) removes it from
/// ordering surfaces; historical order lines keep the price they copied at
/// insertion time, so later edits never change past orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
