//! Read-side assembly: order detail views, open-order and kitchen queues,
//! and the floor map of table occupancy.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use adisyon_core::{money::round2, ItemStatus, OrderStatus, PaymentMethod};

use crate::error::{EngineError, EngineResult};
use crate::OrderEngine;

/// Full order detail as served to clients. `total_amount` is the persisted
/// cache; `computed_total` is re-derived from the non-cancelled lines below
/// so a client can always cross-check the two.
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub id: Uuid,
    pub table_id: Uuid,
    pub table_name: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub payment_method: Option<PaymentMethod>,
    pub total_amount: f64,
    pub items: Vec<OrderItemView>,
    pub computed_total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OrderItemView {
    pub id: Uuid,
    pub order_id: Uuid,
    pub menu_item_id: Uuid,
    pub menu_item_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub status: ItemStatus,
    pub notes: Option<String>,
    pub line_total: f64,
}

/// One row of the open-orders board, newest first.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OpenOrderSummary {
    pub id: Uuid,
    pub table_id: Uuid,
    pub table_name: String,
    pub created_at: DateTime<Utc>,
    pub total_amount: f64,
    pub item_count: i64,
}

/// A pending line on an open order, as the kitchen display shows it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct KitchenTicket {
    pub item_id: Uuid,
    pub order_id: Uuid,
    pub table_name: String,
    pub menu_item_name: String,
    pub quantity: i64,
    pub notes: Option<String>,
    pub placed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Occupancy {
    Occupied,
    Available,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableStatus {
    pub id: Uuid,
    pub name: String,
    pub open_order_id: Option<Uuid>,
    pub occupancy: Occupancy,
}

#[derive(FromRow)]
struct OrderHeaderRow {
    id: Uuid,
    table_id: Uuid,
    table_name: String,
    status: String,
    created_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
    payment_method: Option<String>,
    total_amount: f64,
}

#[derive(FromRow)]
struct OrderItemRow {
    id: Uuid,
    order_id: Uuid,
    menu_item_id: Uuid,
    menu_item_name: String,
    quantity: i64,
    unit_price: f64,
    status: String,
    notes: Option<String>,
    line_total: f64,
}

#[derive(FromRow)]
struct TableStatusRow {
    id: Uuid,
    name: String,
    open_order_id: Option<Uuid>,
}

impl OrderEngine {
    /// Fetch an order with its lines, most recently added line first.
    pub async fn get_order_view(&self, order_id: Uuid) -> EngineResult<Option<OrderView>> {
        let header: Option<OrderHeaderRow> = sqlx::query_as(
            "SELECT o.id, o.table_id, t.name AS table_name, o.status, \
                    o.created_at, o.closed_at, o.payment_method, o.total_amount \
             FROM orders o \
             JOIN tables t ON t.id = o.table_id \
             WHERE o.id = ?",
        )
        .bind(order_id)
        .fetch_optional(&self.db.pool)
        .await?;
        let Some(header) = header else {
            return Ok(None);
        };

        let item_rows: Vec<OrderItemRow> = sqlx::query_as(
            "SELECT oi.id, oi.order_id, oi.menu_item_id, mi.name AS menu_item_name, \
                    oi.quantity, oi.unit_price, oi.status, oi.notes, \
                    ROUND(oi.quantity * oi.unit_price, 2) AS line_total \
             FROM order_items oi \
             JOIN menu_items mi ON mi.id = oi.menu_item_id \
             WHERE oi.order_id = ? \
             ORDER BY oi.created_at DESC, oi.rowid DESC",
        )
        .bind(order_id)
        .fetch_all(&self.db.pool)
        .await?;

        let mut items = Vec::with_capacity(item_rows.len());
        for row in item_rows {
            items.push(OrderItemView {
                id: row.id,
                order_id: row.order_id,
                menu_item_id: row.menu_item_id,
                menu_item_name: row.menu_item_name,
                quantity: row.quantity,
                unit_price: row.unit_price,
                status: row.status.parse()?,
                notes: row.notes,
                line_total: row.line_total,
            });
        }

        let computed_total = round2(
            items
                .iter()
                .filter(|i| i.status != ItemStatus::Cancelled)
                .map(|i| i.line_total)
                .sum(),
        );

        let payment_method = match header.payment_method {
            Some(raw) => Some(raw.parse()?),
            None => None,
        };

        Ok(Some(OrderView {
            id: header.id,
            table_id: header.table_id,
            table_name: header.table_name,
            status: header.status.parse()?,
            created_at: header.created_at,
            closed_at: header.closed_at,
            payment_method,
            total_amount: header.total_amount,
            items,
            computed_total,
        }))
    }

    pub(crate) async fn require_order_view(&self, order_id: Uuid) -> EngineResult<OrderView> {
        self.get_order_view(order_id)
            .await?
            .ok_or(EngineError::NotFound("order"))
    }

    /// All open orders, most recently opened first.
    pub async fn list_open_orders(&self) -> EngineResult<Vec<OpenOrderSummary>> {
        let rows = sqlx::query_as(
            "SELECT o.id, o.table_id, t.name AS table_name, o.created_at, o.total_amount, \
                    (SELECT COUNT(*) FROM order_items oi WHERE oi.order_id = o.id) AS item_count \
             FROM orders o \
             JOIN tables t ON t.id = o.table_id \
             WHERE o.status = 'open' \
             ORDER BY o.created_at DESC, o.rowid DESC",
        )
        .fetch_all(&self.db.pool)
        .await?;
        Ok(rows)
    }

    /// Pending lines of open orders in FIFO order. Lines on closed orders
    /// never appear here, whatever their own status.
    pub async fn kitchen_tickets(&self) -> EngineResult<Vec<KitchenTicket>> {
        let rows = sqlx::query_as(
            "SELECT oi.id AS item_id, o.id AS order_id, t.name AS table_name, \
                    mi.name AS menu_item_name, oi.quantity, oi.notes, \
                    oi.created_at AS placed_at \
             FROM order_items oi \
             JOIN orders o ON o.id = oi.order_id \
             JOIN tables t ON t.id = o.table_id \
             JOIN menu_items mi ON mi.id = oi.menu_item_id \
             WHERE o.status = 'open' AND oi.status = 'pending' \
             ORDER BY oi.created_at ASC, oi.rowid ASC",
        )
        .fetch_all(&self.db.pool)
        .await?;
        Ok(rows)
    }

    /// The floor map: every table with its open order, if any, in seeding
    /// order.
    pub async fn table_status(&self) -> EngineResult<Vec<TableStatus>> {
        let rows: Vec<TableStatusRow> = sqlx::query_as(
            "SELECT t.id, t.name, \
                    (SELECT o.id FROM orders o \
                     WHERE o.table_id = t.id AND o.status = 'open' \
                     ORDER BY o.created_at DESC, o.rowid DESC \
                     LIMIT 1) AS open_order_id \
             FROM tables t \
             ORDER BY t.rowid",
        )
        .fetch_all(&self.db.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let occupancy = if row.open_order_id.is_some() {
                    Occupancy::Occupied
                } else {
                    Occupancy::Available
                };
                TableStatus {
                    id: row.id,
                    name: row.name,
                    open_order_id: row.open_order_id,
                    occupancy,
                }
            })
            .collect())
    }
}
