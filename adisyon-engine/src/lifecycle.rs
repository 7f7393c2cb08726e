use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use adisyon_core::{ItemStatus, OrderStatus, ParseStatusError, PaymentMethod};

use crate::error::{EngineError, EngineResult};
use crate::totals::{order_total, recompute_and_persist};
use crate::views::OrderView;
use crate::OrderEngine;

impl OrderEngine {
    /// Create-or-fetch the open order for a table. A retried tap from a
    /// waiter's device must land on the same order, so this is an upsert
    /// keyed on (table, open status), never a raw insert. The returned flag
    /// is true when a new order was opened.
    pub async fn open_or_create(&self, table_id: Uuid) -> EngineResult<(OrderView, bool)> {
        let mut tx = self.db.pool.begin().await?;

        let table: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM tables WHERE id = ?")
            .bind(table_id)
            .fetch_optional(&mut *tx)
            .await?;
        if table.is_none() {
            return Err(EngineError::NotFound("table"));
        }

        let existing: Option<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM orders \
             WHERE table_id = ? AND status = 'open' \
             ORDER BY created_at DESC, rowid DESC \
             LIMIT 1",
        )
        .bind(table_id)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some((order_id,)) = existing {
            tx.commit().await?;
            let view = self.require_order_view(order_id).await?;
            return Ok((view, false));
        }

        let order_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO orders (id, table_id, status, created_at, total_amount) \
             VALUES (?, ?, 'open', ?, 0)",
        )
        .bind(order_id)
        .bind(table_id)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        info!(%order_id, %table_id, "order opened");
        let view = self.require_order_view(order_id).await?;
        Ok((view, true))
    }

    /// Add a pending line to an open order, copying the menu item's current
    /// price onto the line.
    pub async fn add_item(
        &self,
        order_id: Uuid,
        menu_item_id: Uuid,
        quantity: i64,
        notes: Option<String>,
    ) -> EngineResult<OrderView> {
        if quantity < 1 {
            return Err(EngineError::InvalidArgument(
                "quantity must be at least 1".to_string(),
            ));
        }
        let notes = notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let mut tx = self.db.pool.begin().await?;

        let order: Option<(String,)> = sqlx::query_as("SELECT status FROM orders WHERE id = ?")
            .bind(order_id)
            .fetch_optional(&mut *tx)
            .await?;
        let (status,) = order.ok_or(EngineError::NotFound("order"))?;
        if status.parse::<OrderStatus>()? != OrderStatus::Open {
            return Err(EngineError::Conflict(
                "cannot add items to a closed order".to_string(),
            ));
        }

        let menu_item: Option<(f64,)> =
            sqlx::query_as("SELECT price FROM menu_items WHERE id = ? AND is_active = 1")
                .bind(menu_item_id)
                .fetch_optional(&mut *tx)
                .await?;
        let (unit_price,) = menu_item.ok_or(EngineError::NotFound("menu item"))?;

        sqlx::query(
            "INSERT INTO order_items \
             (id, order_id, menu_item_id, quantity, unit_price, status, notes, created_at) \
             VALUES (?, ?, ?, ?, ?, 'pending', ?, ?)",
        )
        .bind(Uuid::new_v4())
        .bind(order_id)
        .bind(menu_item_id)
        .bind(quantity)
        .bind(unit_price)
        .bind(&notes)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        recompute_and_persist(&mut tx, order_id).await?;
        tx.commit().await?;

        self.require_order_view(order_id).await
    }

    /// Move a line to any of the four statuses. There is deliberately no
    /// check on the parent order's status: the kitchen may correct a line
    /// (re-opening a served one included) even after the order closed, and
    /// cancelling must shrink the cached total at once.
    pub async fn set_item_status(&self, item_id: Uuid, new_status: &str) -> EngineResult<OrderView> {
        let status: ItemStatus = new_status
            .trim()
            .parse()
            .map_err(|e: ParseStatusError| EngineError::InvalidArgument(e.to_string()))?;

        let mut tx = self.db.pool.begin().await?;

        let row: Option<(Uuid,)> = sqlx::query_as("SELECT order_id FROM order_items WHERE id = ?")
            .bind(item_id)
            .fetch_optional(&mut *tx)
            .await?;
        let (order_id,) = row.ok_or(EngineError::NotFound("order item"))?;

        sqlx::query("UPDATE order_items SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(item_id)
            .execute(&mut *tx)
            .await?;

        recompute_and_persist(&mut tx, order_id).await?;
        tx.commit().await?;

        self.require_order_view(order_id).await
    }

    /// Close an open order. Closing is not idempotent: a second attempt is a
    /// Conflict. The total is re-derived from the line items inside the same
    /// transaction; the cached column is never trusted at close.
    pub async fn close_order(
        &self,
        order_id: Uuid,
        payment_method: &str,
    ) -> EngineResult<OrderView> {
        let method: PaymentMethod = payment_method
            .trim()
            .to_lowercase()
            .parse()
            .map_err(|e: ParseStatusError| EngineError::InvalidArgument(e.to_string()))?;

        let mut tx = self.db.pool.begin().await?;

        let order: Option<(String,)> = sqlx::query_as("SELECT status FROM orders WHERE id = ?")
            .bind(order_id)
            .fetch_optional(&mut *tx)
            .await?;
        let (status,) = order.ok_or(EngineError::NotFound("order"))?;
        if status.parse::<OrderStatus>()? != OrderStatus::Open {
            return Err(EngineError::Conflict("order is already closed".to_string()));
        }

        let total = order_total(&mut *tx, order_id).await?;
        sqlx::query(
            "UPDATE orders \
             SET status = 'closed', closed_at = ?, payment_method = ?, total_amount = ? \
             WHERE id = ?",
        )
        .bind(Utc::now())
        .bind(method.as_str())
        .bind(total)
        .bind(order_id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        info!(%order_id, method = method.as_str(), total, "order closed");
        self.require_order_view(order_id).await
    }
}
