use sqlx::{Executor, Sqlite, Transaction};
use tracing::debug;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::OrderEngine;

/// Authoritative order total: non-cancelled `quantity * unit_price` summed
/// and rounded to 2 decimals in SQL. The persisted `total_amount` column is
/// only ever a cache of this value.
pub(crate) async fn order_total<'e, E>(executor: E, order_id: Uuid) -> Result<f64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let (total,): (f64,) = sqlx::query_as(
        "SELECT ROUND(COALESCE(SUM(quantity * unit_price), 0), 2) \
         FROM order_items \
         WHERE order_id = ? AND status != 'cancelled'",
    )
    .bind(order_id)
    .fetch_one(executor)
    .await?;
    Ok(total)
}

/// Recompute the authoritative total and persist it on the order row, within
/// the caller's transaction. Invoked at every mutation boundary so the cache
/// never drifts from the line items.
pub(crate) async fn recompute_and_persist(
    tx: &mut Transaction<'_, Sqlite>,
    order_id: Uuid,
) -> Result<f64, sqlx::Error> {
    let total = order_total(&mut **tx, order_id).await?;
    sqlx::query("UPDATE orders SET total_amount = ? WHERE id = ?")
        .bind(total)
        .bind(order_id)
        .execute(&mut **tx)
        .await?;
    debug!(%order_id, total, "order total recomputed");
    Ok(total)
}

impl OrderEngine {
    /// Single source of truth for an order's total, independent of the
    /// cached `total_amount`.
    pub async fn compute_total(&self, order_id: Uuid) -> EngineResult<f64> {
        Ok(order_total(&self.db.pool, order_id).await?)
    }
}
