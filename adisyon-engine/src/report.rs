//! End-of-day reporting over closed orders. Every figure keys off the day
//! part of `closed_at`, so an order opened before midnight but paid after
//! counts towards the day it was paid.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

use adisyon_core::PaymentMethod;

use crate::error::{EngineError, EngineResult};
use crate::OrderEngine;

#[derive(Debug, Clone, Serialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    pub summary: ReportSummary,
    pub payments: Vec<PaymentBreakdown>,
    pub top_items: Vec<TopItem>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ReportSummary {
    pub closed_orders: i64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentBreakdown {
    pub method: PaymentMethod,
    pub count: i64,
    pub amount: f64,
}

/// Top seller by non-cancelled quantity, revenue as tiebreak.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TopItem {
    pub name: String,
    pub qty: i64,
    pub amount: f64,
}

#[derive(FromRow)]
struct PaymentRow {
    method: String,
    count: i64,
    amount: f64,
}

impl OrderEngine {
    /// Revenue, payment mix and top sellers for one calendar day (UTC).
    /// `date` is `YYYY-MM-DD`; `None` means today. A day with no closed
    /// orders yields an all-zero report, never an error.
    pub async fn daily_report(&self, date: Option<&str>) -> EngineResult<DailyReport> {
        let day = match date {
            None => Utc::now().date_naive(),
            Some(raw) => raw.trim().parse::<NaiveDate>().map_err(|_| {
                EngineError::InvalidArgument(format!(
                    "invalid date '{raw}', expected YYYY-MM-DD"
                ))
            })?,
        };
        let day_key = day.to_string();

        let summary: ReportSummary = sqlx::query_as(
            "SELECT COUNT(*) AS closed_orders, \
                    ROUND(COALESCE(SUM(total_amount), 0), 2) AS revenue \
             FROM orders \
             WHERE status = 'closed' AND date(closed_at) = date(?)",
        )
        .bind(&day_key)
        .fetch_one(&self.db.pool)
        .await?;

        let payment_rows: Vec<PaymentRow> = sqlx::query_as(
            "SELECT payment_method AS method, COUNT(*) AS count, \
                    ROUND(COALESCE(SUM(total_amount), 0), 2) AS amount \
             FROM orders \
             WHERE status = 'closed' AND date(closed_at) = date(?) \
             GROUP BY payment_method \
             ORDER BY amount DESC",
        )
        .bind(&day_key)
        .fetch_all(&self.db.pool)
        .await?;

        let mut payments = Vec::with_capacity(payment_rows.len());
        for row in payment_rows {
            payments.push(PaymentBreakdown {
                method: row.method.parse()?,
                count: row.count,
                amount: row.amount,
            });
        }

        let top_items: Vec<TopItem> = sqlx::query_as(
            "SELECT mi.name AS name, \
                    SUM(oi.quantity) AS qty, \
                    ROUND(SUM(oi.quantity * oi.unit_price), 2) AS amount \
             FROM order_items oi \
             JOIN orders o ON o.id = oi.order_id \
             JOIN menu_items mi ON mi.id = oi.menu_item_id \
             WHERE o.status = 'closed' AND date(o.closed_at) = date(?) \
                   AND oi.status != 'cancelled' \
             GROUP BY mi.id, mi.name \
             ORDER BY qty DESC, amount DESC \
             LIMIT 10",
        )
        .bind(&day_key)
        .fetch_all(&self.db.pool)
        .await?;

        Ok(DailyReport {
            date: day,
            summary,
            payments,
            top_items,
        })
    }
}
