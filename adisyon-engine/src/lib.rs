//! The order engine: lifecycle transitions, total recomputation, query
//! assembly and daily reporting for the POS core.

pub mod error;
pub mod lifecycle;
pub mod menu;
pub mod report;
pub mod totals;
pub mod views;

pub use error::{EngineError, EngineResult};
pub use report::{DailyReport, PaymentBreakdown, ReportSummary, TopItem};
pub use views::{KitchenTicket, Occupancy, OpenOrderSummary, OrderItemView, OrderView, TableStatus};

use adisyon_store::Db;

/// Owns the store handle and exposes every operation the request shell calls
/// into. Mutating operations read, validate, write and recompute inside a
/// single transaction, so two concurrent mutations of the same order can
/// never both persist a stale total.
#[derive(Clone)]
pub struct OrderEngine {
    db: Db,
}

impl OrderEngine {
    pub fn new(db: Db) -> Self {
        Self { db }
    }
}
