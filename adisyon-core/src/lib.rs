//! Shared domain vocabulary for the Adisyon POS: status enums, the menu
//! model, and monetary rounding.

pub mod models;
pub mod money;
pub mod status;

pub use models::MenuItem;
pub use money::round2;
pub use status::{ItemStatus, OrderStatus, ParseStatusError, PaymentMethod};
