use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A status string was not a member of its enum.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown value '{value}', expected one of: {expected}")]
pub struct ParseStatusError {
    pub value: String,
    pub expected: &'static str,
}

/// Order lifecycle: `closed` is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Closed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Open => "open",
            OrderStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(OrderStatus::Open),
            "closed" => Ok(OrderStatus::Closed),
            _ => Err(ParseStatusError {
                value: s.to_string(),
                expected: "open, closed",
            }),
        }
    }
}

/// Per-line kitchen status. `pending` is initial; any move between statuses
/// is allowed (kitchen corrections re-open served lines in practice).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Pending,
    Prepared,
    Served,
    Cancelled,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Prepared => "prepared",
            ItemStatus::Served => "served",
            ItemStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ItemStatus::Pending),
            "prepared" => Ok(ItemStatus::Prepared),
            "served" => Ok(ItemStatus::Served),
            "cancelled" => Ok(ItemStatus::Cancelled),
            _ => Err(ParseStatusError {
                value: s.to_string(),
                expected: "pending, prepared, served, cancelled",
            }),
        }
    }
}

/// Accepted settlement methods, recorded on close.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Qr,
    MealVoucher,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Qr => "qr",
            PaymentMethod::MealVoucher => "meal-voucher",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "qr" => Ok(PaymentMethod::Qr),
            "meal-voucher" => Ok(PaymentMethod::MealVoucher),
            _ => Err(ParseStatusError {
                value: s.to_string(),
                expected: "cash, card, qr, meal-voucher",
            }),
        }
    }
}
