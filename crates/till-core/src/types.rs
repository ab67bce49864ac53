//! # Domain Types
//!
//! Core domain types used throughout the till register.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Sale       │   │   TillSession   │   │   SaleTotals    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  id (i64)       │   │  product_amount │       │
//! │  │  kind           │   │  opened_at      │   │  delivery_fee   │       │
//! │  │  product_amount │   │  closed_at?     │   │  count          │       │
//! │  │  delivery_fee   │   │  status         │   └─────────────────┘       │
//! │  │  created_at     │   └─────────────────┘                              │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    SaleKind     │   │  SessionStatus  │   │ RegisterStatus  │       │
//! │  │  OnPremises     │   │  Open           │   │ Open{..}        │       │
//! │  │  Delivery       │   │  Closed         │   │ Closed          │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Sales and sessions are linked only by time: a sale belongs to a session
//! when `opened_at <= created_at <= closed_at`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Sale Kind
// =============================================================================

/// Where the food was consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SaleKind {
    /// Eaten at the stand. Carries a single amount, no delivery fee.
    OnPremises,
    /// Delivered to the customer. Product amount plus a delivery fee.
    Delivery,
}

impl SaleKind {
    /// Stable lowercase name, as stored in the `sales.kind` column.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SaleKind::OnPremises => "on_premises",
            SaleKind::Delivery => "delivery",
        }
    }
}

impl std::fmt::Display for SaleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Sale {
    /// Sequential identifier assigned by the store.
    pub id: i64,
    pub kind: SaleKind,
    pub product_amount: Money,
    /// Always zero for `OnPremises`.
    pub delivery_fee: Money,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Product amount plus delivery fee.
    pub fn total(&self) -> Money {
        self.product_amount + self.delivery_fee
    }
}

/// A sale about to be recorded, before it has an id or timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewSale {
    pub kind: SaleKind,
    pub product_amount: Money,
    pub delivery_fee: Money,
}

impl NewSale {
    /// A sale eaten at the stand.
    pub fn on_premises(amount: Money) -> Self {
        NewSale {
            kind: SaleKind::OnPremises,
            product_amount: amount,
            delivery_fee: Money::zero(),
        }
    }

    /// A delivery with its fee.
    pub fn delivery(product_amount: Money, delivery_fee: Money) -> Self {
        NewSale {
            kind: SaleKind::Delivery,
            product_amount,
            delivery_fee,
        }
    }
}

// =============================================================================
// Till Session
// =============================================================================

/// Lifecycle state of a till session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Open,
    Closed,
}

/// A period from till open to till close.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct TillSession {
    pub id: i64,
    #[ts(as = "String")]
    pub opened_at: DateTime<Utc>,
    #[ts(as = "Option<String>")]
    pub closed_at: Option<DateTime<Utc>>,
    pub status: SessionStatus,
}

// =============================================================================
// Register Status
// =============================================================================

/// The derived two-state status of the register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum RegisterStatus {
    Open {
        session_id: i64,
        #[ts(as = "String")]
        opened_at: DateTime<Utc>,
    },
    Closed,
}

impl RegisterStatus {
    /// Derives the register status from the currently open session, if any.
    pub fn from_open_session(session: Option<&TillSession>) -> Self {
        match session {
            Some(s) => RegisterStatus::Open {
                session_id: s.id,
                opened_at: s.opened_at,
            },
            None => RegisterStatus::Closed,
        }
    }
}

// =============================================================================
// Sale Totals
// =============================================================================

/// Sums and count of one sale kind over a time window.
///
/// Never absent: an empty window yields zero sums and a zero count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SaleTotals {
    pub product_amount: Money,
    pub delivery_fee: Money,
    pub count: i64,
}

impl SaleTotals {
    pub fn new(product_amount: Money, delivery_fee: Money, count: i64) -> Self {
        SaleTotals {
            product_amount,
            delivery_fee,
            count,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_sale_kind_names() {
        assert_eq!(SaleKind::OnPremises.as_str(), "on_premises");
        assert_eq!(SaleKind::Delivery.to_string(), "delivery");
        assert_eq!(
            serde_json::to_string(&SaleKind::OnPremises).unwrap(),
            "\"on_premises\""
        );
    }

    #[test]
    fn test_new_sale_constructors() {
        let local = NewSale::on_premises(Money::from_cents(1000));
        assert_eq!(local.kind, SaleKind::OnPremises);
        assert!(local.delivery_fee.is_zero());

        let delivery = NewSale::delivery(Money::from_cents(2000), Money::from_cents(500));
        assert_eq!(delivery.kind, SaleKind::Delivery);
        assert_eq!(delivery.delivery_fee.cents(), 500);
    }

    #[test]
    fn test_register_status_serialization() {
        let closed = RegisterStatus::from_open_session(None);
        assert_eq!(
            serde_json::to_value(closed).unwrap(),
            serde_json::json!({ "status": "closed" })
        );

        let session = TillSession {
            id: 4,
            opened_at: at(9),
            closed_at: None,
            status: SessionStatus::Open,
        };
        let open = RegisterStatus::from_open_session(Some(&session));
        let json = serde_json::to_value(open).unwrap();
        assert_eq!(json["status"], "open");
        assert_eq!(json["session_id"], 4);
    }

    #[test]
    fn test_sale_total_includes_fee() {
        let sale = Sale {
            id: 1,
            kind: SaleKind::Delivery,
            product_amount: Money::from_cents(2000),
            delivery_fee: Money::from_cents(500),
            created_at: at(10),
        };
        assert_eq!(sale.total().cents(), 2500);
    }
}
