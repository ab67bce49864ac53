//! # till-core: Pure Domain Logic for the Till Register
//!
//! Everything the till register knows about money, sales, till sessions and
//! reports, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Till Register Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/till-api (axum routes)                     │   │
//! │  │   /till/open  /till/close  /sales/*  /report                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  report   │  │  period   │  │   │
//! │  │   │   Sale    │  │   Money   │  │  Report   │  │ day bounds│  │   │
//! │  │   │TillSession│  │  (cents)  │  │ totals    │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 till-db (Ledger Store, SQLite)                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Sale, TillSession, SaleTotals, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`report`] - Report built from per-kind totals
//! - [`period`] - Calendar dates to inclusive instant windows
//! - [`error`] - Domain error types
//! - [`validation`] - Sale amount and date range rules
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::money::Money;
//! use till_core::report::Report;
//! use till_core::types::SaleTotals;
//!
//! let on_premises = SaleTotals::new(Money::from_cents(1000), Money::zero(), 1);
//! let delivery = SaleTotals::new(Money::from_cents(2000), Money::from_cents(500), 1);
//!
//! let report = Report::from_totals(&on_premises, &delivery);
//! assert_eq!(report.grand_total.cents(), 3500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod period;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use period::ReportPeriod;
pub use report::{Report, SessionReport};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Upper bound for a single sale amount, in cents (R$ 1,000,000.00).
///
/// A food stand never sells this much in one ticket; anything above is a
/// typing mistake on the register form.
pub const MAX_SALE_AMOUNT_CENTS: i64 = 100_000_000;

/// Largest page size accepted by listing operations.
pub const MAX_LISTING_LIMIT: i64 = 500;
