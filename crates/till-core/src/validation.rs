//! # Validation Module
//!
//! Input validation for sale amounts and listing parameters.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Register form                                                │
//! │  └── min_value on the number inputs (immediate feedback)               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: HTTP handler (axum Json extractor)                           │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: decimal → Money, amount rules                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK constraints on amounts                                      │
//! │  └── Partial UNIQUE index: one open session                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Amount Rules
//! - decimals are rounded to whole cents first (half away from zero)
//! - product amount: strictly greater than zero after rounding, for both kinds
//! - delivery fee: zero or more; must be zero for on-premises sales

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{NewSale, SaleKind};
use crate::{MAX_LISTING_LIMIT, MAX_SALE_AMOUNT_CENTS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Amount Validators
// =============================================================================

/// Converts a decimal amount from a request body to `Money`.
///
/// The value is rounded to whole cents here, before any amount rule runs,
/// so `0.004` becomes zero and then fails the `> 0` product rule.
///
/// ## Example
/// ```rust
/// use till_core::validation::parse_amount;
///
/// assert_eq!(parse_amount("amount", 12.5).unwrap().cents(), 1250);
/// assert!(parse_amount("amount", f64::NAN).is_err());
/// ```
pub fn parse_amount(field: &str, value: f64) -> ValidationResult<Money> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    Money::from_decimal(value).ok_or_else(|| ValidationError::OutOfRange {
        field: field.to_string(),
        min: 0,
        max: MAX_SALE_AMOUNT_CENTS / 100,
    })
}

/// Validates a product amount: must be > 0 and below the sanity cap.
pub fn validate_product_amount(field: &str, amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    check_cap(field, amount)
}

/// Validates a delivery fee: must be >= 0 and below the sanity cap.
pub fn validate_delivery_fee(fee: Money) -> ValidationResult<()> {
    if fee.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "delivery_fee".to_string(),
        });
    }

    check_cap("delivery_fee", fee)
}

/// Validates a sale before it is recorded.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Register: Delivery                                                     │
/// │                                                                         │
/// │  Cashier enters products R$ 20.00, fee R$ 5.00                         │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_sale(&sale) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── products <= 0?     → "product_amount must be greater ..."    │
/// │       ├── fee < 0?           → "delivery_fee must not be negative"     │
/// │       ├── on-premises + fee? → "delivery_fee must be between 0 and 0"  │
/// │       │                                                                 │
/// │       └── OK → record_sale                                             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_sale(sale: &NewSale) -> ValidationResult<()> {
    let amount_field = match sale.kind {
        SaleKind::OnPremises => "amount",
        SaleKind::Delivery => "product_amount",
    };
    validate_product_amount(amount_field, sale.product_amount)?;
    validate_delivery_fee(sale.delivery_fee)?;

    if sale.kind == SaleKind::OnPremises && !sale.delivery_fee.is_zero() {
        return Err(ValidationError::OutOfRange {
            field: "delivery_fee".to_string(),
            min: 0,
            max: 0,
        });
    }

    Ok(())
}

fn check_cap(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.cents() > MAX_SALE_AMOUNT_CENTS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_SALE_AMOUNT_CENTS / 100,
        });
    }
    Ok(())
}

// =============================================================================
// Listing Validators
// =============================================================================

/// Validates the `limit` of a listing request (1..=MAX_LISTING_LIMIT).
pub fn validate_listing_limit(limit: i64) -> ValidationResult<i64> {
    if !(1..=MAX_LISTING_LIMIT).contains(&limit) {
        return Err(ValidationError::OutOfRange {
            field: "limit".to_string(),
            min: 1,
            max: MAX_LISTING_LIMIT,
        });
    }

    Ok(limit)
}

// =============================================================================
// Unit Tests
// =============================================================================
