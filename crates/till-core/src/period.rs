//! # Report Periods
//!
//! Turns what the cashier picks on the report form (two calendar dates) or a
//! till session into an inclusive window of instants for the Ledger Store.
//!
//! ```text
//! from = 2024-05-10, to = 2024-05-11, offset = -03:00
//!
//!   2024-05-10 00:00:00 -03:00  ──►  2024-05-10T03:00:00Z            (from)
//!   2024-05-11 23:59:59.999999999 -03:00
//!                               ──►  2024-05-12T02:59:59.999999999Z  (to)
//! ```
//!
//! A missing bound is open-ended; both missing means all time.
//!
//! Instants are stored as RFC 3339 text and compared as strings, which only
//! orders correctly for four-digit years. A bound whose UTC instant falls
//! outside years 0000..=9999 is rejected, even when the local date is inside.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::TillSession;
use crate::validation::ValidationResult;

/// Date format accepted for report bounds.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Years whose instants sort correctly as stored text.
const STORABLE_YEARS: std::ops::RangeInclusive<i32> = 0..=9999;

/// Inclusive `[from, to]` window of instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

impl ReportPeriod {
    /// Every sale ever recorded.
    pub const fn all_time() -> Self {
        ReportPeriod {
            from: None,
            to: None,
        }
    }

    /// Window between two instants, both inclusive.
    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        ReportPeriod {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Window of a till session. An open session runs until `now`.
    pub fn of_session(session: &TillSession, now: DateTime<Utc>) -> Self {
        ReportPeriod::between(session.opened_at, session.closed_at.unwrap_or(now))
    }

    /// Window covering whole local days from `from` to `to`.
    ///
    /// ```rust
    /// use chrono::{FixedOffset, NaiveDate};
    /// use till_core::period::ReportPeriod;
    ///
    /// let day = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
    /// let utc = FixedOffset::east_opt(0).unwrap();
    /// let period = ReportPeriod::from_dates(Some(day), Some(day), utc).unwrap();
    ///
    /// assert_eq!(period.from.unwrap().to_rfc3339(), "2024-05-10T00:00:00+00:00");
    /// assert!(period.to.unwrap() > period.from.unwrap());
    /// ```
    pub fn from_dates(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        offset: FixedOffset,
    ) -> ValidationResult<Self> {
        if let (Some(f), Some(t)) = (from, to) {
            if f > t {
                return Err(ValidationError::InvertedRange {
                    from: f.format(DATE_FORMAT).to_string(),
                    to: t.format(DATE_FORMAT).to_string(),
                });
            }
        }

        let from = from
            .map(|d| storable("from", start_of_day(d, offset)))
            .transpose()?;
        let to = to
            .map(|d| end_of_day(d, offset).and_then(|at| storable("to", at)))
            .transpose()?;

        Ok(ReportPeriod { from, to })
    }
}

/// Parses a `YYYY-MM-DD` query value.
pub fn parse_date(field: &str, value: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: format!("expected YYYY-MM-DD ({e})"),
        }
    })
}

fn start_of_day(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    // A fixed offset has no gaps or folds, so the local time always maps
    // to exactly one instant.
    let local = date.and_time(NaiveTime::MIN);
    offset
        .from_local_datetime(&local)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&local))
}

fn end_of_day(date: NaiveDate, offset: FixedOffset) -> ValidationResult<DateTime<Utc>> {
    let next = date.succ_opt().ok_or_else(|| ValidationError::InvalidFormat {
        field: "to".to_string(),
        reason: "date is out of range".to_string(),
    })?;

    Ok(start_of_day(next, offset) - Duration::nanoseconds(1))
}

fn storable(field: &str, at: DateTime<Utc>) -> ValidationResult<DateTime<Utc>> {
    if STORABLE_YEARS.contains(&at.year()) {
        Ok(at)
    } else {
        Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "date is out of range".to_string(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SessionStatus;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn brt() -> FixedOffset {
        FixedOffset::west_opt(3 * 3600).unwrap()
    }

    fn within(period: &ReportPeriod, at: DateTime<Utc>) -> bool {
        period.from.map_or(true, |from| at >= from) && period.to.map_or(true, |to| at <= to)
    }

    #[test]
    fn test_single_day_is_inclusive() {
        let day = date(2024, 5, 10);
        let period = ReportPeriod::from_dates(Some(day), Some(day), utc()).unwrap();

        let morning = Utc.with_ymd_and_hms(2024, 5, 10, 0, 0, 0).unwrap();
        let night = Utc.with_ymd_and_hms(2024, 5, 10, 23, 59, 59).unwrap();
        let next_day = Utc.with_ymd_and_hms(2024, 5, 11, 0, 0, 0).unwrap();

        assert!(within(&period, morning));
        assert!(within(&period, night));
        assert!(!within(&period, next_day));
    }

    #[test]
    fn test_offset_shifts_day_bounds() {
        let day = date(2024, 5, 10);
        let period = ReportPeriod::from_dates(Some(day), Some(day), brt()).unwrap();

        assert_eq!(
            period.from.unwrap(),
            Utc.with_ymd_and_hms(2024, 5, 10, 3, 0, 0).unwrap()
        );
        // 23:30 local on the 10th is 02:30 UTC on the 11th.
        assert!(within(&period, Utc.with_ymd_and_hms(2024, 5, 11, 2, 30, 0).unwrap()));
        assert!(!within(&period, Utc.with_ymd_and_hms(2024, 5, 11, 3, 0, 0).unwrap()));
    }

    #[test]
    fn test_inverted_range_is_rejected() {
        let err = ReportPeriod::from_dates(Some(date(2024, 5, 2)), Some(date(2024, 5, 1)), utc())
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvertedRange { .. }));
    }

    #[test]
    fn test_open_ended_bounds() {
        let period = ReportPeriod::from_dates(Some(date(2024, 5, 10)), None, utc()).unwrap();
        assert!(period.to.is_none());
        assert!(within(&period, Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()));
        assert!(!within(&period, Utc.with_ymd_and_hms(2024, 5, 9, 23, 0, 0).unwrap()));

        let all = ReportPeriod::from_dates(None, None, utc()).unwrap();
        assert_eq!(all, ReportPeriod::all_time());
    }

    #[test]
    fn test_bounds_past_year_9999_are_rejected() {
        // Local 9999-12-31 ends at 10000-01-01T02:59:59Z in -03:00.
        let last = date(9999, 12, 31);
        let err = ReportPeriod::from_dates(Some(date(9999, 12, 30)), Some(last), brt()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { ref field, .. } if field == "to"));

        // Its start, 9999-12-31T03:00:00Z, is still storable.
        assert!(ReportPeriod::from_dates(Some(last), None, brt()).is_ok());

        // Without an offset the same day still fits.
        let period = ReportPeriod::from_dates(Some(last), Some(last), utc()).unwrap();
        assert_eq!(period.to.unwrap().year(), 9999);
    }

    #[test]
    fn test_bounds_before_year_0000_are_rejected() {
        let first = date(0, 1, 1);
        let east = FixedOffset::east_opt(3 * 3600).unwrap();

        let err = ReportPeriod::from_dates(Some(first), None, east).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { ref field, .. } if field == "from"));
        assert!(ReportPeriod::from_dates(Some(first), Some(first), brt()).is_ok());
    }

    #[test]
    fn test_session_period() {
        let opened = Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let mut session = TillSession {
            id: 1,
            opened_at: opened,
            closed_at: None,
            status: SessionStatus::Open,
        };
        assert_eq!(ReportPeriod::of_session(&session, now), ReportPeriod::between(opened, now));

        let closed = Utc.with_ymd_and_hms(2024, 5, 10, 18, 0, 0).unwrap();
        session.closed_at = Some(closed);
        session.status = SessionStatus::Closed;
        assert_eq!(ReportPeriod::of_session(&session, now).to, Some(closed));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("from", "2024-05-10").unwrap(), date(2024, 5, 10));
        assert_eq!(parse_date("from", " 2024-05-10 ").unwrap(), date(2024, 5, 10));
        assert!(parse_date("from", "10/05/2024").is_err());
        assert!(parse_date("to", "2024-13-01").is_err());
    }
}
