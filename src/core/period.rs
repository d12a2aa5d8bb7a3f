//! Calendar period helpers.
//!
//! Date-range arithmetic for monthly reporting: first/last day of a month
//! (leap-aware) and the chart labels used by the dashboard.

use chrono::NaiveDate;

use crate::errors::{Error, Result};

/// Abbreviated month names, indexed by `month - 1`.
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Returns the first and last calendar day of the given month.
///
/// Handles variable month lengths and leap years by computing the last day
/// as the day before the first of the following month.
///
/// # Errors
/// Returns [`Error::InvalidPeriod`] if `month` is outside 1-12 or the year
/// is outside the supported calendar range.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(Error::InvalidPeriod { month, year })?;

    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(Error::InvalidPeriod { month, year })?;

    let last = next_first
        .pred_opt()
        .ok_or(Error::InvalidPeriod { month, year })?;

    Ok((first, last))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_month_bounds_thirty_one_days() {
        let (first, last) = month_bounds(2024, 1).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    }

    #[test]
    fn test_month_bounds_thirty_days() {
        let (first, last) = month_bounds(2024, 4).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());
    }

    #[test]
    fn test_month_bounds_february_leap_year() {
        let (_, last) = month_bounds(2024, 2).unwrap();
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_month_bounds_february_common_year() {
        let (_, last) = month_bounds(2023, 2).unwrap();
        assert_eq!(last, NaiveDate::from_ymd_opt(2023, 2, 28).unwrap());
    }

    #[test]
    fn test_month_bounds_december_crosses_year() {
        let (first, last) = month_bounds(2024, 12).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn test_month_bounds_invalid_month() {
        let result = month_bounds(2024, 13);
        assert!(matches!(
            result,
            Err(Error::InvalidPeriod {
                month: 13,
                year: 2024
            })
        ));

        let result = month_bounds(2024, 0);
        assert!(result.is_err());
    }
}
