//! Projected trip budget, computed once when a trip is created.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Estimated spend per trip day.
pub const DAILY_RATE: i64 = 3000;
/// Flat cost of getting to the destination and back.
pub const BASE_TRAVEL_COST: i64 = 5000;

/// Days between `start` and `end`, counting both. `None` when `end` is before `start`.
#[must_use]
pub fn duration_days(start: NaiveDate, end: NaiveDate) -> Option<i64> {
    (start <= end).then(|| (end - start).num_days() + 1)
}

/// `duration_days × DAILY_RATE + BASE_TRAVEL_COST`, or `None` for an inverted date range.
#[must_use]
pub fn estimate_budget(start: NaiveDate, end: NaiveDate) -> Option<Decimal> {
    duration_days(start, end).map(|days| Decimal::from(days * DAILY_RATE + BASE_TRAVEL_COST))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn five_day_trip() {
        let budget = estimate_budget(date(2025, 1, 1), date(2025, 1, 5));
        assert_eq!(budget, Some(Decimal::from(20_000)));
    }

    #[test]
    fn single_day_trip_counts_one_day() {
        assert_eq!(duration_days(date(2025, 3, 9), date(2025, 3, 9)), Some(1));
        assert_eq!(
            estimate_budget(date(2025, 3, 9), date(2025, 3, 9)),
            Some(Decimal::from(8_000))
        );
    }

    #[test]
    fn spans_month_and_leap_day() {
        assert_eq!(duration_days(date(2024, 2, 28), date(2024, 3, 1)), Some(3));
        assert_eq!(duration_days(date(2024, 12, 31), date(2025, 1, 1)), Some(2));
    }

    #[test]
    fn inverted_range_has_no_estimate() {
        assert_eq!(duration_days(date(2025, 1, 5), date(2025, 1, 1)), None);
        assert_eq!(estimate_budget(date(2025, 1, 5), date(2025, 1, 1)), None);
    }
}
