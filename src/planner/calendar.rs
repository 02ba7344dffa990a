//! Date rules for proposed sessions.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The next `day` strictly after `from`; a `from` already on `day` yields the
/// following week's.
pub fn next_weekday_after(from: NaiveDate, day: Weekday) -> NaiveDate {
    let target = day.num_days_from_sunday() as i64;
    let current = from.weekday().num_days_from_sunday() as i64;
    let offset = match (7 + target - current) % 7 {
        0 => 7,
        n => n,
    };
    from + Duration::days(offset)
}

/// Grouped batch `index` lands `index` weeks after the next grouped day
pub fn grouped_date(today: NaiveDate, grouped_day: Weekday, index: usize) -> NaiveDate {
    next_weekday_after(today, grouped_day) + Duration::weeks(index as i64)
}

/// The first day after `from` that is neither a weekend nor the day reserved
/// for grouped sessions
pub fn next_singular_day(from: NaiveDate, grouped_day: Weekday) -> NaiveDate {
    let mut date = from + Duration::days(1);
    while is_weekend(date) || date.weekday() == grouped_day {
        date += Duration::days(1);
    }
    date
}

/// The first weekday strictly after `from`
pub fn next_business_day(from: NaiveDate) -> NaiveDate {
    let mut date = from + Duration::days(1);
    while is_weekend(date) {
        date += Duration::days(1);
    }
    date
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_next_tuesday_never_returns_reference_date() {
        // 2026-10-13 is a Tuesday
        let tuesday = date(2026, 10, 13);
        assert_eq!(tuesday.weekday(), Weekday::Tue);
        assert_eq!(next_weekday_after(tuesday, Weekday::Tue), date(2026, 10, 20));
    }

    #[test]
    fn test_next_tuesday_from_every_weekday() {
        let start = date(2026, 10, 11); // Sunday
        for offset in 0..14 {
            let from = start + Duration::days(offset);
            let next = next_weekday_after(from, Weekday::Tue);
            let gap = (next - from).num_days();
            assert_eq!(next.weekday(), Weekday::Tue);
            assert!((1..=7).contains(&gap), "{from} -> {next}");
        }
    }

    #[test]
    fn test_grouped_dates_step_by_week() {
        let friday = date(2026, 10, 16);
        assert_eq!(grouped_date(friday, Weekday::Tue, 0), date(2026, 10, 20));
        assert_eq!(grouped_date(friday, Weekday::Tue, 1), date(2026, 10, 27));
        assert_eq!(grouped_date(friday, Weekday::Tue, 2), date(2026, 11, 3));
    }

    #[test]
    fn test_singular_day_skips_weekend_and_grouped_day() {
        // Friday → skip Sat, Sun → Monday
        assert_eq!(next_singular_day(date(2026, 10, 16), Weekday::Tue), date(2026, 10, 19));
        // Monday → skip Tuesday → Wednesday
        assert_eq!(next_singular_day(date(2026, 10, 19), Weekday::Tue), date(2026, 10, 21));

        let start = date(2026, 10, 11);
        for offset in 0..14 {
            let d = next_singular_day(start + Duration::days(offset), Weekday::Tue);
            assert!(!is_weekend(d));
            assert_ne!(d.weekday(), Weekday::Tue);
        }
    }

    #[test]
    fn test_business_day_walk() {
        assert_eq!(next_business_day(date(2026, 10, 16)), date(2026, 10, 19));
        assert_eq!(next_business_day(date(2026, 10, 17)), date(2026, 10, 19));
        assert_eq!(next_business_day(date(2026, 10, 19)), date(2026, 10, 20));

        let start = date(2026, 10, 11);
        for offset in 0..14 {
            assert!(!is_weekend(next_business_day(start + Duration::days(offset))));
        }
    }
}
