//! Date helpers for the `YYYY-MM-DD` strings the document API stores

use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse `YYYY-MM-DD`, also accepting a datetime whose prefix is a date
/// (`"2026-03-15 10:22:01.123"` or `"2026-03-15T10:22:01Z"`).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed
        .split(|c| c == 'T' || c == ' ')
        .next()
        .unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn is_before(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

/// Whole days from `start` to `end`; negative when `end` precedes `start`
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

/// Month bucket key, e.g. `"2026-03"`
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Inclusive range check where either bound may be open
pub fn in_range(date: NaiveDate, from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    from.map_or(true, |f| date >= f) && to.map_or(true, |t| date <= t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_variants() {
        let expected = NaiveDate::from_ymd_opt(2026, 3, 15);
        assert_eq!(parse_date("2026-03-15"), expected);
        assert_eq!(parse_date("2026-03-15 10:22:01.123"), expected);
        assert_eq!(parse_date("2026-03-15T10:22:01Z"), expected);
        assert_eq!(parse_date("15.03.2026"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_days_between_and_range() {
        let a = parse_date("2026-01-30").unwrap();
        let b = parse_date("2026-03-01").unwrap();
        assert_eq!(days_between(a, b), 30);
        assert_eq!(days_between(b, a), -30);
        assert!(in_range(a, None, Some(b)));
        assert!(in_range(b, Some(a), Some(b)));
        assert!(!in_range(a, Some(b), None));
        assert_eq!(month_key(b), "2026-03");
    }
}
