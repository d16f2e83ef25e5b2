/// Utilities for date formatting and the browser clock
use chrono::NaiveDate;

/// Format ISO date string to DD.MM.YYYY format
/// Example: "2024-03-15" or "2024-03-15 14:02:26.123" -> "15.03.2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str
        .split(|c| c == 'T' || c == ' ')
        .next()
        .unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            return format!("{}.{}.{}", day, month, year);
        }
    }
    date_str.to_string()
}

/// "2026-11" -> "Nov 2026"; other input is returned unchanged
pub fn format_month(month_key: &str) -> String {
    NaiveDate::parse_from_str(&format!("{}-01", month_key), "%Y-%m-%d")
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_else(|_| month_key.to_string())
}

/// Local calendar date of the browser
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15.03.2024");
        assert_eq!(format_date("2024-03-15 14:02:26.123456"), "15.03.2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15.03.2024");
    }

    #[test]
    fn test_format_month() {
        assert_eq!(format_month("2026-11"), "Nov 2026");
        assert_eq!(format_month("bad"), "bad");
    }

    #[test]
    fn test_invalid_format() {
        assert_eq!(format_date("invalid"), "invalid");
        assert_eq!(format_date(""), "");
    }
}
