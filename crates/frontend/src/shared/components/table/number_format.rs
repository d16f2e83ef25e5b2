//! Number formatting for tables and totals
//!
//! Amounts are shown with Indian digit grouping: the last three digits form
//! one group, every group above it has two digits.

fn group_indian(integer: &str) -> String {
    let len = integer.len();
    if len <= 3 {
        return integer.to_string();
    }
    let (head, tail) = integer.split_at(len - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (h, t) = rest.split_at(rest.len() - 2);
        groups.push(t);
        rest = h;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Formats a number with Indian grouping and the given number of decimals,
/// e.g. `1234567.891` with 2 decimals -> "12,34,567.89"
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };
    let sign = if value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match fraction {
        Some(f) => format!("{}{}.{}", sign, group_indian(integer), f),
        None => format!("{}{}", sign, group_indian(integer)),
    }
}

/// "₹ 1,25,000.00"
pub fn format_inr(value: f64) -> String {
    format!("₹ {}", format_number_with_decimals(value, 2))
}

/// Quantities: no decimals for whole numbers, two otherwise
pub fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format_number_with_decimals(value, 0)
    } else {
        format_number_with_decimals(value, 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_number_with_decimals(0.0, 2), "0.00");
        assert_eq!(format_number_with_decimals(999.0, 0), "999");
        assert_eq!(format_number_with_decimals(1000.0, 0), "1,000");
        assert_eq!(format_number_with_decimals(125000.5, 2), "1,25,000.50");
        assert_eq!(format_number_with_decimals(12345678.0, 0), "1,23,45,678");
    }

    #[test]
    fn test_negative_and_currency() {
        assert_eq!(format_number_with_decimals(-47200.0, 2), "-47,200.00");
        assert_eq!(format_number_with_decimals(-0.001, 2), "0.00");
        assert_eq!(format_inr(59800.0), "₹ 59,800.00");
    }

    #[test]
    fn test_quantity() {
        assert_eq!(format_quantity(40.0), "40");
        assert_eq!(format_quantity(2.5), "2.50");
    }
}
