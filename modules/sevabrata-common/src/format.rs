//! Display formatting for amounts and dates, en-IN conventions.

use chrono::NaiveDate;

/// Group an amount with Indian digit grouping: the last three digits,
/// then groups of two (1234567 -> "12,34,567").
pub fn format_inr(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();

    let mut grouped = String::new();
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 {
            let remaining = len - i;
            if remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0) {
                grouped.push(',');
            }
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Compact currency for dashboard stat cards: crores above 1,00,00,000,
/// lakhs above 1,00,000, full grouping below that.
pub fn format_currency_compact(amount: i64) -> String {
    if amount >= 10_000_000 {
        format!("₹{:.1}Cr", amount as f64 / 10_000_000.0)
    } else if amount >= 100_000 {
        format!("₹{:.1}L", amount as f64 / 100_000.0)
    } else {
        format!("₹{}", format_inr(amount))
    }
}

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Render an ISO date string as "15 March 2024". Unparseable input is
/// returned unchanged rather than erroring; missing input becomes a
/// neutral placeholder.
pub fn format_date(date: Option<&str>) -> String {
    let Some(raw) = date else {
        return "Date not available".to_string();
    };
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(d) => {
            use chrono::Datelike;
            format!(
                "{} {} {}",
                d.day(),
                MONTHS[d.month0() as usize],
                d.year()
            )
        }
        Err(_) => raw.to_string(),
    }
}

/// Capitalize the first letter of a status string for badge display.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indian_grouping() {
        assert_eq!(format_inr(0), "0");
        assert_eq!(format_inr(999), "999");
        assert_eq!(format_inr(1000), "1,000");
        assert_eq!(format_inr(100_000), "1,00,000");
        assert_eq!(format_inr(1_234_567), "12,34,567");
        assert_eq!(format_inr(10_000_000), "1,00,00,000");
        assert_eq!(format_inr(-1_234_567), "-12,34,567");
    }

    #[test]
    fn compact_currency_tiers() {
        assert_eq!(format_currency_compact(50_000), "₹50,000");
        assert_eq!(format_currency_compact(250_000), "₹2.5L");
        assert_eq!(format_currency_compact(85_000_000), "₹8.5Cr");
    }

    #[test]
    fn date_rendering() {
        assert_eq!(format_date(Some("2024-03-15")), "15 March 2024");
        assert_eq!(format_date(Some("soon")), "soon");
        assert_eq!(format_date(None), "Date not available");
    }

    #[test]
    fn capitalize() {
        assert_eq!(capitalize_first("active"), "Active");
        assert_eq!(capitalize_first(""), "");
    }
}
