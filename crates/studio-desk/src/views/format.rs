use chrono::{DateTime, NaiveDate, Utc};

/// Renders an amount in cents with Dutch grouping, e.g. `€ 1.234,56`.
pub fn format_cents(cents: i64, currency: &str) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let whole = abs / 100;
    let fraction = abs % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    format!("{sign}{} {grouped},{fraction:02}", currency_symbol(currency))
}

fn currency_symbol(currency: &str) -> String {
    match currency.trim().to_ascii_uppercase().as_str() {
        "EUR" => "€".to_string(),
        "USD" => "$".to_string(),
        "GBP" => "£".to_string(),
        other => other.to_string(),
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

pub fn format_time_range(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    format!("{}\u{2013}{}", start.format("%H:%M"), end.format("%H:%M"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn groups_thousands_with_dots_and_uses_comma_decimals() {
        assert_eq!(format_cents(123_456, "EUR"), "€ 1.234,56");
        assert_eq!(format_cents(100_000_000, "eur"), "€ 1.000.000,00");
        assert_eq!(format_cents(5, "EUR"), "€ 0,05");
        assert_eq!(format_cents(-98_765, "EUR"), "-€ 987,65");
        assert_eq!(format_cents(1_500, "CHF"), "CHF 15,00");
    }

    #[test]
    fn formats_dates_and_time_ranges() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(format_date(date), "18-10-2026");

        let start = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2026, 10, 18, 12, 30, 0).unwrap();
        assert_eq!(format_time_range(start, end), "09:00\u{2013}12:30");
    }
}
