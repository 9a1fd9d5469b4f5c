use chrono::{DateTime, Utc};

/// Group an integer by thousands with commas ("2850" -> "2,850")
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Shortest decimal form of a count, so 2.0 prints as "2" and 1.5 as "1.5"
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// Short date such as "Feb 11, 2024"
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Whole-dollar CAD amount such as "$800,000"
pub fn format_currency(amount: i64) -> String {
    let grouped = group_thousands(amount.unsigned_abs());
    if amount < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}
