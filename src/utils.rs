// src/utils.rs
use chrono::{DateTime, Utc};

/// Whole days between two instants, order-independent
pub fn days_since(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - date).num_days().abs()
}

/// "Today", "3 days ago", "2 weeks ago"... falling back to M/D/YYYY past a year
pub fn format_relative_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = days_since(date, now);

    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{} days ago", days),
        7..=29 => plural(days / 7, "week"),
        30..=364 => plural(days / 30, "month"),
        _ => date.format("%-m/%-d/%Y").to_string(),
    }
}

/// Pluralised "tracking" span shown in the detail view
pub fn format_tracking_days(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {} ago", unit)
    } else {
        format!("{} {}s ago", n, unit)
    }
}
