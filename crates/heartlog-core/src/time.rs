//! Calendar-day helpers.

use chrono::{Local, NaiveDate};

/// Current local calendar day
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` day
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Format a day the way the views show it, e.g. `2024년 03월 05일`
pub fn format_date_korean(date: &NaiveDate) -> String {
    date.format("%Y년 %m월 %d일").to_string()
}
