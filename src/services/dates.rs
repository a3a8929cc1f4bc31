use chrono::{Datelike, Local, NaiveDate};

use crate::error::{StoreError, StoreResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` diary key.
pub fn parse_date(value: &str) -> StoreResult<NaiveDate> {
    let value = value.trim();
    if value.len() != 10 {
        return Err(StoreError::Validation(format!(
            "Date must be YYYY-MM-DD: {value}"
        )));
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| StoreError::Validation(format!("Date must be YYYY-MM-DD: {value}")))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// `2024년 1월 15일`
pub fn format_readable(date: NaiveDate) -> String {
    format!("{}년 {}월 {}일", date.year(), date.month(), date.day())
}

/// `오늘`, `어제`, `그저께`, `N일 전` within a week of `today`; the readable
/// date otherwise, including for future dates.
pub fn format_relative(date: NaiveDate, today: NaiveDate) -> String {
    match (today - date).num_days() {
        0 => "오늘".into(),
        1 => "어제".into(),
        2 => "그저께".into(),
        days @ 3..=6 => format!("{days}일 전"),
        _ => format_readable(date),
    }
}
