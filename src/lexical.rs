//! Lexical validators for account ids and execution dates
//!
//! These are character-level predicates used by the grammar and the business
//! rules. The future-date classifier takes an explicit `today` so callers can
//! pin the clock for deterministic tests; the convenience wrapper reads the
//! current UTC date.

use chrono::{Days, NaiveDate, Utc};

/// Check that an account id contains only ASCII letters, ASCII digits,
/// `-`, `.` or `@`.
///
/// The empty string passes this check on its own; the grammar never produces
/// an empty account token, so the guard lives there.
pub fn is_valid_account_id(id: &str) -> bool {
    id.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '@'))
}

/// Check that a date string has the exact shape `YYYY-MM-DD` with a month in
/// [1, 12] and a day in [1, 31].
///
/// Day 31 is accepted for every month; there is no month-length or leap-year
/// check.
pub fn is_valid_date_format(date: &str) -> bool {
    let bytes = date.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, &b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return false;
    }

    let month = (bytes[5] - b'0') * 10 + (bytes[6] - b'0');
    let day = (bytes[8] - b'0') * 10 + (bytes[9] - b'0');
    (1..=12).contains(&month) && (1..=31).contains(&day)
}

/// Classify a format-valid date string as strictly after the current UTC date.
///
/// A date equal to today is not future; it settles immediately.
pub fn is_future_date(date: &str) -> bool {
    is_future_relative_to(date, Utc::now().date_naive())
}

/// Classify a format-valid date string against an explicit `today`.
pub fn is_future_relative_to(date: &str, today: NaiveDate) -> bool {
    match calendar_date(date) {
        Some(d) => d > today,
        None => false,
    }
}

/// Resolve a format-valid string to a calendar date.
///
/// The format check allows days the calendar does not (e.g. `2026-02-31`);
/// overflowing days roll into the following month so the comparison stays
/// total over everything the format validator accepts.
fn calendar_date(date: &str) -> Option<NaiveDate> {
    if !is_valid_date_format(date) {
        return None;
    }
    let year: i32 = date[0..4].parse().ok()?;
    let month: u32 = date[5..7].parse().ok()?;
    let day: u64 = date[8..10].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_days(Days::new(day - 1))
}
