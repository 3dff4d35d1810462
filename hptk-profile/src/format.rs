//! Display formatting for packed profile fields
//!
//! Profiles store times as `HHMM`, dates as `YYYYMMDDHHmm` and the weekday
//! as a numeric code. These helpers turn them into display strings plus a
//! colour classification.

use chrono::{Duration, Months, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::NOT_AVAILABLE;

/// Where a packed date falls relative to "now" at parse time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStatus {
    Past,
    Future,
    Neutral,
}

impl DateStatus {
    /// Display colour: past red, future green, otherwise default black
    pub fn css_color(self) -> &'static str {
        match self {
            DateStatus::Past => "red",
            DateStatus::Future => "green",
            DateStatus::Neutral => "black",
        }
    }
}

/// Fixed colour for each weekday label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayColor {
    Neutral,
    Red,
    Amber,
    Pink,
    Green,
    Orange,
    SkyBlue,
    Violet,
}

impl DayColor {
    pub fn css_color(self) -> &'static str {
        match self {
            DayColor::Neutral => "inherit",
            DayColor::Red => "#e53e3e",
            DayColor::Amber => "#d69e2e",
            DayColor::Pink => "#d53f8c",
            DayColor::Green => "#38a169",
            DayColor::Orange => "#dd6b20",
            DayColor::SkyBlue => "#3182ce",
            DayColor::Violet => "#805ad5",
        }
    }
}

/// A packed date/time rendered for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedDate {
    pub formatted_text: String,
    pub status: DateStatus,
    pub css_color: &'static str,
}

impl FormattedDate {
    pub fn new(formatted_text: String, status: DateStatus) -> Self {
        Self {
            formatted_text,
            status,
            css_color: status.css_color(),
        }
    }

    pub fn not_available() -> Self {
        Self::new(NOT_AVAILABLE.to_string(), DateStatus::Neutral)
    }
}

/// A weekday code rendered for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLabel {
    pub label: String,
    pub color: DayColor,
    pub css_color: &'static str,
}

impl DayLabel {
    pub fn new(label: String, color: DayColor) -> Self {
        Self {
            label,
            color,
            css_color: color.css_color(),
        }
    }
}

/// SUN..SAT for codes 1..=7
const WEEKDAYS: [(&str, DayColor); 7] = [
    ("SUN", DayColor::Red),
    ("MON", DayColor::Amber),
    ("TUE", DayColor::Pink),
    ("WED", DayColor::Green),
    ("THU", DayColor::Orange),
    ("FRI", DayColor::SkyBlue),
    ("SAT", DayColor::Violet),
];

fn is_ascii_digits(raw: &str, len: usize) -> bool {
    raw.len() == len && raw.bytes().all(|b| b.is_ascii_digit())
}

/// `"0930"` becomes `"09:30"`. Anything that is not exactly four ASCII
/// digits is returned unchanged. Ranges are not checked.
pub fn format_packed_time(raw: &str) -> String {
    if is_ascii_digits(raw, 4) {
        format!("{}:{}", &raw[0..2], &raw[2..4])
    } else {
        raw.to_string()
    }
}

/// Format a `YYYYMMDDHHmm` value against the current local time
pub fn format_packed_date_time(raw: &str) -> FormattedDate {
    format_packed_date_time_at(raw, hptk_common::time::local_now())
}

/// Format a `YYYYMMDDHHmm` value as `DD/MM/YYYY (HH:MM)` and classify it
/// against `now`.
///
/// Input that is not exactly twelve ASCII digits yields `N/A`. Out-of-range
/// fields roll over into the next unit (Feb 30 is Mar 1, hour 24 is the next
/// midnight, month 13 is January of the following year) before comparing;
/// the text always shows the digits as written. Two-digit years (`0000` to
/// `0099`) count from 1900.
pub fn format_packed_date_time_at(raw: &str, now: NaiveDateTime) -> FormattedDate {
    if !is_ascii_digits(raw, 12) {
        return FormattedDate::not_available();
    }

    // Digits were checked above, so these parses cannot fail
    let field = |range: std::ops::Range<usize>| raw[range].parse::<u32>().unwrap_or(0);
    let year = field(0..4);
    let month = field(4..6);
    let day = field(6..8);
    let hour = field(8..10);
    let minute = field(10..12);

    let formatted_text = format!(
        "{:02}/{:02}/{:04} ({:02}:{:02})",
        day, month, year, hour, minute
    );

    let status = match rolled_over_instant(year, month, day, hour, minute) {
        Some(instant) if instant < now => DateStatus::Past,
        Some(instant) if instant > now => DateStatus::Future,
        _ => DateStatus::Neutral,
    };

    FormattedDate::new(formatted_text, status)
}

/// Calendar instant with overflowing fields carried forward. `None` only
/// when the arithmetic leaves chrono's range.
fn rolled_over_instant(
    year: u32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
) -> Option<NaiveDateTime> {
    let year = if year < 100 { year + 1900 } else { year };
    let start = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, 1, 1)?.and_hms_opt(0, 0, 0)?;

    // Month 00 is December of the previous year
    let month_start = match month {
        0 => start.checked_sub_months(Months::new(1))?,
        m => start.checked_add_months(Months::new(m - 1))?,
    };

    month_start
        .checked_add_signed(Duration::days(i64::from(day) - 1))?
        .checked_add_signed(Duration::hours(i64::from(hour)))?
        .checked_add_signed(Duration::minutes(i64::from(minute)))
}

/// Weekday label for a profile day code. `0` means every day.
pub fn day_of_week_label(code: i64) -> DayLabel {
    if code == 0 {
        return DayLabel::new("(Everyday)".to_string(), DayColor::Neutral);
    }

    let index = code.checked_sub(1).and_then(|i| usize::try_from(i).ok());
    match index.and_then(|i| WEEKDAYS.get(i)) {
        Some((name, color)) => DayLabel::new(format!("({})", name), *color),
        None => DayLabel::new("Invalid".to_string(), DayColor::Neutral),
    }
}

/// Leading integer of a raw day code; `0` when there is none.
///
/// Accepts surrounding whitespace and trailing junk (`"3 "`, `"2abc"`).
pub fn parse_day_code(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end]
        .parse::<i64>()
        .map(|n| sign * n)
        .unwrap_or(0)
}
