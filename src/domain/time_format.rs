use crate::error::{Result, StudyError};
use chrono::NaiveDate;

/// Format a stopwatch reading.
///
/// At an hour or more the seconds are dropped ("1h2m"), below it the
/// reading is minutes and seconds ("2m5s").
pub fn format_time(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h{}m", hours, minutes)
    } else {
        format!("{}m{}s", minutes, secs)
    }
}

/// Parse a calendar date written as `YYYY/MM/DD` or `YYYY-MM-DD`
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y/%m/%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .map_err(|_| StudyError::InvalidDate(input.to_string()))
}

/// Parse an inclusive date range written as `start ~ end`.
///
/// Blank input means no range. Both ends are required and the start may
/// not come after the end.
pub fn parse_date_range(input: &str) -> Result<Option<(NaiveDate, NaiveDate)>> {
    if input.trim().is_empty() {
        return Ok(None);
    }

    let (start, end) = input
        .split_once('~')
        .ok_or_else(|| StudyError::InvalidDate(input.to_string()))?;
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    if start > end {
        return Err(StudyError::InvalidDate(input.to_string()));
    }
    Ok(Some((start, end)))
}

/// Render a range in the form [`parse_date_range`] reads back
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} ~ {}", start.format("%Y/%m/%d"), end.format("%Y/%m/%d"))
}

/// Short month/day label used on chart axes and history rows ("12/06")
pub fn month_day(date: NaiveDate) -> String {
    date.format("%m/%d").to_string()
}

/// Largest session a minutes entry may set (about 69 days)
pub const MAX_MINUTES: u64 = 99_999;

/// Parse a minutes entry the way a number field does: leading digits count,
/// anything else is rejected. Values above [`MAX_MINUTES`] are out of range.
pub fn parse_minutes(input: &str) -> Result<u64> {
    let trimmed = input.trim();
    let digits: String = trimmed.chars().take_while(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return Err(StudyError::InvalidMinutes(input.to_string()));
    }

    let out_of_range = || StudyError::MinutesOutOfRange {
        input: input.to_string(),
        max: MAX_MINUTES,
    };
    // Any digit string too long for u64 is out of range as well
    let minutes = digits.parse::<u64>().map_err(|_| out_of_range())?;
    if minutes > MAX_MINUTES {
        return Err(out_of_range());
    }
    Ok(minutes)
}
