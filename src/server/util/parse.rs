use chrono::{FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use crate::server::error::AppError;

/// Parses a `YYYY-MM-DD` date supplied by a client.
///
/// # Arguments
/// - `field` - Name of the request field, used in the error message
/// - `value` - The raw value
///
/// # Returns
/// - `Ok(NaiveDate)` - Successfully parsed date
/// - `Err(AppError::BadRequest)` - Value is not a valid date
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        AppError::BadRequest(format!(
            "Invalid {} '{}': expected YYYY-MM-DD ({})",
            field, value, e
        ))
    })
}

/// Parses an `HH:MM` or `HH:MM:SS` time supplied by a client.
pub fn parse_time(field: &str, value: &str) -> Result<NaiveTime, AppError> {
    let value_trimmed = value.trim();
    NaiveTime::parse_from_str(value_trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value_trimmed, "%H:%M"))
        .map_err(|e| {
            AppError::BadRequest(format!(
                "Invalid {} '{}': expected HH:MM ({})",
                field, value, e
            ))
        })
}

/// Combines a date and a time field into a local timestamp.
pub fn parse_date_time(
    date_field: &str,
    date: &str,
    time_field: &str,
    time: &str,
) -> Result<NaiveDateTime, AppError> {
    Ok(parse_date(date_field, date)?.and_time(parse_time(time_field, time)?))
}

/// Parses a UTC offset written as `+HH:MM`, `-HH:MM` or `Z`.
///
/// Returns `None` when the value is not a valid offset.
pub fn parse_utc_offset(value: &str) -> Option<FixedOffset> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("z") || value.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match value.split_at_checked(1)? {
        ("+", rest) => (1, rest),
        ("-", rest) => (-1, rest),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 14 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
