//! Report request parameters and rendered report files.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::server::{
    error::AppError,
    model::{category::Category, event::Event, user::User},
    util::parse::parse_date,
};

/// Department value meaning "no department filter".
pub const ALL_DEPARTMENTS: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Weekly,
    Monthly,
}

impl ReportKind {
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim().to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(AppError::BadRequest(format!(
                "Unknown report type '{}': expected weekly or monthly",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Xlsx,
    Pdf,
}

impl ReportFormat {
    /// Parses the `format` query value, defaulting to a workbook.
    pub fn parse(value: Option<&str>) -> Result<Self, AppError> {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            None | Some("") | Some("xlsx") => Ok(Self::Xlsx),
            Some("pdf") => Ok(Self::Pdf),
            Some(other) => Err(AppError::BadRequest(format!(
                "Unknown report format '{}': expected xlsx or pdf",
                other
            ))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Pdf => "pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Pdf => "application/pdf",
        }
    }
}

/// Half-open range of local timestamps covered by a report.
///
/// An event is included when it starts at or after `start` and ends before `end`. For
/// monthly reports only the start is constrained, see `ReportPeriod::ends_bounded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportPeriod {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Whether the event's end must also fall inside the period.
    pub ends_bounded: bool,
}

impl ReportPeriod {
    /// Builds the period from the raw `start`/`end` query values.
    ///
    /// - Weekly: `start` and `end` are `YYYY-MM-DD` dates, both inclusive
    /// - Monthly: `start` is the month (1-12) and `end` the year
    pub fn from_query(kind: ReportKind, start: &str, end: &str) -> Result<Self, AppError> {
        if start.trim().is_empty() || end.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Both start and end are required.".to_string(),
            ));
        }

        match kind {
            ReportKind::Weekly => {
                let first = parse_date("start", start)?;
                let last = parse_date("end", end)?;
                if last < first {
                    return Err(AppError::BadRequest(
                        "End date must not be before start date.".to_string(),
                    ));
                }
                let after_last = last.succ_opt().ok_or_else(|| {
                    AppError::BadRequest("End date is out of range.".to_string())
                })?;

                Ok(Self {
                    start: first.and_time(NaiveTime::MIN),
                    end: after_last.and_time(NaiveTime::MIN),
                    ends_bounded: true,
                })
            }
            ReportKind::Monthly => {
                let month: u32 = start.trim().parse().map_err(|_| {
                    AppError::BadRequest(format!("Invalid month '{}'", start))
                })?;
                let year: i32 = end
                    .trim()
                    .parse()
                    .map_err(|_| AppError::BadRequest(format!("Invalid year '{}'", end)))?;
                let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
                    AppError::BadRequest(format!("Invalid month {} of year {}", month, year))
                })?;
                let next = if first.month() == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(year, month + 1, 1)
                }
                .ok_or_else(|| AppError::BadRequest("Year is out of range.".to_string()))?;

                Ok(Self {
                    start: first.and_time(NaiveTime::MIN),
                    end: next.and_time(NaiveTime::MIN),
                    ends_bounded: false,
                })
            }
        }
    }
}

/// Everything rendered into a report.
#[derive(Debug, Clone)]
pub struct ReportData {
    pub kind: ReportKind,
    /// Department the report is scoped to, or `ALL_DEPARTMENTS`.
    pub department: String,
    pub categories: Vec<Category>,
    pub users: Vec<User>,
    pub events: Vec<Event>,
}

/// A rendered report ready to be sent as an attachment.
#[derive(Debug, Clone)]
pub struct ReportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}
