//! Event domain models, status derivation and booking parameters.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::{
    model::event::{BookingConflictDto, EventDto, EventPayloadDto},
    server::{
        error::{booking::BookingError, internal::InternalError, AppError},
        model::label::{normalize_label, same_label},
        util::parse::parse_date_time,
    },
};

/// Lifecycle of an event relative to the current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventStatus {
    Upcoming,
    Active,
    Ended,
}

impl EventStatus {
    /// Derives the status of the half-open window `[start, end)` at `now`.
    ///
    /// Pure: the same triple always yields the same status.
    pub fn at(now: NaiveDateTime, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        if now < start {
            Self::Upcoming
        } else if now < end {
            Self::Active
        } else {
            Self::Ended
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Active => "active",
            Self::Ended => "ended",
        }
    }

    pub fn from_stored(value: &str) -> Result<Self, InternalError> {
        match value {
            "upcoming" => Ok(Self::Upcoming),
            "active" => Ok(Self::Active),
            "ended" => Ok(Self::Ended),
            other => Err(InternalError::UnknownStoredValue {
                kind: "event status",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i32,
    pub program: String,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
    pub purpose: String,
    /// Participant labels as submitted, in submission order.
    pub participants: Vec<String>,
    pub departments: Vec<String>,
    pub status: EventStatus,
    pub notified: bool,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn into_dto(self) -> EventDto {
        EventDto {
            id: self.id,
            program: self.program,
            start_at: self.start_at,
            end_at: self.end_at,
            purpose: self.purpose,
            participants: self.participants,
            departments: self.departments,
            status: self.status.as_str().to_string(),
            created_by: self.created_by,
            created_at: self.created_at,
        }
    }

    /// Assembles an event from its row and label rows.
    ///
    /// # Returns
    /// - `Ok(Event)` - Converted event
    /// - `Err(InternalError::UnknownStoredValue)` - Stored status is not a known status
    pub fn from_entity(
        entity: entity::event::Model,
        participants: Vec<entity::event_participant::Model>,
        departments: Vec<entity::event_department::Model>,
    ) -> Result<Self, InternalError> {
        Ok(Self {
            id: entity.id,
            program: entity.program,
            start_at: entity.start_at,
            end_at: entity.end_at,
            purpose: entity.purpose,
            participants: participants.into_iter().map(|p| p.participant).collect(),
            departments: departments.into_iter().map(|d| d.department).collect(),
            status: EventStatus::from_stored(&entity.status)?,
            notified: entity.notified,
            created_by: entity.created_by,
            created_at: entity.created_at,
        })
    }
}

/// Resolves the end of a booking window.
///
/// When `end <= start` the window is only valid if the caller marked it as crossing
/// midnight, in which case the end moves forward by one day.
///
/// # Returns
/// - `Ok(NaiveDateTime)` - End of a non-empty window
/// - `Err(BookingError::InvalidRange)` - End not after start and not marked overnight, or
///   still not after start once moved
pub fn resolve_end(
    start: NaiveDateTime,
    end: NaiveDateTime,
    crosses_midnight: bool,
) -> Result<NaiveDateTime, BookingError> {
    if end > start {
        return Ok(end);
    }

    if !crosses_midnight {
        return Err(BookingError::InvalidRange(
            "End must be after start. Set crosses_midnight for events ending the next day."
                .to_string(),
        ));
    }

    let rolled = end + Duration::days(1);
    if rolled > start {
        Ok(rolled)
    } else {
        Err(BookingError::InvalidRange(
            "Event cannot last longer than a day when crossing midnight.".to_string(),
        ))
    }
}

/// Validated fields of an event create or update.
#[derive(Debug, Clone, PartialEq)]
pub struct EventParams {
    pub program: String,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
    pub purpose: String,
    /// Trimmed participant labels without normalized duplicates.
    pub participants: Vec<String>,
    /// Trimmed department tags without normalized duplicates.
    pub departments: Vec<String>,
}

impl EventParams {
    /// Validates and converts an event payload.
    ///
    /// # Returns
    /// - `Ok(EventParams)` - Every field present and the window is valid
    /// - `Err(AppError::BadRequest)` - Missing field or unparseable date/time
    /// - `Err(AppError::BookingErr(InvalidRange))` - End not after start (see `resolve_end`)
    pub fn from_dto(dto: EventPayloadDto) -> Result<Self, AppError> {
        let participants = dedup_labels(dto.participants);
        let departments = dedup_labels(dto.departments);

        if dto.program.trim().is_empty()
            || dto.start_date.trim().is_empty()
            || dto.start_time.trim().is_empty()
            || dto.end_date.trim().is_empty()
            || dto.end_time.trim().is_empty()
            || dto.purpose.trim().is_empty()
            || participants.is_empty()
            || departments.is_empty()
        {
            return Err(AppError::BadRequest("All fields are required.".to_string()));
        }

        let start_at = parse_date_time("start_date", &dto.start_date, "start_time", &dto.start_time)?;
        let end_at = parse_date_time("end_date", &dto.end_date, "end_time", &dto.end_time)?;
        let end_at = resolve_end(start_at, end_at, dto.crosses_midnight)?;

        Ok(Self {
            program: dto.program.trim().to_string(),
            start_at,
            end_at,
            purpose: dto.purpose.trim().to_string(),
            participants,
            departments,
        })
    }
}

/// Trims labels, drops blanks and keeps the first of any normalized duplicates.
fn dedup_labels(labels: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    labels
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty() && seen.insert(normalize_label(l)))
        .collect()
}

/// An existing event that blocks a booking, with the participants both share.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingConflict {
    pub event_id: i32,
    pub program: String,
    pub start_at: NaiveDateTime,
    pub end_at: NaiveDateTime,
    pub participants: Vec<String>,
}

impl BookingConflict {
    pub fn into_dto(self) -> BookingConflictDto {
        BookingConflictDto {
            event_id: self.event_id,
            program: self.program,
            start_at: self.start_at,
            end_at: self.end_at,
            participants: self.participants,
        }
    }
}

/// Optional filters for listing events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    /// Only events tagged with this department (normalized comparison).
    pub department: Option<String>,
    /// Only events ending on or after the start of this day.
    pub from: Option<NaiveDate>,
    /// Only events starting before the end of this day.
    pub to: Option<NaiveDate>,
}

impl EventFilter {
    pub fn matches(&self, event: &Event) -> bool {
        if let Some(department) = &self.department {
            if !event.departments.iter().any(|d| same_label(d, department)) {
                return false;
            }
        }

        if let Some(from) = self.from {
            if event.end_at < from.and_time(NaiveTime::MIN) {
                return false;
            }
        }

        if let Some(next_day) = self.to.and_then(|to| to.succ_opt()) {
            if event.start_at >= next_day.and_time(NaiveTime::MIN) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn payload() -> EventPayloadDto {
        EventPayloadDto {
            program: "Orientation".to_string(),
            start_date: "2024-01-10".to_string(),
            start_time: "09:00".to_string(),
            end_date: "2024-01-10".to_string(),
            end_time: "10:00".to_string(),
            purpose: "Welcome".to_string(),
            participants: vec!["Registrar".to_string()],
            departments: vec!["SGOD".to_string()],
            crosses_midnight: false,
        }
    }

    /// Tests status derivation at and around the window boundaries.
    ///
    /// Expected: upcoming before start, active from start until end, ended from end
    #[test]
    fn derives_status_from_half_open_window() {
        let (start, end) = (at(9, 0), at(10, 0));

        assert_eq!(EventStatus::at(at(8, 59), start, end), EventStatus::Upcoming);
        assert_eq!(EventStatus::at(at(9, 0), start, end), EventStatus::Active);
        assert_eq!(EventStatus::at(at(9, 59), start, end), EventStatus::Active);
        assert_eq!(EventStatus::at(at(10, 0), start, end), EventStatus::Ended);
    }

    /// Tests status derivation is a pure function of its inputs.
    ///
    /// Expected: repeated derivation yields the same status
    #[test]
    fn status_derivation_is_idempotent() {
        let (now, start, end) = (at(9, 30), at(9, 0), at(10, 0));

        let first = EventStatus::at(now, start, end);
        let second = EventStatus::at(now, start, end);

        assert_eq!(first, second);
    }

    #[test]
    fn parses_stored_status() {
        assert_eq!(EventStatus::from_stored("active").unwrap(), EventStatus::Active);
        assert!(EventStatus::from_stored("paused").is_err());
    }

    /// Tests an inverted window without the overnight flag.
    ///
    /// Expected: Err(BookingError::InvalidRange)
    #[test]
    fn rejects_inverted_window_without_overnight_flag() {
        let result = resolve_end(at(22, 0), at(2, 0), false);

        assert!(matches!(result, Err(BookingError::InvalidRange(_))));
    }

    /// Tests an overnight window is moved to the following day.
    ///
    /// Expected: end on 2024-01-11 02:00
    #[test]
    fn rolls_overnight_window_forward() {
        let end = resolve_end(at(22, 0), at(2, 0), true).unwrap();

        assert_eq!(end, at(2, 0) + Duration::days(1));
    }

    #[test]
    fn rejects_empty_window_even_when_overnight_is_requested() {
        let result = resolve_end(at(9, 0), at(9, 0) - Duration::days(1), true);

        assert!(matches!(result, Err(BookingError::InvalidRange(_))));
    }

    #[test]
    fn converts_payload_and_dedups_participants() {
        let mut dto = payload();
        dto.participants = vec![
            " Registrar ".to_string(),
            "registrar".to_string(),
            "".to_string(),
            "Nurse".to_string(),
        ];

        let params = EventParams::from_dto(dto).unwrap();

        assert_eq!(params.participants, vec!["Registrar", "Nurse"]);
        assert_eq!(params.start_at, at(9, 0));
        assert_eq!(params.end_at, at(10, 0));
    }

    #[test]
    fn rejects_payload_without_participants() {
        let mut dto = payload();
        dto.participants = vec!["  ".to_string()];

        assert!(matches!(
            EventParams::from_dto(dto),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn rejects_payload_with_unparseable_time() {
        let mut dto = payload();
        dto.start_time = "9am".to_string();

        assert!(matches!(
            EventParams::from_dto(dto),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn filter_matches_department_and_day_range() {
        let event = Event {
            id: 1,
            program: "Orientation".to_string(),
            start_at: at(9, 0),
            end_at: at(10, 0),
            purpose: "Welcome".to_string(),
            participants: vec!["Registrar".to_string()],
            departments: vec!["SGOD".to_string()],
            status: EventStatus::Upcoming,
            notified: false,
            created_by: "1234567".to_string(),
            created_at: Utc::now(),
        };
        let day = at(0, 0).date();

        assert!(EventFilter::default().matches(&event));
        assert!(EventFilter {
            department: Some(" sgod ".to_string()),
            from: Some(day),
            to: Some(day),
        }
        .matches(&event));
        assert!(!EventFilter {
            department: Some("CID".to_string()),
            ..Default::default()
        }
        .matches(&event));
        assert!(!EventFilter {
            from: day.succ_opt(),
            ..Default::default()
        }
        .matches(&event));
        assert!(!EventFilter {
            to: day.pred_opt(),
            ..Default::default()
        }
        .matches(&event));
    }
}
