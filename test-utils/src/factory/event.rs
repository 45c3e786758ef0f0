//! Event factory for creating events together with their participant and department rows.

use crate::factory::helpers::{at, next_id};
use chrono::{NaiveDateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating events with customizable fields.
///
/// Participant keys are derived the same way the application derives them: trimmed and
/// lowercased.
///
/// # Example
///
/// ```rust,ignore
/// let (event, _, _) = EventFactory::new(&db)
///     .program("Board Meeting")
///     .window(at(2026, 3, 2, 9, 0), at(2026, 3, 2, 10, 0))
///     .participants(["Registrar", "Nurse"])
///     .build()
///     .await?;
/// ```
pub struct EventFactory<'a> {
    db: &'a DatabaseConnection,
    program: String,
    start_at: NaiveDateTime,
    end_at: NaiveDateTime,
    purpose: String,
    status: String,
    notified: bool,
    created_by: String,
    participants: Vec<String>,
    departments: Vec<String>,
}

/// An event row plus the participant and department rows inserted with it.
pub type EventWithLabels = (
    entity::event::Model,
    Vec<entity::event_participant::Model>,
    Vec<entity::event_department::Model>,
);

impl<'a> EventFactory<'a> {
    /// Creates a new EventFactory with default values.
    ///
    /// Defaults:
    /// - program: `"Program {id}"`
    /// - window: 2026-03-02 09:00 to 10:00
    /// - status: `"upcoming"`, notified: `false`
    /// - participants: `["Office {id}"]`, departments: `["SGOD"]`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            program: format!("Program {}", id),
            start_at: at(2026, 3, 2, 9, 0),
            end_at: at(2026, 3, 2, 10, 0),
            purpose: "Test purpose".to_string(),
            status: "upcoming".to_string(),
            notified: false,
            created_by: "1000000".to_string(),
            participants: vec![format!("Office {}", id)],
            departments: vec!["SGOD".to_string()],
        }
    }

    pub fn program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Sets the start and end of the event.
    pub fn window(mut self, start_at: NaiveDateTime, end_at: NaiveDateTime) -> Self {
        self.start_at = start_at;
        self.end_at = end_at;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn notified(mut self, notified: bool) -> Self {
        self.notified = notified;
        self
    }

    pub fn created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = created_by.into();
        self
    }

    pub fn participants<I, S>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participants = participants.into_iter().map(Into::into).collect();
        self
    }

    pub fn departments<I, S>(mut self, departments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.departments = departments.into_iter().map(Into::into).collect();
        self
    }

    /// Inserts the event followed by one row per participant and per department.
    pub async fn build(self) -> Result<EventWithLabels, DbErr> {
        let event = entity::event::ActiveModel {
            id: ActiveValue::NotSet,
            program: ActiveValue::Set(self.program),
            start_at: ActiveValue::Set(self.start_at),
            end_at: ActiveValue::Set(self.end_at),
            purpose: ActiveValue::Set(self.purpose),
            status: ActiveValue::Set(self.status),
            notified: ActiveValue::Set(self.notified),
            created_by: ActiveValue::Set(self.created_by),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        let mut participants = Vec::with_capacity(self.participants.len());
        for participant in self.participants {
            let row = entity::event_participant::ActiveModel {
                id: ActiveValue::NotSet,
                event_id: ActiveValue::Set(event.id),
                participant_key: ActiveValue::Set(participant.trim().to_lowercase()),
                participant: ActiveValue::Set(participant),
            }
            .insert(self.db)
            .await?;
            participants.push(row);
        }

        let mut departments = Vec::with_capacity(self.departments.len());
        for department in self.departments {
            let row = entity::event_department::ActiveModel {
                id: ActiveValue::NotSet,
                event_id: ActiveValue::Set(event.id),
                department: ActiveValue::Set(department),
            }
            .insert(self.db)
            .await?;
            departments.push(row);
        }

        Ok((event, participants, departments))
    }
}

/// Creates an event with default values.
pub async fn create_event(db: &DatabaseConnection) -> Result<EventWithLabels, DbErr> {
    EventFactory::new(db).build().await
}
