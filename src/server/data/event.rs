//! Event repository for database operations.
//!
//! Events are stored across three tables: the event row plus one row per participant
//! and per department. The repository is generic over the connection so the booking
//! service can run the conflict check and the write inside a single transaction.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait,
};

use crate::server::model::{
    event::{Event, EventParams, EventStatus},
    label::normalize_label,
    report::ReportPeriod,
};

/// Repository providing database operations for events.
pub struct EventRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EventRepository<'a, C> {
    /// Creates a new EventRepository over a connection or an open transaction.
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Event>, DbErr> {
        let Some(entity) = entity::prelude::Event::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        Ok(self.with_labels(vec![entity]).await?.pop())
    }

    /// Gets every event ordered by start time.
    pub async fn get_all(&self) -> Result<Vec<Event>, DbErr> {
        let entities = entity::prelude::Event::find()
            .order_by_asc(entity::event::Column::StartAt)
            .order_by_asc(entity::event::Column::Id)
            .all(self.db)
            .await?;

        self.with_labels(entities).await
    }

    /// Gets events whose window intersects `[start, end)` and that share a participant.
    ///
    /// Touching windows (one ends exactly when the other starts) are not returned.
    /// Participants are matched on their normalized key. Returned events carry all of
    /// their participants, not only the shared ones.
    ///
    /// # Arguments
    /// - `start` - Start of the candidate window
    /// - `end` - End of the candidate window
    /// - `participants` - Candidate participant labels
    /// - `exclude_id` - Event to ignore, used when the candidate is an edit of that event
    pub async fn find_overlapping(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        participants: &[String],
        exclude_id: Option<i32>,
    ) -> Result<Vec<Event>, DbErr> {
        let keys: Vec<String> = participants.iter().map(|p| normalize_label(p)).collect();
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let sharing = entity::prelude::EventParticipant::find()
            .select_only()
            .column(entity::event_participant::Column::EventId)
            .filter(entity::event_participant::Column::ParticipantKey.is_in(keys))
            .into_query();

        let mut query = entity::prelude::Event::find()
            .filter(entity::event::Column::StartAt.lt(end))
            .filter(entity::event::Column::EndAt.gt(start))
            .filter(entity::event::Column::Id.in_subquery(sharing));

        if let Some(exclude_id) = exclude_id {
            query = query.filter(entity::event::Column::Id.ne(exclude_id));
        }

        let entities = query
            .order_by_asc(entity::event::Column::StartAt)
            .all(self.db)
            .await?;

        self.with_labels(entities).await
    }

    /// Inserts an event and its participant and department rows.
    ///
    /// # Arguments
    /// - `params` - Validated event fields
    /// - `created_by` - Identifier of the booking actor
    /// - `status` - Status derived for the current time
    pub async fn create(
        &self,
        params: &EventParams,
        created_by: &str,
        status: EventStatus,
    ) -> Result<Event, DbErr> {
        let entity = entity::event::ActiveModel {
            id: ActiveValue::NotSet,
            program: ActiveValue::Set(params.program.clone()),
            start_at: ActiveValue::Set(params.start_at),
            end_at: ActiveValue::Set(params.end_at),
            purpose: ActiveValue::Set(params.purpose.clone()),
            status: ActiveValue::Set(status.as_str().to_string()),
            notified: ActiveValue::Set(false),
            created_by: ActiveValue::Set(created_by.to_string()),
            created_at: ActiveValue::Set(chrono::Utc::now()),
        }
        .insert(self.db)
        .await?;

        let id = entity.id;
        self.insert_labels(id, params).await?;

        self.with_labels(vec![entity])
            .await?
            .pop()
            .ok_or_else(|| DbErr::RecordNotFound(format!("event {}", id)))
    }

    /// Replaces an event's fields and labels and clears its reminder flag.
    ///
    /// # Returns
    /// - `Ok(Some(Event))` - Updated event
    /// - `Ok(None)` - No event with that ID
    pub async fn update(
        &self,
        id: i32,
        params: &EventParams,
        status: EventStatus,
    ) -> Result<Option<Event>, DbErr> {
        let Some(existing) = entity::prelude::Event::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::event::ActiveModel = existing.into();
        active.program = ActiveValue::Set(params.program.clone());
        active.start_at = ActiveValue::Set(params.start_at);
        active.end_at = ActiveValue::Set(params.end_at);
        active.purpose = ActiveValue::Set(params.purpose.clone());
        active.status = ActiveValue::Set(status.as_str().to_string());
        active.notified = ActiveValue::Set(false);
        let entity = active.update(self.db).await?;

        self.delete_labels(&[id]).await?;
        self.insert_labels(id, params).await?;

        Ok(self.with_labels(vec![entity]).await?.pop())
    }

    /// Deletes an event together with its label rows.
    ///
    /// Issues one statement per table; run it on a transaction so the event and its
    /// labels go together.
    ///
    /// # Returns
    /// - `Ok(true)` - Event deleted
    /// - `Ok(false)` - No event with that ID
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        self.delete_labels(&[id]).await?;
        let result = entity::prelude::Event::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Re-derives every stored status for `now`.
    ///
    /// Only rows whose status actually changes are written.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of events whose status changed
    pub async fn refresh_statuses(&self, now: NaiveDateTime) -> Result<u64, DbErr> {
        let upcoming = entity::prelude::Event::update_many()
            .col_expr(
                entity::event::Column::Status,
                Expr::value(EventStatus::Upcoming.as_str()),
            )
            .filter(entity::event::Column::StartAt.gt(now))
            .filter(entity::event::Column::Status.ne(EventStatus::Upcoming.as_str()))
            .exec(self.db)
            .await?;

        let active = entity::prelude::Event::update_many()
            .col_expr(
                entity::event::Column::Status,
                Expr::value(EventStatus::Active.as_str()),
            )
            .filter(entity::event::Column::StartAt.lte(now))
            .filter(entity::event::Column::EndAt.gt(now))
            .filter(entity::event::Column::Status.ne(EventStatus::Active.as_str()))
            .exec(self.db)
            .await?;

        let ended = entity::prelude::Event::update_many()
            .col_expr(
                entity::event::Column::Status,
                Expr::value(EventStatus::Ended.as_str()),
            )
            .filter(entity::event::Column::EndAt.lte(now))
            .filter(entity::event::Column::Status.ne(EventStatus::Ended.as_str()))
            .exec(self.db)
            .await?;

        Ok(upcoming.rows_affected + active.rows_affected + ended.rows_affected)
    }

    /// Deletes events that ended before `now`.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of events deleted
    pub async fn delete_ended_before(&self, now: NaiveDateTime) -> Result<u64, DbErr> {
        let ids: Vec<i32> = entity::prelude::Event::find()
            .select_only()
            .column(entity::event::Column::Id)
            .filter(entity::event::Column::EndAt.lt(now))
            .into_tuple()
            .all(self.db)
            .await?;

        if ids.is_empty() {
            return Ok(0);
        }

        self.delete_labels(&ids).await?;
        let result = entity::prelude::Event::delete_many()
            .filter(entity::event::Column::Id.is_in(ids))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes every event.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of events deleted
    pub async fn delete_all(&self) -> Result<u64, DbErr> {
        entity::prelude::EventParticipant::delete_many()
            .exec(self.db)
            .await?;
        entity::prelude::EventDepartment::delete_many()
            .exec(self.db)
            .await?;
        let result = entity::prelude::Event::delete_many().exec(self.db).await?;

        Ok(result.rows_affected)
    }

    /// Gets events that have not been reminded yet and start in `(now, until]`.
    pub async fn get_due_reminders(
        &self,
        now: NaiveDateTime,
        until: NaiveDateTime,
    ) -> Result<Vec<Event>, DbErr> {
        let entities = entity::prelude::Event::find()
            .filter(entity::event::Column::Notified.eq(false))
            .filter(entity::event::Column::StartAt.gt(now))
            .filter(entity::event::Column::StartAt.lte(until))
            .order_by_asc(entity::event::Column::StartAt)
            .all(self.db)
            .await?;

        self.with_labels(entities).await
    }

    /// Marks an event as reminded, provided it still starts at `start_at`.
    ///
    /// An event moved after its reminder was sent keeps `notified = false` so the new
    /// time gets a reminder of its own.
    ///
    /// # Returns
    /// - `Ok(true)` - Event marked
    /// - `Ok(false)` - Event deleted or moved in the meantime
    pub async fn mark_notified(&self, id: i32, start_at: NaiveDateTime) -> Result<bool, DbErr> {
        let result = entity::prelude::Event::update_many()
            .col_expr(entity::event::Column::Notified, Expr::value(true))
            .filter(entity::event::Column::Id.eq(id))
            .filter(entity::event::Column::StartAt.eq(start_at))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Gets events covered by a report period, ordered by start time.
    pub async fn get_in_period(&self, period: &ReportPeriod) -> Result<Vec<Event>, DbErr> {
        let mut query = entity::prelude::Event::find()
            .filter(entity::event::Column::StartAt.gte(period.start))
            .filter(entity::event::Column::StartAt.lt(period.end));

        if period.ends_bounded {
            query = query.filter(entity::event::Column::EndAt.lt(period.end));
        }

        let entities = query
            .order_by_asc(entity::event::Column::StartAt)
            .order_by_asc(entity::event::Column::Id)
            .all(self.db)
            .await?;

        self.with_labels(entities).await
    }

    async fn insert_labels(&self, event_id: i32, params: &EventParams) -> Result<(), DbErr> {
        if !params.participants.is_empty() {
            let rows = params
                .participants
                .iter()
                .map(|participant| entity::event_participant::ActiveModel {
                    id: ActiveValue::NotSet,
                    event_id: ActiveValue::Set(event_id),
                    participant: ActiveValue::Set(participant.clone()),
                    participant_key: ActiveValue::Set(normalize_label(participant)),
                });
            entity::prelude::EventParticipant::insert_many(rows)
                .exec(self.db)
                .await?;
        }

        if !params.departments.is_empty() {
            let rows = params
                .departments
                .iter()
                .map(|department| entity::event_department::ActiveModel {
                    id: ActiveValue::NotSet,
                    event_id: ActiveValue::Set(event_id),
                    department: ActiveValue::Set(department.clone()),
                });
            entity::prelude::EventDepartment::insert_many(rows)
                .exec(self.db)
                .await?;
        }

        Ok(())
    }

    async fn delete_labels(&self, event_ids: &[i32]) -> Result<(), DbErr> {
        entity::prelude::EventParticipant::delete_many()
            .filter(entity::event_participant::Column::EventId.is_in(event_ids.to_vec()))
            .exec(self.db)
            .await?;
        entity::prelude::EventDepartment::delete_many()
            .filter(entity::event_department::Column::EventId.is_in(event_ids.to_vec()))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Loads participant and department rows for a batch of events and converts them.
    async fn with_labels(&self, entities: Vec<entity::event::Model>) -> Result<Vec<Event>, DbErr> {
        if entities.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = entities.iter().map(|e| e.id).collect();

        let mut participants: HashMap<i32, Vec<entity::event_participant::Model>> = HashMap::new();
        for row in entity::prelude::EventParticipant::find()
            .filter(entity::event_participant::Column::EventId.is_in(ids.clone()))
            .order_by_asc(entity::event_participant::Column::Id)
            .all(self.db)
            .await?
        {
            participants.entry(row.event_id).or_default().push(row);
        }

        let mut departments: HashMap<i32, Vec<entity::event_department::Model>> = HashMap::new();
        for row in entity::prelude::EventDepartment::find()
            .filter(entity::event_department::Column::EventId.is_in(ids))
            .order_by_asc(entity::event_department::Column::Id)
            .all(self.db)
            .await?
        {
            departments.entry(row.event_id).or_default().push(row);
        }

        entities
            .into_iter()
            .map(|entity| {
                let id = entity.id;
                Event::from_entity(
                    entity,
                    participants.remove(&id).unwrap_or_default(),
                    departments.remove(&id).unwrap_or_default(),
                )
                .map_err(|e| DbErr::Type(e.to_string()))
            })
            .collect()
    }
}
