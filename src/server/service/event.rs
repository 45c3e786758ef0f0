//! Event booking service.
//!
//! Creates, edits and deletes events on behalf of an actor and runs the event
//! housekeeping jobs. Every booking write runs the conflict check and the write inside
//! one transaction while holding the `BookingLock`, and every successful write
//! broadcasts `statusUpdated`.

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::server::{
    data::event::EventRepository,
    error::{auth::AuthError, booking::BookingError, AppError},
    model::{
        actor::Actor,
        event::{Event, EventFilter, EventParams, EventStatus},
        label::same_label,
    },
    service::notification::StatusNotifier,
    util::clock::ScheduleClock,
};

pub mod conflict;
pub mod lock;

use conflict::find_conflicts;
use lock::BookingLock;

pub struct EventService<'a> {
    db: &'a DatabaseConnection,
    lock: &'a BookingLock,
    notifier: &'a StatusNotifier,
    clock: ScheduleClock,
}

impl<'a> EventService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        lock: &'a BookingLock,
        notifier: &'a StatusNotifier,
        clock: ScheduleClock,
    ) -> Self {
        Self {
            db,
            lock,
            notifier,
            clock,
        }
    }

    /// Lists events ordered by start time, applying the optional filters.
    pub async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, AppError> {
        let events = EventRepository::new(self.db).get_all().await?;

        Ok(events.into_iter().filter(|e| filter.matches(e)).collect())
    }

    pub async fn get(&self, id: i32) -> Result<Event, AppError> {
        EventRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(event_not_found)
    }

    /// Books a new event.
    ///
    /// Department users may only tag their own department. Offices always book as
    /// themselves: the event is tagged with the office's department and the office is
    /// added to the participants when missing.
    ///
    /// # Returns
    /// - `Ok(Event)` - The stored event with its derived status
    /// - `Err(AppError::AuthErr(AccessDenied))` - Department outside the actor's scope
    /// - `Err(AppError::BookingErr(Conflict))` - A participant is already booked in the window
    /// - `Err(AppError::DbErr)` - Database error; nothing was written
    pub async fn create(&self, actor: &Actor, mut params: EventParams) -> Result<Event, AppError> {
        scope_new_booking(actor, &mut params)?;

        let event = {
            let _guard = self.lock.acquire().await;
            let txn = self.db.begin().await?;
            let repo = EventRepository::new(&txn);

            ensure_available(&repo, &params, None).await?;

            let status = EventStatus::at(self.clock.now(), params.start_at, params.end_at);
            let event = repo.create(&params, actor.label(), status).await?;
            txn.commit().await?;
            event
        };

        tracing::info!(
            event_id = event.id,
            created_by = %event.created_by,
            "Booked event '{}'",
            event.program
        );
        self.notifier.notify();

        Ok(event)
    }

    /// Replaces an event's fields.
    ///
    /// The event's own stored row never conflicts with the edit. The status is derived
    /// again and the reminder flag is cleared so the new time gets its own reminder.
    ///
    /// # Returns
    /// - `Ok(Event)` - The updated event
    /// - `Err(AppError::NotFound)` - No event with that ID
    /// - `Err(AppError::AuthErr(AccessDenied))` - Actor may not edit the event
    /// - `Err(AppError::BookingErr(Conflict))` - A participant is already booked in the window
    pub async fn update(
        &self,
        actor: &Actor,
        id: i32,
        mut params: EventParams,
    ) -> Result<Event, AppError> {
        let event = {
            let _guard = self.lock.acquire().await;
            let txn = self.db.begin().await?;
            let repo = EventRepository::new(&txn);

            let existing = repo.find_by_id(id).await?.ok_or_else(event_not_found)?;
            scope_edit(actor, &existing, &mut params)?;

            ensure_available(&repo, &params, Some(id)).await?;

            let status = EventStatus::at(self.clock.now(), params.start_at, params.end_at);
            let event = repo
                .update(id, &params, status)
                .await?
                .ok_or_else(event_not_found)?;
            txn.commit().await?;
            event
        };

        tracing::info!(event_id = event.id, actor = %actor.label(), "Updated event");
        self.notifier.notify();

        Ok(event)
    }

    /// Deletes an event and its participant and department rows in one transaction.
    ///
    /// # Returns
    /// - `Ok(())` - Event deleted
    /// - `Err(AppError::NotFound)` - No event with that ID
    /// - `Err(AppError::AuthErr(AccessDenied))` - Actor may not delete the event
    pub async fn delete(&self, actor: &Actor, id: i32) -> Result<(), AppError> {
        {
            let _guard = self.lock.acquire().await;
            let txn = self.db.begin().await?;
            let repo = EventRepository::new(&txn);

            let existing = repo.find_by_id(id).await?.ok_or_else(event_not_found)?;
            authorize_change(actor, &existing)?;

            repo.delete(id).await?;
            txn.commit().await?;
        }

        tracing::info!(event_id = id, actor = %actor.label(), "Deleted event");
        self.notifier.notify();

        Ok(())
    }

    /// Re-derives stored statuses, broadcasting when any changed.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of events whose status changed
    pub async fn refresh_statuses(&self) -> Result<u64, AppError> {
        let changed = EventRepository::new(self.db)
            .refresh_statuses(self.clock.now())
            .await?;

        if changed > 0 {
            self.notifier.notify();
        }

        Ok(changed)
    }

    /// Deletes events that have already ended.
    pub async fn purge_expired(&self) -> Result<u64, AppError> {
        let _guard = self.lock.acquire().await;
        let txn = self.db.begin().await?;
        let deleted = EventRepository::new(&txn)
            .delete_ended_before(self.clock.now())
            .await?;
        txn.commit().await?;

        if deleted > 0 {
            self.notifier.notify();
        }

        Ok(deleted)
    }

    /// Deletes every event and broadcasts the empty schedule.
    pub async fn reset_all(&self) -> Result<u64, AppError> {
        let _guard = self.lock.acquire().await;
        let txn = self.db.begin().await?;
        let deleted = EventRepository::new(&txn).delete_all().await?;
        txn.commit().await?;

        self.notifier.notify();

        Ok(deleted)
    }
}

fn event_not_found() -> AppError {
    AppError::NotFound("Event not found".to_string())
}

/// Rejects the booking when an overlapping event shares a participant.
async fn ensure_available<C: ConnectionTrait>(
    repo: &EventRepository<'_, C>,
    params: &EventParams,
    exclude_id: Option<i32>,
) -> Result<(), AppError> {
    let overlapping = repo
        .find_overlapping(
            params.start_at,
            params.end_at,
            &params.participants,
            exclude_id,
        )
        .await?;

    let conflicts = find_conflicts(
        params.start_at,
        params.end_at,
        &params.participants,
        &overlapping,
        exclude_id,
    );

    if conflicts.is_empty() {
        Ok(())
    } else {
        Err(BookingError::Conflict(conflicts).into())
    }
}

fn scope_new_booking(actor: &Actor, params: &mut EventParams) -> Result<(), AuthError> {
    match actor {
        Actor::Office(office) => {
            params.departments = vec![office.department.clone()];
            include_participant(&mut params.participants, &office.office);
            Ok(())
        }
        Actor::User(_) if actor.is_admin() => Ok(()),
        Actor::User(_) => {
            if params.departments.iter().all(|d| actor.covers_department(d)) {
                Ok(())
            } else {
                Err(AuthError::AccessDenied(
                    "You can only book events for your own department.".to_string(),
                ))
            }
        }
    }
}

fn scope_edit(actor: &Actor, existing: &Event, params: &mut EventParams) -> Result<(), AuthError> {
    authorize_change(actor, existing)?;

    match actor {
        Actor::Office(office) => {
            include_participant(&mut params.participants, &office.office);
            Ok(())
        }
        Actor::User(_) if actor.is_admin() => Ok(()),
        Actor::User(_) => {
            if params.departments.iter().any(|d| actor.covers_department(d)) {
                Ok(())
            } else {
                Err(AuthError::AccessDenied(
                    "Your department must remain among the event's departments.".to_string(),
                ))
            }
        }
    }
}

/// Administrators change any event, department users events tagged with their
/// department and offices events they participate in.
fn authorize_change(actor: &Actor, existing: &Event) -> Result<(), AuthError> {
    let allowed = match actor {
        Actor::Office(office) => existing
            .participants
            .iter()
            .any(|p| same_label(p, &office.office)),
        Actor::User(_) => {
            actor.is_admin()
                || existing
                    .departments
                    .iter()
                    .any(|d| actor.covers_department(d))
        }
    };

    if allowed {
        Ok(())
    } else {
        Err(AuthError::AccessDenied(
            "You do not have permission to modify this event.".to_string(),
        ))
    }
}

fn include_participant(participants: &mut Vec<String>, office: &str) {
    if !participants.iter().any(|p| same_label(p, office)) {
        participants.insert(0, office.to_string());
    }
}
