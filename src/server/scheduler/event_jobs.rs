use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    error::AppError,
    service::{event::EventService, reminder::ReminderService},
    state::AppState,
};

/// Every minute, on the minute.
const EVERY_MINUTE: &str = "0 * * * * *";
/// Midnight every day.
const DAILY_MIDNIGHT: &str = "0 0 0 * * *";
/// Midnight between Saturday and Sunday.
const SUNDAY_MIDNIGHT: &str = "0 0 0 * * Sun";

/// Starts the event housekeeping scheduler.
///
/// Schedules are evaluated in the schedule's UTC offset:
/// - every minute: refresh event statuses, then mail due reminders
/// - daily at midnight: purge events that have ended
/// - Sunday at midnight: delete every event for the new week
///
/// A failing run is logged and the job runs again on its next tick.
///
/// # Returns
/// - `Ok(JobScheduler)` - Running scheduler; keep it alive for jobs to keep firing
/// - `Err(AppError::SchedulerErr)` - A job could not be created or the scheduler not started
pub async fn start_scheduler(state: AppState) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;
    let offset = state.clock.offset();

    let minute_state = state.clone();
    let minute_job = Job::new_async_tz(EVERY_MINUTE, offset, move |_uuid, _lock| {
        let state = minute_state.clone();

        Box::pin(async move {
            if let Err(e) = refresh_statuses(&state).await {
                tracing::error!("Error refreshing event statuses: {}", e);
            }
            if let Err(e) = send_reminders(&state).await {
                tracing::error!("Error sending event reminders: {}", e);
            }
        })
    })?;

    let purge_state = state.clone();
    let purge_job = Job::new_async_tz(DAILY_MIDNIGHT, offset, move |_uuid, _lock| {
        let state = purge_state.clone();

        Box::pin(async move {
            if let Err(e) = purge_expired(&state).await {
                tracing::error!("Error purging expired events: {}", e);
            }
        })
    })?;

    let reset_state = state;
    let reset_job = Job::new_async_tz(SUNDAY_MIDNIGHT, offset, move |_uuid, _lock| {
        let state = reset_state.clone();

        Box::pin(async move {
            if let Err(e) = weekly_reset(&state).await {
                tracing::error!("Error resetting weekly events: {}", e);
            }
        })
    })?;

    scheduler.add(minute_job).await?;
    scheduler.add(purge_job).await?;
    scheduler.add(reset_job).await?;
    scheduler.start().await?;

    tracing::info!(%offset, "Event scheduler started");

    Ok(scheduler)
}

fn event_service(state: &AppState) -> EventService<'_> {
    EventService::new(&state.db, &state.booking_lock, &state.notifier, state.clock)
}

async fn refresh_statuses(state: &AppState) -> Result<(), AppError> {
    let changed = event_service(state).refresh_statuses().await?;

    if changed > 0 {
        tracing::info!(changed, "Event statuses updated");
    }

    Ok(())
}

async fn send_reminders(state: &AppState) -> Result<(), AppError> {
    let summary = ReminderService::new(
        &state.db,
        state.mailer.as_ref(),
        state.clock,
        state.reminder_lead,
    )
    .send_due()
    .await?;

    if summary.events > 0 {
        tracing::info!(
            events = summary.events,
            sent = summary.sent,
            failed = summary.failed,
            "Event reminders processed"
        );
    }

    Ok(())
}

async fn purge_expired(state: &AppState) -> Result<(), AppError> {
    let purged = event_service(state).purge_expired().await?;

    tracing::info!(purged, "Expired events purged");

    Ok(())
}

async fn weekly_reset(state: &AppState) -> Result<(), AppError> {
    let deleted = event_service(state).reset_all().await?;

    tracing::info!(deleted, "Weekly event reset");

    Ok(())
}
