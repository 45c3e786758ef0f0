//! Email reminders for upcoming events.

use std::collections::HashSet;

use chrono::Duration;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{category::CategoryRepository, event::EventRepository},
    error::AppError,
    model::label::normalize_label,
    service::mail::{Mail, Mailer},
    util::clock::ScheduleClock,
};

/// Counts from one reminder run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReminderSummary {
    /// Events marked as notified.
    pub events: u64,
    /// Reminder emails accepted by the mailer.
    pub sent: u64,
    /// Reminder emails that could not be delivered.
    pub failed: u64,
}

pub struct ReminderService<'a> {
    db: &'a DatabaseConnection,
    mailer: &'a dyn Mailer,
    clock: ScheduleClock,
    lead: Duration,
}

impl<'a> ReminderService<'a> {
    /// Creates a new ReminderService.
    ///
    /// # Arguments
    /// - `lead` - How long before an event's start its reminder goes out
    pub fn new(
        db: &'a DatabaseConnection,
        mailer: &'a dyn Mailer,
        clock: ScheduleClock,
        lead: Duration,
    ) -> Self {
        Self {
            db,
            mailer,
            clock,
            lead,
        }
    }

    /// Mails every participating office of events starting within the lead window.
    ///
    /// Recipients are the roster entries whose office matches one of the event's
    /// participants. Each event is marked as notified after its mails were attempted,
    /// whether or not every delivery succeeded, so a bad address is not retried every
    /// minute. An event edited to a new start time while its mails were going out is
    /// left unmarked.
    pub async fn send_due(&self) -> Result<ReminderSummary, AppError> {
        let now = self.clock.now();
        let events = EventRepository::new(self.db)
            .get_due_reminders(now, now + self.lead)
            .await?;

        if events.is_empty() {
            return Ok(ReminderSummary::default());
        }

        let roster = CategoryRepository::new(self.db).get_all().await?;
        let event_repo = EventRepository::new(self.db);
        let mut summary = ReminderSummary::default();

        for event in events {
            let participants: HashSet<String> =
                event.participants.iter().map(|p| normalize_label(p)).collect();

            for category in roster
                .iter()
                .filter(|c| participants.contains(&normalize_label(&c.office)))
            {
                match self
                    .mailer
                    .send(Mail::reminder(&category.email, &category.office, &event))
                    .await
                {
                    Ok(()) => summary.sent += 1,
                    Err(e) => {
                        summary.failed += 1;
                        tracing::error!(
                            event_id = event.id,
                            recipient = %category.email,
                            "Failed to send reminder: {}",
                            e
                        );
                    }
                }
            }

            if event_repo.mark_notified(event.id, event.start_at).await? {
                summary.events += 1;
            } else {
                tracing::info!(
                    event_id = event.id,
                    "Event moved while reminding, keeping it due for its new time"
                );
            }
        }

        Ok(summary)
    }
}
