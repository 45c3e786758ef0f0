use std::sync::atomic::{AtomicBool, Ordering};

use crate::server::{
    data::event::EventRepository,
    error::{mail::MailError, AppError},
    model::event::{EventParams, EventStatus},
    service::{
        mail::{Mail, Mailer, RecordingMailer},
        reminder::ReminderService,
    },
    util::clock::ScheduleClock,
};
use async_trait::async_trait;
use chrono::Duration;
use sea_orm::DatabaseConnection;
use test_utils::{builder::TestBuilder, factory};

/// Mailer that reschedules an event five hours later while its first reminder is sent.
struct ReschedulingMailer {
    db: DatabaseConnection,
    event_id: i32,
    moved: AtomicBool,
}

#[async_trait]
impl Mailer for ReschedulingMailer {
    async fn send(&self, mail: Mail) -> Result<(), MailError> {
        if self.moved.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let repo = EventRepository::new(&self.db);
        let event = repo
            .find_by_id(self.event_id)
            .await
            .map_err(|e| MailError::Delivery(e.to_string()))?
            .ok_or_else(|| MailError::Delivery(format!("no event for {}", mail.to)))?;

        let params = EventParams {
            program: event.program,
            start_at: event.start_at + Duration::hours(5),
            end_at: event.end_at + Duration::hours(5),
            purpose: event.purpose,
            participants: event.participants,
            departments: event.departments,
        };
        repo.update(self.event_id, &params, EventStatus::Upcoming)
            .await
            .map_err(|e| MailError::Delivery(e.to_string()))?;

        Ok(())
    }
}

/// Tests reminders go to the roster entries matching the event's participants.
///
/// Expected: one mail each for Registrar and Nurse, none for Cashier, event marked
/// notified and not reminded again
#[tokio::test]
async fn mails_matching_participants_once() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let mailer = RecordingMailer::new();
    let clock = ScheduleClock::default();
    let service = ReminderService::new(db, &mailer, clock, Duration::minutes(60));
    let now = clock.now();

    for (office, email) in [
        ("Registrar", "registrar@example.test"),
        ("Nurse", "nurse@example.test"),
        ("Cashier", "cashier@example.test"),
    ] {
        factory::category::CategoryFactory::new(db)
            .office(office)
            .email(email)
            .build()
            .await?;
    }

    let (event, _, _) = factory::event::EventFactory::new(db)
        .window(now + Duration::minutes(30), now + Duration::minutes(90))
        .participants(["registrar", " NURSE "])
        .build()
        .await?;

    let summary = service.send_due().await?;
    assert_eq!(summary.events, 1);
    assert_eq!(summary.sent, 2);

    let mut recipients: Vec<String> = mailer.sent().into_iter().map(|m| m.to).collect();
    recipients.sort();
    assert_eq!(
        recipients,
        vec!["nurse@example.test", "registrar@example.test"]
    );

    assert!(EventRepository::new(db).find_by_id(event.id).await?.unwrap().notified);

    let again = service.send_due().await?;
    assert_eq!(again.events, 0);
    assert_eq!(mailer.sent().len(), 2);

    Ok(())
}

/// Tests that events outside the lead window are left alone.
///
/// Expected: nothing sent, events not marked notified
#[tokio::test]
async fn ignores_events_outside_lead_window() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let mailer = RecordingMailer::new();
    let clock = ScheduleClock::default();
    let service = ReminderService::new(db, &mailer, clock, Duration::minutes(60));
    let now = clock.now();

    factory::category::CategoryFactory::new(db)
        .office("Registrar")
        .build()
        .await?;
    let (later, _, _) = factory::event::EventFactory::new(db)
        .window(now + Duration::hours(3), now + Duration::hours(4))
        .participants(["Registrar"])
        .build()
        .await?;
    factory::event::EventFactory::new(db)
        .window(now - Duration::minutes(10), now + Duration::minutes(50))
        .participants(["Registrar"])
        .build()
        .await?;

    assert_eq!(service.send_due().await?.events, 0);
    assert!(mailer.sent().is_empty());
    assert!(!EventRepository::new(db).find_by_id(later.id).await?.unwrap().notified);

    Ok(())
}

/// Tests that delivery failures are counted and the event is still marked notified.
///
/// Expected: failed == 1, notified == true
#[tokio::test]
async fn marks_notified_despite_failures() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let mailer = RecordingMailer::new();
    let clock = ScheduleClock::default();
    let service = ReminderService::new(db, &mailer, clock, Duration::minutes(60));
    let now = clock.now();

    factory::category::CategoryFactory::new(db)
        .office("Registrar")
        .build()
        .await?;
    let (event, _, _) = factory::event::EventFactory::new(db)
        .window(now + Duration::minutes(15), now + Duration::minutes(45))
        .participants(["Registrar"])
        .build()
        .await?;

    mailer.fail_deliveries();
    let summary = service.send_due().await?;

    assert_eq!(summary.failed, 1);
    assert_eq!(summary.sent, 0);
    assert!(EventRepository::new(db).find_by_id(event.id).await?.unwrap().notified);

    Ok(())
}

/// Tests an event rescheduled while its reminder is going out.
///
/// Expected: event not counted or marked notified, so the new time is reminded later
#[tokio::test]
async fn rescheduled_event_stays_due() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let clock = ScheduleClock::default();
    let now = clock.now();

    factory::category::CategoryFactory::new(db)
        .office("Registrar")
        .build()
        .await?;
    let (event, _, _) = factory::event::EventFactory::new(db)
        .window(now + Duration::minutes(30), now + Duration::minutes(90))
        .participants(["Registrar"])
        .build()
        .await?;

    let mailer = ReschedulingMailer {
        db: db.clone(),
        event_id: event.id,
        moved: AtomicBool::new(false),
    };
    let summary = ReminderService::new(db, &mailer, clock, Duration::minutes(60))
        .send_due()
        .await?;

    assert_eq!(summary.sent, 1);
    assert_eq!(summary.events, 0);

    let stored = EventRepository::new(db).find_by_id(event.id).await?.unwrap();
    assert_eq!(stored.start_at, event.start_at + Duration::hours(5));
    assert!(!stored.notified);

    Ok(())
}
