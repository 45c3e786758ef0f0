use super::*;

/// Tests status refresh writes only changed rows and is idempotent.
///
/// Expected: 3 changes on the first run, 0 on the second
#[tokio::test]
async fn refreshes_statuses_idempotently() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    // All stored as "upcoming"; at 10:30 one is still upcoming, one active, two ended.
    let windows = [(11, 12), (10, 11), (9, 10), (8, 9)];
    for (start, end) in windows {
        factory::event::EventFactory::new(db)
            .window(at(2026, 3, 2, start, 0), at(2026, 3, 2, end, 0))
            .build()
            .await?;
    }

    let repo = EventRepository::new(db);
    let now = at(2026, 3, 2, 10, 30);

    assert_eq!(repo.refresh_statuses(now).await?, 3);
    assert_eq!(repo.refresh_statuses(now).await?, 0);

    let statuses: Vec<EventStatus> = repo
        .get_all()
        .await?
        .into_iter()
        .map(|e| e.status)
        .collect();

    assert_eq!(
        statuses,
        vec![
            EventStatus::Ended,
            EventStatus::Ended,
            EventStatus::Active,
            EventStatus::Upcoming
        ]
    );

    Ok(())
}

/// Tests the purge deletes only events that ended before now.
///
/// Expected: 1 deleted, the running event survives
#[tokio::test]
async fn purges_ended_events() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::event::EventFactory::new(db)
        .window(at(2026, 3, 1, 9, 0), at(2026, 3, 1, 10, 0))
        .build()
        .await?;
    let (running, _, _) = factory::event::EventFactory::new(db)
        .window(at(2026, 3, 1, 23, 0), at(2026, 3, 2, 1, 0))
        .build()
        .await?;

    let repo = EventRepository::new(db);

    assert_eq!(repo.delete_ended_before(at(2026, 3, 2, 0, 0)).await?, 1);

    let remaining = repo.get_all().await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, running.id);

    Ok(())
}

/// Tests the weekly reset removes every event.
///
/// Expected: count of deleted events, empty table afterwards
#[tokio::test]
async fn deletes_all_events() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_event(db).await?;
    factory::create_event(db).await?;

    let repo = EventRepository::new(db);

    assert_eq!(repo.delete_all().await?, 2);
    assert!(repo.get_all().await?.is_empty());

    Ok(())
}

/// Tests reminder selection: unnotified events starting inside the lead window.
///
/// Expected: only the event starting at 09:30 for a 08:45 check with a 60 minute lead
#[tokio::test]
async fn selects_due_reminders() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (due, _, _) = factory::event::EventFactory::new(db)
        .window(at(2026, 3, 2, 9, 30), at(2026, 3, 2, 10, 0))
        .build()
        .await?;
    factory::event::EventFactory::new(db)
        .window(at(2026, 3, 2, 9, 15), at(2026, 3, 2, 10, 0))
        .notified(true)
        .build()
        .await?;
    factory::event::EventFactory::new(db)
        .window(at(2026, 3, 2, 11, 0), at(2026, 3, 2, 12, 0))
        .build()
        .await?;

    let repo = EventRepository::new(db);
    let due_events = repo
        .get_due_reminders(at(2026, 3, 2, 8, 45), at(2026, 3, 2, 9, 45))
        .await?;

    assert_eq!(due_events.len(), 1);
    assert_eq!(due_events[0].id, due.id);

    assert!(repo.mark_notified(due.id, due.start_at).await?);
    assert!(repo.find_by_id(due.id).await?.unwrap().notified);

    Ok(())
}

/// Tests an event moved since it was selected is not marked as reminded.
///
/// Expected: Ok(false), notified stays false
#[tokio::test]
async fn leaves_moved_event_unreminded() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (event, _, _) = factory::event::EventFactory::new(db)
        .window(at(2026, 3, 2, 14, 0), at(2026, 3, 2, 15, 0))
        .build()
        .await?;

    let repo = EventRepository::new(db);

    assert!(!repo.mark_notified(event.id, at(2026, 3, 2, 9, 0)).await?);
    assert!(!repo.find_by_id(event.id).await?.unwrap().notified);

    Ok(())
}
