use super::*;

/// Tests updating replaces labels and clears the reminder flag.
///
/// Expected: new participants only, notified reset to false
#[tokio::test]
async fn replaces_labels_and_resets_notified() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (event, _, _) = factory::event::EventFactory::new(db)
        .participants(["Registrar"])
        .notified(true)
        .build()
        .await?;

    let updated = EventRepository::new(db)
        .update(event.id, &params(13, 14, &["Nurse"]), EventStatus::Upcoming)
        .await?
        .unwrap();

    assert_eq!(updated.participants, vec!["Nurse"]);
    assert_eq!(updated.start_at, at(2026, 3, 2, 13, 0));
    assert!(!updated.notified);

    Ok(())
}

/// Tests updating a missing event.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_event() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = EventRepository::new(db)
        .update(42, &params(9, 10, &["Nurse"]), EventStatus::Upcoming)
        .await?;

    assert!(result.is_none());

    Ok(())
}
