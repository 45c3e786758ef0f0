use super::*;

/// Tests the overlap query uses half-open windows.
///
/// Expected: the 09:30 event is found, the 10:00 event touching the boundary is not
#[tokio::test]
async fn finds_only_strictly_overlapping_events() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (overlapping, _, _) = factory::event::EventFactory::new(db)
        .window(at(2026, 3, 2, 9, 30), at(2026, 3, 2, 10, 30))
        .participants(["Registrar"])
        .build()
        .await?;
    factory::event::EventFactory::new(db)
        .window(at(2026, 3, 2, 10, 0), at(2026, 3, 2, 11, 0))
        .participants(["Registrar"])
        .build()
        .await?;
    factory::event::EventFactory::new(db)
        .window(at(2026, 3, 2, 8, 0), at(2026, 3, 2, 9, 0))
        .participants(["Registrar"])
        .build()
        .await?;

    let found = EventRepository::new(db)
        .find_overlapping(
            at(2026, 3, 2, 9, 0),
            at(2026, 3, 2, 10, 0),
            &["Registrar".to_string()],
            None,
        )
        .await?;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, overlapping.id);

    Ok(())
}

/// Tests the excluded event is skipped.
///
/// Expected: empty result when the only overlapping event is excluded
#[tokio::test]
async fn skips_excluded_event() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (event, participants, _) = factory::create_event(db).await?;
    let labels: Vec<String> = participants.into_iter().map(|p| p.participant).collect();

    let found = EventRepository::new(db)
        .find_overlapping(event.start_at, event.end_at, &labels, Some(event.id))
        .await?;

    assert!(found.is_empty());

    Ok(())
}

/// Tests the overlap query matches participants on their normalized key.
///
/// Expected: only the event sharing " REGISTRAR " is found, with all its participants
#[tokio::test]
async fn matches_shared_participants_by_key() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (sharing, _, _) = factory::event::EventFactory::new(db)
        .participants(["Registrar", "Nurse"])
        .build()
        .await?;
    factory::event::EventFactory::new(db)
        .participants(["Cashier"])
        .build()
        .await?;

    let repo = EventRepository::new(db);
    let found = repo
        .find_overlapping(
            at(2026, 3, 2, 9, 0),
            at(2026, 3, 2, 10, 0),
            &[" REGISTRAR ".to_string(), "Guidance".to_string()],
            None,
        )
        .await?;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, sharing.id);
    assert_eq!(found[0].participants, vec!["Registrar", "Nurse"]);

    assert!(repo
        .find_overlapping(at(2026, 3, 2, 9, 0), at(2026, 3, 2, 10, 0), &[], None)
        .await?
        .is_empty());

    Ok(())
}
