use super::*;

/// Tests the weekly period requires both start and end inside the range.
///
/// Expected: the event spilling past the last day is excluded
#[tokio::test]
async fn weekly_period_bounds_start_and_end() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (inside, _, _) = factory::event::EventFactory::new(db)
        .window(at(2026, 3, 8, 22, 0), at(2026, 3, 8, 23, 0))
        .build()
        .await?;
    factory::event::EventFactory::new(db)
        .window(at(2026, 3, 8, 23, 0), at(2026, 3, 9, 1, 0))
        .build()
        .await?;
    factory::event::EventFactory::new(db)
        .window(at(2026, 3, 1, 9, 0), at(2026, 3, 1, 10, 0))
        .build()
        .await?;

    let period = ReportPeriod::from_query(ReportKind::Weekly, "2026-03-02", "2026-03-08").unwrap();
    let events = EventRepository::new(db).get_in_period(&period).await?;

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, inside.id);

    Ok(())
}

/// Tests the monthly period selects events by start month.
///
/// Expected: both March events, not the April one
#[tokio::test]
async fn monthly_period_selects_by_start() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::event::EventFactory::new(db)
        .window(at(2026, 3, 1, 9, 0), at(2026, 3, 1, 10, 0))
        .build()
        .await?;
    factory::event::EventFactory::new(db)
        .window(at(2026, 3, 31, 23, 0), at(2026, 4, 1, 1, 0))
        .build()
        .await?;
    factory::event::EventFactory::new(db)
        .window(at(2026, 4, 1, 9, 0), at(2026, 4, 1, 10, 0))
        .build()
        .await?;

    let period = ReportPeriod::from_query(ReportKind::Monthly, "3", "2026").unwrap();
    let events = EventRepository::new(db).get_in_period(&period).await?;

    assert_eq!(events.len(), 2);

    Ok(())
}
