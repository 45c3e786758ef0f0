use super::*;

/// Tests creating an event stores its labels and normalized participant keys.
///
/// Expected: Ok with participants in submission order and lowercase keys
#[tokio::test]
async fn creates_event_with_labels() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = EventRepository::new(db);
    let event = repo
        .create(&params(9, 10, &["Registrar", "Nurse"]), "1000001", EventStatus::Upcoming)
        .await?;

    assert_eq!(event.participants, vec!["Registrar", "Nurse"]);
    assert_eq!(event.departments, vec!["SGOD"]);
    assert_eq!(event.status, EventStatus::Upcoming);
    assert_eq!(event.created_by, "1000001");
    assert!(!event.notified);

    use sea_orm::EntityTrait;
    let keys: Vec<String> = entity::prelude::EventParticipant::find()
        .all(db)
        .await?
        .into_iter()
        .map(|p| p.participant_key)
        .collect();

    assert_eq!(keys, vec!["registrar", "nurse"]);

    Ok(())
}

/// Tests deleting an event removes its label rows.
///
/// Expected: Ok(true), no participant rows left
#[tokio::test]
async fn deletes_event_with_labels() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (event, _, _) = factory::create_event(db).await?;
    let repo = EventRepository::new(db);

    assert!(repo.delete(event.id).await?);
    assert!(!repo.delete(event.id).await?);

    use sea_orm::{EntityTrait, PaginatorTrait};
    assert_eq!(entity::prelude::EventParticipant::find().count(db).await?, 0);
    assert_eq!(entity::prelude::EventDepartment::find().count(db).await?, 0);

    Ok(())
}

/// Tests a delete rolled back with its transaction leaves the event and its labels.
///
/// Expected: event found again with its participants and departments intact
#[tokio::test]
async fn rolled_back_delete_keeps_event_and_labels() -> Result<(), DbErr> {
    use sea_orm::TransactionTrait;

    let test = TestBuilder::new().with_event_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let (event, _, _) = factory::event::EventFactory::new(db)
        .participants(["Registrar", "Nurse"])
        .build()
        .await?;

    let txn = db.begin().await?;
    assert!(EventRepository::new(&txn).delete(event.id).await?);
    txn.rollback().await?;

    let stored = EventRepository::new(db).find_by_id(event.id).await?.unwrap();
    assert_eq!(stored.participants, vec!["Registrar", "Nurse"]);
    assert_eq!(stored.departments, vec!["SGOD"]);

    Ok(())
}
