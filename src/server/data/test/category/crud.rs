use super::*;

fn params(id_number: &str, office: &str, department: &str) -> CategoryParams {
    CategoryParams {
        id_number: id_number.to_string(),
        office: office.to_string(),
        email: format!("{}@example.test", id_number),
        department: department.to_string(),
    }
}

/// Tests entries are listed by department, then office.
///
/// Expected: CID entry first, then SGOD entries alphabetically
#[tokio::test]
async fn lists_entries_by_department_and_office() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Category)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CategoryRepository::new(db);
    repo.create(params("C-1", "Registrar", "SGOD")).await?;
    repo.create(params("C-2", "Accounting", "SGOD")).await?;
    repo.create(params("C-3", "Nurse", "CID")).await?;

    let offices: Vec<String> = repo
        .get_all()
        .await?
        .into_iter()
        .map(|c| c.office)
        .collect();

    assert_eq!(offices, vec!["Nurse", "Accounting", "Registrar"]);

    Ok(())
}

/// Tests updating and finding entries by ID number.
///
/// Expected: updated fields visible through `find_by_id_number`
#[tokio::test]
async fn updates_entry() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Category)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CategoryRepository::new(db);
    let created = repo.create(params("C-1", "Registrar", "SGOD")).await?;

    let updated = repo
        .update(created.id, params("C-9", "Records", "OSDS"))
        .await?
        .unwrap();
    let found = repo.find_by_id_number("C-9").await?.unwrap();

    assert_eq!(updated, found);
    assert_eq!(found.department, "OSDS");
    assert!(repo.find_by_id_number("C-1").await?.is_none());
    assert!(repo.update(999, params("X", "X", "X")).await?.is_none());

    Ok(())
}

/// Tests the ID number uniqueness lookup ignores the excluded entry.
///
/// Expected: taken for others, free for itself
#[tokio::test]
async fn checks_id_number_uniqueness() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Category)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let entry = factory::category::CategoryFactory::new(db)
        .id_number("C-1")
        .build()
        .await?;
    let repo = CategoryRepository::new(db);

    assert!(repo.id_number_taken("C-1", None).await?);
    assert!(!repo.id_number_taken("C-1", Some(entry.id)).await?);
    assert!(!repo.id_number_taken("C-2", None).await?);

    Ok(())
}

/// Tests deleting an entry leaves events that list the office untouched.
///
/// Expected: event still lists "Registrar" after the entry is gone
#[tokio::test]
async fn deleting_entry_keeps_event_participants() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let registrar = factory::category::CategoryFactory::new(db)
        .office("Registrar")
        .build()
        .await?;
    let (event, _, _) = factory::event::EventFactory::new(db)
        .participants(["Registrar"])
        .build()
        .await?;

    assert!(CategoryRepository::new(db).delete(registrar.id).await?);

    let stored = EventRepository::new(db).find_by_id(event.id).await?.unwrap();

    assert_eq!(stored.participants, vec!["Registrar"]);

    Ok(())
}
