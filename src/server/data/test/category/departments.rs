use super::*;

/// Tests distinct departments are returned once each in alphabetical order.
///
/// Expected: ["CID", "Finance", "SGOD"]
#[tokio::test]
async fn returns_distinct_departments() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Category)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for department in ["SGOD", "Finance", "SGOD", "CID"] {
        factory::category::CategoryFactory::new(db)
            .department(department)
            .build()
            .await?;
    }

    let departments = CategoryRepository::new(db).get_distinct_departments().await?;

    assert_eq!(departments, vec!["CID", "Finance", "SGOD"]);

    Ok(())
}
