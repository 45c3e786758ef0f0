use super::*;

/// Tests the uniqueness lookups ignore the user being updated.
///
/// Expected: taken for other users, free for the excluded user
#[tokio::test]
async fn ignores_excluded_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let admin = factory::user::UserFactory::new(db)
        .employee_number("1000001")
        .user_type("Administrator")
        .build()
        .await?;

    let repo = UserRepository::new(db);

    assert!(repo.employee_number_taken("1000001", None).await?);
    assert!(!repo.employee_number_taken("1000001", Some(admin.id)).await?);
    assert!(repo.user_type_taken(&UserType::Administrator, None).await?);
    assert!(
        !repo
            .user_type_taken(&UserType::Administrator, Some(admin.id))
            .await?
    );
    assert!(repo.admin_exists().await?);

    Ok(())
}

/// Tests admin detection on a table of department users only.
///
/// Expected: Ok(false)
#[tokio::test]
async fn reports_no_admin_with_only_department_users() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::create_user_of_type(db, "SGOD").await?;
    factory::user::create_user_of_type(db, "CID").await?;

    assert!(!UserRepository::new(db).admin_exists().await?);

    Ok(())
}
