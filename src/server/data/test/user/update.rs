use super::*;

/// Tests updating without a new password keeps the stored hash.
///
/// Expected: Ok(Some) with the original hash intact
#[tokio::test]
async fn keeps_password_hash_when_none_given() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .password_hash("original")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let updated = repo
        .update(
            user.id,
            &UpdateUserParams {
                employee_number: user.employee_number.clone(),
                email: "new@example.test".to_string(),
                password: None,
                user_type: UserType::Department("OSDS".to_string()),
            },
            None,
        )
        .await?
        .unwrap();

    let credentials = repo
        .find_credentials_by_employee_number(&user.employee_number)
        .await?
        .unwrap();

    assert_eq!(updated.email, "new@example.test");
    assert_eq!(updated.user_type.as_str(), "OSDS");
    assert_eq!(credentials.password_hash, "original");

    Ok(())
}

/// Tests updating a user that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let result = repo
        .update(
            999,
            &UpdateUserParams {
                employee_number: "1234567".to_string(),
                email: "x@example.test".to_string(),
                password: None,
                user_type: UserType::Administrator,
            },
            Some("hash".to_string()),
        )
        .await?;

    assert!(result.is_none());

    Ok(())
}
