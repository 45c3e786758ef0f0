use super::*;

/// Tests creating a user stores the hash and not the plaintext password.
///
/// Expected: Ok with the user findable by employee number
#[tokio::test]
async fn creates_user_and_finds_credentials() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let params = CreateUserParams {
        employee_number: "1234567".to_string(),
        email: "cid@example.test".to_string(),
        password: "plaintext".to_string(),
        user_type: UserType::Department("CID".to_string()),
    };

    let user = repo.create(&params, "$argon2id$stub".to_string()).await?;
    let credentials = repo
        .find_credentials_by_employee_number(" 1234567 ")
        .await?
        .unwrap();

    assert_eq!(credentials.user, user);
    assert_eq!(credentials.password_hash, "$argon2id$stub");
    assert_eq!(user.user_type.as_str(), "CID");

    Ok(())
}

/// Tests a second user with the same employee number is rejected by the schema.
///
/// Expected: Err(DbErr)
#[tokio::test]
async fn fails_on_duplicate_employee_number() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .employee_number("7654321")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let result = repo
        .create(
            &CreateUserParams {
                employee_number: "7654321".to_string(),
                email: "other@example.test".to_string(),
                password: "x".to_string(),
                user_type: UserType::Department("Registrar".to_string()),
            },
            "hash".to_string(),
        )
        .await;

    assert!(result.is_err());

    Ok(())
}

/// Tests deleting a user that exists and one that does not.
///
/// Expected: Ok(true) then Ok(false)
#[tokio::test]
async fn deletes_user_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let repo = UserRepository::new(db);

    assert!(repo.delete(user.id).await?);
    assert!(!repo.delete(user.id).await?);
    assert!(repo.find_by_id(user.id).await?.is_none());

    Ok(())
}
