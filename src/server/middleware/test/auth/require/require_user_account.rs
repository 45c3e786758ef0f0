use super::*;

/// Tests office logins are refused where a user account is required.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn denies_access_to_office() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let office = factory::create_category(db).await?;
    AuthSession::new(session)
        .set_actor(SessionActor::Office(office.id))
        .await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::UserAccount])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_)))
    ));

    Ok(())
}

/// Tests a department user satisfies the user-account permission.
///
/// Expected: Ok(Actor::User) scoped to CID
#[tokio::test]
async fn grants_access_to_department_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::user::create_user_of_type(db, "CID").await?;
    AuthSession::new(session)
        .set_actor(SessionActor::User(user.id))
        .await?;

    let actor = AuthGuard::new(db, session)
        .require(&[Permission::UserAccount])
        .await?;

    assert_eq!(actor.department(), Some("CID"));

    Ok(())
}
