use super::*;

/// Tests the administrator passes the admin permission check.
///
/// Expected: Ok(Actor::User) for the administrator
#[tokio::test]
async fn grants_access_to_admin_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let admin = factory::user::create_user_of_type(db, "Administrator").await?;
    AuthSession::new(session)
        .set_actor(SessionActor::User(admin.id))
        .await?;

    let actor = AuthGuard::new(db, session)
        .require(&[Permission::Admin])
        .await?;

    assert!(actor.is_admin());

    Ok(())
}

/// Tests a department user is denied the admin permission.
///
/// Expected: Err(AuthError::AccessDenied)
#[tokio::test]
async fn denies_access_to_department_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let user = factory::user::create_user_of_type(db, "SGOD").await?;
    AuthSession::new(session)
        .set_actor(SessionActor::User(user.id))
        .await?;

    let result = AuthGuard::new(db, session)
        .require(&[Permission::Admin])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_)))
    ));

    Ok(())
}
