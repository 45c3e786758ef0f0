use super::*;

/// Tests an empty session is rejected.
///
/// Expected: Err(AuthError::UserNotInSession)
#[tokio::test]
async fn rejects_missing_session_actor() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInSession))
    ));

    Ok(())
}

/// Tests an office login resolves to its roster entry.
///
/// Expected: Ok(Actor::Office)
#[tokio::test]
async fn resolves_office_actor() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    let office = factory::category::CategoryFactory::new(db)
        .office("Registrar")
        .build()
        .await?;
    AuthSession::new(session)
        .set_actor(SessionActor::Office(office.id))
        .await?;

    let actor = AuthGuard::new(db, session).require(&[]).await?;

    match actor {
        Actor::Office(category) => assert_eq!(category.office, "Registrar"),
        other => panic!("expected office actor, got {:?}", other),
    }

    Ok(())
}

/// Tests a session pointing at a deleted user is rejected.
///
/// Expected: Err(AuthError::UserNotInDatabase)
#[tokio::test]
async fn rejects_deleted_user() -> Result<(), AppError> {
    let mut test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let (db, session) = test.db_and_session().await.unwrap();

    AuthSession::new(session)
        .set_actor(SessionActor::User(404))
        .await?;

    let result = AuthGuard::new(db, session).require(&[]).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotInDatabase(_)))
    ));

    Ok(())
}
