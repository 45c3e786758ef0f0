use super::*;

/// Tests storing an OTP and clearing it with a password reset.
///
/// Expected: OTP visible after `set_otp`, gone after `reset_password`
#[tokio::test]
async fn stores_and_clears_otp() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .email("reset@example.test")
        .build()
        .await?;
    let repo = UserRepository::new(db);
    let expires_at = Utc::now() + Duration::minutes(10);

    repo.set_otp(user.id, "otp-hash".to_string(), expires_at)
        .await?;
    let pending = repo
        .find_credentials_by_email("reset@example.test")
        .await?
        .unwrap();

    assert_eq!(pending.otp_hash.as_deref(), Some("otp-hash"));
    assert!(pending.otp_expires_at.is_some());

    repo.reset_password(user.id, "new-hash".to_string()).await?;
    let after = repo
        .find_credentials_by_email("reset@example.test")
        .await?
        .unwrap();

    assert!(after.otp_hash.is_none());
    assert!(after.otp_expires_at.is_none());
    assert_eq!(after.password_hash, "new-hash");

    Ok(())
}
