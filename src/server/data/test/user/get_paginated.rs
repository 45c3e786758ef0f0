use super::*;

/// Tests pagination returns the requested slice and the overall total.
///
/// Expected: 2 users on page 0, 1 on page 1, total 3
#[tokio::test]
async fn paginates_users() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    for number in ["1000003", "1000001", "1000002"] {
        factory::user::UserFactory::new(db)
            .employee_number(number)
            .build()
            .await?;
    }

    let repo = UserRepository::new(db);
    let first = repo.get_paginated(0, 2).await?;
    let second = repo.get_paginated(1, 2).await?;

    assert_eq!(first.total, 3);
    assert_eq!(first.users.len(), 2);
    assert_eq!(first.users[0].employee_number, "1000001");
    assert_eq!(second.users.len(), 1);
    assert_eq!(second.users[0].employee_number, "1000003");

    Ok(())
}
