use super::*;
use crate::server::{
    error::{auth::AuthError, AppError},
    model::category::CategoryParams,
    service::category::CategoryService,
};
use test_utils::{builder::TestBuilder, factory};

fn params(id_number: &str, office: &str, department: &str) -> CategoryParams {
    CategoryParams {
        id_number: id_number.to_string(),
        office: office.to_string(),
        email: format!("{}@example.test", office.to_lowercase()),
        department: department.to_string(),
    }
}

/// Tests department scoping of roster creation.
///
/// Expected: own department accepted regardless of case, other department denied
#[tokio::test]
async fn department_user_creates_only_in_own_department() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let service = CategoryService::new(db);
    let sgod = user_actor(db, "SGOD").await;

    let created = service
        .create(&sgod, params("R-1", "Registrar", " sgod "))
        .await?;
    assert_eq!(created.office, "Registrar");

    let result = service.create(&sgod, params("N-1", "Nurse", "OSDS")).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_)))
    ));

    Ok(())
}

/// Tests that office logins cannot manage the roster.
///
/// Expected: Err(AuthError::AccessDenied) even for their own department
#[tokio::test]
async fn office_cannot_manage_roster() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let service = CategoryService::new(db);
    let office = office_actor(db, "Registrar", "SGOD").await;

    let result = service.create(&office, params("N-1", "Nurse", "SGOD")).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied(_)))
    ));

    Ok(())
}

/// Tests duplicate ID numbers on create and update.
///
/// Expected: Err(AppError::Conflict), keeping one's own ID number is fine
#[tokio::test]
async fn rejects_duplicate_id_number() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let service = CategoryService::new(db);
    let admin = user_actor(db, "Administrator").await;

    let registrar = service
        .create(&admin, params("R-1", "Registrar", "SGOD"))
        .await?;
    let nurse = service.create(&admin, params("N-1", "Nurse", "OSDS")).await?;

    assert!(matches!(
        service.create(&admin, params("R-1", "Cashier", "CID")).await,
        Err(AppError::Conflict(_))
    ));
    assert!(matches!(
        service
            .update(&admin, nurse.id, params("R-1", "Nurse", "OSDS"))
            .await,
        Err(AppError::Conflict(_))
    ));

    let renamed = service
        .update(&admin, registrar.id, params("R-1", "Registrar Office", "SGOD"))
        .await?;
    assert_eq!(renamed.office, "Registrar Office");

    Ok(())
}

/// Tests that a department user cannot move an entry out of, or into, their department.
///
/// Expected: Err(AuthError::AccessDenied) in both directions
#[tokio::test]
async fn update_checks_old_and_new_department() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let service = CategoryService::new(db);
    let sgod = user_actor(db, "SGOD").await;

    let own = factory::category::CategoryFactory::new(db)
        .department("SGOD")
        .build()
        .await?;
    let foreign = factory::category::CategoryFactory::new(db)
        .department("CID")
        .build()
        .await?;

    assert!(matches!(
        service
            .update(&sgod, own.id, params(&own.id_number, "Moved", "CID"))
            .await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_)))
    ));
    assert!(matches!(
        service
            .update(&sgod, foreign.id, params(&foreign.id_number, "Taken", "SGOD"))
            .await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_)))
    ));
    assert!(matches!(
        service.delete(&sgod, foreign.id).await,
        Err(AppError::AuthErr(AuthError::AccessDenied(_)))
    ));

    service.delete(&sgod, own.id).await?;
    assert!(matches!(
        service.delete(&sgod, own.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests the department list.
///
/// Expected: base departments first, then roster departments without duplicates
#[tokio::test]
async fn lists_base_departments_first() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    for department in ["Records", "sgod", "Accounting", "Records"] {
        factory::category::CategoryFactory::new(db)
            .department(department)
            .build()
            .await?;
    }

    let departments = CategoryService::new(db).get_departments().await?;

    assert_eq!(
        departments,
        vec!["SGOD", "CID", "OSDS", "Accounting", "Records"]
    );

    Ok(())
}
