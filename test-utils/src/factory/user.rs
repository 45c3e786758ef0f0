//! User factory for creating test user accounts.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test users with customizable fields.
///
/// The stored password hash defaults to a placeholder that no password verifies against.
/// Tests exercising login pass a real hash through `password_hash`.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::user::UserFactory;
///
/// let admin = UserFactory::new(&db)
///     .employee_number("1000001")
///     .user_type("Administrator")
///     .build()
///     .await?;
/// ```
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    employee_number: String,
    email: String,
    password_hash: String,
    user_type: String,
}

impl<'a> UserFactory<'a> {
    /// Creates a new UserFactory with default values.
    ///
    /// Defaults:
    /// - employee_number: seven digits derived from the counter
    /// - email: `"user{id}@example.test"`
    /// - password_hash: `"unusable"`
    /// - user_type: `"SGOD"`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            employee_number: format!("{:07}", 1_000_000 + id % 9_000_000),
            email: format!("user{}@example.test", id),
            password_hash: "unusable".to_string(),
            user_type: "SGOD".to_string(),
        }
    }

    pub fn employee_number(mut self, employee_number: impl Into<String>) -> Self {
        self.employee_number = employee_number.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = password_hash.into();
        self
    }

    pub fn user_type(mut self, user_type: impl Into<String>) -> Self {
        self.user_type = user_type.into();
        self
    }

    /// Builds and inserts the user entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Created user entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            id: ActiveValue::NotSet,
            employee_number: ActiveValue::Set(self.employee_number),
            email: ActiveValue::Set(self.email),
            password_hash: ActiveValue::Set(self.password_hash),
            user_type: ActiveValue::Set(self.user_type),
            otp_hash: ActiveValue::Set(None),
            otp_expires_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a user with default values.
///
/// Shorthand for `UserFactory::new(db).build().await`.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}

/// Creates a user of the given type, e.g. `"Administrator"` or `"CID"`.
pub async fn create_user_of_type(
    db: &DatabaseConnection,
    user_type: impl Into<String>,
) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).user_type(user_type).build().await
}
