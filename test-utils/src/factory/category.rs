//! Category factory for creating roster entries.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating roster entries with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let nurse = CategoryFactory::new(&db)
///     .office("Nurse")
///     .department("OSDS")
///     .build()
///     .await?;
/// ```
pub struct CategoryFactory<'a> {
    db: &'a DatabaseConnection,
    id_number: String,
    office: String,
    email: String,
    department: String,
}

impl<'a> CategoryFactory<'a> {
    /// Creates a new CategoryFactory with default values.
    ///
    /// Defaults:
    /// - id_number: `"CAT-{id}"`
    /// - office: `"Office {id}"`
    /// - email: `"office{id}@example.test"`
    /// - department: `"SGOD"`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            id_number: format!("CAT-{}", id),
            office: format!("Office {}", id),
            email: format!("office{}@example.test", id),
            department: "SGOD".to_string(),
        }
    }

    pub fn id_number(mut self, id_number: impl Into<String>) -> Self {
        self.id_number = id_number.into();
        self
    }

    pub fn office(mut self, office: impl Into<String>) -> Self {
        self.office = office.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Builds and inserts the category entity into the database.
    pub async fn build(self) -> Result<entity::category::Model, DbErr> {
        entity::category::ActiveModel {
            id: ActiveValue::NotSet,
            id_number: ActiveValue::Set(self.id_number),
            office: ActiveValue::Set(self.office),
            email: ActiveValue::Set(self.email),
            department: ActiveValue::Set(self.department),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a roster entry with default values.
pub async fn create_category(db: &DatabaseConnection) -> Result<entity::category::Model, DbErr> {
    CategoryFactory::new(db).build().await
}
