//! Roster (category) service.
//!
//! Administrators manage every roster entry. Department users manage entries of their
//! own department only, both before and after an edit.

use std::collections::HashSet;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::category::CategoryRepository,
    error::{auth::AuthError, AppError},
    model::{
        actor::Actor,
        category::{Category, CategoryParams},
        label::normalize_label,
        user::BASE_DEPARTMENTS,
    },
};

pub struct CategoryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CategoryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets every roster entry ordered by department, then office.
    pub async fn get_all(&self) -> Result<Vec<Category>, AppError> {
        Ok(CategoryRepository::new(self.db).get_all().await?)
    }

    /// Lists the known departments.
    ///
    /// # Returns
    /// - `Ok(Vec<String>)` - `SGOD`, `CID`, `OSDS`, then every other department used by
    ///   the roster, without normalized duplicates
    pub async fn get_departments(&self) -> Result<Vec<String>, AppError> {
        let roster = CategoryRepository::new(self.db)
            .get_distinct_departments()
            .await?;

        let mut seen = HashSet::new();
        Ok(BASE_DEPARTMENTS
            .iter()
            .map(|d| d.to_string())
            .chain(roster)
            .filter(|d| seen.insert(normalize_label(d)))
            .collect())
    }

    /// Adds a roster entry.
    ///
    /// # Returns
    /// - `Ok(Category)` - Created entry
    /// - `Err(AppError::AuthErr(AccessDenied))` - Department outside the actor's scope
    /// - `Err(AppError::Conflict)` - ID number already in use
    pub async fn create(&self, actor: &Actor, params: CategoryParams) -> Result<Category, AppError> {
        ensure_manages(actor, &params.department)?;

        let repo = CategoryRepository::new(self.db);
        if repo.id_number_taken(&params.id_number, None).await? {
            return Err(id_number_conflict());
        }

        let category = repo.create(params).await?;
        tracing::info!(category_id = category.id, office = %category.office, "Created roster entry");

        Ok(category)
    }

    /// Replaces a roster entry. The actor must manage both the stored and the new department.
    ///
    /// Events that list the old office label keep it.
    pub async fn update(
        &self,
        actor: &Actor,
        id: i32,
        params: CategoryParams,
    ) -> Result<Category, AppError> {
        let repo = CategoryRepository::new(self.db);

        let existing = repo.find_by_id(id).await?.ok_or_else(category_not_found)?;
        ensure_manages(actor, &existing.department)?;
        ensure_manages(actor, &params.department)?;

        if repo.id_number_taken(&params.id_number, Some(id)).await? {
            return Err(id_number_conflict());
        }

        repo.update(id, params).await?.ok_or_else(category_not_found)
    }

    /// Removes a roster entry. Existing events are left untouched.
    pub async fn delete(&self, actor: &Actor, id: i32) -> Result<(), AppError> {
        let repo = CategoryRepository::new(self.db);

        let existing = repo.find_by_id(id).await?.ok_or_else(category_not_found)?;
        ensure_manages(actor, &existing.department)?;

        repo.delete(id).await?;
        tracing::info!(category_id = id, office = %existing.office, "Deleted roster entry");

        Ok(())
    }
}

fn ensure_manages(actor: &Actor, department: &str) -> Result<(), AuthError> {
    if actor.is_office() {
        return Err(AuthError::AccessDenied(
            "Office logins cannot manage categories.".to_string(),
        ));
    }

    if actor.covers_department(department) {
        Ok(())
    } else {
        Err(AuthError::AccessDenied(
            "You can only manage categories in your own department.".to_string(),
        ))
    }
}

fn category_not_found() -> AppError {
    AppError::NotFound("Category not found".to_string())
}

fn id_number_conflict() -> AppError {
    AppError::Conflict("ID number already exists.".to_string())
}
