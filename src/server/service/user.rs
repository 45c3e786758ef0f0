//! User account service.
//!
//! Enforces the account rules the database does not: one holder per fixed type
//! (`Administrator`, `SGOD`, `CID`, `OSDS`), unique employee numbers with readable
//! errors, argon2 password hashing, and administrators not deleting themselves.

use sea_orm::DatabaseConnection;

use crate::server::{
    config::BootstrapAdmin,
    data::user::UserRepository,
    error::AppError,
    model::user::{CreateUserParams, PaginatedUsers, UpdateUserParams, User, UserType},
    service::password::hash_secret,
};

/// Largest page size a client may request.
const MAX_PER_PAGE: u64 = 100;

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets one page of users ordered by employee number.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Page size, clamped to 1..=100
    pub async fn get_paginated(&self, page: u64, per_page: u64) -> Result<PaginatedUsers, AppError> {
        let per_page = per_page.clamp(1, MAX_PER_PAGE);

        Ok(UserRepository::new(self.db)
            .get_paginated(page, per_page)
            .await?)
    }

    /// Creates a user account.
    ///
    /// # Returns
    /// - `Ok(User)` - Created user
    /// - `Err(AppError::Conflict)` - Fixed type already held or employee number in use
    pub async fn create(&self, params: CreateUserParams) -> Result<User, AppError> {
        let repo = UserRepository::new(self.db);

        if params.user_type.is_unique() && repo.user_type_taken(&params.user_type, None).await? {
            return Err(type_conflict(&params.user_type));
        }

        if repo.employee_number_taken(&params.employee_number, None).await? {
            return Err(AppError::Conflict(
                "Employee number already exists.".to_string(),
            ));
        }

        let password_hash = hash_secret(&params.password)?;
        let user = repo.create(&params, password_hash).await?;

        tracing::info!(user_id = user.id, user_type = %user.user_type.as_str(), "Created user");

        Ok(user)
    }

    /// Updates a user account. A missing password keeps the current one.
    ///
    /// # Returns
    /// - `Ok(User)` - Updated user
    /// - `Err(AppError::NotFound)` - No user with that ID
    /// - `Err(AppError::Conflict)` - Employee number or fixed type held by another user
    pub async fn update(&self, id: i32, params: UpdateUserParams) -> Result<User, AppError> {
        let repo = UserRepository::new(self.db);

        if repo.find_by_id(id).await?.is_none() {
            return Err(user_not_found());
        }

        if repo
            .employee_number_taken(&params.employee_number, Some(id))
            .await?
        {
            return Err(AppError::Conflict(
                "Employee number already in use by another user.".to_string(),
            ));
        }

        if params.user_type.is_unique()
            && repo.user_type_taken(&params.user_type, Some(id)).await?
        {
            return Err(type_conflict(&params.user_type));
        }

        let password_hash = params
            .password
            .as_deref()
            .map(hash_secret)
            .transpose()?;

        repo.update(id, &params, password_hash)
            .await?
            .ok_or_else(user_not_found)
    }

    /// Deletes a user account.
    ///
    /// # Arguments
    /// - `actor_id` - ID of the administrator performing the deletion
    /// - `id` - ID of the user to delete
    ///
    /// # Returns
    /// - `Ok(())` - User deleted
    /// - `Err(AppError::BadRequest)` - Administrator tried to delete their own account
    /// - `Err(AppError::NotFound)` - No user with that ID
    pub async fn delete(&self, actor_id: i32, id: i32) -> Result<(), AppError> {
        if actor_id == id {
            return Err(AppError::BadRequest(
                "You cannot delete your own account.".to_string(),
            ));
        }

        if !UserRepository::new(self.db).delete(id).await? {
            return Err(user_not_found());
        }

        tracing::info!(user_id = id, deleted_by = actor_id, "Deleted user");

        Ok(())
    }

    /// Creates the configured administrator when no administrator exists yet.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Administrator created
    /// - `Ok(None)` - An administrator already exists
    pub async fn ensure_bootstrap_admin(
        &self,
        admin: &BootstrapAdmin,
    ) -> Result<Option<User>, AppError> {
        if UserRepository::new(self.db).admin_exists().await? {
            return Ok(None);
        }

        let params = CreateUserParams {
            employee_number: admin.employee_number.clone(),
            email: admin.email.clone(),
            password: admin.password.clone(),
            user_type: UserType::Administrator,
        };

        self.create(params).await.map(Some)
    }
}

fn user_not_found() -> AppError {
    AppError::NotFound("User not found.".to_string())
}

fn type_conflict(user_type: &UserType) -> AppError {
    AppError::Conflict(format!(
        "A user with type {} already exists.",
        user_type.as_str()
    ))
}
