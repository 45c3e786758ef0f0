//! User data repository for database operations.
//!
//! Handles user creation, updates, queries and the one-time-password columns used by the
//! password reset flow. Password and OTP values arrive already hashed.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::user::{
    CreateUserParams, PaginatedUsers, UpdateUserParams, User, UserCredentials, UserType,
};

/// Repository providing database operations for user management.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new user.
    ///
    /// # Arguments
    /// - `params` - Validated user fields; the plaintext password is ignored
    /// - `password_hash` - PHC string of the hashed password
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including unique violations on employee number
    pub async fn create(
        &self,
        params: &CreateUserParams,
        password_hash: String,
    ) -> Result<User, DbErr> {
        let entity = entity::user::ActiveModel {
            id: ActiveValue::NotSet,
            employee_number: ActiveValue::Set(params.employee_number.clone()),
            email: ActiveValue::Set(params.email.clone()),
            password_hash: ActiveValue::Set(password_hash),
            user_type: ActiveValue::Set(params.user_type.as_str().to_string()),
            otp_hash: ActiveValue::Set(None),
            otp_expires_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    /// Updates a user's fields, replacing the password hash only when one is given.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Updated user
    /// - `Ok(None)` - No user with that ID
    /// - `Err(DbErr)` - Database error
    pub async fn update(
        &self,
        id: i32,
        params: &UpdateUserParams,
        password_hash: Option<String>,
    ) -> Result<Option<User>, DbErr> {
        let Some(existing) = entity::prelude::User::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = existing.into();
        active.employee_number = ActiveValue::Set(params.employee_number.clone());
        active.email = ActiveValue::Set(params.email.clone());
        active.user_type = ActiveValue::Set(params.user_type.as_str().to_string());
        if let Some(password_hash) = password_hash {
            active.password_hash = ActiveValue::Set(password_hash);
        }

        let entity = active.update(self.db).await?;

        Ok(Some(User::from_entity(entity)))
    }

    /// Deletes a user.
    ///
    /// # Returns
    /// - `Ok(true)` - User deleted
    /// - `Ok(false)` - No user with that ID
    pub async fn delete(&self, id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::User::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a user and their secrets by employee number, for login.
    pub async fn find_credentials_by_employee_number(
        &self,
        employee_number: &str,
    ) -> Result<Option<UserCredentials>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::EmployeeNumber.eq(employee_number.trim()))
            .one(self.db)
            .await?;

        Ok(entity.map(UserCredentials::from_entity))
    }

    /// Finds a user and their secrets by email, for the password reset flow.
    ///
    /// Emails are not unique; the oldest account with the address wins.
    pub async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email.trim()))
            .order_by_asc(entity::user::Column::Id)
            .one(self.db)
            .await?;

        Ok(entity.map(UserCredentials::from_entity))
    }

    /// Checks whether another user already holds the employee number.
    ///
    /// # Arguments
    /// - `employee_number` - Number to look up
    /// - `exclude_id` - User to ignore, used when updating that user
    pub async fn employee_number_taken(
        &self,
        employee_number: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut query = entity::prelude::User::find()
            .filter(entity::user::Column::EmployeeNumber.eq(employee_number));
        if let Some(exclude_id) = exclude_id {
            query = query.filter(entity::user::Column::Id.ne(exclude_id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Checks whether another user already holds the type.
    pub async fn user_type_taken(
        &self,
        user_type: &UserType,
        exclude_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut query = entity::prelude::User::find()
            .filter(entity::user::Column::UserType.eq(user_type.as_str()));
        if let Some(exclude_id) = exclude_id {
            query = query.filter(entity::user::Column::Id.ne(exclude_id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Checks if any administrator exists.
    pub async fn admin_exists(&self) -> Result<bool, DbErr> {
        self.user_type_taken(&UserType::Administrator, None).await
    }

    /// Gets users ordered by employee number, one page at a time.
    ///
    /// # Arguments
    /// - `page` - Zero-indexed page number
    /// - `per_page` - Number of users per page
    ///
    /// # Returns
    /// - `Ok(PaginatedUsers)` - Users of the page and the total number of users
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_paginated(&self, page: u64, per_page: u64) -> Result<PaginatedUsers, DbErr> {
        let paginator = entity::prelude::User::find()
            .order_by_asc(entity::user::Column::EmployeeNumber)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok(PaginatedUsers {
            users: entities.into_iter().map(User::from_entity).collect(),
            total,
            page,
            per_page,
        })
    }

    /// Gets every user ordered by ID, for reports.
    pub async fn get_all(&self) -> Result<Vec<User>, DbErr> {
        let entities = entity::prelude::User::find()
            .order_by_asc(entity::user::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(User::from_entity).collect())
    }

    /// Stores a hashed one-time password and its expiry, replacing any previous one.
    pub async fn set_otp(
        &self,
        id: i32,
        otp_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .col_expr(entity::user::Column::OtpHash, Expr::value(otp_hash))
            .col_expr(entity::user::Column::OtpExpiresAt, Expr::value(expires_at))
            .filter(entity::user::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Replaces the password hash and clears any pending one-time password.
    pub async fn reset_password(&self, id: i32, password_hash: String) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .col_expr(entity::user::Column::PasswordHash, Expr::value(password_hash))
            .col_expr(
                entity::user::Column::OtpHash,
                Expr::value(Option::<String>::None),
            )
            .col_expr(
                entity::user::Column::OtpExpiresAt,
                Expr::value(Option::<DateTime<Utc>>::None),
            )
            .filter(entity::user::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
