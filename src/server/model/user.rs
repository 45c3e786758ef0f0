//! User domain models and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::user::{CreateUserDto, PaginatedUsersDto, UpdateUserDto, UserDto},
    server::{error::AppError, model::label::same_label},
};

/// Department tags every installation has, whether or not the roster mentions them.
pub const BASE_DEPARTMENTS: [&str; 3] = ["SGOD", "CID", "OSDS"];

const ADMINISTRATOR: &str = "Administrator";

/// Role of a user account.
///
/// Any type other than `Administrator` scopes the user to the department with the same
/// name. `Administrator` and the base departments may each be held by one user only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserType {
    Administrator,
    Department(String),
}

impl UserType {
    /// Parses a stored or submitted type. Returns `None` for a blank value.
    ///
    /// `Administrator` and the base departments are matched ignoring case and stored in
    /// their canonical spelling.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            None
        } else if same_label(value, ADMINISTRATOR) {
            Some(Self::Administrator)
        } else if let Some(base) = BASE_DEPARTMENTS.iter().find(|d| same_label(d, value)) {
            Some(Self::Department(base.to_string()))
        } else {
            Some(Self::Department(value.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Administrator => ADMINISTRATOR,
            Self::Department(department) => department,
        }
    }

    /// Whether at most one user may hold this type.
    pub fn is_unique(&self) -> bool {
        match self {
            Self::Administrator => true,
            Self::Department(department) => {
                BASE_DEPARTMENTS.iter().any(|d| same_label(d, department))
            }
        }
    }

    /// Department this type is scoped to, `None` for administrators.
    pub fn department(&self) -> Option<&str> {
        match self {
            Self::Administrator => None,
            Self::Department(department) => Some(department),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub employee_number: String,
    pub email: String,
    pub user_type: UserType,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            employee_number: self.employee_number,
            email: self.email,
            user_type: self.user_type.as_str().to_string(),
            created_at: self.created_at,
        }
    }

    /// Converts an entity model at the repository boundary, dropping secrets.
    ///
    /// A blank stored type falls back to a department named after it, which cannot
    /// happen through the API.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        let user_type = UserType::parse(&entity.user_type)
            .unwrap_or_else(|| UserType::Department(entity.user_type.clone()));

        Self {
            id: entity.id,
            employee_number: entity.employee_number,
            email: entity.email,
            user_type,
            created_at: entity.created_at,
        }
    }
}

/// A user together with the secrets needed to authenticate them.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
    pub otp_hash: Option<String>,
    pub otp_expires_at: Option<DateTime<Utc>>,
}

impl UserCredentials {
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            password_hash: entity.password_hash.clone(),
            otp_hash: entity.otp_hash.clone(),
            otp_expires_at: entity.otp_expires_at,
            user: User::from_entity(entity),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedUsers {
    pub users: Vec<User>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

impl PaginatedUsers {
    pub fn into_dto(self) -> PaginatedUsersDto {
        PaginatedUsersDto {
            users: self.users.into_iter().map(User::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// Parameters for creating a user. The password is plaintext until the service hashes it.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub employee_number: String,
    pub email: String,
    pub password: String,
    pub user_type: UserType,
}

impl CreateUserParams {
    /// Validates a create payload.
    ///
    /// # Returns
    /// - `Ok(CreateUserParams)` - Every field present, employee number is 7 digits
    /// - `Err(AppError::BadRequest)` - Missing field or malformed employee number
    pub fn from_dto(dto: CreateUserDto) -> Result<Self, AppError> {
        let user_type = UserType::parse(&dto.user_type);
        let (Some(user_type), false, false, false) = (
            user_type,
            dto.employee_number.trim().is_empty(),
            dto.email.trim().is_empty(),
            dto.password.is_empty(),
        ) else {
            return Err(AppError::BadRequest("All fields are required.".to_string()));
        };

        Ok(Self {
            employee_number: validate_employee_number(&dto.employee_number)?,
            email: dto.email.trim().to_string(),
            password: dto.password,
            user_type,
        })
    }
}

/// Parameters for updating a user. `password: None` keeps the current password.
#[derive(Debug, Clone)]
pub struct UpdateUserParams {
    pub employee_number: String,
    pub email: String,
    pub password: Option<String>,
    pub user_type: UserType,
}

impl UpdateUserParams {
    pub fn from_dto(dto: UpdateUserDto) -> Result<Self, AppError> {
        let user_type = UserType::parse(&dto.user_type);
        let (Some(user_type), false, false) = (
            user_type,
            dto.employee_number.trim().is_empty(),
            dto.email.trim().is_empty(),
        ) else {
            return Err(AppError::BadRequest(
                "Employee number, email, and type are required.".to_string(),
            ));
        };

        Ok(Self {
            employee_number: validate_employee_number(&dto.employee_number)?,
            email: dto.email.trim().to_string(),
            password: dto.password.filter(|p| !p.is_empty()),
            user_type,
        })
    }
}

fn validate_employee_number(value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.len() == 7 && value.chars().all(|c| c.is_ascii_digit()) {
        Ok(value.to_string())
    } else {
        Err(AppError::BadRequest(
            "Employee number must be exactly 7 digits.".to_string(),
        ))
    }
}
