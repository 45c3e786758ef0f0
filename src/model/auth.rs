use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct LoginDto {
    #[serde(default)]
    pub employee_number: String,
    #[serde(default)]
    pub password: String,
}

/// Login as an office using the ID number of its roster entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct OfficeLoginDto {
    #[serde(default)]
    pub id_number: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ForgotPasswordDto {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct VerifyOtpDto {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub otp_code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ResetPasswordDto {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub otp_code: String,
    #[serde(default)]
    pub new_password: String,
}

/// The authenticated caller, either a user account or an office login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActorDto {
    User {
        id: i32,
        employee_number: String,
        email: String,
        user_type: String,
    },
    Office {
        id: i32,
        id_number: String,
        office: String,
        department: String,
    },
}
