use chrono::FixedOffset;

use crate::server::{
    error::{config::ConfigError, AppError},
    util::parse::parse_utc_offset,
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8081";
const DEFAULT_SCHEDULE_UTC_OFFSET: &str = "+08:00";
const DEFAULT_OTP_TTL_MINUTES: i64 = 10;
const DEFAULT_REMINDER_LEAD_MINUTES: i64 = 60;

/// SMTP relay settings. Mail is only sent when all of them are present.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    pub from: String,
}

/// Credentials of the administrator created on first start.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub employee_number: String,
    pub email: String,
    pub password: String,
}

pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub cors_allowed_origins: Option<String>,
    pub schedule_offset: FixedOffset,
    pub otp_ttl_minutes: i64,
    pub reminder_lead_minutes: i64,
    pub smtp: Option<SmtpConfig>,
    pub bootstrap_admin: Option<BootstrapAdmin>,
    pub frontend_dir: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let schedule_offset_raw = optional_var("SCHEDULE_UTC_OFFSET")
            .unwrap_or_else(|| DEFAULT_SCHEDULE_UTC_OFFSET.to_string());
        let schedule_offset =
            parse_utc_offset(&schedule_offset_raw).ok_or_else(|| ConfigError::InvalidEnvVar {
                name: "SCHEDULE_UTC_OFFSET".to_string(),
                value: schedule_offset_raw.clone(),
                reason: "expected an offset like +08:00".to_string(),
            })?;

        let smtp = match (
            optional_var("SMTP_HOST"),
            optional_var("SMTP_USERNAME"),
            optional_var("SMTP_PASSWORD"),
        ) {
            (Some(host), Some(username), Some(password)) => Some(SmtpConfig {
                from: optional_var("MAIL_FROM").unwrap_or_else(|| username.clone()),
                host,
                username,
                password,
            }),
            _ => None,
        };

        let bootstrap_admin = match (
            optional_var("ADMIN_EMPLOYEE_NUMBER"),
            optional_var("ADMIN_EMAIL"),
            optional_var("ADMIN_PASSWORD"),
        ) {
            (Some(employee_number), Some(email), Some(password)) => Some(BootstrapAdmin {
                employee_number,
                email,
                password,
            }),
            _ => None,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            bind_addr: optional_var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            cors_allowed_origins: optional_var("CORS_ALLOWED_ORIGINS"),
            schedule_offset,
            otp_ttl_minutes: minutes_var("OTP_TTL_MINUTES", DEFAULT_OTP_TTL_MINUTES)?,
            reminder_lead_minutes: minutes_var(
                "REMINDER_LEAD_MINUTES",
                DEFAULT_REMINDER_LEAD_MINUTES,
            )?,
            smtp,
            bootstrap_admin,
            frontend_dir: optional_var("FRONTEND_DIR"),
        })
    }
}

/// Reads a variable, treating unset and blank values alike.
fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn minutes_var(name: &str, default: i64) -> Result<i64, ConfigError> {
    let Some(raw) = optional_var(name) else {
        return Ok(default);
    };

    match raw.parse::<i64>() {
        Ok(minutes) if minutes > 0 => Ok(minutes),
        _ => Err(ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value: raw,
            reason: "expected a positive number of minutes".to_string(),
        }),
    }
}
