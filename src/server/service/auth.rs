//! Authentication and password reset.
//!
//! Users log in with employee number and password, offices with their roster ID number.
//! A forgotten password is reset with a six-digit one-time password mailed to the
//! account's email. The code is stored as an argon2 hash with an expiry and cleared
//! once used.

use chrono::{Duration, Utc};
use rand::Rng;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{category::CategoryRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    model::{
        category::Category,
        user::{User, UserCredentials},
    },
    service::{
        mail::{Mail, Mailer},
        password::{hash_secret, verify_secret},
    },
};

/// Outcome of a successful password reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordReset {
    /// Whether the "password changed" notice reached the mail relay.
    pub notice_sent: bool,
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    mailer: &'a dyn Mailer,
    otp_ttl: Duration,
}

impl<'a> AuthService<'a> {
    /// Creates a new AuthService.
    ///
    /// # Arguments
    /// - `db` - Database connection
    /// - `mailer` - Mailer used for one-time passwords and notices
    /// - `otp_ttl` - Lifetime of a one-time password
    pub fn new(db: &'a DatabaseConnection, mailer: &'a dyn Mailer, otp_ttl: Duration) -> Self {
        Self { db, mailer, otp_ttl }
    }

    /// Verifies a user's employee number and password.
    ///
    /// # Returns
    /// - `Ok(User)` - Credentials match
    /// - `Err(AppError::BadRequest)` - A field is blank
    /// - `Err(AppError::AuthErr(InvalidCredentials))` - Unknown employee number or wrong password
    pub async fn login(&self, employee_number: &str, password: &str) -> Result<User, AppError> {
        if employee_number.trim().is_empty() || password.is_empty() {
            return Err(AppError::BadRequest(
                "Employee number and password are required.".to_string(),
            ));
        }

        let Some(credentials) = UserRepository::new(self.db)
            .find_credentials_by_employee_number(employee_number)
            .await?
        else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_secret(credentials.user.id, password, &credentials.password_hash)? {
            tracing::debug!(user_id = credentials.user.id, "Rejected login with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(credentials.user)
    }

    /// Looks up the office logging in with its roster ID number.
    ///
    /// # Returns
    /// - `Ok(Category)` - Roster entry with that ID number
    /// - `Err(AppError::BadRequest)` - ID number is blank
    /// - `Err(AppError::NotFound)` - No roster entry with that ID number
    pub async fn office_login(&self, id_number: &str) -> Result<Category, AppError> {
        if id_number.trim().is_empty() {
            return Err(AppError::BadRequest("ID number is required.".to_string()));
        }

        CategoryRepository::new(self.db)
            .find_by_id_number(id_number)
            .await?
            .ok_or_else(|| AppError::NotFound("Office not found".to_string()))
    }

    /// Issues a one-time password and mails it to the account's address.
    ///
    /// Any earlier code for the account is replaced.
    ///
    /// # Returns
    /// - `Ok(())` - Code stored and mailed
    /// - `Err(AppError::BadRequest)` - Email is blank
    /// - `Err(AppError::NotFound)` - No account with that email
    /// - `Err(AppError::MailErr)` - Code stored but could not be mailed
    pub async fn forgot_password(&self, email: &str) -> Result<(), AppError> {
        if email.trim().is_empty() {
            return Err(AppError::BadRequest("Email is required.".to_string()));
        }

        let repo = UserRepository::new(self.db);
        let credentials = repo
            .find_credentials_by_email(email)
            .await?
            .ok_or_else(|| AppError::NotFound("No account found with that email.".to_string()))?;

        let code = generate_otp();
        let expires_at = Utc::now() + self.otp_ttl;
        repo.set_otp(credentials.user.id, hash_secret(&code)?, expires_at)
            .await?;

        self.mailer
            .send(Mail::otp(
                &credentials.user.email,
                &code,
                self.otp_ttl.num_minutes(),
            ))
            .await
            .inspect_err(|e| {
                tracing::error!(user_id = credentials.user.id, "Failed to mail one-time password: {}", e)
            })?;

        tracing::info!(user_id = credentials.user.id, "Issued password reset code");

        Ok(())
    }

    /// Checks a one-time password without consuming it.
    ///
    /// # Returns
    /// - `Ok(User)` - Code matches and has not expired
    /// - `Err(AppError::BadRequest)` - A field is blank
    /// - `Err(AppError::AuthErr(InvalidOtp))` - Unknown email, wrong or expired code
    pub async fn verify_otp(&self, email: &str, otp_code: &str) -> Result<User, AppError> {
        if email.trim().is_empty() || otp_code.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Email and OTP code are required.".to_string(),
            ));
        }

        let credentials = UserRepository::new(self.db)
            .find_credentials_by_email(email)
            .await?
            .ok_or(AuthError::InvalidOtp)?;

        check_otp(&credentials, otp_code.trim())?;

        Ok(credentials.user)
    }

    /// Sets a new password after checking the one-time password, then clears the code.
    ///
    /// The notice mail is best effort: the password is already changed when it fails.
    ///
    /// # Returns
    /// - `Ok(PasswordReset)` - Password changed, with whether the notice was sent
    /// - `Err(AppError::BadRequest)` - A field is blank
    /// - `Err(AppError::AuthErr(InvalidOtp))` - Unknown email, wrong or expired code
    pub async fn reset_password(
        &self,
        email: &str,
        otp_code: &str,
        new_password: &str,
    ) -> Result<PasswordReset, AppError> {
        if new_password.is_empty() {
            return Err(AppError::BadRequest(
                "Email, OTP code, and new password are required.".to_string(),
            ));
        }

        let user = self.verify_otp(email, otp_code).await?;

        UserRepository::new(self.db)
            .reset_password(user.id, hash_secret(new_password)?)
            .await?;

        tracing::info!(user_id = user.id, "Password reset");

        let notice_sent = match self.mailer.send(Mail::password_changed(&user.email)).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(user_id = user.id, "Failed to mail password change notice: {}", e);
                false
            }
        };

        Ok(PasswordReset { notice_sent })
    }
}

/// Six random digits, never starting with zero.
fn generate_otp() -> String {
    rand::rng().random_range(100_000..1_000_000u32).to_string()
}

fn check_otp(credentials: &UserCredentials, otp_code: &str) -> Result<(), AppError> {
    let (Some(otp_hash), Some(expires_at)) = (&credentials.otp_hash, credentials.otp_expires_at)
    else {
        return Err(AuthError::InvalidOtp.into());
    };

    if expires_at <= Utc::now() {
        return Err(AuthError::InvalidOtp.into());
    }

    if !verify_secret(credentials.user.id, otp_code, otp_hash)? {
        return Err(AuthError::InvalidOtp.into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests the shape of generated one-time passwords.
    ///
    /// Expected: six ASCII digits
    #[test]
    fn test_generate_otp() {
        for _ in 0..100 {
            let code = generate_otp();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
