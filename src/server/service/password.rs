//! Argon2 hashing for passwords and one-time codes.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::server::error::internal::InternalError;

/// Hashes a secret with a fresh random salt.
///
/// # Returns
/// - `Ok(String)` - PHC string containing algorithm, parameters, salt and hash
/// - `Err(InternalError::Hashing)` - Argon2 rejected the input
pub fn hash_secret(secret: &str) -> Result<String, InternalError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| InternalError::Hashing(e.to_string()))
}

/// Checks a secret against a stored PHC string.
///
/// # Arguments
/// - `user_id` - Owner of the hash, reported when the hash is malformed
/// - `secret` - Plaintext to check
/// - `hash` - Stored PHC string
///
/// # Returns
/// - `Ok(true)` - Secret matches
/// - `Ok(false)` - Secret does not match
/// - `Err(InternalError::MalformedHash)` - Stored value is not a PHC string
pub fn verify_secret(user_id: i32, secret: &str, hash: &str) -> Result<bool, InternalError> {
    let parsed = PasswordHash::new(hash).map_err(|e| InternalError::MalformedHash {
        user_id,
        reason: e.to_string(),
    })?;

    Ok(Argon2::default()
        .verify_password(secret.as_bytes(), &parsed)
        .is_ok())
}
