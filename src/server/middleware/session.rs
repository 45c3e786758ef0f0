//! Type-safe session management wrappers.
//!
//! Wraps the tower-sessions `Session` so session keys and the stored value types live in
//! one place.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::AppError;

const SESSION_AUTH_ACTOR: &str = "auth:actor";

/// Reference to the logged-in actor as stored in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum SessionActor {
    /// A user account, by user ID.
    User(i32),
    /// An office, by roster entry ID.
    Office(i32),
}

/// Authentication session management.
///
/// Stores and retrieves which actor is logged in and handles logout.
pub struct AuthSession<'a> {
    /// The underlying tower-sessions Session instance.
    session: &'a Session,
}

impl<'a> AuthSession<'a> {
    /// Creates a new AuthSession wrapper.
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the actor in the session after a successful login.
    ///
    /// The session ID is cycled first so a pre-login session ID cannot be reused.
    ///
    /// # Returns
    /// - `Ok(())` - Actor stored
    /// - `Err(AppError::SessionErr(_))` - Failed to write the session
    pub async fn set_actor(&self, actor: SessionActor) -> Result<(), AppError> {
        self.session.cycle_id().await?;
        self.session.insert(SESSION_AUTH_ACTOR, actor).await?;
        Ok(())
    }

    /// Retrieves the logged-in actor.
    ///
    /// # Returns
    /// - `Ok(Some(actor))` - Someone is logged in
    /// - `Ok(None)` - No actor in session
    /// - `Err(AppError::SessionErr(_))` - Failed to access session
    pub async fn get_actor(&self) -> Result<Option<SessionActor>, AppError> {
        Ok(self.session.get::<SessionActor>(SESSION_AUTH_ACTOR).await?)
    }

    /// Clears all data from the session.
    pub async fn clear(&self) {
        self.session.clear().await;
    }
}
