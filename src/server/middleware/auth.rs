use sea_orm::DatabaseConnection;
use tower_sessions::Session;

use crate::server::{
    data::{category::CategoryRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    middleware::session::{AuthSession, SessionActor},
    model::actor::Actor,
};

pub enum Permission {
    /// Only the administrator account.
    Admin,
    /// Any user account; office logins are rejected.
    UserAccount,
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    session: &'a Session,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, session: &'a Session) -> Self {
        Self { db, session }
    }

    /// Resolves the logged-in actor and checks every listed permission.
    ///
    /// An empty permission list admits any logged-in actor.
    ///
    /// # Returns
    /// - `Ok(Actor)` - Actor is logged in, still exists, and holds every permission
    /// - `Err(AuthError::UserNotInSession)` - Nobody is logged in
    /// - `Err(AuthError::UserNotInDatabase)` - The account was deleted since login
    /// - `Err(AuthError::AccessDenied)` - A permission is missing
    pub async fn require(&self, permissions: &[Permission]) -> Result<Actor, AppError> {
        let Some(session_actor) = AuthSession::new(self.session).get_actor().await? else {
            return Err(AuthError::UserNotInSession.into());
        };

        let actor = match session_actor {
            SessionActor::User(user_id) => {
                let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
                    return Err(AuthError::UserNotInDatabase(format!("user {}", user_id)).into());
                };
                Actor::User(user)
            }
            SessionActor::Office(category_id) => {
                let Some(category) = CategoryRepository::new(self.db)
                    .find_by_id(category_id)
                    .await?
                else {
                    return Err(
                        AuthError::UserNotInDatabase(format!("office {}", category_id)).into(),
                    );
                };
                Actor::Office(category)
            }
        };

        for permission in permissions {
            match permission {
                Permission::Admin => {
                    if !actor.is_admin() {
                        return Err(AuthError::AccessDenied(
                            "Administrator access required.".to_string(),
                        )
                        .into());
                    }
                }
                Permission::UserAccount => {
                    if actor.is_office() {
                        return Err(AuthError::AccessDenied(
                            "Office logins cannot perform this action.".to_string(),
                        )
                        .into());
                    }
                }
            }
        }

        Ok(actor)
    }
}
