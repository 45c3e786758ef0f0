use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::{
        auth::{AuthGuard, Permission},
        session::{AuthSession, SessionActor},
    },
    model::actor::Actor,
};
use test_utils::{builder::TestBuilder, factory};

mod require;
