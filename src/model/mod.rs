//! Data transfer objects exchanged over the HTTP API.

pub mod api;
pub mod auth;
pub mod category;
pub mod event;
pub mod user;
