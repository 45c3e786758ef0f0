//! HTTP request handlers.
//!
//! Each handler resolves the caller through `AuthGuard`, converts the request DTO into
//! service parameters, calls the service and converts the result back into a DTO.

pub mod admin;
pub mod auth;
pub mod category;
pub mod event;
pub mod health;
pub mod realtime;
pub mod report;
pub mod user;
