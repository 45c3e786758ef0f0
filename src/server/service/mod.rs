//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Booking conflicts, department scoping and account rules
//! - **Orchestration**: Coordinating repositories with the mailer and the status notifier
//! - **Domain Models**: Working with domain models rather than DTOs or entity models
//! - **Transaction Management**: Running the conflict check and the booking write atomically

pub mod auth;
pub mod category;
pub mod event;
pub mod mail;
pub mod notification;
pub mod password;
pub mod reminder;
pub mod report;
pub mod user;

#[cfg(test)]
mod test;
