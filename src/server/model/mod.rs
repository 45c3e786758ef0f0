//! Domain models and operation parameters.
//!
//! Models here are what services and repositories exchange. Conversion from API DTOs
//! happens in `from_dto` constructors, conversion from SeaORM entities in `from_entity`.

pub mod actor;
pub mod category;
pub mod event;
pub mod label;
pub mod report;
pub mod user;
