//! Database repository layer for all domain entities.
//!
//! Repositories perform the CRUD queries for each domain using SeaORM entities
//! internally and return domain models, keeping entity types out of the service layer.

pub mod category;
pub mod event;
pub mod user;

#[cfg(test)]
mod test;
