//! SeaORM entities for the event scheduler database.

pub mod prelude;

pub mod category;
pub mod event;
pub mod event_department;
pub mod event_participant;
pub mod user;
