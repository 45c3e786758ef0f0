pub use super::category::Entity as Category;
pub use super::event::Entity as Event;
pub use super::event_department::Entity as EventDepartment;
pub use super::event_participant::Entity as EventParticipant;
pub use super::user::Entity as User;
