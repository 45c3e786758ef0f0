//! Factory methods for creating test data.
//!
//! Each entity has a `Factory` builder for customization and a `create_*` function for
//! quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::create_user(&db).await?;
//! let registrar = factory::category::CategoryFactory::new(&db)
//!     .office("Registrar")
//!     .department("SGOD")
//!     .build()
//!     .await?;
//! let (event, participants, departments) = factory::event::EventFactory::new(&db)
//!     .participants(["Registrar"])
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - user accounts
//! - `category` - roster entries
//! - `event` - events with their participant and department rows
//! - `helpers` - unique id generation and time helpers

pub mod category;
pub mod event;
pub mod helpers;
pub mod user;

pub use category::create_category;
pub use event::create_event;
pub use user::create_user;
