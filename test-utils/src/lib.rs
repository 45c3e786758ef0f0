//! Eventboard Test Utils
//!
//! Shared testing utilities for the event scheduler. Provides a builder for test contexts
//! backed by in-memory SQLite databases plus factories for the common entities.
//!
//! # Overview
//!
//! - **TestBuilder**: fluent builder for configuring the schema of a test database
//! - **TestContext**: database connection and session for a single test
//! - **TestError**: errors that can occur during test setup
//! - **factory**: builders that insert users, categories and events with defaults
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//!
//! #[tokio::test]
//! async fn books_an_event() -> Result<(), TestError> {
//!     let test = TestBuilder::new().with_event_tables().build().await?;
//!     let db = test.db.as_ref().unwrap();
//!     // ...
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
