//! Server-side API backend and business logic.
//!
//! This module contains the complete backend of the department event scheduler: API
//! endpoints, booking rules, data access, background jobs and mail delivery. The backend
//! uses Axum as the web framework and SeaORM for database operations.
//!
//! # Architecture
//!
//! The server follows a layered architecture:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - Booking rules, conflict checks, mail, reports and notifications
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Session wrappers and authentication guards
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, mailer, notifier, booking lock)
//! - **Startup** (`startup`) - Initialization of database, sessions, mail and the bootstrap administrator
//! - **Router** (`router`) - Axum route configuration and OpenAPI document
//! - **Scheduler** (`scheduler/`) - Cron jobs for status refresh, reminders, purge and weekly reset
//!
//! # Request Flow
//!
//! 1. **Router** receives the HTTP request and routes it to a controller
//! 2. **Middleware** resolves the logged-in actor from the session
//! 3. **Controller** converts DTOs to params and calls the service
//! 4. **Service** applies permission and booking rules and orchestrates data operations
//! 5. **Data** queries the database and converts entities to domain models
//! 6. **Controller** converts the domain model to a DTO and returns the HTTP response

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;
