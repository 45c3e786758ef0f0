//! Application state shared across all request handlers.
//!
//! `AppState` holds the shared resources handlers and background jobs need. It is built
//! once during startup and cloned into each handler through Axum's state extraction.

use chrono::Duration;
use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config,
    service::{event::lock::BookingLock, mail::SharedMailer, notification::StatusNotifier},
    util::clock::ScheduleClock,
};

/// Application state containing shared resources and dependencies.
///
/// Every field is cheap to clone: the database connection is a pool, the mailer is an
/// `Arc`, and the notifier and booking lock share their inner channel and mutex between
/// clones.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Outbound mail, either through SMTP or to the log when no relay is configured.
    pub mailer: SharedMailer,

    /// Broadcasts `statusUpdated` to connected SSE clients.
    pub notifier: StatusNotifier,

    /// Serializes booking writes so the conflict check and the insert are atomic.
    pub booking_lock: BookingLock,

    /// Local time of the schedule.
    pub clock: ScheduleClock,

    /// How long a password reset code stays valid.
    pub otp_ttl: Duration,

    /// How long before an event's start its reminder is mailed.
    pub reminder_lead: Duration,
}

impl AppState {
    /// Creates the application state from configuration and initialized resources.
    ///
    /// # Arguments
    /// - `db` - Database connection pool with migrations applied
    /// - `mailer` - Mail transport selected by `startup::build_mailer`
    /// - `config` - Application configuration providing the offset and durations
    pub fn new(db: DatabaseConnection, mailer: SharedMailer, config: &Config) -> Self {
        Self {
            db,
            mailer,
            notifier: StatusNotifier::new(),
            booking_lock: BookingLock::new(),
            clock: ScheduleClock::new(config.schedule_offset),
            otp_ttl: Duration::minutes(config.otp_ttl_minutes),
            reminder_lead: Duration::minutes(config.reminder_lead_minutes),
        }
    }
}
