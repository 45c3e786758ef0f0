//! Background cron jobs.

pub mod event_jobs;
