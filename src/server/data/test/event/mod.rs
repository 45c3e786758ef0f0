use crate::server::{
    data::event::EventRepository,
    model::{
        event::{EventParams, EventStatus},
        report::{ReportKind, ReportPeriod},
    },
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory, factory::helpers::at};

mod create;
mod find_overlapping;
mod housekeeping;
mod period;
mod update;

fn params(start_h: u32, end_h: u32, participants: &[&str]) -> EventParams {
    EventParams {
        program: "Planning".to_string(),
        start_at: at(2026, 3, 2, start_h, 0),
        end_at: at(2026, 3, 2, end_h, 0),
        purpose: "Quarterly planning".to_string(),
        participants: participants.iter().map(|p| p.to_string()).collect(),
        departments: vec!["SGOD".to_string()],
    }
}
