use crate::server::{
    data::{category::CategoryRepository, event::EventRepository},
    model::category::CategoryParams,
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod crud;
mod departments;
