use crate::server::{
    data::user::UserRepository,
    model::user::{CreateUserParams, UpdateUserParams, UserType},
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_paginated;
mod otp;
mod taken;
mod update;
