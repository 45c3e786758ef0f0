use super::*;

mod require_admin;
mod require_any;
mod require_user_account;
