use chrono::NaiveDateTime;
use sea_orm::DatabaseConnection;

use crate::server::model::{
    actor::Actor,
    category::Category,
    event::EventParams,
    user::User,
};

mod category;
mod reminder;

/// Inserts a user of the given type and wraps it as an actor.
async fn user_actor(db: &DatabaseConnection, user_type: &str) -> Actor {
    let user = test_utils::factory::user::create_user_of_type(db, user_type)
        .await
        .unwrap();

    Actor::User(User::from_entity(user))
}

/// Inserts a roster entry and wraps it as an office actor.
async fn office_actor(db: &DatabaseConnection, office: &str, department: &str) -> Actor {
    let category = test_utils::factory::category::CategoryFactory::new(db)
        .office(office)
        .department(department)
        .build()
        .await
        .unwrap();

    Actor::Office(Category::from_entity(category))
}

fn event_params(
    start_at: NaiveDateTime,
    end_at: NaiveDateTime,
    participants: &[&str],
    departments: &[&str],
) -> EventParams {
    EventParams {
        program: "Planning".to_string(),
        start_at,
        end_at,
        purpose: "Quarterly planning".to_string(),
        participants: participants.iter().map(|p| p.to_string()).collect(),
        departments: departments.iter().map(|d| d.to_string()).collect(),
    }
}
