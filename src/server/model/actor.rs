//! The authenticated caller.

use crate::{
    model::auth::ActorDto,
    server::model::{category::Category, label::same_label, user::User},
};

/// Who is making a request: a user account or an office logged in by its roster ID.
#[derive(Debug, Clone, PartialEq)]
pub enum Actor {
    User(User),
    Office(Category),
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::User(user) if user.user_type.department().is_none())
    }

    /// The user account behind the actor, `None` for office logins.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::User(user) => Some(user),
            Self::Office(_) => None,
        }
    }

    pub fn is_office(&self) -> bool {
        matches!(self, Self::Office(_))
    }

    /// Department the actor is confined to, `None` for administrators.
    pub fn department(&self) -> Option<&str> {
        match self {
            Self::User(user) => user.user_type.department(),
            Self::Office(category) => Some(&category.department),
        }
    }

    /// Whether the actor may act on data tagged with `department`.
    pub fn covers_department(&self, department: &str) -> bool {
        match self.department() {
            None => true,
            Some(own) => same_label(own, department),
        }
    }

    /// Identifier recorded as the creator of events.
    pub fn label(&self) -> &str {
        match self {
            Self::User(user) => &user.employee_number,
            Self::Office(category) => &category.id_number,
        }
    }

    pub fn into_dto(self) -> ActorDto {
        match self {
            Self::User(user) => ActorDto::User {
                id: user.id,
                employee_number: user.employee_number,
                email: user.email,
                user_type: user.user_type.as_str().to_string(),
            },
            Self::Office(category) => ActorDto::Office {
                id: category.id,
                id_number: category.id_number,
                office: category.office,
                department: category.department,
            },
        }
    }
}
