use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "event")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub program: String,
    pub start_at: DateTime,
    pub end_at: DateTime,
    #[sea_orm(column_type = "Text")]
    pub purpose: String,
    pub status: String,
    pub notified: bool,
    pub created_by: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event_participant::Entity")]
    EventParticipant,
    #[sea_orm(has_many = "super::event_department::Entity")]
    EventDepartment,
}

impl Related<super::event_participant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventParticipant.def()
    }
}

impl Related<super::event_department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventDepartment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
