use sea_orm_migration::{prelude::*, schema::*};

use super::m20260901_000003_create_event_table::Event;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EventDepartment::Table)
                    .if_not_exists()
                    .col(pk_auto(EventDepartment::Id))
                    .col(integer(EventDepartment::EventId))
                    .col(string(EventDepartment::Department))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_department_event_id")
                            .from(EventDepartment::Table, EventDepartment::EventId)
                            .to(Event::Table, Event::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventDepartment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum EventDepartment {
    Table,
    Id,
    EventId,
    Department,
}
