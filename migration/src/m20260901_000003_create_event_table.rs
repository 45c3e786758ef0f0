use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Event::Table)
                    .if_not_exists()
                    .col(pk_auto(Event::Id))
                    .col(string(Event::Program))
                    .col(date_time(Event::StartAt))
                    .col(date_time(Event::EndAt))
                    .col(text(Event::Purpose))
                    .col(string(Event::Status).default("upcoming"))
                    .col(boolean(Event::Notified).default(false))
                    .col(string(Event::CreatedBy))
                    .col(
                        timestamp_with_time_zone(Event::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_start_end")
                    .table(Event::Table)
                    .col(Event::StartAt)
                    .col(Event::EndAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Event::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Event {
    Table,
    Id,
    Program,
    StartAt,
    EndAt,
    Purpose,
    Status,
    Notified,
    CreatedBy,
    CreatedAt,
}
