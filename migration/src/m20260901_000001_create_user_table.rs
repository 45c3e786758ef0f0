use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(pk_auto(User::Id))
                    .col(string_uniq(User::EmployeeNumber))
                    .col(string(User::Email))
                    .col(string(User::PasswordHash))
                    .col(string(User::UserType))
                    .col(string_null(User::OtpHash))
                    .col(timestamp_with_time_zone_null(User::OtpExpiresAt))
                    .col(
                        timestamp_with_time_zone(User::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    EmployeeNumber,
    Email,
    PasswordHash,
    UserType,
    OtpHash,
    OtpExpiresAt,
    CreatedAt,
}
