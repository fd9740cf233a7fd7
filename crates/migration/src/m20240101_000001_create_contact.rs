//! Create `contact` table.
//!
//! Column limits mirror the validation in `models::contact`; email is unique.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contact::Table)
                    .if_not_exists()
                    .col(pk_auto(Contact::Id))
                    .col(string_len(Contact::FirstName, 50).not_null())
                    .col(string_len(Contact::LastName, 50).not_null())
                    .col(string_len(Contact::Email, 255).unique_key().not_null())
                    .col(string_len(Contact::PhoneNumber, 20).not_null())
                    .col(ColumnDef::new(Contact::BirthDate).date().null())
                    .col(ColumnDef::new(Contact::AdditionalInfo).string_len(255).null())
                    .col(timestamp_with_time_zone(Contact::CreatedAt).not_null())
                    .col(
                        ColumnDef::new(Contact::UpdatedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_contact_name")
                    .table(Contact::Table)
                    .col(Contact::LastName)
                    .col(Contact::FirstName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Contact::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Contact {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    BirthDate,
    AdditionalInfo,
    CreatedAt,
    UpdatedAt,
}
