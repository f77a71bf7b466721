//! Creates the `expenses` table.
//!
//! Amounts are stored as integer cents. `date` carries day precision;
//! `created_at`/`updated_at` are full UTC timestamps maintained by the store.
//! Indexes cover the list query (date), the category filter and the
//! creation-time tie-break.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    Title,
    AmountCents,
    Category,
    Date,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expenses::Title).string().not_null())
                    .col(
                        ColumnDef::new(Expenses::AmountCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Expenses::Category).string().not_null())
                    .col(ColumnDef::new(Expenses::Date).date().not_null())
                    .col(
                        ColumnDef::new(Expenses::Notes)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Expenses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Expenses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_expenses_date")
                    .table(Expenses::Table)
                    .col(Expenses::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_expenses_category")
                    .table(Expenses::Table)
                    .col(Expenses::Category)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_expenses_created_at")
                    .table(Expenses::Table)
                    .col(Expenses::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await
    }
}
