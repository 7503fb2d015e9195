//! Initial schema migration - creates all tables from scratch.
//!
//! It creates the complete schema for Luxen:
//!
//! - `users`: authentication
//! - `owners`: owners and their invested capital
//! - `sales`: completed sales
//! - `production`: production batches and their cost
//! - `expenses`: business expenses (month-bucketed by the forecast)
//! - `warranty`: warranty claims and their replaced flag

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Username,
    Password,
}

#[derive(Iden)]
enum Owners {
    Table,
    Id,
    Name,
    Email,
    InvestmentAmount,
    CreatedAt,
}

#[derive(Iden)]
enum Sales {
    Table,
    Id,
    Customer,
    TotalAmount,
    Date,
    CreatedAt,
}

#[derive(Iden)]
enum Production {
    Table,
    Id,
    Product,
    Units,
    TotalCost,
    CreatedAt,
}

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    Category,
    Note,
    Amount,
    CreatedAt,
}

#[derive(Iden)]
enum Warranty {
    Table,
    Id,
    Customer,
    Product,
    Replaced,
    CreatedAt,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Owners
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Owners::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Owners::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Owners::Name).string().not_null())
                    .col(ColumnDef::new(Owners::Email).string())
                    .col(ColumnDef::new(Owners::InvestmentAmount).double())
                    .col(ColumnDef::new(Owners::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Sales
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Sales::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Sales::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Sales::Customer).string())
                    .col(ColumnDef::new(Sales::TotalAmount).double())
                    .col(ColumnDef::new(Sales::Date).timestamp().not_null())
                    .col(ColumnDef::new(Sales::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-sales-date")
                    .table(Sales::Table)
                    .col(Sales::Date)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Production
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Production::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Production::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Production::Product).string())
                    .col(ColumnDef::new(Production::Units).integer())
                    .col(ColumnDef::new(Production::TotalCost).double())
                    .col(ColumnDef::new(Production::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Expenses
        // ───────────────────────────────────────────────────────────────────
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
                    .col(ColumnDef::new(Expenses::Category).string())
                    .col(ColumnDef::new(Expenses::Note).string())
                    .col(ColumnDef::new(Expenses::Amount).double())
                    .col(ColumnDef::new(Expenses::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-expenses-created_at")
                    .table(Expenses::Table)
                    .col(Expenses::CreatedAt)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 6. Warranty
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Warranty::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Warranty::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Warranty::Customer).string())
                    .col(ColumnDef::new(Warranty::Product).string())
                    .col(
                        ColumnDef::new(Warranty::Replaced)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Warranty::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation.
        manager
            .drop_table(Table::drop().table(Warranty::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Production::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Sales::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Owners::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
