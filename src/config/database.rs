//! Database configuration and connection management.
//!
//! Handles the `SQLite` connection and schema creation using `SeaORM`.
//! Tables are generated from the entity definitions via
//! `Schema::create_table_from_entity`, so the database schema always
//! matches the Rust struct definitions without hand-written SQL. The two
//! composite uniqueness constraints - `(name, user, type)` on categories
//! and `(month, year, category, user)` on budgets - span multiple columns
//! and are created as explicit unique indexes alongside the tables.
//! Everything is `IF NOT EXISTS`, so initialization is safe to re-run.

use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

use crate::entities::{Budget, Category, Transaction, User, budget, category};
use crate::errors::Result;

/// Gets the database URL from the `DATABASE_URL` environment variable or
/// falls back to a local `SQLite` file.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/fintrack.sqlite?mode=rwc".to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates the four tables (users, categories, transactions, budgets) and
/// the composite unique indexes, all idempotently.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    // Parents before children so the foreign keys resolve
    let users_table = schema.create_table_from_entity(User).if_not_exists().take();
    let categories_table = schema
        .create_table_from_entity(Category)
        .if_not_exists()
        .take();
    let transactions_table = schema
        .create_table_from_entity(Transaction)
        .if_not_exists()
        .take();
    let budgets_table = schema
        .create_table_from_entity(Budget)
        .if_not_exists()
        .take();

    db.execute(builder.build(&users_table)).await?;
    db.execute(builder.build(&categories_table)).await?;
    db.execute(builder.build(&transactions_table)).await?;
    db.execute(builder.build(&budgets_table)).await?;

    // One category per (name, user, type)
    let category_unique = Index::create()
        .name("idx_categories_name_user_type")
        .table(Category)
        .col(category::Column::Name)
        .col(category::Column::UserId)
        .col(category::Column::FlowType)
        .unique()
        .if_not_exists()
        .take();
    db.execute(builder.build(&category_unique)).await?;

    // One budget per (month, year, category, user)
    let budget_unique = Index::create()
        .name("idx_budgets_month_year_category_user")
        .table(Budget)
        .col(budget::Column::Month)
        .col(budget::Column::Year)
        .col(budget::Column::CategoryId)
        .col(budget::Column::UserId)
        .unique()
        .if_not_exists()
        .take();
    db.execute(builder.build(&budget_unique)).await?;

    Ok(())
}
