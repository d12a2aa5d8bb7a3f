//! Shared test utilities for `fintrack`.
//!
//! This module provides common helper functions for setting up test
//! databases and creating test entities with sensible defaults.

#![allow(clippy::expect_used)]

use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use crate::{
    core::{budget, category, transaction},
    entities::{self, FlowType},
    errors::Result,
};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds a calendar date from literal components.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Creates a test user with the default email.
pub async fn create_test_user(db: &DatabaseConnection) -> Result<entities::user::Model> {
    create_custom_user(db, "test@example.com").await
}

/// Creates a test user with a specific email. Use this when a test needs
/// more than one user, e.g. for ownership isolation checks.
pub async fn create_custom_user(
    db: &DatabaseConnection,
    email: &str,
) -> Result<entities::user::Model> {
    entities::user::ActiveModel {
        name: Set("Test User".to_string()),
        email: Set(email.to_string()),
        password_hash: Set("test-password-hash".to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a category for the given user.
pub async fn create_test_category(
    db: &DatabaseConnection,
    user_id: i64,
    name: &str,
    flow_type: FlowType,
) -> Result<entities::category::Model> {
    category::create_category(
        db,
        category::NewCategory {
            user_id,
            name: name.to_string(),
            flow_type,
        },
    )
    .await
}

/// Creates a transaction for the given user.
///
/// # Defaults
/// * `description`: `"Test transaction"`
pub async fn create_test_transaction(
    db: &DatabaseConnection,
    user_id: i64,
    category_id: Option<i64>,
    flow_type: FlowType,
    amount: f64,
    date: NaiveDate,
) -> Result<entities::transaction::Model> {
    transaction::create_transaction(
        db,
        transaction::NewTransaction {
            user_id,
            amount,
            description: "Test transaction".to_string(),
            date,
            flow_type,
            category_id,
        },
    )
    .await
}

/// Creates a budget for the given user and category.
pub async fn create_test_budget(
    db: &DatabaseConnection,
    user_id: i64,
    category_id: i64,
    month: u32,
    year: i32,
    amount: f64,
) -> Result<entities::budget::Model> {
    budget::create_budget(
        db,
        budget::NewBudget {
            user_id,
            category_id,
            month,
            year,
            amount,
        },
    )
    .await
}

/// Sets up a complete test environment with one user.
/// Returns (db, user) for common test scenarios.
pub async fn setup_with_user() -> Result<(DatabaseConnection, entities::user::Model)> {
    let db = setup_test_db().await?;
    let user = create_test_user(&db).await?;
    Ok((db, user))
}
