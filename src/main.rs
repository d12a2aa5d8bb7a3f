//! Database initialization tool.
//!
//! Connects to the configured database, ensures the schema exists, and
//! optionally seeds the default category set for a user named by the
//! `SEED_USER_ID` environment variable.

use std::env;

use dotenvy::dotenv;
use fintrack::errors::{Error, Result};
use fintrack::{config, core};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (env vars can also be set externally)
    dotenv().ok();

    // 3. Connect and bring the schema up
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;

    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Schema is in place."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 4. Optionally seed default categories for one user
    if let Ok(raw) = env::var("SEED_USER_ID") {
        let user_id: i64 = raw.parse().map_err(|_| Error::Config {
            message: format!("SEED_USER_ID must be an integer, got '{raw}'"),
        })?;

        let defaults = config::categories::load_or_default()?;
        let created = core::category::seed_default_categories(&db, user_id, &defaults).await?;
        info!("Seeded {created} categories for user {user_id}.");
    }

    Ok(())
}
