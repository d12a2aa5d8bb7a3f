//! Unified error types and result handling.
//!
//! Store lookups that find nothing return `Option`/no-op values rather than
//! errors; the variants here cover constraint violations, storage failures,
//! and the configuration/seeding surface.

use thiserror::Error;

/// All errors the crate can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or parsing failed
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong
        message: String,
    },

    /// A month/year pair does not name a valid calendar period
    #[error("Invalid calendar period: month {month}, year {year}")]
    InvalidPeriod {
        /// Month component (valid range 1-12)
        month: u32,
        /// Year component
        year: i32,
    },

    /// An owner id did not resolve to an existing user
    #[error("User not found: {id}")]
    UserNotFound {
        /// The user id that failed to resolve
        id: i64,
    },

    /// A category with the same name, type, and owner already exists
    #[error("A category named '{name}' already exists for this user")]
    DuplicateCategory {
        /// The conflicting category name
        name: String,
    },

    /// A budget for the same category, month, year, and owner already exists
    #[error("A budget for category {category_id} in {month}/{year} already exists")]
    DuplicateBudget {
        /// The category the budget targets
        category_id: i64,
        /// Budget month (1-12)
        month: u32,
        /// Budget year
        year: i32,
    },

    /// Storage-layer failure, propagated unmodified from the ORM
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
