/// Database configuration and connection management
pub mod database;

/// Default category set for seeding new users
pub mod categories;
