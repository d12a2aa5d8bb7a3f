//! Default category set for new users, with optional TOML override.
//!
//! Freshly registered users start from a stock list of income and expense
//! categories. Deployments can replace the stock list by shipping a
//! `categories.toml` next to the binary; otherwise the built-in defaults
//! apply.

use std::path::Path;

use serde::Deserialize;

use crate::errors::{Error, Result};

/// Default location of the category override file.
pub const DEFAULT_CONFIG_PATH: &str = "categories.toml";

/// The category names seeded for a new user, split by flow type.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultCategories {
    /// Income category names
    pub income: Vec<String>,
    /// Expense category names
    pub expense: Vec<String>,
}

impl Default for DefaultCategories {
    fn default() -> Self {
        Self {
            income: [
                "Salary",
                "Freelance",
                "Investments",
                "Gifts",
                "Other Income",
            ]
            .map(String::from)
            .to_vec(),
            expense: [
                "Housing",
                "Food",
                "Transportation",
                "Utilities",
                "Entertainment",
                "Healthcare",
                "Education",
                "Shopping",
                "Other Expense",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

/// Loads a category override file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<DefaultCategories> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read categories file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse categories file: {e}"),
    })
}

/// Loads the override file from [`DEFAULT_CONFIG_PATH`] when present,
/// falling back to the built-in defaults otherwise.
pub fn load_or_default() -> Result<DefaultCategories> {
    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        load_config(DEFAULT_CONFIG_PATH)
    } else {
        Ok(DefaultCategories::default())
    }
}
