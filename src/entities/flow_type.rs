//! Income/expense discriminator shared by categories and transactions.
//!
//! Stored as the strings `"income"` / `"expense"` so the column values stay
//! compatible with the persisted schema.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether money flows in (income) or out (expense).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum FlowType {
    /// Money coming in (salary, freelance, ...)
    #[sea_orm(string_value = "income")]
    Income,
    /// Money going out (rent, groceries, ...)
    #[sea_orm(string_value = "expense")]
    Expense,
}
