//! Category entity - a user-defined bucket for classifying money flow.
//!
//! Each category belongs to one user and is either an income or an expense
//! category. `(name, user_id, type)` is unique per owner, enforced by a
//! composite index created alongside the table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::flow_type::FlowType;

/// Category database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable name (e.g., "Food", "Salary")
    pub name: String,
    /// Whether this is an income or expense category
    #[sea_orm(column_name = "type")]
    pub flow_type: FlowType,
    /// Owning user
    pub user_id: i64,
    /// When the category was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Category and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each category belongs to one user; deleting the user removes it
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    /// One category classifies many transactions
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transactions,
    /// One category has many monthly budgets
    #[sea_orm(has_many = "super::budget::Entity")]
    Budgets,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transactions.def()
    }
}

impl Related<super::budget::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Budgets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
