//! Transaction entity - a single income or expense record.
//!
//! Each transaction has an amount, description, calendar date (no time
//! component), flow type, an optional category reference, and an owning
//! user. Deleting the referenced category nulls the reference; the
//! transaction itself survives.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::flow_type::FlowType;

/// Transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Transaction amount in currency units, always positive; the flow
    /// type determines the direction
    pub amount: f64,
    /// Human-readable description of the transaction
    pub description: String,
    /// Calendar date the transaction occurred on
    pub date: Date,
    /// Whether this is income or an expense. Stored independently of the
    /// linked category's type; the two are not forced to match.
    #[sea_orm(column_name = "type")]
    pub flow_type: FlowType,
    /// Category this transaction is filed under, if any
    pub category_id: Option<i64>,
    /// Owning user
    pub user_id: i64,
    /// When the record was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Optional category reference; nulled when the category is deleted
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Category,
    /// Each transaction belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
