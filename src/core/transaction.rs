//! Transaction store - CRUD and aggregation over income/expense records.
//!
//! All operations are scoped to an owning user; no call here can return or
//! modify another user's rows. Lookups that find nothing yield `None` and
//! deletes of missing rows are no-ops, so "not found" never surfaces as an
//! error. The two aggregation queries (`monthly_summary`,
//! `category_summary`) fetch bound-parameter filtered rows and group them
//! in Rust, which keeps the grouping portable across storage backends.

use std::collections::BTreeMap;

use chrono::Datelike;
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};
use serde::Serialize;

use crate::{
    entities::{Category, FlowType, Transaction, transaction},
    errors::{Error, Result},
};

/// Optional predicates for [`list_transactions`]. Every field defaults to
/// "no constraint"; set only what the caller needs.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Restrict to income or expense rows
    pub flow_type: Option<FlowType>,
    /// Restrict to one category
    pub category_id: Option<i64>,
    /// Earliest date to include (inclusive)
    pub start_date: Option<Date>,
    /// Latest date to include (inclusive)
    pub end_date: Option<Date>,
    /// Maximum number of rows to return
    pub limit: Option<u64>,
}

/// A transaction together with the name of its category, if it has one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    /// The transaction row itself
    #[serde(flatten)]
    pub transaction: transaction::Model,
    /// Name of the linked category, `None` for uncategorized rows
    pub category_name: Option<String>,
}

/// Data for creating a new transaction. The validation collaborator
/// guarantees a positive amount and a valid calendar date before this is
/// constructed.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    /// Owning user
    pub user_id: i64,
    /// Transaction amount, positive
    pub amount: f64,
    /// Description of the transaction
    pub description: String,
    /// Calendar date the transaction occurred on
    pub date: Date,
    /// Income or expense
    pub flow_type: FlowType,
    /// Optional category reference
    pub category_id: Option<i64>,
}

/// Mutable fields for [`update_transaction`]. The flow type is fixed at
/// creation and cannot be changed afterwards.
#[derive(Debug, Clone)]
pub struct TransactionChanges {
    /// New amount
    pub amount: f64,
    /// New description
    pub description: String,
    /// New calendar date
    pub date: Date,
    /// New category reference (or `None` to uncategorize)
    pub category_id: Option<i64>,
}

/// Per-month, per-type total produced by [`monthly_summary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummaryRow {
    /// Calendar month (1-12)
    pub month: u32,
    /// Income or expense
    pub flow_type: FlowType,
    /// Sum of amounts for this month and type
    pub total: f64,
}

/// Per-category total produced by [`category_summary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummaryRow {
    /// Name of the category
    pub category_name: String,
    /// Sum of amounts for this category
    pub total: f64,
}

/// Lists a user's transactions, newest date first, applying the optional
/// filter predicates. Each row carries the joined category name so the
/// rendering layer never has to re-query.
pub async fn list_transactions(
    db: &DatabaseConnection,
    user_id: i64,
    filter: &TransactionFilter,
) -> Result<Vec<TransactionRecord>> {
    let mut query = Transaction::find()
        .find_also_related(Category)
        .filter(transaction::Column::UserId.eq(user_id));

    if let Some(flow_type) = filter.flow_type {
        query = query.filter(transaction::Column::FlowType.eq(flow_type));
    }
    if let Some(category_id) = filter.category_id {
        query = query.filter(transaction::Column::CategoryId.eq(category_id));
    }
    if let Some(start_date) = filter.start_date {
        query = query.filter(transaction::Column::Date.gte(start_date));
    }
    if let Some(end_date) = filter.end_date {
        query = query.filter(transaction::Column::Date.lte(end_date));
    }

    let mut query = query
        .order_by_desc(transaction::Column::Date)
        .order_by_desc(transaction::Column::Id);
    if let Some(limit) = filter.limit {
        query = query.limit(limit);
    }

    let rows = query.all(db).await?;
    Ok(rows
        .into_iter()
        .map(|(tx, category)| TransactionRecord {
            transaction: tx,
            category_name: category.map(|c| c.name),
        })
        .collect())
}

/// Finds a single transaction by id, scoped to its owner. Returns `None`
/// when the row does not exist or belongs to someone else.
pub async fn get_transaction(
    db: &DatabaseConnection,
    id: i64,
    user_id: i64,
) -> Result<Option<TransactionRecord>> {
    let row = Transaction::find_by_id(id)
        .find_also_related(Category)
        .filter(transaction::Column::UserId.eq(user_id))
        .one(db)
        .await?;

    Ok(row.map(|(tx, category)| TransactionRecord {
        transaction: tx,
        category_name: category.map(|c| c.name),
    }))
}

/// Creates a new transaction for the owning user.
pub async fn create_transaction(
    db: &DatabaseConnection,
    data: NewTransaction,
) -> Result<transaction::Model> {
    let model = transaction::ActiveModel {
        amount: Set(data.amount),
        description: Set(data.description),
        date: Set(data.date),
        flow_type: Set(data.flow_type),
        category_id: Set(data.category_id),
        user_id: Set(data.user_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Updates a transaction's amount, description, date, and category. The
/// flow type is immutable after creation. Returns `None` when the row does
/// not exist or is owned by another user.
pub async fn update_transaction(
    db: &DatabaseConnection,
    id: i64,
    user_id: i64,
    changes: TransactionChanges,
) -> Result<Option<transaction::Model>> {
    let Some(existing) = Transaction::find_by_id(id)
        .filter(transaction::Column::UserId.eq(user_id))
        .one(db)
        .await?
    else {
        return Ok(None);
    };

    let mut active: transaction::ActiveModel = existing.into();
    active.amount = Set(changes.amount);
    active.description = Set(changes.description);
    active.date = Set(changes.date);
    active.category_id = Set(changes.category_id);

    let updated = active.update(db).await?;
    Ok(Some(updated))
}

/// Deletes a transaction scoped to its owner. Deleting a missing or
/// foreign row is a no-op, so repeated deletes are safe.
pub async fn delete_transaction(db: &DatabaseConnection, id: i64, user_id: i64) -> Result<()> {
    Transaction::delete_many()
        .filter(transaction::Column::Id.eq(id))
        .filter(transaction::Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(())
}

/// Sums a user's transaction amounts per calendar month and flow type for
/// one year, ordered by month ascending. Months with no activity produce
/// no row; the dashboard zero-fills them.
pub async fn monthly_summary(
    db: &DatabaseConnection,
    user_id: i64,
    year: i32,
) -> Result<Vec<MonthlySummaryRow>> {
    let start = Date::from_ymd_opt(year, 1, 1).ok_or(Error::InvalidPeriod { month: 1, year })?;
    let end = Date::from_ymd_opt(year, 12, 31).ok_or(Error::InvalidPeriod { month: 12, year })?;

    let rows = Transaction::find()
        .filter(transaction::Column::UserId.eq(user_id))
        .filter(transaction::Column::Date.between(start, end))
        .all(db)
        .await?;

    let mut totals: BTreeMap<(u32, FlowType), f64> = BTreeMap::new();
    for tx in rows {
        *totals.entry((tx.date.month(), tx.flow_type)).or_default() += tx.amount;
    }

    Ok(totals
        .into_iter()
        .map(|((month, flow_type), total)| MonthlySummaryRow {
            month,
            flow_type,
            total,
        })
        .collect())
}

/// Sums a user's transaction amounts per category for one flow type within
/// an inclusive date range, ordered by total descending. Uncategorized
/// transactions are excluded; they have no category to group under.
pub async fn category_summary(
    db: &DatabaseConnection,
    user_id: i64,
    flow_type: FlowType,
    start_date: Date,
    end_date: Date,
) -> Result<Vec<CategorySummaryRow>> {
    let rows = Transaction::find()
        .find_also_related(Category)
        .filter(transaction::Column::UserId.eq(user_id))
        .filter(transaction::Column::FlowType.eq(flow_type))
        .filter(transaction::Column::Date.between(start_date, end_date))
        .all(db)
        .await?;

    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for (tx, category) in rows {
        let Some(category) = category else {
            continue;
        };
        *totals.entry(category.name).or_default() += tx.amount;
    }

    let mut summary: Vec<CategorySummaryRow> = totals
        .into_iter()
        .map(|(category_name, total)| CategorySummaryRow {
            category_name,
            total,
        })
        .collect();
    summary.sort_by(|a, b| b.total.total_cmp(&a.total));
    Ok(summary)
}
