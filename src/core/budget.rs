//! Budget store - monthly per-category spending plans and the
//! budget-vs-actual comparison.
//!
//! A budget pins a planned amount to one `(category, month, year)` for one
//! user; the composite unique index settles racing creators with a
//! conflict. The comparison query is the dashboard's centerpiece: one row
//! per expense category, with zeros standing in for absent budgets or
//! absent spending so no category ever drops out of the report.

use std::collections::HashMap;

use sea_orm::{QueryOrder, Set, SqlErr, prelude::*};
use serde::Serialize;

use crate::{
    core::period,
    entities::{Budget, Category, FlowType, Transaction, budget, category, transaction},
    errors::{Error, Result},
};

/// Optional predicates for [`list_budgets`].
#[derive(Debug, Clone, Default)]
pub struct BudgetFilter {
    /// Restrict to one month (1-12)
    pub month: Option<u32>,
    /// Restrict to one year
    pub year: Option<i32>,
}

/// A budget together with the name and type of its category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetRecord {
    /// The budget row itself
    #[serde(flatten)]
    pub budget: budget::Model,
    /// Name of the budgeted category
    pub category_name: String,
    /// Flow type of the budgeted category
    pub category_type: FlowType,
}

/// Data for creating a new budget.
#[derive(Debug, Clone)]
pub struct NewBudget {
    /// Owning user
    pub user_id: i64,
    /// Category the budget applies to
    pub category_id: i64,
    /// Budget month (1-12)
    pub month: u32,
    /// Budget year
    pub year: i32,
    /// Planned amount
    pub amount: f64,
}

/// One row of the budget-vs-actual comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetComparisonRow {
    /// Category id
    pub category_id: i64,
    /// Category name
    pub category_name: String,
    /// Planned amount for the period, 0 when no budget exists
    pub budget_amount: f64,
    /// Summed expense transactions for the period, 0 when none exist
    pub actual_amount: f64,
    /// `budget_amount - actual_amount`; negative means overspent
    pub difference: f64,
}

/// Lists a user's budgets joined with their category name and type,
/// ordered by category name. Budgets whose category no longer resolves are
/// omitted, matching the join semantics of the listing view.
pub async fn list_budgets(
    db: &DatabaseConnection,
    user_id: i64,
    filter: &BudgetFilter,
) -> Result<Vec<BudgetRecord>> {
    let mut query = Budget::find()
        .find_also_related(Category)
        .filter(budget::Column::UserId.eq(user_id));

    if let Some(month) = filter.month {
        query = query.filter(budget::Column::Month.eq(month));
    }
    if let Some(year) = filter.year {
        query = query.filter(budget::Column::Year.eq(year));
    }

    let rows = query.order_by_asc(category::Column::Name).all(db).await?;
    Ok(rows
        .into_iter()
        .filter_map(|(budget, category)| {
            category.map(|c| BudgetRecord {
                budget,
                category_name: c.name,
                category_type: c.flow_type,
            })
        })
        .collect())
}

/// Finds a budget by id, scoped to its owner. Returns `None` when the row
/// does not exist or belongs to someone else.
pub async fn get_budget(
    db: &DatabaseConnection,
    id: i64,
    user_id: i64,
) -> Result<Option<BudgetRecord>> {
    let row = Budget::find_by_id(id)
        .find_also_related(Category)
        .filter(budget::Column::UserId.eq(user_id))
        .one(db)
        .await?;

    Ok(row.and_then(|(budget, category)| {
        category.map(|c| BudgetRecord {
            budget,
            category_name: c.name,
            category_type: c.flow_type,
        })
    }))
}

/// Creates a new budget. A second budget for the same
/// `(month, year, category, user)` fails with [`Error::DuplicateBudget`];
/// the existing row is unaffected.
pub async fn create_budget(db: &DatabaseConnection, data: NewBudget) -> Result<budget::Model> {
    let model = budget::ActiveModel {
        amount: Set(data.amount),
        month: Set(data.month),
        year: Set(data.year),
        category_id: Set(data.category_id),
        user_id: Set(data.user_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    match model.insert(db).await {
        Ok(created) => Ok(created),
        Err(err) => match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Err(Error::DuplicateBudget {
                category_id: data.category_id,
                month: data.month,
                year: data.year,
            }),
            _ => Err(err.into()),
        },
    }
}

/// Updates a budget's amount; the period and category are fixed at
/// creation. Returns `None` when the row does not exist or is owned by
/// another user.
pub async fn update_budget(
    db: &DatabaseConnection,
    id: i64,
    user_id: i64,
    amount: f64,
) -> Result<Option<budget::Model>> {
    let Some(existing) = Budget::find_by_id(id)
        .filter(budget::Column::UserId.eq(user_id))
        .one(db)
        .await?
    else {
        return Ok(None);
    };

    let mut active: budget::ActiveModel = existing.into();
    active.amount = Set(amount);

    let updated = active.update(db).await?;
    Ok(Some(updated))
}

/// Deletes a budget scoped to its owner. Deleting a missing or foreign row
/// is a no-op.
pub async fn delete_budget(db: &DatabaseConnection, id: i64, user_id: i64) -> Result<()> {
    Budget::delete_many()
        .filter(budget::Column::Id.eq(id))
        .filter(budget::Column::UserId.eq(user_id))
        .exec(db)
        .await?;
    Ok(())
}

/// Compares planned against actual spending for one month.
///
/// Produces exactly one row per expense category the user owns, ordered by
/// category name, regardless of whether a budget or any spending exists
/// for the period. Rather than leaning on engine-specific outer-join
/// null-coalescing, the merge runs in three steps: enumerate the expense
/// categories, map category id to budget amount, map category id to summed
/// actuals, then walk the category list attaching zeros for whatever is
/// absent. Only expense-typed transactions count toward `actual_amount`;
/// an income-typed transaction filed under an expense category is ignored,
/// the same way the transaction type is stored independently of the
/// category's type everywhere else.
pub async fn budget_comparison(
    db: &DatabaseConnection,
    user_id: i64,
    month: u32,
    year: i32,
) -> Result<Vec<BudgetComparisonRow>> {
    let (start, end) = period::month_bounds(year, month)?;

    let categories = Category::find()
        .filter(category::Column::UserId.eq(user_id))
        .filter(category::Column::FlowType.eq(FlowType::Expense))
        .order_by_asc(category::Column::Name)
        .all(db)
        .await?;

    let budgets = Budget::find()
        .filter(budget::Column::UserId.eq(user_id))
        .filter(budget::Column::Month.eq(month))
        .filter(budget::Column::Year.eq(year))
        .all(db)
        .await?;
    let budget_by_category: HashMap<i64, f64> = budgets
        .into_iter()
        .map(|b| (b.category_id, b.amount))
        .collect();

    let spent = Transaction::find()
        .filter(transaction::Column::UserId.eq(user_id))
        .filter(transaction::Column::FlowType.eq(FlowType::Expense))
        .filter(transaction::Column::Date.between(start, end))
        .all(db)
        .await?;
    let mut actual_by_category: HashMap<i64, f64> = HashMap::new();
    for tx in spent {
        if let Some(category_id) = tx.category_id {
            *actual_by_category.entry(category_id).or_default() += tx.amount;
        }
    }

    Ok(categories
        .into_iter()
        .map(|category| {
            let budget_amount = budget_by_category.get(&category.id).copied().unwrap_or(0.0);
            let actual_amount = actual_by_category.get(&category.id).copied().unwrap_or(0.0);
            BudgetComparisonRow {
                category_id: category.id,
                category_name: category.name,
                budget_amount,
                actual_amount,
                difference: budget_amount - actual_amount,
            }
        })
        .collect())
}
