//! Dashboard assembly - the reporting engine behind the landing page.
//!
//! Composes one view-model for "today": the five most recent transactions,
//! current-month income/expense/savings totals, a year-to-date chart
//! series, per-category breakdowns, and the budget-vs-actual comparison.
//! All functions return structured data that the rendering layer formats;
//! nothing here knows about markup.

use chrono::{Datelike, NaiveDate, Utc};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{error, instrument};

use crate::{
    core::{
        budget::{self, BudgetComparisonRow},
        period,
        transaction::{
            self, CategorySummaryRow, MonthlySummaryRow, TransactionFilter, TransactionRecord,
        },
    },
    entities::FlowType,
    errors::{Error, Result},
};

/// Number of recent transactions shown on the dashboard.
const RECENT_TRANSACTION_LIMIT: u64 = 5;

/// User-facing message for the degraded dashboard shell.
const DEGRADED_MESSAGE: &str = "Failed to load dashboard data";

/// Income, expense, and derived savings for the current month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    /// Summed income for the month
    pub income: f64,
    /// Summed expenses for the month
    pub expense: f64,
    /// `income - expense`; negative means the month ran a deficit
    pub savings: f64,
}

/// Parallel January-through-current-month series for the overview chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    /// Month labels, `"Jan"` up to the current month
    pub labels: Vec<String>,
    /// Income total per month, zero where nothing was recorded
    pub income: Vec<f64>,
    /// Expense total per month, zero where nothing was recorded
    pub expense: Vec<f64>,
}

/// The complete dashboard view-model handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// Current month (1-12)
    pub month: u32,
    /// Current year
    pub year: i32,
    /// Most recent transactions, newest first
    pub recent_transactions: Vec<TransactionRecord>,
    /// Current-month totals
    pub monthly_totals: MonthlyTotals,
    /// Year-to-date chart series
    pub chart: ChartSeries,
    /// Current-month expense totals per category, largest first
    pub expense_breakdown: Vec<CategorySummaryRow>,
    /// Current-month income totals per category, largest first
    pub income_breakdown: Vec<CategorySummaryRow>,
    /// Budget-vs-actual rows for the current month
    pub budget_comparison: Vec<BudgetComparisonRow>,
}

/// Outcome of a dashboard load: either the full view-model or a degraded
/// shell carrying a user-facing message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DashboardView {
    /// Assembly succeeded
    Ready(Box<Dashboard>),
    /// A storage error interrupted assembly; the page renders its shell
    /// with this message instead of failing the whole request
    Degraded {
        /// Message for the user
        message: String,
    },
}

/// Assembles the dashboard view-model for the month containing `today`.
///
/// The five store reads have no ordering dependency on each other and run
/// concurrently; assembly starts once all of them have completed. A user
/// with no recorded activity gets zeroed totals and empty sequences, never
/// absent fields.
#[instrument(skip(db))]
pub async fn assemble_dashboard(
    db: &DatabaseConnection,
    user_id: i64,
    today: NaiveDate,
) -> Result<Dashboard> {
    let month = today.month();
    let year = today.year();
    let (start_date, end_date) = period::month_bounds(year, month)?;

    let recent_filter = TransactionFilter {
        limit: Some(RECENT_TRANSACTION_LIMIT),
        ..Default::default()
    };

    let (recent_transactions, summary, expense_breakdown, income_breakdown, budget_comparison) =
        tokio::try_join!(
            transaction::list_transactions(db, user_id, &recent_filter),
            transaction::monthly_summary(db, user_id, year),
            transaction::category_summary(db, user_id, FlowType::Expense, start_date, end_date),
            transaction::category_summary(db, user_id, FlowType::Income, start_date, end_date),
            budget::budget_comparison(db, user_id, month, year),
        )?;

    Ok(Dashboard {
        month,
        year,
        recent_transactions,
        monthly_totals: current_month_totals(&summary, month),
        chart: build_chart_series(&summary, month),
        expense_breakdown,
        income_breakdown,
        budget_comparison,
    })
}

/// Loads the dashboard for "today", downgrading storage failures to a
/// degraded view so the page shell still renders.
pub async fn load_dashboard(db: &DatabaseConnection, user_id: i64) -> Result<DashboardView> {
    let today = Utc::now().date_naive();

    match assemble_dashboard(db, user_id, today).await {
        Ok(dashboard) => Ok(DashboardView::Ready(Box::new(dashboard))),
        Err(Error::Database(err)) => {
            error!("Dashboard assembly failed for user {user_id}: {err}");
            Ok(DashboardView::Degraded {
                message: DEGRADED_MESSAGE.to_string(),
            })
        }
        Err(err) => Err(err),
    }
}

/// Reduces the yearly summary to scalar totals for one month and derives
/// savings.
fn current_month_totals(summary: &[MonthlySummaryRow], current_month: u32) -> MonthlyTotals {
    let mut income = 0.0;
    let mut expense = 0.0;

    for row in summary {
        if row.month != current_month {
            continue;
        }
        match row.flow_type {
            FlowType::Income => income += row.total,
            FlowType::Expense => expense += row.total,
        }
    }

    MonthlyTotals {
        income,
        expense,
        savings: income - expense,
    }
}

/// Builds the fixed-length chart series covering January through the
/// current month. Each series starts zeroed and is overwritten per
/// `(month, type)` summary row; rows for months past the current one
/// (future-dated transactions) are dropped rather than growing the series.
fn build_chart_series(summary: &[MonthlySummaryRow], current_month: u32) -> ChartSeries {
    // Cast safety: months are 1-12, well within usize on any target.
    #[allow(clippy::cast_possible_truncation)]
    let length = current_month.min(12) as usize;
    let labels = period::MONTH_LABELS[..length]
        .iter()
        .map(ToString::to_string)
        .collect();
    let mut income = vec![0.0; length];
    let mut expense = vec![0.0; length];

    for row in summary {
        #[allow(clippy::cast_possible_truncation)]
        let index = (row.month - 1) as usize;
        if index >= length {
            continue;
        }
        match row.flow_type {
            FlowType::Income => income[index] = row.total,
            FlowType::Expense => expense[index] = row.total,
        }
    }

    ChartSeries {
        labels,
        income,
        expense,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    fn summary_row(month: u32, flow_type: FlowType, total: f64) -> MonthlySummaryRow {
        MonthlySummaryRow {
            month,
            flow_type,
            total,
        }
    }

    #[test]
    fn test_current_month_totals_filters_other_months() {
        let summary = vec![
            summary_row(1, FlowType::Income, 1000.0),
            summary_row(2, FlowType::Income, 1200.0),
            summary_row(2, FlowType::Expense, 300.0),
        ];

        let totals = current_month_totals(&summary, 2);
        assert_eq!(totals.income, 1200.0);
        assert_eq!(totals.expense, 300.0);
        assert_eq!(totals.savings, 900.0);
    }

    #[test]
    fn test_current_month_totals_empty_summary() {
        let totals = current_month_totals(&[], 6);
        assert_eq!(totals.income, 0.0);
        assert_eq!(totals.expense, 0.0);
        assert_eq!(totals.savings, 0.0);
    }

    #[test]
    fn test_build_chart_series_zero_fills_gaps() {
        let summary = vec![
            summary_row(1, FlowType::Income, 500.0),
            summary_row(3, FlowType::Expense, 75.0),
        ];

        let chart = build_chart_series(&summary, 4);
        assert_eq!(chart.labels, vec!["Jan", "Feb", "Mar", "Apr"]);
        assert_eq!(chart.income, vec![500.0, 0.0, 0.0, 0.0]);
        assert_eq!(chart.expense, vec![0.0, 0.0, 75.0, 0.0]);
    }

    #[test]
    fn test_build_chart_series_drops_future_months() {
        // A transaction dated past the current month must not grow the series
        let summary = vec![
            summary_row(2, FlowType::Income, 100.0),
            summary_row(11, FlowType::Income, 900.0),
        ];

        let chart = build_chart_series(&summary, 3);
        assert_eq!(chart.labels.len(), 3);
        assert_eq!(chart.income, vec![0.0, 100.0, 0.0]);
    }

    #[tokio::test]
    async fn test_assemble_dashboard_income_only_series() -> Result<()> {
        let (db, user) = setup_with_user().await?;
        let salary = create_test_category(&db, user.id, "Salary", FlowType::Income).await?;

        create_test_transaction(
            &db,
            user.id,
            Some(salary.id),
            FlowType::Income,
            1000.0,
            date(2024, 1, 31),
        )
        .await?;
        create_test_transaction(
            &db,
            user.id,
            Some(salary.id),
            FlowType::Income,
            1200.0,
            date(2024, 2, 1),
        )
        .await?;

        let dashboard = assemble_dashboard(&db, user.id, date(2024, 2, 15)).await?;

        assert_eq!(dashboard.month, 2);
        assert_eq!(dashboard.year, 2024);
        assert_eq!(dashboard.chart.labels, vec!["Jan", "Feb"]);
        assert_eq!(dashboard.chart.income, vec![1000.0, 1200.0]);
        assert_eq!(dashboard.chart.expense, vec![0.0, 0.0]);
        assert_eq!(
            dashboard.monthly_totals,
            MonthlyTotals {
                income: 1200.0,
                expense: 0.0,
                savings: 1200.0,
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_assemble_dashboard_empty_user() -> Result<()> {
        let (db, user) = setup_with_user().await?;

        let dashboard = assemble_dashboard(&db, user.id, date(2024, 6, 10)).await?;

        assert!(dashboard.recent_transactions.is_empty());
        assert!(dashboard.expense_breakdown.is_empty());
        assert!(dashboard.income_breakdown.is_empty());
        assert!(dashboard.budget_comparison.is_empty());
        assert_eq!(dashboard.monthly_totals.income, 0.0);
        assert_eq!(dashboard.monthly_totals.expense, 0.0);
        assert_eq!(dashboard.monthly_totals.savings, 0.0);
        // The chart still covers January through June, all zeros
        assert_eq!(dashboard.chart.labels.len(), 6);
        assert!(dashboard.chart.income.iter().all(|v| *v == 0.0));
        assert!(dashboard.chart.expense.iter().all(|v| *v == 0.0));

        Ok(())
    }

    #[tokio::test]
    async fn test_assemble_dashboard_recent_transactions_capped() -> Result<()> {
        let (db, user) = setup_with_user().await?;

        for day in 1..=7 {
            create_test_transaction(
                &db,
                user.id,
                None,
                FlowType::Expense,
                f64::from(day),
                date(2024, 3, day),
            )
            .await?;
        }

        let dashboard = assemble_dashboard(&db, user.id, date(2024, 3, 20)).await?;

        assert_eq!(dashboard.recent_transactions.len(), 5);
        // Newest first: March 7th leads
        assert_eq!(
            dashboard.recent_transactions[0].transaction.date,
            date(2024, 3, 7)
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_assemble_dashboard_full_view() -> Result<()> {
        let (db, user) = setup_with_user().await?;
        let food = create_test_category(&db, user.id, "Food", FlowType::Expense).await?;
        let salary = create_test_category(&db, user.id, "Salary", FlowType::Income).await?;

        create_test_budget(&db, user.id, food.id, 3, 2024, 200.0).await?;
        create_test_transaction(
            &db,
            user.id,
            Some(food.id),
            FlowType::Expense,
            50.0,
            date(2024, 3, 15),
        )
        .await?;
        create_test_transaction(
            &db,
            user.id,
            Some(salary.id),
            FlowType::Income,
            2000.0,
            date(2024, 3, 1),
        )
        .await?;

        let dashboard = assemble_dashboard(&db, user.id, date(2024, 3, 20)).await?;

        assert_eq!(dashboard.monthly_totals.income, 2000.0);
        assert_eq!(dashboard.monthly_totals.expense, 50.0);
        assert_eq!(dashboard.monthly_totals.savings, 1950.0);

        assert_eq!(dashboard.expense_breakdown.len(), 1);
        assert_eq!(dashboard.expense_breakdown[0].category_name, "Food");
        assert_eq!(dashboard.income_breakdown.len(), 1);
        assert_eq!(dashboard.income_breakdown[0].total, 2000.0);

        assert_eq!(dashboard.budget_comparison.len(), 1);
        assert_eq!(dashboard.budget_comparison[0].budget_amount, 200.0);
        assert_eq!(dashboard.budget_comparison[0].actual_amount, 50.0);
        assert_eq!(dashboard.budget_comparison[0].difference, 150.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_load_dashboard_degrades_on_storage_error() -> Result<()> {
        // Every query fails, simulating an unreachable store
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_errors((0..5).map(|_| DbErr::Custom("connection lost".to_string())))
            .into_connection();

        let view = load_dashboard(&db, 1).await?;
        assert_eq!(
            view,
            DashboardView::Degraded {
                message: "Failed to load dashboard data".to_string(),
            }
        );

        Ok(())
    }
}
