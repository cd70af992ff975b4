use serde::{Deserialize, Serialize};

/// Minimum number of budgeted categories and of real transactions
/// before the dashboard has enough data to show.
pub const DASHBOARD_MINIMUM: usize = 6;

/// Spending for one category, derived from the transaction log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAggregate {
    pub category: String,

    /// Sum of all transaction amounts in this category
    pub amount: f64,

    /// Share of the grand total (0–100), 0 when nothing was spent
    pub percentage: f64,
}

/// Totals shown next to the transaction list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingSummary {
    pub total_spent: f64,

    /// Income left after spending, never negative
    pub remaining_income: f64,

    /// `remaining_income` as a share of income, 0 when income is 0
    pub remaining_percentage: f64,

    pub categories: Vec<CategoryAggregate>,
}

/// Budget vs. actual spending for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetComparison {
    pub category: String,

    /// Budget in dollars (percent-mode budgets are converted through income)
    pub budgeted: f64,

    pub actual: f64,

    /// `actual / budgeted × 100`; may exceed 100 when overspent
    pub percent_used: f64,
}

/// Whether the dashboard has enough data to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DashboardStatus {
    Ready,
    /// Fewer than six categories have a positive budget
    NeedsBudget { configured: usize, required: usize },
    /// Budget is fine but fewer than six real transactions exist
    NeedsTransactions { recorded: usize, required: usize },
}

impl DashboardStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, DashboardStatus::Ready)
    }
}
