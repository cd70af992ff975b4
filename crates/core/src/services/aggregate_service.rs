use crate::models::aggregate::{
    BudgetComparison, CategoryAggregate, DashboardStatus, SpendingSummary, DASHBOARD_MINIMUM,
};
use crate::models::budget::BudgetData;
use crate::models::transaction::Transaction;
use crate::services::budget_service::BudgetService;
use crate::services::category_service::CategoryService;

/// Derives per-category totals and summaries from the transaction log.
///
/// Everything is recomputed from scratch on each call; nothing is cached.
pub struct AggregateService {
    budget_service: BudgetService,
    category_service: CategoryService,
}

impl AggregateService {
    pub fn new() -> Self {
        Self {
            budget_service: BudgetService::new(),
            category_service: CategoryService::new(),
        }
    }

    /// Group by category (first-seen order) and sum amounts.
    /// Percentages are shares of the grand total, all 0 when the total is 0.
    pub fn aggregate_by_category(&self, transactions: &[Transaction]) -> Vec<CategoryAggregate> {
        let mut totals: Vec<(String, f64)> = Vec::new();
        for t in transactions {
            match totals.iter_mut().find(|(name, _)| *name == t.category) {
                Some((_, sum)) => *sum += t.amount,
                None => totals.push((t.category.clone(), t.amount)),
            }
        }

        let grand_total: f64 = totals.iter().map(|(_, amount)| amount).sum();
        totals
            .into_iter()
            .map(|(category, amount)| CategoryAggregate {
                category,
                amount,
                percentage: if grand_total > 0.0 {
                    amount / grand_total * 100.0
                } else {
                    0.0
                },
            })
            .collect()
    }

    /// Total spent against income, plus the per-category breakdown.
    pub fn summarize(&self, transactions: &[Transaction], income: f64) -> SpendingSummary {
        let total_spent: f64 = transactions.iter().map(|t| t.amount).sum();
        let remaining_income = (income - total_spent).max(0.0);
        let remaining_percentage = if income > 0.0 {
            (remaining_income / income * 100.0).max(0.0)
        } else {
            0.0
        };

        SpendingSummary {
            total_spent,
            remaining_income,
            remaining_percentage,
            categories: self.aggregate_by_category(transactions),
        }
    }

    /// Budget vs. actual for every active category with a positive budget.
    pub fn compare_budget(
        &self,
        budget: &BudgetData,
        transactions: &[Transaction],
    ) -> Vec<BudgetComparison> {
        self.category_service
            .active_names(budget)
            .into_iter()
            .filter(|category| budget.budget_for(category) > 0.0)
            .map(|category| {
                let budgeted = self.budget_service.allocated_dollars(budget, &category);
                let actual: f64 = transactions
                    .iter()
                    .filter(|t| t.category == category)
                    .map(|t| t.amount)
                    .sum();
                let percent_used = if budgeted > 0.0 {
                    actual / budgeted * 100.0
                } else {
                    0.0
                };
                BudgetComparison {
                    category,
                    budgeted,
                    actual,
                    percent_used,
                }
            })
            .collect()
    }

    /// The dashboard needs six budgeted categories and six real transactions.
    /// A missing budget is reported before missing transactions.
    pub fn dashboard_status(
        &self,
        budget: &BudgetData,
        transactions: &[Transaction],
    ) -> DashboardStatus {
        let configured = self
            .category_service
            .active_names(budget)
            .iter()
            .filter(|c| budget.budget_for(c) > 0.0)
            .count();
        if configured < DASHBOARD_MINIMUM {
            return DashboardStatus::NeedsBudget {
                configured,
                required: DASHBOARD_MINIMUM,
            };
        }

        let recorded = transactions.iter().filter(|t| !t.is_dummy).count();
        if recorded < DASHBOARD_MINIMUM {
            return DashboardStatus::NeedsTransactions {
                recorded,
                required: DASHBOARD_MINIMUM,
            };
        }

        DashboardStatus::Ready
    }
}

impl Default for AggregateService {
    fn default() -> Self {
        Self::new()
    }
}
