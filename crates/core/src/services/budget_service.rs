use tracing::debug;

use crate::errors::CoreError;
use crate::models::budget::{
    BudgetData, CurrencyMode, MAX_DOLLAR_BUDGET, MAX_MONTHLY_INCOME, MAX_PERCENT_TOTAL,
};

/// Slack allowed when comparing summed percentages against 100,
/// so that e.g. 33.3 + 33.3 + 33.4 is accepted.
const PERCENT_EPSILON: f64 = 1e-9;

/// Budget ledger operations: per-category allocations and monthly income.
///
/// Rejected calls leave `BudgetData` untouched.
pub struct BudgetService;

impl BudgetService {
    pub fn new() -> Self {
        Self
    }

    /// Set the budget for one active category, overwriting only that entry.
    ///
    /// Dollar mode caps a single entry at 10,000. Percentage mode rejects
    /// any value that would push the sum across categories above 100.
    pub fn set_budget(
        &self,
        budget: &mut BudgetData,
        category: &str,
        amount: f64,
    ) -> Result<(), CoreError> {
        if !budget.has_category(category) {
            return Err(CoreError::CategoryNotFound(category.to_string()));
        }

        match budget.currency_mode {
            CurrencyMode::Dollars => {
                Self::check_range("Budget amount", amount, MAX_DOLLAR_BUDGET)?;
            }
            CurrencyMode::Percentage => {
                Self::check_range("Budget percentage", amount, MAX_PERCENT_TOTAL)?;
                let others: f64 = budget
                    .budgets
                    .iter()
                    .filter(|(name, _)| name.as_str() != category)
                    .map(|(_, value)| value)
                    .sum();
                let total = others + amount;
                if total > MAX_PERCENT_TOTAL + PERCENT_EPSILON {
                    return Err(CoreError::PercentageOverflow {
                        category: category.to_string(),
                        total,
                    });
                }
            }
        }

        budget.budgets.insert(category.to_string(), amount);
        debug!(category, amount, mode = %budget.currency_mode, "budget set");
        Ok(())
    }

    /// Remove the budget entry for a category. Returns the old value, if any.
    pub fn clear_budget(&self, budget: &mut BudgetData, category: &str) -> Option<f64> {
        budget.budgets.remove(category)
    }

    pub fn set_income(&self, budget: &mut BudgetData, amount: f64) -> Result<(), CoreError> {
        Self::check_range("Monthly income", amount, MAX_MONTHLY_INCOME)?;
        budget.monthly_income = amount;
        debug!(amount, "monthly income set");
        Ok(())
    }

    /// Flip dollars ↔ percentage and clear every entry.
    ///
    /// Amounts are not converted: a percent of income and a dollar cap
    /// are different bases.
    pub fn toggle_currency_mode(&self, budget: &mut BudgetData) -> CurrencyMode {
        budget.currency_mode = budget.currency_mode.toggled();
        budget.budgets.clear();
        debug!(mode = %budget.currency_mode, "currency mode toggled, budgets cleared");
        budget.currency_mode
    }

    /// Sum of all budget entries, in the ledger's own unit.
    pub fn total_allocated(&self, budget: &BudgetData) -> f64 {
        budget.budgets.values().sum()
    }

    /// What is left to allocate: `100 − sum` in percentage mode,
    /// `income − sum` in dollar mode. Never negative.
    pub fn remaining_allocation(&self, budget: &BudgetData) -> f64 {
        let ceiling = match budget.currency_mode {
            CurrencyMode::Dollars => budget.monthly_income,
            CurrencyMode::Percentage => MAX_PERCENT_TOTAL,
        };
        (ceiling - self.total_allocated(budget)).max(0.0)
    }

    /// A category's budget in dollars, converting through income in percentage mode.
    pub fn allocated_dollars(&self, budget: &BudgetData, category: &str) -> f64 {
        let value = budget.budget_for(category);
        match budget.currency_mode {
            CurrencyMode::Dollars => value,
            CurrencyMode::Percentage => budget.monthly_income * value / 100.0,
        }
    }

    fn check_range(field: &str, value: f64, max: f64) -> Result<(), CoreError> {
        if !value.is_finite() || value < 0.0 || value > max {
            return Err(CoreError::OutOfRange {
                field: field.to_string(),
                value,
                min: 0.0,
                max,
            });
        }
        Ok(())
    }
}

impl Default for BudgetService {
    fn default() -> Self {
        Self::new()
    }
}
