use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::category::CategoryPreset;

/// Largest allowed budget for a single category in dollar mode.
pub const MAX_DOLLAR_BUDGET: f64 = 10_000.0;

/// Upper bound for the sum of all category budgets in percentage mode.
pub const MAX_PERCENT_TOTAL: f64 = 100.0;

/// Largest allowed monthly income.
pub const MAX_MONTHLY_INCOME: f64 = 10_000_000.0;

/// How budget amounts are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurrencyMode {
    /// Absolute amounts, capped per category
    #[default]
    Dollars,
    /// Share of monthly income, summing to at most 100
    Percentage,
}

impl CurrencyMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            CurrencyMode::Dollars => CurrencyMode::Percentage,
            CurrencyMode::Percentage => CurrencyMode::Dollars,
        }
    }
}

impl std::fmt::Display for CurrencyMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurrencyMode::Dollars => write!(f, "dollars"),
            CurrencyMode::Percentage => write!(f, "percentage"),
        }
    }
}

/// The budget ledger, persisted under the `budgetData` key.
///
/// Every field falls back to its default when missing from stored JSON,
/// so older or partial payloads still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetData {
    /// Categories from the selected preset, in display order
    pub default_categories: Vec<String>,

    /// Categories the user added, in insertion order
    pub custom_categories: Vec<String>,

    /// Category name → budgeted amount (dollars or percent, see `currency_mode`)
    pub budgets: BTreeMap<String, f64>,

    pub monthly_income: f64,

    pub currency_mode: CurrencyMode,
}

impl Default for BudgetData {
    fn default() -> Self {
        Self {
            default_categories: CategoryPreset::default().owned_names(),
            custom_categories: Vec::new(),
            budgets: BTreeMap::new(),
            monthly_income: 0.0,
            currency_mode: CurrencyMode::default(),
        }
    }
}

impl BudgetData {
    /// Budgeted amount for a category, 0 when unset.
    pub fn budget_for(&self, category: &str) -> f64 {
        self.budgets.get(category).copied().unwrap_or(0.0)
    }

    /// Whether the category is in either list.
    pub fn has_category(&self, name: &str) -> bool {
        self.default_categories.iter().any(|c| c == name)
            || self.custom_categories.iter().any(|c| c == name)
    }
}
