use serde::{Deserialize, Serialize};

/// Synthetic budget/spending split used to demo the home page chart.
///
/// All vectors are parallel to `categories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleDataset {
    pub categories: Vec<String>,

    /// Share of income budgeted per category; sums to exactly 100
    pub budget_percentages: Vec<f64>,

    /// Share of each category's budget actually spent (may exceed 100)
    pub spending_percentages: Vec<f64>,

    /// Share of income actually spent per category (budget × spending)
    pub transaction_percentages: Vec<f64>,
}

impl SampleDataset {
    /// Money spent across all categories for a given income.
    pub fn total_spent(&self, income: f64) -> f64 {
        let income = income.abs();
        self.transaction_percentages
            .iter()
            .map(|p| income * p / 100.0)
            .sum()
    }

    /// Income minus `total_spent`. Can go negative when the sample overspends.
    pub fn remaining(&self, income: f64) -> f64 {
        income.abs() - self.total_spent(income)
    }
}
