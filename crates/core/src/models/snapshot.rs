use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::budget::BudgetData;
use super::settings::Settings;
use super::transaction::Transaction;

/// Everything the tracker persists, bundled for an encrypted backup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSnapshot {
    pub budget: BudgetData,
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub settings: Settings,
    pub exported_at: DateTime<Utc>,
}
