use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

/// A single recorded spending event.
///
/// Transactions are never edited in place: they are created from a
/// `TransactionDraft` and deleted by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Creation time in epoch milliseconds, bumped to stay strictly increasing
    pub id: u64,

    /// Day the money was spent (`YYYY-MM-DD` on the wire)
    pub date: NaiveDate,

    pub category: String,

    /// Always positive and rounded to cents
    pub amount: f64,

    /// When the entry was recorded
    pub timestamp: DateTime<Utc>,

    /// Set on generated sample entries only
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_dummy: bool,
}

/// Raw form input for a new transaction. All three fields are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionDraft {
    pub date: String,
    pub category: String,
    pub amount: String,
}

impl TransactionDraft {
    pub fn new(
        date: impl Into<String>,
        category: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            category: category.into(),
            amount: amount.into(),
        }
    }
}
