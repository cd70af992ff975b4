use chrono::{DateTime, Datelike, NaiveDate, Utc};
use tracing::debug;

use crate::errors::CoreError;
use crate::models::transaction::{Transaction, TransactionDraft};

/// Smallest amount a transaction may carry after rounding.
pub const MIN_TRANSACTION_AMOUNT: f64 = 0.01;

/// Round to the nearest cent (half away from zero).
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Manages the transaction log: most recent entry first, append via
/// prepend, delete by id, never edited in place.
///
/// Pure business logic — no I/O. The caller decides when to persist.
pub struct TransactionService;

impl TransactionService {
    pub fn new() -> Self {
        Self
    }

    /// Validate a draft and prepend it to the log.
    ///
    /// The new id is the creation time in epoch milliseconds, bumped past
    /// the largest existing id so ids stay strictly increasing.
    pub fn add_transaction(
        &self,
        log: &mut Vec<Transaction>,
        draft: &TransactionDraft,
        now: DateTime<Utc>,
    ) -> Result<Transaction, CoreError> {
        let date_raw = draft.date.trim();
        let category = draft.category.trim();
        let amount_raw = draft.amount.trim();

        if date_raw.is_empty() {
            return Err(CoreError::MissingField("date".into()));
        }
        if category.is_empty() {
            return Err(CoreError::MissingField("category".into()));
        }
        if amount_raw.is_empty() {
            return Err(CoreError::MissingField("amount".into()));
        }

        let date = Self::parse_date(date_raw)?;
        let amount = Self::parse_amount(amount_raw)?;

        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = match log.iter().map(|t| t.id).max() {
            Some(last) if last >= millis => last.checked_add(1).ok_or_else(|| {
                CoreError::ValidationError(format!("No transaction id left after {last}"))
            })?,
            _ => millis,
        };

        let transaction = Transaction {
            id,
            date,
            category: category.to_string(),
            amount,
            timestamp: now,
            is_dummy: false,
        };
        log.insert(0, transaction.clone());
        debug!(id, %date, category, amount, "transaction added");
        Ok(transaction)
    }

    /// Remove exactly one transaction by id and return it.
    pub fn delete_transaction(
        &self,
        log: &mut Vec<Transaction>,
        id: u64,
    ) -> Result<Transaction, CoreError> {
        let idx = log
            .iter()
            .position(|t| t.id == id)
            .ok_or(CoreError::TransactionNotFound(id))?;
        let removed = log.remove(idx);
        debug!(id, "transaction deleted");
        Ok(removed)
    }

    /// Transactions dated in the given month (1–12) and/or year.
    /// A `None` filter matches everything.
    pub fn filter_by_month_year<'a>(
        &self,
        transactions: &'a [Transaction],
        month: Option<u32>,
        year: Option<i32>,
    ) -> Vec<&'a Transaction> {
        transactions
            .iter()
            .filter(|t| month.map_or(true, |m| t.date.month() == m))
            .filter(|t| year.map_or(true, |y| t.date.year() == y))
            .collect()
    }

    /// Parse a user-typed amount. `$`, `,` and surrounding spaces are ignored.
    /// The result is rounded to cents and must be at least 0.01.
    pub fn parse_amount(raw: &str) -> Result<f64, CoreError> {
        let cleaned: String = raw
            .chars()
            .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
            .collect();
        if cleaned.is_empty() {
            return Err(CoreError::MissingField("amount".into()));
        }

        let value: f64 = cleaned
            .parse()
            .map_err(|_| CoreError::ValidationError(format!("Amount is not a number: '{raw}'")))?;
        if !value.is_finite() || value <= 0.0 {
            return Err(CoreError::ValidationError(format!(
                "Amount must be a positive number, got '{raw}'"
            )));
        }

        let rounded = round_to_cents(value);
        if rounded < MIN_TRANSACTION_AMOUNT {
            return Err(CoreError::OutOfRange {
                field: "Amount".into(),
                value,
                min: MIN_TRANSACTION_AMOUNT,
                max: f64::MAX,
            });
        }
        Ok(rounded)
    }

    /// Parse a `YYYY-MM-DD` date.
    pub fn parse_date(raw: &str) -> Result<NaiveDate, CoreError> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
            CoreError::ValidationError(format!("Date must be in YYYY-MM-DD format, got '{raw}'"))
        })
    }

    // ── Export / Import ─────────────────────────────────────────────

    /// Export transactions as a JSON array in the persisted shape.
    pub fn export_json(&self, transactions: &[Transaction]) -> Result<String, CoreError> {
        serde_json::to_string_pretty(transactions).map_err(|e| {
            CoreError::Serialization(format!("Failed to serialize transactions to JSON: {e}"))
        })
    }

    /// Export transactions as CSV.
    /// Columns: id, date, category, amount, timestamp
    pub fn export_csv(&self, transactions: &[Transaction]) -> String {
        let mut csv = String::from("id,date,category,amount,timestamp\n");
        for t in transactions {
            csv.push_str(&format!(
                "{},{},{},{:.2},{}\n",
                t.id,
                t.date,
                escape_csv(&t.category),
                t.amount,
                t.timestamp.to_rfc3339(),
            ));
        }
        csv
    }

    /// Parse and validate a JSON array of transactions.
    ///
    /// All-or-nothing: one bad record rejects the whole payload. Records must
    /// not collide with `existing` ids or with each other.
    pub fn import_json(
        &self,
        json: &str,
        existing: &[Transaction],
    ) -> Result<Vec<Transaction>, CoreError> {
        let imported: Vec<Transaction> = serde_json::from_str(json)?;
        let mut seen: std::collections::HashSet<u64> = existing.iter().map(|t| t.id).collect();

        for t in &imported {
            if t.category.trim().is_empty() {
                return Err(CoreError::MissingField(format!("category (transaction {})", t.id)));
            }
            if !t.amount.is_finite() || t.amount < MIN_TRANSACTION_AMOUNT {
                return Err(CoreError::ValidationError(format!(
                    "Transaction {} has a non-positive amount: {}",
                    t.id, t.amount
                )));
            }
            if round_to_cents(t.amount) != t.amount {
                return Err(CoreError::ValidationError(format!(
                    "Transaction {} amount is not rounded to cents: {}",
                    t.id, t.amount
                )));
            }
            if !seen.insert(t.id) {
                return Err(CoreError::ValidationError(format!(
                    "Duplicate transaction id: {}",
                    t.id
                )));
            }
        }

        Ok(imported)
    }

    /// Merge imported entries into the log, keeping newest (highest id) first.
    pub fn merge(&self, log: &mut Vec<Transaction>, imported: Vec<Transaction>) {
        log.extend(imported);
        log.sort_by(|a, b| b.id.cmp(&a.id));
    }
}

impl Default for TransactionService {
    fn default() -> Self {
        Self::new()
    }
}

/// Quote a CSV field containing commas, quotes, or newlines.
fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
