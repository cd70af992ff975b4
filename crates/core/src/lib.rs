pub mod errors;
pub mod logging;
pub mod models;
pub mod services;
pub mod storage;

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use errors::CoreError;
use models::{
    aggregate::{BudgetComparison, CategoryAggregate, DashboardStatus, SpendingSummary},
    budget::{BudgetData, CurrencyMode},
    category::{Category, CategoryPreset},
    chart::{ComparisonChart, NumeralStyle, RadarChart},
    sample::SampleDataset,
    settings::Settings,
    snapshot::BudgetSnapshot,
    transaction::{Transaction, TransactionDraft},
};
use services::{
    aggregate_service::AggregateService,
    budget_service::BudgetService,
    category_service::CategoryService,
    chart_service::ChartService,
    sample_data_service::{random_seed, SampleDataService, SampleRng},
    transaction_service::TransactionService,
};
use storage::{
    backup,
    encryption::KdfParams,
    manager::{StorageManager, BUDGET_KEY, SETTINGS_KEY, TRANSACTIONS_KEY},
    store::{KeyValueStore, StorageEvent},
};

pub use logging::init_tracing;

/// Seed used for sample data when the platform cannot supply entropy.
const FALLBACK_SAMPLE_SEED: u64 = 0x5A1E_1B0D;

/// Main entry point for the budget core library.
///
/// Owns the budget ledger, the transaction log and the display settings,
/// mirrored to a `KeyValueStore`. Every mutation is validated on a copy,
/// written through to the store, and only then committed in memory, so a
/// rejected or failed call changes nothing.
#[must_use]
pub struct BudgetTracker<S: KeyValueStore> {
    storage: StorageManager<S>,
    budget: BudgetData,
    transactions: Vec<Transaction>,
    settings: Settings,
    /// Fixed per tracker so sample data stays stable between renders.
    sample_seed: u64,
    category_service: CategoryService,
    budget_service: BudgetService,
    transaction_service: TransactionService,
    aggregate_service: AggregateService,
    chart_service: ChartService,
    sample_data_service: SampleDataService,
}

impl<S: KeyValueStore> std::fmt::Debug for BudgetTracker<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BudgetTracker")
            .field("categories", &self.category_service.active_names(&self.budget).len())
            .field("budgets", &self.budget.budgets.len())
            .field("currency_mode", &self.budget.currency_mode)
            .field("transactions", &self.transactions.len())
            .field("settings", &self.settings)
            .finish()
    }
}

impl<S: KeyValueStore> BudgetTracker<S> {
    /// Load state from `store` (defaults for anything missing or corrupt).
    pub fn open(store: S) -> Self {
        let seed = random_seed().unwrap_or_else(|e| {
            warn!(error = %e, "no entropy for sample data, using fixed seed");
            FALLBACK_SAMPLE_SEED
        });
        Self::open_with_seed(store, seed)
    }

    /// Like `open`, with a fixed seed for the generated sample data.
    pub fn open_with_seed(store: S, sample_seed: u64) -> Self {
        let storage = StorageManager::new(store);
        let budget = storage.load_budget();
        let transactions = storage.load_transactions();
        let settings = storage.load_settings();
        debug!(
            transactions = transactions.len(),
            budgets = budget.budgets.len(),
            "budget tracker opened"
        );

        Self {
            storage,
            budget,
            transactions,
            settings,
            sample_seed,
            category_service: CategoryService::new(),
            budget_service: BudgetService::new(),
            transaction_service: TransactionService::new(),
            aggregate_service: AggregateService::new(),
            chart_service: ChartService::new(),
            sample_data_service: SampleDataService::new(),
        }
    }

    pub fn store(&self) -> &S {
        self.storage.store()
    }

    pub fn store_mut(&mut self) -> &mut S {
        self.storage.store_mut()
    }

    pub fn into_store(self) -> S {
        self.storage.into_inner()
    }

    // ── Categories ──────────────────────────────────────────────────

    /// Active categories: preset defaults, then custom ones.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        self.category_service.active_categories(&self.budget)
    }

    #[must_use]
    pub fn category_names(&self) -> Vec<String> {
        self.category_service.active_names(&self.budget)
    }

    /// Add a custom category. Returns the stored (trimmed) name.
    pub fn add_category(&mut self, name: &str) -> Result<String, CoreError> {
        let mut next = self.budget.clone();
        let added = self.category_service.add_category(&mut next, name)?;
        self.commit_budget(next)?;
        Ok(added)
    }

    /// Remove a category, its budget entry, and its hidden flag.
    pub fn remove_category(&mut self, name: &str) -> Result<(), CoreError> {
        let mut next = self.budget.clone();
        self.category_service.remove_category(&mut next, name)?;

        let settings = self.settings.is_hidden(name).then(|| {
            let mut settings = self.settings.clone();
            settings.hidden_categories.retain(|c| c != name);
            settings
        });
        self.commit_all(Pending {
            budget: Some(next),
            transactions: None,
            settings,
        })
    }

    /// Switch to the 8, 12 or 16 category preset. Every category becomes
    /// visible again.
    pub fn apply_preset(&mut self, preset: CategoryPreset) -> Result<(), CoreError> {
        let mut next = self.budget.clone();
        self.category_service.apply_preset(&mut next, preset)?;

        let mut settings = self.settings.clone();
        settings.category_preset = preset;
        settings.hidden_categories.clear();
        self.commit_all(Pending {
            budget: Some(next),
            transactions: None,
            settings: Some(settings),
        })
    }

    #[must_use]
    pub fn category_preset(&self) -> CategoryPreset {
        self.settings.category_preset
    }

    // ── Budget Ledger ───────────────────────────────────────────────

    #[must_use]
    pub fn budget(&self) -> &BudgetData {
        &self.budget
    }

    pub fn set_budget(&mut self, category: &str, amount: f64) -> Result<(), CoreError> {
        let mut next = self.budget.clone();
        self.budget_service.set_budget(&mut next, category, amount)?;
        self.commit_budget(next)
    }

    /// Remove one budget entry. Returns the old value, if there was one.
    pub fn clear_budget(&mut self, category: &str) -> Result<Option<f64>, CoreError> {
        let mut next = self.budget.clone();
        let removed = self.budget_service.clear_budget(&mut next, category);
        if removed.is_some() {
            self.commit_budget(next)?;
        }
        Ok(removed)
    }

    pub fn set_income(&mut self, amount: f64) -> Result<(), CoreError> {
        let mut next = self.budget.clone();
        self.budget_service.set_income(&mut next, amount)?;
        self.commit_budget(next)
    }

    #[must_use]
    pub fn monthly_income(&self) -> f64 {
        self.budget.monthly_income
    }

    #[must_use]
    pub fn currency_mode(&self) -> CurrencyMode {
        self.budget.currency_mode
    }

    /// Flip dollars ↔ percentage. Clears every budget entry.
    pub fn toggle_currency_mode(&mut self) -> Result<CurrencyMode, CoreError> {
        let mut next = self.budget.clone();
        let mode = self.budget_service.toggle_currency_mode(&mut next);
        self.commit_budget(next)?;
        Ok(mode)
    }

    #[must_use]
    pub fn total_allocated(&self) -> f64 {
        self.budget_service.total_allocated(&self.budget)
    }

    #[must_use]
    pub fn remaining_allocation(&self) -> f64 {
        self.budget_service.remaining_allocation(&self.budget)
    }

    // ── Transaction Log ─────────────────────────────────────────────

    /// Record a transaction stamped with the current time.
    pub fn add_transaction(&mut self, draft: &TransactionDraft) -> Result<Transaction, CoreError> {
        self.add_transaction_at(draft, Utc::now())
    }

    /// Record a transaction stamped with `now`.
    pub fn add_transaction_at(
        &mut self,
        draft: &TransactionDraft,
        now: DateTime<Utc>,
    ) -> Result<Transaction, CoreError> {
        let mut next = self.transactions.clone();
        let added = self.transaction_service.add_transaction(&mut next, draft, now)?;
        self.commit_transactions(next)?;
        Ok(added)
    }

    pub fn delete_transaction(&mut self, id: u64) -> Result<Transaction, CoreError> {
        let mut next = self.transactions.clone();
        let removed = self.transaction_service.delete_transaction(&mut next, id)?;
        self.commit_transactions(next)?;
        Ok(removed)
    }

    /// Real transactions, most recent first.
    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Sample data stands in until the first real transaction exists.
    #[must_use]
    pub fn is_showing_sample_data(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Generated sample transactions for the current income.
    #[must_use]
    pub fn sample_transactions(&self) -> Vec<Transaction> {
        let mut rng = SampleRng::from_seed(self.sample_seed);
        self.sample_data_service
            .sample_transactions(self.budget.monthly_income, &mut rng)
    }

    /// What the transaction list shows (sample data while the log is empty),
    /// filtered by month (1–12) and/or year.
    #[must_use]
    pub fn displayed_transactions(&self, month: Option<u32>, year: Option<i32>) -> Vec<Transaction> {
        let source = self.source_transactions();
        self.transaction_service
            .filter_by_month_year(&source, month, year)
            .into_iter()
            .cloned()
            .collect()
    }

    // ── Aggregates ──────────────────────────────────────────────────

    #[must_use]
    pub fn transactions_by_category(&self) -> Vec<CategoryAggregate> {
        self.aggregate_service
            .aggregate_by_category(&self.source_transactions())
    }

    #[must_use]
    pub fn spending_summary(&self) -> SpendingSummary {
        self.aggregate_service
            .summarize(&self.source_transactions(), self.budget.monthly_income)
    }

    /// Budget vs. actual, from real transactions only.
    #[must_use]
    pub fn budget_comparison(&self) -> Vec<BudgetComparison> {
        self.aggregate_service
            .compare_budget(&self.budget, &self.transactions)
    }

    #[must_use]
    pub fn dashboard_status(&self) -> DashboardStatus {
        self.aggregate_service
            .dashboard_status(&self.budget, &self.transactions)
    }

    // ── Charts ──────────────────────────────────────────────────────

    /// Spending per category (sample data while the log is empty).
    #[must_use]
    pub fn spending_chart(&self) -> RadarChart {
        let entries: Vec<(String, f64)> = self
            .transactions_by_category()
            .into_iter()
            .map(|a| (a.category, a.amount))
            .collect();
        self.chart_service.radar_chart(
            &entries,
            &self.settings.hidden_categories,
            self.settings.numeral_style,
        )
    }

    /// Budget per active category; unset entries plot at 0.
    #[must_use]
    pub fn budget_chart(&self) -> RadarChart {
        self.chart_service.radar_chart(
            &self.budget_entries(),
            &self.settings.hidden_categories,
            self.settings.numeral_style,
        )
    }

    /// Budget shares overlaid with spending shares.
    #[must_use]
    pub fn comparison_chart(&self) -> ComparisonChart {
        let spending: Vec<(String, f64)> = self
            .transactions_by_category()
            .into_iter()
            .map(|a| (a.category, a.amount))
            .collect();
        self.chart_service.comparison_chart(
            &self.budget_entries(),
            &spending,
            &self.settings.hidden_categories,
            self.settings.numeral_style,
        )
    }

    /// Show or hide a category on every chart. Returns `true` if it is now hidden.
    pub fn toggle_category_visibility(&mut self, category: &str) -> Result<bool, CoreError> {
        let category = category.trim();
        if category.is_empty() {
            return Err(CoreError::MissingField("category".into()));
        }

        let mut settings = self.settings.clone();
        let now_hidden = if settings.is_hidden(category) {
            settings.hidden_categories.retain(|c| c != category);
            false
        } else {
            settings.hidden_categories.push(category.to_string());
            true
        };
        self.commit_settings(settings)?;
        Ok(now_hidden)
    }

    #[must_use]
    pub fn hidden_categories(&self) -> &[String] {
        &self.settings.hidden_categories
    }

    pub fn set_numeral_style(&mut self, style: NumeralStyle) -> Result<(), CoreError> {
        let mut settings = self.settings.clone();
        settings.numeral_style = style;
        self.commit_settings(settings)
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Demo budget/spending split over the active categories.
    #[must_use]
    pub fn sample_dataset(&self) -> SampleDataset {
        let mut rng = SampleRng::from_seed(self.sample_seed);
        self.sample_data_service
            .sample_dataset(&self.category_names(), &mut rng)
    }

    // ── Export / Import ─────────────────────────────────────────────

    pub fn export_transactions_json(&self) -> Result<String, CoreError> {
        self.transaction_service.export_json(&self.transactions)
    }

    #[must_use]
    pub fn export_transactions_csv(&self) -> String {
        self.transaction_service.export_csv(&self.transactions)
    }

    /// Merge transactions from a JSON array. All-or-nothing.
    /// Returns the number of transactions imported.
    pub fn import_transactions_json(&mut self, json: &str) -> Result<usize, CoreError> {
        let imported = self.transaction_service.import_json(json, &self.transactions)?;
        let count = imported.len();
        let mut next = self.transactions.clone();
        self.transaction_service.merge(&mut next, imported);
        self.commit_transactions(next)?;
        Ok(count)
    }

    /// Everything the tracker persists, as one value.
    #[must_use]
    pub fn snapshot(&self) -> BudgetSnapshot {
        BudgetSnapshot {
            budget: self.budget.clone(),
            transactions: self.transactions.clone(),
            settings: self.settings.clone(),
            exported_at: Utc::now(),
        }
    }

    /// Encrypt the full state into portable backup bytes.
    pub fn export_backup(&self, password: &str) -> Result<Vec<u8>, CoreError> {
        backup::export_backup(&self.snapshot(), password)
    }

    pub fn export_backup_with(&self, password: &str, params: KdfParams) -> Result<Vec<u8>, CoreError> {
        backup::export_backup_with(&self.snapshot(), password, params)
    }

    /// Replace all state with the contents of a backup and write it through.
    pub fn restore_backup(&mut self, data: &[u8], password: &str) -> Result<(), CoreError> {
        let snapshot = backup::import_backup(data, password)?;
        self.commit_all(Pending {
            budget: Some(snapshot.budget),
            transactions: Some(snapshot.transactions),
            settings: Some(snapshot.settings),
        })?;
        debug!(exported_at = %snapshot.exported_at, "backup restored");
        Ok(())
    }

    // ── Store Synchronisation ───────────────────────────────────────

    /// Adopt a change made by another writer of the same store.
    ///
    /// Returns `true` when a slice of state was replaced. Unknown keys and
    /// payloads that fail to decode are ignored.
    pub fn apply_storage_event(&mut self, event: &StorageEvent) -> bool {
        let key = event.key.as_str();
        let raw = event.new_value.as_deref();
        match key {
            BUDGET_KEY => Self::adopt(key, raw, &mut self.budget),
            TRANSACTIONS_KEY => Self::adopt(key, raw, &mut self.transactions),
            SETTINGS_KEY => Self::adopt(key, raw, &mut self.settings),
            _ => false,
        }
    }

    /// Re-read every slice from the store.
    pub fn reload(&mut self) {
        self.budget = self.storage.load_budget();
        self.transactions = self.storage.load_transactions();
        self.settings = self.storage.load_settings();
    }

    // ── Internal ────────────────────────────────────────────────────

    fn source_transactions(&self) -> Cow<'_, [Transaction]> {
        if self.is_showing_sample_data() {
            Cow::Owned(self.sample_transactions())
        } else {
            Cow::Borrowed(&self.transactions)
        }
    }

    fn budget_entries(&self) -> Vec<(String, f64)> {
        self.category_names()
            .into_iter()
            .map(|c| {
                let amount = self.budget_service.allocated_dollars(&self.budget, &c);
                (c, amount)
            })
            .collect()
    }

    fn adopt<T: serde::de::DeserializeOwned + Default>(
        key: &str,
        raw: Option<&str>,
        slot: &mut T,
    ) -> bool {
        let Some(raw) = raw else {
            *slot = T::default();
            return true;
        };
        match StorageManager::<S>::decode(key, raw) {
            Ok(value) => {
                *slot = value;
                true
            }
            Err(e) => {
                warn!(key, error = %e, "ignoring unreadable storage event");
                false
            }
        }
    }

    fn commit_budget(&mut self, next: BudgetData) -> Result<(), CoreError> {
        self.storage.save_budget(&next)?;
        self.budget = next;
        Ok(())
    }

    fn commit_transactions(&mut self, next: Vec<Transaction>) -> Result<(), CoreError> {
        self.storage.save_transactions(&next)?;
        self.transactions = next;
        Ok(())
    }

    fn commit_settings(&mut self, next: Settings) -> Result<(), CoreError> {
        self.storage.save_settings(&next)?;
        self.settings = next;
        Ok(())
    }

    /// Write several slices through, then commit them together.
    /// If a later write fails, the slices already written are restored
    /// from the in-memory state, which has not changed yet.
    fn commit_all(&mut self, next: Pending) -> Result<(), CoreError> {
        let mut written = Vec::new();
        if let Err(e) = self.write_pending(&next, &mut written) {
            self.roll_back(&written);
            return Err(e);
        }

        if let Some(budget) = next.budget {
            self.budget = budget;
        }
        if let Some(transactions) = next.transactions {
            self.transactions = transactions;
        }
        if let Some(settings) = next.settings {
            self.settings = settings;
        }
        Ok(())
    }

    fn write_pending(
        &mut self,
        next: &Pending,
        written: &mut Vec<&'static str>,
    ) -> Result<(), CoreError> {
        if let Some(budget) = &next.budget {
            self.storage.save_budget(budget)?;
            written.push(BUDGET_KEY);
        }
        if let Some(transactions) = &next.transactions {
            self.storage.save_transactions(transactions)?;
            written.push(TRANSACTIONS_KEY);
        }
        if let Some(settings) = &next.settings {
            self.storage.save_settings(settings)?;
            written.push(SETTINGS_KEY);
        }
        Ok(())
    }

    fn roll_back(&mut self, written: &[&'static str]) {
        for &key in written {
            let restored = match key {
                BUDGET_KEY => self.storage.save_budget(&self.budget),
                TRANSACTIONS_KEY => self.storage.save_transactions(&self.transactions),
                _ => self.storage.save_settings(&self.settings),
            };
            if let Err(e) = restored {
                warn!(key, error = %e, "rollback failed, store and memory differ");
            }
        }
    }
}

/// Slices to write through in one `commit_all`; `None` leaves a slice alone.
struct Pending {
    budget: Option<BudgetData>,
    transactions: Option<Vec<Transaction>>,
    settings: Option<Settings>,
}
