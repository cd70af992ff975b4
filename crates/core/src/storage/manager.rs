use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::errors::CoreError;
use crate::models::budget::BudgetData;
use crate::models::settings::Settings;
use crate::models::transaction::Transaction;

use super::store::KeyValueStore;

/// Storage key for the budget ledger.
pub const BUDGET_KEY: &str = "budgetData";
/// Storage key for the transaction log.
pub const TRANSACTIONS_KEY: &str = "transactions";
/// Storage key for display settings.
pub const SETTINGS_KEY: &str = "settings";

/// Typed load/save of the persisted slices on top of a `KeyValueStore`.
///
/// Loading never fails: a missing key yields the default, and an unreadable
/// or corrupt value is logged and replaced by the default.
#[derive(Debug)]
pub struct StorageManager<S> {
    store: S,
}

impl<S: KeyValueStore> StorageManager<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    pub fn load_budget(&self) -> BudgetData {
        self.load_or_default(BUDGET_KEY)
    }

    pub fn save_budget(&mut self, budget: &BudgetData) -> Result<(), CoreError> {
        self.save(BUDGET_KEY, budget)
    }

    pub fn load_transactions(&self) -> Vec<Transaction> {
        self.load_or_default(TRANSACTIONS_KEY)
    }

    pub fn save_transactions(&mut self, transactions: &[Transaction]) -> Result<(), CoreError> {
        self.save(TRANSACTIONS_KEY, transactions)
    }

    pub fn load_settings(&self) -> Settings {
        self.load_or_default(SETTINGS_KEY)
    }

    pub fn save_settings(&mut self, settings: &Settings) -> Result<(), CoreError> {
        self.save(SETTINGS_KEY, settings)
    }

    /// Read and decode `key`, falling back to `T::default()` on any problem.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.store.get(key) {
            Ok(Some(raw)) => Self::decode(key, &raw).unwrap_or_else(|e| {
                warn!(key, error = %e, "stored value is corrupt, using defaults");
                T::default()
            }),
            Ok(None) => T::default(),
            Err(e) => {
                warn!(key, error = %e, "failed to read storage, using defaults");
                T::default()
            }
        }
    }

    /// Decode a raw stored payload for `key`.
    pub fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Result<T, CoreError> {
        serde_json::from_str(raw)
            .map_err(|e| CoreError::Deserialization(format!("Failed to decode '{key}': {e}")))
    }

    fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<(), CoreError> {
        let json = serde_json::to_string(value)
            .map_err(|e| CoreError::Serialization(format!("Failed to encode '{key}': {e}")))?;
        self.store.set(key, &json)
    }
}
