use tracing::debug;

use crate::errors::CoreError;
use crate::models::budget::BudgetData;
use crate::models::category::{Category, CategoryPreset, MAX_CATEGORIES};

/// Manages the active category list (preset defaults plus custom entries).
///
/// Pure business logic over `BudgetData`; callers persist the result.
pub struct CategoryService;

impl CategoryService {
    pub fn new() -> Self {
        Self
    }

    /// Defaults first, then customs, in stored order. A custom entry that
    /// repeats a default name is listed once.
    pub fn active_categories(&self, budget: &BudgetData) -> Vec<Category> {
        let mut categories: Vec<Category> = Vec::with_capacity(
            budget.default_categories.len() + budget.custom_categories.len(),
        );
        let defaults = budget.default_categories.iter().map(Category::default_category);
        let customs = budget.custom_categories.iter().map(Category::custom);
        for category in defaults.chain(customs) {
            if !categories.iter().any(|c| c.name == category.name) {
                categories.push(category);
            }
        }
        categories
    }

    /// Names of the active categories, in display order.
    pub fn active_names(&self, budget: &BudgetData) -> Vec<String> {
        self.active_categories(budget)
            .into_iter()
            .map(|c| c.name)
            .collect()
    }

    /// Add a custom category. Returns the stored (trimmed) name.
    ///
    /// Names are compared exactly (case-sensitive).
    pub fn add_category(&self, budget: &mut BudgetData, name: &str) -> Result<String, CoreError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(CoreError::MissingField("category name".into()));
        }

        let active = self.active_names(budget);
        if active.len() >= MAX_CATEGORIES {
            return Err(CoreError::CategoryLimit { max: MAX_CATEGORIES });
        }
        if active.iter().any(|c| c == trimmed) {
            return Err(CoreError::DuplicateCategory(trimmed.to_string()));
        }

        budget.custom_categories.push(trimmed.to_string());
        debug!(category = trimmed, total = active.len() + 1, "category added");
        Ok(trimmed.to_string())
    }

    /// Remove a category from whichever list holds it, together with its budget entry.
    pub fn remove_category(&self, budget: &mut BudgetData, name: &str) -> Result<(), CoreError> {
        if !budget.has_category(name) {
            return Err(CoreError::CategoryNotFound(name.to_string()));
        }

        budget.default_categories.retain(|c| c != name);
        budget.custom_categories.retain(|c| c != name);
        budget.budgets.remove(name);
        debug!(category = name, "category removed");
        Ok(())
    }

    /// Swap the default list for one of the fixed presets.
    ///
    /// Custom categories are kept unless the preset now provides the same
    /// name. Budget entries for categories that are no longer active are dropped.
    pub fn apply_preset(&self, budget: &mut BudgetData, preset: CategoryPreset) -> Result<(), CoreError> {
        let defaults = preset.owned_names();
        let customs: Vec<String> = budget
            .custom_categories
            .iter()
            .filter(|c| !defaults.contains(c))
            .cloned()
            .collect();

        if defaults.len() + customs.len() > MAX_CATEGORIES {
            return Err(CoreError::CategoryLimit { max: MAX_CATEGORIES });
        }

        budget.default_categories = defaults;
        budget.custom_categories = customs;
        let budgets = std::mem::take(&mut budget.budgets);
        budget.budgets = budgets
            .into_iter()
            .filter(|(category, _)| budget.has_category(category))
            .collect();
        debug!(%preset, "category preset applied");
        Ok(())
    }
}

impl Default for CategoryService {
    fn default() -> Self {
        Self::new()
    }
}
