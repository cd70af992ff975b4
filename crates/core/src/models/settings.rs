use serde::{Deserialize, Serialize};

use super::category::CategoryPreset;
use super::chart::NumeralStyle;

/// User-configurable display settings, persisted under the `settings` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Which default category set is active (8, 12 or 16)
    pub category_preset: CategoryPreset,

    pub numeral_style: NumeralStyle,

    /// Categories left out of every chart
    pub hidden_categories: Vec<String>,
}

impl Settings {
    pub fn is_hidden(&self, category: &str) -> bool {
        self.hidden_categories.iter().any(|c| c == category)
    }
}
