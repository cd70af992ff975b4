use serde::{Deserialize, Serialize};

/// Hard cap on the number of active categories (defaults + custom).
pub const MAX_CATEGORIES: usize = 16;

const EIGHT: [&str; 8] = [
    "Housing",
    "Utilities",
    "Groceries",
    "Dining",
    "Transport",
    "Savings",
    "Debt",
    "Lifestyle",
];

const TWELVE: [&str; 12] = [
    "Housing",
    "Utilities",
    "Groceries",
    "Dining",
    "Transport",
    "Savings",
    "Debt",
    "Lifestyle",
    "Healthcare",
    "Education",
    "Insurance",
    "Entertainment",
];

const SIXTEEN: [&str; 16] = [
    "Housing",
    "Utilities",
    "Groceries",
    "Dining",
    "Transport",
    "Savings",
    "Debt",
    "Lifestyle",
    "Healthcare",
    "Education",
    "Insurance",
    "Entertainment",
    "Pets",
    "Gifts",
    "Travel",
    "Miscellaneous",
];

/// Where a category came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryOrigin {
    /// Part of the selected preset
    Default,
    /// Added by the user
    Custom,
}

/// A named spending bucket (e.g. "Housing").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub origin: CategoryOrigin,
}

impl Category {
    pub fn default_category(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: CategoryOrigin::Default,
        }
    }

    pub fn custom(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            origin: CategoryOrigin::Custom,
        }
    }

    pub fn is_custom(&self) -> bool {
        self.origin == CategoryOrigin::Custom
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The fixed-size default category sets the user can toggle between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryPreset {
    #[default]
    Eight,
    Twelve,
    Sixteen,
}

impl CategoryPreset {
    pub const ALL: [CategoryPreset; 3] = [
        CategoryPreset::Eight,
        CategoryPreset::Twelve,
        CategoryPreset::Sixteen,
    ];

    /// Number of categories in the preset.
    pub fn size(self) -> usize {
        self.names().len()
    }

    /// Category names in display order.
    pub fn names(self) -> &'static [&'static str] {
        match self {
            CategoryPreset::Eight => &EIGHT,
            CategoryPreset::Twelve => &TWELVE,
            CategoryPreset::Sixteen => &SIXTEEN,
        }
    }

    /// Preset names as owned strings, ready to store in `BudgetData`.
    pub fn owned_names(self) -> Vec<String> {
        self.names().iter().map(|n| (*n).to_string()).collect()
    }

    /// Look up a preset by its size (8, 12 or 16).
    pub fn from_size(size: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.size() == size)
    }
}

impl std::fmt::Display for CategoryPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} categories", self.size())
    }
}
