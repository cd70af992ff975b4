use chrono::{NaiveDate, TimeZone, Utc};
use saiel_budget_core::models::aggregate::DashboardStatus;
use saiel_budget_core::models::budget::{BudgetData, CurrencyMode};
use saiel_budget_core::models::category::{Category, CategoryOrigin, CategoryPreset, MAX_CATEGORIES};
use saiel_budget_core::models::chart::{NumeralStyle, RadarChart};
use saiel_budget_core::models::sample::SampleDataset;
use saiel_budget_core::models::settings::Settings;
use saiel_budget_core::models::transaction::{Transaction, TransactionDraft};
use std::collections::HashSet;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  CategoryPreset
// ═══════════════════════════════════════════════════════════════════

mod category_preset {
    use super::*;

    #[test]
    fn sizes() {
        assert_eq!(CategoryPreset::Eight.size(), 8);
        assert_eq!(CategoryPreset::Twelve.size(), 12);
        assert_eq!(CategoryPreset::Sixteen.size(), 16);
    }

    #[test]
    fn largest_preset_fits_the_cap() {
        assert!(CategoryPreset::Sixteen.size() <= MAX_CATEGORIES);
    }

    #[test]
    fn presets_extend_each_other() {
        let eight = CategoryPreset::Eight.names();
        let twelve = CategoryPreset::Twelve.names();
        let sixteen = CategoryPreset::Sixteen.names();
        assert_eq!(&twelve[..8], eight);
        assert_eq!(&sixteen[..12], twelve);
    }

    #[test]
    fn names_are_unique() {
        let names: HashSet<&str> = CategoryPreset::Sixteen.names().iter().copied().collect();
        assert_eq!(names.len(), 16);
    }

    #[test]
    fn eight_starts_with_housing_and_ends_with_lifestyle() {
        let names = CategoryPreset::Eight.names();
        assert_eq!(names.first(), Some(&"Housing"));
        assert_eq!(names.last(), Some(&"Lifestyle"));
    }

    #[test]
    fn from_size() {
        assert_eq!(CategoryPreset::from_size(8), Some(CategoryPreset::Eight));
        assert_eq!(CategoryPreset::from_size(12), Some(CategoryPreset::Twelve));
        assert_eq!(CategoryPreset::from_size(16), Some(CategoryPreset::Sixteen));
        assert_eq!(CategoryPreset::from_size(10), None);
    }

    #[test]
    fn default_is_eight() {
        assert_eq!(CategoryPreset::default(), CategoryPreset::Eight);
    }

    #[test]
    fn display() {
        assert_eq!(CategoryPreset::Twelve.to_string(), "12 categories");
    }

    #[test]
    fn serde_lowercase() {
        let json = serde_json::to_string(&CategoryPreset::Sixteen).unwrap();
        assert_eq!(json, "\"sixteen\"");
        let back: CategoryPreset = serde_json::from_str("\"twelve\"").unwrap();
        assert_eq!(back, CategoryPreset::Twelve);
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Category
// ═══════════════════════════════════════════════════════════════════

mod category {
    use super::*;

    #[test]
    fn constructors_set_origin() {
        assert_eq!(Category::default_category("Housing").origin, CategoryOrigin::Default);
        assert_eq!(Category::custom("Boat").origin, CategoryOrigin::Custom);
        assert!(Category::custom("Boat").is_custom());
        assert!(!Category::default_category("Housing").is_custom());
    }

    #[test]
    fn display_is_name() {
        assert_eq!(Category::custom("Coffee").to_string(), "Coffee");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  BudgetData
// ═══════════════════════════════════════════════════════════════════

mod budget_data {
    use super::*;

    #[test]
    fn default_uses_eight_preset() {
        let b = BudgetData::default();
        assert_eq!(b.default_categories, CategoryPreset::Eight.owned_names());
        assert!(b.custom_categories.is_empty());
        assert!(b.budgets.is_empty());
        assert_eq!(b.monthly_income, 0.0);
        assert_eq!(b.currency_mode, CurrencyMode::Dollars);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut b = BudgetData::default();
        b.budgets.insert("Housing".into(), 900.0);
        b.monthly_income = 3000.0;
        let value = serde_json::to_value(&b).unwrap();

        assert!(value.get("defaultCategories").is_some());
        assert!(value.get("customCategories").is_some());
        assert_eq!(value["budgets"]["Housing"], 900.0);
        assert_eq!(value["monthlyIncome"], 3000.0);
        assert_eq!(value["currencyMode"], "dollars");
    }

    #[test]
    fn deserializes_persisted_shape() {
        let json = r#"{
            "defaultCategories": ["Housing", "Utilities"],
            "customCategories": ["Boat"],
            "budgets": {"Housing": 40, "Boat": 10},
            "monthlyIncome": 5000,
            "currencyMode": "percentage"
        }"#;
        let b: BudgetData = serde_json::from_str(json).unwrap();
        assert_eq!(b.default_categories, vec!["Housing", "Utilities"]);
        assert_eq!(b.custom_categories, vec!["Boat"]);
        assert_eq!(b.budget_for("Housing"), 40.0);
        assert_eq!(b.monthly_income, 5000.0);
        assert_eq!(b.currency_mode, CurrencyMode::Percentage);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let b: BudgetData = serde_json::from_str(r#"{"monthlyIncome": 1200}"#).unwrap();
        assert_eq!(b.monthly_income, 1200.0);
        assert_eq!(b.default_categories.len(), 8);
        assert_eq!(b.currency_mode, CurrencyMode::Dollars);
    }

    #[test]
    fn budget_for_unset_is_zero() {
        assert_eq!(BudgetData::default().budget_for("Housing"), 0.0);
    }

    #[test]
    fn has_category_checks_both_lists() {
        let mut b = BudgetData::default();
        b.custom_categories.push("Boat".into());
        assert!(b.has_category("Housing"));
        assert!(b.has_category("Boat"));
        assert!(!b.has_category("housing"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  CurrencyMode
// ═══════════════════════════════════════════════════════════════════

mod currency_mode {
    use super::*;

    #[test]
    fn toggled_flips() {
        assert_eq!(CurrencyMode::Dollars.toggled(), CurrencyMode::Percentage);
        assert_eq!(CurrencyMode::Percentage.toggled(), CurrencyMode::Dollars);
    }

    #[test]
    fn display() {
        assert_eq!(CurrencyMode::Dollars.to_string(), "dollars");
        assert_eq!(CurrencyMode::Percentage.to_string(), "percentage");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Transaction
// ═══════════════════════════════════════════════════════════════════

mod transaction {
    use super::*;

    fn sample() -> Transaction {
        Transaction {
            id: 1_705_312_800_000,
            date: d(2024, 1, 15),
            category: "Housing".into(),
            amount: 900.0,
            timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap(),
            is_dummy: false,
        }
    }

    #[test]
    fn serializes_persisted_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["id"], 1_705_312_800_000u64);
        assert_eq!(value["date"], "2024-01-15");
        assert_eq!(value["category"], "Housing");
        assert_eq!(value["amount"], 900.0);
        assert!(value["timestamp"].as_str().unwrap().starts_with("2024-01-15T10:00:00"));
    }

    #[test]
    fn is_dummy_omitted_when_false() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.get("isDummy").is_none());
    }

    #[test]
    fn is_dummy_written_when_true() {
        let mut t = sample();
        t.is_dummy = true;
        let value = serde_json::to_value(t).unwrap();
        assert_eq!(value["isDummy"], true);
    }

    #[test]
    fn parses_browser_iso_timestamp() {
        let json = r#"{"id": 1705312800000, "date": "2024-01-15", "category": "Housing",
                       "amount": 900, "timestamp": "2024-01-15T10:00:00.000Z"}"#;
        let t: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(t, sample());
    }

    #[test]
    fn rejects_malformed_date() {
        let json = r#"{"id": 1, "date": "15/01/2024", "category": "Housing",
                       "amount": 900, "timestamp": "2024-01-15T10:00:00Z"}"#;
        assert!(serde_json::from_str::<Transaction>(json).is_err());
    }

    #[test]
    fn draft_new() {
        let draft = TransactionDraft::new("2024-01-15", "Housing", "900");
        assert_eq!(draft.date, "2024-01-15");
        assert_eq!(draft.category, "Housing");
        assert_eq!(draft.amount, "900");
        assert_eq!(TransactionDraft::default().amount, "");
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Settings
// ═══════════════════════════════════════════════════════════════════

mod settings {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.category_preset, CategoryPreset::Eight);
        assert_eq!(s.numeral_style, NumeralStyle::Legacy);
        assert!(s.hidden_categories.is_empty());
    }

    #[test]
    fn serde_roundtrip_and_shape() {
        let s = Settings {
            category_preset: CategoryPreset::Twelve,
            numeral_style: NumeralStyle::Standard,
            hidden_categories: vec!["Debt".into()],
        };
        let value = serde_json::to_value(&s).unwrap();
        assert_eq!(value["categoryPreset"], "twelve");
        assert_eq!(value["numeralStyle"], "standard");
        assert_eq!(value["hiddenCategories"][0], "Debt");

        let back: Settings = serde_json::from_value(value).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn empty_object_is_default() {
        let s: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn is_hidden() {
        let s = Settings {
            hidden_categories: vec!["Debt".into()],
            ..Settings::default()
        };
        assert!(s.is_hidden("Debt"));
        assert!(!s.is_hidden("Housing"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Derived values
// ═══════════════════════════════════════════════════════════════════

mod derived {
    use super::*;

    #[test]
    fn sample_dataset_total_spent() {
        let dataset = SampleDataset {
            categories: vec!["Housing".into(), "Dining".into()],
            budget_percentages: vec![60.0, 40.0],
            spending_percentages: vec![100.0, 50.0],
            transaction_percentages: vec![60.0, 20.0],
        };
        assert!((dataset.total_spent(3000.0) - 2400.0).abs() < 1e-9);
        assert!((dataset.remaining(3000.0) - 600.0).abs() < 1e-9);
    }

    #[test]
    fn dashboard_status_ready() {
        assert!(DashboardStatus::Ready.is_ready());
        assert!(!DashboardStatus::NeedsBudget { configured: 2, required: 6 }.is_ready());
        assert!(!DashboardStatus::NeedsTransactions { recorded: 0, required: 6 }.is_ready());
    }

    #[test]
    fn radar_chart_is_empty() {
        let chart = RadarChart {
            points: Vec::new(),
            axis_max: 10.0,
            gridlines: vec![2.0, 4.0, 6.0, 8.0, 10.0],
        };
        assert!(chart.is_empty());
    }
}
