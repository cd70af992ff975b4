use chrono::{NaiveDate, NaiveTime};
use tracing::debug;

use crate::errors::CoreError;
use crate::models::sample::SampleDataset;
use crate::models::transaction::Transaction;
use crate::services::transaction_service::{round_to_cents, MIN_TRANSACTION_AMOUNT};

/// Income assumed for sample transactions when none is configured.
pub const FALLBACK_INCOME: f64 = 3000.0;

/// Sample budget ranges (percent of income), based on common planning guidelines.
const BUDGET_RANGES: [(&str, f64, f64); 16] = [
    ("Housing", 25.0, 35.0),
    ("Utilities", 5.0, 10.0),
    ("Groceries", 10.0, 15.0),
    ("Dining", 3.0, 8.0),
    ("Transport", 10.0, 20.0),
    ("Savings", 10.0, 20.0),
    ("Debt", 0.0, 15.0),
    ("Lifestyle", 5.0, 12.0),
    ("Healthcare", 5.0, 12.0),
    ("Education", 0.0, 10.0),
    ("Insurance", 3.0, 8.0),
    ("Entertainment", 3.0, 8.0),
    ("Pets", 1.0, 5.0),
    ("Gifts", 1.0, 5.0),
    ("Travel", 2.0, 10.0),
    ("Miscellaneous", 2.0, 8.0),
];
const UNKNOWN_BUDGET_RANGE: (f64, f64) = (1.0, 8.0);

/// Large monthly bills: one entry each.
const FIXED_BILLS: [(&str, f64, u32); 3] = [
    ("Housing", 0.30, 15),
    ("Utilities", 0.08, 10),
    ("Transportation", 0.16, 12),
];

/// Everyday spending: (category, share of income, number of entries).
const SPLIT_SPENDING: [(&str, f64, usize); 7] = [
    ("Food", 0.12, 8),
    ("Entertainment", 0.06, 6),
    ("Shopping", 0.05, 6),
    ("Healthcare", 0.03, 4),
    ("Education", 0.02, 3),
    ("Personal Care", 0.015, 2),
    ("Gifts", 0.01, 2),
];

/// Entries in a split category vary by up to ±15 % around their average.
const VARIATION: f64 = 0.30;

const SAMPLE_YEAR: i32 = 2024;
const SAMPLE_MONTH: u32 = 1;

/// Small seedable pseudo-random generator (SplitMix64).
///
/// Sample data only needs to look plausible, and a fixed seed makes it
/// reproducible in tests and stable across re-renders.
#[derive(Debug, Clone)]
pub struct SampleRng {
    state: u64,
}

impl SampleRng {
    pub fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed from the platform's secure random source.
    pub fn from_entropy() -> Result<Self, CoreError> {
        Ok(Self::from_seed(random_seed()?))
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[min, max)`.
    pub fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Uniform integer in `[min, max]`.
    pub fn range_inclusive(&mut self, min: u64, max: u64) -> u64 {
        if max <= min {
            return min;
        }
        min + self.next_u64() % (max - min + 1)
    }
}

/// A fresh seed from `getrandom`.
pub fn random_seed() -> Result<u64, CoreError> {
    let mut bytes = [0u8; 8];
    getrandom::getrandom(&mut bytes)
        .map_err(|e| CoreError::Entropy(format!("Failed to generate random seed: {e}")))?;
    Ok(u64::from_le_bytes(bytes))
}

/// Generates placeholder data shown while the user has no real transactions.
pub struct SampleDataService;

impl SampleDataService {
    pub fn new() -> Self {
        Self
    }

    /// A month of plausible transactions scaled to `income`
    /// (3000 when income is 0), newest date first.
    pub fn sample_transactions(&self, income: f64, rng: &mut SampleRng) -> Vec<Transaction> {
        let income = if income > 0.0 { income } else { FALLBACK_INCOME };
        let mut transactions = Vec::new();
        let mut next_id = 1u64;

        for (category, share, day) in FIXED_BILLS {
            transactions.push(sample_entry(next_id, category, round_to_cents(income * share), day));
            next_id += 1;
        }

        for (category, share, count) in SPLIT_SPENDING {
            let average = income * share / count as f64;
            for _ in 0..count {
                let variation = (rng.next_f64() - 0.5) * VARIATION;
                let amount = round_to_cents(average * (1.0 + variation)).max(MIN_TRANSACTION_AMOUNT);
                let day = rng.range_inclusive(1, 28) as u32;
                transactions.push(sample_entry(next_id, category, amount, day));
                next_id += 1;
            }
        }

        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        debug!(count = transactions.len(), income, "sample transactions generated");
        transactions
    }

    /// Random budget split across `categories` that sums to exactly 100.
    ///
    /// Works in whole tenths of a percent: the first N−1 values are drawn
    /// from each category's range (capped so the remaining categories can
    /// still reach their minimum) and the last one takes the remainder.
    pub fn budget_split(&self, categories: &[String], rng: &mut SampleRng) -> Vec<f64> {
        const TOTAL_TENTHS: i64 = 1000;

        let ranges: Vec<(i64, i64)> = categories
            .iter()
            .map(|c| {
                let (min, max) = budget_range(c);
                ((min * 10.0).round() as i64, (max * 10.0).round() as i64)
            })
            .collect();

        let Some(last) = ranges.len().checked_sub(1) else {
            return Vec::new();
        };

        let mut tenths = Vec::with_capacity(ranges.len());
        let mut used = 0i64;
        for (idx, (min, max)) in ranges.iter().enumerate().take(last) {
            let reserved: i64 = ranges[idx + 1..].iter().map(|(m, _)| m).sum();
            let cap = (TOTAL_TENTHS - used - reserved).max(0);
            let drawn = rng.range_inclusive(*min as u64, *max as u64) as i64;
            let value = drawn.min(cap);
            used += value;
            tenths.push(value);
        }
        tenths.push(TOTAL_TENTHS - used);

        tenths.into_iter().map(|t| t as f64 / 10.0).collect()
    }

    /// Budget split plus randomized spending for the home page demo chart.
    ///
    /// Spending is a share of each category's budget: 80–140 % on even
    /// positions, 60–120 % on odd ones.
    pub fn sample_dataset(&self, categories: &[String], rng: &mut SampleRng) -> SampleDataset {
        let budget_percentages = self.budget_split(categories, rng);
        let spending_percentages: Vec<f64> = (0..categories.len())
            .map(|idx| {
                let (min, max) = if idx % 2 == 0 { (80.0, 140.0) } else { (60.0, 120.0) };
                round_to_tenth(rng.range_f64(min, max))
            })
            .collect();
        let transaction_percentages = budget_percentages
            .iter()
            .zip(&spending_percentages)
            .map(|(budget, spending)| round_to_tenth(budget * spending / 100.0))
            .collect();

        SampleDataset {
            categories: categories.to_vec(),
            budget_percentages,
            spending_percentages,
            transaction_percentages,
        }
    }
}

impl Default for SampleDataService {
    fn default() -> Self {
        Self::new()
    }
}

/// Planning range (percent of income) for a category; unknown names get 1–8 %.
pub fn budget_range(category: &str) -> (f64, f64) {
    BUDGET_RANGES
        .iter()
        .find(|(name, _, _)| *name == category)
        .map(|(_, min, max)| (*min, *max))
        .unwrap_or(UNKNOWN_BUDGET_RANGE)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn sample_entry(id: u64, category: &str, amount: f64, day: u32) -> Transaction {
    let date = NaiveDate::from_ymd_opt(SAMPLE_YEAR, SAMPLE_MONTH, day)
        .unwrap_or(NaiveDate::MIN);
    Transaction {
        id,
        date,
        category: category.to_string(),
        amount,
        timestamp: date.and_time(NaiveTime::MIN).and_utc(),
        is_dummy: true,
    }
}
