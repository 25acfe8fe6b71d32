use std::collections::HashMap;

use lazy_static::lazy_static;
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::classification_model::{AssetCategory, CategoryState};
use crate::snapshot::Snapshot;

lazy_static! {
    /// Built-in identifier -> category table.
    ///
    /// Keys are lowercase. Covers common account types plus spot crypto and
    /// crypto ETF tickers; anything else classifies as `Other`.
    static ref DEFAULT_CATEGORY_TABLE: HashMap<&'static str, AssetCategory> = {
        let mut m = HashMap::new();
        // Cash-like accounts
        for id in ["cash", "checking", "savings", "money_market", "fdic_deposits", "cd", "hysa"] {
            m.insert(id, AssetCategory::Cash);
        }
        // Tax-advantaged retirement accounts (HSA tracked as retirement)
        for id in ["retirement", "roth_ira", "traditional_ira", "401k", "403b", "hsa", "sep_ira"] {
            m.insert(id, AssetCategory::Retirement);
        }
        // Taxable accounts
        for id in ["taxable_equities", "brokerage", "taxable", "index_funds"] {
            m.insert(id, AssetCategory::TaxableEquities);
        }
        // Spot crypto and crypto ETFs
        for id in ["crypto", "btc", "eth", "sol", "bito", "gbtc", "ethe", "ibit", "fbtc"] {
            m.insert(id, AssetCategory::Crypto);
        }
        m
    };
}

/// Groups a snapshot's raw holdings into the fixed asset categories.
pub struct ClassificationService {
    table: HashMap<String, AssetCategory>,
}

impl Default for ClassificationService {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassificationService {
    /// Classifier backed by the built-in identifier table.
    pub fn new() -> Self {
        let table = DEFAULT_CATEGORY_TABLE
            .iter()
            .map(|(k, v)| (k.to_string(), *v))
            .collect();
        ClassificationService { table }
    }

    /// Classifier backed by a caller-supplied identifier table. Keys are
    /// matched case-insensitively.
    pub fn with_table(table: HashMap<String, AssetCategory>) -> Self {
        let table = table
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v))
            .collect();
        ClassificationService { table }
    }

    /// Total-function lookup: unknown identifiers go to `Other`.
    pub fn category_for(&self, identifier: &str) -> AssetCategory {
        self.table
            .get(identifier.to_lowercase().as_str())
            .copied()
            .unwrap_or(AssetCategory::Other)
    }

    /// Maps a snapshot's raw holdings into per-category value and share of
    /// total. All five categories are always present in the result; a zero
    /// portfolio total zeroes every percentage rather than dividing by zero.
    pub fn classify(&self, snapshot: &Snapshot) -> HashMap<AssetCategory, CategoryState> {
        snapshot.check_data_quality();

        let mut values: HashMap<AssetCategory, Decimal> = AssetCategory::ALL
            .iter()
            .map(|c| (*c, Decimal::ZERO))
            .collect();

        for (identifier, value) in &snapshot.by_category {
            let category = self.category_for(identifier);
            if category == AssetCategory::Other {
                debug!("Unclassified identifier '{}' mapped to 'other'", identifier);
            }
            *values.entry(category).or_insert(Decimal::ZERO) += *value;
        }

        let total = snapshot.total_value;
        values
            .into_iter()
            .map(|(category, value)| {
                // Full precision here; consumers round for display. Rounding
                // five shares independently could break the sum-to-100
                // invariant.
                let pct_of_total = if total.is_zero() {
                    Decimal::ZERO
                } else {
                    value / total * dec!(100)
                };
                (category, CategoryState { value, pct_of_total })
            })
            .collect()
    }
}
