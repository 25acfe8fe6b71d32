use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fixed, exhaustive set of asset categories.
///
/// Every raw holding classifies into exactly one of these; identifiers the
/// classifier does not recognize fall into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    Cash,
    Retirement,
    TaxableEquities,
    Crypto,
    Other,
}

impl AssetCategory {
    /// All categories in reporting order.
    pub const ALL: [AssetCategory; 5] = [
        AssetCategory::Cash,
        AssetCategory::Retirement,
        AssetCategory::TaxableEquities,
        AssetCategory::Crypto,
        AssetCategory::Other,
    ];

    /// Display name for recommendation messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            AssetCategory::Cash => "Cash & Equivalents",
            AssetCategory::Retirement => "Retirement",
            AssetCategory::TaxableEquities => "Taxable Equities",
            AssetCategory::Crypto => "Crypto",
            AssetCategory::Other => "Other",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetCategory::Cash => "cash",
            AssetCategory::Retirement => "retirement",
            AssetCategory::TaxableEquities => "taxable_equities",
            AssetCategory::Crypto => "crypto",
            AssetCategory::Other => "other",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived per-category view of a snapshot. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryState {
    pub value: Decimal,
    pub pct_of_total: Decimal,
}

impl CategoryState {
    pub const ZERO: CategoryState = CategoryState {
        value: Decimal::ZERO,
        pct_of_total: Decimal::ZERO,
    };
}
