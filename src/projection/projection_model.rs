use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::classification::AssetCategory;
use crate::errors::{Error, Result};

/// One entry of the unified historical+projected time series.
///
/// `is_historical` is true exactly for points sourced from a recorded
/// snapshot; projected points follow at one-month intervals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    pub date: NaiveDate,
    pub age: f64,
    pub total_value: Decimal,
    pub inflation_adjusted_value: Decimal,
    pub by_category: HashMap<AssetCategory, Decimal>,
    pub is_historical: bool,
}

/// Growth, contribution and inflation assumptions for a projection run.
///
/// All rates are monthly. Lookups are total functions: a category absent
/// from either table contributes a zero rate/amount rather than failing.
/// The engine bakes in no default values; callers supply these tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionAssumptions {
    pub growth_rates: HashMap<AssetCategory, Decimal>,
    pub contributions: HashMap<AssetCategory, Decimal>,
    pub inflation_rate: Decimal,
    pub current_age: f64,
}

/// Sanity bands for assumption validation, expressed as monthly rates.
const MIN_MONTHLY_GROWTH: Decimal = dec!(-0.02);
const MAX_MONTHLY_GROWTH: Decimal = dec!(0.05);
const MAX_MONTHLY_INFLATION: Decimal = dec!(0.02);
const MIN_AGE: f64 = 18.0;
const MAX_AGE: f64 = 99.0;

impl ProjectionAssumptions {
    /// Monthly growth rate for a category, defaulting to zero.
    pub fn monthly_growth(&self, category: AssetCategory) -> Decimal {
        self.growth_rates.get(&category).copied().unwrap_or(Decimal::ZERO)
    }

    /// Monthly contribution for a category, defaulting to zero.
    pub fn monthly_contribution(&self, category: AssetCategory) -> Decimal {
        self.contributions.get(&category).copied().unwrap_or(Decimal::ZERO)
    }

    /// Rejects assumption tables outside sane bands before they poison a
    /// multi-decade compounding run.
    pub fn validate(&self) -> Result<()> {
        for (category, rate) in &self.growth_rates {
            if *rate < MIN_MONTHLY_GROWTH || *rate > MAX_MONTHLY_GROWTH {
                return Err(Error::invalid_range(
                    "growth_rates",
                    format!("{} for {}", rate, category),
                    MIN_MONTHLY_GROWTH,
                    MAX_MONTHLY_GROWTH,
                ));
            }
        }
        for (category, amount) in &self.contributions {
            if amount.is_sign_negative() && !amount.is_zero() {
                return Err(Error::invalid_range(
                    "contributions",
                    format!("{} for {}", amount, category),
                    Decimal::ZERO,
                    Decimal::MAX,
                ));
            }
        }
        if self.inflation_rate < Decimal::ZERO || self.inflation_rate > MAX_MONTHLY_INFLATION {
            return Err(Error::invalid_range(
                "inflation_rate",
                self.inflation_rate,
                Decimal::ZERO,
                MAX_MONTHLY_INFLATION,
            ));
        }
        if !(MIN_AGE..=MAX_AGE).contains(&self.current_age) {
            return Err(Error::invalid_range(
                "current_age",
                self.current_age,
                MIN_AGE,
                MAX_AGE,
            ));
        }
        Ok(())
    }
}
