use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::classification::AssetCategory;
use crate::constants::DRIFT_THRESHOLD_PCT;

/// Recommendation priority. Ordering is `High > Medium > Low`; the derived
/// `Ord` follows declaration order so sorting ascending puts High first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    GoalGap,
    Rebalance,
    Opportunity,
}

/// One prioritized, actionable recommendation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub priority: Priority,
    pub kind: RecommendationKind,
    pub message: String,
    /// Supporting figures for presentation layers; keys are stable
    /// snake_case names.
    pub figures: HashMap<String, Decimal>,
}

/// Configured target allocation bands.
///
/// Lookups are total functions: a category without an explicit target has a
/// 0% target, so any weight it carries counts as drift.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TargetAllocation {
    pub targets: HashMap<AssetCategory, Decimal>,
    pub drift_threshold: Decimal,
}

impl TargetAllocation {
    pub fn new(targets: HashMap<AssetCategory, Decimal>) -> Self {
        TargetAllocation {
            targets,
            drift_threshold: DRIFT_THRESHOLD_PCT,
        }
    }

    pub fn with_threshold(targets: HashMap<AssetCategory, Decimal>, drift_threshold: Decimal) -> Self {
        TargetAllocation {
            targets,
            drift_threshold,
        }
    }

    pub fn target_pct(&self, category: AssetCategory) -> Decimal {
        self.targets.get(&category).copied().unwrap_or(Decimal::ZERO)
    }
}

/// Portfolio-level inputs the recommendation rules need beyond the
/// classified categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_value: Decimal,
    pub monthly_surplus: Decimal,
}

/// Recommendation list plus the roll-up presentation layers show first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdviceReport {
    pub recommendations: Vec<Recommendation>,
    pub high_priority_count: usize,
    pub total_count: usize,
    pub action_required: bool,
}
