use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::classification::AssetCategory;

/// Effect of the hypothetical contribution change on the nearest
/// quantitative short-term goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalImpact {
    pub current_monthly: Decimal,
    pub new_monthly: Decimal,
    /// Months to reach the goal at the current pace; `None` when the pace
    /// is zero and the goal is unreachable.
    pub current_months_to_goal: Option<Decimal>,
    pub new_months_to_goal: Option<Decimal>,
    pub was_on_track: bool,
    pub is_now_on_track: bool,
}

/// Effect on category allocation.
///
/// Models a single month's contribution added to both the category and the
/// total, not a steady-state trajectory. This is a deliberate simplification
/// kept for an instantaneous answer; turning it into a multi-month
/// simulation is a product decision rather than a fix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AllocationImpact {
    pub category: AssetCategory,
    pub current_pct: Decimal,
    pub new_pct: Decimal,
    pub pct_change: Decimal,
}

/// Outcome of one what-if simulation. Ephemeral: computed per call, never
/// persisted. Both impacts are `None` when no hypothesis was entered
/// (non-positive delta).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfResult {
    pub goal_impact: Option<GoalImpact>,
    pub allocation_impact: Option<AllocationImpact>,
}

impl WhatIfResult {
    /// Result for a non-positive delta: no hypothesis, nothing to report.
    pub(crate) fn empty() -> Self {
        WhatIfResult {
            goal_impact: None,
            allocation_impact: None,
        }
    }
}
