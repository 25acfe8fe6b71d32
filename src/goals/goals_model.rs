use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::classification::AssetCategory;
use crate::errors::{ConfigError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

impl GoalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::ShortTerm => "short_term",
            GoalType::MediumTerm => "medium_term",
            GoalType::LongTerm => "long_term",
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configured financial goal.
///
/// A goal without a `target` is qualitative and never produces a numeric
/// evaluation. `current_monthly` is the contribution rate the caller is
/// actually putting toward this goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub goal_type: GoalType,
    pub description: String,
    pub target: Option<Decimal>,
    pub deadline: Option<NaiveDate>,
    pub current_monthly: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    NoTarget,
    PastDeadline,
    OnTrack,
    OffTrack,
}

/// Which part of the portfolio funds a goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum FundingSource {
    Categories(Vec<AssetCategory>),
    TotalPortfolio,
}

/// Explicit goal-type -> funding-source table.
///
/// Supplied as configuration; the tracker never guesses which categories
/// fund which goal. A goal type missing from the table is a configuration
/// error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalFundingMap {
    map: HashMap<GoalType, FundingSource>,
}

impl GoalFundingMap {
    pub fn new(map: HashMap<GoalType, FundingSource>) -> Self {
        GoalFundingMap { map }
    }

    /// The conventional mapping: short-term goals (emergency fund) draw on
    /// cash; medium- and long-term goals draw on the whole portfolio.
    pub fn standard() -> Self {
        let mut map = HashMap::new();
        map.insert(
            GoalType::ShortTerm,
            FundingSource::Categories(vec![AssetCategory::Cash]),
        );
        map.insert(GoalType::MediumTerm, FundingSource::TotalPortfolio);
        map.insert(GoalType::LongTerm, FundingSource::TotalPortfolio);
        GoalFundingMap { map }
    }

    pub fn source_for(&self, goal_type: GoalType) -> Result<&FundingSource> {
        self.map
            .get(&goal_type)
            .ok_or_else(|| ConfigError::UnmappedGoalType(goal_type.to_string()).into())
    }
}

/// Derived evaluation of one goal. Numeric fields are `None` when the goal
/// has no target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalEvaluation {
    pub goal_type: GoalType,
    pub description: String,
    pub status: GoalStatus,
    pub on_track: bool,
    pub progress_pct: Option<Decimal>,
    pub monthly_required: Option<Decimal>,
    pub months_remaining: Option<i64>,
    pub months_at_current_pace: Option<Decimal>,
    pub current: Option<Decimal>,
    pub target: Option<Decimal>,
    pub current_monthly: Option<Decimal>,
    pub projected_at_deadline: Option<Decimal>,
}

impl GoalEvaluation {
    /// Evaluation of a qualitative goal: status only, no numbers.
    pub(crate) fn no_target(goal: &Goal) -> Self {
        GoalEvaluation {
            goal_type: goal.goal_type,
            description: goal.description.clone(),
            status: GoalStatus::NoTarget,
            on_track: false,
            progress_pct: None,
            monthly_required: None,
            months_remaining: None,
            months_at_current_pace: None,
            current: None,
            target: None,
            current_monthly: None,
            projected_at_deadline: None,
        }
    }

    /// Gap between required and actual contribution rate, when both exist.
    pub fn monthly_shortfall(&self) -> Option<Decimal> {
        match (self.monthly_required, self.current_monthly) {
            (Some(required), Some(actual)) => Some((required - actual).max(Decimal::ZERO)),
            _ => None,
        }
    }
}

/// Roll-up across all evaluated goals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GoalSummary {
    pub on_track_count: usize,
    pub behind_count: usize,
    pub no_target_count: usize,
    pub most_urgent: Option<GoalType>,
}
