use std::collections::HashMap;

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::goals_model::{
    FundingSource, Goal, GoalEvaluation, GoalFundingMap, GoalStatus, GoalSummary, GoalType,
};
use crate::classification::{AssetCategory, CategoryState};
use crate::constants::{CENT_PRECISION, PCT_PRECISION};
use crate::errors::Result;
use crate::projection::ProjectionPoint;
use crate::projection::projection_service::months_between;

/// Evaluates configured goals against the classified portfolio state.
pub struct GoalService {
    funding: GoalFundingMap,
}

impl GoalService {
    pub fn new(funding: GoalFundingMap) -> Self {
        GoalService { funding }
    }

    /// Evaluates one goal as of `as_of`.
    ///
    /// `projection`, when supplied, only enriches the result with the
    /// trajectory value at the deadline; it never changes the status, which
    /// depends solely on current state and contribution rate.
    pub fn evaluate(
        &self,
        goal: &Goal,
        category_states: &HashMap<AssetCategory, CategoryState>,
        total_value: Decimal,
        projection: Option<&[ProjectionPoint]>,
        as_of: NaiveDate,
    ) -> Result<GoalEvaluation> {
        // Qualitative goals never touch the funding map
        let target = match goal.target {
            Some(target) => target,
            None => return Ok(GoalEvaluation::no_target(goal)),
        };

        let source = self.funding.source_for(goal.goal_type)?;

        let current = resolve_current(source, category_states, total_value);
        let remaining = target - current;

        let progress_pct = if target > Decimal::ZERO {
            (current / target * dec!(100))
                .clamp(Decimal::ZERO, dec!(100))
                .round_dp(PCT_PRECISION)
        } else {
            Decimal::ZERO
        };

        let months_at_current_pace = if remaining <= Decimal::ZERO {
            Some(Decimal::ZERO)
        } else if goal.current_monthly > Decimal::ZERO {
            Some((remaining / goal.current_monthly).round_dp(1))
        } else {
            None
        };

        let projected_at_deadline = goal
            .deadline
            .and_then(|deadline| projection_value_at(projection, deadline, source));

        let mut evaluation = GoalEvaluation {
            goal_type: goal.goal_type,
            description: goal.description.clone(),
            status: GoalStatus::OffTrack,
            on_track: false,
            progress_pct: Some(progress_pct),
            monthly_required: None,
            months_remaining: None,
            months_at_current_pace,
            current: Some(current),
            target: Some(target),
            current_monthly: Some(goal.current_monthly),
            projected_at_deadline,
        };

        match goal.deadline {
            Some(deadline) => {
                let months_remaining = months_between(as_of, deadline);
                evaluation.months_remaining = Some(months_remaining);

                if months_remaining < 0 && remaining > Decimal::ZERO {
                    evaluation.status = GoalStatus::PastDeadline;
                    return Ok(evaluation);
                }

                let monthly_required = if remaining <= Decimal::ZERO || months_remaining <= 0 {
                    Decimal::ZERO
                } else {
                    (remaining / Decimal::from(months_remaining)).round_dp(CENT_PRECISION)
                };
                evaluation.monthly_required = Some(monthly_required);

                // Equality counts as on-track; cent rounding on both sides
                // keeps floating-point noise from flapping the status.
                let on_track = goal.current_monthly.round_dp(CENT_PRECISION)
                    >= monthly_required.round_dp(CENT_PRECISION);
                evaluation.on_track = on_track;
                evaluation.status = if on_track {
                    GoalStatus::OnTrack
                } else {
                    GoalStatus::OffTrack
                };
            }
            None => {
                // No deadline: on-track means the target is already met.
                let on_track = current >= target;
                evaluation.on_track = on_track;
                evaluation.status = if on_track {
                    GoalStatus::OnTrack
                } else {
                    GoalStatus::OffTrack
                };
            }
        }

        Ok(evaluation)
    }

    /// Evaluates every goal and rolls the results up into a summary.
    ///
    /// The most urgent goal is the behind goal with the fewest months left
    /// on the clock.
    pub fn evaluate_all(
        &self,
        goals: &[Goal],
        category_states: &HashMap<AssetCategory, CategoryState>,
        total_value: Decimal,
        projection: Option<&[ProjectionPoint]>,
        as_of: NaiveDate,
    ) -> Result<(Vec<GoalEvaluation>, GoalSummary)> {
        let mut evaluations = Vec::with_capacity(goals.len());
        let mut on_track_count = 0;
        let mut behind_count = 0;
        let mut no_target_count = 0;
        let mut most_urgent: Option<(GoalType, i64)> = None;

        for goal in goals {
            let evaluation =
                self.evaluate(goal, category_states, total_value, projection, as_of)?;

            match evaluation.status {
                GoalStatus::OnTrack => on_track_count += 1,
                GoalStatus::OffTrack | GoalStatus::PastDeadline => {
                    behind_count += 1;
                    if let Some(months) = evaluation.months_remaining {
                        if most_urgent.map_or(true, |(_, best)| months < best) {
                            most_urgent = Some((evaluation.goal_type, months));
                        }
                    }
                }
                GoalStatus::NoTarget => no_target_count += 1,
            }
            evaluations.push(evaluation);
        }

        debug!(
            "Evaluated {} goals: {} on track, {} behind",
            goals.len(),
            on_track_count,
            behind_count
        );

        let summary = GoalSummary {
            on_track_count,
            behind_count,
            no_target_count,
            most_urgent: most_urgent.map(|(goal_type, _)| goal_type),
        };
        Ok((evaluations, summary))
    }
}

fn resolve_current(
    source: &FundingSource,
    category_states: &HashMap<AssetCategory, CategoryState>,
    total_value: Decimal,
) -> Decimal {
    match source {
        FundingSource::Categories(categories) => categories
            .iter()
            .filter_map(|c| category_states.get(c))
            .map(|s| s.value)
            .sum(),
        FundingSource::TotalPortfolio => total_value,
    }
}

/// Trajectory value relevant to the goal's funding source at the first
/// projected point on or after the deadline.
fn projection_value_at(
    projection: Option<&[ProjectionPoint]>,
    deadline: NaiveDate,
    source: &FundingSource,
) -> Option<Decimal> {
    let point = projection?.iter().find(|p| p.date >= deadline)?;
    Some(match source {
        FundingSource::Categories(categories) => categories
            .iter()
            .filter_map(|c| point.by_category.get(c))
            .copied()
            .sum(),
        FundingSource::TotalPortfolio => point.total_value,
    })
}
