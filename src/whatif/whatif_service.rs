use std::collections::HashMap;

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::whatif_model::{AllocationImpact, GoalImpact, WhatIfResult};
use crate::advice::PortfolioSummary;
use crate::classification::{AssetCategory, CategoryState};
use crate::constants::{CENT_PRECISION, PCT_PRECISION};
use crate::goals::Goal;
use crate::projection::projection_service::months_between;

/// One-shot simulation of a hypothetical monthly contribution change.
///
/// Stateless: nothing here persists or affects later calls.
pub struct WhatIfService;

impl Default for WhatIfService {
    fn default() -> Self {
        Self::new()
    }
}

impl WhatIfService {
    pub fn new() -> Self {
        WhatIfService
    }

    /// Recomputes the immediate effect of adding `monthly_delta` to one
    /// category.
    ///
    /// A non-positive delta means no hypothesis was entered and yields an
    /// empty result rather than an error. The goal impact is populated only
    /// for a cash delta with a targeted short-term goal, using the same
    /// arithmetic as the goal tracker with the bumped contribution rate.
    pub fn simulate(
        &self,
        monthly_delta: Decimal,
        category: AssetCategory,
        category_states: &HashMap<AssetCategory, CategoryState>,
        summary: &PortfolioSummary,
        nearest_short_term_goal: Option<&Goal>,
        as_of: NaiveDate,
    ) -> WhatIfResult {
        if monthly_delta <= Decimal::ZERO {
            debug!("Non-positive what-if delta {}, returning empty result", monthly_delta);
            return WhatIfResult::empty();
        }

        let state = category_states
            .get(&category)
            .copied()
            .unwrap_or(CategoryState::ZERO);

        // One month of contribution added to both sides of the ratio; a
        // documented simplification, not a trajectory.
        let new_total = summary.total_value + monthly_delta;
        let new_pct = if new_total.is_zero() {
            Decimal::ZERO
        } else {
            ((state.value + monthly_delta) / new_total * dec!(100)).round_dp(PCT_PRECISION)
        };
        let allocation_impact = AllocationImpact {
            category,
            current_pct: state.pct_of_total,
            new_pct,
            pct_change: new_pct - state.pct_of_total,
        };

        let goal_impact = if category == AssetCategory::Cash {
            nearest_short_term_goal
                .and_then(|goal| goal_impact_for(goal, state.value, monthly_delta, as_of))
        } else {
            None
        };

        WhatIfResult {
            goal_impact,
            allocation_impact: Some(allocation_impact),
        }
    }
}

fn goal_impact_for(
    goal: &Goal,
    current: Decimal,
    monthly_delta: Decimal,
    as_of: NaiveDate,
) -> Option<GoalImpact> {
    let target = goal.target?;
    let remaining = target - current;
    let new_monthly = goal.current_monthly + monthly_delta;

    Some(GoalImpact {
        current_monthly: goal.current_monthly,
        new_monthly,
        current_months_to_goal: months_to_goal(remaining, goal.current_monthly),
        new_months_to_goal: months_to_goal(remaining, new_monthly),
        was_on_track: on_track(goal, current, target, remaining, goal.current_monthly, as_of),
        is_now_on_track: on_track(goal, current, target, remaining, new_monthly, as_of),
    })
}

/// Same on-track rule as the goal tracker, parameterized by the rate.
fn on_track(
    goal: &Goal,
    current: Decimal,
    target: Decimal,
    remaining: Decimal,
    rate: Decimal,
    as_of: NaiveDate,
) -> bool {
    match goal.deadline {
        Some(deadline) => {
            let months_remaining = months_between(as_of, deadline);
            if months_remaining < 0 && remaining > Decimal::ZERO {
                return false;
            }
            let required = if remaining <= Decimal::ZERO || months_remaining <= 0 {
                Decimal::ZERO
            } else {
                remaining / Decimal::from(months_remaining)
            };
            rate.round_dp(CENT_PRECISION) >= required.round_dp(CENT_PRECISION)
        }
        None => current >= target,
    }
}

fn months_to_goal(remaining: Decimal, rate: Decimal) -> Option<Decimal> {
    if remaining <= Decimal::ZERO {
        Some(Decimal::ZERO)
    } else if rate > Decimal::ZERO {
        Some((remaining / rate).round_dp(1))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::GoalType;

    fn states(cash_value: Decimal, cash_pct: Decimal) -> HashMap<AssetCategory, CategoryState> {
        [(
            AssetCategory::Cash,
            CategoryState { value: cash_value, pct_of_total: cash_pct },
        )]
        .into_iter()
        .collect()
    }

    fn summary(total: Decimal) -> PortfolioSummary {
        PortfolioSummary {
            total_value: total,
            monthly_surplus: dec!(500),
        }
    }

    fn emergency_fund() -> Goal {
        Goal {
            goal_type: GoalType::ShortTerm,
            description: "Emergency fund".to_string(),
            target: Some(dec!(12000)),
            deadline: Some(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()),
            current_monthly: dec!(400),
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn non_positive_delta_returns_empty_result() {
        let service = WhatIfService::new();
        let result = service.simulate(
            Decimal::ZERO,
            AssetCategory::Cash,
            &states(dec!(1000), dec!(10)),
            &summary(dec!(10000)),
            Some(&emergency_fund()),
            as_of(),
        );
        assert_eq!(result.goal_impact, None);
        assert_eq!(result.allocation_impact, None);

        let result = service.simulate(
            dec!(-100),
            AssetCategory::Cash,
            &states(dec!(1000), dec!(10)),
            &summary(dec!(10000)),
            None,
            as_of(),
        );
        assert_eq!(result, WhatIfResult::empty());
    }

    #[test]
    fn allocation_impact_models_one_month_of_contribution() {
        let service = WhatIfService::new();
        let result = service.simulate(
            dec!(1000),
            AssetCategory::Cash,
            &states(dec!(1000), dec!(10)),
            &summary(dec!(10000)),
            None,
            as_of(),
        );

        let impact = result.allocation_impact.unwrap();
        // (2000 / 11000) * 100 = 18.18
        assert_eq!(impact.new_pct, dec!(18.18));
        assert_eq!(impact.pct_change, dec!(8.18));
        assert_eq!(impact.current_pct, dec!(10));
    }

    #[test]
    fn cash_delta_flips_short_term_goal_on_track() {
        let service = WhatIfService::new();
        // Cash 6000, goal 12000 in 12 months at 400/mo: required is 500
        let result = service.simulate(
            dec!(500),
            AssetCategory::Cash,
            &states(dec!(6000), dec!(23)),
            &summary(dec!(26000)),
            Some(&emergency_fund()),
            as_of(),
        );

        let impact = result.goal_impact.unwrap();
        assert_eq!(impact.current_monthly, dec!(400));
        assert_eq!(impact.new_monthly, dec!(900));
        assert!(!impact.was_on_track);
        assert!(impact.is_now_on_track);
        // 6000 remaining at 400/mo vs 900/mo
        assert_eq!(impact.current_months_to_goal, Some(dec!(15)));
        assert_eq!(impact.new_months_to_goal, Some(dec!(6.7)));
    }

    #[test]
    fn non_cash_delta_has_no_goal_impact() {
        let service = WhatIfService::new();
        let result = service.simulate(
            dec!(500),
            AssetCategory::Crypto,
            &states(dec!(6000), dec!(23)),
            &summary(dec!(26000)),
            Some(&emergency_fund()),
            as_of(),
        );
        assert!(result.goal_impact.is_none());
        assert!(result.allocation_impact.is_some());
    }

    #[test]
    fn qualitative_goal_has_no_goal_impact() {
        let service = WhatIfService::new();
        let mut goal = emergency_fund();
        goal.target = None;
        let result = service.simulate(
            dec!(500),
            AssetCategory::Cash,
            &states(dec!(6000), dec!(23)),
            &summary(dec!(26000)),
            Some(&goal),
            as_of(),
        );
        assert!(result.goal_impact.is_none());
    }

    #[test]
    fn zero_pace_goal_has_no_months_to_goal() {
        let service = WhatIfService::new();
        let mut goal = emergency_fund();
        goal.current_monthly = Decimal::ZERO;
        let result = service.simulate(
            dec!(500),
            AssetCategory::Cash,
            &states(dec!(6000), dec!(23)),
            &summary(dec!(26000)),
            Some(&goal),
            as_of(),
        );

        let impact = result.goal_impact.unwrap();
        assert_eq!(impact.current_months_to_goal, None);
        assert_eq!(impact.new_months_to_goal, Some(dec!(12)));
    }
}
