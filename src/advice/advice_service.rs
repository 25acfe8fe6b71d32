use std::collections::HashMap;

use log::debug;
use rust_decimal::Decimal;

use super::advice_model::{
    AdviceReport, PortfolioSummary, Priority, Recommendation, RecommendationKind, TargetAllocation,
};
use crate::classification::{AssetCategory, CategoryState};
use crate::constants::CENT_PRECISION;
use crate::goals::{GoalEvaluation, GoalStatus};

/// Derives prioritized recommendations from goal and portfolio state.
///
/// Each rule emits at most one recommendation per goal or category; the
/// rules run independently and the combined list is stable-sorted by
/// priority. An empty list is a valid outcome.
pub struct AdviceService {
    allocation: TargetAllocation,
}

impl AdviceService {
    pub fn new(allocation: TargetAllocation) -> Self {
        AdviceService { allocation }
    }

    pub fn recommend(
        &self,
        goal_evaluations: &[GoalEvaluation],
        category_states: &HashMap<AssetCategory, CategoryState>,
        summary: &PortfolioSummary,
    ) -> Vec<Recommendation> {
        let mut recommendations = Vec::new();

        recommendations.extend(self.goal_rules(goal_evaluations));

        let rebalance = self.allocation_rules(category_states);
        let has_allocation_issue = !rebalance.is_empty();
        recommendations.extend(rebalance);

        if !has_allocation_issue {
            recommendations.extend(self.opportunity_rule(category_states, summary));
        }

        // Stable sort keeps insertion order within a tier
        recommendations.sort_by_key(|r| r.priority);
        debug!("Generated {} recommendations", recommendations.len());
        recommendations
    }

    /// `recommend` plus the summary envelope.
    pub fn advise(
        &self,
        goal_evaluations: &[GoalEvaluation],
        category_states: &HashMap<AssetCategory, CategoryState>,
        summary: &PortfolioSummary,
    ) -> AdviceReport {
        let recommendations = self.recommend(goal_evaluations, category_states, summary);
        let high_priority_count = recommendations
            .iter()
            .filter(|r| r.priority == Priority::High)
            .count();
        AdviceReport {
            total_count: recommendations.len(),
            action_required: high_priority_count > 0,
            high_priority_count,
            recommendations,
        }
    }

    /// Off-track or past-deadline goals each get one high-priority
    /// recommendation naming the goal, the gap, and the required rate.
    fn goal_rules(&self, evaluations: &[GoalEvaluation]) -> Vec<Recommendation> {
        let mut out = Vec::new();
        for eval in evaluations {
            match eval.status {
                GoalStatus::OffTrack => match eval.monthly_required {
                    Some(required) => {
                        let actual = eval.current_monthly.unwrap_or(Decimal::ZERO);
                        let shortfall = eval.monthly_shortfall().unwrap_or(Decimal::ZERO);

                        let mut figures = HashMap::new();
                        figures.insert("monthly_required".to_string(), required);
                        figures.insert("current_monthly".to_string(), actual);
                        figures.insert("shortfall".to_string(), shortfall);
                        if let Some(months) = eval.months_remaining {
                            figures.insert("months_remaining".to_string(), Decimal::from(months));
                        }

                        out.push(Recommendation {
                            priority: Priority::High,
                            kind: RecommendationKind::GoalGap,
                            message: format!(
                                "{} is off track: ${}/mo required vs ${}/mo current, a ${}/mo gap",
                                eval.description,
                                required.round_dp(CENT_PRECISION),
                                actual.round_dp(CENT_PRECISION),
                                shortfall.round_dp(CENT_PRECISION),
                            ),
                            figures,
                        });
                    }
                    // No deadline means no required rate; report the value
                    // gap instead.
                    None => {
                        let target = eval.target.unwrap_or(Decimal::ZERO);
                        let current = eval.current.unwrap_or(Decimal::ZERO);
                        let remaining = (target - current).max(Decimal::ZERO);

                        let mut figures = HashMap::new();
                        figures.insert("target".to_string(), target);
                        figures.insert("current".to_string(), current);
                        figures.insert("remaining".to_string(), remaining);

                        out.push(Recommendation {
                            priority: Priority::High,
                            kind: RecommendationKind::GoalGap,
                            message: format!(
                                "{} is off track: ${} still short of the ${} target",
                                eval.description,
                                remaining.round_dp(CENT_PRECISION),
                                target.round_dp(CENT_PRECISION),
                            ),
                            figures,
                        });
                    }
                },
                GoalStatus::PastDeadline => {
                    let target = eval.target.unwrap_or(Decimal::ZERO);
                    let current = eval.current.unwrap_or(Decimal::ZERO);
                    let remaining = (target - current).max(Decimal::ZERO);

                    let mut figures = HashMap::new();
                    figures.insert("target".to_string(), target);
                    figures.insert("current".to_string(), current);
                    figures.insert("remaining".to_string(), remaining);

                    out.push(Recommendation {
                        priority: Priority::High,
                        kind: RecommendationKind::GoalGap,
                        message: format!(
                            "{} deadline has passed with ${} still short of the ${} target; reassess the deadline or target",
                            eval.description,
                            remaining.round_dp(CENT_PRECISION),
                            target.round_dp(CENT_PRECISION),
                        ),
                        figures,
                    });
                }
                GoalStatus::OnTrack | GoalStatus::NoTarget => {}
            }
        }
        out
    }

    /// Categories drifting beyond the threshold each get one medium-priority
    /// rebalance recommendation naming direction and magnitude.
    fn allocation_rules(
        &self,
        category_states: &HashMap<AssetCategory, CategoryState>,
    ) -> Vec<Recommendation> {
        let mut out = Vec::new();
        for category in AssetCategory::ALL {
            let actual = category_states
                .get(&category)
                .map(|s| s.pct_of_total)
                .unwrap_or(Decimal::ZERO);
            let target = self.allocation.target_pct(category);
            let drift = actual - target;

            if drift.abs() <= self.allocation.drift_threshold {
                continue;
            }

            let direction = if drift > Decimal::ZERO { "above" } else { "below" };
            let mut figures = HashMap::new();
            figures.insert("current_pct".to_string(), actual);
            figures.insert("target_pct".to_string(), target);
            figures.insert("drift_pct".to_string(), drift);

            out.push(Recommendation {
                priority: Priority::Medium,
                kind: RecommendationKind::Rebalance,
                message: format!(
                    "{} is {} percentage points {} its {}% target; steer new contributions accordingly",
                    category.display_name(),
                    drift.abs().round_dp(1),
                    direction,
                    target.round_dp(1),
                ),
                figures,
            });
        }
        out
    }

    /// With a positive surplus and no allocation issue, point the surplus at
    /// the category furthest below its target band.
    fn opportunity_rule(
        &self,
        category_states: &HashMap<AssetCategory, CategoryState>,
        summary: &PortfolioSummary,
    ) -> Option<Recommendation> {
        if summary.monthly_surplus <= Decimal::ZERO {
            return None;
        }

        let (category, drift) = AssetCategory::ALL
            .iter()
            .map(|category| {
                let actual = category_states
                    .get(category)
                    .map(|s| s.pct_of_total)
                    .unwrap_or(Decimal::ZERO);
                (*category, actual - self.allocation.target_pct(*category))
            })
            .min_by(|a, b| a.1.cmp(&b.1))?;

        if drift >= Decimal::ZERO {
            return None;
        }

        let mut figures = HashMap::new();
        figures.insert("monthly_surplus".to_string(), summary.monthly_surplus);
        figures.insert("drift_pct".to_string(), drift);

        Some(Recommendation {
            priority: Priority::Low,
            kind: RecommendationKind::Opportunity,
            message: format!(
                "Direct the ${}/mo surplus toward {} ({} percentage points below target)",
                summary.monthly_surplus.round_dp(CENT_PRECISION),
                category.display_name(),
                drift.abs().round_dp(1),
            ),
            figures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::GoalType;
    use rust_decimal_macros::dec;

    fn baseline_targets() -> TargetAllocation {
        TargetAllocation::new(
            [
                (AssetCategory::Retirement, dec!(40)),
                (AssetCategory::TaxableEquities, dec!(20)),
                (AssetCategory::Crypto, dec!(25)),
                (AssetCategory::Cash, dec!(15)),
            ]
            .into_iter()
            .collect(),
        )
    }

    fn states(pcts: &[(AssetCategory, Decimal)]) -> HashMap<AssetCategory, CategoryState> {
        pcts.iter()
            .map(|(c, pct)| {
                (*c, CategoryState { value: *pct * dec!(100), pct_of_total: *pct })
            })
            .collect()
    }

    fn balanced_states() -> HashMap<AssetCategory, CategoryState> {
        states(&[
            (AssetCategory::Retirement, dec!(40)),
            (AssetCategory::TaxableEquities, dec!(20)),
            (AssetCategory::Crypto, dec!(25)),
            (AssetCategory::Cash, dec!(15)),
        ])
    }

    fn off_track_eval(description: &str) -> GoalEvaluation {
        GoalEvaluation {
            goal_type: GoalType::ShortTerm,
            description: description.to_string(),
            status: GoalStatus::OffTrack,
            on_track: false,
            progress_pct: Some(dec!(50)),
            monthly_required: Some(dec!(500)),
            months_remaining: Some(12),
            months_at_current_pace: Some(dec!(15)),
            current: Some(dec!(6000)),
            target: Some(dec!(12000)),
            current_monthly: Some(dec!(400)),
            projected_at_deadline: None,
        }
    }

    fn summary(surplus: Decimal) -> PortfolioSummary {
        PortfolioSummary {
            total_value: dec!(10000),
            monthly_surplus: surplus,
        }
    }

    #[test]
    fn off_track_goal_yields_high_priority_recommendation() {
        let service = AdviceService::new(baseline_targets());
        let recs = service.recommend(
            &[off_track_eval("Emergency fund")],
            &balanced_states(),
            &summary(Decimal::ZERO),
        );

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[0].kind, RecommendationKind::GoalGap);
        assert!(recs[0].message.contains("Emergency fund"));
        assert_eq!(recs[0].figures["shortfall"], dec!(100));
        assert_eq!(recs[0].figures["monthly_required"], dec!(500));
    }

    #[test]
    fn deadline_less_off_track_goal_reports_value_gap() {
        let service = AdviceService::new(baseline_targets());
        let eval = GoalEvaluation {
            goal_type: GoalType::LongTerm,
            description: "Financial independence".to_string(),
            status: GoalStatus::OffTrack,
            on_track: false,
            progress_pct: Some(dec!(6.4)),
            monthly_required: None,
            months_remaining: None,
            months_at_current_pace: Some(dec!(2340)),
            current: Some(dec!(64000)),
            target: Some(dec!(1000000)),
            current_monthly: Some(dec!(400)),
            projected_at_deadline: None,
        };
        let recs = service.recommend(&[eval], &balanced_states(), &summary(Decimal::ZERO));

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[0].kind, RecommendationKind::GoalGap);
        assert!(recs[0].message.contains("$936000 still short of the $1000000 target"));
        assert_eq!(recs[0].figures["remaining"], dec!(936000));
        assert!(!recs[0].figures.contains_key("shortfall"));
        assert!(recs[0].figures.values().all(|v| *v >= Decimal::ZERO));
    }

    #[test]
    fn drift_beyond_threshold_yields_rebalance() {
        let service = AdviceService::new(baseline_targets());
        // Crypto 8 pp over, cash 8 pp under
        let drifted = states(&[
            (AssetCategory::Retirement, dec!(40)),
            (AssetCategory::TaxableEquities, dec!(20)),
            (AssetCategory::Crypto, dec!(33)),
            (AssetCategory::Cash, dec!(7)),
        ]);
        let recs = service.recommend(&[], &drifted, &summary(Decimal::ZERO));

        assert_eq!(recs.len(), 2);
        assert!(recs.iter().all(|r| r.priority == Priority::Medium));
        assert!(recs.iter().any(|r| r.message.contains("Crypto") && r.message.contains("above")));
        assert!(recs
            .iter()
            .any(|r| r.message.contains("Cash & Equivalents") && r.message.contains("below")));
    }

    #[test]
    fn surplus_with_balanced_allocation_yields_opportunity() {
        let service = AdviceService::new(baseline_targets());
        // Cash 3 pp under target: inside the band, but furthest below
        let slightly_under = states(&[
            (AssetCategory::Retirement, dec!(41)),
            (AssetCategory::TaxableEquities, dec!(21)),
            (AssetCategory::Crypto, dec!(25)),
            (AssetCategory::Cash, dec!(12)),
        ]);
        let recs = service.recommend(&[], &slightly_under, &summary(dec!(800)));

        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].priority, Priority::Low);
        assert_eq!(recs[0].kind, RecommendationKind::Opportunity);
        assert!(recs[0].message.contains("Cash & Equivalents"));
        assert_eq!(recs[0].figures["monthly_surplus"], dec!(800));
    }

    #[test]
    fn opportunity_is_suppressed_when_rebalance_fires() {
        let service = AdviceService::new(baseline_targets());
        let drifted = states(&[
            (AssetCategory::Retirement, dec!(40)),
            (AssetCategory::TaxableEquities, dec!(20)),
            (AssetCategory::Crypto, dec!(33)),
            (AssetCategory::Cash, dec!(7)),
        ]);
        let recs = service.recommend(&[], &drifted, &summary(dec!(800)));
        assert!(recs.iter().all(|r| r.kind != RecommendationKind::Opportunity));
    }

    #[test]
    fn no_findings_is_an_empty_list() {
        let service = AdviceService::new(baseline_targets());
        let recs = service.recommend(&[], &balanced_states(), &summary(Decimal::ZERO));
        assert!(recs.is_empty());
    }

    #[test]
    fn priority_order_is_high_first_and_stable_within_tier() {
        let service = AdviceService::new(baseline_targets());
        let drifted = states(&[
            (AssetCategory::Retirement, dec!(40)),
            (AssetCategory::TaxableEquities, dec!(20)),
            (AssetCategory::Crypto, dec!(33)),
            (AssetCategory::Cash, dec!(7)),
        ]);
        let evals = [off_track_eval("Emergency fund"), off_track_eval("House fund")];
        let recs = service.recommend(&evals, &drifted, &summary(dec!(800)));

        assert_eq!(recs[0].priority, Priority::High);
        assert!(recs[0].message.contains("Emergency fund"));
        assert!(recs[1].message.contains("House fund"));
        assert_eq!(recs[2].priority, Priority::Medium);
        assert_eq!(recs[3].priority, Priority::Medium);
    }

    #[test]
    fn advise_rolls_up_counts() {
        let service = AdviceService::new(baseline_targets());
        let report = service.advise(
            &[off_track_eval("Emergency fund")],
            &balanced_states(),
            &summary(Decimal::ZERO),
        );

        assert_eq!(report.total_count, 1);
        assert_eq!(report.high_priority_count, 1);
        assert!(report.action_required);
    }
}
