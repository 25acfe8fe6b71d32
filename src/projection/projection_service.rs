use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate};
use log::debug;
use rust_decimal::{Decimal, MathematicalOps};

use super::projection_model::{ProjectionAssumptions, ProjectionPoint};
use crate::classification::{AssetCategory, ClassificationService};
use crate::constants::{MAX_HORIZON_MONTHS, MIN_HORIZON_MONTHS, MONTHS_PER_YEAR};
use crate::errors::{ConfigError, Error, Result};
use crate::snapshot::Snapshot;

/// Calendar months between two dates, positive when `end` is later.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end.year() as i64 - start.year() as i64) * MONTHS_PER_YEAR as i64
        + (end.month() as i64 - start.month() as i64)
}

/// Extends a historical value series forward under growth, contribution and
/// inflation assumptions.
pub struct ProjectionService {
    classifier: ClassificationService,
}

impl ProjectionService {
    pub fn new(classifier: ClassificationService) -> Self {
        ProjectionService { classifier }
    }

    /// Builds the unified historical+projected series.
    ///
    /// `horizon_months` counts calendar months from the first snapshot, so
    /// the series always covers the historical span plus the remaining
    /// projected months. Historical points carry `is_historical = true` and
    /// are discounted to the first snapshot's date; projected points apply
    /// `value[c] = value[c] * (1 + growth[c]) + contribution[c]` per month.
    ///
    /// Pure and deterministic: identical inputs yield identical output.
    pub fn project(
        &self,
        snapshots: &[Snapshot],
        horizon_months: u32,
        assumptions: &ProjectionAssumptions,
    ) -> Result<Vec<ProjectionPoint>> {
        assumptions.validate()?;

        if !(MIN_HORIZON_MONTHS..=MAX_HORIZON_MONTHS).contains(&horizon_months) {
            return Err(Error::invalid_range(
                "horizon_months",
                horizon_months,
                MIN_HORIZON_MONTHS,
                MAX_HORIZON_MONTHS,
            ));
        }

        let first = snapshots.first().ok_or(ConfigError::MissingSnapshots)?;
        let last = snapshots.last().ok_or(ConfigError::MissingSnapshots)?;

        let span = months_between(first.date, last.date).max(0) as u32;
        if horizon_months < span {
            return Err(Error::invalid_range(
                "horizon_months",
                horizon_months,
                span.max(MIN_HORIZON_MONTHS),
                MAX_HORIZON_MONTHS,
            ));
        }

        let monthly_inflation = Decimal::ONE + assumptions.inflation_rate;
        let mut points = Vec::with_capacity((horizon_months - span) as usize + snapshots.len());

        // Seed one point per recorded snapshot, discounted to the first
        // snapshot's date.
        for snapshot in snapshots {
            let states = self.classifier.classify(snapshot);
            let by_category: HashMap<AssetCategory, Decimal> = states
                .into_iter()
                .map(|(category, state)| (category, state.value))
                .collect();

            let months_elapsed = months_between(first.date, snapshot.date).max(0);
            let months_to_last = months_between(snapshot.date, last.date).max(0);
            points.push(ProjectionPoint {
                date: snapshot.date,
                age: assumptions.current_age
                    - months_to_last as f64 / MONTHS_PER_YEAR as f64,
                total_value: snapshot.total_value,
                inflation_adjusted_value: discount(
                    snapshot.total_value,
                    monthly_inflation,
                    months_elapsed,
                ),
                by_category,
                is_historical: true,
            });
        }

        // Simulate forward from the last known per-category values.
        let seed = points
            .last()
            .map(|p| p.by_category.clone())
            .unwrap_or_default();
        let mut values = seed;

        let projected_months = horizon_months - span;
        debug!(
            "Projecting {} months forward from {} ({} historical points)",
            projected_months,
            last.date,
            points.len()
        );

        for step in 1..=projected_months {
            for category in AssetCategory::ALL {
                let current = values.get(&category).copied().unwrap_or(Decimal::ZERO);
                let grown = current * (Decimal::ONE + assumptions.monthly_growth(category))
                    + assumptions.monthly_contribution(category);
                values.insert(category, grown);
            }

            let total_value: Decimal = values.values().copied().sum();
            let months_elapsed = span as i64 + step as i64;
            let date = last
                .date
                .checked_add_months(Months::new(step))
                .ok_or_else(|| Error::invalid_range("horizon_months", step, 0u32, MAX_HORIZON_MONTHS))?;

            points.push(ProjectionPoint {
                date,
                age: assumptions.current_age + step as f64 / MONTHS_PER_YEAR as f64,
                total_value,
                inflation_adjusted_value: discount(total_value, monthly_inflation, months_elapsed),
                by_category: values.clone(),
                is_historical: false,
            });
        }

        Ok(points)
    }
}

/// Discounts a nominal value by compounded monthly inflation.
fn discount(value: Decimal, monthly_inflation: Decimal, months: i64) -> Decimal {
    if months <= 0 || monthly_inflation == Decimal::ONE {
        return value;
    }
    value / monthly_inflation.powi(months)
}
