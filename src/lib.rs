pub mod constants;
pub mod errors;

pub mod advice;
pub mod classification;
pub mod goals;
pub mod projection;
pub mod snapshot;
pub mod whatif;

pub use errors::{Error, Result};

pub use advice::{AdviceReport, AdviceService, PortfolioSummary, Recommendation, TargetAllocation};
pub use classification::{AssetCategory, CategoryState, ClassificationService};
pub use goals::{Goal, GoalEvaluation, GoalFundingMap, GoalService, GoalStatus, GoalType};
pub use projection::{ProjectionAssumptions, ProjectionPoint, ProjectionService};
pub use snapshot::{Snapshot, SnapshotStoreTrait};
pub use whatif::{WhatIfResult, WhatIfService};
