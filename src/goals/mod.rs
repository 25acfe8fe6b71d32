pub mod goals_model;
pub mod goals_service;

pub use goals_model::{
    FundingSource, Goal, GoalEvaluation, GoalFundingMap, GoalStatus, GoalSummary, GoalType,
};
pub use goals_service::GoalService;
