pub mod advice_model;
pub mod advice_service;

pub use advice_model::{
    AdviceReport, PortfolioSummary, Priority, Recommendation, RecommendationKind, TargetAllocation,
};
pub use advice_service::AdviceService;
