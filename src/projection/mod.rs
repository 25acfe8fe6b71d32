pub mod projection_model;
pub mod projection_service;

pub use projection_model::{ProjectionAssumptions, ProjectionPoint};
pub use projection_service::ProjectionService;
