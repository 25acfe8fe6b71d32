pub mod classification_model;
pub mod classification_service;

pub use classification_model::{AssetCategory, CategoryState};
pub use classification_service::ClassificationService;
