pub mod whatif_model;
pub mod whatif_service;

pub use whatif_model::{AllocationImpact, GoalImpact, WhatIfResult};
pub use whatif_service::WhatIfService;
