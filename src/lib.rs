//! Claiming Strategy - retirement benefit claiming engine
//!
//! This library provides:
//! - Full retirement age by birth year and sex-specific life expectancy
//! - Claiming adjustment factors for early and delayed claims
//! - Per-age strategy generation and optimal claim-age selection for one
//!   person or a couple
//! - Cumulative projection series, break-even ages and a recommendation summary
//! - Batch evaluation of households from CSV

pub mod error;
pub mod person;
pub mod assumptions;
pub mod claiming;
pub mod projection;
pub mod recommendation;
pub mod engine;
pub mod scenario;
pub mod format;

// Re-export commonly used types
pub use error::{ClaimingError, Result};
pub use person::{ClaimAge, Household, PersonInput, Sex};
pub use assumptions::{Assumptions, FullRetirementAge, LifeTable};
pub use claiming::{StrategyRow, StrategySort, JointOptimum};
pub use projection::{ChartData, ProjectionSeries};
pub use engine::{ClaimingEngine, ClaimingRequest, ClaimingResult, EngineConfig, PersonResult};
pub use scenario::HouseholdRunner;
