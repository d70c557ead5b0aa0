//! Claiming strategy search: adjustment factors, per-age strategies,
//! optimal selection and table sorting

mod factor;
mod strategy;
mod optimizer;
mod sort;
pub mod compare;

pub use factor::{claiming_factor, factor_percent, MAX_CREDIT_AGE_MONTHS};
pub use strategy::{
    generate_strategies, lifetime_value, monthly_benefit, round_currency, whole_years_collecting,
    StrategyGenerator, StrategyInputs, StrategyRow, DEFAULT_CLAIM_AGES,
};
pub use optimizer::{earliest_row, optimal_strategy, optimize_jointly, JointOptimum};
pub use sort::{SortDirection, SortField, StrategySort};
pub use compare::{compare_claim_ages, ClaimAgeComparison, ComparisonRow};
