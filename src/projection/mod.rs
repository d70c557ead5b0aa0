//! Cumulative benefit projections and break-even analysis

pub mod breakeven;
mod series;

pub use breakeven::{break_even, pairwise_break_evens, BreakEven, ClaimStream, DEFAULT_HORIZON_AGE};
pub use series::{ChartData, ProjectionSeries, SeriesBuilder, SeriesPoint, SeriesRole, DEFAULT_DISPLAY_AGES};
