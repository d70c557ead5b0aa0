//! Cumulative-benefit series for charting representative strategies
//!
//! Three rows are charted: the earliest claim (age 62, else the first row),
//! the optimal row, and the latest claim (age 70, else the last row). Each
//! series holds one point per display age; the value at an age is the total
//! received *before* that birthday, so it is zero at the claim age itself.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::claiming::{earliest_row, optimal_strategy, round_currency, StrategyRow};

/// Ages shown on the chart's x-axis
pub const DEFAULT_DISPLAY_AGES: RangeInclusive<u32> = 62..=95;

const LATE_CLAIM_AGE: u32 = 70;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesRole {
    Early,
    Optimal,
    Late,
}

impl SeriesRole {
    pub fn label(&self) -> &'static str {
        match self {
            SeriesRole::Early => "Early",
            SeriesRole::Optimal => "Optimal",
            SeriesRole::Late => "Late",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub age: u32,
    /// Nearest whole dollar
    pub cumulative: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSeries {
    pub role: SeriesRole,
    pub claim_age: u32,
    pub monthly_benefit: f64,
    pub points: Vec<SeriesPoint>,
}

/// Chart payload; empty strategy sets produce `NotEnoughData`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "series", rename_all = "snake_case")]
pub enum ChartData {
    Ready(Vec<ProjectionSeries>),
    NotEnoughData,
}

impl ChartData {
    pub fn series(&self) -> &[ProjectionSeries] {
        match self {
            ChartData::Ready(series) => series,
            ChartData::NotEnoughData => &[],
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ChartData::Ready(_))
    }
}

#[derive(Debug, Clone)]
pub struct SeriesBuilder {
    display_ages: RangeInclusive<u32>,
}

impl Default for SeriesBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_AGES)
    }
}

impl SeriesBuilder {
    pub fn new(display_ages: RangeInclusive<u32>) -> Self {
        Self { display_ages }
    }

    /// Early / optimal / late series for a strategy set
    ///
    /// When two roles pick the same row, it is charted once and the optimal
    /// role wins the label, so one to three series are returned.
    pub fn build(&self, rows: &[StrategyRow], cola_rate: f64) -> ChartData {
        let (Some(early), Some(last), Some(optimal)) = (earliest_row(rows), rows.last(), optimal_strategy(rows)) else {
            return ChartData::NotEnoughData;
        };

        let late = rows.iter().find(|r| r.claim_age == LATE_CLAIM_AGE).unwrap_or(last);

        let mut picked: Vec<(SeriesRole, &StrategyRow)> = Vec::with_capacity(3);
        for (role, row) in [
            (SeriesRole::Early, early),
            (SeriesRole::Optimal, optimal),
            (SeriesRole::Late, late),
        ] {
            match picked.iter().position(|(_, existing)| existing.claim_age == row.claim_age) {
                Some(idx) => {
                    if role == SeriesRole::Optimal {
                        picked[idx].0 = role;
                    }
                }
                None => picked.push((role, row)),
            }
        }

        ChartData::Ready(
            picked
                .into_iter()
                .map(|(role, row)| self.series_for(role, row, cola_rate))
                .collect(),
        )
    }

    fn series_for(&self, role: SeriesRole, row: &StrategyRow, cola_rate: f64) -> ProjectionSeries {
        let annual = row.monthly_benefit * 12.0;
        let growth = 1.0 + cola_rate / 100.0;

        let mut cumulative = 0.0;
        let points = self
            .display_ages
            .clone()
            .map(|age| {
                let point = SeriesPoint {
                    age,
                    cumulative: round_currency(cumulative),
                };
                if age >= row.claim_age {
                    cumulative += annual * growth.powi((age - row.claim_age) as i32);
                }
                point
            })
            .collect();

        ProjectionSeries {
            role,
            claim_age: row.claim_age,
            monthly_benefit: row.monthly_benefit,
            points,
        }
    }
}
