//! Sort state for strategy tables
//!
//! The engine always returns rows in ascending claim-age order. Callers keep
//! a `StrategySort` alongside the table and apply it to the returned rows.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::strategy::StrategyRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    ClaimAge,
    MonthlyBenefit,
    LifetimeValue,
    SpouseClaimAge,
    SurvivorBenefit,
}

impl SortField {
    /// Sort key; missing spouse fields sort as zero
    fn key(&self, row: &StrategyRow) -> f64 {
        match self {
            SortField::ClaimAge => (row.claim_age * 12 + row.claim_months) as f64,
            SortField::MonthlyBenefit => row.monthly_benefit,
            SortField::LifetimeValue => row.lifetime_value,
            SortField::SpouseClaimAge => row.spouse_claim_age.unwrap_or(0) as f64,
            SortField::SurvivorBenefit => row.survivor_benefit.unwrap_or(0.0),
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "claim_age" | "claimAge" => Ok(SortField::ClaimAge),
            "monthly_benefit" | "monthlyBenefit" => Ok(SortField::MonthlyBenefit),
            "lifetime_value" | "lifetime" => Ok(SortField::LifetimeValue),
            "spouse_claim_age" | "spouseClaimAge" => Ok(SortField::SpouseClaimAge),
            "survivor_benefit" | "survivorBenefit" => Ok(SortField::SurvivorBenefit),
            other => Err(format!("unknown sort field: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Current sort column and direction; unsorted until a field is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StrategySort {
    pub field: Option<SortField>,
    pub direction: SortDirection,
}

impl StrategySort {
    pub fn by(field: SortField, direction: SortDirection) -> Self {
        Self {
            field: Some(field),
            direction,
        }
    }

    /// Clicking the active column flips direction; a new column starts ascending
    pub fn toggle(&mut self, field: SortField) {
        if self.field == Some(field) {
            self.direction = self.direction.flipped();
        } else {
            self.field = Some(field);
            self.direction = SortDirection::Asc;
        }
    }

    /// Sorted copy of `rows`; stable, so equal keys keep their input order
    pub fn apply(&self, rows: &[StrategyRow]) -> Vec<StrategyRow> {
        let mut sorted = rows.to_vec();
        if let Some(field) = self.field {
            sorted.sort_by(|a, b| {
                let ord = field
                    .key(a)
                    .partial_cmp(&field.key(b))
                    .unwrap_or(Ordering::Equal);
                match self.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            });
        }
        sorted
    }
}
