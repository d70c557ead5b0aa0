//! Household runner for batch evaluations
//!
//! Loads assumptions once, then evaluates many households or COLA scenarios
//! without re-reading the life table.

use std::path::Path;

use rayon::prelude::*;

use crate::assumptions::Assumptions;
use crate::engine::{ClaimingEngine, ClaimingRequest, ClaimingResult, EngineConfig};
use crate::error::Result;
use crate::person::Household;

/// Result for one household in a batch
#[derive(Debug, Clone)]
pub struct HouseholdResult {
    pub household_id: u32,
    pub result: ClaimingResult,
}

/// Pre-loaded runner for many evaluations
///
/// # Example
/// ```ignore
/// let runner = HouseholdRunner::from_csv_path(Path::new("assumptions"))?;
/// for household in &households {
///     let result = runner.run(&household.request);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HouseholdRunner {
    engine: ClaimingEngine,
}

impl HouseholdRunner {
    /// Runner with the built-in life table and default config
    pub fn new() -> Self {
        Self::with_assumptions(Assumptions::default_tables(), EngineConfig::default())
    }

    /// Runner whose life table is read from `<dir>/life_table.csv`
    pub fn from_csv_path(dir: &Path) -> Result<Self> {
        Ok(Self::with_assumptions(
            Assumptions::from_csv_path(dir)?,
            EngineConfig::default(),
        ))
    }

    pub fn with_assumptions(assumptions: Assumptions, config: EngineConfig) -> Self {
        Self {
            engine: ClaimingEngine::new(assumptions, config),
        }
    }

    pub fn run(&self, request: &ClaimingRequest) -> ClaimingResult {
        self.engine.evaluate(request)
    }

    /// Evaluate every household in parallel, preserving input order
    pub fn run_batch(&self, households: &[Household]) -> Vec<HouseholdResult> {
        households
            .par_iter()
            .map(|household| HouseholdResult {
                household_id: household.household_id,
                result: self.engine.evaluate(&household.request),
            })
            .collect()
    }

    /// Evaluate one request under each COLA rate
    pub fn run_cola_scenarios(&self, request: &ClaimingRequest, cola_rates: &[f64]) -> Vec<ClaimingResult> {
        cola_rates
            .par_iter()
            .map(|&rate| {
                let scenario = request.clone().with_cola_rate(rate);
                self.engine.evaluate(&scenario)
            })
            .collect()
    }
}

impl Default for HouseholdRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::{PersonInput, Sex};
    use chrono::NaiveDate;

    fn request(pia: f64) -> ClaimingRequest {
        let birth = NaiveDate::from_ymd_opt(1960, 3, 1).unwrap();
        let as_of = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        ClaimingRequest::single(PersonInput::new(Some(birth), Sex::Female, pia), as_of)
    }

    #[test]
    fn test_batch_preserves_order() {
        let runner = HouseholdRunner::new();
        let households: Vec<Household> = (1..=20)
            .map(|id| Household {
                household_id: id,
                request: request(1000.0 + id as f64 * 50.0),
            })
            .collect();

        let results = runner.run_batch(&households);
        assert_eq!(results.len(), 20);
        for (household, out) in households.iter().zip(&results) {
            assert_eq!(out.household_id, household.household_id);
            assert_eq!(out.result, runner.run(&household.request));
        }
    }

    #[test]
    fn test_cola_scenarios() {
        let runner = HouseholdRunner::new();
        let results = runner.run_cola_scenarios(&request(2000.0), &[0.0, 2.6, 5.0]);
        assert_eq!(results.len(), 3);

        // Higher COLA raises every lifetime value
        let lifetime_at_62 = |r: &ClaimingResult| r.you.strategies[0].lifetime_value;
        assert!(lifetime_at_62(&results[1]) > lifetime_at_62(&results[0]));
        assert!(lifetime_at_62(&results[2]) > lifetime_at_62(&results[1]));
        assert!(results[2].total_projected_value > results[0].total_projected_value);
    }
}
