//! Per-age claiming strategies for one person

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::factor::{claiming_factor, factor_percent};

/// Whole-year claim ages searched by default
pub const DEFAULT_CLAIM_AGES: RangeInclusive<u32> = 62..=70;

/// One candidate claiming age and its projected benefits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRow {
    pub claim_age: u32,

    /// Month offset within the claim year (always 0 for generated rows)
    pub claim_months: u32,

    /// Adjustment factor as a percentage of PIA, one decimal
    pub factor_pct: f64,

    /// Monthly benefit, nearest whole dollar
    pub monthly_benefit: f64,

    /// Annual benefit in the first year of collection, nearest whole dollar
    pub annual_benefit: f64,

    /// Expected years collecting, one decimal (display only)
    pub years_collecting: f64,

    /// COLA-compounded sum of benefits over whole years collected, nearest whole dollar
    pub lifetime_value: f64,

    /// Spouse's optimal claim age, attached by the joint optimizer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse_claim_age: Option<u32>,

    /// Larger of the two partners' monthly benefits, annualized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survivor_benefit: Option<f64>,
}

/// Inputs shared by every row generated for one person
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyInputs {
    pub primary_insurance_amount: f64,
    pub fra_months: u32,
    /// Expected age at death
    pub life_expectancy_age: f64,
    /// Annual COLA, percent
    pub cola_rate: f64,
    pub working_before_fra: bool,
}

/// Enumerates whole-year claim ages and values each one
#[derive(Debug, Clone)]
pub struct StrategyGenerator {
    claim_ages: RangeInclusive<u32>,
}

impl Default for StrategyGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CLAIM_AGES)
    }
}

impl StrategyGenerator {
    pub fn new(claim_ages: RangeInclusive<u32>) -> Self {
        Self { claim_ages }
    }

    /// One row per claim age in ascending order; empty when PIA <= 0
    pub fn generate(&self, inputs: &StrategyInputs) -> Vec<StrategyRow> {
        if inputs.primary_insurance_amount <= 0.0 {
            return Vec::new();
        }

        self.claim_ages
            .clone()
            .map(|age| strategy_row(age, inputs))
            .collect()
    }
}

/// Generate the default 62-70 strategy set
pub fn generate_strategies(
    pia: f64,
    fra_months: u32,
    life_expectancy_age: f64,
    cola_rate: f64,
    working_before_fra: bool,
) -> Vec<StrategyRow> {
    StrategyGenerator::default().generate(&StrategyInputs {
        primary_insurance_amount: pia,
        fra_months,
        life_expectancy_age,
        cola_rate,
        working_before_fra,
    })
}

fn strategy_row(age: u32, inputs: &StrategyInputs) -> StrategyRow {
    let claim_months = age * 12;
    let factor = claiming_factor(claim_months, inputs.fra_months);
    let monthly = monthly_benefit(
        inputs.primary_insurance_amount,
        factor,
        claim_months,
        inputs.fra_months,
        inputs.working_before_fra,
    );

    let years_collecting = (inputs.life_expectancy_age - age as f64).max(0.0);
    let lifetime = lifetime_value(monthly, whole_years_collecting(years_collecting), inputs.cola_rate);

    StrategyRow {
        claim_age: age,
        claim_months: 0,
        factor_pct: factor_percent(factor),
        monthly_benefit: round_currency(monthly),
        annual_benefit: round_currency(monthly * 12.0),
        years_collecting: round_one_decimal(years_collecting),
        lifetime_value: round_currency(lifetime),
        spouse_claim_age: None,
        survivor_benefit: None,
    }
}

/// PIA scaled by the claiming factor, halved by the earnings test when
/// still working and claiming before FRA
pub fn monthly_benefit(
    pia: f64,
    factor: f64,
    claim_months: u32,
    fra_months: u32,
    working_before_fra: bool,
) -> f64 {
    let monthly = pia * factor;
    if working_before_fra && claim_months < fra_months {
        monthly * 0.5
    } else {
        monthly
    }
}

/// Whole years of payments counted toward lifetime value
///
/// Life expectancy is fractional; a partial final year is dropped.
pub fn whole_years_collecting(years_collecting: f64) -> u32 {
    years_collecting.max(0.0).floor() as u32
}

/// Sum of `whole_years` annual payments, each year's COLA compounding on the last
pub fn lifetime_value(monthly: f64, whole_years: u32, cola_rate: f64) -> f64 {
    let annual = monthly * 12.0;
    let growth = 1.0 + cola_rate / 100.0;
    (0..whole_years)
        .map(|year| annual * growth.powi(year as i32))
        .sum()
}

/// Nearest whole currency unit
pub fn round_currency(value: f64) -> f64 {
    value.round()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn inputs(pia: f64, working: bool) -> StrategyInputs {
        StrategyInputs {
            primary_insurance_amount: pia,
            fra_months: 67 * 12,
            life_expectancy_age: 84.3,
            cola_rate: 0.0,
            working_before_fra: working,
        }
    }

    #[test]
    fn test_zero_pia_yields_no_strategies() {
        assert!(StrategyGenerator::default().generate(&inputs(0.0, false)).is_empty());
        assert!(generate_strategies(-10.0, 804, 84.0, 2.6, false).is_empty());
    }

    #[test]
    fn test_nine_rows_ages_62_to_70() {
        let rows = StrategyGenerator::default().generate(&inputs(2000.0, false));
        assert_eq!(rows.len(), 9);
        let ages: Vec<u32> = rows.iter().map(|r| r.claim_age).collect();
        assert_eq!(ages, (62..=70).collect::<Vec<_>>());
        assert!(rows.iter().all(|r| r.claim_months == 0));
    }

    #[test]
    fn test_row_values() {
        let rows = StrategyGenerator::default().generate(&inputs(2000.0, false));
        let at_62 = &rows[0];
        assert_eq!(at_62.factor_pct, 70.0);
        assert_eq!(at_62.monthly_benefit, 1400.0);
        assert_eq!(at_62.annual_benefit, 16800.0);
        assert_relative_eq!(at_62.years_collecting, 22.3);
        // 22 whole years at 0% COLA
        assert_eq!(at_62.lifetime_value, 16800.0 * 22.0);

        let at_67 = &rows[5];
        assert_eq!(at_67.factor_pct, 100.0);
        assert_eq!(at_67.monthly_benefit, 2000.0);

        let at_70 = &rows[8];
        assert_eq!(at_70.factor_pct, 124.0);
        assert_eq!(at_70.monthly_benefit, 2480.0);
        assert_eq!(at_70.lifetime_value, 2480.0 * 12.0 * 14.0);
    }

    #[test]
    fn test_earnings_test_halves_only_before_fra() {
        let base = StrategyGenerator::default().generate(&inputs(2000.0, false));
        let working = StrategyGenerator::default().generate(&inputs(2000.0, true));
        for (b, w) in base.iter().zip(&working) {
            if b.claim_age < 67 {
                // Both sides are rounded to whole dollars independently
                assert!((w.monthly_benefit - b.monthly_benefit / 2.0).abs() <= 1.0);
                assert!(w.monthly_benefit < b.monthly_benefit);
            } else {
                assert_eq!(w.monthly_benefit, b.monthly_benefit);
            }
        }
        assert_eq!(working[0].monthly_benefit, 700.0);
    }

    #[test]
    fn test_whole_years_collecting_floors() {
        assert_eq!(whole_years_collecting(22.9), 22);
        assert_eq!(whole_years_collecting(22.0), 22);
        assert_eq!(whole_years_collecting(0.4), 0);
        assert_eq!(whole_years_collecting(-3.0), 0);
    }

    #[test]
    fn test_partial_final_year_is_dropped() {
        let mut i = inputs(1000.0, false);
        i.life_expectancy_age = 80.9;
        let rows = StrategyGenerator::default().generate(&i);
        // Claim at 70: 10.9 years expected, 10 counted
        assert_eq!(rows[8].lifetime_value, (1000.0 * 1.24 * 12.0 * 10.0_f64).round());
    }

    #[test]
    fn test_lifetime_value_compounds_cola() {
        let value = lifetime_value(1000.0, 3, 2.0);
        let expected = 12000.0 * (1.0 + 1.02 + 1.02 * 1.02);
        assert_relative_eq!(value, expected, epsilon = 1e-9);
        assert_eq!(lifetime_value(1000.0, 0, 2.0), 0.0);
    }

    #[test]
    fn test_life_expectancy_before_claim_age_gives_zero() {
        let mut i = inputs(2000.0, false);
        i.life_expectancy_age = 65.0;
        let rows = StrategyGenerator::default().generate(&i);
        assert_eq!(rows.len(), 9);
        for row in rows.iter().filter(|r| r.claim_age >= 65) {
            assert_eq!(row.years_collecting, 0.0);
            assert_eq!(row.lifetime_value, 0.0);
        }
    }
}
