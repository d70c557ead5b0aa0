//! Month-precision comparison of manually selected claim ages
//!
//! Unlike the whole-year strategy set, lifetime value here is accumulated
//! month by month over `round((life expectancy - claim age) * 12)` months.
//! These rows are for preview only; the optimizer never sees them.

use serde::{Deserialize, Serialize};

use super::factor::claiming_factor;
use super::optimizer::first_maximum;
use super::strategy::{monthly_benefit, round_currency, StrategyInputs};
use crate::person::ClaimAge;
use crate::projection::breakeven::{pairwise_break_evens, BreakEven, ClaimStream};
use crate::recommendation::compose_comparison_summary;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub claim_age: ClaimAge,
    pub factor: f64,
    /// Nearest whole dollar
    pub monthly_benefit: f64,
    /// Nearest whole dollar
    pub lifetime_value: f64,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClaimAgeComparison {
    /// Rows in ascending claim-age order
    pub rows: Vec<ComparisonRow>,
    /// Selected age with the highest lifetime value (earliest on ties)
    pub best: Option<ClaimAge>,
    /// One entry per (earlier, later) pair of rows
    pub break_evens: Vec<BreakEven>,
    /// Plain-language summary of the comparison
    #[serde(default)]
    pub narrative: String,
}

impl ClaimAgeComparison {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Break-even between the earliest selected age and the best one, if they differ
    pub fn primary_break_even(&self) -> Option<&BreakEven> {
        let earliest = self.rows.first()?.claim_age;
        let best = self.best?;
        self.break_evens
            .iter()
            .find(|be| be.earlier == earliest && be.later == best)
    }
}

/// Relationship of a claim age to FRA, e.g. "30.0% reduction (early)"
pub fn adjustment_note(factor: f64, claim_months: u32, fra_months: u32) -> String {
    if claim_months < fra_months {
        format!("{:.1}% reduction (early)", (1.0 - factor) * 100.0)
    } else if claim_months > fra_months {
        format!("{:.1}% increase (delayed)", (factor - 1.0) * 100.0)
    } else {
        "Full Retirement Age".to_string()
    }
}

/// Months of payments between the claim age and expected age at death
pub fn months_collecting(life_expectancy_age: f64, claim_age: ClaimAge) -> u32 {
    ((life_expectancy_age - claim_age.as_decimal_years()) * 12.0)
        .round()
        .max(0.0) as u32
}

/// Monthly accumulation; COLA steps every 12 months drawn
pub fn monthly_lifetime_value(monthly: f64, months: u32, cola_rate: f64) -> f64 {
    let growth = 1.0 + cola_rate / 100.0;
    (0..months)
        .map(|m| monthly * growth.powi((m / 12) as i32))
        .sum()
}

/// Compare the given claim ages for one person
///
/// Ages are sorted ascending. Returns an empty comparison when PIA <= 0.
/// The best age is the first with the highest lifetime value, so ties go to
/// the earlier age.
pub fn compare_claim_ages(
    claim_ages: &[ClaimAge],
    inputs: &StrategyInputs,
    horizon_age: u32,
) -> ClaimAgeComparison {
    if inputs.primary_insurance_amount <= 0.0 || claim_ages.is_empty() {
        return ClaimAgeComparison {
            narrative: compose_comparison_summary(&ClaimAgeComparison::default()),
            ..ClaimAgeComparison::default()
        };
    }

    let mut ages = claim_ages.to_vec();
    ages.sort();

    let rows: Vec<ComparisonRow> = ages
        .iter()
        .map(|&age| {
            let claim_months = age.total_months();
            let factor = claiming_factor(claim_months, inputs.fra_months);
            let monthly = monthly_benefit(
                inputs.primary_insurance_amount,
                factor,
                claim_months,
                inputs.fra_months,
                inputs.working_before_fra,
            );
            let months = months_collecting(inputs.life_expectancy_age, age);
            ComparisonRow {
                claim_age: age,
                factor,
                monthly_benefit: round_currency(monthly),
                lifetime_value: round_currency(monthly_lifetime_value(monthly, months, inputs.cola_rate)),
                note: adjustment_note(factor, claim_months, inputs.fra_months),
            }
        })
        .collect();

    let best = first_maximum(&rows, |r| r.lifetime_value).map(|r| r.claim_age);

    let streams: Vec<ClaimStream> = rows
        .iter()
        .map(|r| ClaimStream::new(r.claim_age, r.monthly_benefit))
        .collect();
    let break_evens = pairwise_break_evens(&streams, inputs.cola_rate, horizon_age);

    let mut comparison = ClaimAgeComparison {
        rows,
        best,
        break_evens,
        narrative: String::new(),
    };
    comparison.narrative = compose_comparison_summary(&comparison);
    comparison
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::breakeven::DEFAULT_HORIZON_AGE;

    fn inputs() -> StrategyInputs {
        StrategyInputs {
            primary_insurance_amount: 2000.0,
            fra_months: 67 * 12,
            life_expectancy_age: 84.3,
            cola_rate: 0.0,
            working_before_fra: false,
        }
    }

    #[test]
    fn test_notes() {
        assert_eq!(adjustment_note(0.70, 744, 804), "30.0% reduction (early)");
        assert_eq!(adjustment_note(1.24, 840, 804), "24.0% increase (delayed)");
        assert_eq!(adjustment_note(1.0, 804, 804), "Full Retirement Age");
    }

    #[test]
    fn test_months_collecting_rounds() {
        // (84.3 - 62.5) * 12 = 261.6
        assert_eq!(months_collecting(84.3, ClaimAge::new(62, 6)), 262);
        assert_eq!(months_collecting(60.0, ClaimAge::new(62, 0)), 0);
    }

    #[test]
    fn test_rows_sorted_and_valued() {
        let ages = [ClaimAge::new(67, 0), ClaimAge::new(62, 0), ClaimAge::new(64, 6)];
        let cmp = compare_claim_ages(&ages, &inputs(), DEFAULT_HORIZON_AGE);
        let order: Vec<ClaimAge> = cmp.rows.iter().map(|r| r.claim_age).collect();
        assert_eq!(order, vec![ClaimAge::new(62, 0), ClaimAge::new(64, 6), ClaimAge::new(67, 0)]);

        let first = &cmp.rows[0];
        assert_eq!(first.monthly_benefit, 1400.0);
        // round((84.3 - 62) * 12) = 268 months at 1400
        assert_eq!(first.lifetime_value, 1400.0 * 268.0);
        assert_eq!(cmp.break_evens.len(), 3);
    }

    #[test]
    fn test_best_and_primary_break_even() {
        let ages = [ClaimAge::new(62, 0), ClaimAge::new(70, 0)];
        let cmp = compare_claim_ages(&ages, &inputs(), DEFAULT_HORIZON_AGE);
        // 62: 1400 * 268 = 375200; 70: 2480 * round(14.3 * 12 = 171.6) = 2480 * 172 = 426560
        assert_eq!(cmp.best, Some(ClaimAge::new(70, 0)));
        let be = cmp.primary_break_even().unwrap();
        assert_eq!(be.break_even_age, Some(ClaimAge::new(80, 4)));
    }

    #[test]
    fn test_ties_go_to_earlier_age() {
        // Life expectancy before both claims: every lifetime value is 0
        let mut i = inputs();
        i.life_expectancy_age = 60.0;
        let cmp = compare_claim_ages(&[ClaimAge::new(66, 0), ClaimAge::new(64, 0)], &i, DEFAULT_HORIZON_AGE);
        assert!(cmp.rows.iter().all(|r| r.lifetime_value == 0.0));
        assert_eq!(cmp.best, Some(ClaimAge::new(64, 0)));
    }

    #[test]
    fn test_zero_pia_is_empty() {
        let mut i = inputs();
        i.primary_insurance_amount = 0.0;
        let cmp = compare_claim_ages(&[ClaimAge::new(62, 0)], &i, DEFAULT_HORIZON_AGE);
        assert!(cmp.is_empty());
        assert!(cmp.best.is_none());
        assert!(cmp.primary_break_even().is_none());
    }

    #[test]
    fn test_monthly_lifetime_value_cola_steps_yearly() {
        let value = monthly_lifetime_value(100.0, 13, 10.0);
        assert!((value - (1200.0 + 110.0)).abs() < 1e-9);
    }
}
