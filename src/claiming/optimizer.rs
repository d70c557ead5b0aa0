//! Optimal claim age selection for one person or a couple
//!
//! Each partner's optimum is found independently. When a spouse is present,
//! the spouse's optimum is then displayed alongside every one of the primary
//! person's rows; it never feeds back into the primary's choice. There is no
//! two-dimensional search over both claim ages.

use serde::{Deserialize, Serialize};

use super::strategy::StrategyRow;
use crate::person::ClaimAge;

/// First item with the largest key
///
/// Items are scanned in order and the running best is only replaced on a
/// strictly greater key, so exact ties go to the earliest item.
pub(crate) fn first_maximum<T>(items: &[T], key: impl Fn(&T) -> f64) -> Option<&T> {
    let mut best: Option<&T> = None;
    for item in items {
        match best {
            Some(current) if key(item) <= key(current) => {}
            _ => best = Some(item),
        }
    }
    best
}

/// Row with the highest lifetime value; ties go to the earliest claim age
pub fn optimal_strategy(rows: &[StrategyRow]) -> Option<&StrategyRow> {
    first_maximum(rows, |r| r.lifetime_value)
}

/// The age-62 row, or the first row when 62 is not in the set
pub fn earliest_row(rows: &[StrategyRow]) -> Option<&StrategyRow> {
    rows.iter()
        .find(|r| r.claim_age == ClaimAge::EARLIEST.years)
        .or_else(|| rows.first())
}

/// Optima for the household and their combined value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointOptimum {
    pub your_optimal: Option<StrategyRow>,
    pub spouse_optimal: Option<StrategyRow>,
    /// Primary optimal lifetime value plus spouse optimal lifetime value
    pub total_projected_value: f64,
}

/// Select each partner's optimum and annotate the primary's rows with the
/// spouse's optimal claim age and the resulting survivor benefit
pub fn optimize_jointly(yours: &mut [StrategyRow], spouse: Option<&[StrategyRow]>) -> JointOptimum {
    let spouse_optimal = spouse.and_then(optimal_strategy).cloned();

    if let Some(spouse_best) = &spouse_optimal {
        for row in yours.iter_mut() {
            row.spouse_claim_age = Some(spouse_best.claim_age);
            row.survivor_benefit = Some(row.monthly_benefit.max(spouse_best.monthly_benefit) * 12.0);
        }
    }

    let your_optimal = optimal_strategy(yours).cloned();
    let total_projected_value = your_optimal.as_ref().map_or(0.0, |r| r.lifetime_value)
        + spouse_optimal.as_ref().map_or(0.0, |r| r.lifetime_value);

    if let Some(best) = &your_optimal {
        log::debug!(
            "optimal claim age {} (lifetime {:.0}); spouse optimum {:?}",
            best.claim_age,
            best.lifetime_value,
            spouse_optimal.as_ref().map(|r| r.claim_age)
        );
    }

    JointOptimum {
        your_optimal,
        spouse_optimal,
        total_projected_value,
    }
}
