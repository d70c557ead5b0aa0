//! Break-even ages between an earlier and a later claim
//!
//! Cumulative benefits are simulated month by month from the earlier claim
//! month. COLA steps up once per 12 months drawn. The break-even is the first
//! month in which the later claim's running total strictly exceeds the
//! earlier claim's.

use serde::{Deserialize, Serialize};

use crate::claiming::StrategyRow;
use crate::person::ClaimAge;

/// Age through which cumulative benefits are simulated
pub const DEFAULT_HORIZON_AGE: u32 = 100;

/// A claim start and its monthly benefit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClaimStream {
    pub claim_age: ClaimAge,
    pub monthly_benefit: f64,
}

impl ClaimStream {
    pub fn new(claim_age: ClaimAge, monthly_benefit: f64) -> Self {
        Self {
            claim_age,
            monthly_benefit,
        }
    }

    pub fn from_row(row: &StrategyRow) -> Self {
        Self::new(ClaimAge::new(row.claim_age, row.claim_months), row.monthly_benefit)
    }

    /// Payment in age-month `age_month`, zero before the claim starts
    fn payment_at(&self, age_month: u32, growth: f64) -> f64 {
        let start = self.claim_age.total_months();
        if age_month < start {
            return 0.0;
        }
        let years_drawn = (age_month - start) / 12;
        self.monthly_benefit * growth.powi(years_drawn as i32)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEven {
    pub earlier: ClaimAge,
    pub later: ClaimAge,
    pub earlier_monthly: f64,
    pub later_monthly: f64,
    /// First age at which the later claim has paid more in total; `None` if
    /// the earlier claim stays ahead through the horizon
    pub break_even_age: Option<ClaimAge>,
}

impl BreakEven {
    /// Explanation sentence for display
    pub fn describe(&self) -> String {
        match self.break_even_age {
            Some(age) => format!(
                "If you live past {}, claiming at {} pays more over your lifetime than claiming at {}.",
                age, self.later, self.earlier
            ),
            None => format!(
                "Claiming at {} produces more lifetime benefits regardless of lifespan.",
                self.earlier
            ),
        }
    }
}

/// Break-even between `earlier` and `later` with `cola_rate` percent COLA
pub fn break_even(earlier: ClaimStream, later: ClaimStream, cola_rate: f64, horizon_age: u32) -> BreakEven {
    let growth = 1.0 + cola_rate / 100.0;
    let start = earlier.claim_age.total_months();
    let end = horizon_age * 12;

    let mut cum_earlier = 0.0;
    let mut cum_later = 0.0;
    let mut crossover = None;

    for age_month in start..=end {
        cum_earlier += earlier.payment_at(age_month, growth);
        cum_later += later.payment_at(age_month, growth);
        if cum_later > cum_earlier {
            crossover = Some(ClaimAge::from_total_months(age_month));
            break;
        }
    }

    BreakEven {
        earlier: earlier.claim_age,
        later: later.claim_age,
        earlier_monthly: earlier.monthly_benefit,
        later_monthly: later.monthly_benefit,
        break_even_age: crossover,
    }
}

/// Break-evens for every (earlier, later) pair of ascending claim streams
pub fn pairwise_break_evens(streams: &[ClaimStream], cola_rate: f64, horizon_age: u32) -> Vec<BreakEven> {
    let mut results = Vec::new();
    for (i, earlier) in streams.iter().enumerate() {
        for later in &streams[i + 1..] {
            results.push(break_even(*earlier, *later, cola_rate, horizon_age));
        }
    }
    results
}
