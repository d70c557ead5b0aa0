//! Claiming adjustment factor (early reduction / delayed retirement credits)
//!
//! Early claims lose 5/9 of 1% per month for the first 36 months before FRA
//! and 5/12 of 1% per month beyond that. Late claims gain 2/3 of 1% per month,
//! with no credits accruing past age 70.

/// Age 70 in months; delayed retirement credits stop here
pub const MAX_CREDIT_AGE_MONTHS: u32 = 70 * 12;

/// Months before FRA reduced at the higher 5/9 rate
const FIRST_TIER_MONTHS: u32 = 36;

/// Common denominator for the early-reduction rates (5/900 = 4/720, 5/1200 = 3/720)
const EARLY_DENOMINATOR: u32 = 720;
const FIRST_TIER_NUMERATOR: u32 = 4;
const SECOND_TIER_NUMERATOR: u32 = 3;

/// Delayed credit rate is 2/300 per month
const DELAYED_DENOMINATOR: u32 = 300;
const DELAYED_NUMERATOR: u32 = 2;

/// Benefit multiplier for claiming at `claim_age_months` given FRA at `fra_months`
///
/// Both arguments are ages in months since birth. The factor is formed as a
/// single integer ratio so that tabulated values come out exact
/// (FRA 67: 62 -> 0.70, 70 -> 1.24).
pub fn claiming_factor(claim_age_months: u32, fra_months: u32) -> f64 {
    if claim_age_months == fra_months {
        return 1.0;
    }

    if claim_age_months < fra_months {
        let early = fra_months - claim_age_months;
        let first_tier = early.min(FIRST_TIER_MONTHS);
        let second_tier = early - first_tier;
        let reduction = FIRST_TIER_NUMERATOR * first_tier + SECOND_TIER_NUMERATOR * second_tier;
        return (EARLY_DENOMINATOR as f64 - reduction as f64) / EARLY_DENOMINATOR as f64;
    }

    let delayed = (claim_age_months - fra_months)
        .min(MAX_CREDIT_AGE_MONTHS.saturating_sub(fra_months));
    (DELAYED_DENOMINATOR + DELAYED_NUMERATOR * delayed) as f64 / DELAYED_DENOMINATOR as f64
}

/// Factor expressed as a percentage rounded to one decimal (e.g. 70.0, 124.0)
pub fn factor_percent(factor: f64) -> f64 {
    (factor * 1000.0).round() / 10.0
}
