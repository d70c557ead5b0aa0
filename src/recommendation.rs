//! Plain-language summary of a claiming evaluation

use crate::claiming::{earliest_row, ClaimAgeComparison, JointOptimum, StrategyRow};
use crate::format::{fmt_age, fmt_currency};
use crate::person::ClaimAge;
use crate::projection::{break_even, BreakEven, ClaimStream};

pub const NOT_ENOUGH_DATA: &str = "Enter your details above to receive a personalized recommendation.";

const SURVIVOR_NOTE: &str = "Coordinating with your spouse's optimal claim age also strengthens survivor \
                             protection, since the surviving partner keeps the larger of your two benefits.";

/// Break-even between claiming earliest and claiming at the optimum
///
/// `None` when there is nothing to compare or the optimum is the earliest row.
pub fn strategy_break_even(
    rows: &[StrategyRow],
    optimal: &StrategyRow,
    cola_rate: f64,
    horizon_age: u32,
) -> Option<BreakEven> {
    let early = earliest_row(rows)?;
    if optimal.claim_age <= early.claim_age {
        return None;
    }
    Some(break_even(
        ClaimStream::from_row(early),
        ClaimStream::from_row(optimal),
        cola_rate,
        horizon_age,
    ))
}

/// Compose the recommendation for the primary person
///
/// Compares the optimal row against the earliest claim. A break-even age is
/// mentioned when one is supplied and reached; a spouse optimum adds a fixed
/// survivor-protection sentence.
pub fn compose_recommendation(
    joint: &JointOptimum,
    rows: &[StrategyRow],
    primary_break_even: Option<&BreakEven>,
) -> String {
    let (Some(optimal), Some(early)) = (joint.your_optimal.as_ref(), earliest_row(rows)) else {
        return NOT_ENOUGH_DATA.to_string();
    };

    let mut text = if optimal.claim_age == early.claim_age {
        format!(
            "Claiming at age {} is optimal, with a projected lifetime value of {}.",
            optimal.claim_age,
            fmt_currency(optimal.lifetime_value)
        )
    } else {
        format!(
            "Delaying to age {} adds {} in projected lifetime value over claiming at {} ({} vs {}).",
            optimal.claim_age,
            fmt_currency(optimal.lifetime_value - early.lifetime_value),
            early.claim_age,
            fmt_currency(optimal.lifetime_value),
            fmt_currency(early.lifetime_value)
        )
    };

    if optimal.claim_age > early.claim_age {
        if let Some(age) = primary_break_even.and_then(|be| be.break_even_age) {
            text.push(' ');
            text.push_str(&break_even_sentences(age));
        }
    }

    if joint.spouse_optimal.is_some() {
        text.push(' ');
        text.push_str(SURVIVOR_NOTE);
    }

    text
}

/// Summary of a month-precision claim-age comparison
///
/// One selected age describes its benefit; several name the best age and,
/// when the earliest selection breaks even against it, the crossover age.
pub fn compose_comparison_summary(comparison: &ClaimAgeComparison) -> String {
    let best = comparison
        .best
        .and_then(|age| comparison.rows.iter().find(|r| r.claim_age == age));
    let Some(best) = best else {
        return NOT_ENOUGH_DATA.to_string();
    };

    if comparison.rows.len() == 1 {
        return format!(
            "With a single claiming age of {}, your estimated monthly benefit is {} with a projected lifetime value of {}.",
            fmt_age(best.claim_age.years, best.claim_age.months),
            fmt_currency(best.monthly_benefit),
            fmt_currency(best.lifetime_value)
        );
    }

    let mut text = format!(
        "Among your selected claiming ages, {} produces the highest projected lifetime value at {}.",
        fmt_age(best.claim_age.years, best.claim_age.months),
        fmt_currency(best.lifetime_value)
    );
    if let Some(age) = comparison.primary_break_even().and_then(|be| be.break_even_age) {
        text.push(' ');
        text.push_str(&break_even_sentences(age));
    }
    text
}

fn break_even_sentences(age: ClaimAge) -> String {
    format!(
        "Claiming earlier gives you more total benefits if you pass away before age {}. \
         If you live beyond {}, delaying becomes the better lifetime value.",
        age.years,
        fmt_age(age.years, age.months)
    )
}
