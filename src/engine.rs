//! End-to-end claiming evaluation for a household
//!
//! The engine takes a full request snapshot and returns a full result
//! snapshot. It does no I/O and never reads the clock; the caller supplies the
//! `as_of` date used for current age.

use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::assumptions::{Assumptions, FullRetirementAge};
use crate::claiming::{
    compare_claim_ages, optimize_jointly, ClaimAgeComparison, StrategyGenerator, StrategyInputs,
    StrategyRow, DEFAULT_CLAIM_AGES,
};
use crate::error::{ClaimingError, Result};
use crate::person::{age_on, PersonInput, DEFAULT_COLA_RATE};
use crate::projection::{BreakEven, ChartData, SeriesBuilder, DEFAULT_DISPLAY_AGES, DEFAULT_HORIZON_AGE};
use crate::recommendation::{compose_recommendation, strategy_break_even};

/// Configuration for an evaluation
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Whole-year claim ages searched by the optimizer
    pub claim_ages: RangeInclusive<u32>,

    /// Ages plotted by the projection series
    pub display_ages: RangeInclusive<u32>,

    /// Age through which break-evens are simulated
    pub horizon_age: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            claim_ages: DEFAULT_CLAIM_AGES,
            display_ages: DEFAULT_DISPLAY_AGES,
            horizon_age: DEFAULT_HORIZON_AGE,
        }
    }
}

fn default_cola_rate() -> f64 {
    DEFAULT_COLA_RATE
}

/// Everything one evaluation needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimingRequest {
    pub you: PersonInput,

    #[serde(default)]
    pub spouse: Option<PersonInput>,

    /// Annual COLA in percent, shared by both partners
    #[serde(default = "default_cola_rate")]
    pub cola_rate: f64,

    /// Apply the earnings-test haircut to claims before FRA
    #[serde(default)]
    pub working_before_fra: bool,

    /// Date on which current age is measured
    pub as_of: NaiveDate,
}

impl ClaimingRequest {
    pub fn single(you: PersonInput, as_of: NaiveDate) -> Self {
        Self {
            you,
            spouse: None,
            cola_rate: DEFAULT_COLA_RATE,
            working_before_fra: false,
            as_of,
        }
    }

    pub fn with_spouse(mut self, spouse: PersonInput) -> Self {
        self.spouse = Some(spouse);
        self
    }

    pub fn with_cola_rate(mut self, cola_rate: f64) -> Self {
        self.cola_rate = cola_rate;
        self
    }

    pub fn with_working_before_fra(mut self, working: bool) -> Self {
        self.working_before_fra = working;
        self
    }

    /// Reject inputs the engine would otherwise silently degrade
    ///
    /// Checks PIA sign and the preview claim ages of both partners.
    pub fn validate(&self) -> Result<()> {
        std::iter::once(&self.you)
            .chain(self.spouse.as_ref())
            .try_for_each(validate_person)
    }
}

fn validate_person(person: &PersonInput) -> Result<()> {
    if person.primary_insurance_amount.is_nan() || person.primary_insurance_amount < 0.0 {
        return Err(ClaimingError::NegativePia(person.primary_insurance_amount));
    }
    if let Some(age) = person.preview_claim_ages.iter().find(|a| !a.is_selectable()) {
        return Err(ClaimingError::ClaimAgeOutOfRange {
            years: age.years,
            months: age.months,
        });
    }
    if let Some(age) = person.duplicate_preview_claim_age() {
        return Err(ClaimingError::DuplicateClaimAge {
            years: age.years,
            months: age.months,
        });
    }
    Ok(())
}

/// Per-person outputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonResult {
    pub fra: Option<FullRetirementAge>,

    /// Whole years of age on the request's `as_of` date
    pub age: Option<u32>,

    /// Expected age at death
    pub life_expectancy: Option<f64>,

    /// One row per claim age, ascending; empty without a birth date or PIA
    pub strategies: Vec<StrategyRow>,

    pub optimal_claim_age: Option<u32>,

    pub chart: ChartData,

    /// Month-precision comparison of the preview claim ages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<ClaimAgeComparison>,
}

impl PersonResult {
    fn empty() -> Self {
        Self {
            fra: None,
            age: None,
            life_expectancy: None,
            strategies: Vec::new(),
            optimal_claim_age: None,
            chart: ChartData::NotEnoughData,
            preview: None,
        }
    }
}

/// Household outputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimingResult {
    pub you: PersonResult,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse: Option<PersonResult>,

    /// Your optimal lifetime value plus the spouse's optimal lifetime value
    pub total_projected_value: f64,

    /// Earliest claim vs your optimum
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_even: Option<BreakEven>,

    pub recommendation: String,
}

/// Per-person values derived before strategies are generated
struct Prepared {
    fra: Option<FullRetirementAge>,
    age: Option<u32>,
    inputs: Option<StrategyInputs>,
}

/// Main claiming engine
#[derive(Debug, Clone)]
pub struct ClaimingEngine {
    assumptions: Assumptions,
    config: EngineConfig,
    generator: StrategyGenerator,
    series: SeriesBuilder,
}

impl Default for ClaimingEngine {
    fn default() -> Self {
        Self::new(Assumptions::default_tables(), EngineConfig::default())
    }
}

impl ClaimingEngine {
    pub fn new(assumptions: Assumptions, config: EngineConfig) -> Self {
        let generator = StrategyGenerator::new(config.claim_ages.clone());
        let series = SeriesBuilder::new(config.display_ages.clone());
        Self {
            assumptions,
            config,
            generator,
            series,
        }
    }

    /// Evaluate a household
    ///
    /// Never fails. Missing birth dates and zero PIAs yield empty strategy
    /// sets, `NotEnoughData` charts and the prompt recommendation.
    pub fn evaluate(&self, request: &ClaimingRequest) -> ClaimingResult {
        let you = self.prepare(&request.you, request);
        let spouse = request.spouse.as_ref().map(|s| (s, self.prepare(s, request)));

        let mut your_rows = self.strategies(&you);
        let spouse_rows = spouse.as_ref().map(|(_, prepared)| self.strategies(prepared));

        let joint = optimize_jointly(&mut your_rows, spouse_rows.as_deref());

        let break_even = joint.your_optimal.as_ref().and_then(|optimal| {
            strategy_break_even(&your_rows, optimal, request.cola_rate, self.config.horizon_age)
        });
        let recommendation = compose_recommendation(&joint, &your_rows, break_even.as_ref());

        let you_result = self.finish(
            &request.you,
            you,
            your_rows,
            joint.your_optimal.as_ref().map(|r| r.claim_age),
            request.cola_rate,
        );
        let spouse_result = spouse.zip(spouse_rows).map(|((input, prepared), rows)| {
            let optimal = joint.spouse_optimal.as_ref().map(|r| r.claim_age);
            self.finish(input, prepared, rows, optimal, request.cola_rate)
        });

        ClaimingResult {
            you: you_result,
            spouse: spouse_result,
            total_projected_value: joint.total_projected_value,
            break_even,
            recommendation,
        }
    }

    fn prepare(&self, person: &PersonInput, request: &ClaimingRequest) -> Prepared {
        let Some(birth_date) = person.birth_date else {
            log::debug!("{}: no birth date, nothing to evaluate", display_name(person));
            return Prepared {
                fra: None,
                age: None,
                inputs: None,
            };
        };

        let fra = self.assumptions.full_retirement_age(birth_date.year());
        let age = age_on(birth_date, request.as_of);
        let life_expectancy = self.assumptions.life_expectancy(age as f64, person.sex);

        log::debug!(
            "{}: age {} FRA {} life expectancy {:.1} PIA {:.2}",
            display_name(person),
            age,
            fra,
            life_expectancy,
            person.primary_insurance_amount
        );

        Prepared {
            fra: Some(fra),
            age: Some(age),
            inputs: Some(StrategyInputs {
                primary_insurance_amount: person.primary_insurance_amount,
                fra_months: fra.total_months(),
                life_expectancy_age: life_expectancy,
                cola_rate: request.cola_rate,
                working_before_fra: request.working_before_fra,
            }),
        }
    }

    fn strategies(&self, prepared: &Prepared) -> Vec<StrategyRow> {
        prepared
            .inputs
            .as_ref()
            .map(|inputs| self.generator.generate(inputs))
            .unwrap_or_default()
    }

    fn finish(
        &self,
        person: &PersonInput,
        prepared: Prepared,
        strategies: Vec<StrategyRow>,
        optimal_claim_age: Option<u32>,
        cola_rate: f64,
    ) -> PersonResult {
        let Some(inputs) = prepared.inputs else {
            return PersonResult::empty();
        };

        let chart = self.series.build(&strategies, cola_rate);
        let preview = self.preview(person, &inputs);

        PersonResult {
            fra: prepared.fra,
            age: prepared.age,
            life_expectancy: Some(inputs.life_expectancy_age),
            strategies,
            optimal_claim_age,
            chart,
            preview,
        }
    }

    fn preview(&self, person: &PersonInput, inputs: &StrategyInputs) -> Option<ClaimAgeComparison> {
        if let Some(dup) = person.duplicate_preview_claim_age() {
            log::warn!(
                "{}: claim age {} selected more than once; skipping comparison",
                display_name(person),
                dup
            );
            return None;
        }
        Some(compare_claim_ages(
            &person.preview_claim_ages,
            inputs,
            self.config.horizon_age,
        ))
    }
}

fn display_name(person: &PersonInput) -> &str {
    person.name.as_deref().unwrap_or("person")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::person::{ClaimAge, Sex};
    use crate::recommendation::NOT_ENOUGH_DATA;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn as_of() -> NaiveDate {
        date(2026, 10, 19)
    }

    fn born_1960(pia: f64) -> PersonInput {
        PersonInput::new(Some(date(1960, 3, 1)), Sex::Male, pia)
    }

    fn scenario(working: bool) -> ClaimingResult {
        let request = ClaimingRequest::single(born_1960(2000.0), as_of())
            .with_cola_rate(0.0)
            .with_working_before_fra(working);
        ClaimingEngine::default().evaluate(&request)
    }

    fn monthly_at(rows: &[StrategyRow], age: u32) -> f64 {
        rows.iter().find(|r| r.claim_age == age).unwrap().monthly_benefit
    }

    #[test]
    fn test_end_to_end_1960_male() {
        let result = scenario(false);
        assert_eq!(result.you.fra, Some(FullRetirementAge::new(67, 0)));
        assert_eq!(result.you.age, Some(66));

        let rows = &result.you.strategies;
        let ages: Vec<u32> = rows.iter().map(|r| r.claim_age).collect();
        assert_eq!(ages, (62..=70).collect::<Vec<_>>());
        assert_eq!(monthly_at(rows, 62), 1400.0);
        assert_eq!(monthly_at(rows, 67), 2000.0);
        assert_eq!(monthly_at(rows, 70), 2480.0);
        assert!(result.you.chart.is_ready());
        assert!(result.spouse.is_none());
    }

    #[test]
    fn test_end_to_end_working_before_fra_halves_early_claims() {
        let base = scenario(false);
        let working = scenario(true);
        assert_eq!(monthly_at(&working.you.strategies, 62), 700.0);

        for (b, w) in base.you.strategies.iter().zip(&working.you.strategies) {
            assert_eq!(b.claim_age, w.claim_age);
            if b.claim_age < 67 {
                // Both figures are rounded to the dollar independently
                assert!((w.monthly_benefit - b.monthly_benefit / 2.0).abs() <= 0.5 + 1e-9);
            } else {
                assert_eq!(w.monthly_benefit, b.monthly_benefit);
            }
        }
    }

    #[test]
    fn test_spouse_claim_age_identical_on_every_row() {
        let spouse = PersonInput::new(Some(date(1962, 8, 20)), Sex::Female, 1500.0);
        let request = ClaimingRequest::single(born_1960(2000.0), as_of()).with_spouse(spouse);
        let result = ClaimingEngine::default().evaluate(&request);

        let spouse_result = result.spouse.as_ref().unwrap();
        let spouse_optimal = spouse_result.optimal_claim_age.unwrap();
        assert_eq!(result.you.strategies.len(), 9);
        assert!(result
            .you
            .strategies
            .iter()
            .all(|r| r.spouse_claim_age == Some(spouse_optimal)));

        let your_best = result
            .you
            .strategies
            .iter()
            .find(|r| Some(r.claim_age) == result.you.optimal_claim_age)
            .unwrap();
        let spouse_best = spouse_result
            .strategies
            .iter()
            .find(|r| r.claim_age == spouse_optimal)
            .unwrap();
        assert_eq!(
            result.total_projected_value,
            your_best.lifetime_value + spouse_best.lifetime_value
        );
    }

    #[test]
    fn test_missing_birth_date_is_not_an_error() {
        let request = ClaimingRequest::single(PersonInput::new(None, Sex::Female, 2000.0), as_of());
        let result = ClaimingEngine::default().evaluate(&request);
        assert_eq!(result.you, PersonResult::empty());
        assert_eq!(result.total_projected_value, 0.0);
        assert!(result.break_even.is_none());
        assert_eq!(result.recommendation, NOT_ENOUGH_DATA);
    }

    #[test]
    fn test_zero_pia_gives_empty_strategies() {
        let request = ClaimingRequest::single(born_1960(0.0), as_of());
        let result = ClaimingEngine::default().evaluate(&request);
        assert!(result.you.fra.is_some());
        assert!(result.you.strategies.is_empty());
        assert_eq!(result.you.chart, ChartData::NotEnoughData);
        assert!(result.you.optimal_claim_age.is_none());
        assert_eq!(result.recommendation, NOT_ENOUGH_DATA);
    }

    #[test]
    fn test_spouse_without_birth_date_attaches_nothing() {
        let spouse = PersonInput::new(None, Sex::Female, 1500.0);
        let request = ClaimingRequest::single(born_1960(2000.0), as_of()).with_spouse(spouse);
        let result = ClaimingEngine::default().evaluate(&request);
        assert!(result.you.strategies.iter().all(|r| r.spouse_claim_age.is_none()));
        assert_eq!(result.spouse, Some(PersonResult::empty()));
    }

    #[test]
    fn test_preview_comparison_ignored_by_optimizer() {
        let you = born_1960(2000.0).with_preview_claim_ages(vec![ClaimAge::new(63, 7)]);
        let with_preview = ClaimingEngine::default()
            .evaluate(&ClaimingRequest::single(you, as_of()).with_cola_rate(0.0));
        let plain = scenario(false);

        assert_eq!(with_preview.you.optimal_claim_age, plain.you.optimal_claim_age);
        let preview = with_preview.you.preview.unwrap();
        assert_eq!(preview.rows.len(), 1);
        assert_eq!(preview.best, Some(ClaimAge::new(63, 7)));
    }

    #[test]
    fn test_preview_comparison_carries_narrative() {
        let you = born_1960(2000.0)
            .with_preview_claim_ages(vec![ClaimAge::new(62, 0), ClaimAge::new(67, 0)]);
        let result = ClaimingEngine::default()
            .evaluate(&ClaimingRequest::single(you, as_of()).with_cola_rate(0.0));

        let preview = result.you.preview.as_ref().unwrap();
        // LE 83.2: 1,400 a month from 62 trails 2,000 a month from 67 after age 78
        assert_eq!(preview.best, Some(ClaimAge::new(67, 0)));
        assert!(preview
            .narrative
            .starts_with("Among your selected claiming ages, 67 years and 0 months "));
        assert!(preview.narrative.contains("if you pass away before age 78."));

        let json = serde_json::to_string(&result.you).unwrap();
        assert!(json.contains("\"narrative\":\"Among your selected claiming ages"));
    }

    #[test]
    fn test_duplicate_preview_ages_skip_comparison() {
        let you = born_1960(2000.0)
            .with_preview_claim_ages(vec![ClaimAge::new(64, 0), ClaimAge::new(64, 0)]);
        let request = ClaimingRequest::single(you, as_of());
        assert!(matches!(
            request.validate(),
            Err(ClaimingError::DuplicateClaimAge { years: 64, months: 0 })
        ));
        let result = ClaimingEngine::default().evaluate(&request);
        assert!(result.you.preview.is_none());
        assert_eq!(result.you.strategies.len(), 9);
    }

    #[test]
    fn test_validate_rejects_bad_inputs() {
        let negative = ClaimingRequest::single(born_1960(-1.0), as_of());
        assert!(matches!(negative.validate(), Err(ClaimingError::NegativePia(_))));

        let spouse = born_1960(1000.0).with_preview_claim_ages(vec![ClaimAge::new(71, 0)]);
        let out_of_range = ClaimingRequest::single(born_1960(2000.0), as_of()).with_spouse(spouse);
        assert!(matches!(
            out_of_range.validate(),
            Err(ClaimingError::ClaimAgeOutOfRange { years: 71, months: 0 })
        ));

        assert!(ClaimingRequest::single(born_1960(2000.0), as_of()).validate().is_ok());
    }

    #[test]
    fn test_request_json_defaults() {
        let json = r#"{
            "you": {"birth_date": "1960-03-01", "sex": "male", "primary_insurance_amount": 2000.0},
            "as_of": "2026-10-19"
        }"#;
        let request: ClaimingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.cola_rate, DEFAULT_COLA_RATE);
        assert!(!request.working_before_fra);
        assert!(request.spouse.is_none());
        assert_eq!(request.you.preview_claim_ages.len(), 2);
    }

    #[test]
    fn test_custom_claim_range() {
        let config = EngineConfig {
            claim_ages: 64..=68,
            ..EngineConfig::default()
        };
        let engine = ClaimingEngine::new(Assumptions::default_tables(), config);
        let result = engine.evaluate(&ClaimingRequest::single(born_1960(2000.0), as_of()));
        assert_eq!(result.you.strategies.len(), 5);
        assert_eq!(result.you.strategies[0].claim_age, 64);
    }
}
