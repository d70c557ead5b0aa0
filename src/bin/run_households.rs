//! Evaluate every household in a CSV file
//!
//! Writes one summary row per household with each partner's optimal claim
//! age, optimal lifetime value and the household total.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use serde::Serialize;

use claiming_strategy::person::load_households;
use claiming_strategy::scenario::HouseholdResult;
use claiming_strategy::{HouseholdRunner, PersonResult};

#[derive(Parser, Debug)]
#[command(name = "run_households", about = "Batch claiming-strategy evaluation from CSV")]
struct Cli {
    #[arg(help = "Household CSV (HouseholdID,Name,Sex,BirthDate,PIA,Spouse...)")]
    input: PathBuf,
    #[arg(long, default_value = "household_results.csv")]
    output: PathBuf,
    #[arg(long, help = "Date ages are measured on; defaults to today")]
    as_of: Option<NaiveDate>,
    #[arg(long, help = "Directory containing life_table.csv")]
    life_table_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SummaryRow {
    #[serde(rename = "HouseholdID")]
    household_id: u32,
    #[serde(rename = "OptimalClaimAge")]
    optimal_claim_age: Option<u32>,
    #[serde(rename = "OptimalLifetimeValue")]
    optimal_lifetime_value: Option<f64>,
    #[serde(rename = "SpouseOptimalClaimAge")]
    spouse_optimal_claim_age: Option<u32>,
    #[serde(rename = "SpouseOptimalLifetimeValue")]
    spouse_optimal_lifetime_value: Option<f64>,
    #[serde(rename = "TotalProjectedValue")]
    total_projected_value: f64,
    #[serde(rename = "BreakEvenAge")]
    break_even_age: Option<String>,
}

fn optimal_value(person: &PersonResult) -> Option<f64> {
    let age = person.optimal_claim_age?;
    person
        .strategies
        .iter()
        .find(|r| r.claim_age == age)
        .map(|r| r.lifetime_value)
}

impl From<&HouseholdResult> for SummaryRow {
    fn from(out: &HouseholdResult) -> Self {
        let result = &out.result;
        Self {
            household_id: out.household_id,
            optimal_claim_age: result.you.optimal_claim_age,
            optimal_lifetime_value: optimal_value(&result.you),
            spouse_optimal_claim_age: result.spouse.as_ref().and_then(|s| s.optimal_claim_age),
            spouse_optimal_lifetime_value: result.spouse.as_ref().and_then(optimal_value),
            total_projected_value: result.total_projected_value,
            break_even_age: result
                .break_even
                .as_ref()
                .and_then(|be| be.break_even_age)
                .map(|age| format!("{}y{}m", age.years, age.months)),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let start = Instant::now();
    let as_of = cli.as_of.unwrap_or_else(|| chrono::Local::now().date_naive());

    println!("Loading households from {}...", cli.input.display());
    let households = load_households(&cli.input, as_of)
        .with_context(|| format!("failed to load households from {}", cli.input.display()))?;
    println!("Loaded {} households in {:?}", households.len(), start.elapsed());

    let runner = match &cli.life_table_dir {
        Some(dir) => HouseholdRunner::from_csv_path(dir)
            .with_context(|| format!("failed to load life table from {}", dir.display()))?,
        None => HouseholdRunner::new(),
    };

    let run_start = Instant::now();
    let results = runner.run_batch(&households);
    println!("Evaluations complete in {:?}", run_start.elapsed());

    let mut writer = csv::Writer::from_path(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    for out in &results {
        writer.serialize(SummaryRow::from(out))?;
    }
    writer.flush()?;
    println!("Output written to {}", cli.output.display());

    let total: f64 = results.iter().map(|r| r.result.total_projected_value).sum();
    let evaluated = results.iter().filter(|r| r.result.you.optimal_claim_age.is_some()).count();
    println!("\nSummary:");
    println!("  Households evaluated: {} of {}", evaluated, results.len());
    println!("  Total projected value: ${:.0}", total);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
