//! Claiming Strategy CLI
//!
//! Evaluates one household and prints the strategy table, optimal claim
//! ages, preview comparison and recommendation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;

use claiming_strategy::claiming::{SortDirection, SortField, StrategySort};
use claiming_strategy::format::{fmt_age, fmt_currency};
use claiming_strategy::person::DEFAULT_COLA_RATE;
use claiming_strategy::{
    Assumptions, ClaimAge, ClaimingEngine, ClaimingRequest, EngineConfig, PersonInput, PersonResult,
    Sex, StrategyRow,
};

#[derive(Parser, Debug)]
#[command(
    name = "claiming_strategy",
    about = "Compare retirement benefit claiming ages for one person or a couple"
)]
struct Cli {
    #[arg(long)]
    name: Option<String>,
    #[arg(long, help = "Birth date, YYYY-MM-DD")]
    birth_date: NaiveDate,
    #[arg(long, default_value = "male")]
    sex: Sex,
    #[arg(long, help = "Primary insurance amount (monthly benefit at FRA)")]
    pia: f64,
    #[arg(
        long = "preview",
        value_parser = parse_claim_age,
        help = "Claim age to compare month by month, e.g. 64 or 64:6 (repeatable)"
    )]
    preview: Vec<ClaimAge>,

    #[arg(long)]
    spouse_name: Option<String>,
    #[arg(long)]
    spouse_birth_date: Option<NaiveDate>,
    #[arg(long, default_value = "female")]
    spouse_sex: Sex,
    #[arg(long)]
    spouse_pia: Option<f64>,

    #[arg(long, default_value_t = DEFAULT_COLA_RATE, help = "Annual COLA in percent")]
    cola_rate: f64,
    #[arg(long, help = "Apply the earnings-test haircut to claims before FRA")]
    working_before_fra: bool,
    #[arg(long, help = "Date ages are measured on; defaults to today")]
    as_of: Option<NaiveDate>,

    #[arg(long, help = "Sort the strategy table by this column")]
    sort_by: Option<SortField>,
    #[arg(long)]
    descending: bool,

    #[arg(long, help = "Directory containing life_table.csv")]
    life_table_dir: Option<PathBuf>,
    #[arg(long, help = "Write projection series to this CSV file")]
    series_csv: Option<PathBuf>,
    #[arg(long, help = "Print the full result as JSON")]
    json: bool,
}

fn parse_claim_age(value: &str) -> std::result::Result<ClaimAge, String> {
    let (years, months) = match value.split_once(':') {
        Some((y, m)) => (y, m),
        None => (value, "0"),
    };
    let years = years.trim().parse().map_err(|_| format!("invalid claim age {:?}", value))?;
    let months = months.trim().parse().map_err(|_| format!("invalid claim age {:?}", value))?;
    Ok(ClaimAge::new(years, months))
}

fn person(name: Option<String>, birth_date: Option<NaiveDate>, sex: Sex, pia: f64, preview: Vec<ClaimAge>) -> PersonInput {
    let mut person = PersonInput::new(birth_date, sex, pia);
    if let Some(name) = name {
        person = person.with_name(name);
    }
    if !preview.is_empty() {
        person = person.with_preview_claim_ages(preview);
    }
    person
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let as_of = cli.as_of.unwrap_or_else(|| chrono::Local::now().date_naive());
    let you = person(cli.name, Some(cli.birth_date), cli.sex, cli.pia, cli.preview);
    let mut request = ClaimingRequest::single(you, as_of)
        .with_cola_rate(cli.cola_rate)
        .with_working_before_fra(cli.working_before_fra);
    if cli.spouse_birth_date.is_some() || cli.spouse_pia.is_some() {
        request = request.with_spouse(person(
            cli.spouse_name,
            cli.spouse_birth_date,
            cli.spouse_sex,
            cli.spouse_pia.unwrap_or(0.0),
            Vec::new(),
        ));
    }
    request.validate().context("invalid input")?;

    let assumptions = match &cli.life_table_dir {
        Some(dir) => Assumptions::from_csv_path(dir)
            .with_context(|| format!("failed to load life table from {}", dir.display()))?,
        None => Assumptions::default_tables(),
    };
    let engine = ClaimingEngine::new(assumptions, EngineConfig::default());
    let result = engine.evaluate(&request);

    if cli.json {
        let json = serde_json::to_string_pretty(&result).context("failed to serialize result")?;
        println!("{}", json);
        return Ok(());
    }

    let sort = match cli.sort_by {
        Some(field) => StrategySort::by(
            field,
            if cli.descending { SortDirection::Desc } else { SortDirection::Asc },
        ),
        None => StrategySort::default(),
    };

    print_person("You", &result.you, &sort);
    if let Some(spouse) = &result.spouse {
        print_person("Spouse", spouse, &sort);
    }

    println!("Total projected value: {}", fmt_currency(result.total_projected_value));
    println!();
    println!("{}", result.recommendation);

    if let Some(path) = &cli.series_csv {
        write_series(path, &result.you)
            .with_context(|| format!("failed to write series to {}", path.display()))?;
        println!("\nProjection series written to {}", path.display());
    }

    Ok(())
}

fn print_person(label: &str, person: &PersonResult, sort: &StrategySort) {
    println!("{}", label);
    println!("{}", "=".repeat(label.len()));

    let (Some(fra), Some(age), Some(le)) = (person.fra, person.age, person.life_expectancy) else {
        println!("Enter a birth date to see claiming strategies.\n");
        return;
    };
    println!("  Current age:         {}", age);
    println!("  Full retirement age: {}", fmt_age(fra.years, fra.months));
    println!("  Life expectancy:     {:.1}", le);
    println!();

    if person.strategies.is_empty() {
        println!("  No strategies (PIA must be greater than zero).\n");
        return;
    }

    println!(
        "  {:>5} {:>7} {:>10} {:>10} {:>7} {:>12} {:>7} {:>10}",
        "Age", "Factor", "Monthly", "Annual", "Years", "Lifetime", "Spouse", "Survivor"
    );
    println!("  {}", "-".repeat(76));
    for row in sort.apply(&person.strategies) {
        print_row(&row, person.optimal_claim_age == Some(row.claim_age));
    }
    println!();

    if let Some(preview) = &person.preview {
        if !preview.is_empty() {
            println!("  Selected claim ages:");
            for row in &preview.rows {
                let marker = if preview.best == Some(row.claim_age) { " *" } else { "" };
                println!(
                    "    {:<24} {:>10} {:>12}  {}{}",
                    row.claim_age.to_string(),
                    fmt_currency(row.monthly_benefit),
                    fmt_currency(row.lifetime_value),
                    row.note,
                    marker
                );
            }
            for be in &preview.break_evens {
                println!("    {}", be.describe());
            }
            println!("    {}", preview.narrative);
            println!();
        }
    }
}

fn print_row(row: &StrategyRow, optimal: bool) {
    println!(
        "  {:>5} {:>6.1}% {:>10} {:>10} {:>7.1} {:>12} {:>7} {:>10}{}",
        row.claim_age,
        row.factor_pct,
        fmt_currency(row.monthly_benefit),
        fmt_currency(row.annual_benefit),
        row.years_collecting,
        fmt_currency(row.lifetime_value),
        row.spouse_claim_age.map(|a| a.to_string()).unwrap_or_default(),
        row.survivor_benefit.map(fmt_currency).unwrap_or_default(),
        if optimal { "  <- optimal" } else { "" }
    );
}

fn write_series(path: &Path, person: &PersonResult) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Series", "ClaimAge", "Age", "Cumulative"])?;
    for series in person.chart.series() {
        for point in &series.points {
            writer.write_record([
                series.role.label().to_string(),
                series.claim_age.to_string(),
                point.age.to_string(),
                format!("{:.0}", point.cumulative),
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}
