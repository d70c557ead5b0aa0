//! Person-level inputs supplied by the caller

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ClaimingError;

/// Sex used to select the life-expectancy table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = ClaimingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            _ => Err(ClaimingError::UnknownSex(s.to_string())),
        }
    }
}

/// A claiming age with month precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClaimAge {
    pub years: u32,
    pub months: u32,
}

impl ClaimAge {
    pub const EARLIEST: ClaimAge = ClaimAge { years: 62, months: 0 };

    pub fn new(years: u32, months: u32) -> Self {
        Self { years, months }
    }

    /// Whole-year claim age (month offset 0)
    pub fn whole_years(years: u32) -> Self {
        Self { years, months: 0 }
    }

    /// Age in months since birth
    pub fn total_months(&self) -> u32 {
        self.years * 12 + self.months
    }

    /// Age as a fractional number of years
    pub fn as_decimal_years(&self) -> f64 {
        self.years as f64 + self.months as f64 / 12.0
    }

    pub fn from_total_months(months: u32) -> Self {
        Self {
            years: months / 12,
            months: months % 12,
        }
    }

    /// Selectable claim ages run from 62y0m through 70y11m
    pub fn is_selectable(&self) -> bool {
        (Self::EARLIEST.years..=70).contains(&self.years) && self.months <= 11
    }
}

impl fmt::Display for ClaimAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} years and {} months", self.years, self.months)
    }
}

fn default_preview_claim_ages() -> Vec<ClaimAge> {
    vec![ClaimAge::EARLIEST, ClaimAge::whole_years(67)]
}

/// One member of the household
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonInput {
    /// Display name, used only by the presentation surfaces
    #[serde(default)]
    pub name: Option<String>,

    /// Birth date; without it no FRA, life expectancy or strategies are produced
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,

    pub sex: Sex,

    /// Monthly benefit payable at full retirement age
    #[serde(default)]
    pub primary_insurance_amount: f64,

    /// Manually selected claim ages for the month-precision comparison.
    /// The optimizer ignores these.
    #[serde(default = "default_preview_claim_ages")]
    pub preview_claim_ages: Vec<ClaimAge>,
}

impl PersonInput {
    pub fn new(birth_date: Option<NaiveDate>, sex: Sex, primary_insurance_amount: f64) -> Self {
        Self {
            name: None,
            birth_date,
            sex,
            primary_insurance_amount,
            preview_claim_ages: default_preview_claim_ages(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_preview_claim_ages(mut self, ages: Vec<ClaimAge>) -> Self {
        self.preview_claim_ages = ages;
        self
    }

    /// Whole years of age on `as_of`
    pub fn age_on(&self, as_of: NaiveDate) -> Option<u32> {
        self.birth_date.map(|birth| age_on(birth, as_of))
    }

    /// First duplicated preview claim age, if any
    pub fn duplicate_preview_claim_age(&self) -> Option<ClaimAge> {
        let mut seen = std::collections::HashSet::new();
        self.preview_claim_ages
            .iter()
            .copied()
            .find(|age| !seen.insert(*age))
    }
}

/// Whole years between `birth` and `as_of`; zero when `as_of` precedes the birth date
pub fn age_on(birth: NaiveDate, as_of: NaiveDate) -> u32 {
    let mut years = as_of.year() - birth.year();
    if (as_of.month(), as_of.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years.max(0) as u32
}
