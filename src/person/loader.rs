//! Load households from a CSV file
//!
//! One row per household. Spouse columns are optional; leaving
//! `SpouseSex` empty means the household has a single member.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::Reader;

use super::{PersonInput, Sex};
use crate::engine::ClaimingRequest;
use crate::error::{ClaimingError, Result};

/// COLA applied when the `ColaRate` column is empty
pub const DEFAULT_COLA_RATE: f64 = 2.6;

/// Raw CSV row matching the household file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "HouseholdID")]
    household_id: u32,
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Sex")]
    sex: String,
    #[serde(rename = "BirthDate")]
    birth_date: Option<String>,
    #[serde(rename = "PIA")]
    pia: Option<f64>,
    #[serde(rename = "SpouseName")]
    spouse_name: Option<String>,
    #[serde(rename = "SpouseSex")]
    spouse_sex: Option<String>,
    #[serde(rename = "SpouseBirthDate")]
    spouse_birth_date: Option<String>,
    #[serde(rename = "SpousePIA")]
    spouse_pia: Option<f64>,
    #[serde(rename = "ColaRate")]
    cola_rate: Option<f64>,
    #[serde(rename = "WorkingBeforeFRA")]
    working_before_fra: Option<String>,
}

/// A household read from CSV, ready to evaluate
#[derive(Debug, Clone)]
pub struct Household {
    pub household_id: u32,
    pub request: ClaimingRequest,
}

fn parse_birth_date(value: Option<String>) -> Result<Option<NaiveDate>> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|source| ClaimingError::InvalidBirthDate {
                value: s.to_string(),
                source,
            }),
    }
}

fn parse_flag(value: Option<String>) -> bool {
    matches!(
        value.as_deref().map(|s| s.trim().to_ascii_lowercase()).as_deref(),
        Some("yes" | "y" | "true" | "1")
    )
}

fn build_person(
    name: Option<String>,
    sex: &str,
    birth_date: Option<String>,
    pia: Option<f64>,
) -> Result<PersonInput> {
    let sex: Sex = sex.parse()?;
    let pia = pia.unwrap_or(0.0);
    if pia < 0.0 {
        return Err(ClaimingError::NegativePia(pia));
    }
    let mut person = PersonInput::new(parse_birth_date(birth_date)?, sex, pia);
    person.name = name.filter(|n| !n.trim().is_empty());
    Ok(person)
}

impl CsvRow {
    fn into_household(self, as_of: NaiveDate) -> Result<Household> {
        let you = build_person(self.name, &self.sex, self.birth_date, self.pia)?;

        let spouse = match self.spouse_sex.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(sex) => Some(build_person(
                self.spouse_name,
                sex,
                self.spouse_birth_date,
                self.spouse_pia,
            )?),
        };

        Ok(Household {
            household_id: self.household_id,
            request: ClaimingRequest {
                you,
                spouse,
                cola_rate: self.cola_rate.unwrap_or(DEFAULT_COLA_RATE),
                working_before_fra: parse_flag(self.working_before_fra),
                as_of,
            },
        })
    }
}

/// Load all households from a CSV file, computing ages as of `as_of`
pub fn load_households<P: AsRef<Path>>(path: P, as_of: NaiveDate) -> Result<Vec<Household>> {
    let reader = Reader::from_path(path)?;
    read_households(reader, as_of)
}

/// Load households from any reader (e.g., string buffer, request body)
pub fn load_households_from_reader<R: Read>(reader: R, as_of: NaiveDate) -> Result<Vec<Household>> {
    read_households(Reader::from_reader(reader), as_of)
}

fn read_households<R: Read>(mut reader: Reader<R>, as_of: NaiveDate) -> Result<Vec<Household>> {
    let mut households = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        households.push(row.into_household(as_of)?);
    }

    log::debug!("loaded {} households", households.len());
    Ok(households)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "HouseholdID,Name,Sex,BirthDate,PIA,SpouseName,SpouseSex,SpouseBirthDate,SpousePIA,ColaRate,WorkingBeforeFRA\n";

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    #[test]
    fn test_load_single_and_couple() {
        let data = format!(
            "{HEADER}\
             1,Pat,male,1960-03-04,2000,,,,,0,no\n\
             2,Sam,Female,1958-07-01,1800,Alex,male,1957-02-10,2400,,yes\n"
        );
        let households = load_households_from_reader(data.as_bytes(), as_of()).unwrap();
        assert_eq!(households.len(), 2);

        let h1 = &households[0];
        assert_eq!(h1.household_id, 1);
        assert_eq!(h1.request.you.name.as_deref(), Some("Pat"));
        assert_eq!(h1.request.you.sex, Sex::Male);
        assert!(h1.request.spouse.is_none());
        assert_eq!(h1.request.cola_rate, 0.0);
        assert!(!h1.request.working_before_fra);

        let h2 = &households[1];
        let spouse = h2.request.spouse.as_ref().unwrap();
        assert_eq!(spouse.sex, Sex::Male);
        assert_eq!(spouse.primary_insurance_amount, 2400.0);
        assert_eq!(h2.request.cola_rate, DEFAULT_COLA_RATE);
        assert!(h2.request.working_before_fra);
    }

    #[test]
    fn test_missing_birth_date_is_not_an_error() {
        let data = format!("{HEADER}3,,female,,1500,,,,,,\n");
        let households = load_households_from_reader(data.as_bytes(), as_of()).unwrap();
        assert!(households[0].request.you.birth_date.is_none());
    }

    #[test]
    fn test_rejects_bad_rows() {
        let data = format!("{HEADER}4,,robot,1960-01-01,1500,,,,,,\n");
        let err = load_households_from_reader(data.as_bytes(), as_of()).unwrap_err();
        assert!(matches!(err, ClaimingError::UnknownSex(_)));

        let data = format!("{HEADER}5,,male,01/02/1960,1500,,,,,,\n");
        let err = load_households_from_reader(data.as_bytes(), as_of()).unwrap_err();
        assert!(matches!(err, ClaimingError::InvalidBirthDate { .. }));

        let data = format!("{HEADER}6,,male,1960-01-01,-5,,,,,,\n");
        let err = load_households_from_reader(data.as_bytes(), as_of()).unwrap_err();
        assert!(matches!(err, ClaimingError::NegativePia(_)));
    }
}
