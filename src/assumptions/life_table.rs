//! Abridged period life table (remaining years of life by age and sex)
//!
//! The table covers ages 62 through 90. Lookups round the age to the nearest
//! integer and clamp it into the tabulated range; the *unclamped* input age is
//! then added back, so the result is an expected age at death rather than a
//! count of remaining years.

use std::collections::BTreeMap;

use crate::person::Sex;

/// Youngest tabulated age
pub const MIN_TABLE_AGE: u32 = 62;
/// Oldest tabulated age
pub const MAX_TABLE_AGE: u32 = 90;
/// Remaining years used when a clamped age has no table entry
pub const DEFAULT_REMAINING_YEARS: f64 = 15.0;

/// Remaining-years table keyed by integer age, one column per sex
#[derive(Debug, Clone, PartialEq)]
pub struct LifeTable {
    male: BTreeMap<u32, f64>,
    female: BTreeMap<u32, f64>,
}

impl LifeTable {
    /// SSA 2022 period life table, abridged to ages 62-90
    pub fn ssa_2022_period() -> Self {
        Self::from_rows(Self::ssa_2022_rows())
    }

    /// Build from explicit rows of (age, male remaining years, female remaining years)
    pub fn from_rows(rows: &[(u32, f64, f64)]) -> Self {
        let (male, female) = rows
            .iter()
            .map(|&(age, m, f)| ((age, m), (age, f)))
            .unzip();
        Self { male, female }
    }

    /// Number of tabulated ages for the given sex
    pub fn len(&self, sex: Sex) -> usize {
        self.column(sex).len()
    }

    pub fn is_empty(&self) -> bool {
        self.male.is_empty() && self.female.is_empty()
    }

    fn column(&self, sex: Sex) -> &BTreeMap<u32, f64> {
        match sex {
            Sex::Male => &self.male,
            Sex::Female => &self.female,
        }
    }

    /// Table key for a real-valued age: rounded, then clamped to 62..=90
    pub fn lookup_age(age: f64) -> u32 {
        let rounded = age.round();
        rounded.clamp(MIN_TABLE_AGE as f64, MAX_TABLE_AGE as f64) as u32
    }

    /// Remaining years of life at `age`
    pub fn remaining_years(&self, age: f64, sex: Sex) -> f64 {
        let key = Self::lookup_age(age);
        match self.column(sex).get(&key) {
            Some(&years) => years,
            None => {
                log::warn!(
                    "no {} life table entry for age {}, using {} remaining years",
                    sex,
                    key,
                    DEFAULT_REMAINING_YEARS
                );
                DEFAULT_REMAINING_YEARS
            }
        }
    }

    /// Expected age at death for someone currently `age` years old
    ///
    /// The table is consulted at the clamped age but the input age is added
    /// back: a 45-year-old male gets 45 + 20.3 (the age-62 entry), not 62 + 20.3.
    pub fn life_expectancy(&self, age: f64, sex: Sex) -> f64 {
        age + self.remaining_years(age, sex)
    }

    fn ssa_2022_rows() -> &'static [(u32, f64, f64)] {
        &[
            // Age, male, female
            (62, 20.3, 23.0), (63, 19.5, 22.1), (64, 18.7, 21.3),
            (65, 17.9, 20.4), (66, 17.2, 19.6), (67, 16.5, 18.8),
            (68, 15.7, 18.0), (69, 15.0, 17.2), (70, 14.3, 16.4),
            (71, 13.6, 15.6), (72, 12.9, 14.9), (73, 12.3, 14.1),
            (74, 11.6, 13.4), (75, 11.0, 12.7), (76, 10.4, 12.0),
            (77, 9.8, 11.3), (78, 9.2, 10.6), (79, 8.6, 10.0),
            (80, 8.1, 9.4), (81, 7.6, 8.8), (82, 7.1, 8.2),
            (83, 6.6, 7.6), (84, 6.1, 7.1), (85, 5.7, 6.6),
            (86, 5.3, 6.1), (87, 4.9, 5.7), (88, 4.6, 5.3),
            (89, 4.3, 4.9), (90, 4.0, 4.5),
        ]
    }
}

impl Default for LifeTable {
    fn default() -> Self {
        Self::ssa_2022_period()
    }
}
