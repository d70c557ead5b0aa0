//! Full retirement age by birth year

use std::fmt;

use serde::{Deserialize, Serialize};

/// Age at which 100% of the primary insurance amount is payable
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FullRetirementAge {
    pub years: u32,
    pub months: u32,
}

impl FullRetirementAge {
    pub const fn new(years: u32, months: u32) -> Self {
        Self { years, months }
    }

    /// FRA in months since birth
    pub fn total_months(&self) -> u32 {
        self.years * 12 + self.months
    }

    /// Resolve FRA for a birth year
    ///
    /// 65y0m through 1937, +2 months per year for 1938-1942, 66y0m for
    /// 1943-1954, +2 months per year for 1955-1959, 67y0m from 1960.
    pub fn for_birth_year(birth_year: i32) -> Self {
        match birth_year {
            i32::MIN..=1937 => Self::new(65, 0),
            1938..=1942 => Self::new(65, 2 * (birth_year - 1937) as u32),
            1943..=1954 => Self::new(66, 0),
            1955..=1959 => Self::new(66, 2 * (birth_year - 1954) as u32),
            _ => Self::new(67, 0),
        }
    }
}

impl fmt::Display for FullRetirementAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} years and {} months", self.years, self.months)
    }
}
