//! Actuarial assumptions: life expectancy and full retirement age

mod fra;
mod life_table;
pub mod loader;

pub use fra::FullRetirementAge;
pub use life_table::{LifeTable, DEFAULT_REMAINING_YEARS, MAX_TABLE_AGE, MIN_TABLE_AGE};

use std::path::Path;

use crate::error::Result;
use crate::person::Sex;

/// Container for the tables a claiming evaluation consults
#[derive(Debug, Clone, Default)]
pub struct Assumptions {
    pub life_table: LifeTable,
}

impl Assumptions {
    /// Built-in SSA 2022 abridged period life table
    pub fn default_tables() -> Self {
        Self {
            life_table: LifeTable::ssa_2022_period(),
        }
    }

    /// Load the life table from `<dir>/life_table.csv`
    pub fn from_csv_path(dir: &Path) -> Result<Self> {
        Ok(Self {
            life_table: loader::load_life_table(dir)?,
        })
    }

    pub fn full_retirement_age(&self, birth_year: i32) -> FullRetirementAge {
        FullRetirementAge::for_birth_year(birth_year)
    }

    pub fn life_expectancy(&self, age: f64, sex: Sex) -> f64 {
        self.life_table.life_expectancy(age, sex)
    }
}
