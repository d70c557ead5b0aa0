//! CSV-based life table loader
//!
//! Expects a header row followed by `Age,Male,Female` records, where the two
//! value columns hold remaining years of life.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::LifeTable;
use crate::error::{ClaimingError, Result};

/// Default life table file inside an assumptions directory
pub const LIFE_TABLE_FILE: &str = "life_table.csv";

/// Load a life table from `<dir>/life_table.csv`
pub fn load_life_table(dir: &Path) -> Result<LifeTable> {
    let file = File::open(dir.join(LIFE_TABLE_FILE))?;
    load_life_table_from_reader(file)
}

/// Load a life table from any reader
pub fn load_life_table_from_reader<R: Read>(reader: R) -> Result<LifeTable> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        // Header is line 1
        let line = idx + 2;
        if record.len() < 3 {
            return Err(ClaimingError::LifeTable {
                line,
                message: format!("expected 3 columns, found {}", record.len()),
            });
        }

        let age: u32 = parse_field(&record[0], line, "age")?;
        let male: f64 = parse_field(&record[1], line, "male")?;
        let female: f64 = parse_field(&record[2], line, "female")?;
        if male < 0.0 || female < 0.0 {
            return Err(ClaimingError::LifeTable {
                line,
                message: "remaining years must be non-negative".to_string(),
            });
        }
        rows.push((age, male, female));
    }

    if rows.is_empty() {
        return Err(ClaimingError::LifeTable {
            line: 1,
            message: "no rows".to_string(),
        });
    }

    Ok(LifeTable::from_rows(&rows))
}

fn parse_field<T: std::str::FromStr>(value: &str, line: usize, column: &str) -> Result<T> {
    value.trim().parse().map_err(|_| ClaimingError::LifeTable {
        line,
        message: format!("cannot parse {} value {:?}", column, value),
    })
}
