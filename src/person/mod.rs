//! Household member inputs and household CSV loading

mod data;
pub mod loader;

pub use data::{age_on, ClaimAge, PersonInput, Sex};
pub use loader::{load_households, load_households_from_reader, Household, DEFAULT_COLA_RATE};
