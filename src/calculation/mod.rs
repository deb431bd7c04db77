//! Calculation engine for a person's position within their expected lifespan

mod engine;
mod result;

pub use engine::{age_in_years, calculate, LifeEngine, DAYS_PER_YEAR, MILLIS_PER_YEAR};
pub use result::LifeCalculation;
