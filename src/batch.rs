//! Batch runner for many people at one evaluation instant
//!
//! Every person is validated, calculated and projected against the same
//! `now`, in parallel. Rejected inputs produce a row carrying the error
//! instead of numbers.

use crate::calculation::LifeEngine;
use crate::demographics::DemographicDefaults;
use crate::impact::project;
use crate::person::{BirthInfo, Gender};
use crate::validation::validate_birth_info;
use chrono::{DateTime, NaiveDate, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One output row of a batch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRow {
    pub id: String,
    pub birth: NaiveDate,
    pub gender: Gender,
    pub current_age: Option<f64>,
    pub life_expectancy: Option<f64>,
    pub population_median_age: Option<f64>,
    pub percent_spent: Option<f64>,
    pub years_remaining: Option<f64>,
    pub relative_age_percent: Option<f64>,
    pub years_to_median_age: Option<f64>,
    pub weeks_spent: Option<u32>,
    pub total_weeks: Option<u32>,
    pub error: Option<String>,
}

impl BatchRow {
    fn rejected(id: &str, info: &BirthInfo, error: String) -> Self {
        Self {
            id: id.to_string(),
            birth: info.birth_date,
            gender: info.gender,
            current_age: None,
            life_expectancy: None,
            population_median_age: None,
            percent_spent: None,
            years_remaining: None,
            relative_age_percent: None,
            years_to_median_age: None,
            weeks_spent: None,
            total_weeks: None,
            error: Some(error),
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.error.is_some()
    }
}

/// Runs calculations for a batch of people with shared defaults
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    engine: LifeEngine,
}

impl BatchRunner {
    pub fn new(defaults: DemographicDefaults) -> Self {
        Self {
            engine: LifeEngine::new(defaults),
        }
    }

    /// Compute one row
    pub fn run_one(&self, id: &str, info: &BirthInfo, now: DateTime<Utc>) -> BatchRow {
        if let Err(e) = validate_birth_info(info, now) {
            log::debug!("Rejected {}: {}", id, e);
            return BatchRow::rejected(id, info, e.to_string());
        }

        let calc = self.engine.calculate(info, now);
        let impact = project(&calc);

        BatchRow {
            id: id.to_string(),
            birth: info.birth_date,
            gender: info.gender,
            current_age: Some(calc.current_age),
            life_expectancy: Some(calc.life_expectancy),
            population_median_age: Some(calc.population_median_age),
            percent_spent: Some(calc.percent_spent),
            years_remaining: Some(calc.years_remaining),
            relative_age_percent: Some(calc.relative_age_percent),
            years_to_median_age: Some(calc.years_to_median_age),
            weeks_spent: Some(impact.weeks_spent),
            total_weeks: Some(impact.total_weeks),
            error: None,
        }
    }

    /// Compute every row in parallel, preserving input order
    pub fn run_batch(&self, people: &[(String, BirthInfo)], now: DateTime<Utc>) -> Vec<BatchRow> {
        let rows: Vec<BatchRow> = people
            .par_iter()
            .map(|(id, info)| self.run_one(id, info, now))
            .collect();

        let rejected = rows.iter().filter(|r| r.is_rejected()).count();
        if rejected > 0 {
            log::warn!("{} of {} people rejected by validation", rejected, rows.len());
        }
        rows
    }
}
