//! Input checks run before calling the calculation engine
//!
//! The engine itself never rejects input. These checks are the boundary
//! where out-of-range dates and overrides become user-facing errors.

use crate::demographics::{LIFE_EXPECTANCY_RANGE, POPULATION_MEDIAN_AGE_RANGE};
use crate::person::BirthInfo;
use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Oldest accepted birth date, in years before the current year
pub const MAX_BIRTH_YEARS_BACK: i32 = 150;

/// Reasons an input is rejected
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("birth date {0} is in the future")]
    FutureBirthDate(NaiveDate),

    #[error("birth date {date} is before the earliest accepted date {earliest}")]
    BirthDateTooEarly { date: NaiveDate, earliest: NaiveDate },

    #[error("life expectancy {0} is outside {min}..={max}", min = LIFE_EXPECTANCY_RANGE.start(), max = LIFE_EXPECTANCY_RANGE.end())]
    LifeExpectancyOutOfRange(f64),

    #[error("population median age {0} is outside {min}..={max}", min = POPULATION_MEDIAN_AGE_RANGE.start(), max = POPULATION_MEDIAN_AGE_RANGE.end())]
    MedianAgeOutOfRange(f64),
}

/// January 1st, 150 years before the year of `now`
pub fn earliest_birth_date(now: DateTime<Utc>) -> NaiveDate {
    let year = now.year() - MAX_BIRTH_YEARS_BACK;
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Accept a birth date no later than today and no earlier than [`earliest_birth_date`]
pub fn validate_birth_date(date: NaiveDate, now: DateTime<Utc>) -> Result<(), ValidationError> {
    if date > now.date_naive() {
        return Err(ValidationError::FutureBirthDate(date));
    }

    let earliest = earliest_birth_date(now);
    if date < earliest {
        return Err(ValidationError::BirthDateTooEarly { date, earliest });
    }

    Ok(())
}

/// Boolean form of [`validate_birth_date`]
pub fn is_valid_birth_date(date: NaiveDate, now: DateTime<Utc>) -> bool {
    validate_birth_date(date, now).is_ok()
}

pub fn validate_life_expectancy(years: f64) -> Result<(), ValidationError> {
    if years.is_finite() && LIFE_EXPECTANCY_RANGE.contains(&years) {
        Ok(())
    } else {
        Err(ValidationError::LifeExpectancyOutOfRange(years))
    }
}

pub fn validate_population_median_age(years: f64) -> Result<(), ValidationError> {
    if years.is_finite() && POPULATION_MEDIAN_AGE_RANGE.contains(&years) {
        Ok(())
    } else {
        Err(ValidationError::MedianAgeOutOfRange(years))
    }
}

/// Run every check that applies to `info`
pub fn validate_birth_info(info: &BirthInfo, now: DateTime<Utc>) -> Result<(), ValidationError> {
    validate_birth_date(info.birth_date, now)?;
    if let Some(years) = info.life_expectancy {
        validate_life_expectancy(years)?;
    }
    if let Some(years) = info.population_median_age {
        validate_population_median_age(years)?;
    }
    Ok(())
}
