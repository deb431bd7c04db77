//! Calculation result for a single person

use crate::demographics::MAX_HUMAN_AGE;
use crate::person::Gender;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Where a person stands within their expected lifespan
///
/// All fields except `years_to_median_age` are clamped: ages and remaining
/// years are never negative and `percent_spent` stays within `0..=100`.
/// `years_to_median_age` keeps its sign; negative means past the median.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeCalculation {
    pub birth_date: NaiveDate,
    pub gender: Gender,

    /// Elapsed years since birth (365.25-day years)
    pub current_age: f64,

    /// Resolved life expectancy (override or gender default)
    pub life_expectancy: f64,

    /// Resolved population median age (override or global default)
    pub population_median_age: f64,

    /// Share of life expectancy already lived, 0-100
    pub percent_spent: f64,

    /// Years left until life expectancy
    pub years_remaining: f64,

    /// 0 at birth, 50 at the median age, 100 at twice the median age
    pub relative_age_percent: f64,

    /// Years until the population median age (signed)
    pub years_to_median_age: f64,
}

impl LifeCalculation {
    /// Build a result from an already-measured age
    ///
    /// Negative ages are treated as zero.
    pub fn at_age(
        birth_date: NaiveDate,
        gender: Gender,
        current_age: f64,
        life_expectancy: f64,
        population_median_age: f64,
    ) -> Self {
        let percent_spent = current_age / life_expectancy * 100.0;
        let years_remaining = life_expectancy - current_age;
        let relative_age_percent = current_age / population_median_age * 50.0;
        let years_to_median_age = population_median_age - current_age;

        Self {
            birth_date,
            gender,
            current_age: current_age.max(0.0),
            life_expectancy,
            population_median_age,
            // max/min pick the non-NaN side, so 0/0 lands at 0
            percent_spent: percent_spent.max(0.0).min(100.0),
            years_remaining: years_remaining.max(0.0),
            relative_age_percent: relative_age_percent.max(0.0),
            years_to_median_age,
        }
    }

    /// Whether the person has reached or outlived their life expectancy
    pub fn has_surpassed_expectancy(&self) -> bool {
        self.current_age >= self.life_expectancy
    }

    /// Whether the person is older than the population median age
    pub fn is_past_median(&self) -> bool {
        self.years_to_median_age < 0.0
    }

    /// Span in years the visualizations cover
    ///
    /// Life expectancy, or the maximum human age once life expectancy is reached.
    pub fn visual_span_years(&self) -> f64 {
        if self.has_surpassed_expectancy() {
            MAX_HUMAN_AGE
        } else {
            self.life_expectancy
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn birth() -> NaiveDate {
        NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()
    }

    #[test]
    fn test_formulas() {
        let calc = LifeCalculation::at_age(birth(), Gender::Male, 30.0, 75.0, 30.0);

        assert_relative_eq!(calc.percent_spent, 40.0);
        assert_relative_eq!(calc.years_remaining, 45.0);
        assert_relative_eq!(calc.relative_age_percent, 50.0);
        assert_relative_eq!(calc.years_to_median_age, 0.0);
    }

    #[test]
    fn test_median_age_gives_exactly_fifty_percent() {
        let calc = LifeCalculation::at_age(birth(), Gender::Female, 31.1, 80.88, 31.1);
        assert_eq!(calc.relative_age_percent, 50.0);
    }

    #[test]
    fn test_relative_age_scale() {
        let at_double = LifeCalculation::at_age(birth(), Gender::Male, 62.2, 75.37, 31.1);
        assert_relative_eq!(at_double.relative_age_percent, 100.0, epsilon = 1e-9);

        let newborn = LifeCalculation::at_age(birth(), Gender::Male, 0.0, 75.37, 31.1);
        assert_eq!(newborn.relative_age_percent, 0.0);
    }

    #[test]
    fn test_clamps() {
        let future = LifeCalculation::at_age(birth(), Gender::Male, -3.0, 75.37, 31.1);
        assert_eq!(future.current_age, 0.0);
        assert_eq!(future.percent_spent, 0.0);
        assert_eq!(future.relative_age_percent, 0.0);
        // Unclamped: measured from the raw age
        assert_relative_eq!(future.years_to_median_age, 34.1, epsilon = 1e-9);

        let old = LifeCalculation::at_age(birth(), Gender::Male, 90.0, 75.37, 31.1);
        assert_eq!(old.percent_spent, 100.0);
        assert_eq!(old.years_remaining, 0.0);
        assert!(old.relative_age_percent > 100.0);
        assert!(old.years_to_median_age < 0.0);
        assert!(old.is_past_median());
    }

    #[test]
    fn test_zero_expectancy_stays_in_range() {
        let newborn = LifeCalculation::at_age(birth(), Gender::Male, 0.0, 0.0, 31.1);
        assert!((0.0..=100.0).contains(&newborn.percent_spent));
        assert_eq!(newborn.percent_spent, 0.0);

        let adult = LifeCalculation::at_age(birth(), Gender::Male, 20.0, 0.0, 31.1);
        assert_eq!(adult.percent_spent, 100.0);
        assert_eq!(adult.years_remaining, 0.0);
    }

    #[test]
    fn test_visual_span() {
        let young = LifeCalculation::at_age(birth(), Gender::Male, 30.0, 75.37, 31.1);
        assert!(!young.has_surpassed_expectancy());
        assert_eq!(young.visual_span_years(), 75.37);

        let exact = LifeCalculation::at_age(birth(), Gender::Male, 75.37, 75.37, 31.1);
        assert!(exact.has_surpassed_expectancy());
        assert_eq!(exact.visual_span_years(), MAX_HUMAN_AGE);
    }
}
