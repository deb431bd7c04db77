//! Impact projector: expands a calculation into the weeks wall, strata,
//! threshold strip and banded year grid
//!
//! Once current age reaches life expectancy the weeks wall and the grid
//! both span [`MAX_HUMAN_AGE`](crate::demographics::MAX_HUMAN_AGE) years,
//! so they always agree on totals. The last stratum still ends at life
//! expectancy.

use super::types::{
    GridBand, ImpactData, Stratum, Threshold, AGE_THRESHOLDS, GRID_CELL_SIZES, STRATA_BOUNDS,
    WEEKS_PER_YEAR,
};
use crate::calculation::LifeCalculation;

/// Build all impact datasets for a calculation
pub fn project(calc: &LifeCalculation) -> ImpactData {
    let current_age = calc.current_age;
    let span = calc.visual_span_years();

    let total_weeks = (span * WEEKS_PER_YEAR).round() as u32;
    let weeks_spent = ((current_age * WEEKS_PER_YEAR).round() as u32).min(total_weeks);

    let strata = project_strata(current_age, calc.life_expectancy);
    let thresholds = project_thresholds(current_age);

    let grid_total_cells = span;
    let grid_cells_spent = current_age.floor().min(grid_total_cells);
    let grid_bands = project_grid_bands(current_age, grid_total_cells);

    log::debug!(
        "Projected impact: weeks {}/{} cells {}/{} strata spent {}",
        weeks_spent,
        total_weeks,
        grid_cells_spent,
        grid_total_cells,
        strata.iter().filter(|s| s.spent).count(),
    );

    ImpactData {
        total_weeks,
        weeks_spent,
        strata,
        thresholds,
        grid_total_cells,
        grid_cells_spent,
        grid_bands,
    }
}

/// Upper bound of band `i`: the next fixed bound, or `last` for the final band
fn band_end(i: usize, last: f64) -> f64 {
    STRATA_BOUNDS.get(i + 1).copied().unwrap_or(last)
}

fn project_strata(current_age: f64, life_expectancy: f64) -> Vec<Stratum> {
    STRATA_BOUNDS
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = band_end(i, life_expectancy);
            Stratum {
                start,
                end,
                spent: current_age >= end,
            }
        })
        .collect()
}

fn project_thresholds(current_age: f64) -> Vec<Threshold> {
    AGE_THRESHOLDS
        .iter()
        .map(|&age| Threshold {
            age,
            passed: current_age >= age as f64,
        })
        .collect()
}

fn project_grid_bands(current_age: f64, last_bound: f64) -> Vec<GridBand> {
    STRATA_BOUNDS
        .iter()
        .zip(GRID_CELL_SIZES)
        .enumerate()
        .map(|(i, (&start, size_px))| {
            let end = band_end(i, last_bound);
            let cells_total = end - start;
            // A partly lived year inside the band counts as a whole cell
            let cells_spent = (current_age - start).ceil().min(cells_total).max(0.0);
            GridBand {
                start_age: start,
                end_age: end,
                size_px,
                cells_spent,
                cells_total,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::{calculate, LifeCalculation, MILLIS_PER_YEAR};
    use crate::demographics::{DEFAULT_LIFE_EXPECTANCY_FEMALE, DEFAULT_LIFE_EXPECTANCY_MALE, MAX_HUMAN_AGE};
    use crate::person::{BirthInfo, Gender};
    use approx::assert_abs_diff_eq;
    use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

    fn birth() -> NaiveDate {
        NaiveDate::from_ymd_opt(1960, 3, 1).unwrap()
    }

    fn calc_at(age: f64, gender: Gender, life_expectancy: f64) -> LifeCalculation {
        LifeCalculation::at_age(birth(), gender, age, life_expectancy, 31.1)
    }

    fn midnight(d: NaiveDate) -> DateTime<Utc> {
        d.and_time(NaiveTime::MIN).and_utc()
    }

    #[test]
    fn test_newborn() {
        let impact = project(&calc_at(0.0, Gender::Male, DEFAULT_LIFE_EXPECTANCY_MALE));

        assert_eq!(impact.total_weeks, 3919); // round(75.37 * 52) = round(3919.24)
        assert_eq!(impact.weeks_spent, 0);
        assert_eq!(impact.grid_cells_spent, 0.0);
        assert_eq!(impact.grid_total_cells, DEFAULT_LIFE_EXPECTANCY_MALE);
        assert!(impact.thresholds.iter().all(|t| !t.passed));
        assert!(impact.strata.iter().all(|s| !s.spent));
        assert!(impact.grid_bands.iter().all(|b| b.cells_spent == 0.0));
    }

    #[test]
    fn test_just_born_through_engine() {
        let info = BirthInfo::new(birth(), Gender::Female);
        let calc = calculate(&info, midnight(birth()));
        let impact = project(&calc);

        assert_eq!(calc.current_age, 0.0);
        assert_eq!(calc.percent_spent, 0.0);
        assert_eq!(impact.grid_cells_spent, 0.0);
        assert_eq!(impact.thresholds_passed(), 0);
    }

    #[test]
    fn test_reaching_expectancy_switches_to_ceiling() {
        let millis = (DEFAULT_LIFE_EXPECTANCY_MALE * MILLIS_PER_YEAR).ceil() as i64 + 1;
        let now = midnight(birth()) + Duration::milliseconds(millis);
        let calc = calculate(&BirthInfo::new(birth(), Gender::Male), now);
        let impact = project(&calc);

        assert_abs_diff_eq!(calc.percent_spent, 100.0, epsilon = 1e-9);
        assert!(impact.strata.iter().all(|s| s.spent));
        assert_eq!(impact.strata[3].end, DEFAULT_LIFE_EXPECTANCY_MALE);
        assert_eq!(impact.grid_total_cells, MAX_HUMAN_AGE);
        assert_eq!(impact.total_weeks, 6344); // 122 * 52
        assert_eq!(impact.weeks_spent, 3919);
        assert_eq!(impact.grid_cells_spent, 75.0);

        let last = impact.grid_bands[3];
        assert_eq!(last.end_age, MAX_HUMAN_AGE);
        assert_eq!(last.cells_total, 62.0);
        assert_eq!(last.cells_spent, 16.0); // ceil(75.37 - 60)
    }

    #[test]
    fn test_past_sixty_female() {
        let impact = project(&calc_at(62.36, Gender::Female, DEFAULT_LIFE_EXPECTANCY_FEMALE));

        let spent: Vec<bool> = impact.strata.iter().map(|s| s.spent).collect();
        assert_eq!(spent, vec![true, true, true, false]);
        assert_eq!(impact.strata[3].start, 60.0);
        assert_eq!(impact.strata[3].end, DEFAULT_LIFE_EXPECTANCY_FEMALE);
        assert_eq!(impact.thresholds_passed(), 6);
    }

    #[test]
    fn test_threshold_edges() {
        let impact = project(&calc_at(30.0, Gender::Male, DEFAULT_LIFE_EXPECTANCY_MALE));
        let passed: Vec<(u32, bool)> = impact.thresholds.iter().map(|t| (t.age, t.passed)).collect();
        assert_eq!(
            passed,
            vec![(18, true), (30, true), (35, false), (40, false), (50, false), (60, false)]
        );
    }

    #[test]
    fn test_grid_bands_mid_life() {
        let impact = project(&calc_at(25.3, Gender::Female, DEFAULT_LIFE_EXPECTANCY_FEMALE));

        let sizes: Vec<u32> = impact.grid_bands.iter().map(|b| b.size_px).collect();
        assert_eq!(sizes, vec![30, 26, 22, 18]);

        let first = impact.grid_bands[0];
        assert_eq!((first.start_age, first.end_age), (0.0, 20.0));
        assert_eq!(first.cells_total, 20.0);
        assert_eq!(first.cells_spent, 20.0);

        let second = impact.grid_bands[1];
        assert_eq!(second.cells_spent, 6.0); // ceil(5.3)

        assert_eq!(impact.grid_bands[2].cells_spent, 0.0);

        let last = impact.grid_bands[3];
        assert_eq!(last.end_age, DEFAULT_LIFE_EXPECTANCY_FEMALE);
        assert_abs_diff_eq!(last.cells_total, 20.88, epsilon = 1e-9);
        assert_eq!(last.cells_spent, 0.0);

        assert_eq!(impact.grid_cells_spent, 25.0);
        assert_eq!(impact.total_weeks, 4206); // round(80.88 * 52) = round(4205.76)
        assert_eq!(impact.weeks_spent, 1316); // round(25.3 * 52) = round(1315.6)
    }

    #[test]
    fn test_last_band_partially_lived_is_capped() {
        // 80.5 years lived, expectancy 80.88: final band fractional total
        let impact = project(&calc_at(80.5, Gender::Female, DEFAULT_LIFE_EXPECTANCY_FEMALE));
        let last = impact.grid_bands[3];
        assert_abs_diff_eq!(last.cells_spent, last.cells_total, epsilon = 1e-9);
        assert_eq!(impact.grid_total_cells, DEFAULT_LIFE_EXPECTANCY_FEMALE);
        assert_eq!(impact.grid_cells_spent, 80.0);
    }

    #[test]
    fn test_weeks_never_exceed_total() {
        let impact = project(&calc_at(130.0, Gender::Male, DEFAULT_LIFE_EXPECTANCY_MALE));
        assert_eq!(impact.total_weeks, 6344);
        assert_eq!(impact.weeks_spent, impact.total_weeks);
        assert_eq!(impact.weeks_remaining(), 0);
        assert_eq!(impact.grid_cells_spent, MAX_HUMAN_AGE);
    }

    #[test]
    fn test_projection_is_deterministic() {
        let now = midnight(NaiveDate::from_ymd_opt(2025, 9, 17).unwrap());
        let info = BirthInfo::new(birth(), Gender::Female).with_life_expectancy(88.0);
        let a = project(&calculate(&info, now));
        let b = project(&calculate(&info, now));
        assert_eq!(a, b);
    }

    #[test]
    fn test_shapes() {
        let impact = project(&calc_at(45.0, Gender::Male, DEFAULT_LIFE_EXPECTANCY_MALE));
        assert_eq!(impact.strata.len(), 4);
        assert_eq!(impact.thresholds.len(), 6);
        assert_eq!(impact.grid_bands.len(), 4);
        assert_eq!(impact.strata_spent(), 2);
    }
}
