//! Visualization datasets derived from a calculation

use serde::{Deserialize, Serialize};

/// Strata bounds (years): 0–20, 20–40, 40–60, 60–life expectancy
pub const STRATA_BOUNDS: [f64; 4] = [0.0, 20.0, 40.0, 60.0];

/// Key age checkpoints (years)
pub const AGE_THRESHOLDS: [u32; 6] = [18, 30, 35, 40, 50, 60];

/// Grid cell size (px) per band; older bands render smaller
pub const GRID_CELL_SIZES: [u32; 4] = [30, 26, 22, 18];

/// Weeks per year for the weeks wall
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// A coarse age band and whether it has been fully lived
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stratum {
    pub start: f64,
    pub end: f64,
    pub spent: bool,
}

/// A single age checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threshold {
    pub age: u32,
    pub passed: bool,
}

/// A stratum expressed as yearly grid cells
///
/// Cell counts are fractional when the band ends at a non-integer life expectancy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridBand {
    pub start_age: f64,
    pub end_age: f64,
    /// Rendering hint for one cell, in pixels
    pub size_px: u32,
    pub cells_spent: f64,
    pub cells_total: f64,
}

/// Every dataset the impact views render
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactData {
    pub total_weeks: u32,
    pub weeks_spent: u32,
    pub strata: Vec<Stratum>,
    pub thresholds: Vec<Threshold>,
    pub grid_total_cells: f64,
    pub grid_cells_spent: f64,
    pub grid_bands: Vec<GridBand>,
}

impl ImpactData {
    /// Weeks left on the weeks wall
    pub fn weeks_remaining(&self) -> u32 {
        self.total_weeks - self.weeks_spent
    }

    /// Number of strata already fully lived
    pub fn strata_spent(&self) -> usize {
        self.strata.iter().filter(|s| s.spent).count()
    }

    /// Number of age checkpoints already passed
    pub fn thresholds_passed(&self) -> usize {
        self.thresholds.iter().filter(|t| t.passed).count()
    }
}
