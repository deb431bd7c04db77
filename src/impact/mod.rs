//! Impact views derived from a life calculation

mod projector;
mod types;

pub use projector::project;
pub use types::{
    GridBand, ImpactData, Stratum, Threshold, AGE_THRESHOLDS, GRID_CELL_SIZES, STRATA_BOUNDS,
    WEEKS_PER_YEAR,
};
