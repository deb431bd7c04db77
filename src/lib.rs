//! Life Spent - how much of an expected lifespan has been used
//!
//! This library provides:
//! - Life calculation from a birth date, gender and optional overrides
//! - Impact datasets for visualization (weeks wall, age strata, threshold strip, year grid)
//! - Birth-date and override validation
//! - Share-link parameter parsing and building
//! - Display locales, saved settings and batch CSV loading

pub mod person;
pub mod demographics;
pub mod calculation;
pub mod impact;
pub mod validation;
pub mod share;
pub mod format;
pub mod locale;
pub mod settings;
pub mod batch;

// Re-export commonly used types
pub use person::{BirthInfo, Gender};
pub use demographics::DemographicDefaults;
pub use calculation::{calculate, LifeCalculation, LifeEngine};
pub use impact::{project, ImpactData};
pub use validation::ValidationError;
pub use locale::Locale;
